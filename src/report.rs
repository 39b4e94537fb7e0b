use std::fmt::Write;

use crate::format;
use crate::heatmap;
use crate::models::{HeatmapGrid, ProgressDashboard};
use crate::timeline;

const BUCKET_GLYPHS: [char; 5] = ['·', '░', '▒', '▓', '█'];
const FUTURE_GLYPH: char = ' ';

pub fn build_report(scope: Option<&str>, dashboard: &ProgressDashboard) -> String {
    let mut output = String::new();
    let scope_label = scope.unwrap_or("all athletes");

    let _ = writeln!(output, "# Workout Progress Report");
    let _ = writeln!(
        output,
        "Generated for {} as of {}",
        scope_label,
        format::long_date(dashboard.as_of)
    );

    let _ = writeln!(output);
    let _ = writeln!(output, "## At a Glance");
    let _ = writeln!(output, "- Current streak: {} days", dashboard.streak.current);
    let _ = writeln!(output, "- Longest streak: {} days", dashboard.streak.longest);
    let _ = writeln!(output, "- Total sessions: {}", dashboard.totals.total_sessions);
    let _ = writeln!(output, "- Total sets: {}", dashboard.totals.total_sets);
    let _ = writeln!(output, "- Total logs: {}", dashboard.totals.total_logs);

    let _ = writeln!(output);
    let _ = writeln!(output, "## Activity");
    let _ = writeln!(output, "```text");
    let _ = write!(output, "{}", render_grid(&dashboard.heatmap));
    let _ = writeln!(output, "```");
    let active_days = dashboard
        .heatmap
        .cells
        .iter()
        .filter(|c| c.count > 0)
        .count();
    let _ = writeln!(output, "{active_days} active days in the last 26 weeks.");
    if let Some(today_cell) = dashboard
        .heatmap
        .cells
        .iter()
        .find(|c| c.date == dashboard.as_of)
    {
        if let Some(label) = heatmap::hover_label(today_cell) {
            let _ = writeln!(output, "Today: {label}");
        }
    }

    let _ = writeln!(output);
    let _ = writeln!(output, "## Weekly Volume");
    if dashboard.volume.trend.is_some() {
        let _ = writeln!(output, "↑ trending up");
    }
    for point in &dashboard.volume.points {
        let _ = writeln!(
            output,
            "- {}: {} sessions, {} sets",
            point.week_start.format("%-d %b"),
            point.sessions,
            point.sets
        );
    }
    let _ = writeln!(output, "{}", dashboard.volume.summary);

    let _ = writeln!(output);
    let _ = writeln!(output, "## Level Journey");
    let current = timeline::current_level(&dashboard.timeline);
    for entry in &dashboard.timeline {
        let status = match (entry.graduated_at, entry.level == current) {
            (Some(graduated), _) => format!("graduated {}", format::short_date(graduated)),
            (None, true) => match entry.started_at {
                Some(started) => format!("current (started {})", format::long_date(started)),
                None => "current".to_string(),
            },
            (None, false) => "upcoming".to_string(),
        };
        let _ = writeln!(output, "- Level {}: {}", entry.level, status);
    }

    let _ = writeln!(output);
    let _ = writeln!(output, "## Personal Bests");
    if dashboard.personal_bests.is_empty() {
        let _ = writeln!(output, "No personal bests yet. Keep logging!");
    } else {
        for best in &dashboard.personal_bests {
            let _ = writeln!(
                output,
                "- {}: {} ({})",
                best.display_name, best.hold, best.achieved
            );
        }
    }

    let _ = writeln!(output);
    let _ = writeln!(output, "## Most Practiced");
    if dashboard.most_practiced.is_empty() {
        let _ = writeln!(output, "No exercises logged yet.");
    } else {
        for exercise in &dashboard.most_practiced {
            let bar = "#".repeat((exercise.percent_of_max / 10) as usize);
            let _ = writeln!(
                output,
                "- {}. {}: {} logs [{:<10}] {}%",
                exercise.rank,
                exercise.display_name,
                exercise.total_logs,
                bar,
                exercise.percent_of_max
            );
        }
    }

    output
}

/// Text rendering of the heatmap: month labels on top, one row per weekday,
/// one column per week. Future days stay blank.
fn render_grid(grid: &HeatmapGrid) -> String {
    let weeks = grid.cells.len() / heatmap::DAYS_PER_WEEK;
    let mut out = String::new();

    let mut header = vec![' '; weeks + 2];
    for month in &grid.months {
        for (i, ch) in month.label.chars().enumerate() {
            if month.column + i < header.len() {
                header[month.column + i] = ch;
            }
        }
    }
    let _ = writeln!(out, "    {}", header.iter().collect::<String>().trim_end());

    let day_names = ["Mon", "", "Wed", "", "Fri", "", ""];
    for (day, name) in day_names.iter().enumerate() {
        let mut row = String::with_capacity(weeks);
        for week in 0..weeks {
            let cell = &grid.cells[week * heatmap::DAYS_PER_WEEK + day];
            row.push(match cell.bucket_level {
                Some(level) => BUCKET_GLYPHS[level as usize],
                None => FUTURE_GLYPH,
            });
        }
        let _ = writeln!(out, "{name:<4}{row}");
    }
    let _ = writeln!(out, "    Less {} More", BUCKET_GLYPHS.iter().collect::<String>());

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dashboard;
    use crate::models::AggregateBundle;
    use crate::synthetic;
    use chrono::NaiveDate;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 8, 5).unwrap()
    }

    #[test]
    fn report_has_every_section() {
        let bundle = synthetic::generate(42, today());
        let dashboard = dashboard::assemble(&bundle, today());
        let report = build_report(Some("demo athlete"), &dashboard);

        assert!(report.contains("# Workout Progress Report"));
        assert!(report.contains("Generated for demo athlete as of 5 Aug 2026"));
        assert!(report.contains("## At a Glance"));
        assert!(report.contains("## Activity"));
        assert!(report.contains("## Weekly Volume"));
        assert!(report.contains("↑ trending up"));
        assert!(report.contains("## Level Journey"));
        assert!(report.contains("- Level 3: current"));
        assert!(report.contains("## Personal Bests"));
        assert!(report.contains("## Most Practiced"));
    }

    #[test]
    fn empty_dashboard_renders_placeholders_not_errors() {
        let dashboard = dashboard::assemble(&AggregateBundle::default(), today());
        let report = build_report(None, &dashboard);

        assert!(report.contains("Generated for all athletes"));
        assert!(report.contains("0 active days in the last 26 weeks."));
        assert!(report.contains("No personal bests yet. Keep logging!"));
        assert!(report.contains("No exercises logged yet."));
        assert!(report.contains("- Level 1: current"));
        assert!(report.contains("- Level 6: upcoming"));
    }

    #[test]
    fn grid_rendering_is_seven_rows_of_twentysix_columns() {
        let dashboard = dashboard::assemble(&AggregateBundle::default(), today());
        let rendered = render_grid(&dashboard.heatmap);
        let rows: Vec<&str> = rendered.lines().collect();
        // Header, seven weekday rows, legend.
        assert_eq!(rows.len(), 9);
        for row in &rows[1..8] {
            assert_eq!(row.chars().count(), 4 + 26);
        }
        assert!(rows[0].contains("Feb"));
        assert!(rows[0].contains("Aug"));
    }
}
