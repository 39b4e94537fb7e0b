use chrono::NaiveDate;

use crate::heatmap;
use crate::models::{AggregateBundle, ProgressDashboard, VolumeSeries};
use crate::stats;
use crate::timeline;
use crate::volume;

/// Run every engine component over one aggregate bundle. Pure function of the
/// bundle and the reference date; empty input yields the full fixed-shape
/// output rather than an error.
pub fn assemble(bundle: &AggregateBundle, today: NaiveDate) -> ProgressDashboard {
    let grid = heatmap::build_heatmap(&bundle.daily_activity, today);
    let points = volume::fill_weekly(&bundle.weekly_volume, today);
    let trend = volume::trend(&points);
    let summary = volume::series_summary(&points);

    ProgressDashboard {
        as_of: today,
        heatmap: grid,
        volume: VolumeSeries { points, trend, summary },
        timeline: timeline::build_timeline(&bundle.level_starts, &bundle.graduations),
        personal_bests: stats::hold_bests(&bundle.personal_bests),
        most_practiced: stats::rank_breakdown(&bundle.exercise_breakdown, stats::TOP_EXERCISES),
        streak: stats::validate_streak(&bundle.streak),
        totals: bundle.totals.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{DailyActivity, StreakSummary, TrendSignal, WeeklyVolumePoint};

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 8, 5).unwrap()
    }

    #[test]
    fn empty_input_is_a_valid_fully_shaped_state() {
        let dashboard = assemble(&AggregateBundle::default(), today());
        assert_eq!(dashboard.heatmap.cells.len(), 182);
        assert_eq!(dashboard.volume.points.len(), 12);
        assert!(dashboard.volume.points.iter().all(|p| p.sets == 0));
        assert_eq!(dashboard.volume.trend, None);
        assert_eq!(dashboard.timeline.len(), 6);
        assert!(dashboard.personal_bests.is_empty());
        assert!(dashboard.most_practiced.is_empty());
        assert_eq!(dashboard.streak, StreakSummary { current: 0, longest: 0 });
    }

    #[test]
    fn sparse_current_week_flows_through_to_the_trend() {
        let bundle = AggregateBundle {
            daily_activity: vec![DailyActivity { date: today(), count: 2 }],
            weekly_volume: vec![WeeklyVolumePoint {
                week_start: NaiveDate::from_ymd_opt(2026, 8, 3).unwrap(),
                sessions: 1,
                sets: 10,
            }],
            ..AggregateBundle::default()
        };
        let dashboard = assemble(&bundle, today());
        assert_eq!(dashboard.volume.trend, Some(TrendSignal::Up));
        let lit: Vec<_> = dashboard
            .heatmap
            .cells
            .iter()
            .filter(|c| c.bucket_level.unwrap_or(0) > 0)
            .collect();
        assert_eq!(lit.len(), 1);
        assert_eq!(lit[0].date, today());
        assert_eq!(lit[0].bucket_level, Some(2));
    }
}
