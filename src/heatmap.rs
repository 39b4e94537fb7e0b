use std::collections::HashMap;

use chrono::{Datelike, Duration, NaiveDate};

use crate::calendar;
use crate::format;
use crate::models::{DailyActivity, HeatmapCell, HeatmapGrid, MonthLabel};

pub const WEEKS: usize = 26;
pub const DAYS_PER_WEEK: usize = 7;
/// Rendered cell size (13px) plus gap (3px); month labels are offset in
/// multiples of this step.
pub const GRID_STEP_PX: u32 = 16;

/// Intensity tier for a day's log count. Display only.
pub fn bucket_level(count: i64) -> u8 {
    match count {
        c if c <= 0 => 0,
        1 => 1,
        2 => 2,
        3 | 4 => 3,
        _ => 4,
    }
}

/// Expand sparse daily activity into the full 26-week grid ending on the week
/// that contains `today`. Cells are ordered week-major, day-minor, Monday
/// first. Days after `today` are masked with the -1 sentinel and carry no
/// bucket level. Entries with a negative count are dropped.
pub fn build_heatmap(daily: &[DailyActivity], today: NaiveDate) -> HeatmapGrid {
    let this_monday = calendar::week_start(today);
    let start_monday = this_monday - Duration::weeks(WEEKS as i64 - 1);

    let counts: HashMap<NaiveDate, i64> = daily
        .iter()
        .filter(|d| d.count >= 0)
        .map(|d| (d.date, d.count))
        .collect();

    let mut cells = Vec::with_capacity(WEEKS * DAYS_PER_WEEK);
    let mut months = Vec::new();
    let mut prev_month = None;

    for week in 0..WEEKS {
        let monday = start_monday + Duration::weeks(week as i64);
        if prev_month != Some(monday.month()) {
            months.push(MonthLabel {
                column: week,
                offset_px: week as u32 * GRID_STEP_PX,
                label: monday.format("%b").to_string(),
            });
            prev_month = Some(monday.month());
        }

        for day in 0..DAYS_PER_WEEK {
            let date = monday + Duration::days(day as i64);
            let is_future = date > today;
            let count = if is_future {
                -1
            } else {
                counts.get(&date).copied().unwrap_or(0)
            };
            let bucket = if is_future { None } else { Some(bucket_level(count)) };
            cells.push(HeatmapCell {
                date,
                count,
                bucket_level: bucket,
                is_future,
            });
        }
    }

    HeatmapGrid { cells, months }
}

/// Tooltip text for a cell. Future cells never respond to hover.
pub fn hover_label(cell: &HeatmapCell) -> Option<String> {
    if cell.is_future {
        return None;
    }
    let noun = if cell.count == 1 { "log" } else { "logs" };
    Some(format!(
        "{} {} on {}",
        cell.count,
        noun,
        format::long_date(cell.date)
    ))
}
