use std::collections::HashMap;

use chrono::{Duration, NaiveDate};

use crate::calendar;
use crate::models::{TrendSignal, WeeklyVolumePoint};

pub const SERIES_WEEKS: usize = 12;
const TREND_WINDOW: usize = 3;

/// Expand a sparse weekly series into exactly [`SERIES_WEEKS`] contiguous
/// points ending on the Monday of the week containing `today`. Weeks absent
/// from the input get zero sessions and sets; entries with negative values
/// are dropped, and entries keyed off a non-Monday date never match.
pub fn fill_weekly(sparse: &[WeeklyVolumePoint], today: NaiveDate) -> Vec<WeeklyVolumePoint> {
    let this_monday = calendar::week_start(today);
    let by_start: HashMap<NaiveDate, &WeeklyVolumePoint> = sparse
        .iter()
        .filter(|w| w.sessions >= 0 && w.sets >= 0)
        .map(|w| (w.week_start, w))
        .collect();

    (0..SERIES_WEEKS)
        .map(|i| {
            let week_start = this_monday - Duration::weeks((SERIES_WEEKS - 1 - i) as i64);
            match by_start.get(&week_start) {
                Some(w) => WeeklyVolumePoint {
                    week_start,
                    sessions: w.sessions,
                    sets: w.sets,
                },
                None => WeeklyVolumePoint {
                    week_start,
                    sessions: 0,
                    sets: 0,
                },
            }
        })
        .collect()
}

/// Compare the mean sets of the last three weeks against the three before.
/// A higher recent mean is the only signal; there is no "down" direction.
pub fn trend(points: &[WeeklyVolumePoint]) -> Option<TrendSignal> {
    if points.len() < TREND_WINDOW * 2 {
        return None;
    }
    let sets: Vec<f64> = points.iter().map(|p| p.sets as f64).collect();
    let recent: f64 =
        sets[sets.len() - TREND_WINDOW..].iter().sum::<f64>() / TREND_WINDOW as f64;
    let earlier: f64 = sets[sets.len() - TREND_WINDOW * 2..sets.len() - TREND_WINDOW]
        .iter()
        .sum::<f64>()
        / TREND_WINDOW as f64;
    (recent > earlier).then_some(TrendSignal::Up)
}

/// Screen-reader text for the volume series.
pub fn series_summary(points: &[WeeklyVolumePoint]) -> String {
    let total: i64 = points.iter().map(|p| p.sets).sum();
    let average = if points.is_empty() {
        0
    } else {
        (total as f64 / points.len() as f64).round() as i64
    };
    format!(
        "Weekly training volume over {} weeks. Total sets: {}. Average: {} sets per week.",
        points.len(),
        total,
        average
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn today() -> NaiveDate {
        date(2026, 8, 5)
    }

    fn point(week_start: NaiveDate, sessions: i64, sets: i64) -> WeeklyVolumePoint {
        WeeklyVolumePoint { week_start, sessions, sets }
    }

    #[test]
    fn fills_twelve_contiguous_weeks_anchored_to_the_current_monday() {
        let filled = fill_weekly(&[], today());
        assert_eq!(filled.len(), SERIES_WEEKS);
        assert_eq!(filled[11].week_start, date(2026, 8, 3));
        assert_eq!(filled[0].week_start, date(2026, 5, 18));
        for pair in filled.windows(2) {
            assert_eq!(
                pair[1].week_start - pair[0].week_start,
                Duration::weeks(1)
            );
        }
        assert!(filled.iter().all(|p| p.sessions == 0 && p.sets == 0));
    }

    #[test]
    fn only_the_current_week_present_yields_eleven_zeros() {
        let sparse = vec![point(date(2026, 8, 3), 1, 10)];
        let filled = fill_weekly(&sparse, today());
        assert_eq!(filled.len(), 12);
        assert_eq!(filled[11].sets, 10);
        assert_eq!(filled[11].sessions, 1);
        assert!(filled[..11].iter().all(|p| p.sets == 0));
    }

    #[test]
    fn filling_a_continuous_series_reproduces_it() {
        let continuous: Vec<WeeklyVolumePoint> = (0..12)
            .map(|i| point(date(2026, 5, 18) + Duration::weeks(i), 3, 10 + i))
            .collect();
        assert_eq!(fill_weekly(&continuous, today()), continuous);
    }

    #[test]
    fn malformed_and_misaligned_entries_become_zeros() {
        let sparse = vec![
            point(date(2026, 8, 3), -1, 10),
            // Wednesday, not a Monday; never matches a slot.
            point(date(2026, 7, 29), 3, 9),
        ];
        let filled = fill_weekly(&sparse, today());
        assert!(filled.iter().all(|p| p.sessions == 0 && p.sets == 0));
    }

    #[test]
    fn trend_fires_even_from_near_zero_history() {
        // Eleven empty weeks plus a single 10-set current week: the recent
        // mean 10/3 beats the earlier mean 0.
        let sparse = vec![point(date(2026, 8, 3), 1, 10)];
        let filled = fill_weekly(&sparse, today());
        assert_eq!(trend(&filled), Some(TrendSignal::Up));
    }

    #[test]
    fn no_signal_when_recent_volume_does_not_exceed_earlier() {
        let flat: Vec<WeeklyVolumePoint> = (0..12)
            .map(|i| point(date(2026, 5, 18) + Duration::weeks(i), 3, 10))
            .collect();
        assert_eq!(trend(&flat), None);

        let declining: Vec<WeeklyVolumePoint> = (0..12)
            .map(|i| point(date(2026, 5, 18) + Duration::weeks(i), 3, 24 - i))
            .collect();
        assert_eq!(trend(&declining), None);
    }

    #[test]
    fn trend_needs_at_least_six_points() {
        let short: Vec<WeeklyVolumePoint> = (0..5)
            .map(|i| point(date(2026, 6, 29) + Duration::weeks(i), 1, i))
            .collect();
        assert_eq!(trend(&short), None);
    }

    #[test]
    fn summary_reports_total_and_rounded_average() {
        let sparse = vec![point(date(2026, 8, 3), 1, 10)];
        let filled = fill_weekly(&sparse, today());
        assert_eq!(
            series_summary(&filled),
            "Weekly training volume over 12 weeks. Total sets: 10. Average: 1 sets per week."
        );
    }
}
