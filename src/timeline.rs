use crate::models::{LevelGraduation, LevelStart, LevelTimelineEntry};

pub const LEVELS: u8 = 6;

/// Merge the two sparse level-fact sources into the full six-entry timeline.
/// Absence means null; nothing is inferred from adjacent levels. Facts with a
/// level outside 1..=6 never match an entry and are effectively dropped.
pub fn build_timeline(
    starts: &[LevelStart],
    graduations: &[LevelGraduation],
) -> Vec<LevelTimelineEntry> {
    (1..=LEVELS)
        .map(|level| LevelTimelineEntry {
            level,
            started_at: starts
                .iter()
                .find(|s| s.level == i32::from(level))
                .map(|s| s.started_at),
            graduated_at: graduations
                .iter()
                .find(|g| g.level == i32::from(level))
                .map(|g| g.graduated_at),
        })
        .collect()
}

/// Highest level with a recorded start, defaulting to 1. Used only for
/// presentation (marking the "current" step on the journey).
pub fn current_level(entries: &[LevelTimelineEntry]) -> u8 {
    entries
        .iter()
        .filter(|e| e.started_at.is_some())
        .map(|e| e.level)
        .max()
        .unwrap_or(1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn timeline_is_total_even_with_empty_sources() {
        let timeline = build_timeline(&[], &[]);
        assert_eq!(timeline.len(), 6);
        for (i, entry) in timeline.iter().enumerate() {
            assert_eq!(entry.level, i as u8 + 1);
            assert_eq!(entry.started_at, None);
            assert_eq!(entry.graduated_at, None);
        }
    }

    #[test]
    fn graduation_without_start_leaves_start_null() {
        let graduations = vec![LevelGraduation {
            level: 3,
            graduated_at: date(2026, 5, 2),
        }];
        let timeline = build_timeline(&[], &graduations);
        assert_eq!(timeline[2].graduated_at, Some(date(2026, 5, 2)));
        assert_eq!(timeline[2].started_at, None);
        for entry in timeline.iter().filter(|e| e.level != 3) {
            assert_eq!(entry.started_at, None);
            assert_eq!(entry.graduated_at, None);
        }
    }

    #[test]
    fn out_of_range_levels_are_ignored() {
        let starts = vec![
            LevelStart { level: 0, started_at: date(2026, 1, 1) },
            LevelStart { level: 7, started_at: date(2026, 1, 1) },
            LevelStart { level: 2, started_at: date(2026, 3, 9) },
        ];
        let timeline = build_timeline(&starts, &[]);
        assert_eq!(timeline.len(), 6);
        assert_eq!(timeline[1].started_at, Some(date(2026, 3, 9)));
        assert!(timeline
            .iter()
            .filter(|e| e.level != 2)
            .all(|e| e.started_at.is_none()));
    }

    #[test]
    fn current_level_is_the_highest_started() {
        let starts = vec![
            LevelStart { level: 1, started_at: date(2026, 1, 5) },
            LevelStart { level: 3, started_at: date(2026, 4, 20) },
        ];
        let timeline = build_timeline(&starts, &[]);
        assert_eq!(current_level(&timeline), 3);
        assert_eq!(current_level(&build_timeline(&[], &[])), 1);
    }
}
