use chrono::{Datelike, Duration, NaiveDate, Weekday};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::calendar;
use crate::db;
use crate::heatmap;
use crate::models::{
    AggregateBundle, DailyActivity, ExerciseFrequency, LevelGraduation, LevelStart,
    PersonalBest, Totals, WeeklyVolumePoint,
};
use crate::volume;

const DEMO_BEST_RANGES: [(&str, i64, i64); 5] = [
    ("hang", 60, 150),
    ("hollow_body", 35, 90),
    ("chest_to_wall", 25, 80),
    ("protracted_plank", 40, 110),
    ("freestanding", 4, 20),
];

const DEMO_BREAKDOWN_KEYS: [&str; 8] = [
    "chest_to_wall",
    "hollow_body",
    "hang",
    "heel_pulls",
    "toe_pulls",
    "wrist_heel_raises",
    "kickup",
    "box_balance",
];

/// Produce a complete, internally consistent aggregate bundle for demo and
/// test runs. Byte-identical for equal (seed, today); never used as a
/// fallback when a real log store is configured.
pub fn generate(seed: u64, today: NaiveDate) -> AggregateBundle {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);

    let daily_activity = demo_daily_activity(&mut rng, today);
    let weekly_volume = demo_weekly_volume(&mut rng, today);
    let (level_starts, graduations) = demo_level_journey(&mut rng, today);
    let personal_bests = demo_personal_bests(&mut rng, today);
    let exercise_breakdown = demo_breakdown(&mut rng);

    let dates: Vec<NaiveDate> = daily_activity.iter().map(|d| d.date).collect();
    let streak = db::streak_from_dates(&dates, today);
    let totals = Totals {
        total_sessions: daily_activity.len() as i64,
        total_sets: weekly_volume.iter().map(|w| w.sets).sum(),
        total_logs: daily_activity.iter().map(|d| d.count).sum(),
    };

    AggregateBundle {
        daily_activity,
        weekly_volume,
        level_starts,
        graduations,
        personal_bests,
        exercise_breakdown,
        streak,
        totals,
    }
}

/// Activity across the whole heatmap window. Probability of training decays
/// as months recede from today; weekends draw from a wider count range.
fn demo_daily_activity(rng: &mut ChaCha8Rng, today: NaiveDate) -> Vec<DailyActivity> {
    let start = calendar::week_start(today) - Duration::weeks(heatmap::WEEKS as i64 - 1);
    let mut out = Vec::new();

    let mut date = start;
    while date <= today {
        let months_back = (today - date).num_days() / 30;
        let probability = (0.78 - 0.09 * months_back as f64).max(0.25);
        if rng.gen_bool(probability) {
            let weekend = matches!(date.weekday(), Weekday::Sat | Weekday::Sun);
            let count = if weekend {
                rng.gen_range(1..=5)
            } else {
                rng.gen_range(1..=3)
            };
            out.push(DailyActivity { date, count });
        }
        date += Duration::days(1);
    }
    out
}

/// Twelve Monday-aligned weeks with mild growth, the last three scaled up
/// roughly 20% so the trend badge fires on the demo dashboard.
fn demo_weekly_volume(rng: &mut ChaCha8Rng, today: NaiveDate) -> Vec<WeeklyVolumePoint> {
    let this_monday = calendar::week_start(today);
    (0..volume::SERIES_WEEKS)
        .map(|i| {
            let week_start =
                this_monday - Duration::weeks((volume::SERIES_WEEKS - 1 - i) as i64);
            let sessions = rng.gen_range(2..=5);
            let mut sets = rng.gen_range(6..=10) + i as i64;
            if i >= volume::SERIES_WEEKS - 3 {
                sets = (sets as f64 * 1.2).round() as i64;
            }
            WeeklyVolumePoint { week_start, sessions, sets }
        })
        .collect()
}

/// A mid-journey athlete: levels 1 and 2 graduated, level 3 in progress.
fn demo_level_journey(
    rng: &mut ChaCha8Rng,
    today: NaiveDate,
) -> (Vec<LevelStart>, Vec<LevelGraduation>) {
    let start_1 = today - Duration::days(rng.gen_range(150..=200));
    let start_2 = today - Duration::days(rng.gen_range(95..=130));
    let start_3 = today - Duration::days(rng.gen_range(30..=70));
    let grad_1 = start_1 + Duration::days(rng.gen_range(30..=50));
    let grad_2 = start_2 + Duration::days(rng.gen_range(30..=50));

    let starts = vec![
        LevelStart { level: 1, started_at: start_1 },
        LevelStart { level: 2, started_at: start_2 },
        LevelStart { level: 3, started_at: start_3 },
    ];
    let graduations = vec![
        LevelGraduation { level: 1, graduated_at: grad_1 },
        LevelGraduation { level: 2, graduated_at: grad_2 },
    ];
    (starts, graduations)
}

fn demo_personal_bests(rng: &mut ChaCha8Rng, today: NaiveDate) -> Vec<PersonalBest> {
    DEMO_BEST_RANGES
        .iter()
        .map(|&(key, lo, hi)| PersonalBest {
            exercise_key: key.to_string(),
            best_hold_seconds: Some(rng.gen_range(lo..=hi)),
            achieved_at: today - Duration::days(rng.gen_range(5..=75)),
        })
        .collect()
}

fn demo_breakdown(rng: &mut ChaCha8Rng) -> Vec<ExerciseFrequency> {
    let mut count: i64 = rng.gen_range(32..=44);
    DEMO_BREAKDOWN_KEYS
        .iter()
        .map(|&key| {
            let entry = ExerciseFrequency {
                exercise_key: key.to_string(),
                total_logs: count,
            };
            count = (count - rng.gen_range(1..=6)).max(1);
            entry
        })
        .collect()
}
