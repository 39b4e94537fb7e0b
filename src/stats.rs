use crate::format;
use crate::models::{
    ExerciseFrequency, FormattedBest, PersonalBest, RankedExercise, StreakSummary,
};

/// How many exercises the "most practiced" ranking shows.
pub const TOP_EXERCISES: usize = 5;

/// Keep only bests with a positive hold and attach display strings. A zero or
/// missing hold produces no entry at all.
pub fn hold_bests(bests: &[PersonalBest]) -> Vec<FormattedBest> {
    bests
        .iter()
        .filter_map(|pb| {
            let hold = format::format_hold(pb.best_hold_seconds)?;
            Some(FormattedBest {
                exercise_key: pb.exercise_key.clone(),
                display_name: format::exercise_name(&pb.exercise_key),
                hold,
                achieved: format::long_date(pb.achieved_at),
            })
        })
        .collect()
}

/// Rank the exercise breakdown by log count, keep the top `top_n`, and scale
/// each bar as a percentage of the leader.
pub fn rank_breakdown(breakdown: &[ExerciseFrequency], top_n: usize) -> Vec<RankedExercise> {
    let mut ordered: Vec<&ExerciseFrequency> =
        breakdown.iter().filter(|e| e.total_logs >= 0).collect();
    ordered.sort_by(|a, b| b.total_logs.cmp(&a.total_logs));

    let max = ordered.first().map_or(0, |e| e.total_logs);
    ordered
        .into_iter()
        .take(top_n)
        .enumerate()
        .map(|(i, e)| RankedExercise {
            rank: i + 1,
            exercise_key: e.exercise_key.clone(),
            display_name: format::exercise_name(&e.exercise_key),
            total_logs: e.total_logs,
            percent_of_max: if max > 0 {
                ((e.total_logs as f64 / max as f64) * 100.0).round() as u8
            } else {
                0
            },
        })
        .collect()
}

/// Shape validation only; streaks arrive pre-aggregated. Negative values are
/// clamped to zero and `longest` is lifted to at least `current`.
pub fn validate_streak(streak: &StreakSummary) -> StreakSummary {
    let current = streak.current.max(0);
    StreakSummary {
        current,
        longest: streak.longest.max(current),
    }
}
