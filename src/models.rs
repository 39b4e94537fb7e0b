use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One calendar day with at least one recorded log. Absent days are implicit zero.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyActivity {
    pub date: NaiveDate,
    pub count: i64,
}

/// A single cell of the 26-week activity grid. Future cells carry the -1
/// sentinel count and no bucket level.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeatmapCell {
    pub date: NaiveDate,
    pub count: i64,
    pub bucket_level: Option<u8>,
    pub is_future: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthLabel {
    pub column: usize,
    pub offset_px: u32,
    pub label: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeatmapGrid {
    pub cells: Vec<HeatmapCell>,
    pub months: Vec<MonthLabel>,
}

/// One week of training volume. `week_start` is always a Monday.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeeklyVolumePoint {
    pub week_start: NaiveDate,
    pub sessions: i64,
    pub sets: i64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TrendSignal {
    Up,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VolumeSeries {
    pub points: Vec<WeeklyVolumePoint>,
    pub trend: Option<TrendSignal>,
    pub summary: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LevelStart {
    pub level: i32,
    pub started_at: NaiveDate,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LevelGraduation {
    pub level: i32,
    pub graduated_at: NaiveDate,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LevelTimelineEntry {
    pub level: u8,
    pub started_at: Option<NaiveDate>,
    pub graduated_at: Option<NaiveDate>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersonalBest {
    pub exercise_key: String,
    pub best_hold_seconds: Option<i64>,
    pub achieved_at: NaiveDate,
}

/// A personal best that survived filtering, with display strings attached.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormattedBest {
    pub exercise_key: String,
    pub display_name: String,
    pub hold: String,
    pub achieved: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StreakSummary {
    pub current: i64,
    pub longest: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExerciseFrequency {
    pub exercise_key: String,
    pub total_logs: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RankedExercise {
    pub rank: usize,
    pub exercise_key: String,
    pub display_name: String,
    pub total_logs: i64,
    pub percent_of_max: u8,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Totals {
    pub total_sessions: i64,
    pub total_sets: i64,
    pub total_logs: i64,
}

/// Everything the analytics engine consumes, fetched in one round trip from
/// the log store or produced whole by the synthetic generator. The default
/// value is the fully empty bundle, which is a valid input, not an error.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AggregateBundle {
    pub daily_activity: Vec<DailyActivity>,
    pub weekly_volume: Vec<WeeklyVolumePoint>,
    pub level_starts: Vec<LevelStart>,
    pub graduations: Vec<LevelGraduation>,
    pub personal_bests: Vec<PersonalBest>,
    pub exercise_breakdown: Vec<ExerciseFrequency>,
    pub streak: StreakSummary,
    pub totals: Totals,
}

/// The full exposed surface for the presentation layer, computed fresh from
/// an [`AggregateBundle`] and a reference date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProgressDashboard {
    pub as_of: NaiveDate,
    pub heatmap: HeatmapGrid,
    pub volume: VolumeSeries,
    pub timeline: Vec<LevelTimelineEntry>,
    pub personal_bests: Vec<FormattedBest>,
    pub most_practiced: Vec<RankedExercise>,
    pub streak: StreakSummary,
    pub totals: Totals,
}
