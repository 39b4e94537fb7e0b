use anyhow::Context;
use chrono::{Duration, NaiveDate};
use sqlx::{PgPool, Row};
use tracing::debug;
use uuid::Uuid;

use crate::calendar;
use crate::heatmap;
use crate::models::{
    AggregateBundle, DailyActivity, ExerciseFrequency, LevelGraduation, LevelStart,
    PersonalBest, StreakSummary, Totals, WeeklyVolumePoint,
};
use crate::volume;

pub async fn init_db(pool: &PgPool) -> anyhow::Result<()> {
    sqlx::migrate!("./migrations").run(pool).await?;
    Ok(())
}

pub async fn seed(pool: &PgPool) -> anyhow::Result<()> {
    let athletes = vec![
        (
            Uuid::parse_str("7b1e0d3a-51c4-4f7e-9a34-2d8b16f0c9e1")?,
            "Mat",
            "mat@bodyweightgym.example",
        ),
        (
            Uuid::parse_str("f4c9a2b7-8e05-4d11-b6d2-91a3c5e7f802")?,
            "Sam",
            "sam@bodyweightgym.example",
        ),
    ];

    for (id, name, email) in athletes {
        sqlx::query(
            r#"
            INSERT INTO handstand_tracker.athletes (id, display_name, email)
            VALUES ($1, $2, $3)
            ON CONFLICT (email) DO UPDATE
            SET display_name = EXCLUDED.display_name
            RETURNING id
            "#,
        )
        .bind(id)
        .bind(name)
        .bind(email)
        .fetch_one(pool)
        .await?;
    }

    let logs = vec![
        (
            "seed-001",
            "mat@bodyweightgym.example",
            3,
            "heel_pulls",
            4,
            None::<i32>,
            "First clean heel pulls",
            NaiveDate::from_ymd_opt(2026, 8, 3).context("invalid date")?,
        ),
        (
            "seed-002",
            "mat@bodyweightgym.example",
            3,
            "chest_to_wall",
            3,
            Some(48),
            "Shoulders felt strong",
            NaiveDate::from_ymd_opt(2026, 8, 4).context("invalid date")?,
        ),
        (
            "seed-003",
            "sam@bodyweightgym.example",
            1,
            "hang",
            3,
            Some(65),
            "New hang PR",
            NaiveDate::from_ymd_opt(2026, 8, 1).context("invalid date")?,
        ),
    ];

    for (source_key, email, level, exercise_key, sets, hold, note, session_date) in logs {
        let athlete_id: Uuid =
            sqlx::query("SELECT id FROM handstand_tracker.athletes WHERE email = $1")
                .bind(email)
                .fetch_one(pool)
                .await?
                .get("id");

        sqlx::query(
            r#"
            INSERT INTO handstand_tracker.workout_logs
            (id, athlete_id, level, exercise_key, sets_completed, hold_time_seconds, note, session_date, source_key)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            ON CONFLICT (source_key) DO NOTHING
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(athlete_id)
        .bind(level)
        .bind(exercise_key)
        .bind(sets)
        .bind(hold)
        .bind(note)
        .bind(session_date)
        .bind(source_key)
        .execute(pool)
        .await?;
    }

    let level_facts = vec![
        ("mat@bodyweightgym.example", 1, "2026-02-16", Some("2026-03-28")),
        ("mat@bodyweightgym.example", 2, "2026-03-29", Some("2026-05-10")),
        ("mat@bodyweightgym.example", 3, "2026-05-11", None),
        ("sam@bodyweightgym.example", 1, "2026-07-06", None),
    ];

    for (email, level, started, graduated) in level_facts {
        let athlete_id: Uuid =
            sqlx::query("SELECT id FROM handstand_tracker.athletes WHERE email = $1")
                .bind(email)
                .fetch_one(pool)
                .await?
                .get("id");

        let started_at: NaiveDate = started.parse().context("invalid start date")?;
        sqlx::query(
            r#"
            INSERT INTO handstand_tracker.level_starts (athlete_id, level, started_at)
            VALUES ($1, $2, $3)
            ON CONFLICT (athlete_id, level) DO NOTHING
            "#,
        )
        .bind(athlete_id)
        .bind(level)
        .bind(started_at)
        .execute(pool)
        .await?;

        if let Some(graduated) = graduated {
            let graduated_at: NaiveDate = graduated.parse().context("invalid graduation date")?;
            sqlx::query(
                r#"
                INSERT INTO handstand_tracker.level_graduations (athlete_id, level, graduated_at)
                VALUES ($1, $2, $3)
                ON CONFLICT (athlete_id, level) DO NOTHING
                "#,
            )
            .bind(athlete_id)
            .bind(level)
            .bind(graduated_at)
            .execute(pool)
            .await?;
        }
    }

    Ok(())
}

pub async fn import_csv(pool: &PgPool, csv_path: &std::path::Path) -> anyhow::Result<usize> {
    #[derive(serde::Deserialize)]
    struct CsvRow {
        display_name: String,
        email: String,
        level: i32,
        exercise_key: String,
        sets_completed: i32,
        hold_time_seconds: Option<i32>,
        note: Option<String>,
        session_date: NaiveDate,
        source_key: Option<String>,
    }

    let mut reader = csv::Reader::from_path(csv_path)?;
    let mut inserted = 0usize;

    for result in reader.deserialize::<CsvRow>() {
        let row = result?;
        let athlete_id: Uuid = sqlx::query(
            r#"
            INSERT INTO handstand_tracker.athletes (id, display_name, email)
            VALUES ($1, $2, $3)
            ON CONFLICT (email) DO UPDATE
            SET display_name = EXCLUDED.display_name
            RETURNING id
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(&row.display_name)
        .bind(&row.email)
        .fetch_one(pool)
        .await?
        .get("id");

        let source_key = row
            .source_key
            .unwrap_or_else(|| format!("import-{}", Uuid::new_v4()));

        let result = sqlx::query(
            r#"
            INSERT INTO handstand_tracker.workout_logs
            (id, athlete_id, level, exercise_key, sets_completed, hold_time_seconds, note, session_date, source_key)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            ON CONFLICT (source_key) DO NOTHING
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(athlete_id)
        .bind(row.level)
        .bind(&row.exercise_key)
        .bind(row.sets_completed)
        .bind(row.hold_time_seconds)
        .bind(row.note.unwrap_or_default())
        .bind(row.session_date)
        .bind(source_key)
        .execute(pool)
        .await?;

        if result.rows_affected() > 0 {
            inserted += 1;
        }
    }

    Ok(inserted)
}

/// Fetch every aggregate the engine consumes in one pass. The GROUP BY
/// queries below are the "external aggregation source"; the engine itself
/// never sees raw logs.
pub async fn fetch_aggregates(
    pool: &PgPool,
    email: Option<&str>,
    today: NaiveDate,
) -> anyhow::Result<AggregateBundle> {
    let heatmap_since = calendar::week_start(today) - Duration::weeks(heatmap::WEEKS as i64 - 1);
    let volume_since = calendar::week_start(today) - Duration::weeks(volume::SERIES_WEEKS as i64 - 1);

    let daily_activity = fetch_daily_activity(pool, email, heatmap_since).await?;
    let weekly_volume = fetch_weekly_volume(pool, email, volume_since).await?;
    let level_starts = fetch_level_starts(pool, email).await?;
    let graduations = fetch_graduations(pool, email).await?;
    let personal_bests = fetch_personal_bests(pool, email).await?;
    let exercise_breakdown = fetch_exercise_breakdown(pool, email).await?;
    let streak = fetch_streak(pool, email, today).await?;
    let totals = fetch_totals(pool, email).await?;

    debug!(
        days = daily_activity.len(),
        weeks = weekly_volume.len(),
        bests = personal_bests.len(),
        "fetched aggregates"
    );

    Ok(AggregateBundle {
        daily_activity,
        weekly_volume,
        level_starts,
        graduations,
        personal_bests,
        exercise_breakdown,
        streak,
        totals,
    })
}

pub async fn fetch_daily_activity(
    pool: &PgPool,
    email: Option<&str>,
    since: NaiveDate,
) -> anyhow::Result<Vec<DailyActivity>> {
    let mut query = String::from(
        "SELECT l.session_date AS date, COUNT(*) AS count \
         FROM handstand_tracker.workout_logs l \
         JOIN handstand_tracker.athletes a ON a.id = l.athlete_id \
         WHERE l.session_date >= $1",
    );
    if email.is_some() {
        query.push_str(" AND a.email = $2");
    }
    query.push_str(" GROUP BY l.session_date ORDER BY l.session_date");

    let mut rows = sqlx::query(&query).bind(since);
    if let Some(value) = email {
        rows = rows.bind(value);
    }

    let records = rows.fetch_all(pool).await?;
    Ok(records
        .into_iter()
        .map(|row| DailyActivity {
            date: row.get("date"),
            count: row.get("count"),
        })
        .collect())
}

pub async fn fetch_weekly_volume(
    pool: &PgPool,
    email: Option<&str>,
    since: NaiveDate,
) -> anyhow::Result<Vec<WeeklyVolumePoint>> {
    let mut query = String::from(
        "SELECT (date_trunc('week', l.session_date))::date AS week_start, \
         COUNT(DISTINCT l.session_date) AS sessions, \
         COALESCE(SUM(l.sets_completed), 0) AS sets \
         FROM handstand_tracker.workout_logs l \
         JOIN handstand_tracker.athletes a ON a.id = l.athlete_id \
         WHERE l.session_date >= $1",
    );
    if email.is_some() {
        query.push_str(" AND a.email = $2");
    }
    query.push_str(" GROUP BY 1 ORDER BY 1");

    let mut rows = sqlx::query(&query).bind(since);
    if let Some(value) = email {
        rows = rows.bind(value);
    }

    let records = rows.fetch_all(pool).await?;
    Ok(records
        .into_iter()
        .map(|row| WeeklyVolumePoint {
            week_start: row.get("week_start"),
            sessions: row.get("sessions"),
            sets: row.get("sets"),
        })
        .collect())
}

pub async fn fetch_level_starts(
    pool: &PgPool,
    email: Option<&str>,
) -> anyhow::Result<Vec<LevelStart>> {
    let mut query = String::from(
        "SELECT ls.level, ls.started_at \
         FROM handstand_tracker.level_starts ls \
         JOIN handstand_tracker.athletes a ON a.id = ls.athlete_id",
    );
    if email.is_some() {
        query.push_str(" WHERE a.email = $1");
    }
    query.push_str(" ORDER BY ls.level");

    let mut rows = sqlx::query(&query);
    if let Some(value) = email {
        rows = rows.bind(value);
    }

    let records = rows.fetch_all(pool).await?;
    Ok(records
        .into_iter()
        .map(|row| LevelStart {
            level: row.get("level"),
            started_at: row.get("started_at"),
        })
        .collect())
}

pub async fn fetch_graduations(
    pool: &PgPool,
    email: Option<&str>,
) -> anyhow::Result<Vec<LevelGraduation>> {
    let mut query = String::from(
        "SELECT lg.level, lg.graduated_at \
         FROM handstand_tracker.level_graduations lg \
         JOIN handstand_tracker.athletes a ON a.id = lg.athlete_id",
    );
    if email.is_some() {
        query.push_str(" WHERE a.email = $1");
    }
    query.push_str(" ORDER BY lg.level");

    let mut rows = sqlx::query(&query);
    if let Some(value) = email {
        rows = rows.bind(value);
    }

    let records = rows.fetch_all(pool).await?;
    Ok(records
        .into_iter()
        .map(|row| LevelGraduation {
            level: row.get("level"),
            graduated_at: row.get("graduated_at"),
        })
        .collect())
}

pub async fn fetch_personal_bests(
    pool: &PgPool,
    email: Option<&str>,
) -> anyhow::Result<Vec<PersonalBest>> {
    let mut query = String::from(
        "SELECT DISTINCT ON (l.exercise_key) \
         l.exercise_key, l.hold_time_seconds, l.session_date \
         FROM handstand_tracker.workout_logs l \
         JOIN handstand_tracker.athletes a ON a.id = l.athlete_id \
         WHERE l.hold_time_seconds > 0",
    );
    if email.is_some() {
        query.push_str(" AND a.email = $1");
    }
    query.push_str(" ORDER BY l.exercise_key, l.hold_time_seconds DESC, l.session_date");

    let mut rows = sqlx::query(&query);
    if let Some(value) = email {
        rows = rows.bind(value);
    }

    let records = rows.fetch_all(pool).await?;
    Ok(records
        .into_iter()
        .map(|row| PersonalBest {
            exercise_key: row.get("exercise_key"),
            best_hold_seconds: row
                .get::<Option<i32>, _>("hold_time_seconds")
                .map(i64::from),
            achieved_at: row.get("session_date"),
        })
        .collect())
}

pub async fn fetch_exercise_breakdown(
    pool: &PgPool,
    email: Option<&str>,
) -> anyhow::Result<Vec<ExerciseFrequency>> {
    let mut query = String::from(
        "SELECT l.exercise_key, COUNT(*) AS total_logs \
         FROM handstand_tracker.workout_logs l \
         JOIN handstand_tracker.athletes a ON a.id = l.athlete_id",
    );
    if email.is_some() {
        query.push_str(" WHERE a.email = $1");
    }
    query.push_str(" GROUP BY l.exercise_key ORDER BY total_logs DESC");

    let mut rows = sqlx::query(&query);
    if let Some(value) = email {
        rows = rows.bind(value);
    }

    let records = rows.fetch_all(pool).await?;
    Ok(records
        .into_iter()
        .map(|row| ExerciseFrequency {
            exercise_key: row.get("exercise_key"),
            total_logs: row.get("total_logs"),
        })
        .collect())
}

pub async fn fetch_totals(pool: &PgPool, email: Option<&str>) -> anyhow::Result<Totals> {
    let mut query = String::from(
        "SELECT COUNT(DISTINCT l.session_date) AS total_sessions, \
         COALESCE(SUM(l.sets_completed), 0) AS total_sets, \
         COUNT(*) AS total_logs \
         FROM handstand_tracker.workout_logs l \
         JOIN handstand_tracker.athletes a ON a.id = l.athlete_id",
    );
    if email.is_some() {
        query.push_str(" WHERE a.email = $1");
    }

    let mut rows = sqlx::query(&query);
    if let Some(value) = email {
        rows = rows.bind(value);
    }

    let row = rows.fetch_one(pool).await?;
    Ok(Totals {
        total_sessions: row.get("total_sessions"),
        total_sets: row.get("total_sets"),
        total_logs: row.get("total_logs"),
    })
}

pub async fn fetch_streak(
    pool: &PgPool,
    email: Option<&str>,
    today: NaiveDate,
) -> anyhow::Result<StreakSummary> {
    let mut query = String::from(
        "SELECT DISTINCT l.session_date \
         FROM handstand_tracker.workout_logs l \
         JOIN handstand_tracker.athletes a ON a.id = l.athlete_id",
    );
    if email.is_some() {
        query.push_str(" WHERE a.email = $1");
    }
    query.push_str(" ORDER BY l.session_date");

    let mut rows = sqlx::query(&query);
    if let Some(value) = email {
        rows = rows.bind(value);
    }

    let records = rows.fetch_all(pool).await?;
    let dates: Vec<NaiveDate> = records
        .into_iter()
        .map(|row| row.get("session_date"))
        .collect();
    Ok(streak_from_dates(&dates, today))
}

/// Fold distinct training dates into current/longest runs of consecutive
/// days. The current streak survives until a full day has been missed, so a
/// run ending yesterday still counts.
pub fn streak_from_dates(dates: &[NaiveDate], today: NaiveDate) -> StreakSummary {
    let mut dates = dates.to_vec();
    dates.sort();
    dates.dedup();

    let mut longest = 0i64;
    let mut run = 0i64;
    let mut prev: Option<NaiveDate> = None;
    for date in &dates {
        run = match prev {
            Some(p) if *date == p + Duration::days(1) => run + 1,
            _ => 1,
        };
        longest = longest.max(run);
        prev = Some(*date);
    }

    let mut current = 0i64;
    if let Some(last) = dates.last() {
        if today - *last <= Duration::days(1) {
            current = 1;
            let mut idx = dates.len() - 1;
            while idx > 0 && dates[idx - 1] == dates[idx] - Duration::days(1) {
                current += 1;
                idx -= 1;
            }
        }
    }

    StreakSummary { current, longest }
}
