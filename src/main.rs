use std::path::PathBuf;

use anyhow::Context;
use chrono::{NaiveDate, Utc};
use clap::{Parser, Subcommand, ValueEnum};
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use tracing::info;

mod calendar;
mod dashboard;
mod db;
mod format;
mod heatmap;
mod models;
mod report;
mod stats;
mod synthetic;
mod timeline;
mod volume;

#[derive(Parser)]
#[command(name = "progress-analytics")]
#[command(about = "Workout progress analytics for the handstand programme", long_about = None)]
struct Cli {
    /// Enable debug logging
    #[arg(long, short = 'v', global = true)]
    verbose: bool,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Copy, ValueEnum)]
enum OutputFormat {
    Markdown,
    Json,
}

#[derive(Subcommand)]
enum Commands {
    /// Create or upgrade the database schema
    InitDb,
    /// Load realistic seed data
    Seed,
    /// Import workout logs from a CSV file
    Import {
        #[arg(long)]
        csv: PathBuf,
    },
    /// Build the progress dashboard from the log store
    Report {
        #[arg(long)]
        email: Option<String>,
        /// Reference date, defaults to today
        #[arg(long)]
        as_of: Option<NaiveDate>,
        #[arg(long, default_value = "report.md")]
        out: PathBuf,
        #[arg(long, value_enum, default_value_t = OutputFormat::Markdown)]
        format: OutputFormat,
    },
    /// Build the dashboard from deterministic synthetic data, no database required
    Demo {
        #[arg(long, default_value_t = 42)]
        seed: u64,
        /// Reference date, defaults to today
        #[arg(long)]
        as_of: Option<NaiveDate>,
        #[arg(long, default_value = "demo-report.md")]
        out: PathBuf,
        #[arg(long, value_enum, default_value_t = OutputFormat::Markdown)]
        format: OutputFormat,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    tracing_subscriber::fmt()
        .with_env_filter(if cli.verbose { "debug" } else { "info" })
        .init();

    match cli.command {
        Commands::InitDb => {
            let pool = connect().await?;
            db::init_db(&pool).await?;
            println!("Schema ready.");
        }
        Commands::Seed => {
            let pool = connect().await?;
            db::seed(&pool).await?;
            println!("Seed data inserted.");
        }
        Commands::Import { csv } => {
            let pool = connect().await?;
            let inserted = db::import_csv(&pool, &csv).await?;
            println!("Inserted {inserted} logs from {}.", csv.display());
        }
        Commands::Report {
            email,
            as_of,
            out,
            format,
        } => {
            let pool = connect().await?;
            let today = as_of.unwrap_or_else(|| Utc::now().date_naive());
            let bundle = db::fetch_aggregates(&pool, email.as_deref(), today).await?;
            let dashboard = dashboard::assemble(&bundle, today);
            write_dashboard(&dashboard, email.as_deref(), &out, format)?;
        }
        Commands::Demo {
            seed,
            as_of,
            out,
            format,
        } => {
            let today = as_of.unwrap_or_else(|| Utc::now().date_naive());
            let bundle = synthetic::generate(seed, today);
            if let (Some(first), Some(last)) =
                (bundle.weekly_volume.first(), bundle.weekly_volume.last())
            {
                info!(
                    seed,
                    "demo dataset spans ISO weeks W{} to W{}",
                    calendar::iso_week_number(first.week_start),
                    calendar::iso_week_number(last.week_start)
                );
            }
            let dashboard = dashboard::assemble(&bundle, today);
            let scope = format!("demo athlete (seed {seed})");
            write_dashboard(&dashboard, Some(&scope), &out, format)?;
        }
    }

    Ok(())
}

async fn connect() -> anyhow::Result<PgPool> {
    let database_url = std::env::var("DATABASE_URL")
        .context("DATABASE_URL must be set to the workout log store")?;

    PgPoolOptions::new()
        .max_connections(5)
        .connect(&database_url)
        .await
        .context("failed to connect to Postgres")
}

fn write_dashboard(
    dashboard: &models::ProgressDashboard,
    scope: Option<&str>,
    out: &std::path::Path,
    format: OutputFormat,
) -> anyhow::Result<()> {
    let rendered = match format {
        OutputFormat::Markdown => report::build_report(scope, dashboard),
        OutputFormat::Json => {
            let mut json = serde_json::to_string_pretty(dashboard)?;
            json.push('\n');
            json
        }
    };
    std::fs::write(out, rendered)?;
    println!("Report written to {}.", out.display());
    Ok(())
}
