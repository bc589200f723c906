//! landcomp - land acquisition compensation assessment
//!
//! Reads acquisition notices (text, PDF or scanned image), extracts the
//! notice fields, judges the compensation against government and market
//! rates and keeps one record per survey number.

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use compensation_engine::{CompensationEngine, KeywordClassifier};
use record_store::SqliteRecordStore;
use shared_types::ImpactDetails;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

mod commands;
mod config;
mod source;

use config::AppConfig;
use source::TextSource;

#[derive(Parser, Debug)]
#[command(name = "landcomp")]
#[command(version, about = "Land acquisition notice processing and compensation assessment")]
struct Cli {
    /// Configuration file (defaults to ./landcomp.toml when present)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Process a notice and store its record
    Ingest {
        /// Notice file: .txt, .pdf or an image
        file: PathBuf,
    },
    /// Add social impact details to a stored record
    Impact {
        survey_number: String,
        #[command(flatten)]
        details: ImpactArgs,
    },
    /// List stored records, newest first
    Records,
    /// Show one stored record
    Show { survey_number: String },
    /// Compare a payout with today's market value
    Market {
        /// Land area in the same unit as the market rate
        #[arg(long)]
        land_area: String,
        /// Compensation received; commas are allowed
        #[arg(long)]
        received: String,
    },
    /// Print a grievance report for a stored record
    Grievance { survey_number: String },
    /// Aggregate figures across all records
    Summary,
}

#[derive(Args, Debug, Default)]
struct ImpactArgs {
    #[arg(long)]
    public_usage: Option<String>,
    #[arg(long)]
    families_affected: Option<i64>,
    #[arg(long)]
    other_properties: Option<String>,
    #[arg(long)]
    rehab_plan: Option<String>,
    #[arg(long)]
    estimated_cost: Option<f64>,
    #[arg(long)]
    positive_impact: Option<String>,
}

impl From<ImpactArgs> for ImpactDetails {
    fn from(args: ImpactArgs) -> Self {
        ImpactDetails {
            public_usage: args.public_usage,
            families_affected: args.families_affected,
            other_properties: args.other_properties,
            rehab_plan: args.rehab_plan,
            estimated_cost: args.estimated_cost,
            positive_impact: args.positive_impact,
        }
    }
}

/// Used when `RUST_LOG` is unset or empty
const DEFAULT_LOG_FILTER: &str = "landcomp=info,compensation_engine=info,record_store=info";

/// `RUST_LOG` replaces the defaults entirely rather than being layered on top
fn log_filter(rust_log: Option<String>) -> EnvFilter {
    match rust_log.filter(|directives| !directives.trim().is_empty()) {
        Some(directives) => EnvFilter::new(directives),
        None => EnvFilter::new(DEFAULT_LOG_FILTER),
    }
}

async fn open_store(config: &AppConfig) -> Result<SqliteRecordStore> {
    SqliteRecordStore::connect(&config.store.database_url)
        .await
        .context("Failed to open record store")
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present
    dotenvy::dotenv().ok();

    // Logs go to stderr; stdout carries command output
    tracing_subscriber::fmt()
        .with_env_filter(log_filter(std::env::var("RUST_LOG").ok()))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = AppConfig::load(cli.config.as_deref())
        .context("Failed to load configuration")?
        .with_database_url(std::env::var("DATABASE_URL").ok());

    let engine = CompensationEngine::new(config.engine.clone());
    let mut stdout = std::io::stdout().lock();

    match cli.command {
        Command::Ingest { file } => {
            let text = TextSource::new(config.ocr.clone())
                .read_text(&file)
                .await?;
            let store = open_store(&config).await?;
            let classifier = KeywordClassifier::default();
            commands::ingest(&file, &text, &engine, &classifier, &store, &mut stdout).await?;
        }
        Command::Impact {
            survey_number,
            details,
        } => {
            let store = open_store(&config).await?;
            commands::update_impact(&store, &survey_number, &details.into(), &mut stdout).await?;
        }
        Command::Records => {
            let store = open_store(&config).await?;
            commands::list_records(&store, &mut stdout).await?;
        }
        Command::Show { survey_number } => {
            let store = open_store(&config).await?;
            commands::show_record(&store, &survey_number, &mut stdout).await?;
        }
        Command::Market {
            land_area,
            received,
        } => commands::market(&engine, &land_area, &received, &mut stdout)?,
        Command::Grievance { survey_number } => {
            let store = open_store(&config).await?;
            commands::grievance(&store, &survey_number, &mut stdout).await?;
        }
        Command::Summary => {
            let store = open_store(&config).await?;
            commands::summary(&store, &mut stdout).await?;
        }
    }

    Ok(())
}
