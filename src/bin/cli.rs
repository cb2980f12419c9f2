//! Backlogger CLI
//!
//! Scrapes a Backloggd profile and writes static-site content.

use std::path::{Path, PathBuf};

use backlogger::{
    error::Result,
    models::Config,
    pipeline::{self, RunOptions},
};
use clap::Parser;

/// Config file picked up from the working directory when `--config` is absent.
const DEFAULT_CONFIG: &str = "backlogger.toml";

/// Backlogger - Backloggd scraper & importer
#[derive(Parser, Debug)]
#[command(
    name = "backlogger",
    version,
    about = "Scrape Backloggd games and reviews into static-site content"
)]
struct Cli {
    /// Your Backloggd username
    username: String,

    /// Browser cookie string OR path to a cookies.txt file
    #[arg(long)]
    cookie: Option<String>,

    /// Path to a TOML config file (default: ./backlogger.toml if present)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Content output directory (overrides config)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Also write the merged collection as JSON to this path
    #[arg(long)]
    export_json: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

/// Initialize logging based on verbosity flag.
fn init_logging(verbose: bool) {
    let level = if verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp_secs()
        .init();
}

fn load_config(path: Option<&Path>) -> Result<Config> {
    match path {
        Some(path) => {
            let config = Config::load(path)?;
            log::info!("Loaded configuration from {}", path.display());
            Ok(config)
        }
        None if Path::new(DEFAULT_CONFIG).is_file() => Ok(Config::load_or_default(DEFAULT_CONFIG)),
        None => Ok(Config::default()),
    }
}

/// Main entry point for the CLI application.
#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    log::info!("--- Backloggd Scraper & Importer ---");

    let mut config = load_config(cli.config.as_deref())?;
    if let Some(output) = cli.output {
        config.output.content_dir = output;
    }

    if let Err(e) = config.validate() {
        log::error!("Config validation failed: {}", e);
        return Err(e);
    }

    let options = RunOptions {
        username: cli.username,
        cookie: cli.cookie,
        export_json: cli.export_json,
    };

    let summary = pipeline::run_pipeline(&config, &options).await?;

    log::info!(
        "Wrote {} of {} games ({} reviews matched, {} added from reviews alone).",
        summary.files_written,
        summary.game_count,
        summary.reviews.matched,
        summary.reviews.synthetic
    );
    log::info!("Done! Run 'hugo serve' to view your site.");

    Ok(())
}
