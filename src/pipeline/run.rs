// src/pipeline/run.rs

//! Full scrape → reconcile → emit pipeline.

use std::path::PathBuf;
use std::time::Duration;

use crate::error::Result;
use crate::models::{Collection, Config, Status};
use crate::pipeline::emit::emit;
use crate::pipeline::reconcile::{ReconcileStats, reconcile};
use crate::services::{Fetcher, GameScraper, PageSource, ReviewScraper};
use crate::storage::LocalStorage;
use crate::storage::local::write_json;
use crate::utils::http;

/// Inputs of a pipeline run.
#[derive(Debug, Clone, Default)]
pub struct RunOptions {
    /// Account whose collection is scraped
    pub username: String,

    /// Raw cookie string or path to a cookie jar
    pub cookie: Option<String>,

    /// Also write the merged collection as JSON here
    pub export_json: Option<PathBuf>,
}

/// Summary of a pipeline run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub game_count: usize,
    pub reviews: ReconcileStats,
    pub files_written: usize,
}

/// Scrape every status listing and the reviews, then reconcile them.
pub async fn scrape_collection<S: PageSource>(
    fetcher: &Fetcher<S>,
    config: &Config,
    username: &str,
) -> Result<(Collection, ReconcileStats)> {
    let game_scraper = GameScraper::new(fetcher, config)?;
    let mut games = Collection::new();

    for status in Status::ALL {
        log::info!("Scraping '{}' games...", status.slug());
        let found = game_scraper.scrape(username, status).await?;
        games.extend(found);
    }

    log::info!("Total games found: {}", games.len());

    let reviews = ReviewScraper::new(fetcher, config)?.scrape(username).await?;
    let stats = reconcile(&mut games, reviews);

    log::info!(
        "Matched {} reviews to games ({} added as new games).",
        stats.total(),
        stats.synthetic
    );

    Ok((games, stats))
}

/// Run the full pipeline against the live site.
pub async fn run_pipeline(config: &Config, options: &RunOptions) -> Result<RunSummary> {
    let cookie = http::resolve_cookie(options.cookie.as_deref());
    if cookie.is_none() {
        log::info!("Note: no cookie provided. If you get 403 errors, use --cookie.");
    }

    let client = http::create_client(&config.crawler, cookie.as_deref())?;
    let fetcher = Fetcher::new(client, Duration::from_millis(config.crawler.request_delay_ms));

    let (games, reviews) = scrape_collection(&fetcher, config, &options.username).await?;

    if let Some(path) = &options.export_json {
        let records: Vec<_> = games.values().collect();
        write_json(path, &records).await?;
        log::info!("Exported {} games to {}", records.len(), path.display());
    }

    let storage = LocalStorage::new(&config.output.content_dir);
    let emitted = emit(&games, &storage, &config.output.file_name).await?;

    Ok(RunSummary {
        game_count: games.len(),
        reviews,
        files_written: emitted.written,
    })
}
