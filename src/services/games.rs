// src/services/games.rs

//! Collection scraper.
//!
//! Walks the per-status listing of a user's games page by page.

use scraper::{ElementRef, Selector};

use crate::error::Result;
use crate::models::{Collection, Config, GameRecord, SiteSelectors, Status, parse_selector};
use crate::services::fetcher::{Fetcher, PageSource};
use crate::utils::html;
use crate::utils::text::{data_rating, star_rating};
use crate::utils::url::status_page_url;

/// Number of scraped entries echoed at debug level per run.
const SAMPLE_LOG_LIMIT: usize = 3;

/// Compiled selectors for a listing entry.
pub struct EntrySelectors {
    entry: Selector,
    entry_fallback: Selector,
    title: Selector,
    rating: Selector,
    rating_attr: String,
    stars: Selector,
    cover: Selector,
}

impl EntrySelectors {
    /// Compile the entry selectors from configuration.
    pub fn compile(selectors: &SiteSelectors) -> Result<Self> {
        Ok(Self {
            entry: parse_selector(&selectors.entry_selector)?,
            entry_fallback: parse_selector(&selectors.entry_fallback_selector)?,
            title: parse_selector(&selectors.title_selector)?,
            rating: parse_selector(&selectors.rating_selector)?,
            rating_attr: selectors.rating_attr.clone(),
            stars: parse_selector(&selectors.stars_selector)?,
            cover: parse_selector(&selectors.cover_selector)?,
        })
    }
}

/// Service for scraping a user's games, one status category at a time.
pub struct GameScraper<'a, S> {
    fetcher: &'a Fetcher<S>,
    config: &'a Config,
    selectors: EntrySelectors,
}

impl<'a, S: PageSource> GameScraper<'a, S> {
    /// Create a new game scraper.
    pub fn new(fetcher: &'a Fetcher<S>, config: &'a Config) -> Result<Self> {
        Ok(Self {
            fetcher,
            config,
            selectors: EntrySelectors::compile(&config.selectors)?,
        })
    }

    /// Scrape every page of one status listing.
    ///
    /// Stops at the first failed fetch, soft block, empty page, or page whose
    /// entries repeat the previous page.
    pub async fn scrape(&self, username: &str, status: Status) -> Result<Collection> {
        let mut games = Collection::new();
        let mut last_fingerprint: Option<String> = None;

        for page_number in 1u32.. {
            let url = status_page_url(
                &self.config.site.base_url,
                username,
                status.slug(),
                page_number,
            )?;

            let Some(page) = self.fetcher.fetch(url.as_str()).await else {
                break;
            };

            log::debug!("Page title: {}", page.title());

            if let Some(block) = page.soft_block() {
                log::error!("{}", block.guidance());
                break;
            }

            let entries =
                page.select_entries(&self.selectors.entry, &self.selectors.entry_fallback);
            if entries.is_empty() {
                log::debug!("No game entries found on page {}.", page_number);
                break;
            }

            let fingerprint = html::fingerprint(&entries);
            if last_fingerprint.as_deref() == Some(fingerprint.as_str()) {
                log::info!("Reached end of list (duplicate content detected).");
                break;
            }
            last_fingerprint = Some(fingerprint);

            log::info!("Found {} games on page {}...", entries.len(), page_number);

            for entry in &entries {
                let Some(game) = extract_game(entry, status, &self.selectors) else {
                    continue;
                };
                if games.len() < SAMPLE_LOG_LIMIT {
                    log::debug!("Found game: '{}' (rating {})", game.title, game.rating);
                }
                games.insert(game.title.clone(), game);
            }
        }

        Ok(games)
    }
}

/// Build a record from one listing entry. Entries without a title are skipped.
pub fn extract_game(
    entry: &ElementRef<'_>,
    status: Status,
    selectors: &EntrySelectors,
) -> Option<GameRecord> {
    let title = entry
        .select(&selectors.title)
        .next()
        .map(|el| html::element_text(&el))
        .filter(|t| !t.is_empty());

    let Some(title) = title else {
        log::debug!("Skipping entry without a title");
        return None;
    };

    let rating = entry_rating(entry, selectors);

    let cover_url = entry
        .select(&selectors.cover)
        .next()
        .and_then(|img| img.value().attr("src"))
        .unwrap_or_default();

    Some(GameRecord::new(title, status, rating).with_cover(cover_url))
}

/// Rating from the data attribute, or the star bar width when that is absent or zero.
fn entry_rating(entry: &ElementRef<'_>, selectors: &EntrySelectors) -> f64 {
    let from_attr = entry
        .select(&selectors.rating)
        .next()
        .and_then(|el| el.value().attr(&selectors.rating_attr))
        .and_then(data_rating)
        .unwrap_or(0.0);

    if from_attr != 0.0 {
        return from_attr;
    }

    entry
        .select(&selectors.stars)
        .next()
        .and_then(|el| el.value().attr("style"))
        .and_then(star_rating)
        .unwrap_or(0.0)
}
