// src/services/reviews.rs

//! Review scraper.

use scraper::{ElementRef, Selector};

use crate::error::Result;
use crate::models::{
    Config, DEFAULT_PLATFORM, ReviewRecord, ReviewSet, SiteSelectors, parse_selector,
};
use crate::services::fetcher::{Fetcher, PageSource};
use crate::utils::html;
use crate::utils::url::reviews_page_url;

const SAMPLE_LOG_LIMIT: usize = 3;

/// Compiled selectors for a review card.
pub struct CardSelectors {
    card: Selector,
    card_fallback: Selector,
    title_sibling_class: String,
    title: Selector,
    link: Selector,
    body: Selector,
    text: Selector,
    card_body: Selector,
    date: Selector,
    platform: Selector,
}

impl CardSelectors {
    /// Compile the review card selectors from configuration.
    pub fn compile(selectors: &SiteSelectors) -> Result<Self> {
        Ok(Self {
            card: parse_selector(&selectors.review_selector)?,
            card_fallback: parse_selector(&selectors.review_fallback_selector)?,
            title_sibling_class: selectors.review_title_sibling_class.clone(),
            title: parse_selector(&selectors.review_title_selector)?,
            link: parse_selector(&selectors.review_link_selector)?,
            body: parse_selector(&selectors.review_body_selector)?,
            text: parse_selector(&selectors.review_text_selector)?,
            card_body: parse_selector(&selectors.card_body_selector)?,
            date: parse_selector(&selectors.review_date_selector)?,
            platform: parse_selector(&selectors.review_platform_selector)?,
        })
    }
}

/// Service for scraping a user's reviews listing.
pub struct ReviewScraper<'a, S> {
    fetcher: &'a Fetcher<S>,
    config: &'a Config,
    selectors: CardSelectors,
}

impl<'a, S: PageSource> ReviewScraper<'a, S> {
    /// Create a new review scraper.
    pub fn new(fetcher: &'a Fetcher<S>, config: &'a Config) -> Result<Self> {
        Ok(Self {
            fetcher,
            config,
            selectors: CardSelectors::compile(&config.selectors)?,
        })
    }

    /// Scrape every page of the reviews listing.
    pub async fn scrape(&self, username: &str) -> Result<ReviewSet> {
        let mut reviews = ReviewSet::new();
        let mut last_fingerprint: Option<String> = None;

        log::info!("Starting review scrape...");

        for page_number in 1u32.. {
            let url = reviews_page_url(&self.config.site.base_url, username, page_number)?;

            let Some(page) = self.fetcher.fetch(url.as_str()).await else {
                break;
            };

            if let Some(block) = page.soft_block() {
                log::error!("{}", block.guidance());
                break;
            }

            let cards = page.select_entries(&self.selectors.card, &self.selectors.card_fallback);
            if cards.is_empty() {
                break;
            }

            let fingerprint = html::fingerprint(&cards);
            if last_fingerprint.as_deref() == Some(fingerprint.as_str()) {
                log::info!("Reached end of reviews (duplicate content detected).");
                break;
            }
            last_fingerprint = Some(fingerprint);

            log::info!("Found {} reviews on page {}...", cards.len(), page_number);

            for card in &cards {
                let Some(review) = extract_review(card, &self.selectors) else {
                    log::warn!("Could not find game title for a review card.");
                    continue;
                };
                if reviews.len() < SAMPLE_LOG_LIMIT {
                    log::debug!("Found review for: '{}'", review.title);
                }
                reviews.insert(review.title.clone(), review);
            }
        }

        Ok(reviews)
    }
}

/// Build a review from one card. Returns `None` when no game title can be found.
pub fn extract_review(card: &ElementRef<'_>, selectors: &CardSelectors) -> Option<ReviewRecord> {
    let title = review_title(card, selectors)?;

    Some(ReviewRecord {
        title,
        text: review_text(card, selectors),
        date: review_date(card, selectors),
        platform: review_platform(card, selectors),
    })
}

/// Title from the preceding `game-name` sibling, else the card's game link.
fn review_title(card: &ElementRef<'_>, selectors: &CardSelectors) -> Option<String> {
    let from_sibling = html::previous_sibling_with_class(card, &selectors.title_sibling_class)
        .and_then(|sibling| sibling.select(&selectors.title).next())
        .map(|el| html::element_text(&el))
        .filter(|t| !t.is_empty());

    from_sibling.or_else(|| {
        card.select(&selectors.link)
            .next()
            .map(|el| html::element_text(&el))
            .filter(|t| !t.is_empty())
    })
}

fn review_text(card: &ElementRef<'_>, selectors: &CardSelectors) -> String {
    if let Some(body) = card.select(&selectors.body).next() {
        return match body.select(&selectors.text).next() {
            Some(text_el) => html::text_with_breaks(&text_el),
            None => html::text_lines(&body),
        };
    }

    card.select(&selectors.card_body)
        .next()
        .map(|body| html::text_lines(&body))
        .unwrap_or_default()
}

/// Date portion of the `datetime` attribute, else the element's display text.
fn review_date(card: &ElementRef<'_>, selectors: &CardSelectors) -> String {
    let Some(el) = card.select(&selectors.date).next() else {
        return String::new();
    };

    match el.value().attr("datetime") {
        Some(datetime) => datetime.split('T').next().unwrap_or_default().trim().to_string(),
        None => html::element_text(&el),
    }
}

fn review_platform(card: &ElementRef<'_>, selectors: &CardSelectors) -> String {
    card.select(&selectors.platform)
        .next()
        .map(|el| html::element_text(&el))
        .filter(|p| !p.is_empty())
        .unwrap_or_else(|| DEFAULT_PLATFORM.to_string())
}
