// src/models/selectors.rs

//! CSS selectors for scraping the collection and review listings.

use scraper::Selector;
use serde::{Deserialize, Serialize};

use crate::error::{AppError, Result};

/// CSS selectors for the listing pages.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteSelectors {
    /// Selector for each game entry in a status listing
    pub entry_selector: String,

    /// Fallback entry selector when the primary matches nothing
    pub entry_fallback_selector: String,

    /// Title element within an entry
    pub title_selector: String,

    /// Element carrying the `data-rating` attribute
    pub rating_selector: String,

    /// Attribute holding the 0-10 rating
    pub rating_attr: String,

    /// Star bar whose `style` width encodes the rating
    pub stars_selector: String,

    /// Cover image within an entry
    pub cover_selector: String,

    /// Selector for each review card
    pub review_selector: String,

    /// Fallback review card selector
    pub review_fallback_selector: String,

    /// Class of the sibling element preceding a card that names the game
    pub review_title_sibling_class: String,

    /// Title element within that sibling
    pub review_title_selector: String,

    /// Link to the game's page inside a card
    pub review_link_selector: String,

    /// Review body block
    pub review_body_selector: String,

    /// Text element within the review body block
    pub review_text_selector: String,

    /// Generic card body used when no review body block exists
    pub card_body_selector: String,

    /// Date element within a card
    pub review_date_selector: String,

    /// Platform element within a card
    pub review_platform_selector: String,
}

impl Default for SiteSelectors {
    fn default() -> Self {
        Self {
            entry_selector: ".rating-hover".to_string(),
            entry_fallback_selector: ".game-cover".to_string(),
            title_selector: ".game-text-centered".to_string(),
            rating_selector: ".game-cover".to_string(),
            rating_attr: "data-rating".to_string(),
            stars_selector: ".stars-top".to_string(),
            cover_selector: "img".to_string(),
            review_selector: ".review-card".to_string(),
            review_fallback_selector: ".review".to_string(),
            review_title_sibling_class: "game-name".to_string(),
            review_title_selector: "h3".to_string(),
            review_link_selector: ".card-header a[href^='/games/']".to_string(),
            review_body_selector: ".review-body".to_string(),
            review_text_selector: ".card-text".to_string(),
            card_body_selector: ".card-body".to_string(),
            review_date_selector: "time".to_string(),
            review_platform_selector: ".review-platform".to_string(),
        }
    }
}

impl SiteSelectors {
    /// Every selector string, paired with its field name.
    fn all(&self) -> [(&'static str, &str); 15] {
        [
            ("entry_selector", self.entry_selector.as_str()),
            ("entry_fallback_selector", self.entry_fallback_selector.as_str()),
            ("title_selector", self.title_selector.as_str()),
            ("rating_selector", self.rating_selector.as_str()),
            ("stars_selector", self.stars_selector.as_str()),
            ("cover_selector", self.cover_selector.as_str()),
            ("review_selector", self.review_selector.as_str()),
            ("review_fallback_selector", self.review_fallback_selector.as_str()),
            ("review_title_selector", self.review_title_selector.as_str()),
            ("review_link_selector", self.review_link_selector.as_str()),
            ("review_body_selector", self.review_body_selector.as_str()),
            ("review_text_selector", self.review_text_selector.as_str()),
            ("card_body_selector", self.card_body_selector.as_str()),
            ("review_date_selector", self.review_date_selector.as_str()),
            ("review_platform_selector", self.review_platform_selector.as_str()),
        ]
    }

    /// Check that every selector parses.
    pub fn validate(&self) -> Result<()> {
        for (field, selector) in self.all() {
            parse_selector(selector)
                .map_err(|e| AppError::validation(format!("selectors.{field}: {e}")))?;
        }
        if self.review_title_sibling_class.trim().is_empty() {
            return Err(AppError::validation(
                "selectors.review_title_sibling_class is empty",
            ));
        }
        Ok(())
    }
}

/// Parse a CSS selector, mapping failures into [`AppError::Selector`].
pub fn parse_selector(s: &str) -> Result<Selector> {
    Selector::parse(s).map_err(|e| AppError::selector(s, format!("{e:?}")))
}
