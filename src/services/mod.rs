//! Service layer for the scraper application.
//!
//! This module contains the business logic for:
//! - Rate-limited page fetching (`Fetcher`)
//! - Per-status collection scraping (`GameScraper`)
//! - Review scraping (`ReviewScraper`)

pub mod fetcher;
mod games;
mod reviews;

pub use fetcher::{Fetcher, Page, PageSource, SoftBlock};
pub use games::{EntrySelectors, GameScraper, extract_game};
pub use reviews::{CardSelectors, ReviewScraper, extract_review};
