// src/models/mod.rs

//! Domain models for the scraper application.
//!
//! This module contains all data structures used throughout the application,
//! organized by their primary purpose.

mod config;
mod game;
mod review;
mod selectors;

// Re-export all public types
pub use config::{Config, CrawlerConfig, OutputConfig, SiteConfig};
pub use game::{Collection, DEFAULT_PLATFORM, GameRecord, Status, today};
pub use review::{ReviewRecord, ReviewSet};
pub use selectors::{SiteSelectors, parse_selector};
