// src/models/game.rs

//! Game records and collection status.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::utils::text::{escape_yaml, format_rating};

/// Platform recorded when the site does not name one.
pub const DEFAULT_PLATFORM: &str = "PC";

/// Collection keyed by display title. Last write for a title wins.
pub type Collection = BTreeMap<String, GameRecord>;

/// Collection status category as listed on the site.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Status {
    Completed,
    Playing,
    Backlog,
    Wishlist,
    Shelved,
    Abandoned,
    Retired,
}

impl Status {
    /// Every status, in scrape order.
    pub const ALL: [Status; 7] = [
        Status::Completed,
        Status::Playing,
        Status::Backlog,
        Status::Wishlist,
        Status::Shelved,
        Status::Abandoned,
        Status::Retired,
    ];

    /// URL slug used by the per-status listing.
    pub fn slug(self) -> &'static str {
        match self {
            Status::Completed => "played",
            Status::Playing => "playing",
            Status::Backlog => "backlog",
            Status::Wishlist => "wishlist",
            Status::Shelved => "shelved",
            Status::Abandoned => "abandoned",
            Status::Retired => "retired",
        }
    }

    /// Label written to the `completion_status` frontmatter field.
    pub fn label(self) -> &'static str {
        match self {
            Status::Completed => "Completed",
            Status::Playing => "Playing",
            Status::Backlog => "Backlog",
            Status::Wishlist => "Wishlist",
            Status::Shelved => "Shelved",
            Status::Abandoned => "Abandoned",
            Status::Retired => "Retired",
        }
    }
}

/// A single game in the user's collection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameRecord {
    /// Display title as scraped
    pub title: String,

    /// Collection status
    pub status: Status,

    /// Rating on a 0-5 scale
    pub rating: f64,

    /// Cover image URL (empty if none)
    pub cover_url: String,

    /// Review body (empty if none)
    pub review: String,

    /// ISO date (YYYY-MM-DD)
    pub date: String,

    /// Platform name
    pub platform: String,
}

impl GameRecord {
    /// Create a record with defaults: no review, today's date, default platform.
    pub fn new(title: impl Into<String>, status: Status, rating: f64) -> Self {
        Self {
            title: title.into(),
            status,
            rating: clamp_rating(rating),
            cover_url: String::new(),
            review: String::new(),
            date: today(),
            platform: DEFAULT_PLATFORM.to_string(),
        }
    }

    /// Set the cover image URL.
    pub fn with_cover(mut self, cover_url: impl Into<String>) -> Self {
        self.cover_url = cover_url.into();
        self
    }

    /// Render the content file: frontmatter block followed by the review body.
    pub fn to_markdown(&self) -> String {
        let mut out = String::from("---\n");
        out.push_str(&format!("title: {}\n", escape_yaml(&self.title)));
        out.push_str(&format!("date: {}\n", self.date));
        out.push_str("draft: false\n");
        out.push_str(&format!("rating: {}\n", format_rating(self.rating)));
        out.push_str(&format!("platform: {}\n", escape_yaml(&self.platform)));
        out.push_str(&format!(
            "completion_status: {}\n",
            escape_yaml(self.status.label())
        ));
        out.push_str("tags: []\n");
        if !self.cover_url.is_empty() {
            out.push_str(&format!("cover_image: {}\n", escape_yaml(&self.cover_url)));
        }
        out.push_str("---\n\n");
        out.push_str(&self.review);
        out.push('\n');
        out
    }
}

/// Today's local date as `YYYY-MM-DD`.
pub fn today() -> String {
    chrono::Local::now().format("%Y-%m-%d").to_string()
}

fn clamp_rating(rating: f64) -> f64 {
    if rating.is_finite() {
        rating.clamp(0.0, 5.0)
    } else {
        0.0
    }
}
