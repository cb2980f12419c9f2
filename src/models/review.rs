//! Review records scraped from the reviews listing.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Reviews keyed by the game title shown on the review card.
pub type ReviewSet = BTreeMap<String, ReviewRecord>;

/// A review as shown on the reviews listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReviewRecord {
    /// Game title
    pub title: String,

    /// Review body
    pub text: String,

    /// Review date (may be empty)
    pub date: String,

    /// Platform the game was reviewed on
    pub platform: String,
}
