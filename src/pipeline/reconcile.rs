// src/pipeline/reconcile.rs

//! Review reconciliation.
//!
//! Reviews are matched to collection entries by exact title first, then by
//! normalized title. Titles sharing a normalized key, including the empty
//! key of titles with no ASCII letters or digits, count as the same game. A
//! review with no counterpart becomes a new record.

use std::collections::HashMap;

use crate::models::{Collection, GameRecord, ReviewRecord, ReviewSet, Status, today};
use crate::utils::text::normalize_title;

const SAMPLE_LOG_LIMIT: usize = 3;

/// Outcome counts of a reconciliation pass.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ReconcileStats {
    /// Reviews attached to an existing record
    pub matched: usize,
    /// Reviews inserted as new records
    pub synthetic: usize,
}

impl ReconcileStats {
    /// Total reviews placed into the collection.
    pub fn total(&self) -> usize {
        self.matched + self.synthetic
    }
}

/// Merge reviews into `games`, inserting a record for every unmatched review.
pub fn reconcile(games: &mut Collection, reviews: ReviewSet) -> ReconcileStats {
    let mut index: HashMap<String, String> = games
        .keys()
        .map(|title| (normalize_title(title), title.clone()))
        .collect();

    log::info!("Normalized map created with {} entries.", index.len());
    for (key, title) in index.iter().take(SAMPLE_LOG_LIMIT) {
        log::debug!("Sample map: '{}' -> '{}'", key, title);
    }

    let mut stats = ReconcileStats::default();

    for (review_title, review) in reviews {
        let key = normalize_title(&review_title);
        let target = if games.contains_key(&review_title) {
            Some(review_title.clone())
        } else {
            index.get(&key).cloned()
        };

        let matched = match target {
            Some(title) => games.get_mut(&title),
            None => None,
        };

        match matched {
            Some(game) => {
                if stats.matched < SAMPLE_LOG_LIMIT {
                    log::debug!("Match! Review '{}' -> Game '{}'", review_title, game.title);
                }
                apply_review(game, review);
                stats.matched += 1;
            }
            None => {
                log::warn!(
                    "No match for review '{}' (norm: '{}'). Adding as new game.",
                    review_title,
                    key
                );
                games.insert(review_title.clone(), synthetic_record(review));
                index.insert(key, review_title);
                stats.synthetic += 1;
            }
        }
    }

    stats
}

/// Copy review text onto a record; date and platform only when present.
fn apply_review(game: &mut GameRecord, review: ReviewRecord) {
    game.review = review.text;
    if !review.date.is_empty() {
        game.date = review.date;
    }
    if !review.platform.is_empty() {
        game.platform = review.platform;
    }
}

/// A completed, unrated record built from a review alone.
fn synthetic_record(review: ReviewRecord) -> GameRecord {
    let mut game = GameRecord::new(review.title.clone(), Status::Completed, 0.0);
    game.review = review.text;
    game.date = if review.date.is_empty() {
        today()
    } else {
        review.date
    };
    if !review.platform.is_empty() {
        game.platform = review.platform;
    }
    game
}
