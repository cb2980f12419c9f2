//! Pipeline entry points.
//!
//! - `scrape_collection`: Scrape every status listing and the reviews, then reconcile
//! - `reconcile`: Attach reviews to collection records
//! - `emit`: Write one content document per game
//! - `run_pipeline`: All of the above against the live site

pub mod emit;
pub mod reconcile;
pub mod run;

pub use emit::{EmitSummary, emit};
pub use reconcile::{ReconcileStats, reconcile};
pub use run::{RunOptions, RunSummary, run_pipeline, scrape_collection};
