//! Storage abstractions for generated site content.
//!
//! ## Directory Structure
//!
//! ```text
//! content/games/
//! ├── hades/
//! │   └── index.md
//! └── the-witcher-3/
//!     └── index.md
//! ```

pub mod local;

use std::path::PathBuf;

use async_trait::async_trait;

use crate::error::Result;

// Re-export for convenience
pub use local::LocalStorage;

/// Trait for content storage backends.
#[async_trait]
pub trait ContentStorage: Send + Sync {
    /// Write one document under `{root}/{slug}/{file_name}`, replacing any
    /// previous contents. Returns the location written.
    async fn write_document(
        &self,
        slug: &str,
        file_name: &str,
        contents: &str,
    ) -> Result<PathBuf>;

    /// Human-readable root location, for logging.
    fn location(&self) -> String;
}
