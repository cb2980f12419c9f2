// src/pipeline/emit.rs

//! Content emission: one frontmatter document per game.

use std::collections::HashMap;

use crate::error::Result;
use crate::models::Collection;
use crate::storage::ContentStorage;
use crate::utils::text::slugify;

/// Summary of an emission run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmitSummary {
    /// Documents written
    pub written: usize,
    /// Root location of the content
    pub location: String,
}

/// Write every record to `{slug}/{file_name}` in `storage`.
///
/// Titles sharing a slug overwrite each other; the collision is logged.
pub async fn emit(
    games: &Collection,
    storage: &dyn ContentStorage,
    file_name: &str,
) -> Result<EmitSummary> {
    log::info!("Generating content in '{}'...", storage.location());

    let mut slugs: HashMap<String, &str> = HashMap::new();
    let mut written = 0;

    for (title, game) in games {
        let slug = slugify(title);
        if let Some(previous) = slugs.insert(slug.clone(), title.as_str()) {
            log::warn!(
                "'{}' and '{}' share the slug '{}'; keeping the latter",
                previous,
                title,
                slug
            );
        }

        let path = storage
            .write_document(&slug, file_name, &game.to_markdown())
            .await?;
        log::debug!("Wrote {}", path.display());
        written += 1;
    }

    Ok(EmitSummary {
        written,
        location: storage.location(),
    })
}

#[cfg(test)]
mod tests {
    use tempfile::TempDir;

    use super::*;
    use crate::models::{GameRecord, Status};
    use crate::storage::LocalStorage;

    fn games() -> Collection {
        let mut hades = GameRecord::new("Hades", Status::Completed, 4.5).with_cover("h.jpg");
        hades.date = "2021-06-01".to_string();
        hades.review = "Run after run.".to_string();

        let mut chrono = GameRecord::new("Chrono Trigger: Director's Cut", Status::Backlog, 0.0);
        chrono.date = "2022-01-01".to_string();

        [hades, chrono]
            .into_iter()
            .map(|g| (g.title.clone(), g))
            .collect()
    }

    #[tokio::test]
    async fn test_emit_writes_one_file_per_game() {
        let tmp = TempDir::new().unwrap();
        let storage = LocalStorage::new(tmp.path());

        let summary = emit(&games(), &storage, "index.md").await.unwrap();

        assert_eq!(summary.written, 2);
        let hades = std::fs::read_to_string(tmp.path().join("hades/index.md")).unwrap();
        assert!(hades.starts_with("---\ntitle: \"Hades\"\ndate: 2021-06-01\n"));
        assert!(hades.contains("cover_image: \"h.jpg\"\n"));
        assert!(hades.ends_with("---\n\nRun after run.\n"));

        let chrono = std::fs::read_to_string(
            tmp.path().join("chrono-trigger-directors-cut/index.md"),
        )
        .unwrap();
        assert!(chrono.contains("rating: 0.0\n"));
        assert!(chrono.contains("completion_status: \"Backlog\"\n"));
        assert!(!chrono.contains("cover_image"));
    }

    #[tokio::test]
    async fn test_emit_is_idempotent() {
        let tmp = TempDir::new().unwrap();
        let storage = LocalStorage::new(tmp.path());
        let games = games();
        let path = tmp.path().join("hades/index.md");

        emit(&games, &storage, "index.md").await.unwrap();
        let first = std::fs::read(&path).unwrap();
        emit(&games, &storage, "index.md").await.unwrap();
        let second = std::fs::read(&path).unwrap();

        assert_eq!(first, second);
        let entries = std::fs::read_dir(tmp.path().join("hades")).unwrap().count();
        assert_eq!(entries, 1);
    }

    #[tokio::test]
    async fn test_emit_propagates_write_failure() {
        let tmp = TempDir::new().unwrap();
        let blocker = tmp.path().join("not-a-dir");
        std::fs::write(&blocker, "file").unwrap();
        let storage = LocalStorage::new(&blocker);

        assert!(emit(&games(), &storage, "index.md").await.is_err());
    }
}
