//! Thumbnail-derived title candidates.
//!
//! RetroArch names its thumbnails after the canonical game title, e.g.
//! `thumbnails/Nintendo - Game Boy/Named_Snaps/Tetris (World).png`. The
//! stems of those files are the candidate titles for fuzzy matching.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use retro_lpl_core::util::{file_stem_lossy, has_extension};

/// Thumbnail subdirectory holding title-named snapshots.
pub const NAMED_SNAPS: &str = "Named_Snaps";

/// Extension of thumbnail images.
pub const THUMBNAIL_EXTENSION: &str = "png";

/// Candidate titles for one console, sorted by name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ThumbnailIndex {
    titles: Vec<String>,
}

impl ThumbnailIndex {
    pub fn from_titles(mut titles: Vec<String>) -> Self {
        titles.sort();
        Self { titles }
    }

    /// Index the `.png` files directly inside `dir`.
    ///
    /// A missing or unreadable directory yields an empty index.
    pub fn load(dir: &Path) -> Self {
        let entries = match std::fs::read_dir(dir) {
            Ok(e) => e,
            Err(e) => {
                log::debug!("No thumbnails at {}: {}", dir.display(), e);
                return Self::default();
            }
        };

        let titles = entries
            .flatten()
            .map(|e| e.path())
            .filter(|p| p.is_file() && has_extension(p, THUMBNAIL_EXTENSION))
            .map(|p| file_stem_lossy(&p))
            .collect();

        Self::from_titles(titles)
    }

    pub fn titles(&self) -> &[String] {
        &self.titles
    }

    pub fn len(&self) -> usize {
        self.titles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.titles.is_empty()
    }
}

/// Per-run cache of thumbnail indexes, one per console.
///
/// Each console directory is listed at most once per catalog; the catalog
/// is dropped with the run, so nothing persists between runs.
#[derive(Debug)]
pub struct ThumbnailCatalog {
    root: PathBuf,
    cache: Mutex<HashMap<String, Arc<ThumbnailIndex>>>,
}

impl ThumbnailCatalog {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            cache: Mutex::new(HashMap::new()),
        }
    }

    /// `<root>/<console>/Named_Snaps`
    pub fn console_dir(&self, console: &str) -> PathBuf {
        self.root.join(console).join(NAMED_SNAPS)
    }

    /// The index for `console`, listing its directory on first use.
    pub fn index_for(&self, console: &str) -> Arc<ThumbnailIndex> {
        if let Some(index) = self.lock().get(console) {
            return Arc::clone(index);
        }

        // Listing happens outside the lock; a racing worker may list the same
        // directory, in which case the first insert wins.
        let loaded = Arc::new(ThumbnailIndex::load(&self.console_dir(console)));
        log::debug!("Indexed {} thumbnail(s) for {}", loaded.len(), console);

        Arc::clone(
            self.lock()
                .entry(console.to_string())
                .or_insert(loaded),
        )
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, HashMap<String, Arc<ThumbnailIndex>>> {
        // The map is only ever inserted into, so a poisoned lock is still consistent
        self.cache.lock().unwrap_or_else(|e| e.into_inner())
    }
}
