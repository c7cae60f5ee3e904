//! Per-file resolution: console, reference path and display title.

use std::path::{Path, PathBuf};

use retro_lpl_core::ConsoleMap;
use retro_lpl_core::util::{file_stem_lossy, parent_dir_name};
use retro_lpl_frontend::PlaylistEntry;

use crate::archive::{PathStyle, ReferencePath};
use crate::thumbnails::ThumbnailCatalog;
use crate::title::TitleMatcher;

/// A ROM file resolved to a playlist entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedRom {
    pub reference: ReferencePath,
    /// Display title
    pub title: String,
    /// Canonical console name
    pub console: String,
}

impl ResolvedRom {
    pub fn to_entry(&self) -> PlaylistEntry {
        PlaylistEntry::new(self.reference.to_playlist_path(), self.title.clone())
    }
}

/// Resolves ROM files against a console map and a thumbnail catalog.
///
/// Shared by all scan workers; the only interior state is the thumbnail cache.
#[derive(Debug)]
pub struct Resolver {
    consoles: ConsoleMap,
    thumbnails: ThumbnailCatalog,
    matcher: TitleMatcher,
    path_style: PathStyle,
}

impl Resolver {
    pub fn new(
        consoles: ConsoleMap,
        thumbnails_root: impl Into<PathBuf>,
        matcher: TitleMatcher,
        path_style: PathStyle,
    ) -> Self {
        Self {
            consoles,
            thumbnails: ThumbnailCatalog::new(thumbnails_root),
            matcher,
            path_style,
        }
    }

    pub fn consoles(&self) -> &ConsoleMap {
        &self.consoles
    }

    /// Canonical console for a file, from its parent directory name.
    pub fn console_for(&self, path: &Path) -> Option<&str> {
        parent_dir_name(path).and_then(|key| self.consoles.lookup(key))
    }

    /// Display title for a file of `console`: the file stem, unless a
    /// thumbnail name matches it closely enough.
    pub fn title_for(&self, path: &Path, console: &str) -> String {
        let fallback = file_stem_lossy(path);
        let index = self.thumbnails.index_for(console);
        self.matcher.pick(&fallback, index.titles())
    }

    /// Resolve one file. `None` means the file is not under a known console
    /// folder and belongs in no playlist.
    pub fn resolve(&self, path: &Path) -> Option<ResolvedRom> {
        let Some(console) = self.console_for(path) else {
            log::debug!("Skipping {}: no console for its folder", path.display());
            return None;
        };

        Some(ResolvedRom {
            reference: ReferencePath::probe(path, self.path_style),
            title: self.title_for(path, console),
            console: console.to_string(),
        })
    }
}

#[cfg(test)]
#[path = "tests/resolver_tests.rs"]
mod tests;
