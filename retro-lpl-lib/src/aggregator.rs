//! Playlist aggregation: purge old playlists, scan the ROM tree, write new ones.
//!
//! A run is purge → scan → flush. Nothing is written until every file has
//! been resolved, and the playlists directory only ever holds the output of
//! the latest completed run.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use walkdir::WalkDir;

use retro_lpl_core::ConsoleMap;
use retro_lpl_core::util::has_extension;
use retro_lpl_frontend::{
    FormatError, FormatKind, Playlist, PlaylistEntry, PlaylistFormat, write_atomic,
};

use crate::archive::PathStyle;
use crate::error::PlaylistError;
use crate::resolver::Resolver;
use crate::title::TitleMatcher;
use crate::worker_pool::WorkerPool;

/// Playlists keyed by canonical console name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PlaylistSet {
    playlists: BTreeMap<String, Playlist>,
}

impl PlaylistSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, console: &str, entry: PlaylistEntry) {
        self.playlists
            .entry(console.to_string())
            .or_insert_with(|| Playlist::new(console))
            .push(entry);
    }

    /// Append all of `other`'s entries after this set's entries.
    pub fn merge(&mut self, other: PlaylistSet) {
        for (console, playlist) in other.playlists {
            match self.playlists.get_mut(&console) {
                Some(existing) => existing.entries.extend(playlist.entries),
                None => {
                    self.playlists.insert(console, playlist);
                }
            }
        }
    }

    /// Sort every playlist by reference path.
    pub fn sort_entries(&mut self) {
        for playlist in self.playlists.values_mut() {
            playlist.sort();
        }
    }

    pub fn get(&self, console: &str) -> Option<&Playlist> {
        self.playlists.get(console)
    }

    /// Playlists in console name order.
    pub fn iter(&self) -> impl Iterator<Item = &Playlist> {
        self.playlists.values()
    }

    /// Number of consoles with a playlist.
    pub fn len(&self) -> usize {
        self.playlists.len()
    }

    pub fn is_empty(&self) -> bool {
        self.playlists.is_empty()
    }

    /// Total entries across all playlists.
    pub fn entry_count(&self) -> usize {
        self.playlists.values().map(Playlist::len).sum()
    }
}

/// Files that share a containing directory; the unit of parallel work.
#[derive(Debug, Clone)]
pub struct RomDir {
    pub dir: PathBuf,
    pub files: Vec<PathBuf>,
}

/// Result of scanning a ROM tree.
#[derive(Debug, Default)]
pub struct ScanOutcome {
    pub set: PlaylistSet,
    /// Regular files visited
    pub files_seen: usize,
    /// Files outside any known console folder
    pub skipped: usize,
}

/// Everything a playlist update needs.
#[derive(Debug, Clone)]
pub struct UpdateOptions {
    pub roms_root: PathBuf,
    pub thumbnails_root: PathBuf,
    pub playlists_root: PathBuf,
    pub consoles: ConsoleMap,
    pub matcher: TitleMatcher,
    pub path_style: PathStyle,
    pub format: FormatKind,
    /// Sort entries by reference path instead of keeping traversal order
    pub sort_entries: bool,
    /// Scan workers; 0 means one per available CPU
    pub jobs: usize,
}

impl UpdateOptions {
    pub fn new(
        roms_root: impl Into<PathBuf>,
        thumbnails_root: impl Into<PathBuf>,
        playlists_root: impl Into<PathBuf>,
    ) -> Self {
        Self {
            roms_root: roms_root.into(),
            thumbnails_root: thumbnails_root.into(),
            playlists_root: playlists_root.into(),
            consoles: ConsoleMap::builtin(),
            matcher: TitleMatcher::default(),
            path_style: PathStyle::default(),
            format: FormatKind::default(),
            sort_entries: true,
            jobs: 0,
        }
    }

    /// Worker count with `0` resolved to the available parallelism.
    pub fn worker_count(&self) -> usize {
        if self.jobs > 0 {
            self.jobs
        } else {
            std::thread::available_parallelism()
                .map(|n| n.get())
                .unwrap_or(4)
        }
    }
}

/// What a completed update did.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UpdateSummary {
    pub files_seen: usize,
    pub entries: usize,
    pub skipped: usize,
    /// Old playlists removed before the scan
    pub purged: usize,
    /// Playlist files written, in console name order
    pub written: Vec<PathBuf>,
}

/// Delete every `.lpl` file directly inside `dir`.
///
/// A missing directory has nothing to purge. Returns the number removed.
pub fn purge_playlists(dir: &Path) -> Result<usize, PlaylistError> {
    let entries = match std::fs::read_dir(dir) {
        Ok(e) => e,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(0),
        Err(source) => {
            return Err(PlaylistError::Purge {
                path: dir.to_path_buf(),
                source,
            });
        }
    };

    let mut removed = 0;
    for entry in entries.flatten() {
        let path = entry.path();
        if !path.is_file() || !has_extension(&path, retro_lpl_core::PLAYLIST_EXTENSION) {
            continue;
        }
        std::fs::remove_file(&path).map_err(|source| PlaylistError::Purge {
            path: path.clone(),
            source,
        })?;
        log::debug!("Removed {}", path.display());
        removed += 1;
    }

    Ok(removed)
}

/// Walk `root` and group every regular file by its containing directory.
///
/// Walk order is by file name, so the grouping is stable across runs.
/// Entries that cannot be read are logged and skipped.
pub fn collect_rom_dirs(root: &Path) -> Vec<RomDir> {
    let mut by_dir: BTreeMap<PathBuf, Vec<PathBuf>> = BTreeMap::new();

    for entry in WalkDir::new(root).sort_by_file_name() {
        let entry = match entry {
            Ok(e) => e,
            Err(e) => {
                log::warn!("Skipping unreadable entry under {}: {}", root.display(), e);
                continue;
            }
        };
        // Symlinks to files count as files, as they do for the player
        if entry.file_type().is_dir() || !entry.path().is_file() {
            continue;
        }
        let path = entry.into_path();
        let dir = path.parent().map(Path::to_path_buf).unwrap_or_default();
        by_dir.entry(dir).or_default().push(path);
    }

    by_dir
        .into_iter()
        .map(|(dir, files)| RomDir { dir, files })
        .collect()
}

/// Resolve every file of one directory.
fn scan_dir(resolver: &Resolver, rom_dir: &RomDir) -> ScanOutcome {
    log::debug!("Scanning {} ({} files)", rom_dir.dir.display(), rom_dir.files.len());
    let mut outcome = ScanOutcome::default();
    for file in &rom_dir.files {
        outcome.files_seen += 1;
        match resolver.resolve(file) {
            Some(rom) => outcome.set.add(&rom.console, rom.to_entry()),
            None => outcome.skipped += 1,
        }
    }
    outcome
}

/// Resolve every file under `root` using `jobs` concurrent workers.
///
/// Directories are the unit of work. Partial results are merged in walk
/// order, so the unsorted entry order is the same from run to run.
pub async fn scan_roms(
    root: &Path,
    resolver: Arc<Resolver>,
    jobs: usize,
) -> Result<ScanOutcome, PlaylistError> {
    let dirs: Vec<(usize, RomDir)> = collect_rom_dirs(root).into_iter().enumerate().collect();
    log::debug!("Scanning {} director(ies) with {} worker(s)", dirs.len(), jobs.max(1));

    let mut pool = WorkerPool::start(jobs, dirs, move |(index, rom_dir): (usize, RomDir)| {
        let resolver = Arc::clone(&resolver);
        async move {
            let outcome =
                tokio::task::spawn_blocking(move || scan_dir(&resolver, &rom_dir)).await;
            (index, outcome)
        }
    });

    let mut partials = Vec::new();
    while let Some((index, outcome)) = pool.recv().await {
        let outcome = outcome.map_err(|e| PlaylistError::Worker(e.to_string()))?;
        partials.push((index, outcome));
    }
    partials.sort_by_key(|(index, _)| *index);

    let mut total = ScanOutcome::default();
    for (_, partial) in partials {
        total.files_seen += partial.files_seen;
        total.skipped += partial.skipped;
        total.set.merge(partial.set);
    }
    Ok(total)
}

/// Serialize `playlist`, leaving out entries the format cannot represent.
///
/// Returns `None` when no entry is left.
fn render_playlist(
    playlist: &Playlist,
    format: &dyn PlaylistFormat,
) -> Result<Option<String>, FormatError> {
    let entries: Vec<PlaylistEntry> = playlist
        .entries
        .iter()
        .filter(|entry| match format.validate_entry(entry) {
            Ok(()) => true,
            Err(e) => {
                log::warn!("Leaving {} out of {}: {}", entry.path, playlist.file_name(), e);
                false
            }
        })
        .cloned()
        .collect();

    if entries.is_empty() {
        return Ok(None);
    }
    format.render(&entries).map(Some)
}

/// Write one file per playlist into `dir`, creating it if needed.
///
/// Every playlist is rendered before the first file is written. If a write
/// fails, the files written so far are removed again: the run leaves either
/// the complete set or nothing.
pub fn write_playlists(
    set: &PlaylistSet,
    dir: &Path,
    format: &dyn PlaylistFormat,
) -> Result<Vec<PathBuf>, PlaylistError> {
    let mut rendered = Vec::with_capacity(set.len());
    for playlist in set.iter().filter(|p| !p.is_empty()) {
        let path = dir.join(playlist.file_name());
        match render_playlist(playlist, format) {
            Ok(Some(contents)) => rendered.push((path, contents)),
            Ok(None) => log::warn!("Skipping {}: no writable entries", path.display()),
            Err(source) => return Err(PlaylistError::Write { path, source }),
        }
    }

    std::fs::create_dir_all(dir).map_err(|e| PlaylistError::Write {
        path: dir.to_path_buf(),
        source: FormatError::Io(e),
    })?;

    let mut written = Vec::with_capacity(rendered.len());
    for (path, contents) in rendered {
        if let Err(source) = write_atomic(&path, &contents) {
            discard(&written);
            return Err(PlaylistError::Write { path, source });
        }
        log::debug!("Wrote {}", path.display());
        written.push(path);
    }
    Ok(written)
}

/// Remove playlists written earlier in a flush that failed.
fn discard(written: &[PathBuf]) {
    for path in written {
        if let Err(e) = std::fs::remove_file(path) {
            log::warn!("Failed to remove {}: {}", path.display(), e);
        }
    }
}

/// Regenerate all playlists: purge, scan, then flush.
///
/// The ROM root is checked before anything is purged, so a wrong path
/// leaves existing playlists in place.
pub async fn update_playlists(options: &UpdateOptions) -> Result<UpdateSummary, PlaylistError> {
    if !options.roms_root.is_dir() {
        return Err(PlaylistError::RomRootMissing(options.roms_root.clone()));
    }

    let purged = purge_playlists(&options.playlists_root)?;
    if purged > 0 {
        log::debug!(
            "Purged {} playlist(s) from {}",
            purged,
            options.playlists_root.display()
        );
    }

    let resolver = Arc::new(Resolver::new(
        options.consoles.clone(),
        options.thumbnails_root.clone(),
        options.matcher,
        options.path_style,
    ));
    let mut outcome = scan_roms(&options.roms_root, resolver, options.worker_count()).await?;

    if options.sort_entries {
        outcome.set.sort_entries();
    }

    let formatter = options.format.formatter();
    let written = write_playlists(&outcome.set, &options.playlists_root, formatter.as_ref())?;

    Ok(UpdateSummary {
        files_seen: outcome.files_seen,
        entries: outcome.set.entry_count(),
        skipped: outcome.skipped,
        purged,
        written,
    })
}

#[cfg(test)]
#[path = "tests/aggregator_tests.rs"]
mod tests;
