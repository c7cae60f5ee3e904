pub mod error;
pub mod format_kind;
pub mod json;
pub mod lines;

pub use error::FormatError;
pub use format_kind::FormatKind;
pub use json::JsonPlaylist;
pub use lines::LinePlaylist;

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Core placeholder telling the player to pick a core on launch.
pub const DETECT: &str = "DETECT";

/// Checksum placeholder meaning "not computed".
pub const CRC_SENTINEL: &str = "0|crc";

/// One playable entry in a playlist.
///
/// Field order matches the on-disk key order of RetroArch playlists.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlaylistEntry {
    /// Reference path, possibly `archive.zip#member`
    pub path: String,
    /// Display title
    pub label: String,
    #[serde(default = "detect")]
    pub core_path: String,
    #[serde(default = "detect")]
    pub core_name: String,
    #[serde(default = "crc_sentinel")]
    pub crc32: String,
    #[serde(default)]
    pub db_name: String,
}

fn detect() -> String {
    DETECT.to_string()
}

fn crc_sentinel() -> String {
    CRC_SENTINEL.to_string()
}

impl PlaylistEntry {
    /// Entry with auto-detected core and a zero checksum.
    pub fn new(path: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            label: label.into(),
            core_path: detect(),
            core_name: detect(),
            crc32: crc_sentinel(),
            db_name: String::new(),
        }
    }
}

/// All entries for one console.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Playlist {
    /// Canonical console name; also the file stem of the playlist
    pub console: String,
    pub entries: Vec<PlaylistEntry>,
}

impl Playlist {
    pub fn new(console: impl Into<String>) -> Self {
        Self {
            console: console.into(),
            entries: Vec::new(),
        }
    }

    pub fn push(&mut self, entry: PlaylistEntry) {
        self.entries.push(entry);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Sort entries by reference path, then label.
    pub fn sort(&mut self) {
        self.entries
            .sort_by(|a, b| a.path.cmp(&b.path).then_with(|| a.label.cmp(&b.label)));
    }

    /// `"<console>.lpl"`
    pub fn file_name(&self) -> String {
        retro_lpl_core::util::playlist_file_name(&self.console)
    }
}

/// A playlist file serializer.
pub trait PlaylistFormat: Send + Sync {
    fn name(&self) -> &'static str;

    /// Check that `entry` can be represented in this format.
    fn validate_entry(&self, _entry: &PlaylistEntry) -> Result<(), FormatError> {
        Ok(())
    }

    /// Serialize entries to the file contents.
    fn render(&self, entries: &[PlaylistEntry]) -> Result<String, FormatError>;

    /// Parse file contents back into entries.
    fn parse(&self, contents: &str) -> Result<Vec<PlaylistEntry>, FormatError>;

    /// Write `playlist` into `dir`, replacing any existing file of the same name.
    fn write_playlist(&self, playlist: &Playlist, dir: &Path) -> Result<PathBuf, FormatError> {
        let contents = self.render(&playlist.entries)?;
        let path = dir.join(playlist.file_name());
        write_atomic(&path, &contents)?;
        Ok(path)
    }

    /// Read and parse a playlist file.
    fn read_playlist(&self, path: &Path) -> Result<Vec<PlaylistEntry>, FormatError> {
        let contents = fs::read_to_string(path)?;
        self.parse(&contents)
    }
}

/// Replace `path` with `contents`.
///
/// The contents go to a hidden temporary sibling first and are renamed into
/// place, so a reader never sees a half-written playlist. The temporary file
/// is removed again if any step fails.
pub fn write_atomic(path: &Path, contents: &str) -> Result<(), FormatError> {
    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    let tmp = path.with_file_name(format!(".{}.tmp", file_name));

    let result = (|| -> std::io::Result<()> {
        let mut file = fs::File::create(&tmp)?;
        file.write_all(contents.as_bytes())?;
        file.sync_all()?;
        drop(file);
        fs::rename(&tmp, path)
    })();

    if let Err(e) = result {
        let _ = fs::remove_file(&tmp);
        return Err(e.into());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_entry_uses_placeholders() {
        let entry = PlaylistEntry::new("/roms/nes/a.nes", "A");
        assert_eq!(entry.core_path, "DETECT");
        assert_eq!(entry.core_name, "DETECT");
        assert_eq!(entry.crc32, "0|crc");
        assert_eq!(entry.db_name, "");
    }

    #[test]
    fn sort_orders_by_path_then_label() {
        let mut playlist = Playlist::new("Nintendo - Game Boy");
        playlist.push(PlaylistEntry::new("/b.gb", "B"));
        playlist.push(PlaylistEntry::new("/a.gb", "Z"));
        playlist.push(PlaylistEntry::new("/a.gb", "Y"));
        playlist.sort();
        let order: Vec<(&str, &str)> = playlist
            .entries
            .iter()
            .map(|e| (e.path.as_str(), e.label.as_str()))
            .collect();
        assert_eq!(order, vec![("/a.gb", "Y"), ("/a.gb", "Z"), ("/b.gb", "B")]);
    }

    #[test]
    fn write_atomic_replaces_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("Nintendo - Game Boy.lpl");
        fs::write(&path, "old").unwrap();

        write_atomic(&path, "new").unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "new");
        assert!(!dir.path().join(".Nintendo - Game Boy.lpl.tmp").exists());
    }

    #[test]
    fn write_atomic_failure_removes_temp_file() {
        let dir = tempfile::tempdir().unwrap();
        // A directory in the way makes the final rename fail
        let path = dir.path().join("Nintendo - Game Boy.lpl");
        fs::create_dir(&path).unwrap();

        assert!(matches!(write_atomic(&path, "new"), Err(FormatError::Io(_))));
        assert!(path.is_dir());
        assert!(!dir.path().join(".Nintendo - Game Boy.lpl.tmp").exists());
    }

    #[test]
    fn file_name_uses_console() {
        assert_eq!(Playlist::new("Sony - PlayStation").file_name(), "Sony - PlayStation.lpl");
    }
}
