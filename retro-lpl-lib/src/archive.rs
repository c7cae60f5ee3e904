//! Reference path derivation for plain files and zip archives.
//!
//! The player addresses a file inside an archive as `archive.zip#member`.
//! Only the first member listed in the central directory is referenced.

use std::fmt;
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use retro_lpl_core::util::has_extension;

/// Archive extension that gets `#member` addressing.
pub const ARCHIVE_EXTENSION: &str = "zip";

/// Separator between an archive path and the member name.
pub const MEMBER_SEPARATOR: char = '#';

/// How paths are written into playlists.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PathStyle {
    /// Joined onto the current directory (no symlink resolution)
    #[default]
    Absolute,
    /// Relative to the current directory
    Relative,
}

impl PathStyle {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Absolute => "absolute",
            Self::Relative => "relative",
        }
    }

    /// Render `path` in this style. Falls back to `path` as given when the
    /// current directory cannot be determined.
    pub fn apply(&self, path: &Path) -> PathBuf {
        let absolute = match std::path::absolute(path) {
            Ok(p) => p,
            Err(e) => {
                log::warn!("Cannot make {} absolute: {}", path.display(), e);
                return path.to_path_buf();
            }
        };
        match self {
            Self::Absolute => absolute,
            Self::Relative => std::env::current_dir()
                .ok()
                .and_then(|cwd| pathdiff::diff_paths(&absolute, cwd))
                .unwrap_or_else(|| path.to_path_buf()),
        }
    }
}

impl fmt::Display for PathStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Error returned when a string cannot be parsed into a `PathStyle`.
#[derive(Debug, Clone)]
pub struct PathStyleParseError(pub String);

impl fmt::Display for PathStyleParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown path style: '{}' (expected absolute or relative)", self.0)
    }
}

impl std::error::Error for PathStyleParseError {}

impl std::str::FromStr for PathStyle {
    type Err = PathStyleParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "absolute" | "abs" => Ok(Self::Absolute),
            "relative" | "rel" => Ok(Self::Relative),
            _ => Err(PathStyleParseError(s.to_string())),
        }
    }
}

/// Why an archive's first member could not be read.
#[derive(Debug, thiserror::Error)]
pub enum ArchiveProbeError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("zip error: {0}")]
    Zip(#[from] zip::result::ZipError),

    #[error("archive has no entries")]
    Empty,
}

/// The path a playlist entry points at.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReferencePath {
    /// A plain file
    File(PathBuf),
    /// The first member of a zip archive
    ArchiveMember { archive: PathBuf, member: String },
    /// A zip that could not be read; referenced as a plain file
    UnreadableArchive(PathBuf),
}

impl ReferencePath {
    /// Derive the reference for `path`, rendering it with `style`.
    ///
    /// Zip files are opened to find their first member. Failure to read one
    /// is an expected outcome, reported as [`ReferencePath::UnreadableArchive`].
    pub fn probe(path: &Path, style: PathStyle) -> Self {
        let rendered = style.apply(path);
        if !has_extension(path, ARCHIVE_EXTENSION) {
            return Self::File(rendered);
        }
        match first_archive_member(path) {
            Ok(member) => Self::ArchiveMember {
                archive: rendered,
                member,
            },
            Err(e) => {
                log::debug!("Using {} as-is: {}", path.display(), e);
                Self::UnreadableArchive(rendered)
            }
        }
    }

    /// The string written into the playlist.
    pub fn to_playlist_path(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for ReferencePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::File(p) | Self::UnreadableArchive(p) => write!(f, "{}", p.to_string_lossy()),
            Self::ArchiveMember { archive, member } => write!(
                f,
                "{}{}{}",
                archive.to_string_lossy(),
                MEMBER_SEPARATOR,
                member
            ),
        }
    }
}

/// Name of the first entry in a zip's central directory.
pub fn first_archive_member(path: &Path) -> Result<String, ArchiveProbeError> {
    let file = File::open(path)?;
    let mut archive = zip::ZipArchive::new(BufReader::new(file))?;
    if archive.len() == 0 {
        return Err(ArchiveProbeError::Empty);
    }
    let first = archive.by_index_raw(0)?;
    Ok(first.name().to_string())
}

#[cfg(test)]
#[path = "tests/archive_tests.rs"]
mod tests;
