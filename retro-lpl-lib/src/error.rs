use std::path::PathBuf;

use thiserror::Error;

use retro_lpl_frontend::FormatError;

/// Errors that abort a playlist update.
///
/// Problems with individual ROM files never show up here; those fall back
/// to defaults inside the resolver.
#[derive(Debug, Error)]
pub enum PlaylistError {
    /// The ROM root does not exist or is not a directory
    #[error("ROM directory not found: {}", .0.display())]
    RomRootMissing(PathBuf),

    /// An old playlist could not be removed
    #[error("Failed to remove {}: {source}", path.display())]
    Purge {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A playlist (or the playlists directory) could not be written
    #[error("Failed to write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: FormatError,
    },

    /// A scan worker panicked or was cancelled
    #[error("Scan worker failed: {0}")]
    Worker(String),
}

/// Errors reading or writing the settings file.
#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid settings file: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Cannot serialize settings: {0}")]
    Serialize(#[from] toml::ser::Error),

    /// Match threshold outside `[0, 1]`
    #[error("Match threshold must be between 0 and 1, got {0}")]
    InvalidThreshold(f64),
}

/// Errors from the emulator launch sequence.
#[derive(Debug, Error)]
pub enum LaunchError {
    /// The emulator could not be started
    #[error("Failed to start {}: {source}", program.display())]
    Spawn {
        program: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
