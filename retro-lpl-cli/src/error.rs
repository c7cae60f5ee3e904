use thiserror::Error;

use retro_lpl_lib::{LaunchError, PlaylistError, SettingsError};

/// Errors that can occur during CLI command execution.
#[derive(Debug, Error)]
pub(crate) enum CliError {
    /// Settings file could not be read, parsed or written
    #[error("{0}")]
    Settings(#[from] SettingsError),

    /// Playlist update failed
    #[error("{0}")]
    Playlist(#[from] PlaylistError),

    /// Emulator launch failed
    #[error("{0}")]
    Launch(#[from] LaunchError),

    /// Configuration error
    #[error("Config error: {0}")]
    Config(String),

    /// Runtime creation or async error
    #[error("Runtime error: {0}")]
    Runtime(String),
}

impl CliError {
    pub(crate) fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    pub(crate) fn runtime(msg: impl Into<String>) -> Self {
        Self::Runtime(msg.into())
    }
}
