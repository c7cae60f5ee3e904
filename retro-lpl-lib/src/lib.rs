//! Playlist regeneration for RetroArch-style frontends.
//!
//! Walks a ROM tree laid out as `<roms>/<console key>/.../<file>`, resolves
//! each file to a console, a reference path and a display title matched
//! against the thumbnail library, then writes one playlist per console.

pub mod aggregator;
pub mod archive;
pub mod error;
pub mod launcher;
pub mod resolver;
pub mod settings;
pub mod similarity;
pub mod thumbnails;
pub mod title;
pub mod worker_pool;

pub use aggregator::{
    PlaylistSet, ScanOutcome, UpdateOptions, UpdateSummary, purge_playlists, scan_roms,
    update_playlists, write_playlists,
};
pub use archive::{PathStyle, ReferencePath};
pub use error::{LaunchError, PlaylistError, SettingsError};
pub use launcher::{EmulatorLaunch, MediaCenter};
pub use resolver::{ResolvedRom, Resolver};
pub use settings::{Settings, settings_path};
pub use thumbnails::ThumbnailCatalog;
pub use title::{MatchStrategy, TitleMatcher};

pub use retro_lpl_core;
pub use retro_lpl_frontend;
