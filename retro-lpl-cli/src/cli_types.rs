//! CLI type definitions: command enums and argument structs.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use retro_lpl_frontend::FormatKind;
use retro_lpl_lib::{MatchStrategy, PathStyle, Settings};

#[derive(Parser)]
#[command(name = "retro-lpl")]
#[command(about = "Regenerate RetroArch playlists from a ROM folder tree", long_about = None)]
pub(crate) struct Cli {
    /// Settings file (default: ~/.config/retro-lpl/settings.toml)
    #[arg(long, global = true)]
    pub config_file: Option<PathBuf>,

    /// Directory relative paths are resolved against (overrides the settings file)
    #[arg(long, global = true)]
    pub base_dir: Option<PathBuf>,

    /// Only show warnings and errors (suppress normal output)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Enable verbose/debug logging (timestamps + debug-level messages)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Overrides for the playlist update, applied on top of the settings file.
#[derive(Args, Clone, Default)]
pub(crate) struct UpdateArgs {
    /// ROM tree root (one folder per console key)
    #[arg(long)]
    pub roms: Option<PathBuf>,

    /// Thumbnail library root
    #[arg(long)]
    pub thumbnails: Option<PathBuf>,

    /// Output directory for .lpl files
    #[arg(long)]
    pub playlists: Option<PathBuf>,

    /// Playlist file format (json, lines)
    #[arg(long)]
    pub format: Option<FormatKind>,

    /// Minimum title similarity, exclusive (0.0 - 1.0)
    #[arg(long)]
    pub threshold: Option<f64>,

    /// Title matching strategy (best, first)
    #[arg(long)]
    pub strategy: Option<MatchStrategy>,

    /// Reference path style (absolute, relative)
    #[arg(long)]
    pub path_style: Option<PathStyle>,

    /// Number of scan workers (default: one per CPU)
    #[arg(short, long)]
    pub jobs: Option<usize>,

    /// Keep traversal order instead of sorting entries by path
    #[arg(long)]
    pub no_sort: bool,
}

impl UpdateArgs {
    /// Fold the overrides into `settings`.
    pub(crate) fn apply(&self, settings: &mut Settings) {
        if let Some(roms) = &self.roms {
            settings.paths.roms = roms.clone();
        }
        if let Some(thumbnails) = &self.thumbnails {
            settings.paths.thumbnails = thumbnails.clone();
        }
        if let Some(playlists) = &self.playlists {
            settings.paths.playlists = playlists.clone();
        }
        if let Some(format) = self.format {
            settings.playlist.format = format;
        }
        if let Some(threshold) = self.threshold {
            settings.matching.threshold = threshold;
        }
        if let Some(strategy) = self.strategy {
            settings.matching.strategy = strategy;
        }
        if let Some(style) = self.path_style {
            settings.playlist.path_style = style;
        }
        if let Some(jobs) = self.jobs {
            settings.playlist.jobs = jobs;
        }
        if self.no_sort {
            settings.playlist.sort_entries = false;
        }
    }
}

#[derive(Subcommand)]
pub(crate) enum Commands {
    /// Purge and regenerate all playlists
    Update {
        #[command(flatten)]
        update: UpdateArgs,
    },

    /// Regenerate playlists, then run the emulator with the media center paused
    Launch {
        #[command(flatten)]
        update: UpdateArgs,

        /// Emulator executable
        #[arg(long)]
        emulator: Option<PathBuf>,

        /// Emulator configuration file
        #[arg(long)]
        emulator_config: Option<PathBuf>,

        /// Start the emulator without regenerating playlists
        #[arg(long)]
        skip_update: bool,
    },

    /// List known console folder keys
    Consoles,

    /// Manage the settings file
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand)]
pub(crate) enum ConfigAction {
    /// Show the effective settings
    Show,

    /// Print the settings file path
    Path,

    /// Write a settings file with the defaults
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}
