//! Application settings (`~/.config/retro-lpl/settings.toml`).
//!
//! Every key is optional; a missing file means all defaults. The defaults
//! match a layout where the tool lives in a `bin/` directory next to
//! `roms/`, `thumbnails/` and `playlists/`.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use retro_lpl_core::ConsoleMap;
use retro_lpl_frontend::FormatKind;

use crate::aggregator::UpdateOptions;
use crate::archive::PathStyle;
use crate::error::SettingsError;
use crate::launcher::{EmulatorLaunch, MediaCenter};
use crate::title::{MatchStrategy, TitleMatcher};

/// Canonical path to the settings file: `~/.config/retro-lpl/settings.toml`.
pub fn settings_path() -> PathBuf {
    let config = dirs::config_dir().unwrap_or_else(|| PathBuf::from("."));
    config.join("retro-lpl").join("settings.toml")
}

/// Directory of the running executable, with symlinks resolved.
pub fn executable_dir() -> Option<PathBuf> {
    let exe = std::env::current_exe().and_then(|p| p.canonicalize());
    match exe {
        Ok(exe) => exe.parent().map(Path::to_path_buf),
        Err(e) => {
            log::warn!("Cannot locate the executable, using the current directory: {}", e);
            None
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub paths: PathSettings,
    pub matching: MatchSettings,
    pub playlist: PlaylistSettings,
    /// Extra or overriding folder key → canonical console name entries
    pub consoles: BTreeMap<String, String>,
    pub launcher: LauncherSettings,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PathSettings {
    /// Directory relative paths are resolved against (default: the executable's directory)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub base_dir: Option<PathBuf>,
    pub roms: PathBuf,
    pub thumbnails: PathBuf,
    pub playlists: PathBuf,
}

impl Default for PathSettings {
    fn default() -> Self {
        Self {
            base_dir: None,
            roms: PathBuf::from("../roms"),
            thumbnails: PathBuf::from("../thumbnails"),
            playlists: PathBuf::from("../playlists"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MatchSettings {
    pub threshold: f64,
    pub strategy: MatchStrategy,
}

impl Default for MatchSettings {
    fn default() -> Self {
        Self {
            threshold: TitleMatcher::DEFAULT_THRESHOLD,
            strategy: MatchStrategy::Best,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlaylistSettings {
    pub format: FormatKind,
    pub sort_entries: bool,
    pub path_style: PathStyle,
    /// Scan workers; 0 means one per CPU
    pub jobs: usize,
}

impl Default for PlaylistSettings {
    fn default() -> Self {
        Self {
            format: FormatKind::Json,
            sort_entries: true,
            path_style: PathStyle::Absolute,
            jobs: 0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LauncherSettings {
    pub emulator: PathBuf,
    pub config: PathBuf,
    /// Prepended to `LD_LIBRARY_PATH` for the emulator
    #[serde(skip_serializing_if = "Option::is_none")]
    pub library_dir: Option<PathBuf>,
    pub media_center: MediaCenter,
}

impl Default for LauncherSettings {
    fn default() -> Self {
        Self {
            emulator: PathBuf::from("../bin/retroarch"),
            config: PathBuf::from("../config/retroarch.cfg"),
            library_dir: Some(PathBuf::from("../lib")),
            media_center: MediaCenter::None,
        }
    }
}

impl Settings {
    /// Load from `path`. A missing file yields the defaults.
    pub fn load(path: &Path) -> Result<Self, SettingsError> {
        match std::fs::read_to_string(path) {
            Ok(contents) => Self::from_toml_str(&contents),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                log::debug!("No settings at {}, using defaults", path.display());
                Ok(Self::default())
            }
            Err(e) => Err(e.into()),
        }
    }

    pub fn from_toml_str(contents: &str) -> Result<Self, SettingsError> {
        let settings: Settings = toml::from_str(contents)?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn validate(&self) -> Result<(), SettingsError> {
        let t = self.matching.threshold;
        if !(0.0..=1.0).contains(&t) {
            return Err(SettingsError::InvalidThreshold(t));
        }
        Ok(())
    }

    pub fn to_toml_string(&self) -> Result<String, SettingsError> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Write the settings to `path` atomically, creating parent directories.
    pub fn save(&self, path: &Path) -> Result<(), SettingsError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let serialized = self.to_toml_string()?;
        let tmp = path.with_extension("toml.tmp");
        std::fs::write(&tmp, &serialized)?;
        std::fs::rename(&tmp, path)?;
        Ok(())
    }

    /// Directory relative paths resolve against: `base_dir` when set,
    /// otherwise the directory holding the executable.
    pub fn base_dir(&self) -> Option<PathBuf> {
        self.paths.base_dir.clone().or_else(executable_dir)
    }

    /// `path` joined onto [`base_dir`](Self::base_dir) when `path` is
    /// relative. Without a base directory it stays relative to the current
    /// directory.
    pub fn resolve_path(&self, path: &Path) -> PathBuf {
        match self.base_dir() {
            Some(base) if path.is_relative() => base.join(path),
            _ => path.to_path_buf(),
        }
    }

    /// Built-in consoles plus the `[consoles]` table.
    pub fn console_map(&self) -> ConsoleMap {
        ConsoleMap::builtin().with_overrides(self.consoles.clone())
    }

    pub fn title_matcher(&self) -> TitleMatcher {
        TitleMatcher::new(self.matching.threshold, self.matching.strategy)
    }

    pub fn update_options(&self) -> UpdateOptions {
        UpdateOptions {
            roms_root: self.resolve_path(&self.paths.roms),
            thumbnails_root: self.resolve_path(&self.paths.thumbnails),
            playlists_root: self.resolve_path(&self.paths.playlists),
            consoles: self.console_map(),
            matcher: self.title_matcher(),
            path_style: self.playlist.path_style,
            format: self.playlist.format,
            sort_entries: self.playlist.sort_entries,
            jobs: self.playlist.jobs,
        }
    }

    pub fn emulator_launch(&self) -> EmulatorLaunch {
        EmulatorLaunch {
            program: self.resolve_path(&self.launcher.emulator),
            config: self.resolve_path(&self.launcher.config),
            library_dir: self
                .launcher
                .library_dir
                .as_deref()
                .map(|p| self.resolve_path(p)),
        }
    }
}

#[cfg(test)]
#[path = "tests/settings_tests.rs"]
mod tests;
