//! Console catalog: maps ROM folder names to canonical console names.
//!
//! Canonical names are the ones RetroArch uses for its playlist files and
//! thumbnail folders (e.g. `"Nintendo - Game Boy"`), so the same string
//! picks both the `.lpl` filename and the `Named_Snaps` directory.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Built-in folder key → canonical console name table.
const DEFAULT_CONSOLES: &[(&str, &str)] = &[
    ("gb", "Nintendo - Game Boy"),
    ("gbc", "Nintendo - Game Boy Color"),
    ("3ds", "Nintendo - Nintendo 3DS"),
    ("gba", "Nintendo - Game Boy Advance"),
    ("nes", "Nintendo - Nintendo Entertainment System"),
    ("psx", "Sony - PlayStation"),
    ("ps2", "Sony - PlayStation 2"),
    ("ps3", "Sony - PlayStation 3"),
    ("snes", "Nintendo - Super Nintendo Entertainment System"),
    ("arcade", "FB Alpha - Arcade Games"),
    ("n64", "Nintendo - Nintendo 64"),
    ("psp", "Sony - PlayStation Portable"),
    ("gamecube", "Nintendo - GameCube"),
    ("wii", "Nintendo - Wii"),
];

/// Mapping of short folder names to canonical console names.
///
/// Lookups are exact: `"NES"` and `"nes"` are different keys, matching how
/// the folder name appears on disk.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ConsoleMap {
    entries: BTreeMap<String, String>,
}

impl ConsoleMap {
    /// An empty map. Every lookup misses.
    pub fn empty() -> Self {
        Self {
            entries: BTreeMap::new(),
        }
    }

    /// The built-in console table.
    pub fn builtin() -> Self {
        Self::empty().with_overrides(
            DEFAULT_CONSOLES
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string())),
        )
    }

    /// Add or replace entries. Later entries win.
    pub fn with_overrides<I>(mut self, overrides: I) -> Self
    where
        I: IntoIterator<Item = (String, String)>,
    {
        for (key, name) in overrides {
            self.entries.insert(key, name);
        }
        self
    }

    /// Canonical console name for a folder key, if known.
    pub fn lookup(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// Iterate `(key, canonical name)` pairs in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for ConsoleMap {
    fn default() -> Self {
        Self::builtin()
    }
}

#[cfg(test)]
#[path = "tests/console_tests.rs"]
mod tests;
