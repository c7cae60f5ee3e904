//! Legacy line-oriented playlist format.
//!
//! Each entry is six lines: path, label, core path, core name, checksum and
//! an empty separator line. The format has no `db_name` field.

use crate::{FormatError, PlaylistEntry, PlaylistFormat};

pub struct LinePlaylist;

impl LinePlaylist {
    pub fn new() -> Self {
        Self
    }
}

impl Default for LinePlaylist {
    fn default() -> Self {
        Self::new()
    }
}

impl PlaylistFormat for LinePlaylist {
    fn name(&self) -> &'static str {
        "lines"
    }

    /// Fields are line-delimited, so none may contain a line break.
    fn validate_entry(&self, entry: &PlaylistEntry) -> Result<(), FormatError> {
        match fields(entry).into_iter().find(|f| f.contains(['\n', '\r'])) {
            Some(field) => Err(FormatError::malformed(format!(
                "field contains a line break: {:?}",
                field
            ))),
            None => Ok(()),
        }
    }

    fn render(&self, entries: &[PlaylistEntry]) -> Result<String, FormatError> {
        let mut out = String::new();
        for entry in entries {
            self.validate_entry(entry)?;
            for field in fields(entry) {
                out.push_str(field);
                out.push('\n');
            }
            out.push('\n');
        }
        Ok(out)
    }

    fn parse(&self, contents: &str) -> Result<Vec<PlaylistEntry>, FormatError> {
        let lines: Vec<&str> = contents.lines().collect();
        let mut entries = Vec::new();

        for (index, chunk) in lines.chunks(6).enumerate() {
            // A trailing chunk made only of blank lines is padding, not an entry
            if chunk.iter().all(|l| l.is_empty()) {
                continue;
            }
            if chunk.len() < 5 {
                return Err(FormatError::malformed(format!(
                    "entry {} is truncated ({} of 5 lines)",
                    index + 1,
                    chunk.len()
                )));
            }
            if chunk.len() == 6 && !chunk[5].is_empty() {
                return Err(FormatError::malformed(format!(
                    "entry {} is not followed by a blank line",
                    index + 1
                )));
            }
            entries.push(PlaylistEntry {
                path: chunk[0].to_string(),
                label: chunk[1].to_string(),
                core_path: chunk[2].to_string(),
                core_name: chunk[3].to_string(),
                crc32: chunk[4].to_string(),
                db_name: String::new(),
            });
        }

        Ok(entries)
    }
}

fn fields(entry: &PlaylistEntry) -> [&str; 5] {
    [
        &entry.path,
        &entry.label,
        &entry.core_path,
        &entry.core_name,
        &entry.crc32,
    ]
}

#[cfg(test)]
#[path = "tests/lines_tests.rs"]
mod tests;
