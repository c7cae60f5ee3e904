use serde::{Deserialize, Serialize};

use crate::{FormatError, PlaylistEntry, PlaylistFormat};

/// RetroArch JSON playlist (`{"items": [...]}`).
pub struct JsonPlaylist;

impl JsonPlaylist {
    pub fn new() -> Self {
        Self
    }
}

impl Default for JsonPlaylist {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Serialize)]
struct DocumentRef<'a> {
    items: &'a [PlaylistEntry],
}

#[derive(Deserialize)]
struct Document {
    #[serde(default)]
    items: Vec<PlaylistEntry>,
}

impl PlaylistFormat for JsonPlaylist {
    fn name(&self) -> &'static str {
        "json"
    }

    fn render(&self, entries: &[PlaylistEntry]) -> Result<String, FormatError> {
        let mut out = serde_json::to_string_pretty(&DocumentRef { items: entries })?;
        out.push('\n');
        Ok(out)
    }

    fn parse(&self, contents: &str) -> Result<Vec<PlaylistEntry>, FormatError> {
        let doc: Document = serde_json::from_str(contents)?;
        Ok(doc.items)
    }
}

#[cfg(test)]
#[path = "tests/json_tests.rs"]
mod tests;
