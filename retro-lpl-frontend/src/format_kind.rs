use serde::{Deserialize, Serialize};

use crate::{JsonPlaylist, LinePlaylist, PlaylistFormat};

/// Playlist serialization formats.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FormatKind {
    /// `{"items": [...]}` document
    #[default]
    Json,
    /// Six lines per entry
    Lines,
}

impl FormatKind {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Json => "json",
            Self::Lines => "lines",
        }
    }

    /// Serializer for this format.
    pub fn formatter(&self) -> Box<dyn PlaylistFormat> {
        match self {
            Self::Json => Box::new(JsonPlaylist::new()),
            Self::Lines => Box::new(LinePlaylist::new()),
        }
    }
}

impl std::fmt::Display for FormatKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Error returned when a string cannot be parsed into a `FormatKind`.
#[derive(Debug, Clone)]
pub struct FormatKindParseError(pub String);

impl std::fmt::Display for FormatKindParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "unknown playlist format: '{}' (expected json or lines)", self.0)
    }
}

impl std::error::Error for FormatKindParseError {}

impl std::str::FromStr for FormatKind {
    type Err = FormatKindParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "json" => Ok(Self::Json),
            "lines" | "legacy" => Ok(Self::Lines),
            _ => Err(FormatKindParseError(s.to_string())),
        }
    }
}
