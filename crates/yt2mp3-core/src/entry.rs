use std::fmt;

use serde::{Deserialize, Serialize};

/// One video as reported by the extraction service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MediaEntry {
    pub id: String,
    pub url: String,
    pub title: String,
    pub uploader: String,
}

/// Title/artist pair the operator agreed to. Fields may be empty when the
/// operator cleared them while editing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfirmedMetadata {
    pub title: String,
    pub artist: String,
}

impl ConfirmedMetadata {
    pub fn new(title: impl Into<String>, artist: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            artist: artist.into(),
        }
    }
}

impl From<&MediaEntry> for ConfirmedMetadata {
    fn from(entry: &MediaEntry) -> Self {
        Self::new(entry.title.clone(), entry.uploader.clone())
    }
}

/// Requested output stem, `"{title} - {artist}"`. Not sanitized.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TargetName(String);

impl TargetName {
    pub const SEPARATOR: &'static str = " - ";

    pub fn new(title: &str, artist: &str) -> Self {
        Self(format!("{title}{}{artist}", Self::SEPARATOR))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TargetName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
