use yt2mp3_core::{DownloadOutcome, MediaEntry, Yt2Mp3Result};

use crate::download::DownloadRequest;

/// Result of a metadata-only probe.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProbeResult {
    Video(MediaEntry),
    Playlist {
        title: String,
        entries: Vec<MediaEntry>,
    },
}

impl ProbeResult {
    pub fn into_entries(self) -> Vec<MediaEntry> {
        match self {
            ProbeResult::Video(entry) => vec![entry],
            ProbeResult::Playlist { entries, .. } => entries,
        }
    }
}

/// External extraction/encoding service.
pub trait MediaSource {
    fn probe(&self, url: &str) -> Yt2Mp3Result<ProbeResult>;

    /// Must not panic; every failure becomes `DownloadOutcome::Failure`.
    fn download(&self, request: &DownloadRequest) -> DownloadOutcome;
}
