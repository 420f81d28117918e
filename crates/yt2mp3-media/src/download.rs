use std::path::{Path, PathBuf};

use tracing::debug;
use yt2mp3_core::{DownloadOutcome, TargetName, validate_url};
use yt2mp3_url::normalize_link;

use crate::source::MediaSource;

pub const AUDIO_FORMAT: &str = "bestaudio/best";
pub const AUDIO_CODEC: &str = "mp3";
pub const AUDIO_BITRATE_KBPS: u32 = 192;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DownloadRequest {
    pub url: String,
    pub output_folder: PathBuf,
    pub stem: String,
    pub format: &'static str,
    pub codec: &'static str,
    pub bitrate_kbps: u32,
}

impl DownloadRequest {
    pub fn new(url: &str, target: &TargetName, output_folder: &Path) -> Self {
        Self {
            url: url.to_string(),
            output_folder: output_folder.to_path_buf(),
            stem: target.as_str().to_string(),
            format: AUDIO_FORMAT,
            codec: AUDIO_CODEC,
            bitrate_kbps: AUDIO_BITRATE_KBPS,
        }
    }

    /// Where the file lands if the extractor keeps the name untouched.
    pub fn expected_path(&self) -> PathBuf {
        self.output_folder.join(format!("{}.{}", self.stem, self.codec))
    }

    /// Output template relative to `output_folder`. `%` in the stem is
    /// doubled so it is not read as a template field.
    pub fn output_template(&self) -> String {
        format!("{}.%(ext)s", self.stem.replace('%', "%%"))
    }
}

pub fn download<S: MediaSource + ?Sized>(
    source: &S,
    url: &str,
    target: &TargetName,
    output_folder: &Path,
) -> DownloadOutcome {
    let url = normalize_link(url);
    if let Err(err) = validate_url(&url) {
        return DownloadOutcome::Failure(err.to_string());
    }
    let request = DownloadRequest::new(&url, target, output_folder);
    debug!(url = %request.url, stem = %request.stem, "requesting download");
    source.download(&request)
}
