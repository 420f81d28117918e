use std::path::PathBuf;
use std::process::{Command, Output, Stdio};

use serde::Deserialize;
use tracing::debug;
use yt2mp3_core::{DownloadOutcome, MediaEntry, Yt2Mp3Error, Yt2Mp3Result, validate_url};
use yt2mp3_url::{is_video_id, normalize_link, watch_url};

use crate::download::DownloadRequest;
use crate::source::{MediaSource, ProbeResult};

const DEFAULT_BINARY: &str = "yt-dlp";
const UNKNOWN_TITLE: &str = "Unknown Title";
const UNKNOWN_ARTIST: &str = "Unknown Artist";
const UNTITLED_PLAYLIST: &str = "Untitled playlist";

#[derive(Debug, Clone)]
pub struct YtDlpClient {
    binary: String,
    ffmpeg_location: Option<PathBuf>,
}

impl Default for YtDlpClient {
    fn default() -> Self {
        Self::new(None, None)
    }
}

impl YtDlpClient {
    pub fn new(binary: Option<String>, ffmpeg_location: Option<PathBuf>) -> Self {
        Self {
            binary: binary
                .filter(|value| !value.trim().is_empty())
                .unwrap_or_else(|| DEFAULT_BINARY.to_string()),
            ffmpeg_location,
        }
    }

    pub fn binary(&self) -> &str {
        &self.binary
    }

    pub fn probe_args(url: &str) -> Vec<String> {
        vec![
            "-J".to_string(),
            "--flat-playlist".to_string(),
            "--no-warnings".to_string(),
            "--".to_string(),
            url.to_string(),
        ]
    }

    pub fn download_args(&self, request: &DownloadRequest) -> Vec<String> {
        let mut args = vec![
            "-f".to_string(),
            request.format.to_string(),
            "-x".to_string(),
            "--audio-format".to_string(),
            request.codec.to_string(),
            "--audio-quality".to_string(),
            format!("{}K", request.bitrate_kbps),
            "-P".to_string(),
            request.output_folder.to_string_lossy().to_string(),
            "-o".to_string(),
            request.output_template(),
            "--no-playlist".to_string(),
            "--no-simulate".to_string(),
            "--print".to_string(),
            "after_move:filepath".to_string(),
            "--no-warnings".to_string(),
        ];
        if let Some(location) = &self.ffmpeg_location {
            args.push("--ffmpeg-location".to_string());
            args.push(location.to_string_lossy().to_string());
        }
        args.push("--".to_string());
        args.push(request.url.clone());
        args
    }

    fn run(&self, args: &[String]) -> Yt2Mp3Result<Output> {
        debug!(binary = %self.binary, ?args, "running yt-dlp");
        let output = Command::new(&self.binary)
            .args(args)
            .stdin(Stdio::null())
            .output()
            .map_err(|err| {
                Yt2Mp3Error::Extraction(format!(
                    "failed to execute {}: {err}. Is yt-dlp installed?",
                    self.binary
                ))
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            let message = stderr
                .lines()
                .map(str::trim)
                .filter(|line| !line.is_empty())
                .last()
                .map(str::to_string)
                .unwrap_or_else(|| format!("yt-dlp exited with {}", output.status));
            return Err(Yt2Mp3Error::Extraction(message));
        }
        Ok(output)
    }
}

impl MediaSource for YtDlpClient {
    fn probe(&self, url: &str) -> Yt2Mp3Result<ProbeResult> {
        let url = normalize_link(url);
        validate_url(&url)?;
        let output = self.run(&Self::probe_args(&url))?;
        parse_probe(&output.stdout)
    }

    fn download(&self, request: &DownloadRequest) -> DownloadOutcome {
        match self.run(&self.download_args(request)) {
            Ok(output) => DownloadOutcome::Success {
                reported_path: reported_path(&output.stdout),
            },
            Err(err) => DownloadOutcome::Failure(err.to_string()),
        }
    }
}

/// Last non-empty stdout line, which `--print after_move:filepath` emits.
fn reported_path(stdout: &[u8]) -> Option<PathBuf> {
    String::from_utf8_lossy(stdout)
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .last()
        .map(PathBuf::from)
}

pub fn parse_probe(payload: &[u8]) -> Yt2Mp3Result<ProbeResult> {
    let mut info: ProbeInfo = serde_json::from_slice(payload)
        .map_err(|err| Yt2Mp3Error::Parse(format!("yt-dlp response parse failed: {err}")))?;

    match info.entries.take() {
        Some(entries) => Ok(ProbeResult::Playlist {
            title: non_empty(info.title).unwrap_or_else(|| UNTITLED_PLAYLIST.to_string()),
            entries: entries.into_iter().flatten().map(ProbeInfo::into_entry).collect(),
        }),
        None => Ok(ProbeResult::Video(info.into_entry())),
    }
}

#[derive(Debug, Deserialize)]
struct ProbeInfo {
    id: Option<String>,
    title: Option<String>,
    uploader: Option<String>,
    channel: Option<String>,
    webpage_url: Option<String>,
    url: Option<String>,
    entries: Option<Vec<Option<ProbeInfo>>>,
}

impl ProbeInfo {
    fn into_entry(self) -> MediaEntry {
        let id = non_empty(self.id).unwrap_or_default();
        let url = resolve_entry_url(self.webpage_url, self.url, &id);
        MediaEntry {
            url,
            title: non_empty(self.title).unwrap_or_else(|| UNKNOWN_TITLE.to_string()),
            uploader: non_empty(self.uploader)
                .or_else(|| non_empty(self.channel))
                .unwrap_or_else(|| UNKNOWN_ARTIST.to_string()),
            id,
        }
    }
}

fn resolve_entry_url(webpage_url: Option<String>, url: Option<String>, id: &str) -> String {
    let webpage_url = non_empty(webpage_url);
    let url = non_empty(url);
    if let Some(found) = [&webpage_url, &url]
        .into_iter()
        .flatten()
        .find(|candidate| validate_url(candidate).is_ok())
    {
        return found.clone();
    }
    // Flat entries from older extractors carry only the bare video id.
    if let Some(bare) = url.as_deref().filter(|value| is_video_id(value)) {
        return watch_url(bare);
    }
    if is_video_id(id) {
        return watch_url(id);
    }
    url.unwrap_or_default()
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|text| !text.trim().is_empty())
}
