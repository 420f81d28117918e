mod config;
mod folder;

use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;
use yt2mp3_core::{Yt2Mp3Error, Yt2Mp3Result};

pub use config::{
    AppConfig, FFMPEG_LOCATION_KEY, KNOWN_KEYS, OUTPUT_FOLDER_KEY, YT_DLP_PATH_KEY,
};
pub use folder::{choose_output_folder, clean_folder_input, ensure_folder};

pub const DEFAULT_ENV_FILE: &str = ".env";

/// `KEY=VALUE` file in the working directory.
#[derive(Debug, Clone)]
pub struct EnvFile {
    path: PathBuf,
}

impl Default for EnvFile {
    fn default() -> Self {
        Self::new(DEFAULT_ENV_FILE)
    }
}

impl EnvFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn exists(&self) -> bool {
        self.path.exists()
    }

    pub fn entries(&self) -> Yt2Mp3Result<Vec<(String, String)>> {
        if !self.exists() {
            return Ok(Vec::new());
        }
        let iter = dotenvy::from_path_iter(&self.path)
            .map_err(|err| Yt2Mp3Error::Config(format!("failed to read env file: {err}")))?;
        iter.map(|item| {
            item.map_err(|err| Yt2Mp3Error::Config(format!("failed to parse env file: {err}")))
        })
        .collect()
    }

    pub fn load(&self) -> Yt2Mp3Result<AppConfig> {
        Ok(AppConfig::from_entries(self.entries()?))
    }

    pub fn get(&self, key: &str) -> Yt2Mp3Result<Option<String>> {
        Ok(self
            .entries()?
            .into_iter()
            .find(|(name, _)| name == key)
            .map(|(_, value)| value))
    }

    /// Writes `key`, keeping every other line. Returns `false` without
    /// touching the file when the stored value is already `value`.
    pub fn set(&self, key: &str, value: &str) -> Yt2Mp3Result<bool> {
        if key.trim().is_empty() || key.contains('=') || key.contains(char::is_whitespace) {
            return Err(Yt2Mp3Error::Config(format!("invalid key: '{key}'")));
        }
        if self.get(key)?.as_deref() == Some(value) {
            debug!(key, "env value unchanged, skipping write");
            return Ok(false);
        }

        let content = if self.exists() {
            fs::read_to_string(&self.path)
                .map_err(|err| Yt2Mp3Error::Config(format!("failed to read env file: {err}")))?
        } else {
            String::new()
        };

        let line = format!("{key}={}", quote_value(value));
        let mut replaced = false;
        let mut lines: Vec<String> = content
            .lines()
            .map(|existing| {
                if !replaced && line_defines(existing, key) {
                    replaced = true;
                    line.clone()
                } else {
                    existing.to_string()
                }
            })
            .collect();
        if !replaced {
            lines.push(line);
        }

        let mut output = lines.join("\n");
        output.push('\n');
        fs::write(&self.path, output)
            .map_err(|err| Yt2Mp3Error::Config(format!("failed to write env file: {err}")))?;
        debug!(key, path = %self.path.display(), "env value written");
        Ok(true)
    }
}

fn line_defines(line: &str, key: &str) -> bool {
    let trimmed = line.trim_start();
    let trimmed = trimmed.strip_prefix("export ").unwrap_or(trimmed);
    trimmed
        .strip_prefix(key)
        .is_some_and(|rest| rest.trim_start().starts_with('='))
}

fn quote_value(value: &str) -> String {
    if !value.contains('\'') {
        return format!("'{value}'");
    }
    let mut escaped = String::with_capacity(value.len() + 2);
    for ch in value.chars() {
        if matches!(ch, '\\' | '"' | '$') {
            escaped.push('\\');
        }
        escaped.push(ch);
    }
    format!("\"{escaped}\"")
}

fn env_override(key: &str) -> Option<String> {
    env::var(key).ok().filter(|value| !value.trim().is_empty())
}

pub fn resolve_output_folder(config: &AppConfig) -> Option<PathBuf> {
    env_override(OUTPUT_FOLDER_KEY)
        .map(PathBuf::from)
        .or_else(|| config.output_folder.clone())
}

pub fn resolve_ffmpeg_location(config: &AppConfig) -> Option<PathBuf> {
    env_override(FFMPEG_LOCATION_KEY)
        .map(PathBuf::from)
        .or_else(|| config.ffmpeg_location.clone())
}

pub fn resolve_yt_dlp_path(config: &AppConfig) -> Option<String> {
    env_override(YT_DLP_PATH_KEY).or_else(|| config.yt_dlp_path.clone())
}
