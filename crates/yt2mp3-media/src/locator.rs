use std::fs;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

use tracing::{debug, warn};
use yt2mp3_core::{Resolution, ResolvedFile, TargetName};

use crate::download::AUDIO_CODEC;

/// Finds the file a download actually produced.
///
/// Order: the path the extractor reported, the exact expected path, then
/// the newest `.mp3` in the output folder whose name matches the target
/// after normalization or contains the entry id. Never fails; a miss comes
/// back as `Resolution::Unresolved`.
#[derive(Debug, Clone)]
pub struct FileLocator<'a> {
    pub output_folder: &'a Path,
    pub target: &'a TargetName,
    pub entry_id: &'a str,
    pub reported: Option<&'a Path>,
}

impl FileLocator<'_> {
    pub fn locate(&self, expected: &Path) -> ResolvedFile {
        if let Some(reported) = self.reported {
            if reported.is_file() {
                debug!(path = %reported.display(), "using reported output path");
                return ResolvedFile::found(reported.to_path_buf(), Resolution::Reported);
            }
            warn!(path = %reported.display(), "reported output path does not exist");
        }

        if expected.is_file() {
            return ResolvedFile::found(expected.to_path_buf(), Resolution::Exact);
        }

        match self.scan(expected) {
            Some(path) => {
                debug!(path = %path.display(), "resolved output by scan");
                ResolvedFile::found(path, Resolution::Scanned)
            }
            None => ResolvedFile::unresolved(expected.to_path_buf()),
        }
    }

    fn scan(&self, expected: &Path) -> Option<PathBuf> {
        let wanted = normalized_key(self.target.as_str());
        let mut folders = vec![self.output_folder];
        if let Some(parent) = expected.parent()
            && parent != self.output_folder
        {
            folders.push(parent);
        }

        folders
            .into_iter()
            .flat_map(|folder| self.candidates(folder, &wanted))
            .max_by_key(|(_, stamp)| *stamp)
            .map(|(path, _)| path)
    }

    fn candidates(&self, folder: &Path, wanted: &str) -> Vec<(PathBuf, SystemTime)> {
        let entries = match fs::read_dir(folder) {
            Ok(entries) => entries,
            Err(err) => {
                warn!(folder = %folder.display(), "cannot scan output folder: {err}");
                return Vec::new();
            }
        };

        entries
            .filter_map(Result::ok)
            .map(|entry| entry.path())
            .filter(|path| is_audio_file(path))
            .filter(|path| self.matches(path, wanted))
            .filter_map(|path| {
                let meta = fs::metadata(&path).ok()?;
                let stamp = meta
                    .created()
                    .or_else(|_| meta.modified())
                    .unwrap_or(SystemTime::UNIX_EPOCH);
                Some((path, stamp))
            })
            .collect()
    }

    fn matches(&self, path: &Path, wanted: &str) -> bool {
        let stem = path
            .file_stem()
            .map(|stem| stem.to_string_lossy())
            .unwrap_or_default();
        if !wanted.is_empty() && normalized_key(&stem) == wanted {
            return true;
        }
        !self.entry_id.is_empty()
            && path
                .file_name()
                .is_some_and(|name| name.to_string_lossy().contains(self.entry_id))
    }
}

fn is_audio_file(path: &Path) -> bool {
    path.is_file()
        && path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case(AUDIO_CODEC))
}

/// Lowercased alphanumerics only, so `Why? - Band` and `Why？ - Band` agree.
pub fn normalized_key(name: &str) -> String {
    name.chars()
        .filter(|ch| ch.is_alphanumeric())
        .flat_map(char::to_lowercase)
        .collect()
}
