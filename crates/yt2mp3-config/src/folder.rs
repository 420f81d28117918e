use std::fs;
use std::path::{Path, PathBuf};

use console::style;
use tracing::debug;
use yt2mp3_core::prompt::{is_rejection, require_non_empty};
use yt2mp3_core::{Prompt, Yt2Mp3Error, Yt2Mp3Result};

/// Trims pasted paths, drops surrounding quotes and expands a leading `~`.
pub fn clean_folder_input(raw: &str) -> String {
    let unquoted = raw.trim().trim_matches('"').trim_matches('\'');
    expand_home(unquoted)
}

fn expand_home(path: &str) -> String {
    let rest = match path.strip_prefix('~') {
        Some(rest) if rest.is_empty() || rest.starts_with('/') || rest.starts_with('\\') => rest,
        _ => return path.to_string(),
    };
    match dirs::home_dir() {
        Some(home) => home
            .join(rest.trim_start_matches(['/', '\\']))
            .display()
            .to_string(),
        None => path.to_string(),
    }
}

/// Returns `Ok(true)` once `path` is a usable directory, `Ok(false)` when the
/// operator declined to create it.
pub fn ensure_folder<P: Prompt + ?Sized>(prompt: &mut P, path: &Path) -> Yt2Mp3Result<bool> {
    if path.is_dir() {
        return Ok(true);
    }
    if path.exists() {
        return Err(Yt2Mp3Error::Filesystem(format!(
            "'{}' exists but is not a directory",
            path.display()
        )));
    }

    let answer = prompt.ask("Folder does not exist. Create it? [Y/n]")?;
    if is_rejection(&answer) {
        return Ok(false);
    }
    fs::create_dir_all(path)
        .map_err(|err| Yt2Mp3Error::Filesystem(format!("error creating folder: {err}")))?;
    debug!(path = %path.display(), "created output folder");
    Ok(true)
}

/// Startup flow: keep the stored folder unless the operator declines, then
/// ask until a usable directory is given.
pub fn choose_output_folder<P: Prompt + ?Sized>(
    prompt: &mut P,
    stored: Option<&Path>,
) -> Yt2Mp3Result<PathBuf> {
    if let Some(stored) = stored {
        let answer = prompt.ask(&format!(
            "Output folder path set to \"{}\". Continue? [Y/n]",
            stored.display()
        ))?;
        if !is_rejection(&answer) {
            return Ok(stored.to_path_buf());
        }
    }

    loop {
        let raw = prompt.ask("Enter output folder path")?;
        let cleaned = match require_non_empty(&clean_folder_input(&raw)) {
            Ok(cleaned) => cleaned,
            Err(Yt2Mp3Error::InvalidInput(msg)) => {
                eprintln!("{msg}");
                continue;
            }
            Err(err) => return Err(err),
        };

        let path = PathBuf::from(cleaned);
        match ensure_folder(prompt, &path) {
            Ok(true) => return Ok(path),
            Ok(false) => continue,
            Err(Yt2Mp3Error::Filesystem(msg)) => {
                eprintln!("{} {msg}", style("Error:").red());
            }
            Err(err) => return Err(err),
        }
    }
}
