mod prompt;

use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use console::style;
use tracing::debug;
use tracing_subscriber::EnvFilter;
use yt2mp3_config::{
    DEFAULT_ENV_FILE, EnvFile, KNOWN_KEYS, OUTPUT_FOLDER_KEY, choose_output_folder,
    resolve_ffmpeg_location, resolve_output_folder, resolve_yt_dlp_path,
};
use yt2mp3_core::prompt::ask_non_empty;
use yt2mp3_core::{BatchSummary, MediaEntry, Prompt, Yt2Mp3Result};
use yt2mp3_media::{BatchDriver, LoftyTagger, MediaSource, ProbeResult, TagWriter, YtDlpClient};
use yt2mp3_url::{YoutubeLink, classify, normalize_link};

use crate::prompt::TerminalPrompt;

#[derive(Subcommand, Debug)]
enum Commands {
    /// Manage the .env configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand, Debug)]
enum ConfigAction {
    /// Get a configuration value
    Get { key: String },
    /// Set a configuration value
    Set { key: String, value: String },
    /// List known configuration values
    List,
}

#[derive(Debug, Parser)]
#[command(name = "yt2mp3")]
#[command(version, about = "YouTube to MP3 downloader with tag correction", long_about = None)]
struct Cli {
    /// Config file holding OUTPUT_FOLDER
    #[arg(long, value_name = "PATH")]
    env_file: Option<PathBuf>,
    /// yt-dlp binary to run
    #[arg(long = "yt-dlp", value_name = "BIN")]
    yt_dlp: Option<String>,
    /// Directory containing ffmpeg/ffprobe
    #[arg(long, value_name = "PATH")]
    ffmpeg_location: Option<PathBuf>,
    #[command(subcommand)]
    command: Option<Commands>,
}

fn main() {
    init_tracing();
    let cli = Cli::parse();
    let env_file = EnvFile::new(
        cli.env_file
            .clone()
            .unwrap_or_else(|| PathBuf::from(DEFAULT_ENV_FILE)),
    );

    if let Some(Commands::Config { action }) = cli.command {
        if let Err(err) = handle_config_command(&env_file, action) {
            eprintln!("{} {err}", style("Error:").red());
            std::process::exit(1);
        }
        return;
    }

    let config = match env_file.load() {
        Ok(config) => config,
        Err(err) => {
            eprintln!("{} {err}", style("Error:").red());
            std::process::exit(1);
        }
    };

    println!("===== YouTube to MP3 Downloader CLI =====\n");

    let mut prompt = TerminalPrompt::new();
    let stored = resolve_output_folder(&config);
    let output_folder = match choose_output_folder(&mut prompt, stored.as_deref()) {
        Ok(folder) => folder,
        Err(err) => {
            eprintln!("{} {err}", style("Error:").red());
            std::process::exit(1);
        }
    };

    if let Err(err) = env_file.set(OUTPUT_FOLDER_KEY, &output_folder.display().to_string()) {
        eprintln!("{} {err}", style("Warning:").yellow());
    }

    let client = YtDlpClient::new(
        cli.yt_dlp.or_else(|| resolve_yt_dlp_path(&config)),
        cli.ffmpeg_location
            .or_else(|| resolve_ffmpeg_location(&config)),
    );
    run_session(&client, &LoftyTagger, &mut prompt, &output_folder);
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

/// Link prompt loop. Returns only when input is closed.
fn run_session<S, T, P>(source: &S, tagger: &T, prompt: &mut P, output_folder: &Path)
where
    S: MediaSource + ?Sized,
    T: TagWriter + ?Sized,
    P: Prompt + ?Sized,
{
    loop {
        let url = match ask_non_empty(prompt, "Enter YouTube video or playlist link") {
            Ok(url) => url,
            Err(err) => {
                debug!("leaving session: {err}");
                return;
            }
        };

        let items = match fetch_items(source, &url) {
            Ok(items) => items,
            Err(err) => {
                eprintln!("\n{} Critical Error: {err}", style("❌").red());
                eprintln!("Ensure the link is valid and yt-dlp is up to date.");
                continue;
            }
        };

        let summary = BatchDriver::new(source, tagger, &mut *prompt).process(&items, output_folder);
        print_summary(&summary);
    }
}

fn fetch_items<S: MediaSource + ?Sized>(source: &S, url: &str) -> Yt2Mp3Result<Vec<MediaEntry>> {
    println!("\n🔍 Fetching information... please wait.");
    if let Some(YoutubeLink::VideoInPlaylist { list, .. }) = classify(&normalize_link(url)) {
        println!(
            "{} Link is part of playlist {list}; every video in it will be processed.",
            style("Note:").cyan()
        );
    }

    let result = source.probe(url)?;
    if let ProbeResult::Playlist { title, entries } = &result {
        println!("\n📋 Playlist detected: {title}");
        println!("Found {} videos.\n", entries.len());
    }
    Ok(result.into_entries())
}

fn handle_config_command(env_file: &EnvFile, action: ConfigAction) -> Yt2Mp3Result<()> {
    match action {
        ConfigAction::Get { key } => {
            match env_file.get(&key)? {
                Some(value) => println!("{key} = {value}"),
                None => println!("{key} = <null>"),
            }
            Ok(())
        }
        ConfigAction::Set { key, value } => {
            env_file.set(&key, &value)?;
            println!("{} Set {} = {}", style("✓").green(), key, value);
            Ok(())
        }
        ConfigAction::List => {
            let config = env_file.load()?;
            println!("Current configuration ({}):", env_file.path().display());
            for key in KNOWN_KEYS {
                println!(
                    "{key} = {}",
                    config.get(key).as_deref().unwrap_or("<null>")
                );
            }
            Ok(())
        }
    }
}

fn print_summary(summary: &BatchSummary) {
    println!(
        "{} Total: {} | Tagged: {} | Warnings: {} | Failed: {}",
        style("Summary:").bold(),
        summary.total,
        summary.tagged,
        summary.warnings,
        summary.failed
    );
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::fs;

    use super::*;
    use yt2mp3_core::prompt::ScriptedPrompt;
    use yt2mp3_core::{DownloadOutcome, TagOutcome, Yt2Mp3Error};
    use yt2mp3_media::DownloadRequest;

    struct ScriptedSource {
        probes: RefCell<Vec<Yt2Mp3Result<ProbeResult>>>,
        downloads: RefCell<Vec<DownloadRequest>>,
    }

    impl MediaSource for ScriptedSource {
        fn probe(&self, _url: &str) -> Yt2Mp3Result<ProbeResult> {
            self.probes.borrow_mut().remove(0)
        }

        fn download(&self, request: &DownloadRequest) -> DownloadOutcome {
            fs::write(request.expected_path(), b"audio").unwrap();
            self.downloads.borrow_mut().push(request.clone());
            DownloadOutcome::Success { reported_path: None }
        }
    }

    struct NoopTagger;

    impl TagWriter for NoopTagger {
        fn write_tags(&self, _path: &Path, _title: &str, _artist: &str) -> TagOutcome {
            TagOutcome::Tagged
        }
    }

    fn entry(id: &str, title: &str) -> MediaEntry {
        MediaEntry {
            id: id.to_string(),
            url: format!("https://www.youtube.com/watch?v={id}"),
            title: title.to_string(),
            uploader: "Band".to_string(),
        }
    }

    #[test]
    fn cli_parses_config_subcommand() {
        let cli = Cli::parse_from(["yt2mp3", "config", "set", "OUTPUT_FOLDER", "/music"]);
        assert!(matches!(
            cli.command,
            Some(Commands::Config {
                action: ConfigAction::Set { .. }
            })
        ));
    }

    #[test]
    fn cli_parses_binary_overrides() {
        let cli = Cli::parse_from([
            "yt2mp3",
            "--yt-dlp",
            "/opt/yt-dlp",
            "--ffmpeg-location",
            "/opt/ffmpeg",
        ]);
        assert_eq!(cli.yt_dlp.as_deref(), Some("/opt/yt-dlp"));
        assert_eq!(cli.ffmpeg_location, Some(PathBuf::from("/opt/ffmpeg")));
        assert!(cli.command.is_none());
    }

    #[test]
    fn session_survives_critical_fetch_error_and_ends_on_closed_input() {
        let dir = tempfile::tempdir().unwrap();
        let source = ScriptedSource {
            probes: RefCell::new(vec![
                Err(Yt2Mp3Error::Extraction("Unsupported URL".to_string())),
                Ok(ProbeResult::Playlist {
                    title: "Mix".to_string(),
                    entries: vec![entry("aaaaaaaaaaa", "One"), entry("bbbbbbbbbbb", "Two")],
                }),
            ]),
            downloads: RefCell::new(Vec::new()),
        };
        let mut prompt = ScriptedPrompt::new([
            "https://example.com/nothing",
            "",
            "https://www.youtube.com/playlist?list=PL123",
            "y",
            "y",
        ]);

        run_session(&source, &NoopTagger, &mut prompt, dir.path());

        let stems: Vec<String> = source
            .downloads
            .borrow()
            .iter()
            .map(|request| request.stem.clone())
            .collect();
        assert_eq!(stems, ["One - Band", "Two - Band"]);
        assert_eq!(prompt.remaining(), 0);
    }

    #[test]
    fn config_set_then_get_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let env_file = EnvFile::new(dir.path().join(".env"));
        handle_config_command(
            &env_file,
            ConfigAction::Set {
                key: OUTPUT_FOLDER_KEY.to_string(),
                value: "/music".to_string(),
            },
        )
        .unwrap();
        assert_eq!(env_file.get(OUTPUT_FOLDER_KEY).unwrap().as_deref(), Some("/music"));
        handle_config_command(&env_file, ConfigAction::List).unwrap();
    }
}
