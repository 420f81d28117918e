use std::path::Path;

use console::style;
use tracing::{debug, warn};
use yt2mp3_core::{
    BatchSummary, DownloadOutcome, ItemReport, MediaEntry, Prompt, TagOutcome, Yt2Mp3Result,
};

use crate::download::{DownloadRequest, download};
use crate::locator::FileLocator;
use crate::metadata::normalize;
use crate::naming::derive;
use crate::source::MediaSource;
use crate::tagger::TagWriter;

/// Runs entries through normalize → derive → download → locate → tag, one
/// at a time. A failing entry is reported and the next one still runs.
pub struct BatchDriver<'a, S: ?Sized, T: ?Sized, P: ?Sized> {
    source: &'a S,
    tagger: &'a T,
    prompt: &'a mut P,
}

impl<'a, S, T, P> BatchDriver<'a, S, T, P>
where
    S: MediaSource + ?Sized,
    T: TagWriter + ?Sized,
    P: Prompt + ?Sized,
{
    pub fn new(source: &'a S, tagger: &'a T, prompt: &'a mut P) -> Self {
        Self {
            source,
            tagger,
            prompt,
        }
    }

    pub fn process(&mut self, items: &[MediaEntry], output_folder: &Path) -> BatchSummary {
        let mut summary = BatchSummary::default();
        for entry in items {
            let report = self.process_item(entry, output_folder);
            debug!(id = %entry.id, ?report, "item finished");
            summary.record(&report);
        }
        summary
    }

    pub fn process_item(&mut self, entry: &MediaEntry, output_folder: &Path) -> ItemReport {
        match self.run_item(entry, output_folder) {
            Ok(report) => report,
            Err(err) => {
                eprintln!("{} Error processing {}: {err}", style("❌").red(), entry.title);
                ItemReport::Aborted {
                    reason: err.to_string(),
                }
            }
        }
    }

    fn run_item(&mut self, entry: &MediaEntry, output_folder: &Path) -> Yt2Mp3Result<ItemReport> {
        let meta = normalize(&mut *self.prompt, entry)?;
        let target = derive(&meta);

        println!("⬇️  Downloading '{target}'...");
        let reported = match download(self.source, &entry.url, &target, output_folder) {
            DownloadOutcome::Success { reported_path } => reported_path,
            DownloadOutcome::Failure(reason) => {
                eprintln!(
                    "{} Error downloading {}: {reason}",
                    style("❌").red(),
                    entry.title
                );
                return Ok(ItemReport::DownloadFailed { reason });
            }
        };

        let expected = DownloadRequest::new(&entry.url, &target, output_folder).expected_path();
        let resolved = FileLocator {
            output_folder,
            target: &target,
            entry_id: &entry.id,
            reported: reported.as_deref(),
        }
        .locate(&expected);

        if !resolved.exists {
            warn!(expected = %expected.display(), "downloaded file not found");
            println!(
                "{}  File downloaded but path not found for tagging: {}",
                style("⚠️").yellow(),
                expected.display()
            );
            return Ok(ItemReport::Unresolved { expected });
        }

        match self
            .tagger
            .write_tags(&resolved.path, &meta.title, &meta.artist)
        {
            TagOutcome::Tagged => {
                println!(
                    "{} Downloaded '{}' by '{}'\n",
                    style("✅").green(),
                    meta.title,
                    meta.artist
                );
                Ok(ItemReport::Tagged {
                    path: resolved.path,
                })
            }
            TagOutcome::Failed(reason) => {
                println!("{} Could not tag file: {reason}", style("⚠️").yellow());
                Ok(ItemReport::TagFailed {
                    path: resolved.path,
                    reason,
                })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::collections::HashSet;
    use std::fs;
    use std::path::PathBuf;

    use super::*;
    use crate::source::ProbeResult;
    use yt2mp3_core::prompt::ScriptedPrompt;
    use yt2mp3_core::{Yt2Mp3Error, Yt2Mp3Result};

    /// Writes an empty `.mp3` where the extractor would, optionally under a
    /// sanitized name it then reports.
    #[derive(Default)]
    struct FakeSource {
        failing_urls: HashSet<String>,
        sanitize: bool,
        requests: RefCell<Vec<DownloadRequest>>,
    }

    impl MediaSource for FakeSource {
        fn probe(&self, _url: &str) -> Yt2Mp3Result<ProbeResult> {
            Err(Yt2Mp3Error::Extraction("probe not scripted".to_string()))
        }

        fn download(&self, request: &DownloadRequest) -> DownloadOutcome {
            self.requests.borrow_mut().push(request.clone());
            if self.failing_urls.contains(&request.url) {
                return DownloadOutcome::Failure("HTTP Error 403: Forbidden".to_string());
            }
            let path = if self.sanitize {
                let stem = request.stem.replace('?', "？").replace('/', "⧸");
                request.output_folder.join(format!("{stem}.mp3"))
            } else {
                request.expected_path()
            };
            fs::write(&path, b"audio").unwrap();
            DownloadOutcome::Success {
                reported_path: self.sanitize.then_some(path),
            }
        }
    }

    #[derive(Default)]
    struct RecordingTagger {
        fail: bool,
        calls: RefCell<Vec<(PathBuf, String, String)>>,
    }

    impl TagWriter for RecordingTagger {
        fn write_tags(&self, path: &Path, title: &str, artist: &str) -> TagOutcome {
            self.calls
                .borrow_mut()
                .push((path.to_path_buf(), title.to_string(), artist.to_string()));
            if self.fail {
                TagOutcome::Failed("unsupported format".to_string())
            } else {
                TagOutcome::Tagged
            }
        }
    }

    fn entry(id: &str, title: &str, uploader: &str) -> MediaEntry {
        MediaEntry {
            id: id.to_string(),
            url: format!("https://www.youtube.com/watch?v={id}"),
            title: title.to_string(),
            uploader: uploader.to_string(),
        }
    }

    #[test]
    fn single_video_confirmed_as_detected() {
        let dir = tempfile::tempdir().unwrap();
        let source = FakeSource::default();
        let tagger = RecordingTagger::default();
        let mut prompt = ScriptedPrompt::new(["y"]);

        let summary = BatchDriver::new(&source, &tagger, &mut prompt)
            .process(&[entry("aaaaaaaaaaa", "Song", "Band")], dir.path());

        let requests = source.requests.borrow();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].stem, "Song - Band");
        assert_eq!(
            requests[0].expected_path().file_name().unwrap(),
            "Song - Band.mp3"
        );
        assert_eq!(
            *tagger.calls.borrow(),
            vec![(
                dir.path().join("Song - Band.mp3"),
                "Song".to_string(),
                "Band".to_string()
            )]
        );
        assert_eq!(summary, BatchSummary { total: 1, tagged: 1, warnings: 0, failed: 0 });
    }

    #[test]
    fn edited_metadata_drives_name_and_tags() {
        let dir = tempfile::tempdir().unwrap();
        let source = FakeSource::default();
        let tagger = RecordingTagger::default();
        let mut prompt = ScriptedPrompt::new(["n", "Real Title", "Real Artist"]);

        BatchDriver::new(&source, &tagger, &mut prompt).process(
            &[entry("aaaaaaaaaaa", "Real Title (Official Video)", "LabelVEVO")],
            dir.path(),
        );

        assert_eq!(source.requests.borrow()[0].stem, "Real Title - Real Artist");
        let calls = tagger.calls.borrow();
        assert_eq!(calls[0].1, "Real Title");
        assert_eq!(calls[0].2, "Real Artist");
    }

    #[test]
    fn failed_download_does_not_stop_the_playlist() {
        let dir = tempfile::tempdir().unwrap();
        let items = [
            entry("aaaaaaaaaaa", "One", "Band"),
            entry("bbbbbbbbbbb", "Two", "Band"),
            entry("ccccccccccc", "Three", "Band"),
        ];
        let source = FakeSource {
            failing_urls: HashSet::from([items[1].url.clone()]),
            ..FakeSource::default()
        };
        let tagger = RecordingTagger::default();
        let mut prompt = ScriptedPrompt::new(["", "", ""]);

        let summary = BatchDriver::new(&source, &tagger, &mut prompt).process(&items, dir.path());

        let stems: Vec<String> = source
            .requests
            .borrow()
            .iter()
            .map(|request| request.stem.clone())
            .collect();
        assert_eq!(stems, ["One - Band", "Two - Band", "Three - Band"]);
        let tagged: Vec<String> = tagger
            .calls
            .borrow()
            .iter()
            .map(|(_, title, _)| title.clone())
            .collect();
        assert_eq!(tagged, ["One", "Three"]);
        assert_eq!(summary.failed, 1);
        assert_eq!(summary.tagged, 2);
        assert_eq!(summary.total, 3);
    }

    #[test]
    fn sanitized_output_is_tagged_at_reported_path() {
        let dir = tempfile::tempdir().unwrap();
        let source = FakeSource {
            sanitize: true,
            ..FakeSource::default()
        };
        let tagger = RecordingTagger::default();
        let mut prompt = ScriptedPrompt::new(["y"]);

        let summary = BatchDriver::new(&source, &tagger, &mut prompt)
            .process(&[entry("aaaaaaaaaaa", "Why?", "Band")], dir.path());

        assert_eq!(tagger.calls.borrow()[0].0, dir.path().join("Why？ - Band.mp3"));
        assert_eq!(summary.tagged, 1);
    }

    #[test]
    fn tag_failure_keeps_file_and_counts_as_warning() {
        let dir = tempfile::tempdir().unwrap();
        let source = FakeSource::default();
        let tagger = RecordingTagger {
            fail: true,
            ..RecordingTagger::default()
        };
        let mut prompt = ScriptedPrompt::new(["y"]);

        let report = BatchDriver::new(&source, &tagger, &mut prompt)
            .process_item(&entry("aaaaaaaaaaa", "Song", "Band"), dir.path());

        let path = dir.path().join("Song - Band.mp3");
        assert!(path.exists());
        assert_eq!(
            report,
            ItemReport::TagFailed {
                path,
                reason: "unsupported format".to_string()
            }
        );
    }

    #[test]
    fn prompt_failure_aborts_only_that_item() {
        let dir = tempfile::tempdir().unwrap();
        let source = FakeSource::default();
        let tagger = RecordingTagger::default();
        let mut prompt = ScriptedPrompt::new(["y"]);

        let summary = BatchDriver::new(&source, &tagger, &mut prompt).process(
            &[
                entry("aaaaaaaaaaa", "One", "Band"),
                entry("bbbbbbbbbbb", "Two", "Band"),
            ],
            dir.path(),
        );

        assert_eq!(source.requests.borrow().len(), 1);
        assert_eq!(summary, BatchSummary { total: 2, tagged: 1, warnings: 0, failed: 1 });
    }
}
