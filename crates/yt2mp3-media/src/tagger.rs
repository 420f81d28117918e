use std::path::Path;

use lofty::config::WriteOptions;
use lofty::file::{AudioFile, TaggedFileExt};
use lofty::prelude::Accessor;
use lofty::read_from_path;
use lofty::tag::Tag;
use tracing::debug;
use yt2mp3_core::{TagOutcome, Yt2Mp3Error, Yt2Mp3Result};

pub trait TagWriter {
    fn write_tags(&self, path: &Path, title: &str, artist: &str) -> TagOutcome;
}

/// Writes Title/Artist into the file's primary tag (ID3v2 for MP3), in place.
#[derive(Debug, Clone, Copy, Default)]
pub struct LoftyTagger;

impl LoftyTagger {
    fn try_write(path: &Path, title: &str, artist: &str) -> Yt2Mp3Result<()> {
        let mut tagged_file = read_from_path(path)
            .map_err(|err| Yt2Mp3Error::Tagging(format!("failed to read tags: {err}")))?;
        let tag_type = tagged_file.primary_tag_type();
        if tagged_file.tag(tag_type).is_none() {
            debug!(path = %path.display(), ?tag_type, "inserting empty tag");
            tagged_file.insert_tag(Tag::new(tag_type));
        }

        let tag = tagged_file.tag_mut(tag_type).ok_or_else(|| {
            Yt2Mp3Error::Tagging(format!("no writable tag available for {tag_type:?}"))
        })?;
        tag.set_title(title.to_string());
        tag.set_artist(artist.to_string());

        tagged_file
            .save_to_path(path, WriteOptions::default())
            .map_err(|err| Yt2Mp3Error::Tagging(format!("failed to write tags: {err}")))
    }
}

impl TagWriter for LoftyTagger {
    fn write_tags(&self, path: &Path, title: &str, artist: &str) -> TagOutcome {
        match Self::try_write(path, title, artist) {
            Ok(()) => TagOutcome::Tagged,
            Err(err) => TagOutcome::Failed(err.to_string()),
        }
    }
}
