use yt2mp3_core::{ConfirmedMetadata, TargetName};

/// `"{title} - {artist}"`, unsanitized. The extractor decides what actually
/// lands on disk.
pub fn derive(meta: &ConfirmedMetadata) -> TargetName {
    TargetName::new(&meta.title, &meta.artist)
}
