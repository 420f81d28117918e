use yt2mp3_core::prompt::is_rejection;
use yt2mp3_core::{ConfirmedMetadata, MediaEntry, Prompt, Yt2Mp3Result};

/// Shows the detected title/artist and lets the operator keep or edit them.
///
/// Edited values are taken verbatim, empty strings included.
pub fn normalize<P: Prompt + ?Sized>(
    prompt: &mut P,
    entry: &MediaEntry,
) -> Yt2Mp3Result<ConfirmedMetadata> {
    println!("Detected Title:  {}", entry.title);
    println!("Detected Artist: {}", entry.uploader);

    let answer = prompt.ask("Are these properties correct? [Y/n]")?;
    if !is_rejection(&answer) {
        return Ok(ConfirmedMetadata::from(entry));
    }

    let title = prompt.ask_with_default("Edit Title", &entry.title)?;
    let artist = prompt.ask_with_default("Edit Artist", &entry.uploader)?;
    Ok(ConfirmedMetadata::new(title, artist))
}
