mod entry;
mod error;
mod outcome;
pub mod prompt;

pub use entry::{ConfirmedMetadata, MediaEntry, TargetName};
pub use error::{Yt2Mp3Error, Yt2Mp3Result};
pub use outcome::{BatchSummary, DownloadOutcome, ItemReport, Resolution, ResolvedFile, TagOutcome};
pub use prompt::Prompt;

pub fn validate_url(url: &str) -> Yt2Mp3Result<()> {
    url::Url::parse(url)
        .map_err(|err| Yt2Mp3Error::Extraction(format!("invalid url: {err}")))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_url_valid() {
        assert!(validate_url("https://www.youtube.com/watch?v=dQw4w9WgXcQ").is_ok());
        assert!(validate_url("https://youtu.be/dQw4w9WgXcQ").is_ok());
    }

    #[test]
    fn test_validate_url_invalid() {
        let result = validate_url("not-a-url");
        match result {
            Err(Yt2Mp3Error::Extraction(msg)) => assert!(msg.contains("invalid url")),
            _ => panic!("Expected Extraction error"),
        }
    }

    #[test]
    fn target_name_joins_with_separator() {
        let name = TargetName::new("Song", "Band");
        assert_eq!(name.as_str(), "Song - Band");
    }

    #[test]
    fn target_name_keeps_special_characters() {
        let name = TargetName::new("Why? / Because", "AC:DC");
        assert_eq!(name.to_string(), "Why? / Because - AC:DC");
    }

    #[test]
    fn batch_summary_counts_by_kind() {
        let mut summary = BatchSummary::default();
        summary.record(&ItemReport::Tagged { path: "a.mp3".into() });
        summary.record(&ItemReport::DownloadFailed { reason: "boom".into() });
        summary.record(&ItemReport::Unresolved { expected: "c.mp3".into() });
        assert_eq!(
            summary,
            BatchSummary { total: 3, tagged: 1, warnings: 1, failed: 1 }
        );
    }
}
