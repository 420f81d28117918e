use thiserror::Error;

#[derive(Debug, Error)]
pub enum Yt2Mp3Error {
    #[error("invalid input: {0}")]
    InvalidInput(String),
    #[error("configuration error: {0}")]
    Config(String),
    #[error("filesystem error: {0}")]
    Filesystem(String),
    #[error("extraction error: {0}")]
    Extraction(String),
    #[error("tagging error: {0}")]
    Tagging(String),
    #[error("parse error: {0}")]
    Parse(String),
    #[error("prompt error: {0}")]
    Prompt(String),
}

pub type Yt2Mp3Result<T> = Result<T, Yt2Mp3Error>;
