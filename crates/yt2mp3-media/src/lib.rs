pub mod api;
pub mod download;
pub mod locator;
pub mod metadata;
pub mod naming;
pub mod pipeline;
pub mod source;
pub mod tagger;

pub use api::ytdlp::YtDlpClient;
pub use download::DownloadRequest;
pub use locator::FileLocator;
pub use pipeline::BatchDriver;
pub use source::{MediaSource, ProbeResult};
pub use tagger::{LoftyTagger, TagWriter};
