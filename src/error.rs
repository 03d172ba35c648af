use reqwest::StatusCode;
use thiserror::Error;

use crate::audio::AudioError;
use crate::whisper::service::ServiceError;

/// Everything that can end a transcription request early.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("failed to download {url}: server responded with {status}")]
    DownloadFailed { url: String, status: StatusCode },

    #[error("network error while downloading {url}: {source}")]
    Network {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("failed to decode audio: {0}")]
    Decode(#[from] AudioError),

    #[error("transcription of segment {index} failed: {source}")]
    Transcription {
        index: usize,
        #[source]
        source: ServiceError,
    },

    #[error("decoder task failed: {0}")]
    Task(#[from] tokio::task::JoinError),

    #[error("workspace I/O failed: {0}")]
    Io(#[from] std::io::Error),
}

impl PipelineError {
    /// Only a refused download is reported to the caller with its own message.
    pub fn is_download_failure(&self) -> bool {
        matches!(self, PipelineError::DownloadFailed { .. })
    }
}
