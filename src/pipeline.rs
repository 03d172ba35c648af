use std::path::PathBuf;

use log::{debug, info};

use crate::download::{FetchOutcome, Fetcher};
use crate::dto::TranscriptionRequest;
use crate::error::PipelineError;
use crate::whisper::transcriber::SegmentTranscriber;
use crate::workspace::WorkspaceSession;

/// Runs one request end to end: download, then transcribe.
#[derive(Clone)]
pub struct TranscriptionPipeline {
    fetcher: Fetcher,
    transcriber: SegmentTranscriber,
    workspace_root: Option<PathBuf>,
}

impl TranscriptionPipeline {
    pub fn new(fetcher: Fetcher, transcriber: SegmentTranscriber) -> Self {
        Self {
            fetcher,
            transcriber,
            workspace_root: None,
        }
    }

    /// Per-request workspaces are created under `root` instead of the
    /// system temp directory.
    pub fn with_workspace_root(mut self, root: Option<PathBuf>) -> Self {
        self.workspace_root = root;
        self
    }

    pub async fn run(&self, request: &TranscriptionRequest) -> Result<String, PipelineError> {
        // Dropped on every return path below, taking all request files with it.
        let workspace = WorkspaceSession::create(self.workspace_root.as_deref())?;

        let audio = match self.fetcher.fetch(&request.url, &workspace).await? {
            FetchOutcome::Saved(path) => path,
            FetchOutcome::Rejected(status) => {
                return Err(PipelineError::DownloadFailed {
                    url: request.url.clone(),
                    status,
                });
            }
        };

        debug!(
            "Starting transcription of {} (lang={}) in {}",
            request.url,
            request.lang,
            workspace.path().display()
        );
        let text = self
            .transcriber
            .transcribe(&audio, &request.lang, &workspace)
            .await?;

        info!("Finished {} ({} characters)", request.url, text.len());
        Ok(text)
    }
}
