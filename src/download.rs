use std::path::PathBuf;

use log::{debug, error};
use reqwest::StatusCode;

use crate::error::PipelineError;
use crate::workspace::WorkspaceSession;

#[derive(Debug, PartialEq, Eq)]
pub enum FetchOutcome {
    /// The body was written to this path.
    Saved(PathBuf),
    /// The server answered with something other than 200 OK.
    Rejected(StatusCode),
}

/// Downloads the source audio into a workspace.
#[derive(Clone, Debug)]
pub struct Fetcher {
    client: reqwest::Client,
}

impl Fetcher {
    pub fn new(client: reqwest::Client) -> Self {
        Self { client }
    }

    /// Issues a single GET for `url` and stores the whole body as
    /// `audio.mp3` in `workspace`.
    ///
    /// Only a 200 response counts as success; nothing is written otherwise.
    /// Connection, DNS, TLS and body read failures come back as
    /// [`PipelineError::Network`].
    pub async fn fetch(
        &self,
        url: &str,
        workspace: &WorkspaceSession,
    ) -> Result<FetchOutcome, PipelineError> {
        let network = |source| PipelineError::Network {
            url: url.to_string(),
            source,
        };
        let target = workspace.audio_path();
        debug!("Downloading {url} to {}", target.display());

        let response = self.client.get(url).send().await.map_err(network)?;
        let status = response.status();
        if status != StatusCode::OK {
            error!("Failed to download {url}, response status {status}");
            return Ok(FetchOutcome::Rejected(status));
        }

        let body = response.bytes().await.map_err(network)?;
        tokio::fs::write(&target, &body).await?;

        debug!("Downloaded {url} ({} bytes) to {}", body.len(), target.display());
        Ok(FetchOutcome::Saved(target))
    }
}
