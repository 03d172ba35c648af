use std::path::Path;

use async_trait::async_trait;
use log::debug;
use reqwest::StatusCode;
use reqwest::multipart;
use thiserror::Error;

use crate::whisper::config::WhisperConfig;

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("failed to read segment file: {0}")]
    Io(#[from] std::io::Error),

    #[error("request failed: {0}")]
    RequestFailed(String),

    #[error("service responded with {status}: {body}")]
    Api { status: StatusCode, body: String },
}

/// One segment to transcribe.
#[derive(Debug, Clone, Copy)]
pub struct SpeechRequest<'a> {
    pub audio: &'a Path,
    pub language: &'a str,
    pub prompt: Option<&'a str>,
}

/// A speech-to-text backend.
#[async_trait]
pub trait SpeechToText: Send + Sync {
    /// Returns the plain-text transcription of `request.audio`.
    async fn transcribe(&self, request: SpeechRequest<'_>) -> Result<String, ServiceError>;
}

/// OpenAI-compatible `/audio/transcriptions` client.
pub struct OpenAiWhisper {
    client: reqwest::Client,
    api_key: String,
    base_url: String,
    model: String,
}

impl OpenAiWhisper {
    pub fn new(client: reqwest::Client, config: &WhisperConfig) -> Self {
        Self {
            client,
            api_key: config.api_key.clone(),
            base_url: config.base_url.clone(),
            model: config.model.clone(),
        }
    }

    fn endpoint(&self) -> String {
        format!("{}/audio/transcriptions", self.base_url)
    }
}

#[async_trait]
impl SpeechToText for OpenAiWhisper {
    async fn transcribe(&self, request: SpeechRequest<'_>) -> Result<String, ServiceError> {
        let bytes = tokio::fs::read(request.audio).await?;
        let file_name = request
            .audio
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "audio.mp3".to_string());

        let file_part = multipart::Part::bytes(bytes)
            .file_name(file_name)
            .mime_str("audio/mpeg")
            .map_err(|e| ServiceError::RequestFailed(format!("mime: {e}")))?;

        let mut form = multipart::Form::new()
            .part("file", file_part)
            .text("model", self.model.clone())
            .text("language", request.language.to_string())
            .text("response_format", "text");
        if let Some(prompt) = request.prompt {
            form = form.text("prompt", prompt.to_string());
        }

        debug!(
            "Sending {} to {} (model={}, language={})",
            request.audio.display(),
            self.endpoint(),
            self.model,
            request.language
        );

        let response = self
            .client
            .post(self.endpoint())
            .bearer_auth(&self.api_key)
            .multipart(form)
            .send()
            .await
            .map_err(|e| ServiceError::RequestFailed(e.to_string()))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| ServiceError::RequestFailed(format!("body: {e}")))?;

        if !status.is_success() {
            return Err(ServiceError::Api { status, body });
        }

        Ok(body)
    }
}
