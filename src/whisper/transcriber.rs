use std::path::Path;
use std::sync::Arc;

use log::{debug, info};

use crate::audio::AudioDecoder;
use crate::error::PipelineError;
use crate::whisper::config::WhisperConfig;
use crate::whisper::service::{SpeechRequest, SpeechToText};
use crate::workspace::WorkspaceSession;

/// Cuts audio into fixed windows and transcribes them one after another.
#[derive(Clone)]
pub struct SegmentTranscriber {
    decoder: Arc<dyn AudioDecoder>,
    service: Arc<dyn SpeechToText>,
    segment_length_ms: u64,
    carry_prompt: bool,
}

impl SegmentTranscriber {
    pub fn new(
        decoder: Arc<dyn AudioDecoder>,
        service: Arc<dyn SpeechToText>,
        segment_length_ms: u64,
    ) -> Self {
        Self {
            decoder,
            service,
            segment_length_ms,
            carry_prompt: false,
        }
    }

    pub fn from_config(
        decoder: Arc<dyn AudioDecoder>,
        service: Arc<dyn SpeechToText>,
        config: &WhisperConfig,
    ) -> Self {
        Self::new(decoder, service, config.segment_length_ms).with_carry_prompt(config.carry_prompt)
    }

    pub fn with_carry_prompt(mut self, carry_prompt: bool) -> Self {
        self.carry_prompt = carry_prompt;
        self
    }

    /// Transcribes the file at `audio` and writes the result to the
    /// workspace's transcript file.
    ///
    /// Segments are exported and sent strictly in order. The first failing
    /// segment aborts the run and no partial transcript is returned.
    pub async fn transcribe(
        &self,
        audio: &Path,
        lang: &str,
        workspace: &WorkspaceSession,
    ) -> Result<String, PipelineError> {
        debug!("Decoding {}", audio.display());
        let decoder = Arc::clone(&self.decoder);
        let path = audio.to_path_buf();
        let buffer = tokio::task::spawn_blocking(move || decoder.decode(&path)).await??;

        let spans = buffer.segments(self.segment_length_ms);
        debug!(
            "Split {} ms of audio into {} segments of up to {} ms",
            buffer.duration_ms(),
            spans.len(),
            self.segment_length_ms
        );

        let mut transcript = String::new();
        for span in &spans {
            let bytes = buffer.slice(span);
            if bytes.is_empty() {
                debug!(
                    "Segment {} ({}..{} ms) holds no frames, skipping",
                    span.index, span.start_ms, span.end_ms
                );
                continue;
            }

            let segment_path = workspace.segment_path(span.index);
            debug!(
                "Exporting segment {} ({}..{} ms, {} ms, {} bytes) to {}",
                span.index,
                span.start_ms,
                span.end_ms,
                span.duration_ms(),
                bytes.len(),
                segment_path.display()
            );
            tokio::fs::write(&segment_path, &bytes).await?;

            debug!("Transcribing segment {}", span.index);
            let prompt = (self.carry_prompt && !transcript.is_empty()).then_some(transcript.as_str());
            let text = self
                .service
                .transcribe(SpeechRequest {
                    audio: &segment_path,
                    language: lang,
                    prompt,
                })
                .await
                .map_err(|source| PipelineError::Transcription {
                    index: span.index,
                    source,
                })?;

            transcript.push_str(&text);
        }

        let transcript_path = workspace.transcript_path();
        tokio::fs::write(&transcript_path, &transcript).await?;
        info!(
            "Transcribed {} to {} ({} segments, {} characters)",
            audio.display(),
            transcript_path.display(),
            spans.len(),
            transcript.len()
        );

        Ok(transcript)
    }
}
