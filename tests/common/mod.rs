#![allow(dead_code)]

use std::path::Path;
use std::sync::{Arc, Mutex};

use actix_web::{App, HttpServer, web};
use async_trait::async_trait;
use reqwest::StatusCode;

use mp3_transcribe::audio::{AudioBuffer, AudioDecoder, AudioError};
use mp3_transcribe::whisper::service::{ServiceError, SpeechRequest, SpeechToText};

/// Starts a throwaway server on an ephemeral port and returns its base URL.
pub fn spawn_server<F>(configure: F) -> String
where
    F: Fn(&mut web::ServiceConfig) + Clone + Send + 'static,
{
    let server = HttpServer::new(move || App::new().configure(configure.clone()))
        .workers(1)
        .bind(("127.0.0.1", 0))
        .expect("bind test server");
    let addr = server.addrs()[0];
    actix_web::rt::spawn(server.run());
    format!("http://{addr}")
}

/// Serves `body` at `/audio.mp3`; every other path is a 404.
pub fn spawn_audio_host(body: Vec<u8>) -> String {
    let body = web::Bytes::from(body);
    spawn_server(move |cfg| {
        let body = body.clone();
        cfg.route(
            "/audio.mp3",
            web::get().to(move || {
                let body = body.clone();
                async move {
                    actix_web::HttpResponse::Ok()
                        .content_type("audio/mpeg")
                        .body(body)
                }
            }),
        );
    })
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedCall {
    pub file_name: String,
    pub bytes: Vec<u8>,
    pub language: String,
    pub prompt: Option<String>,
}

/// In-process speech service that answers from a script.
#[derive(Clone, Default)]
pub struct FakeSpeech {
    replies: Arc<Mutex<Vec<Result<String, StatusCode>>>>,
    calls: Arc<Mutex<Vec<RecordedCall>>>,
}

impl FakeSpeech {
    /// Replies are handed out in call order. Running past the script is an
    /// error reply.
    pub fn scripted(replies: Vec<Result<&str, StatusCode>>) -> Self {
        let replies = replies
            .into_iter()
            .rev()
            .map(|r| r.map(str::to_string))
            .collect();
        Self {
            replies: Arc::new(Mutex::new(replies)),
            calls: Arc::default(),
        }
    }

    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl SpeechToText for FakeSpeech {
    async fn transcribe(&self, request: SpeechRequest<'_>) -> Result<String, ServiceError> {
        let bytes = std::fs::read(request.audio)?;
        self.calls.lock().unwrap().push(RecordedCall {
            file_name: request
                .audio
                .file_name()
                .unwrap()
                .to_string_lossy()
                .into_owned(),
            bytes,
            language: request.language.to_string(),
            prompt: request.prompt.map(str::to_string),
        });

        match self.replies.lock().unwrap().pop() {
            Some(Ok(text)) => Ok(text),
            Some(Err(status)) => Err(ServiceError::Api {
                status,
                body: "scripted failure".to_string(),
            }),
            None => Err(ServiceError::RequestFailed("no scripted reply".to_string())),
        }
    }
}

/// Decoder that ignores the audio and hands back a prepared buffer,
/// remembering the bytes it was given.
#[derive(Clone)]
pub struct FakeDecoder {
    buffer: AudioBuffer,
    seen: Arc<Mutex<Vec<Vec<u8>>>>,
}

impl FakeDecoder {
    pub fn new(buffer: AudioBuffer) -> Self {
        Self {
            buffer,
            seen: Arc::default(),
        }
    }

    pub fn seen(&self) -> Vec<Vec<u8>> {
        self.seen.lock().unwrap().clone()
    }
}

impl AudioDecoder for FakeDecoder {
    fn decode(&self, path: &Path) -> Result<AudioBuffer, AudioError> {
        self.seen.lock().unwrap().push(std::fs::read(path)?);
        Ok(self.buffer.clone())
    }
}

/// `minutes` one-minute frames at 1 kHz, each frame's payload naming its
/// minute (`m0`, `m1`, ...).
pub fn buffer_of_minutes(minutes: usize) -> AudioBuffer {
    let mut buffer = AudioBuffer::new(1000);
    for i in 0..minutes {
        buffer.push_frame(60_000, format!("m{i};").into_bytes());
    }
    buffer
}

/// Size of one MPEG-1 Layer III frame at 32 kbps / 32 kHz.
pub const MP3_FRAME_LEN: usize = 144;
/// Each such frame holds 1152 samples, i.e. exactly 36 ms.
pub const MP3_FRAME_MS: u64 = 36;

fn mp3_frame() -> Vec<u8> {
    let mut frame = vec![0u8; MP3_FRAME_LEN];
    // sync, MPEG-1, Layer III, no CRC
    frame[0] = 0xFF;
    frame[1] = 0xFB;
    // 32 kbps, 32 kHz, no padding
    frame[2] = 0x18;
    // mono
    frame[3] = 0xC0;
    frame
}

/// A lone `Info` header frame announcing zero audio frames, as encoders
/// write for an empty recording.
pub fn mp3_info_only() -> Vec<u8> {
    let mut frame = mp3_frame();
    // The tag sits right after the 17 bytes of mono MPEG-1 side info.
    let tag = 4 + 17;
    frame[tag..tag + 4].copy_from_slice(b"Info");
    // flags: frame count present
    frame[tag + 4..tag + 8].copy_from_slice(&1u32.to_be_bytes());
    frame[tag + 8..tag + 12].copy_from_slice(&0u32.to_be_bytes());
    frame
}

/// A silent mono MP3 stream of `count` frames.
pub fn mp3_frames(count: usize) -> Vec<u8> {
    let frame = mp3_frame();

    let mut out = Vec::with_capacity(count * MP3_FRAME_LEN);
    for _ in 0..count {
        out.extend_from_slice(&frame);
    }
    out
}
