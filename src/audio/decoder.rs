use std::fs::File;
use std::path::Path;

use log::{debug, warn};
use symphonia::core::errors::Error as SymphoniaError;
use symphonia::core::formats::FormatOptions;
use symphonia::core::io::MediaSourceStream;
use symphonia::core::meta::MetadataOptions;
use symphonia::core::probe::Hint;
use thiserror::Error;

use crate::audio::buffer::AudioBuffer;

#[derive(Debug, Error)]
pub enum AudioError {
    #[error("failed to open audio file: {0}")]
    Io(#[from] std::io::Error),

    #[error("unrecognised audio format: {0}")]
    Probe(String),

    #[error("no audio track found")]
    NoTrack,

    #[error("unknown sample rate")]
    UnknownSampleRate,

    #[error("failed to read packet: {0}")]
    Packet(String),
}

/// Turns a file on disk into an [`AudioBuffer`].
pub trait AudioDecoder: Send + Sync {
    fn decode(&self, path: &Path) -> Result<AudioBuffer, AudioError>;
}

/// Demuxes MP3 files into their frames with symphonia.
#[derive(Debug, Clone, Copy, Default)]
pub struct Mp3Decoder;

impl AudioDecoder for Mp3Decoder {
    fn decode(&self, path: &Path) -> Result<AudioBuffer, AudioError> {
        let file = File::open(path)?;
        let mss = MediaSourceStream::new(Box::new(file), Default::default());

        let mut hint = Hint::new();
        hint.with_extension("mp3");

        let probed = symphonia::default::get_probe()
            .format(
                &hint,
                mss,
                &FormatOptions::default(),
                &MetadataOptions::default(),
            )
            .map_err(|e| AudioError::Probe(e.to_string()))?;
        let mut format = probed.format;

        let track = format.default_track().ok_or(AudioError::NoTrack)?;
        let track_id = track.id;
        let sample_rate = track
            .codec_params
            .sample_rate
            .filter(|rate| *rate > 0)
            .ok_or(AudioError::UnknownSampleRate)?;

        let mut buffer = AudioBuffer::new(sample_rate);
        loop {
            let packet = match format.next_packet() {
                Ok(p) => p,
                Err(SymphoniaError::IoError(ref e))
                    if e.kind() == std::io::ErrorKind::UnexpectedEof =>
                {
                    break;
                }
                Err(SymphoniaError::DecodeError(e)) => {
                    warn!("Skipping unreadable frame in {}: {e}", path.display());
                    continue;
                }
                Err(e) => return Err(AudioError::Packet(e.to_string())),
            };

            if packet.track_id() != track_id {
                continue;
            }
            buffer.push_frame(packet.dur(), packet.buf().to_vec());
        }

        // Zero-length audio, not a decode failure.
        if buffer.is_empty() {
            debug!("{} holds no audio frames", path.display());
        }

        debug!(
            "Decoded {}: {} frames, {}Hz, {} ms",
            path.display(),
            buffer.frame_count(),
            sample_rate,
            buffer.duration_ms()
        );
        Ok(buffer)
    }
}
