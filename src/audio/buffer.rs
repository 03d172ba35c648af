use crate::audio::segment::{SegmentSpan, plan_segments};

/// One MPEG audio frame: its raw bytes (header included) and its position
/// in samples.
#[derive(Debug, Clone)]
pub struct AudioFrame {
    pub ts: u64,
    pub dur: u64,
    pub data: Vec<u8>,
}

/// The downloaded audio as an ordered run of frames.
///
/// Slicing copies whole frames, so an exported segment is itself a playable
/// MP3 stream and never needs re-encoding.
#[derive(Debug, Clone)]
pub struct AudioBuffer {
    sample_rate: u32,
    frames: Vec<AudioFrame>,
    total_samples: u64,
}

impl AudioBuffer {
    pub fn new(sample_rate: u32) -> Self {
        Self {
            sample_rate,
            frames: Vec::new(),
            total_samples: 0,
        }
    }

    /// Appends a frame lasting `dur` samples right after the previous one.
    pub fn push_frame(&mut self, dur: u64, data: Vec<u8>) {
        self.frames.push(AudioFrame {
            ts: self.total_samples,
            dur,
            data,
        });
        self.total_samples += dur;
    }

    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    pub fn frame_count(&self) -> usize {
        self.frames.len()
    }

    pub fn frames(&self) -> &[AudioFrame] {
        &self.frames
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    /// Total duration, rounded up to the next millisecond.
    pub fn duration_ms(&self) -> u64 {
        if self.sample_rate == 0 {
            return 0;
        }
        (self.total_samples * 1000).div_ceil(u64::from(self.sample_rate))
    }

    pub fn segments(&self, segment_length_ms: u64) -> Vec<SegmentSpan> {
        plan_segments(self.duration_ms(), segment_length_ms)
    }

    /// Frames whose start time falls inside `span`.
    pub fn frames_in(&self, span: &SegmentSpan) -> &[AudioFrame] {
        let rate = u64::from(self.sample_rate);
        let first = self
            .frames
            .partition_point(|f| f.ts * 1000 < span.start_ms * rate);
        let last = self
            .frames
            .partition_point(|f| f.ts * 1000 < span.end_ms * rate);
        &self.frames[first..last]
    }

    /// Concatenated bytes of the frames in `span`, ready to be written as an
    /// `.mp3` file.
    pub fn slice(&self, span: &SegmentSpan) -> Vec<u8> {
        let frames = self.frames_in(span);
        let mut out = Vec::with_capacity(frames.iter().map(|f| f.data.len()).sum());
        for frame in frames {
            out.extend_from_slice(&frame.data);
        }
        out
    }
}
