pub mod buffer;
pub mod decoder;
pub mod segment;

pub use buffer::{AudioBuffer, AudioFrame};
pub use decoder::{AudioDecoder, AudioError, Mp3Decoder};
pub use segment::{MIN_SEGMENT_LENGTH_MS, SEGMENT_LENGTH_MS, SegmentSpan, plan_segments};
