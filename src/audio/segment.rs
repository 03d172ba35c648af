/// Default segment length: ten minutes.
pub const SEGMENT_LENGTH_MS: u64 = 10 * 60 * 1000;

/// Shortest accepted segment length. The longest MP3 frame (576 samples at
/// 8 kHz) lasts 72 ms, so every window but the last holds at least one frame.
pub const MIN_SEGMENT_LENGTH_MS: u64 = 100;

/// A window of the source audio, in milliseconds. `end_ms` is exclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SegmentSpan {
    pub index: usize,
    pub start_ms: u64,
    pub end_ms: u64,
}

impl SegmentSpan {
    pub fn duration_ms(&self) -> u64 {
        self.end_ms - self.start_ms
    }
}

/// Splits `duration_ms` into consecutive windows of `segment_length_ms`.
///
/// The last window holds the remainder. A duration that is an exact multiple
/// of the segment length produces no trailing zero-length window, so the
/// result always has `ceil(duration / length)` entries.
pub fn plan_segments(duration_ms: u64, segment_length_ms: u64) -> Vec<SegmentSpan> {
    if duration_ms == 0 || segment_length_ms == 0 {
        return Vec::new();
    }

    let count = duration_ms.div_ceil(segment_length_ms);
    (0..count)
        .map(|i| {
            let start_ms = i * segment_length_ms;
            SegmentSpan {
                index: i as usize,
                start_ms,
                end_ms: (start_ms + segment_length_ms).min(duration_ms),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const MINUTE: u64 = 60 * 1000;

    #[test]
    fn twenty_five_minutes_gives_ten_ten_five() {
        let spans = plan_segments(25 * MINUTE, SEGMENT_LENGTH_MS);

        let durations: Vec<u64> = spans.iter().map(SegmentSpan::duration_ms).collect();
        assert_eq!(durations, vec![10 * MINUTE, 10 * MINUTE, 5 * MINUTE]);
        assert_eq!(spans[2].start_ms, 20 * MINUTE);
        assert_eq!(spans[2].end_ms, 25 * MINUTE);
    }

    #[test]
    fn exact_multiple_has_no_empty_tail() {
        let spans = plan_segments(20 * MINUTE, SEGMENT_LENGTH_MS);

        assert_eq!(spans.len(), 2);
        assert!(spans.iter().all(|s| s.duration_ms() == SEGMENT_LENGTH_MS));
    }

    #[test]
    fn short_audio_is_one_segment() {
        let spans = plan_segments(1_500, SEGMENT_LENGTH_MS);

        assert_eq!(
            spans,
            vec![SegmentSpan {
                index: 0,
                start_ms: 0,
                end_ms: 1_500
            }]
        );
    }

    #[test]
    fn empty_audio_has_no_segments() {
        assert!(plan_segments(0, SEGMENT_LENGTH_MS).is_empty());
    }

    #[test]
    fn spans_are_contiguous_and_cover_everything() {
        let duration = 3 * SEGMENT_LENGTH_MS + 1;
        let spans = plan_segments(duration, SEGMENT_LENGTH_MS);

        assert_eq!(spans.len(), 4);
        assert_eq!(spans.first().map(|s| s.start_ms), Some(0));
        assert_eq!(spans.last().map(|s| s.end_ms), Some(duration));
        for (i, pair) in spans.windows(2).enumerate() {
            assert_eq!(pair[0].end_ms, pair[1].start_ms);
            assert_eq!(pair[0].index, i);
        }
        assert_eq!(spans[3].duration_ms(), 1);
    }
}
