//! Live progress introspection across threads.
//!
//! Each segment's buffered-bytes counter is an atomic shared with its
//! background task, so a [`ProgressHandle`] can be polled from any thread
//! (e.g. a once-per-second printer) while the download is being consumed.
//! Display-only; has no effect on engine behavior.

use crate::stream::BufferGauge;
use std::sync::Arc;

/// Callback for recording one progress line.
pub trait ProgressRecorder {
    /// `name` identifies the segment's source URL, `category` the kind of
    /// progress being reported (currently always `"Buffered"`).
    fn record(&mut self, name: &str, category: &str, total: u64, progress: u64);
}

impl<F> ProgressRecorder for F
where
    F: FnMut(&str, &str, u64, u64),
{
    fn record(&mut self, name: &str, category: &str, total: u64, progress: u64) {
        self(name, category, total, progress)
    }
}

pub(super) struct SegmentProgress {
    pub(super) url: String,
    pub(super) expected: u64,
    pub(super) gauge: BufferGauge,
}

/// Cloneable snapshot source for all segments of one fetch session.
#[derive(Clone)]
pub struct ProgressHandle {
    segments: Arc<Vec<SegmentProgress>>,
}

impl ProgressHandle {
    pub(super) fn new(segments: Vec<SegmentProgress>) -> Self {
        ProgressHandle {
            segments: Arc::new(segments),
        }
    }

    /// Invoke `recorder` once per segment with
    /// `(source_url, "Buffered", expected_length, buffered_so_far)`.
    pub fn report(&self, recorder: &mut dyn ProgressRecorder) {
        for segment in self.segments.iter() {
            recorder.record(
                &segment.url,
                "Buffered",
                segment.expected,
                segment.gauge.bytes(),
            );
        }
    }
}
