//! Segmented parallel fetch orchestrator.
//!
//! Negotiates source metadata, partitions the total length into contiguous
//! ranges, starts one eagerly-buffering ranged fetch per segment on a fixed
//! worker pool, and exposes the strictly-ordered concatenation as a single
//! validating stream.
//!
//! Failure policy: negotiation failures are fatal and returned from `open`
//! before any range fetch starts. A mid-transfer failure on one segment
//! surfaces as an I/O error the first time a read reaches that segment;
//! earlier, already-merged segments are unaffected. Nothing is retried.

pub mod pool;
mod progress;
mod segment;

pub use pool::WorkerPool;
pub use progress::{ProgressHandle, ProgressRecorder};

use crate::error::FetchError;
use crate::negotiate::negotiate;
use crate::probe::SourceDescriptor;
use crate::segmenter::plan_segments;
use crate::stream::{CloseRead, MergedReader, ReadAheadReader, ValidatingRead};
use std::io::{self, Read};

/// Tuning knobs for one fetch session.
#[derive(Debug, Clone, Default)]
pub struct FetchOptions {
    /// Number of segments to split the resource into. Defaults to the URL
    /// count; clamped so no segment is empty on tiny resources.
    pub segment_count: Option<usize>,
    /// Worker pool size. Defaults to the segment count.
    pub workers: Option<usize>,
}

/// A single ordered byte stream assembled from concurrent ranged fetches
/// against one or more equivalent source URLs.
pub struct ParallelGetReader {
    sources: Vec<SourceDescriptor>,
    merged: MergedReader<ReadAheadReader>,
    progress: ProgressHandle,
    content_length: u64,
    // Keeps the worker threads' queue open for the stream's lifetime.
    _pool: WorkerPool,
}

impl ParallelGetReader {
    /// Negotiate the sources and start every segment fetch.
    ///
    /// All segments begin fetching the moment this returns; reading merely
    /// drains what the background tasks buffer. Closing the stream early
    /// releases local resources but does not abort in-flight transfers.
    pub fn open(urls: &[String], options: &FetchOptions) -> Result<Self, FetchError> {
        if urls.is_empty() {
            return Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                "at least one URL is required",
            )
            .into());
        }

        let sources = negotiate(urls)?;
        let content_length = sources[0].content_length;

        let requested = options.segment_count.unwrap_or(urls.len()).max(1);
        let segment_count = requested.min(content_length.max(1) as usize).max(1);
        let segments = plan_segments(content_length, segment_count);

        let workers = options.workers.unwrap_or(segment_count).max(1);
        let pool = WorkerPool::new(workers);
        tracing::info!(
            content_length,
            segment_count = segments.len(),
            workers,
            "starting segmented fetch"
        );

        let mut readers = Vec::with_capacity(segments.len());
        let mut per_segment = Vec::with_capacity(segments.len());
        for (i, seg) in segments.iter().enumerate() {
            let source = &sources[i % sources.len()];
            let url = source.url.clone();
            let range = *seg;
            tracing::debug!(url = %url, start = range.start, end = range.end, "starting segment");
            let reader =
                ReadAheadReader::open(&pool, move |sink| segment::fetch_range(&url, &range, sink))?;
            per_segment.push(progress::SegmentProgress {
                url: source.url.clone(),
                expected: seg.len(),
                gauge: reader.gauge(),
            });
            readers.push(reader);
        }

        Ok(ParallelGetReader {
            sources,
            merged: MergedReader::new(readers),
            progress: ProgressHandle::new(per_segment),
            content_length,
            _pool: pool,
        })
    }

    /// Total size of the resource as negotiated across all sources.
    pub fn content_length(&self) -> u64 {
        self.content_length
    }

    /// Bytes yielded to the caller so far.
    pub fn bytes_read(&self) -> u64 {
        self.merged.bytes_read()
    }

    /// Negotiated descriptors, in input URL order.
    pub fn sources(&self) -> &[SourceDescriptor] {
        &self.sources
    }

    /// Cloneable handle for polling per-segment buffering progress from
    /// another thread while this stream is being read.
    pub fn progress_handle(&self) -> ProgressHandle {
        self.progress.clone()
    }

    /// Report per-segment buffering progress through `recorder`.
    pub fn report_progress(&self, recorder: &mut dyn ProgressRecorder) {
        self.progress.report(recorder);
    }
}

impl std::fmt::Debug for ParallelGetReader {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ParallelGetReader")
            .field("sources", &self.sources)
            .field("content_length", &self.content_length)
            .finish_non_exhaustive()
    }
}

impl Read for ParallelGetReader {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        self.merged.read(buf)
    }
}

impl ValidatingRead for ParallelGetReader {
    /// Byte-count validation: after full consumption, the total yielded
    /// must equal the negotiated content length. A shortfall is a
    /// warning-level signal, not an error; the bytes already read remain
    /// usable.
    fn collect_validation_errors(&self, errors: &mut Vec<String>) {
        if self.bytes_read() != self.content_length {
            errors.push(format!(
                "amount of read content did not match expected content length, \
                 data may be corrupted. Expected {}, read {}",
                self.content_length,
                self.bytes_read()
            ));
        }
    }
}

impl CloseRead for ParallelGetReader {
    fn close(&mut self) -> io::Result<()> {
        self.merged.close()
    }
}
