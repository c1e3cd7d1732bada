//! The stream stack: read-ahead buffering, ordered merge, and validation.
//!
//! Everything here speaks `std::io::Read` in chunks. Components that own
//! releasable resources (spill files, wrapped streams) also implement
//! [`CloseRead`] so callers can close them explicitly and observe failures,
//! rather than relying on drop.

mod digest;
mod merge;
mod read_ahead;
mod validate;

pub use digest::{DigestAlgorithm, DigestReader};
pub use merge::MergedReader;
pub use read_ahead::{BufferGauge, ReadAheadReader, SpillWriter};
pub use validate::ValidatingRead;

use std::io;

/// A readable stream with an explicit, fallible close.
///
/// `close` releases the stream's resources and surfaces the first failure;
/// it must be safe to call at most once per stream (subsequent calls are
/// no-ops).
pub trait CloseRead: io::Read {
    fn close(&mut self) -> io::Result<()>;
}

/// Full capability of a composed download stream: readable, closeable, and
/// able to report validity after consumption. Blanket-implemented so callers
/// can box any layer of the stack.
pub trait ValidatingStream: ValidatingRead + CloseRead {}

impl<T: ValidatingRead + CloseRead> ValidatingStream for T {}
