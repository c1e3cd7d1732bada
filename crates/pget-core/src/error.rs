//! Engine error taxonomy.
//!
//! Negotiation and construction failures are fatal and returned before any
//! range fetch starts. Mid-transfer segment failures travel through
//! `std::io::Error` instead, so they surface from `Read::read` only when
//! consumption reaches the failed segment.

use std::io;
use thiserror::Error;

/// Fatal errors from negotiation, orchestration, or validator construction.
#[derive(Debug, Error)]
pub enum FetchError {
    /// Metadata probe returned something other than HTTP 200.
    #[error("HEAD {url} returned HTTP {status}, expected 200")]
    ProbeStatus { url: String, status: u32 },

    /// Metadata probe did not yield a usable `Content-Length`.
    #[error("HEAD {url} did not return a valid Content-Length")]
    ProbeContentLength { url: String },

    /// Source explicitly refused range requests (`Accept-Ranges: none`).
    #[error("resource does not allow range requests: {url}")]
    RangesNotSupported { url: String },

    /// Two sources disagree on a header that must match for them to serve
    /// byte-identical content.
    #[error("{header} for resources '{left}' and '{right}' did not match")]
    IncompatibleResources {
        header: &'static str,
        left: String,
        right: String,
    },

    /// Requested digest algorithm is not available.
    #[error("unsupported digest algorithm: {0}")]
    UnsupportedAlgorithm(String),

    /// Transport-level failure talking to a source during negotiation.
    #[error("request to {url} failed: {source}")]
    Transport {
        url: String,
        #[source]
        source: curl::Error,
    },

    #[error(transparent)]
    Io(#[from] io::Error),
}
