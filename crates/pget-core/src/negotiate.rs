//! Resource negotiation: probe every candidate URL and enforce that they all
//! describe byte-identical content.
//!
//! Descriptors come back in input URL order. Any source that refuses range
//! requests, or disagrees with another source on `Content-Length` or
//! `Transfer-Encoding`, aborts the session before any range fetch starts.

use crate::error::FetchError;
use crate::probe::{self, SourceDescriptor};

/// Probe each URL in order and check cross-source compatibility.
pub fn negotiate(urls: &[String]) -> Result<Vec<SourceDescriptor>, FetchError> {
    let mut descriptors = Vec::with_capacity(urls.len());
    for url in urls {
        let descriptor = probe::probe(url)?;
        if !descriptor.accepts_ranges {
            return Err(FetchError::RangesNotSupported {
                url: descriptor.url,
            });
        }
        tracing::debug!(
            url = %descriptor.url,
            content_length = descriptor.content_length,
            "probed source"
        );
        descriptors.push(descriptor);
    }
    ensure_compatible(&descriptors)?;
    Ok(descriptors)
}

/// Pairwise compatibility: equal content length and transfer encoding.
fn ensure_compatible(descriptors: &[SourceDescriptor]) -> Result<(), FetchError> {
    for pair in descriptors.windows(2) {
        let (left, right) = (&pair[0], &pair[1]);
        if left.transfer_encoding != right.transfer_encoding {
            return Err(FetchError::IncompatibleResources {
                header: "Transfer-Encoding",
                left: left.url.clone(),
                right: right.url.clone(),
            });
        }
        if left.content_length != right.content_length {
            return Err(FetchError::IncompatibleResources {
                header: "Content-Length",
                left: left.url.clone(),
                right: right.url.clone(),
            });
        }
    }
    Ok(())
}
