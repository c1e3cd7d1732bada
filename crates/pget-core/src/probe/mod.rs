//! HTTP HEAD / metadata probing.
//!
//! Uses the curl crate (libcurl) to fetch response headers for one candidate
//! URL and build a [`SourceDescriptor`]: `Content-Length`,
//! `Transfer-Encoding`, and whether the source accepts range requests.

mod parse;

pub(crate) use parse::parse_headers;

use crate::error::FetchError;
use std::str;
use std::time::Duration;

/// Metadata about one candidate URL, built from a HEAD probe.
///
/// Immutable once created. All descriptors in one fetch session must agree on
/// `content_length` and `transfer_encoding`, and every one must accept
/// range requests.
#[derive(Debug, Clone)]
pub struct SourceDescriptor {
    pub url: String,
    /// Total size of the resource in bytes.
    pub content_length: u64,
    /// `Transfer-Encoding` header value, or empty string if absent.
    pub transfer_encoding: String,
    /// Per RFC 2616, range requests are assumed accepted unless the server
    /// explicitly sends `Accept-Ranges: none`.
    pub accepts_ranges: bool,
}

/// Performs a HEAD request and returns the parsed descriptor.
///
/// Follows redirects. Exactly HTTP 200 is accepted; anything else is a
/// [`FetchError::ProbeStatus`]. A missing or unparsable `Content-Length` is a
/// [`FetchError::ProbeContentLength`].
pub fn probe(url: &str) -> Result<SourceDescriptor, FetchError> {
    let mut headers: Vec<String> = Vec::new();

    let curl_err = |source| FetchError::Transport {
        url: url.to_string(),
        source,
    };

    let mut easy = curl::easy::Easy::new();
    easy.url(url).map_err(curl_err)?;
    easy.nobody(true).map_err(curl_err)?; // HEAD request
    easy.follow_location(true).map_err(curl_err)?;
    easy.connect_timeout(Duration::from_secs(15)).map_err(curl_err)?;

    {
        let mut transfer = easy.transfer();
        transfer
            .header_function(|data| {
                if let Ok(s) = str::from_utf8(data) {
                    headers.push(s.trim_end().to_string());
                }
                true
            })
            .map_err(curl_err)?;
        transfer.perform().map_err(curl_err)?;
    }

    let status = easy.response_code().map_err(curl_err)?;
    if status != 200 {
        return Err(FetchError::ProbeStatus {
            url: url.to_string(),
            status,
        });
    }

    parse_headers(url, &headers)
}
