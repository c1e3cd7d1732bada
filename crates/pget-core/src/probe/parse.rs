//! Parse HTTP response header lines into a SourceDescriptor.

use crate::error::FetchError;

use super::SourceDescriptor;

/// Parse collected header lines for `url` into a descriptor.
///
/// `Accept-Ranges: none` (case-insensitive) marks the source as refusing
/// range requests; any other value, or no header at all, counts as support.
pub(crate) fn parse_headers(url: &str, lines: &[String]) -> Result<SourceDescriptor, FetchError> {
    let mut content_length: Option<u64> = None;
    let mut transfer_encoding = String::new();
    let mut accepts_ranges = true;

    for line in lines {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        if let Some((name, value)) = line.split_once(':') {
            let name = name.trim();
            let value = value.trim();
            if name.eq_ignore_ascii_case("content-length") {
                if let Ok(n) = value.parse::<u64>() {
                    content_length = Some(n);
                }
            }
            if name.eq_ignore_ascii_case("transfer-encoding") {
                transfer_encoding = value.to_string();
            }
            if name.eq_ignore_ascii_case("accept-ranges") {
                accepts_ranges = !value.eq_ignore_ascii_case("none");
            }
        }
    }

    let content_length = content_length.ok_or_else(|| FetchError::ProbeContentLength {
        url: url.to_string(),
    })?;

    Ok(SourceDescriptor {
        url: url.to_string(),
        content_length,
        transfer_encoding,
        accepts_ranges,
    })
}
