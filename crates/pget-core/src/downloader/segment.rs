//! Single-segment HTTP Range GET, streamed into a spill sink.

use crate::segmenter::Segment;
use std::io::{self, Write};

/// Fetch `segment` of `url` with a ranged GET, pouring the body into
/// `sink` as it arrives. Runs on a worker thread inside a read-ahead
/// buffer's fetch action.
///
/// Sink write failures are captured and surfaced in place of curl's generic
/// write-error result. Non-2xx responses fail the transfer before any body
/// byte reaches the sink, so an error page is never mistaken for content.
/// No transfer timeout is imposed; a hung fetch stalls until the connection
/// dies.
pub(super) fn fetch_range(url: &str, segment: &Segment, sink: &mut dyn Write) -> io::Result<()> {
    if segment.is_empty() {
        return Ok(());
    }

    let curl_err =
        |e: curl::Error| io::Error::new(io::ErrorKind::Other, format!("GET {}: {}", url, e));

    let mut easy = curl::easy::Easy::new();
    easy.url(url).map_err(curl_err)?;
    easy.follow_location(true).map_err(curl_err)?;
    easy.fail_on_error(true).map_err(curl_err)?;
    let range = segment.range_spec();
    easy.range(&range).map_err(curl_err)?;

    let mut sink_error: Option<io::Error> = None;
    let perform_result;
    {
        let mut transfer = easy.transfer();
        transfer
            .write_function(|data| match sink.write_all(data) {
                Ok(()) => Ok(data.len()),
                Err(e) => {
                    sink_error = Some(e);
                    Ok(0) // aborts the transfer with a write error
                }
            })
            .map_err(curl_err)?;
        perform_result = transfer.perform();
    }
    if let Err(e) = perform_result {
        if e.is_write_error() {
            if let Some(io_err) = sink_error.take() {
                return Err(io_err);
            }
        }
        return Err(curl_err(e));
    }

    let status = easy.response_code().map_err(curl_err)?;
    if !(200..300).contains(&status) {
        return Err(io::Error::new(
            io::ErrorKind::Other,
            format!("GET {} (bytes {}): HTTP {}", url, range, status),
        ));
    }

    Ok(())
}
