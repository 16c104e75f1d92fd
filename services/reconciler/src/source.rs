//! Newline-delimited JSON bundle source
//!
//! Stands in for the wire transport: one `RawBundle` per line. A line that
//! fails to decode is a fatal upstream error; nothing after it is published.

use crate::delivery::UpstreamHandle;
use crate::error::UpstreamError;
use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};
use types::RawBundle;

/// Publish every bundle in `reader`, returning how many were sent
///
/// Stops at end of input, on cancellation, or when the loop stops listening.
/// The handle is dropped on return, which closes the bundle stream.
pub async fn feed_ndjson<R>(reader: R, upstream: UpstreamHandle, cancel: CancellationToken) -> usize
where
    R: AsyncBufRead + Unpin,
{
    let mut lines = reader.lines();
    let mut line_number = 0;
    let mut published = 0;

    loop {
        let next = tokio::select! {
            biased;

            _ = cancel.cancelled() => break,
            next = lines.next_line() => next,
        };
        line_number += 1;

        let line = match next {
            Ok(Some(line)) => line,
            Ok(None) => break,
            Err(e) => {
                publish_error(&upstream, UpstreamError::Io(e.to_string()), &cancel).await;
                break;
            }
        };

        if line.trim().is_empty() {
            continue;
        }

        let bundle = match serde_json::from_str::<RawBundle>(&line) {
            Ok(bundle) => bundle,
            Err(e) => {
                let error = UpstreamError::Decode {
                    line: line_number,
                    reason: e.to_string(),
                };
                publish_error(&upstream, error, &cancel).await;
                break;
            }
        };

        let block = bundle.block.number;
        let sent = tokio::select! {
            biased;

            _ = cancel.cancelled() => break,
            sent = upstream.bundles.send(bundle) => sent,
        };
        if sent.is_err() {
            debug!("Bundle receiver gone, stopping feed");
            break;
        }
        debug!(block, line = line_number, "Bundle published");
        published += 1;
    }

    info!(published, "Bundle feed finished");
    published
}

async fn publish_error(upstream: &UpstreamHandle, error: UpstreamError, cancel: &CancellationToken) {
    tokio::select! {
        biased;

        _ = cancel.cancelled() => {}
        _ = upstream.errors.send(error) => {}
    }
}
