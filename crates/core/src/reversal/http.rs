//! Blocking HTTP transport used by lookup providers.

use std::io::Read;
use std::time::Duration;

use tracing::trace;

use super::ReversalError;

/// Minimal GET-only transport.
///
/// Implementations block; providers run them on Tokio's blocking pool.
pub trait HttpFetch: Send + Sync + 'static {
    /// Fetch `url` and return the response body as text.
    ///
    /// Anything other than a 2xx status is an error.
    fn get(&self, url: &str, timeout: Duration) -> Result<String, ReversalError>;
}

/// Largest response body read from a lookup service.
const MAX_BODY_BYTES: u64 = 64 * 1024;

/// [`HttpFetch`] backed by `ureq`.
#[derive(Debug, Clone, Copy, Default)]
pub struct UreqFetch;

impl HttpFetch for UreqFetch {
    fn get(&self, url: &str, timeout: Duration) -> Result<String, ReversalError> {
        trace!(url, "GET");
        let response = ureq::get(url)
            .timeout(timeout)
            .call()
            .map_err(|e| match e {
                ureq::Error::Status(code, _) => ReversalError::Status(code),
                ureq::Error::Transport(transport) => {
                    ReversalError::Transport(transport.to_string())
                }
            })?;

        let status = response.status();
        if !(200..300).contains(&status) {
            return Err(ReversalError::Status(status));
        }

        read_body(response.into_reader())
    }
}

/// Read at most [`MAX_BODY_BYTES`] and require valid UTF-8.
fn read_body(reader: impl Read) -> Result<String, ReversalError> {
    let mut buf = Vec::new();
    reader
        .take(MAX_BODY_BYTES)
        .read_to_end(&mut buf)
        .map_err(|e| ReversalError::Transport(e.to_string()))?;
    String::from_utf8(buf).map_err(|e| ReversalError::Malformed(e.to_string()))
}
