//! `GuardApiError` - failures while fetching a guard list page.

use std::path::PathBuf;

use thiserror::Error;

/// Error returned by a single guard list page request.
///
/// `Transport` and `Request` mean the HTTP layer did not deliver a usable
/// response. `Upstream` means the API answered but reported a non-zero
/// status code in its envelope.
#[derive(Debug, Error)]
#[allow(clippy::module_name_repetitions)]
pub enum GuardApiError {
    /// The server answered with a non-success HTTP status.
    #[error("request for page {page} failed with HTTP status {status}")]
    Transport {
        /// Requested page number.
        page: u32,
        /// HTTP status code.
        status: u16,
    },

    /// The request could not be sent or the body could not be read.
    #[error("request for page {page} failed: {source}")]
    Request {
        /// Requested page number.
        page: u32,
        /// Underlying HTTP client error.
        #[source]
        source: reqwest::Error,
    },

    /// The response body was not a valid guard list envelope.
    #[error("failed to decode page {page} response: {source}")]
    Decode {
        /// Requested page number.
        page: u32,
        /// Underlying JSON error.
        #[source]
        source: serde_json::Error,
    },

    /// The API reported a logical failure (`code != 0`).
    #[error("API error on page {page}: code={code}, message={message}")]
    Upstream {
        /// Requested page number.
        page: u32,
        /// Envelope status code.
        code: i64,
        /// Envelope message.
        message: String,
    },

    /// A request URL could not be built from the base URL.
    #[error("invalid request URL for {path}: {source}")]
    InvalidUrl {
        /// Endpoint path that failed to join.
        path: &'static str,
        /// Underlying URL error.
        #[source]
        source: url::ParseError,
    },

    /// The local fixture file could not be read.
    #[error("failed to read fixture {}: {source}", path.display())]
    Fixture {
        /// Fixture file path.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },
}

impl GuardApiError {
    /// Returns `true` when the HTTP layer failed (status or network).
    #[must_use]
    pub const fn is_transport(&self) -> bool {
        matches!(self, Self::Transport { .. } | Self::Request { .. })
    }

    /// Returns `true` when the API reported a non-zero envelope code.
    #[must_use]
    pub const fn is_upstream(&self) -> bool {
        matches!(self, Self::Upstream { .. })
    }
}
