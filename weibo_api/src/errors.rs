//! Error types for the session layer.

/// Errors that can occur when fetching through a [`Session`](crate::Session).
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// A fetch was attempted before any cookie was loaded into the session.
    /// This is a usage error, never a transient one.
    #[error("session used before cookies were loaded")]
    Uninitialized,
    /// The request never produced a complete response (DNS, connect, reset,
    /// or a body that could not be read).
    #[error("connection failed: {0}")]
    Connection(#[source] reqwest::Error),
    /// The server answered with something other than 200. The full body is
    /// kept so the caller can dump it.
    #[error("Request failed with status {status}")]
    HttpStatus { status: u16, body: String },
    /// The base URL and path did not form a valid URL.
    #[error("invalid url: {0}")]
    InvalidUrl(#[from] url::ParseError),
}

impl Error {
    /// Whether retrying at the polling layer could succeed.
    pub fn is_transient(&self) -> bool {
        matches!(self, Self::Connection(_) | Self::HttpStatus { .. })
    }
}
