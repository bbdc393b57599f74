//! Error types for the library layer.

use std::fmt;

/// Hard failures of the watcher. Everything transient (connection trouble,
/// non-200 answers, unexpected payload shapes) is reported as an absent
/// result instead and never reaches this type.
#[derive(Debug)]
pub enum WatchError {
    /// A fetch was attempted before cookies were loaded.
    Uninitialized,
    /// Any other session error that is not retryable (e.g. a bad base URL).
    Session(weibo_api::Error),
    /// Markup matched a pattern but broke an assumption the pattern is
    /// supposed to guarantee.
    Invariant(String),
    /// Configuration could not be turned into a working watcher.
    Config(String),
}

impl fmt::Display for WatchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Uninitialized => write!(f, "weibo.com cookie has not been loaded"),
            Self::Session(e) => write!(f, "Session error: {}", e),
            Self::Invariant(msg) => write!(f, "Extraction invariant violated: {}", msg),
            Self::Config(msg) => write!(f, "Configuration error: {}", msg),
        }
    }
}

impl std::error::Error for WatchError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Session(e) => Some(e),
            _ => None,
        }
    }
}

impl From<weibo_api::Error> for WatchError {
    fn from(e: weibo_api::Error) -> Self {
        match e {
            weibo_api::Error::Uninitialized => Self::Uninitialized,
            other => Self::Session(other),
        }
    }
}
