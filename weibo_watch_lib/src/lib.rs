//! Library layer for weibo-watch: status and comment extraction on top of the
//! `weibo_api` session.
//!
//! Adds the feed pattern extractor, latest-status selection with throttled
//! "nothing found" warnings, the comment-thread parser, and debug dumps of
//! responses worth a second look.

pub mod comments;
pub mod config;
pub mod dump;
pub mod error;
pub mod extract;
pub mod throttle;
pub mod types;
pub mod watcher;

pub use weibo_api;
pub use weibo_api::Session;

pub use comments::CommentsError;
pub use config::WatcherConfig;
pub use dump::{DumpSink, FileDumpSink, MemoryDumpSink};
pub use error::WatchError;
pub use types::{Comment, LatestStatus, Status};
pub use watcher::Watcher;
