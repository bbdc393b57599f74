//! Records produced by the extractors.

use chrono::{DateTime, Utc};
use serde::Serialize;

/// One original (non-pinned) status found on a profile page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Status {
    pub owner_id: u64,
    pub status_id: u64,
    /// Unix seconds, truncated from the page's millisecond value.
    pub timestamp: i64,
    pub url: String,
    pub repost: bool,
}

/// The latest original status of a polled user. The owner id is left out
/// since the caller polled for it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LatestStatus {
    pub status_id: u64,
    pub timestamp: i64,
    pub url: String,
    pub repost: bool,
}

impl LatestStatus {
    pub fn published_at(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp(self.timestamp, 0)
    }
}

impl From<Status> for LatestStatus {
    fn from(s: Status) -> Self {
        Self {
            status_id: s.status_id,
            timestamp: s.timestamp,
            url: s.url,
            repost: s.repost,
        }
    }
}

/// A root-level comment from the first screenful of a thread.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Comment {
    /// As requested by the caller; not cross-checked against the page.
    pub status_id: u64,
    pub comment_id: u64,
    pub commenter_id: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn latest_drops_owner() {
        let status = Status {
            owner_id: 5,
            status_id: 10,
            timestamp: 1700000000,
            url: "http://weibo.com/5/Fabc".to_string(),
            repost: true,
        };
        let latest = LatestStatus::from(status);
        assert_eq!(latest.status_id, 10);
        assert_eq!(latest.url, "http://weibo.com/5/Fabc");
        assert!(latest.repost);
    }

    #[test]
    fn published_at_is_utc() {
        let latest = LatestStatus {
            status_id: 1,
            timestamp: 1700000000,
            url: String::new(),
            repost: false,
        };
        assert_eq!(
            latest.published_at().unwrap().to_rfc3339(),
            "2023-11-14T22:13:20+00:00"
        );
    }
}
