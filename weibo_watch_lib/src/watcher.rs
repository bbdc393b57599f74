//! Polling entry points: latest original status and first-page comments.

use std::time::Duration;

use weibo_api::{endpoints, Session};

use crate::comments::{self, CommentsError};
use crate::config::{WatcherConfig, DEFAULT_CONNECT_BACKOFF};
use crate::dump::{DumpSink, FileDumpSink};
use crate::error::WatchError;
use crate::extract;
use crate::throttle::FailureTracker;
use crate::types::{Comment, LatestStatus, Status};

/// Authenticated session plus the reporting policy around it.
///
/// Transient trouble (connection failures, non-200 answers, odd payloads)
/// comes back as `Ok(None)`; only misuse and broken extraction invariants are
/// errors. One watcher can be shared across tasks polling different uids.
pub struct Watcher {
    session: Session,
    dump: Box<dyn DumpSink>,
    failures: FailureTracker,
    connect_backoff: Duration,
}

impl Watcher {
    pub fn new(session: Session, dump: Box<dyn DumpSink>) -> Self {
        Self {
            session,
            dump,
            failures: FailureTracker::default(),
            connect_backoff: DEFAULT_CONNECT_BACKOFF,
        }
    }

    /// Builds a session from `config`, loads its cookie if one is set, and
    /// dumps into `config.dump_dir`.
    pub fn from_config(config: &WatcherConfig) -> Result<Self, WatchError> {
        let session = match config.timeout {
            Some(timeout) => Session::with_timeout(&config.base_url, timeout),
            None => Session::with_base_url(&config.base_url),
        }
        .map_err(|e| WatchError::Config(format!("cannot build session: {}", e)))?;

        if let Some(cookie) = &config.cookie {
            session.load_cookies(cookie);
        }

        Ok(Self::new(session, Box::new(FileDumpSink::new(&config.dump_dir)))
            .with_connect_backoff(config.connect_backoff)
            .with_warn_window(config.warn_window))
    }

    /// Pause taken after a connection failure on the profile path.
    pub fn with_connect_backoff(mut self, backoff: Duration) -> Self {
        self.connect_backoff = backoff;
        self
    }

    /// Empty results closer together than `window` warn only once.
    pub fn with_warn_window(mut self, window: Duration) -> Self {
        self.failures = FailureTracker::new(window);
        self
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Latest original status of `uid`, or `None`.
    ///
    /// `None` covers both a failed fetch and a page without any original
    /// status by `uid`. Only the latter goes through the warning policy: the
    /// page is dumped and a warning logged when `warn` is set, unless
    /// `warn_on_consecutive` is set and the previous empty result was less
    /// than the warn window ago.
    pub async fn latest_status(
        &self,
        uid: u64,
        warn: bool,
        warn_on_consecutive: bool,
    ) -> Result<Option<LatestStatus>, WatchError> {
        let Some(html) = self.fetch_profile(uid).await? else {
            return Ok(None);
        };

        let statuses = extract::parse(&html)?;
        if let Some(status) = select_latest(statuses, uid) {
            return Ok(Some(status.into()));
        }

        if self.failures.record(warn, warn_on_consecutive) {
            let dumped = self.dump_or_note(&html);
            tracing::warn!(
                "uid {}: no original status found; response dumped into {}",
                uid,
                dumped
            );
        }
        Ok(None)
    }

    /// [`latest_status`](Self::latest_status) with warnings on and
    /// consecutive empty results collapsed.
    pub async fn latest_status_default(
        &self,
        uid: u64,
    ) -> Result<Option<LatestStatus>, WatchError> {
        self.latest_status(uid, true, true).await
    }

    /// Root comments on the first screenful of status `sid`, or `None` when
    /// the thread could not be fetched or decoded.
    pub async fn status_comments(&self, sid: u64) -> Result<Option<Vec<Comment>>, WatchError> {
        match self.try_status_comments(sid).await {
            Ok(comments) => Ok(Some(comments)),
            Err(e) if e.is_unavailable() => Ok(None),
            Err(CommentsError::Fetch(e)) => Err(e.into()),
            Err(e) => Err(WatchError::Invariant(e.to_string())),
        }
    }

    /// Like [`status_comments`](Self::status_comments) but keeps the reason
    /// for a failure.
    pub async fn try_status_comments(&self, sid: u64) -> Result<Vec<Comment>, CommentsError> {
        let payload = self.session.get(&endpoints::comments(sid)).await?;
        comments::parse(sid, &payload)
    }

    async fn fetch_profile(&self, uid: u64) -> Result<Option<String>, WatchError> {
        match self.session.get(&endpoints::profile(uid)).await {
            Ok(body) => Ok(Some(body)),
            Err(weibo_api::Error::Connection(_)) => {
                tracing::warn!(
                    "connection failed, retrying in {}...",
                    self.connect_backoff.as_secs()
                );
                tokio::time::sleep(self.connect_backoff).await;
                Ok(None)
            }
            Err(weibo_api::Error::HttpStatus { status, body }) => {
                let dumped = self.dump_or_note(&body);
                tracing::warn!(
                    "uid {}: got HTTP {}; response dumped into {}",
                    uid,
                    status,
                    dumped
                );
                Ok(None)
            }
            Err(e) => Err(e.into()),
        }
    }

    fn dump_or_note(&self, text: &str) -> String {
        match self.dump.dump(text) {
            Ok(handle) => handle,
            Err(e) => format!("<dump failed: {}>", e),
        }
    }
}

/// First status owned by `uid`. Profile pages list newest first, so this is
/// the latest one; timestamps are not compared.
pub fn select_latest(statuses: Vec<Status>, uid: u64) -> Option<Status> {
    statuses.into_iter().find(|s| s.owner_id == uid)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn status(owner_id: u64, status_id: u64) -> Status {
        Status {
            owner_id,
            status_id,
            timestamp: 1700000000,
            url: format!("http://weibo.com/{}/x{}", owner_id, status_id),
            repost: false,
        }
    }

    #[test]
    fn select_takes_first_match_in_order() {
        let statuses = vec![status(5, 10), status(7, 20), status(5, 11)];
        assert_eq!(select_latest(statuses, 5).map(|s| s.status_id), Some(10));
    }

    #[test]
    fn select_ignores_other_owners() {
        let statuses = vec![status(7, 20), status(5, 11)];
        assert_eq!(select_latest(statuses, 5).map(|s| s.status_id), Some(11));
    }

    #[test]
    fn select_none_when_only_others() {
        assert!(select_latest(vec![status(7, 20)], 5).is_none());
        assert!(select_latest(Vec::new(), 5).is_none());
    }
}
