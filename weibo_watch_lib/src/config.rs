//! Watcher settings read from the environment.

use std::path::PathBuf;
use std::time::Duration;

use crate::throttle::DEFAULT_WINDOW;

/// Pause after a connection failure before handing control back.
pub const DEFAULT_CONNECT_BACKOFF: Duration = Duration::from_secs(5);

/// Everything needed to build a [`Watcher`](crate::Watcher).
#[derive(Debug, Clone)]
pub struct WatcherConfig {
    pub base_url: String,
    /// Cookie header for weibo.com. Without one every fetch fails.
    pub cookie: Option<String>,
    pub dump_dir: PathBuf,
    pub connect_backoff: Duration,
    pub warn_window: Duration,
    /// Per-request bound. `None` lets a hung connection block indefinitely.
    pub timeout: Option<Duration>,
}

impl Default for WatcherConfig {
    fn default() -> Self {
        Self {
            base_url: weibo_api::DEFAULT_BASE_URL.to_string(),
            cookie: None,
            dump_dir: std::env::temp_dir().join("weibo-watch-dumps"),
            connect_backoff: DEFAULT_CONNECT_BACKOFF,
            warn_window: DEFAULT_WINDOW,
            timeout: None,
        }
    }
}

impl WatcherConfig {
    /// Reads `WEIBO_BASE_URL`, `WEIBO_COOKIE`, `WEIBO_DUMP_DIR`,
    /// `WEIBO_CONNECT_BACKOFF_SECS`, `WEIBO_WARN_WINDOW_SECS` and
    /// `WEIBO_TIMEOUT_SECS`. Unset or unparsable values fall back to the
    /// defaults.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            base_url: env_string("WEIBO_BASE_URL").unwrap_or(defaults.base_url),
            cookie: env_string("WEIBO_COOKIE"),
            dump_dir: env_string("WEIBO_DUMP_DIR")
                .map(PathBuf::from)
                .unwrap_or(defaults.dump_dir),
            connect_backoff: Duration::from_secs(env_u64(
                "WEIBO_CONNECT_BACKOFF_SECS",
                defaults.connect_backoff.as_secs(),
            )),
            warn_window: Duration::from_secs(env_u64(
                "WEIBO_WARN_WINDOW_SECS",
                defaults.warn_window.as_secs(),
            )),
            timeout: env_string("WEIBO_TIMEOUT_SECS")
                .and_then(|val| val.parse::<u64>().ok())
                .map(Duration::from_secs),
        }
    }
}

fn env_string(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|val| !val.trim().is_empty())
}

fn env_u64(key: &str, default: u64) -> u64 {
    std::env::var(key)
        .ok()
        .and_then(|val| val.parse::<u64>().ok())
        .unwrap_or(default)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let cfg = WatcherConfig::default();
        assert_eq!(cfg.base_url, "http://weibo.com");
        assert_eq!(cfg.connect_backoff, Duration::from_secs(5));
        assert_eq!(cfg.warn_window, Duration::from_secs(60));
        assert!(cfg.cookie.is_none());
        assert!(cfg.timeout.is_none());
    }

    #[test]
    fn env_u64_falls_back() {
        assert_eq!(env_u64("WEIBO_WATCH_TEST_SURELY_UNSET", 7), 7);
    }
}
