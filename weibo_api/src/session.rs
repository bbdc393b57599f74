//! Long-lived authenticated HTTP session for weibo.com.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use reqwest::cookie::Jar;
use reqwest::StatusCode;
use url::Url;

use crate::{cookies::parse_cookie_header, user_agent::USER_AGENT, Error};

/// Production host. Permalinks are always built against this, whatever base
/// URL the session talks to.
pub const DEFAULT_BASE_URL: &str = "http://weibo.com";

/// One shared HTTP client plus the cookie jar that authenticates it.
///
/// The session starts uninitialized; every [`get`](Self::get) fails with
/// [`Error::Uninitialized`] until [`load_cookies`](Self::load_cookies) has
/// run. After that the session is read-only and can be shared freely between
/// tasks.
pub struct Session {
    /// Base URL for requests. Defaults to `http://weibo.com`.
    base_url: Url,
    http: reqwest::Client,
    jar: Arc<Jar>,
    initialized: AtomicBool,
}

impl Session {
    /// Creates a session pointing at the production host.
    pub fn new() -> Result<Self, Error> {
        Self::build(DEFAULT_BASE_URL, None)
    }

    /// Creates a session with a custom base URL. Used for testing with wiremock.
    pub fn with_base_url(base_url: &str) -> Result<Self, Error> {
        Self::build(base_url, None)
    }

    /// Like [`with_base_url`](Self::with_base_url), but every request is
    /// bounded by `timeout`. Without it a hung connection blocks forever.
    pub fn with_timeout(base_url: &str, timeout: Duration) -> Result<Self, Error> {
        Self::build(base_url, Some(timeout))
    }

    fn build(base_url: &str, timeout: Option<Duration>) -> Result<Self, Error> {
        let base_url = Url::parse(base_url.trim_end_matches('/'))?;
        let jar = Arc::new(Jar::default());
        let mut builder = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .cookie_provider(Arc::clone(&jar));
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let http = builder.build().map_err(Error::Connection)?;
        Ok(Self {
            base_url,
            http,
            jar,
            initialized: AtomicBool::new(false),
        })
    }

    /// Installs every cookie in a `name=value; name2=value2` string, scoped to
    /// the session host, and marks the session ready.
    ///
    /// Safe to call again; later values overwrite earlier ones. Returns the
    /// number of cookies installed by this call.
    pub fn load_cookies(&self, cookie_header: &str) -> usize {
        let pairs = parse_cookie_header(cookie_header);
        for (name, value) in &pairs {
            self.jar
                .add_cookie_str(&format!("{}={}", name, value), &self.base_url);
        }
        self.initialized.store(true, Ordering::Release);
        pairs.len()
    }

    /// Whether cookies have been loaded.
    pub fn is_initialized(&self) -> bool {
        self.initialized.load(Ordering::Acquire)
    }

    pub fn base_url(&self) -> &str {
        self.base_url.as_str().trim_end_matches('/')
    }

    /// Performs one GET of `path` (path plus query) against the base URL and
    /// returns the body of a 200 response.
    ///
    /// Never retries. Any non-200 status yields [`Error::HttpStatus`] with the
    /// complete body attached.
    pub async fn get(&self, path: &str) -> Result<String, Error> {
        if !self.is_initialized() {
            return Err(Error::Uninitialized);
        }
        let url = Url::parse(&format!("{}{}", self.base_url(), path))?;
        let resp = self.http.get(url).send().await.map_err(Error::Connection)?;

        let status = resp.status();
        let body = resp.text().await.map_err(Error::Connection)?;

        if status != StatusCode::OK {
            return Err(Error::HttpStatus {
                status: status.as_u16(),
                body,
            });
        }
        Ok(body)
    }
}
