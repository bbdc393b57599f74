//! Pattern extraction of statuses from a raw profile page.
//!
//! The profile page embeds its feed as JSON-escaped HTML inside
//! `FM.view(...)` script calls, so every quote shows up as `\"` and every
//! slash in a path as `\/`. The only stable anchors are a handful of literal
//! tokens; one structural pattern is matched over the raw text:
//!
//! ```text
//! ouid=(\d+)(.*?)mid=\"(\d+)\".*?href=\"\/<ouid>\/(\w+)\?.*?date=\"(\d{13})\"(.*?)class=\"WB_feed_handle\"
//! ```
//!
//! `<ouid>` must repeat the owner id captured at the start of the match.
//! `regex` has no back-references, so the tail of the pattern is compiled per
//! owner id and anchored at each `ouid=` occurrence. Compiled patterns are
//! cached across calls, and anchors whose line never links to `\/<ouid>\/`
//! are skipped without compiling anything.

use std::collections::HashMap;
use std::sync::{LazyLock, Mutex};

use regex::Regex;

use crate::error::WatchError;
use crate::types::Status;

/// Host that permalinks are built against.
pub const PERMALINK_BASE: &str = weibo_api::DEFAULT_BASE_URL;

/// Present between the owner id and the status id of a pinned status.
const PINNED_MARKER: &str = r#"feedtype=\"top\""#;

/// Present after the timestamp when the status forwards another one.
const REPOST_MARKER: &str = r#"\"WB_feed_expand\""#;

static OWNER_ANCHOR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"ouid=(\d+)").expect("owner anchor pattern"));

/// One structural match, before pinned statuses are dropped.
#[derive(Debug)]
struct Candidate {
    owner_id: u64,
    status_id: u64,
    timestamp_ms: i64,
    basename: String,
    pinned: bool,
    repost: bool,
}

impl Candidate {
    fn into_status(self) -> Status {
        Status {
            url: format!("{}/{}/{}", PERMALINK_BASE, self.owner_id, self.basename),
            owner_id: self.owner_id,
            status_id: self.status_id,
            timestamp: self.timestamp_ms / 1000,
            repost: self.repost,
        }
    }
}

/// Extracts every non-pinned status from `html`, in document order.
///
/// Document order on a profile page is newest first. A page with no match
/// yields an empty vector.
pub fn parse(html: &str) -> Result<Vec<Status>, WatchError> {
    Ok(SHARED
        .candidates(html)?
        .into_iter()
        .filter(|c| !c.pinned)
        .map(Candidate::into_status)
        .collect())
}

/// Compiled owner-specific patterns, shared by every parse in the process.
static SHARED: LazyLock<Extractor> = LazyLock::new(Extractor::new);

/// Owner patterns kept before the cache is flushed.
const PATTERN_CACHE_CAP: usize = 1024;

/// Holds the per-owner patterns so a poll loop compiles each one once.
struct Extractor {
    patterns: Mutex<HashMap<String, Regex>>,
}

impl Extractor {
    fn new() -> Self {
        Self {
            patterns: Mutex::new(HashMap::new()),
        }
    }

    fn candidates(&self, html: &str) -> Result<Vec<Candidate>, WatchError> {
        let mut found = Vec::new();
        let mut pos = 0;

        while let Some(anchor) = OWNER_ANCHOR.captures_at(html, pos) {
            let (Some(whole), Some(owner)) = (anchor.get(0), anchor.get(1)) else {
                break;
            };
            let start = whole.start();
            let owner = owner.as_str();
            // "ouid=" is ASCII, so one byte on is still a char boundary.
            pos = start + 1;

            // A match never crosses a newline and must link back to the owner.
            let line = html[start..].split('\n').next().unwrap_or_default();
            if !line.contains(&permalink_needle(owner)) {
                continue;
            }

            let pattern = self.pattern(owner)?;
            if let Some(cap) = pattern.captures(line) {
                found.push(Candidate {
                    owner_id: parse_int(owner)?,
                    status_id: parse_int(&cap["mid"])?,
                    timestamp_ms: parse_int(&cap["date"])?,
                    basename: cap["basename"].to_string(),
                    pinned: cap["head"].contains(PINNED_MARKER),
                    repost: cap["tail"].contains(REPOST_MARKER),
                });
                pos = start + cap.get(0).map_or(1, |m| m.end());
            }
        }

        Ok(found)
    }

    fn pattern(&self, owner: &str) -> Result<Regex, WatchError> {
        let mut patterns = self.patterns.lock().unwrap_or_else(|e| e.into_inner());
        if let Some(pattern) = patterns.get(owner) {
            return Ok(pattern.clone());
        }
        let pattern = owner_pattern(owner)?;
        if patterns.len() >= PATTERN_CACHE_CAP {
            patterns.clear();
        }
        patterns.insert(owner.to_string(), pattern.clone());
        Ok(pattern)
    }

    #[cfg(test)]
    fn cached_patterns(&self) -> usize {
        self.patterns.lock().unwrap_or_else(|e| e.into_inner()).len()
    }
}

fn permalink_needle(owner: &str) -> String {
    format!(r#"href=\"\/{}\/"#, owner)
}

fn owner_pattern(owner: &str) -> Result<Regex, WatchError> {
    Regex::new(&format!(
        r#"\Aouid={owner}(?P<head>.*?)mid=\\"(?P<mid>\d+)\\".*?href=\\"\\/{owner}\\/(?P<basename>\w+)\?.*?date=\\"(?P<date>\d{{13}})\\"(?P<tail>.*?)class=\\"WB_feed_handle\\""#
    ))
    .map_err(|e| WatchError::Invariant(format!("feed pattern for owner {}: {}", owner, e)))
}

fn parse_int<T: std::str::FromStr>(digits: &str) -> Result<T, WatchError> {
    digits
        .parse()
        .map_err(|_| WatchError::Invariant(format!("numeric capture out of range: {}", digits)))
}
