//! Extraction of root comments from the comment-thread endpoint.
//!
//! The endpoint answers with a JSON envelope whose `data.html` field holds an
//! HTML fragment, one node per root comment:
//!
//! ```text
//! <div comment_id="4300000000000001" node-type="root_comment">
//!   <div class="WB_face"><a ...><img usercard="id=123456" ...></a></div>
//!   ...
//! </div>
//! ```

use std::sync::LazyLock;

use scraper::{Html, Selector};
use serde::Deserialize;

use crate::types::Comment;

static ROOT_COMMENT: LazyLock<Selector> = LazyLock::new(|| {
    Selector::parse(r#"[node-type="root_comment"]"#).expect("root comment selector")
});

static AVATAR: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse(r#"img[usercard^="id="]"#).expect("avatar selector"));

const USERCARD_PREFIX: &str = "id=";

#[derive(thiserror::Error, Debug)]
pub enum CommentsError {
    #[error("fetch failed: {0}")]
    Fetch(#[from] weibo_api::Error),
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("malformed comment: {0}")]
    Malformed(String),
}

impl CommentsError {
    /// Whether this failure means "no comments available right now" rather
    /// than a broken assumption or a usage error.
    pub fn is_unavailable(&self) -> bool {
        match self {
            Self::Fetch(e) => e.is_transient(),
            Self::Json(_) => true,
            Self::Malformed(_) => false,
        }
    }
}

#[derive(Deserialize)]
struct Envelope {
    data: EnvelopeData,
}

#[derive(Deserialize)]
struct EnvelopeData {
    html: String,
}

/// Parses a comment-endpoint payload for status `sid`.
///
/// A payload without `data.html` is a [`CommentsError::Json`]. A root
/// comment without a numeric `comment_id` or without a commenter avatar is
/// [`CommentsError::Malformed`]; no partial list is returned.
pub fn parse(sid: u64, payload: &str) -> Result<Vec<Comment>, CommentsError> {
    let envelope: Envelope = serde_json::from_str(payload)?;
    parse_fragment(sid, &envelope.data.html)
}

fn parse_fragment(sid: u64, html: &str) -> Result<Vec<Comment>, CommentsError> {
    let fragment = Html::parse_fragment(html);
    let mut comments = Vec::new();

    for node in fragment.select(&ROOT_COMMENT) {
        let raw_cid = node
            .value()
            .attr("comment_id")
            .ok_or_else(|| CommentsError::Malformed("root comment without comment_id".into()))?;
        let comment_id = parse_id(raw_cid, "comment_id")?;

        let avatar = node.select(&AVATAR).next().ok_or_else(|| {
            CommentsError::Malformed(format!("comment {} has no commenter avatar", comment_id))
        })?;
        let usercard = avatar.value().attr("usercard").unwrap_or_default();
        let commenter = usercard.strip_prefix(USERCARD_PREFIX).unwrap_or(usercard);

        comments.push(Comment {
            status_id: sid,
            comment_id,
            commenter_id: parse_id(commenter, "usercard")?,
        });
    }

    Ok(comments)
}

fn parse_id(raw: &str, what: &str) -> Result<u64, CommentsError> {
    raw.trim()
        .parse()
        .map_err(|_| CommentsError::Malformed(format!("non-numeric {}: {:?}", what, raw)))
}
