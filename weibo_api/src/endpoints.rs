//! Path builders for the two pages the watcher reads.

/// Profile timeline including reposts: `/u/<uid>?is_all=1`.
pub fn profile(uid: u64) -> String {
    format!("/u/{}?is_all=1", uid)
}

/// First screenful of all comments on a status.
///
/// `filter` could also be `hot` for popular comments; only `all` is used.
pub fn comments(sid: u64) -> String {
    format!("/aj/v6/comment/big?id={}&filter=all&from=singleView", sid)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn profile_path() {
        assert_eq!(profile(1669879400), "/u/1669879400?is_all=1");
    }

    #[test]
    fn comments_path() {
        assert_eq!(
            comments(4200000000000001),
            "/aj/v6/comment/big?id=4200000000000001&filter=all&from=singleView"
        );
    }
}
