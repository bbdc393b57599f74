/// Desktop Chrome identification. weibo.com serves a stripped page (or a
/// login redirect) to clients it does not recognise.
pub const USER_AGENT: &str = "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_12_2) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/55.0.2883.95 Safari/537.36";
