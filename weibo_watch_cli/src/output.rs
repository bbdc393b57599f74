use serde::Serialize;
use tabled::settings::Style;
use tabled::{Table, Tabled};
use weibo_watch_lib::{Comment, LatestStatus};

#[derive(Clone, Debug)]
pub enum OutputFormat {
    Table,
    Json,
}

#[derive(Tabled)]
struct LatestRow {
    #[tabled(rename = "UID")]
    uid: u64,
    #[tabled(rename = "Status")]
    status_id: String,
    #[tabled(rename = "Published")]
    published: String,
    #[tabled(rename = "Repost")]
    repost: String,
    #[tabled(rename = "URL")]
    url: String,
}

#[derive(Tabled)]
struct CommentRow {
    #[tabled(rename = "Status")]
    status_id: u64,
    #[tabled(rename = "Comment")]
    comment_id: u64,
    #[tabled(rename = "Commenter")]
    commenter_id: u64,
}

/// JSON shape for `latest`: uids without a result keep a `null` status.
#[derive(Serialize, Debug, PartialEq)]
pub struct LatestEntry<'a> {
    pub uid: u64,
    pub status: Option<&'a LatestStatus>,
}

// -- Row builders --

fn build_latest_rows(results: &[(u64, Option<LatestStatus>)]) -> Vec<LatestRow> {
    results
        .iter()
        .map(|(uid, latest)| match latest {
            Some(s) => LatestRow {
                uid: *uid,
                status_id: s.status_id.to_string(),
                published: format_published(s),
                repost: if s.repost { "yes" } else { "no" }.to_string(),
                url: s.url.clone(),
            },
            None => LatestRow {
                uid: *uid,
                status_id: "-".to_string(),
                published: "-".to_string(),
                repost: "-".to_string(),
                url: "-".to_string(),
            },
        })
        .collect()
}

fn build_comment_rows(comments: &[Comment]) -> Vec<CommentRow> {
    comments
        .iter()
        .map(|c| CommentRow {
            status_id: c.status_id,
            comment_id: c.comment_id,
            commenter_id: c.commenter_id,
        })
        .collect()
}

pub fn build_latest_entries(results: &[(u64, Option<LatestStatus>)]) -> Vec<LatestEntry<'_>> {
    results
        .iter()
        .map(|(uid, latest)| LatestEntry {
            uid: *uid,
            status: latest.as_ref(),
        })
        .collect()
}

// -- Printers --

pub fn print_latest_table(results: &[(u64, Option<LatestStatus>)]) {
    let mut table = Table::new(build_latest_rows(results));
    table.with(Style::sharp());
    println!("{}", table);
}

pub fn print_comments_table(comments: &[Comment]) {
    if comments.is_empty() {
        println!("No comments.");
        return;
    }
    let mut table = Table::new(build_comment_rows(comments));
    table.with(Style::sharp());
    println!("{}", table);
}

pub fn print_json<T: serde::Serialize>(data: &T) {
    match serde_json::to_string_pretty(data) {
        Ok(json) => println!("{}", json),
        Err(e) => eprintln!("Failed to serialize to JSON: {}", e),
    }
}

fn format_published(status: &LatestStatus) -> String {
    status
        .published_at()
        .map(|dt| dt.format("%Y-%m-%d %H:%M:%S UTC").to_string())
        .unwrap_or_else(|| status.timestamp.to_string())
}
