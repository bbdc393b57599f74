//! The `comments` subcommand: first-page root comments of a status.

use anyhow::{anyhow, Result};
use clap::Args;
use weibo_watch_lib::Watcher;

use crate::output::{print_comments_table, print_json, OutputFormat};

/// Arguments for the `comments` subcommand.
#[derive(Args)]
pub struct CommentsArgs {
    /// Status id
    #[arg(long)]
    pub sid: u64,
}

pub async fn run(args: &CommentsArgs, watcher: &Watcher, format: &OutputFormat) -> Result<()> {
    let comments = watcher
        .status_comments(args.sid)
        .await?
        .ok_or_else(|| anyhow!("comments of status {} are unavailable right now", args.sid))?;

    match format {
        OutputFormat::Table => print_comments_table(&comments),
        OutputFormat::Json => print_json(&comments),
    }
    Ok(())
}
