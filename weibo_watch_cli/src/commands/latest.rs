//! The `latest` subcommand: newest original status per uid.

use anyhow::Result;
use clap::Args;
use weibo_watch_lib::Watcher;

use crate::output::{build_latest_entries, print_json, print_latest_table, OutputFormat};

/// Arguments for the `latest` subcommand.
#[derive(Args)]
pub struct LatestArgs {
    /// User id to poll (repeatable)
    #[arg(long = "uid", required = true)]
    pub uids: Vec<u64>,

    /// Do not warn when a profile has no original status
    #[arg(long)]
    pub no_warn: bool,

    /// Warn on every empty result instead of once per burst
    #[arg(long)]
    pub warn_always: bool,
}

pub async fn run(args: &LatestArgs, watcher: &Watcher, format: &OutputFormat) -> Result<()> {
    let mut results = Vec::with_capacity(args.uids.len());
    for &uid in &args.uids {
        let latest = watcher
            .latest_status(uid, !args.no_warn, !args.warn_always)
            .await?;
        results.push((uid, latest));
    }

    match format {
        OutputFormat::Table => print_latest_table(&results),
        OutputFormat::Json => print_json(&build_latest_entries(&results)),
    }
    Ok(())
}
