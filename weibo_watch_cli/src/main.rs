mod commands;
mod output;

use std::path::PathBuf;

use anyhow::{anyhow, Context, Result};
use clap::{Parser, Subcommand};
use weibo_watch_lib::{Watcher, WatcherConfig};

use crate::output::OutputFormat;

#[derive(Parser)]
#[command(name = "weibo-watch")]
#[command(about = "Fetch the latest original weibo.com status and its comments")]
struct Cli {
    /// Output format: table or json
    #[arg(long, default_value = "table", global = true)]
    output: String,

    /// File holding the weibo.com cookie header (overrides WEIBO_COOKIE)
    #[arg(long, global = true)]
    cookie_file: Option<PathBuf>,

    /// Base URL to fetch from (overrides WEIBO_BASE_URL)
    #[arg(long, global = true)]
    base_url: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Latest original status of one or more users
    Latest(commands::latest::LatestArgs),
    /// First screenful of root comments on a status
    Comments(commands::comments::CommentsArgs),
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("weibo_watch_lib=warn".parse().unwrap()),
        )
        .with_target(false)
        .init();

    let cli = Cli::parse();

    let format = match cli.output.as_str() {
        "json" => OutputFormat::Json,
        _ => OutputFormat::Table,
    };

    let mut config = WatcherConfig::from_env();
    if let Some(base_url) = &cli.base_url {
        config.base_url = base_url.clone();
    }
    if let Some(path) = &cli.cookie_file {
        let cookie = std::fs::read_to_string(path)
            .with_context(|| format!("reading cookie file {}", path.display()))?;
        config.cookie = Some(cookie.trim().to_string());
    }

    let watcher = Watcher::from_config(&config)?;
    if !watcher.session().is_initialized() {
        return Err(anyhow!(
            "no weibo.com cookie: set WEIBO_COOKIE or pass --cookie-file"
        ));
    }

    match &cli.command {
        Commands::Latest(args) => commands::latest::run(args, &watcher, &format).await?,
        Commands::Comments(args) => commands::comments::run(args, &watcher, &format).await?,
    }

    Ok(())
}
