use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use client_core::{ComposeState, HttpGateway, MemoComposer, MemoGateway, SearchSession};
use shared::{
    domain::{ResultLimit, SearchMode},
    protocol::MemoDraft,
};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

mod config;
mod render;

use config::load_settings;

#[derive(Parser, Debug)]
#[command(name = "memo", about = "Create memos and search them by meaning or by text")]
struct Cli {
    /// Backend base url; overrides the settings file and environment.
    #[arg(long, global = true)]
    api_url: Option<String>,
    #[arg(long, global = true, default_value = "memo.toml")]
    config: PathBuf,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Save a new memo.
    Create {
        #[arg(long)]
        category: String,
        #[arg(long)]
        title: String,
        /// Comma separated.
        #[arg(long, default_value = "")]
        tags: String,
        #[arg(long)]
        body: String,
    },
    /// Search memos and print one page of results.
    Search {
        /// Required for semantic search; with `--exact`, omitting it lists every memo.
        #[arg(required_unless_present = "exact")]
        query: Option<String>,
        /// Substring match over title, snippet and body instead of ranking.
        #[arg(long)]
        exact: bool,
        #[arg(long, default_value_t = 1)]
        page: usize,
        #[arg(long, conflicts_with = "all", value_parser = clap::value_parser!(u32).range(1..))]
        limit: Option<u32>,
        #[arg(long)]
        all: bool,
        /// Print the full body of the memo with this uuid.
        #[arg(long)]
        show: Option<String>,
    },
    Categories,
    Tags,
    /// Ask the backend to rebuild its search index.
    Reindex,
}

#[tokio::main]
async fn main() -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
    let cli = Cli::parse();

    let mut settings = load_settings(&cli.config)?;
    if let Some(api_url) = cli.api_url {
        settings.api_url = api_url;
    }
    let gateway = HttpGateway::new(settings.gateway_config()?)
        .context("failed to set up backend gateway")?;
    info!(api_url = %gateway.config().base_url(), "using memo backend");

    match cli.command {
        Command::Create {
            category,
            title,
            tags,
            body,
        } => {
            let mut composer = MemoComposer::new();
            composer.load_suggestions(&gateway).await;
            *composer.draft_mut() = MemoDraft::new(category, title, tags, body);

            let category = &composer.draft().category;
            if !composer.categories().is_empty() && !composer.is_known_category(category) {
                info!(%category, "creating a new category");
            }

            if composer.submit(&gateway).await != ComposeState::Saved {
                bail!(
                    "failed to save memo: {}",
                    composer.error().unwrap_or("unknown error")
                );
            }
            if let Some(saved) = composer.last_saved() {
                println!("{}", serde_json::to_string_pretty(saved)?);
            }
        }
        Command::Search {
            query,
            exact,
            page,
            limit,
            all,
            show,
        } => {
            let mut session_config = settings.session_config()?;
            if all {
                session_config = session_config.with_search_limit(ResultLimit::Unbounded);
            } else if let Some(k) = limit {
                session_config = session_config.with_search_limit(ResultLimit::Top(k));
            }

            let mut session = SearchSession::new(session_config);
            session.set_query(query.unwrap_or_default());
            session.set_mode(if exact {
                SearchMode::Exact
            } else {
                SearchMode::Semantic
            });
            session.submit(&gateway).await;
            if let Some(err) = session.error() {
                bail!("search failed: {err}");
            }

            let shown = session.set_page(page);
            if shown != page {
                warn!(requested = page, shown, "page out of range");
            }
            if let Some(uuid) = show {
                if session.select(&uuid).is_none() {
                    warn!(%uuid, "no memo with that uuid in the results");
                }
            }

            print!("{}", render::results_page(&session));
            if let Some(selected) = session.selected() {
                println!();
                print!("{}", render::memo_detail(selected));
            }
        }
        Command::Categories => {
            for category in gateway.get_categories().await? {
                println!("{category}");
            }
        }
        Command::Tags => {
            for tag in gateway.get_tags().await? {
                println!("{tag}");
            }
        }
        Command::Reindex => {
            let mut composer = MemoComposer::new();
            println!("{}", composer.reindex(&gateway).await);
        }
    }

    Ok(())
}
