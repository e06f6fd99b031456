//! Knowledge Bot CLI
//!
//! Builds a Markdown knowledge base from technical web pages.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, ValueEnum};
use knowledge_bot::{
    error::{AppError, Result},
    models::{Config, RunStats},
    pipeline::{self, Pipeline},
    services::SiteQuerySearch,
    storage::LocalStorage,
    utils::{console, http::HttpFetcher, parse_page_url},
};

/// Knowledge Bot - technical knowledge base builder
#[derive(Parser, Debug)]
#[command(
    name = "knowledge-bot",
    version,
    about = "Builds a Markdown knowledge base from technical web pages"
)]
struct Cli {
    /// Run mode
    #[arg(long, value_enum, default_value_t = Mode::Auto)]
    mode: Mode,

    /// Search a single topic instead of the configured list (search mode)
    #[arg(long)]
    topic: Option<String>,

    /// Page to ingest (required for crawl mode)
    #[arg(long)]
    url: Option<String>,

    /// Source repository name (reserved, currently unused)
    #[arg(long)]
    repo: Option<String>,

    /// Path to the configuration file (TOML, or JSON by extension)
    #[arg(short, long, default_value = "config.toml")]
    config: PathBuf,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// Only print warnings, errors and the final report
    #[arg(short, long)]
    quiet: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Mode {
    Search,
    Crawl,
    Auto,
    Analyze,
}

/// Initialize logging based on verbosity flag.
fn init_logging(verbose: bool) {
    let level = if verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp_secs()
        .init();
}

/// A pipeline run with its mode arguments already checked.
#[derive(Debug, PartialEq, Eq)]
enum Job {
    Search { topic: Option<String> },
    Crawl { url: String },
    Auto,
}

/// Check mode arguments before anything else runs. `None` means analyze mode.
fn plan(cli: &Cli) -> Result<Option<Job>> {
    let job = match cli.mode {
        Mode::Analyze => return Ok(None),
        Mode::Search => Job::Search {
            topic: cli.topic.clone(),
        },
        Mode::Crawl => {
            let url = cli
                .url
                .as_deref()
                .ok_or_else(|| AppError::missing_argument("crawl mode requires --url"))?;
            Job::Crawl {
                url: parse_page_url(url)?.to_string(),
            }
        }
        Mode::Auto => Job::Auto,
    };
    Ok(Some(job))
}

async fn run(cli: Cli) -> Result<()> {
    let Some(job) = plan(&cli)? else {
        pipeline::run_analyze();
        return Ok(());
    };
    if cli.repo.is_some() {
        log::debug!("--repo is accepted but not used by any mode");
    }

    let config = Config::load_validated(&cli.config)?;
    log::info!("Loaded configuration from {}", cli.config.display());

    let fetcher = HttpFetcher::new(&config.crawl_settings)?;
    let storage = LocalStorage::new(&config.output_dir);
    let search = SiteQuerySearch::new(&config.search_settings);
    let pipeline = Pipeline::new(&config, &fetcher, &storage);

    let stats: RunStats = match job {
        Job::Search { topic } => pipeline::run_search(&pipeline, &search, topic.as_deref()).await,
        Job::Crawl { url } => pipeline::run_crawl(&pipeline, &url).await.stats,
        Job::Auto => pipeline::run_auto(&pipeline, &search).await,
    };

    pipeline::print_report(&stats);
    Ok(())
}

/// Main entry point for the CLI application.
#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);
    console::set_quiet(cli.quiet);

    match run(cli).await {
        Ok(()) => {
            console::success("Done!");
            ExitCode::SUCCESS
        }
        Err(e) => {
            console::error(&e.to_string());
            ExitCode::FAILURE
        }
    }
}
