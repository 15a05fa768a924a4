use anyhow::Result;
use chrono::Utc;
use clap::Parser;
use std::future::Future;
use std::path::PathBuf;
use std::time::Instant;
use tracing::{debug, info, info_span, warn};
use tracing_subscriber::EnvFilter;

use pr_review_time::config::{load_config, validate_config, Config};
use pr_review_time::github::{create_client, GitHubRepository, DEFAULT_CONCURRENCY};
use pr_review_time::output::{printer_for, OutputFormat};
use pr_review_time::window::parse_date_bound;
use pr_review_time::{MeasureOptions, RepoId, ReviewMetrics, ReviewTimeUseCase, StateFilter};

const EXIT_SUCCESS: i32 = 0;
const EXIT_FAILURE: i32 = 1;
const EXIT_INTERRUPTED: i32 = 130;

#[derive(Parser, Debug)]
#[command(name = "pr-review-time")]
#[command(
    about = "Measure time to first review, first approval and merge for GitHub pull requests",
    long_about = None
)]
#[command(version)]
struct Cli {
    /// Repository owner
    #[arg(short, long)]
    owner: String,

    /// Repository name
    #[arg(short, long)]
    repo: String,

    /// Only PRs created on or after this date (YYYY-MM-DD or a span like 30d)
    #[arg(long)]
    since: Option<String>,

    /// Only PRs created on or before this date (YYYY-MM-DD or a span like 1w)
    #[arg(long)]
    until: Option<String>,

    /// Pull request state to include [default: closed]
    #[arg(long, value_enum)]
    state: Option<StateFilter>,

    /// Measure a single pull request by number instead of searching
    #[arg(long, conflicts_with_all = ["since", "until", "state"])]
    pr: Option<u64>,

    /// Output format [default: table]
    #[arg(short, long, value_enum)]
    format: Option<OutputFormat>,

    /// Path to config file (defaults to ~/.config/pr-review-time/config.yaml)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(long)]
    debug: bool,
}

fn init_logging(debug: bool) {
    let level = if debug { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("pr_review_time={}", level)));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// Resolves once Ctrl-C is delivered. If the handler cannot be installed this
/// never resolves, so the run is left to finish.
async fn wait_for_interrupt<F>(signal: F)
where
    F: Future<Output = std::io::Result<()>>,
{
    if let Err(e) = signal.await {
        warn!(error = %e, "Failed to listen for Ctrl-C");
        std::future::pending::<()>().await;
    }
}

async fn run(cli: Cli, config: Config) -> Result<(RepoId, Vec<ReviewMetrics>)> {
    let repo = RepoId::new(cli.owner, cli.repo);

    let token = pr_review_time::credentials::get_token()?;
    let client = create_client(&token)?;
    let github = GitHubRepository::new(client)
        .with_bots(config.bots.clone())
        .with_concurrency(config.concurrency.unwrap_or(DEFAULT_CONCURRENCY))
        .with_span(info_span!("github_client", repo = %repo));
    info!("GitHub client initialized");

    let usecase = ReviewTimeUseCase::new(github);

    if let Some(number) = cli.pr {
        let metrics = usecase.execute_one(&repo, number).await?;
        return Ok((repo, vec![metrics]));
    }

    let now = Utc::now();
    let mut opts = MeasureOptions::new(repo.clone());
    opts.state = cli.state.or(config.state).unwrap_or_default();
    opts.since = cli.since.as_deref().map(|s| parse_date_bound(s, now)).transpose()?;
    opts.until = cli.until.as_deref().map(|s| parse_date_bound(s, now)).transpose()?;
    if let Some(per_page) = config.per_page {
        opts.per_page = per_page;
    }
    debug!(?opts, "Measuring review time");

    let metrics = usecase.execute(&opts).await?;
    Ok((repo, metrics))
}

#[tokio::main]
async fn main() {
    // Install rustls crypto provider (required for rustls 0.23+)
    if rustls::crypto::ring::default_provider()
        .install_default()
        .is_err()
    {
        eprintln!("Error: failed to install TLS crypto provider");
        std::process::exit(EXIT_FAILURE);
    }

    let cli = Cli::parse();
    init_logging(cli.debug);
    let start_time = Instant::now();

    let config = match load_config(cli.config.clone()) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            std::process::exit(EXIT_FAILURE);
        }
    };

    if let Err(errors) = validate_config(&config) {
        eprintln!("Error: invalid config:");
        for error in errors {
            eprintln!("  - {}", error);
        }
        std::process::exit(EXIT_FAILURE);
    }

    let format = cli.format.or(config.format).unwrap_or_default();

    let result = tokio::select! {
        result = run(cli, config) => result,
        _ = wait_for_interrupt(tokio::signal::ctrl_c()) => {
            eprintln!("Interrupted");
            std::process::exit(EXIT_INTERRUPTED);
        }
    };

    let (repo, metrics) = match result {
        Ok(r) => r,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            std::process::exit(EXIT_FAILURE);
        }
    };

    debug!(count = metrics.len(), elapsed = ?start_time.elapsed(), "Measured pull requests");

    if let Err(e) = printer_for(format).print(&repo, &metrics) {
        eprintln!("Error printing result: {:#}", e);
        std::process::exit(EXIT_FAILURE);
    }

    std::process::exit(EXIT_SUCCESS);
}
