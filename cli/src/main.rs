//! CLI for the workflow pin updater.
//!
//! Replaces a pinned action reference in the workflow files of every
//! repository owned by an organization or user.

use clap::{Parser, ValueEnum};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::error;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};
use workflow_pin_updater::{
    load_config, resolve_token, RunSummary, Runner, RunnerConfig, RunnerError, UpdateConfig,
    WriteMode,
};

/// Workflow Pin Updater - Replace a pinned action reference across an account's workflows.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to a TOML run configuration. Flags override its values.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Organization or user whose repositories are scanned.
    #[arg(long, env = "PIN_UPDATER_OWNER")]
    owner: Option<String>,

    /// Literal to search for (e.g. "aws-actions/amazon-ecs-deploy-task-definition@v1").
    #[arg(long)]
    search: Option<String>,

    /// Literal to write in its place.
    #[arg(long)]
    replace: Option<String>,

    /// Directory scanned in every repository.
    #[arg(long)]
    path: Option<String>,

    /// How changes are written back.
    #[arg(long, value_enum)]
    mode: Option<Mode>,

    /// Target branch (defaults to each repository's default branch).
    #[arg(long)]
    branch: Option<String>,

    /// Descend into subdirectories of the workflow path.
    #[arg(long)]
    recursive: bool,

    /// Preview changes without writing anything.
    #[arg(long)]
    dry_run: bool,

    /// Skip the rate limit check before API-heavy steps.
    #[arg(long)]
    no_rate_limit_guard: bool,

    /// GitHub API base URL (for GitHub Enterprise).
    #[arg(long, env = "GITHUB_API_URL")]
    api_url: Option<String>,

    /// GitHub Personal Access Token (falls back to GITHUB_TOKEN).
    #[arg(long)]
    token: Option<String>,
}

/// Write-back mode flag.
#[derive(Debug, Clone, Copy, ValueEnum)]
enum Mode {
    /// Commit directly to the target branch.
    Direct,
    /// Commit to a new branch and open a pull request.
    PullRequest,
}

impl From<Mode> for WriteMode {
    fn from(mode: Mode) -> Self {
        match mode {
            Mode::Direct => WriteMode::Direct,
            Mode::PullRequest => WriteMode::PullRequest,
        }
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    init_tracing();
    // Both ring and aws-lc-rs may be compiled in; pick one explicitly.
    let _ = rustls::crypto::aws_lc_rs::default_provider().install_default();

    let args = Args::parse();

    match run(args).await {
        Ok(summary) => {
            print_summary(&summary);
            ExitCode::from(0)
        }
        Err(e) => {
            error!(error = %e, "Critical failure");
            ExitCode::from(2)
        }
    }
}

/// Initializes tracing with environment filter support.
///
/// Sets up the global tracing subscriber with:
/// - Compact log formatting (single-line output)
/// - Log level filtering via `RUST_LOG` env var (defaults to "info")
fn init_tracing() {
    tracing_subscriber::registry()
        .with(fmt::layer().compact().with_target(false))
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();
}

/// Main execution logic.
async fn run(args: Args) -> Result<RunSummary, RunnerError> {
    let token = resolve_token(args.token.clone())?;
    let update = build_update_config(args)?;
    let runner = Runner::new(RunnerConfig::new(token, update))?;
    Ok(runner.run().await)
}

/// Merges the config file (if any) with command line flags.
fn build_update_config(args: Args) -> Result<UpdateConfig, RunnerError> {
    let mut config = match &args.config {
        Some(path) => load_config(path)?,
        None => UpdateConfig::default(),
    };

    if let Some(owner) = args.owner {
        config.owner = owner;
    }
    if let Some(search) = args.search {
        config.search = search;
    }
    if let Some(replace) = args.replace {
        config.replace = replace;
    }
    if let Some(path) = args.path {
        config.workflow_path = path;
    }
    if let Some(mode) = args.mode {
        config.mode = mode.into();
    }
    if let Some(branch) = args.branch {
        config.branch = Some(branch);
    }
    if let Some(api_url) = args.api_url {
        config.api_url = Some(api_url);
    }
    config.recursive |= args.recursive;
    config.dry_run |= args.dry_run;
    if args.no_rate_limit_guard {
        config.rate_limit_guard = false;
    }

    config.validate()?;
    Ok(config)
}

/// Prints the final run summary.
fn print_summary(summary: &RunSummary) {
    println!("\nSummary:");
    println!(
        "  Mode: {}",
        if summary.dry_run { "Dry Run" } else { "Live" }
    );
    println!(
        "  Repositories discovered: {}",
        summary.repositories_discovered
    );
    println!("  Repositories scanned: {}", summary.repositories_scanned);
    println!(
        "  Repositories with matches: {}",
        summary.repositories_with_matches
    );
    println!(
        "  Repositories without workflow files: {}",
        summary.repositories_without_workflows
    );
    println!("  Repositories skipped: {}", summary.repositories_skipped);
    println!(
        "  Files scanned: {} (matched: {})",
        summary.files_scanned, summary.files_matched
    );

    if !summary.dry_run {
        println!("  Repositories updated: {}", summary.repositories_updated);
        println!(
            "  Repositories unchanged: {}",
            summary.repositories_unchanged()
        );
        println!("  Files updated: {}", summary.files_updated);
        println!("  Pull requests created: {}", summary.pull_requests_created());
        for pr in &summary.pull_requests {
            println!(
                "    {}: {} ({} -> {}) {}",
                pr.repository,
                pr.title,
                pr.branch_name,
                pr.base_branch,
                pr.status.url().unwrap_or_default()
            );
        }
    }

    if summary.has_failures() {
        println!("  Repositories failed: {}", summary.repositories_failed);
        println!("  Files failed: {}", summary.files_failed);
    }
}
