//! auto-pr - pull request automation for GitHub
//!
//! CLI binary: branch, commit, push, then open a labelled, milestoned and
//! assigned pull request.

use anstream::eprintln;
use anyhow::Result;
use auto_pr::config::resolve_api_base;
use clap::{Args, Parser, Subcommand};
use cli::style::Stylize;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

mod cli;

#[derive(Parser)]
#[command(name = "auto-pr")]
#[command(about = "Create a branch, push a change and open a labelled, milestoned pull request")]
#[command(version)]
#[command(args_conflicts_with_subcommands = true)]
struct Cli {
    /// GitHub API root (defaults to https://api.github.com, or GH_HOST's /api/v3)
    #[arg(long, global = true, env = "GITHUB_API_URL")]
    api_url: Option<String>,

    /// GitHub Enterprise hostname
    #[arg(long, global = true, env = "GH_HOST", hide_env_values = true)]
    gh_host: Option<String>,

    /// Enable debug logging (RUST_LOG takes precedence)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(flatten)]
    create: CreateArgs,

    #[command(subcommand)]
    command: Option<Commands>,
}

/// Answers given up front; anything left out is prompted for
#[derive(Args)]
struct CreateArgs {
    /// Path to the git working tree (defaults to current directory)
    #[arg(short, long)]
    path: Option<PathBuf>,

    /// Git remote to push to
    #[arg(long, default_value = "origin")]
    remote: String,

    /// Repository as owner/repo
    #[arg(long)]
    repo: Option<String>,

    /// Feature branch to create
    #[arg(long)]
    branch: Option<String>,

    /// File to create or append to
    #[arg(long)]
    file: Option<String>,

    /// Commit message
    #[arg(short, long)]
    message: Option<String>,

    /// Base branch (defaults to the repository's default branch)
    #[arg(long)]
    base: Option<String>,

    /// Pull request title (defaults to the commit message)
    #[arg(long)]
    title: Option<String>,

    /// Pull request description
    #[arg(long)]
    body: Option<String>,

    /// Comma-separated labels
    #[arg(long)]
    labels: Option<String>,

    /// Milestone title
    #[arg(long)]
    milestone: Option<String>,

    /// Accept defaults for everything not given on the command line
    #[arg(short, long)]
    yes: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Authentication management
    Auth {
        #[command(subcommand)]
        action: AuthAction,
    },
}

#[derive(Subcommand)]
enum AuthAction {
    /// Test authentication
    Test,
    /// Show authentication setup instructions
    Setup,
}

fn init_tracing(verbose: bool) {
    let fallback = if verbose { "auto_pr=debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

async fn run(cli: Cli) -> Result<()> {
    let api_base = resolve_api_base(cli.api_url.as_deref(), cli.gh_host.as_deref())?;

    match cli.command {
        None => {
            let args = cli.create;
            let options = cli::CreateOptions {
                path: args.path.unwrap_or_else(|| PathBuf::from(".")),
                remote: args.remote,
                repo: args.repo,
                branch: args.branch,
                file: args.file,
                message: args.message,
                base: args.base,
                title: args.title,
                body: args.body,
                labels: args.labels,
                milestone: args.milestone,
                yes: args.yes,
            };
            cli::run_create(&api_base, options).await?;
        }
        Some(Commands::Auth { action }) => match action {
            AuthAction::Test => cli::run_auth_test(&api_base).await?,
            AuthAction::Setup => cli::run_auth_setup(&api_base),
        },
    }

    Ok(())
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{}: {err:#}", "error".error());
            ExitCode::FAILURE
        }
    }
}
