//! Create command - publish a branch and open a fully decorated PR

use crate::cli::auth::obtain_credentials;
use crate::cli::progress::CliProgress;
use crate::cli::style::{Stream, Stylize, hyperlink_url};
use anstream::println;
use auto_pr::config::WorkflowDefaults;
use auto_pr::error::Result;
use auto_pr::git::GitCli;
use auto_pr::platform::GitHubService;
use auto_pr::prompt::{Field, TerminalPrompter};
use auto_pr::workflow::Workflow;
use std::path::PathBuf;
use url::Url;

/// Options for a create run; `None` fields are prompted for
#[derive(Debug)]
pub struct CreateOptions {
    /// Working tree to operate on
    pub path: PathBuf,
    /// Git remote to push to
    pub remote: String,
    /// Repository identifier
    pub repo: Option<String>,
    /// Feature branch
    pub branch: Option<String>,
    /// File to append to
    pub file: Option<String>,
    /// Commit message
    pub message: Option<String>,
    /// PR base branch
    pub base: Option<String>,
    /// PR title
    pub title: Option<String>,
    /// PR body
    pub body: Option<String>,
    /// Comma-separated labels
    pub labels: Option<String>,
    /// Milestone title
    pub milestone: Option<String>,
    /// Accept defaults instead of prompting
    pub yes: bool,
}

/// Run the create command
pub async fn run_create(api_base: &Url, options: CreateOptions) -> Result<()> {
    println!("{}", "GitHub PR Creator".emphasis());

    let credentials = obtain_credentials(api_base).await?;
    let service = GitHubService::new(api_base, &credentials)?;
    let publisher = GitCli::new(&options.path);

    let prompter = if options.yes {
        TerminalPrompter::accept_defaults()
    } else {
        TerminalPrompter::interactive()
    }
    .with_preset(Field::Repository, options.repo)
    .with_preset(Field::Branch, options.branch)
    .with_preset(Field::File, options.file)
    .with_preset(Field::CommitMessage, options.message)
    .with_preset(Field::BaseBranch, options.base)
    .with_preset(Field::Title, options.title)
    .with_preset(Field::Body, options.body)
    .with_preset(Field::Labels, options.labels)
    .with_preset(Field::Milestone, options.milestone);

    let defaults = WorkflowDefaults {
        remote: options.remote,
        ..WorkflowDefaults::default()
    };

    let progress = CliProgress;
    let report = Workflow::new(&service, &publisher, &prompter, &progress)
        .with_defaults(defaults)
        .with_token_source(credentials.source)
        .run()
        .await?;

    println!();
    println!(
        "{} {}",
        "Done! Pull request created:".success(),
        hyperlink_url(Stream::Stdout, &report.pull_request.html_url)
    );
    Ok(())
}
