//! CLI progress callback with styled output

use crate::cli::style::{Stream, Stylize, arrow, check, hyperlink_url};
use anstream::{eprintln, println};
use async_trait::async_trait;
use auto_pr::error::Error;
use auto_pr::types::{Milestone, PullRequest, Session};
use auto_pr::workflow::{Phase, ProgressCallback};

/// Prints workflow progress to the terminal
pub struct CliProgress;

#[async_trait]
impl ProgressCallback for CliProgress {
    async fn on_phase(&self, phase: Phase) {
        match phase {
            Phase::Authenticating | Phase::Complete => {}
            _ => {
                println!();
                println!("{}...", phase.to_string().emphasis());
            }
        }
    }

    async fn on_authenticated(&self, session: &Session) {
        println!("  {} Logged in as {}", check(), session.login.accent());
    }

    async fn on_pr_created(&self, pr: &PullRequest, reused: bool) {
        let pr_num = format!("#{}", pr.number);
        if reused {
            println!(
                "  {} Reusing open PR {} for {}",
                check(),
                pr_num.accent(),
                pr.head_ref.emphasis()
            );
        } else {
            println!(
                "  {} Created PR {} ({} {} {})",
                check(),
                pr_num.accent(),
                pr.head_ref.accent(),
                arrow(),
                pr.base_ref.accent()
            );
        }
        println!("    {}", hyperlink_url(Stream::Stdout, &pr.html_url));
    }

    async fn on_label_created(&self, name: &str) {
        println!("  {} Created label {}", check(), name.accent());
    }

    async fn on_milestone_resolved(&self, milestone: &Milestone, created: bool) {
        let verb = if created { "Created" } else { "Using" };
        println!(
            "  {} {verb} milestone {} {}",
            check(),
            milestone.title.accent(),
            format!("(#{})", milestone.number).muted()
        );
    }

    async fn on_error(&self, err: &Error) {
        eprintln!("  {}: {}", "warning".warn(), err);
    }

    async fn on_message(&self, message: &str) {
        println!("  {}", message.muted());
    }
}
