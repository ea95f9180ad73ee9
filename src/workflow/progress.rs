//! Progress callback trait for interface-agnostic updates
//!
//! This trait allows different interfaces (CLI, tests, ...) to receive
//! progress updates while the workflow runs.

use crate::error::Error;
use crate::types::{Milestone, PullRequest, Session};
use async_trait::async_trait;
use std::fmt;

/// Workflow phase
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Checking the token against the API
    Authenticating,
    /// Looking up the repository
    ResolvingRepository,
    /// Creating, committing and pushing the branch
    PublishingBranch,
    /// Opening the pull request
    CreatingPullRequest,
    /// Ensuring labels exist and attaching them
    ReconcilingLabels,
    /// Ensuring the milestone exists and attaching it
    ReconcilingMilestone,
    /// Assigning the PR to the authenticated user
    Assigning,
    /// Workflow complete
    Complete,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            Self::Authenticating => "Authenticating",
            Self::ResolvingRepository => "Resolving repository",
            Self::PublishingBranch => "Publishing branch",
            Self::CreatingPullRequest => "Creating pull request",
            Self::ReconcilingLabels => "Adding labels",
            Self::ReconcilingMilestone => "Checking milestone",
            Self::Assigning => "Assigning",
            Self::Complete => "Done",
        };
        write!(f, "{text}")
    }
}

/// Progress callback trait
///
/// Implement this trait to receive progress updates during the workflow.
#[async_trait]
pub trait ProgressCallback: Send + Sync {
    /// Called when entering a new phase
    async fn on_phase(&self, phase: Phase);

    /// Called once the token has been verified
    async fn on_authenticated(&self, session: &Session);

    /// Called when a PR is created, or an existing one is reused
    async fn on_pr_created(&self, pr: &PullRequest, reused: bool);

    /// Called when a missing label is created
    async fn on_label_created(&self, name: &str);

    /// Called when the milestone has been resolved
    async fn on_milestone_resolved(&self, milestone: &Milestone, created: bool);

    /// Called when a failure is tolerated rather than aborting the run
    async fn on_error(&self, error: &Error);

    /// Called with a general status message
    async fn on_message(&self, message: &str);
}

/// No-op progress callback for testing or when progress isn't needed
pub struct NoopProgress;

#[async_trait]
impl ProgressCallback for NoopProgress {
    async fn on_phase(&self, _phase: Phase) {}
    async fn on_authenticated(&self, _session: &Session) {}
    async fn on_pr_created(&self, _pr: &PullRequest, _reused: bool) {}
    async fn on_label_created(&self, _name: &str) {}
    async fn on_milestone_resolved(&self, _milestone: &Milestone, _created: bool) {}
    async fn on_error(&self, _error: &Error) {}
    async fn on_message(&self, _message: &str) {}
}
