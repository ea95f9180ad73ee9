//! Workflow execution
//!
//! Runs the fixed sequence: identity check, repository lookup, branch
//! publish, PR creation, label and milestone reconciliation, assignment.
//! Each step feeds the next and any failure stops the run where it is;
//! nothing created earlier is rolled back.

use crate::auth::{AuthSource, verify_github_auth};
use crate::config::WorkflowDefaults;
use crate::error::Result;
use crate::git::{BranchChange, BranchPublisher};
use crate::platform::{HostingApi, parse_repo_id};
use crate::prompt::{Field, Prompter};
use crate::types::{NewPullRequest, PullRequest, RepositoryRef, Session};
use crate::workflow::labels::{LabelOutcome, parse_labels, reconcile_labels};
use crate::workflow::milestone::{
    MilestoneResolution, normalize_milestone_title, reconcile_milestone,
};
use crate::workflow::{Phase, ProgressCallback};
use std::path::PathBuf;
use tracing::{debug, info};

/// Result of a completed run
#[derive(Debug, Clone)]
pub struct WorkflowReport {
    /// Authenticated identity
    pub session: Session,
    /// Repository the PR was opened against
    pub repository: RepositoryRef,
    /// The pull request
    pub pull_request: PullRequest,
    /// Whether an already-open PR for the branch was reused
    pub reused_pull_request: bool,
    /// Label reconciliation outcome
    pub labels: LabelOutcome,
    /// Milestone attached, `None` when no title was given
    pub milestone: Option<MilestoneResolution>,
    /// Assigned login
    pub assignee: String,
}

/// Answers collected after the branch is published
struct PullRequestDetails {
    request: NewPullRequest,
    labels: Vec<String>,
    milestone: String,
}

/// The pull request workflow and its collaborators
pub struct Workflow<'a> {
    api: &'a dyn HostingApi,
    publisher: &'a dyn BranchPublisher,
    prompter: &'a dyn Prompter,
    progress: &'a dyn ProgressCallback,
    defaults: WorkflowDefaults,
    token_source: AuthSource,
}

impl<'a> Workflow<'a> {
    /// Wire up a workflow
    pub fn new(
        api: &'a dyn HostingApi,
        publisher: &'a dyn BranchPublisher,
        prompter: &'a dyn Prompter,
        progress: &'a dyn ProgressCallback,
    ) -> Self {
        Self {
            api,
            publisher,
            prompter,
            progress,
            defaults: WorkflowDefaults::default(),
            token_source: AuthSource::EnvVar,
        }
    }

    /// Override the prompt defaults
    #[must_use]
    pub fn with_defaults(mut self, defaults: WorkflowDefaults) -> Self {
        self.defaults = defaults;
        self
    }

    /// Record where the API token came from
    #[must_use]
    pub const fn with_token_source(mut self, source: AuthSource) -> Self {
        self.token_source = source;
        self
    }

    /// Run every step in order
    pub async fn run(&self) -> Result<WorkflowReport> {
        self.progress.on_phase(Phase::Authenticating).await;
        let session = verify_github_auth(self.api, self.token_source).await?;
        info!(login = %session.login, "Authenticated");
        self.progress.on_authenticated(&session).await;

        self.progress.on_phase(Phase::ResolvingRepository).await;
        let repository = self.resolve_repository().await?;

        self.progress.on_phase(Phase::PublishingBranch).await;
        let change = self.publish_branch().await?;

        self.progress.on_phase(Phase::CreatingPullRequest).await;
        let details = self.collect_pull_request_details(&repository, &change)?;
        let (pull_request, reused_pull_request) =
            self.open_pull_request(&repository, &details.request).await?;
        self.progress
            .on_pr_created(&pull_request, reused_pull_request)
            .await;

        let repo = &repository.id;

        self.progress.on_phase(Phase::ReconcilingLabels).await;
        if !details.labels.is_empty() {
            self.progress
                .on_message(&format!("Adding labels: {}", details.labels.join(", ")))
                .await;
        }
        let labels = reconcile_labels(
            self.api,
            repo,
            pull_request.number,
            &details.labels,
            self.progress,
        )
        .await?;

        self.progress.on_phase(Phase::ReconcilingMilestone).await;
        let milestone = if details.milestone.is_empty() {
            self.progress.on_message("No milestone requested").await;
            None
        } else {
            let resolution = reconcile_milestone(self.api, repo, &details.milestone).await?;
            self.progress
                .on_milestone_resolved(&resolution.milestone, resolution.created)
                .await;
            self.api
                .set_milestone(repo, pull_request.number, resolution.milestone.number)
                .await?;
            Some(resolution)
        };

        self.progress.on_phase(Phase::Assigning).await;
        self.api
            .add_assignees(repo, pull_request.number, std::slice::from_ref(&session.login))
            .await?;

        self.progress.on_phase(Phase::Complete).await;
        info!(url = %pull_request.html_url, "Workflow complete");

        let assignee = session.login.clone();
        Ok(WorkflowReport {
            session,
            repository,
            pull_request,
            reused_pull_request,
            labels,
            milestone,
            assignee,
        })
    }

    /// Configured repository, else the one the push remote points at
    async fn default_repository(&self) -> String {
        if let Some(repo) = &self.defaults.repository {
            return repo.clone();
        }

        match self.publisher.remote_url(&self.defaults.remote).await {
            Ok(Some(url)) => parse_repo_id(&url)
                .map(|id| id.to_string())
                .unwrap_or_default(),
            Ok(None) => String::new(),
            Err(e) => {
                debug!("Could not read remote {}: {e}", self.defaults.remote);
                String::new()
            }
        }
    }

    async fn resolve_repository(&self) -> Result<RepositoryRef> {
        let default = self.default_repository().await;
        let answer = self.prompter.ask(Field::Repository, &default)?;
        let repo = parse_repo_id(&answer)?;
        let repository = self.api.get_repository(&repo).await?;
        info!(repo = %repository.id, default_branch = %repository.default_branch, "Resolved repository");
        Ok(repository)
    }

    async fn publish_branch(&self) -> Result<BranchChange> {
        let branch = self.prompter.ask(Field::Branch, &self.defaults.branch)?;
        let file = self.prompter.ask(Field::File, &self.defaults.file)?;
        let commit_message = self
            .prompter
            .ask(Field::CommitMessage, &WorkflowDefaults::commit_message(&file))?;

        let change = BranchChange {
            branch,
            file: PathBuf::from(file),
            marker: self.defaults.marker.clone(),
            commit_message,
            remote: self.defaults.remote.clone(),
        };

        self.progress
            .on_message(&format!("Creating and pushing branch {}", change.branch))
            .await;
        self.publisher.publish(&change).await?;
        Ok(change)
    }

    fn collect_pull_request_details(
        &self,
        repository: &RepositoryRef,
        change: &BranchChange,
    ) -> Result<PullRequestDetails> {
        let base = self
            .prompter
            .ask(Field::BaseBranch, &repository.default_branch)?;
        let title = self.prompter.ask(Field::Title, &change.commit_message)?;
        let body = self.prompter.ask(Field::Body, &self.defaults.body)?;
        let labels = parse_labels(&self.prompter.ask(Field::Labels, &self.defaults.labels)?);
        let milestone =
            normalize_milestone_title(&self.prompter.ask(Field::Milestone, &self.defaults.milestone)?);

        Ok(PullRequestDetails {
            request: NewPullRequest {
                title,
                head: change.branch.clone(),
                base,
                body,
            },
            labels,
            milestone,
        })
    }

    /// Reuse an open PR for the same head and base if one exists, else open a new one
    async fn open_pull_request(
        &self,
        repository: &RepositoryRef,
        request: &NewPullRequest,
    ) -> Result<(PullRequest, bool)> {
        if let Some(existing) = self
            .api
            .find_open_pull_request(&repository.id, &request.head, &request.base)
            .await?
        {
            info!(
                number = existing.number,
                head = %request.head,
                base = %request.base,
                "Reusing open pull request"
            );
            return Ok((existing, true));
        }

        let pr = self
            .api
            .create_pull_request(&repository.id, request)
            .await?;
        info!(number = pr.number, url = %pr.html_url, "Created pull request");
        Ok((pr, false))
    }
}
