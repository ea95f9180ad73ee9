//! Hosting platform access
//!
//! [`ApiGateway`] performs authenticated calls; [`GitHubService`] maps the
//! workflow's operations onto GitHub's REST endpoints.

mod gateway;
mod github;
mod repo_id;

pub use gateway::ApiGateway;
pub use github::GitHubService;
pub use repo_id::parse_repo_id;

use crate::error::Result;
use crate::types::{
    Label, Milestone, NewMilestone, NewPullRequest, PullRequest, RepoId, RepositoryRef,
};
use async_trait::async_trait;

/// Hosting operations used by the pull request workflow
///
/// Implemented by [`GitHubService`] and by in-memory mocks in tests.
#[async_trait]
pub trait HostingApi: Send + Sync {
    /// Login of the authenticated user
    async fn current_user(&self) -> Result<String>;

    /// Repository metadata, including its default branch
    async fn get_repository(&self, repo: &RepoId) -> Result<RepositoryRef>;

    /// Find an open PR from `head` into `base`
    async fn find_open_pull_request(
        &self,
        repo: &RepoId,
        head: &str,
        base: &str,
    ) -> Result<Option<PullRequest>>;

    /// Open a new PR
    async fn create_pull_request(&self, repo: &RepoId, pr: &NewPullRequest) -> Result<PullRequest>;

    /// All labels defined in the repository
    async fn list_labels(&self, repo: &RepoId) -> Result<Vec<Label>>;

    /// Define a new repository label
    async fn create_label(&self, repo: &RepoId, name: &str) -> Result<()>;

    /// Add labels to an issue or PR (set union with its current labels)
    async fn add_labels(&self, repo: &RepoId, number: u64, labels: &[String]) -> Result<()>;

    /// All milestones of the repository, open and closed
    async fn list_milestones(&self, repo: &RepoId) -> Result<Vec<Milestone>>;

    /// Create a milestone
    async fn create_milestone(&self, repo: &RepoId, milestone: &NewMilestone) -> Result<Milestone>;

    /// Set the milestone of an issue or PR
    async fn set_milestone(&self, repo: &RepoId, number: u64, milestone: u64) -> Result<()>;

    /// Add assignees to an issue or PR
    async fn add_assignees(&self, repo: &RepoId, number: u64, logins: &[String]) -> Result<()>;
}
