//! Core types for auto-pr

use crate::auth::AuthSource;
use serde::{Deserialize, Serialize};
use std::fmt;

/// The authenticated identity for one run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    /// Login of the token owner; becomes the PR assignee
    pub login: String,
    /// Where the token was obtained from
    pub source: AuthSource,
}

/// A repository identifier (`owner/name`)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RepoId {
    /// Repository owner (user or organization)
    pub owner: String,
    /// Repository name
    pub name: String,
}

impl RepoId {
    /// Create a repository identifier from its parts
    pub fn new(owner: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            owner: owner.into(),
            name: name.into(),
        }
    }
}

impl fmt::Display for RepoId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.owner, self.name)
    }
}

/// A repository as resolved from the hosting API
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepositoryRef {
    /// Owner/name pair
    pub id: RepoId,
    /// Primary branch, the default PR base
    pub default_branch: String,
}

/// A pull request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PullRequest {
    /// PR number
    pub number: u64,
    /// Web URL for the PR
    pub html_url: String,
    /// Base branch name
    pub base_ref: String,
    /// Head branch name
    pub head_ref: String,
    /// PR title
    pub title: String,
}

/// Payload for opening a pull request
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NewPullRequest {
    /// PR title
    pub title: String,
    /// Branch holding the change
    pub head: String,
    /// Branch to merge into
    pub base: String,
    /// PR description
    pub body: String,
}

/// A repository label
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Label {
    /// Label name, unique within the repository
    pub name: String,
}

/// A repository milestone
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Milestone {
    /// Milestone number, used when attaching to an issue or PR
    pub number: u64,
    /// Milestone title
    pub title: String,
}

/// Payload for creating a milestone
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NewMilestone {
    /// Milestone title
    pub title: String,
    /// Optional description
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Optional state (`open` or `closed`)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
}
