//! Local branch publishing
//!
//! Creates the feature branch, appends the marker line to the target file,
//! commits it and pushes the branch with upstream tracking.

mod cli;

pub use cli::GitCli;

use crate::error::Result;
use async_trait::async_trait;
use std::path::PathBuf;

/// The change to publish on a new branch
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BranchChange {
    /// Branch to create
    pub branch: String,
    /// File to append the marker line to, relative to the working tree
    pub file: PathBuf,
    /// Line appended to the file
    pub marker: String,
    /// Commit message
    pub commit_message: String,
    /// Remote to push to
    pub remote: String,
}

/// Publishes a change as a new remote branch
#[async_trait]
pub trait BranchPublisher: Send + Sync {
    /// Create the branch, commit the change and push it
    ///
    /// Fails if the branch exists or the push is rejected; nothing is
    /// rolled back.
    async fn publish(&self, change: &BranchChange) -> Result<()>;

    /// URL of a remote, if it is configured
    async fn remote_url(&self, remote: &str) -> Result<Option<String>>;
}
