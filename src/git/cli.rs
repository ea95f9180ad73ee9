//! Branch publishing through the git command line

use crate::error::{Error, Result};
use crate::git::{BranchChange, BranchPublisher};
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tokio::fs::OpenOptions;
use tokio::io::AsyncWriteExt;
use tokio::process::Command;
use tracing::{debug, info};

/// Runs `git` in a working tree
#[derive(Debug, Clone)]
pub struct GitCli {
    workdir: PathBuf,
}

impl GitCli {
    /// Operate on the working tree at `workdir`
    pub fn new(workdir: impl Into<PathBuf>) -> Self {
        Self {
            workdir: workdir.into(),
        }
    }

    /// Working tree this publisher operates on
    pub fn workdir(&self) -> &Path {
        &self.workdir
    }

    async fn git(&self, args: &[&str]) -> Result<String> {
        debug!("git {}", args.join(" "));
        let output = Command::new("git")
            .args(args)
            .current_dir(&self.workdir)
            .output()
            .await
            .map_err(|e| Error::Git(format!("failed to run git: {e}")))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            let stdout = String::from_utf8_lossy(&output.stdout);
            let detail = if stderr.trim().is_empty() {
                stdout.trim()
            } else {
                stderr.trim()
            };
            return Err(Error::Git(format!("`git {}` failed: {detail}", args.join(" "))));
        }

        Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
    }

    async fn append_marker(&self, file: &Path, marker: &str) -> Result<()> {
        let mut handle = OpenOptions::new()
            .create(true)
            .append(true)
            .open(self.workdir.join(file))
            .await?;
        handle.write_all(format!("\n{marker}\n").as_bytes()).await?;
        handle.flush().await?;
        Ok(())
    }
}

#[async_trait]
impl BranchPublisher for GitCli {
    async fn publish(&self, change: &BranchChange) -> Result<()> {
        let file = change
            .file
            .to_str()
            .ok_or_else(|| Error::Git(format!("non UTF-8 path: {}", change.file.display())))?;

        info!(branch = %change.branch, "Creating branch");
        self.git(&["checkout", "-b", &change.branch]).await?;

        info!(file, "Appending marker line");
        self.append_marker(&change.file, &change.marker).await?;

        self.git(&["add", "--", file]).await?;
        self.git(&["commit", "-m", &change.commit_message]).await?;

        info!(remote = %change.remote, branch = %change.branch, "Pushing branch");
        self.git(&["push", "--set-upstream", &change.remote, &change.branch])
            .await?;
        Ok(())
    }

    async fn remote_url(&self, remote: &str) -> Result<Option<String>> {
        match self.git(&["remote", "get-url", remote]).await {
            Ok(url) if !url.is_empty() => Ok(Some(url)),
            Ok(_) | Err(Error::Git(_)) => Ok(None),
            Err(e) => Err(e),
        }
    }
}
