//! Run configuration: where the API lives and what the prompts default to

use crate::error::{Error, Result};
use url::Url;

/// Public GitHub API root
pub const DEFAULT_API_URL: &str = "https://api.github.com";

/// Line appended to the target file by the branch publisher
pub const MARKER_LINE: &str = "This file was updated by PR automation script.";

/// Resolve the API base URL
///
/// Priority:
/// 1. explicit URL (`--api-url` / `GITHUB_API_URL`)
/// 2. `https://{GH_HOST}/api/v3` for GitHub Enterprise
/// 3. [`DEFAULT_API_URL`]
pub fn resolve_api_base(explicit: Option<&str>, gh_host: Option<&str>) -> Result<Url> {
    let raw = match (explicit, gh_host) {
        (Some(url), _) if !url.trim().is_empty() => url.trim().to_string(),
        (_, Some(host)) if !host.trim().is_empty() && host.trim() != "github.com" => {
            format!("https://{}/api/v3", host.trim())
        }
        _ => DEFAULT_API_URL.to_string(),
    };

    let url = Url::parse(&raw).map_err(|e| Error::Config(format!("invalid API URL {raw}: {e}")))?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(Error::Config(format!("API URL must be http(s): {raw}")));
    }
    Ok(url)
}

/// Host serving the web UI for an API base URL
///
/// `api.github.com` maps to `github.com`; enterprise hosts serve both from
/// the same name.
pub fn web_host(api_base: &Url) -> String {
    match api_base.host_str() {
        Some("api.github.com") | None => "github.com".to_string(),
        Some(host) => host.to_string(),
    }
}

/// Default answers for every prompt of the workflow
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkflowDefaults {
    /// Repository identifier; `None` when it could not be inferred
    pub repository: Option<String>,
    /// Feature branch name
    pub branch: String,
    /// File to append the marker line to
    pub file: String,
    /// PR description
    pub body: String,
    /// Comma-separated labels
    pub labels: String,
    /// Milestone title
    pub milestone: String,
    /// Line appended to the target file
    pub marker: String,
    /// Git remote to push to
    pub remote: String,
}

impl Default for WorkflowDefaults {
    fn default() -> Self {
        Self {
            repository: None,
            branch: "add-readme".to_string(),
            file: "README.md".to_string(),
            body: "This change was made automatically by script.".to_string(),
            labels: "automation,update".to_string(),
            milestone: "v1.0 - First Automation".to_string(),
            marker: MARKER_LINE.to_string(),
            remote: "origin".to_string(),
        }
    }
}

impl WorkflowDefaults {
    /// Default commit message for a target file
    pub fn commit_message(file: &str) -> String {
        format!("Add {file}")
    }

    /// Description given to milestones this tool creates
    pub fn milestone_description(title: &str) -> String {
        format!("Milestone for: {title}")
    }
}
