//! Milestone reconciliation

use crate::config::WorkflowDefaults;
use crate::error::Result;
use crate::platform::HostingApi;
use crate::types::{Milestone, NewMilestone, RepoId};
use tracing::info;

/// The milestone a PR gets attached to
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MilestoneResolution {
    /// Resolved milestone
    pub milestone: Milestone,
    /// Whether this run created it
    pub created: bool,
}

/// Normalize a milestone title: first line only, trimmed
pub fn normalize_milestone_title(raw: &str) -> String {
    raw.lines().next().unwrap_or_default().trim().to_string()
}

/// Find the milestone titled exactly `title`, creating it if absent
///
/// Matching is exact and case-sensitive. Concurrent runs may both miss and
/// both create; that race is accepted.
pub async fn reconcile_milestone(
    api: &dyn HostingApi,
    repo: &RepoId,
    title: &str,
) -> Result<MilestoneResolution> {
    let existing = api.list_milestones(repo).await?;

    if let Some(milestone) = existing.into_iter().find(|m| m.title == title) {
        info!(number = milestone.number, title, "Reusing milestone");
        return Ok(MilestoneResolution {
            milestone,
            created: false,
        });
    }

    let milestone = api
        .create_milestone(
            repo,
            &NewMilestone {
                title: title.to_string(),
                description: Some(WorkflowDefaults::milestone_description(title)),
                state: Some("open".to_string()),
            },
        )
        .await?;
    info!(number = milestone.number, title, "Created milestone");

    Ok(MilestoneResolution {
        milestone,
        created: true,
    })
}
