//! Label reconciliation
//!
//! Missing labels are created first; the whole requested set is then
//! attached in one call.

use crate::error::Result;
use crate::platform::HostingApi;
use crate::types::RepoId;
use crate::workflow::ProgressCallback;
use std::collections::HashSet;
use tracing::{info, warn};

/// What label reconciliation did
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LabelOutcome {
    /// Labels attached to the PR, in request order
    pub attached: Vec<String>,
    /// Labels this run created
    pub created: Vec<String>,
    /// Labels whose creation hit "already exists" and was tolerated
    pub conflicted: Vec<String>,
}

/// Parse a comma-separated label list
///
/// Names are trimmed, empty entries dropped and duplicates removed keeping
/// the first occurrence.
pub fn parse_labels(raw: &str) -> Vec<String> {
    let mut seen = HashSet::new();
    raw.split(',')
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .filter(|name| seen.insert(*name))
        .map(ToString::to_string)
        .collect()
}

/// Ensure every desired label exists, then attach all of them to the PR
///
/// Labels already defined are left untouched. A creation failure for a
/// label that turns out to exist already is reported and skipped; any other
/// failure aborts.
pub async fn reconcile_labels(
    api: &dyn HostingApi,
    repo: &RepoId,
    pr_number: u64,
    desired: &[String],
    progress: &dyn ProgressCallback,
) -> Result<LabelOutcome> {
    let mut outcome = LabelOutcome::default();
    if desired.is_empty() {
        return Ok(outcome);
    }

    let existing: HashSet<String> = api
        .list_labels(repo)
        .await?
        .into_iter()
        .map(|label| label.name)
        .collect();

    for name in desired.iter().filter(|name| !existing.contains(*name)) {
        match api.create_label(repo, name).await {
            Ok(()) => {
                info!(label = %name, "Created label");
                progress.on_label_created(name).await;
                outcome.created.push(name.clone());
            }
            Err(e) if e.is_already_exists() => {
                warn!(label = %name, "Label appeared since listing, reusing it");
                progress.on_error(&e).await;
                outcome.conflicted.push(name.clone());
            }
            Err(e) => return Err(e),
        }
    }

    api.add_labels(repo, pr_number, desired).await?;
    outcome.attached = desired.to_vec();

    Ok(outcome)
}
