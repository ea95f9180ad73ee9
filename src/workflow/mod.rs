//! Pull request workflow
//!
//! The fixed, linear sequence that turns a local change into an opened,
//! labelled, milestoned and assigned pull request:
//! 1. Authenticate and resolve the repository
//! 2. Publish the branch
//! 3. Open the pull request
//! 4. Reconcile labels and milestone, then assign

mod execute;
mod labels;
mod milestone;
mod progress;

pub use execute::{Workflow, WorkflowReport};
pub use labels::{LabelOutcome, parse_labels, reconcile_labels};
pub use milestone::{MilestoneResolution, normalize_milestone_title, reconcile_milestone};
pub use progress::{NoopProgress, Phase, ProgressCallback};
