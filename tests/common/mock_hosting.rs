//! In-memory hosting service for workflow tests
//!
//! Keeps labels, milestones and pull requests in memory so reconciliation
//! can be checked against the resulting remote state, and records every
//! mutating call for verification.

use async_trait::async_trait;
use auto_pr::error::{Error, Result};
use auto_pr::platform::HostingApi;
use auto_pr::types::{
    Label, Milestone, NewMilestone, NewPullRequest, PullRequest, RepoId, RepositoryRef,
};
use reqwest::StatusCode;
use std::collections::{BTreeSet, HashMap, HashSet};
use std::sync::Mutex;
use std::sync::atomic::{AtomicU64, Ordering};

/// GitHub's body for a duplicate label or milestone
pub const ALREADY_EXISTS_BODY: &str = r#"{"message":"Validation Failed","errors":[{"resource":"Label","code":"already_exists","field":"name"}],"documentation_url":"https://docs.github.com/rest/issues/labels#create-a-label"}"#;

/// Build an API error
pub fn api_error(status: StatusCode, body: &str) -> Error {
    Error::Api {
        status,
        body: body.to_string(),
    }
}

/// Mock hosting service with call tracking and error injection
pub struct MockHostingApi {
    login: String,
    repositories: HashMap<String, String>,
    next_pr_number: AtomicU64,
    next_milestone_number: AtomicU64,
    // Remote state
    labels: Mutex<Vec<String>>,
    milestones: Mutex<Vec<Milestone>>,
    open_prs: Mutex<Vec<PullRequest>>,
    pr_labels: Mutex<HashMap<u64, BTreeSet<String>>>,
    pr_milestone: Mutex<HashMap<u64, u64>>,
    pr_assignees: Mutex<HashMap<u64, BTreeSet<String>>>,
    // Call tracking
    calls: Mutex<Vec<&'static str>>,
    get_repository_calls: Mutex<Vec<RepoId>>,
    create_pr_calls: Mutex<Vec<NewPullRequest>>,
    create_label_calls: Mutex<Vec<String>>,
    add_labels_calls: Mutex<Vec<(u64, Vec<String>)>>,
    create_milestone_calls: Mutex<Vec<NewMilestone>>,
    set_milestone_calls: Mutex<Vec<(u64, u64)>>,
    add_assignees_calls: Mutex<Vec<(u64, Vec<String>)>>,
    // Error injection
    error_on_current_user: Mutex<Option<StatusCode>>,
    error_on_create_pr: Mutex<Option<StatusCode>>,
    racing_labels: Mutex<HashSet<String>>,
    error_on_create_label: Mutex<Option<StatusCode>>,
}

impl MockHostingApi {
    /// A user `login` with access to `repo` whose default branch is `default_branch`
    pub fn new(login: &str, repo: &str, default_branch: &str) -> Self {
        Self {
            login: login.to_string(),
            repositories: HashMap::from([(repo.to_string(), default_branch.to_string())]),
            next_pr_number: AtomicU64::new(1),
            next_milestone_number: AtomicU64::new(1),
            labels: Mutex::new(Vec::new()),
            milestones: Mutex::new(Vec::new()),
            open_prs: Mutex::new(Vec::new()),
            pr_labels: Mutex::new(HashMap::new()),
            pr_milestone: Mutex::new(HashMap::new()),
            pr_assignees: Mutex::new(HashMap::new()),
            calls: Mutex::new(Vec::new()),
            get_repository_calls: Mutex::new(Vec::new()),
            create_pr_calls: Mutex::new(Vec::new()),
            create_label_calls: Mutex::new(Vec::new()),
            add_labels_calls: Mutex::new(Vec::new()),
            create_milestone_calls: Mutex::new(Vec::new()),
            set_milestone_calls: Mutex::new(Vec::new()),
            add_assignees_calls: Mutex::new(Vec::new()),
            error_on_current_user: Mutex::new(None),
            error_on_create_pr: Mutex::new(None),
            racing_labels: Mutex::new(HashSet::new()),
            error_on_create_label: Mutex::new(None),
        }
    }

    // === Remote state setup ===

    /// Define labels in the repository
    pub fn with_labels(self, names: &[&str]) -> Self {
        self.labels
            .lock()
            .unwrap()
            .extend(names.iter().map(ToString::to_string));
        self
    }

    /// Define a milestone in the repository
    pub fn with_milestone(self, number: u64, title: &str) -> Self {
        self.milestones.lock().unwrap().push(Milestone {
            number,
            title: title.to_string(),
        });
        self.next_milestone_number
            .fetch_max(number + 1, Ordering::SeqCst);
        self
    }

    /// Register an already-open PR
    pub fn with_open_pr(self, pr: PullRequest) -> Self {
        self.next_pr_number.fetch_max(pr.number + 1, Ordering::SeqCst);
        self.open_prs.lock().unwrap().push(pr);
        self
    }

    // === Error injection ===

    /// Make `current_user` fail
    pub fn fail_current_user(&self, status: StatusCode) {
        *self.error_on_current_user.lock().unwrap() = Some(status);
    }

    /// Make `create_pull_request` fail
    pub fn fail_create_pr(&self, status: StatusCode) {
        *self.error_on_create_pr.lock().unwrap() = Some(status);
    }

    /// Simulate another client creating `name` between listing and creation
    pub fn race_label(&self, name: &str) {
        self.racing_labels.lock().unwrap().insert(name.to_string());
    }

    /// Make every label creation fail with `status`
    pub fn fail_create_label(&self, status: StatusCode) {
        *self.error_on_create_label.lock().unwrap() = Some(status);
    }

    // === Call verification ===

    /// Names of all calls, in order
    pub fn calls(&self) -> Vec<&'static str> {
        self.calls.lock().unwrap().clone()
    }

    /// Repositories looked up
    pub fn get_repository_calls(&self) -> Vec<RepoId> {
        self.get_repository_calls.lock().unwrap().clone()
    }

    /// All `create_pull_request` payloads
    pub fn create_pr_calls(&self) -> Vec<NewPullRequest> {
        self.create_pr_calls.lock().unwrap().clone()
    }

    /// All `create_label` names
    pub fn create_label_calls(&self) -> Vec<String> {
        self.create_label_calls.lock().unwrap().clone()
    }

    /// All `add_labels` calls
    pub fn add_labels_calls(&self) -> Vec<(u64, Vec<String>)> {
        self.add_labels_calls.lock().unwrap().clone()
    }

    /// All `create_milestone` payloads
    pub fn create_milestone_calls(&self) -> Vec<NewMilestone> {
        self.create_milestone_calls.lock().unwrap().clone()
    }

    /// All `set_milestone` calls as (PR number, milestone number)
    pub fn set_milestone_calls(&self) -> Vec<(u64, u64)> {
        self.set_milestone_calls.lock().unwrap().clone()
    }

    /// All `add_assignees` calls
    pub fn add_assignees_calls(&self) -> Vec<(u64, Vec<String>)> {
        self.add_assignees_calls.lock().unwrap().clone()
    }

    // === Resulting remote state ===

    /// Labels defined in the repository
    pub fn repo_labels(&self) -> Vec<String> {
        self.labels.lock().unwrap().clone()
    }

    /// Labels attached to a PR
    pub fn labels_on(&self, number: u64) -> BTreeSet<String> {
        self.pr_labels
            .lock()
            .unwrap()
            .get(&number)
            .cloned()
            .unwrap_or_default()
    }

    /// Milestone attached to a PR
    pub fn milestone_on(&self, number: u64) -> Option<u64> {
        self.pr_milestone.lock().unwrap().get(&number).copied()
    }

    /// Assignees of a PR
    pub fn assignees_on(&self, number: u64) -> BTreeSet<String> {
        self.pr_assignees
            .lock()
            .unwrap()
            .get(&number)
            .cloned()
            .unwrap_or_default()
    }

    /// Milestones defined in the repository
    pub fn repo_milestones(&self) -> Vec<Milestone> {
        self.milestones.lock().unwrap().clone()
    }

    fn record(&self, call: &'static str) {
        self.calls.lock().unwrap().push(call);
    }
}

#[async_trait]
impl HostingApi for MockHostingApi {
    async fn current_user(&self) -> Result<String> {
        self.record("current_user");
        if let Some(status) = *self.error_on_current_user.lock().unwrap() {
            return Err(api_error(status, r#"{"message":"Bad credentials"}"#));
        }
        Ok(self.login.clone())
    }

    async fn get_repository(&self, repo: &RepoId) -> Result<RepositoryRef> {
        self.record("get_repository");
        self.get_repository_calls.lock().unwrap().push(repo.clone());
        let default_branch = self
            .repositories
            .get(&repo.to_string())
            .ok_or_else(|| api_error(StatusCode::NOT_FOUND, r#"{"message":"Not Found"}"#))?;
        Ok(RepositoryRef {
            id: repo.clone(),
            default_branch: default_branch.clone(),
        })
    }

    async fn find_open_pull_request(
        &self,
        _repo: &RepoId,
        head: &str,
        base: &str,
    ) -> Result<Option<PullRequest>> {
        self.record("find_open_pull_request");
        Ok(self
            .open_prs
            .lock()
            .unwrap()
            .iter()
            .find(|pr| pr.head_ref == head && pr.base_ref == base)
            .cloned())
    }

    async fn create_pull_request(
        &self,
        _repo: &RepoId,
        pr: &NewPullRequest,
    ) -> Result<PullRequest> {
        self.record("create_pull_request");
        self.create_pr_calls.lock().unwrap().push(pr.clone());

        if let Some(status) = *self.error_on_create_pr.lock().unwrap() {
            return Err(api_error(status, r#"{"message":"Validation Failed"}"#));
        }

        let number = self.next_pr_number.fetch_add(1, Ordering::SeqCst);
        let created = PullRequest {
            number,
            html_url: format!("https://github.com/org/repo/pull/{number}"),
            base_ref: pr.base.clone(),
            head_ref: pr.head.clone(),
            title: pr.title.clone(),
        };
        self.open_prs.lock().unwrap().push(created.clone());
        Ok(created)
    }

    async fn list_labels(&self, _repo: &RepoId) -> Result<Vec<Label>> {
        self.record("list_labels");
        Ok(self
            .labels
            .lock()
            .unwrap()
            .iter()
            .map(|name| Label { name: name.clone() })
            .collect())
    }

    async fn create_label(&self, _repo: &RepoId, name: &str) -> Result<()> {
        self.record("create_label");
        self.create_label_calls
            .lock()
            .unwrap()
            .push(name.to_string());

        if let Some(status) = *self.error_on_create_label.lock().unwrap() {
            return Err(api_error(status, r#"{"message":"Server Error"}"#));
        }

        let mut labels = self.labels.lock().unwrap();
        if self.racing_labels.lock().unwrap().contains(name) && !labels.iter().any(|l| l == name)
        {
            labels.push(name.to_string());
        }
        if labels.iter().any(|l| l == name) {
            return Err(api_error(
                StatusCode::UNPROCESSABLE_ENTITY,
                ALREADY_EXISTS_BODY,
            ));
        }
        labels.push(name.to_string());
        Ok(())
    }

    async fn add_labels(&self, _repo: &RepoId, number: u64, labels: &[String]) -> Result<()> {
        self.record("add_labels");
        self.add_labels_calls
            .lock()
            .unwrap()
            .push((number, labels.to_vec()));

        let defined = self.labels.lock().unwrap().clone();
        let mut attached = self.pr_labels.lock().unwrap();
        let entry = attached.entry(number).or_default();
        for label in labels {
            // GitHub creates unknown labels on attach; keep the repo view in sync
            if !defined.contains(label) {
                self.labels.lock().unwrap().push(label.clone());
            }
            entry.insert(label.clone());
        }
        Ok(())
    }

    async fn list_milestones(&self, _repo: &RepoId) -> Result<Vec<Milestone>> {
        self.record("list_milestones");
        Ok(self.milestones.lock().unwrap().clone())
    }

    async fn create_milestone(&self, _repo: &RepoId, milestone: &NewMilestone) -> Result<Milestone> {
        self.record("create_milestone");
        self.create_milestone_calls
            .lock()
            .unwrap()
            .push(milestone.clone());

        let number = self.next_milestone_number.fetch_add(1, Ordering::SeqCst);
        let created = Milestone {
            number,
            title: milestone.title.clone(),
        };
        self.milestones.lock().unwrap().push(created.clone());
        Ok(created)
    }

    async fn set_milestone(&self, _repo: &RepoId, number: u64, milestone: u64) -> Result<()> {
        self.record("set_milestone");
        self.set_milestone_calls
            .lock()
            .unwrap()
            .push((number, milestone));
        self.pr_milestone.lock().unwrap().insert(number, milestone);
        Ok(())
    }

    async fn add_assignees(&self, _repo: &RepoId, number: u64, logins: &[String]) -> Result<()> {
        self.record("add_assignees");
        self.add_assignees_calls
            .lock()
            .unwrap()
            .push((number, logins.to_vec()));
        self.pr_assignees
            .lock()
            .unwrap()
            .entry(number)
            .or_default()
            .extend(logins.iter().cloned());
        Ok(())
    }
}
