//! GitHub platform service implementation

use crate::auth::Credentials;
use crate::error::{Error, Result};
use crate::platform::{ApiGateway, HostingApi};
use crate::types::{
    Label, Milestone, NewMilestone, NewPullRequest, PullRequest, RepoId, RepositoryRef,
};
use async_trait::async_trait;
use reqwest::Method;
use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::{Value, json};
use url::Url;

/// Page size for list endpoints (GitHub's maximum)
const PER_PAGE: usize = 100;

/// GitHub service over the REST API gateway
pub struct GitHubService {
    gateway: ApiGateway,
}

#[derive(Deserialize)]
struct UserResponse {
    login: String,
}

#[derive(Deserialize)]
struct RepoResponse {
    default_branch: String,
}

#[derive(Deserialize)]
struct BranchRef {
    #[serde(rename = "ref")]
    ref_field: String,
}

#[derive(Deserialize)]
struct PullResponse {
    number: u64,
    html_url: String,
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    head: Option<BranchRef>,
    #[serde(default)]
    base: Option<BranchRef>,
}

#[derive(Deserialize)]
struct MilestoneCreated {
    number: u64,
}

impl PullResponse {
    fn into_pull_request(self, fallback: Option<&NewPullRequest>) -> PullRequest {
        let head_ref = self
            .head
            .map(|h| h.ref_field)
            .or_else(|| fallback.map(|f| f.head.clone()))
            .unwrap_or_default();
        let base_ref = self
            .base
            .map(|b| b.ref_field)
            .or_else(|| fallback.map(|f| f.base.clone()))
            .unwrap_or_default();
        let title = self
            .title
            .or_else(|| fallback.map(|f| f.title.clone()))
            .unwrap_or_default();

        PullRequest {
            number: self.number,
            html_url: self.html_url,
            base_ref,
            head_ref,
            title,
        }
    }
}

impl GitHubService {
    /// Create a new GitHub service for the given API root
    pub fn new(base_url: &Url, credentials: &Credentials) -> Result<Self> {
        Ok(Self {
            gateway: ApiGateway::new(base_url, credentials)?,
        })
    }

    /// The gateway every call goes through
    pub const fn gateway(&self) -> &ApiGateway {
        &self.gateway
    }

    async fn request<T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        payload: Option<&Value>,
    ) -> Result<T> {
        let value = self.gateway.call(method, path, payload).await?;
        serde_json::from_value(value)
            .map_err(|e| Error::UnexpectedResponse(format!("{path}: {e}")))
    }

    /// Call an endpoint whose response body is not needed
    async fn send(&self, method: Method, path: &str, payload: &Value) -> Result<()> {
        self.gateway.call(method, path, Some(payload)).await?;
        Ok(())
    }

    /// Collect every page of a list endpoint
    async fn fetch_all<T: DeserializeOwned>(&self, path: &str) -> Result<Vec<T>> {
        let separator = if path.contains('?') { '&' } else { '?' };
        let mut items = Vec::new();
        let mut page = 1_u32;

        loop {
            let batch: Vec<T> = self
                .request(
                    Method::GET,
                    &format!("{path}{separator}per_page={PER_PAGE}&page={page}"),
                    None,
                )
                .await?;
            let last_page = batch.len() < PER_PAGE;
            items.extend(batch);
            if last_page {
                return Ok(items);
            }
            page += 1;
        }
    }
}

fn repo_path(repo: &RepoId) -> String {
    format!("/repos/{}/{}", repo.owner, repo.name)
}

#[async_trait]
impl HostingApi for GitHubService {
    async fn current_user(&self) -> Result<String> {
        let user: UserResponse = self.request(Method::GET, "/user", None).await?;
        Ok(user.login)
    }

    async fn get_repository(&self, repo: &RepoId) -> Result<RepositoryRef> {
        let info: RepoResponse = self.request(Method::GET, &repo_path(repo), None).await?;
        Ok(RepositoryRef {
            id: repo.clone(),
            default_branch: info.default_branch,
        })
    }

    async fn find_open_pull_request(
        &self,
        repo: &RepoId,
        head: &str,
        base: &str,
    ) -> Result<Option<PullRequest>> {
        let head = urlencoding::encode(&format!("{}:{head}", repo.owner)).into_owned();
        let base = urlencoding::encode(base);
        let path = format!(
            "{}/pulls?state=open&head={head}&base={base}",
            repo_path(repo)
        );
        let prs: Vec<PullResponse> = self.request(Method::GET, &path, None).await?;
        Ok(prs.into_iter().next().map(|pr| pr.into_pull_request(None)))
    }

    async fn create_pull_request(
        &self,
        repo: &RepoId,
        pr: &NewPullRequest,
    ) -> Result<PullRequest> {
        let payload = serde_json::to_value(pr)?;
        let created: PullResponse = self
            .request(
                Method::POST,
                &format!("{}/pulls", repo_path(repo)),
                Some(&payload),
            )
            .await?;
        Ok(created.into_pull_request(Some(pr)))
    }

    async fn list_labels(&self, repo: &RepoId) -> Result<Vec<Label>> {
        self.fetch_all(&format!("{}/labels", repo_path(repo))).await
    }

    async fn create_label(&self, repo: &RepoId, name: &str) -> Result<()> {
        self.send(
            Method::POST,
            &format!("{}/labels", repo_path(repo)),
            &json!({ "name": name }),
        )
        .await
    }

    async fn add_labels(&self, repo: &RepoId, number: u64, labels: &[String]) -> Result<()> {
        self.send(
            Method::POST,
            &format!("{}/issues/{number}/labels", repo_path(repo)),
            &json!({ "labels": labels }),
        )
        .await
    }

    async fn list_milestones(&self, repo: &RepoId) -> Result<Vec<Milestone>> {
        self.fetch_all(&format!("{}/milestones?state=all", repo_path(repo)))
            .await
    }

    async fn create_milestone(&self, repo: &RepoId, milestone: &NewMilestone) -> Result<Milestone> {
        let payload = serde_json::to_value(milestone)?;
        let created: MilestoneCreated = self
            .request(
                Method::POST,
                &format!("{}/milestones", repo_path(repo)),
                Some(&payload),
            )
            .await?;
        Ok(Milestone {
            number: created.number,
            title: milestone.title.clone(),
        })
    }

    async fn set_milestone(&self, repo: &RepoId, number: u64, milestone: u64) -> Result<()> {
        self.send(
            Method::PATCH,
            &format!("{}/issues/{number}", repo_path(repo)),
            &json!({ "milestone": milestone }),
        )
        .await
    }

    async fn add_assignees(&self, repo: &RepoId, number: u64, logins: &[String]) -> Result<()> {
        self.send(
            Method::POST,
            &format!("{}/issues/{number}/assignees", repo_path(repo)),
            &json!({ "assignees": logins }),
        )
        .await
    }
}
