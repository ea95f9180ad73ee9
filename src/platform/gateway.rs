//! Authenticated access to the GitHub REST API
//!
//! Every request made by auto-pr goes through [`ApiGateway::call`], which
//! attaches the credentials and turns any non-success status into
//! [`Error::Api`].

use crate::auth::Credentials;
use crate::error::{Error, Result};
use reqwest::header::ACCEPT;
use reqwest::{Client, Method};
use secrecy::{ExposeSecret, SecretString};
use serde_json::Value;
use tracing::{debug, warn};
use url::Url;

const ACCEPT_GITHUB_JSON: &str = "application/vnd.github+json";
const API_VERSION_HEADER: &str = "X-GitHub-Api-Version";
const API_VERSION: &str = "2022-11-28";
const USER_AGENT: &str = concat!("auto-pr/", env!("CARGO_PKG_VERSION"));

/// The explicit API session: base URL, HTTP client and token
pub struct ApiGateway {
    client: Client,
    base_url: String,
    token: SecretString,
}

impl ApiGateway {
    /// Create a gateway for the given API root
    pub fn new(base_url: &Url, credentials: &Credentials) -> Result<Self> {
        let client = Client::builder().user_agent(USER_AGENT).build()?;

        Ok(Self {
            client,
            base_url: base_url.as_str().trim_end_matches('/').to_string(),
            token: credentials.token.clone(),
        })
    }

    /// API root this gateway talks to (no trailing slash)
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Perform one API call and decode the JSON response
    ///
    /// `path` is relative to the base URL and must start with `/`. An empty
    /// success body decodes to [`Value::Null`].
    pub async fn call(&self, method: Method, path: &str, payload: Option<&Value>) -> Result<Value> {
        let url = format!("{}{path}", self.base_url);
        debug!(%method, path, "GitHub API request");

        let mut request = self
            .client
            .request(method.clone(), &url)
            .bearer_auth(self.token.expose_secret())
            .header(ACCEPT, ACCEPT_GITHUB_JSON)
            .header(API_VERSION_HEADER, API_VERSION);

        if let Some(body) = payload {
            request = request.json(body);
        }

        let response = request.send().await?;
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            warn!(%method, path, %status, "GitHub API request failed");
            return Err(Error::Api { status, body });
        }

        if body.trim().is_empty() {
            return Ok(Value::Null);
        }

        Ok(serde_json::from_str(&body)?)
    }
}
