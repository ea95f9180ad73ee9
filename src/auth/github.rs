//! GitHub authentication

use crate::auth::{AuthSource, Credentials};
use crate::error::{Error, Result};
use crate::platform::HostingApi;
use crate::types::Session;
use std::env;
use tokio::process::Command;
use tracing::debug;

/// Environment variables checked for a token, in priority order
pub const TOKEN_ENV_VARS: [&str; 2] = ["GITHUB_TOKEN", "GH_TOKEN"];

/// Get GitHub authentication
///
/// Priority:
/// 1. `GITHUB_TOKEN` environment variable
/// 2. `GH_TOKEN` environment variable
/// 3. gh CLI (`gh auth token`)
///
/// Returns [`Error::MissingToken`] when none of them yields a token.
pub async fn get_github_auth() -> Result<Credentials> {
    if let Some(credentials) = resolve_from_env(|key| env::var(key).ok()) {
        return Ok(credentials);
    }

    if let Some(token) = get_gh_cli_token().await {
        debug!("Using token from gh CLI");
        return Ok(Credentials::new(token, AuthSource::Cli));
    }

    Err(Error::MissingToken)
}

/// Resolve a token from environment-style lookups
///
/// Blank values count as absent.
pub fn resolve_from_env(lookup: impl Fn(&str) -> Option<String>) -> Option<Credentials> {
    TOKEN_ENV_VARS.iter().find_map(|key| {
        let token = lookup(key)?;
        let token = token.trim();
        if token.is_empty() {
            return None;
        }
        debug!("Using token from {key}");
        Some(Credentials::new(token, AuthSource::EnvVar))
    })
}

async fn get_gh_cli_token() -> Option<String> {
    // Check gh is available
    Command::new("gh")
        .arg("--version")
        .output()
        .await
        .ok()?;

    let output = Command::new("gh")
        .args(["auth", "token"])
        .output()
        .await
        .ok()?;

    if !output.status.success() {
        return None;
    }

    let token = String::from_utf8_lossy(&output.stdout).trim().to_string();
    if token.is_empty() { None } else { Some(token) }
}

/// Page where a token with `repo` scope can be created
pub fn token_creation_url(web_host: &str) -> String {
    format!("https://{web_host}/settings/tokens/new?scopes=repo&description=auto-pr")
}

/// Verify a token against `GET /user` and build the run's session
pub async fn verify_github_auth(api: &dyn HostingApi, source: AuthSource) -> Result<Session> {
    let login = api.current_user().await?;
    if login.is_empty() {
        return Err(Error::Auth("GitHub returned an empty login".to_string()));
    }
    Ok(Session { login, source })
}
