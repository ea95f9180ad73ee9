//! Authentication for GitHub
//!
//! Supports environment variables and the gh CLI. When neither yields a
//! token the caller falls back to asking the user for one.

mod github;

pub use github::{
    TOKEN_ENV_VARS, get_github_auth, resolve_from_env, token_creation_url, verify_github_auth,
};

use secrecy::SecretString;

/// Source of authentication token
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthSource {
    /// Token from environment variable
    EnvVar,
    /// Token from the gh CLI
    Cli,
    /// Token pasted at the interactive prompt
    Interactive,
}

/// A resolved access token
#[derive(Debug, Clone)]
pub struct Credentials {
    /// Authentication token
    pub token: SecretString,
    /// Where the token was obtained from
    pub source: AuthSource,
}

impl Credentials {
    /// Wrap a raw token string
    pub fn new(token: impl Into<String>, source: AuthSource) -> Self {
        Self {
            token: SecretString::from(token.into()),
            source,
        }
    }
}
