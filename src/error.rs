//! Error types for auto-pr

use reqwest::StatusCode;
use serde::Deserialize;
use thiserror::Error;

/// Result alias used throughout the crate
pub type Result<T> = std::result::Result<T, Error>;

/// Errors produced by auto-pr
#[derive(Error, Debug)]
pub enum Error {
    /// No token in the environment or the gh CLI; recoverable by asking the user
    #[error("no GitHub token found. Set GITHUB_TOKEN or run `gh auth login`")]
    MissingToken,

    /// Token present but unusable
    #[error("authentication error: {0}")]
    Auth(String),

    /// GitHub answered with a non-success status
    #[error("GitHub API error: {status} - {body}")]
    Api {
        /// HTTP status returned by the API
        status: StatusCode,
        /// Raw response body
        body: String,
    },

    /// A git subprocess failed
    #[error("git error: {0}")]
    Git(String),

    /// Repository identifier could not be parsed
    #[error("invalid repository '{0}', expected owner/repo")]
    InvalidRepo(String),

    /// Interactive prompt failed
    #[error("prompt error: {0}")]
    Prompt(String),

    /// Invalid configuration value
    #[error("config error: {0}")]
    Config(String),

    /// API answered successfully but with a body we cannot use
    #[error("unexpected API response: {0}")]
    UnexpectedResponse(String),

    /// Transport-level HTTP failure
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON (de)serialization failure
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Local I/O failure
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

#[derive(Deserialize)]
struct ValidationBody {
    #[serde(default)]
    errors: Vec<ValidationItem>,
}

#[derive(Deserialize)]
struct ValidationItem {
    #[serde(default)]
    code: Option<String>,
}

impl Error {
    /// Whether this is GitHub's "resource already exists" validation failure.
    ///
    /// GitHub reports it as 422 with an `errors` entry whose code is
    /// `already_exists`. Every other failure, including other 422s, is not.
    pub fn is_already_exists(&self) -> bool {
        let Self::Api { status, body } = self else {
            return false;
        };

        if *status != StatusCode::UNPROCESSABLE_ENTITY {
            return false;
        }

        serde_json::from_str::<ValidationBody>(body).is_ok_and(|parsed| {
            parsed
                .errors
                .iter()
                .any(|e| e.code.as_deref() == Some("already_exists"))
        })
    }
}
