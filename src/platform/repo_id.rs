//! Repository identifier parsing

use crate::error::{Error, Result};
use crate::types::RepoId;
use regex::Regex;
use std::sync::LazyLock;

// SSH format: git@host:owner/repo.git
static RE_SSH: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[\w.-]+@[^:/]+:(.+?)(?:\.git)?/?$").expect("hardcoded regex is valid")
});

// URL format: https://host/owner/repo.git, ssh://git@host/owner/repo.git
static RE_URL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?:https?|ssh|git)://[^/]+/(.+?)(?:\.git)?/?$").expect("hardcoded regex is valid")
});

static RE_SEGMENT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9_.-]+$").expect("hardcoded regex is valid"));

/// Parse `owner/repo`, or a remote URL pointing at one
pub fn parse_repo_id(input: &str) -> Result<RepoId> {
    let input = input.trim();
    let path = RE_SSH
        .captures(input)
        .or_else(|| RE_URL.captures(input))
        .and_then(|c| c.get(1))
        .map_or(input, |m| m.as_str());

    let mut parts = path.split('/');
    let (Some(owner), Some(name), None) = (parts.next(), parts.next(), parts.next()) else {
        return Err(Error::InvalidRepo(input.to_string()));
    };

    let valid = |segment: &str| RE_SEGMENT.is_match(segment) && segment != "." && segment != "..";
    if !valid(owner) || !valid(name) {
        return Err(Error::InvalidRepo(input.to_string()));
    }

    Ok(RepoId::new(owner, name))
}
