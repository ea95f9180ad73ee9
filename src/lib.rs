//! auto-pr - one-shot pull request automation for GitHub
//!
//! Branches, commits and pushes a change, opens a pull request, then makes
//! sure the requested labels and milestone exist before attaching them and
//! assigning the request to the authenticated user.

pub mod auth;
pub mod config;
pub mod error;
pub mod git;
pub mod platform;
pub mod prompt;
pub mod types;
pub mod workflow;
