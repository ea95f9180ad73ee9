//! CLI commands
//!
//! Command implementations for the `auto-pr` binary.

mod auth;
mod create;
mod progress;
pub mod style;

pub use auth::{run_auth_setup, run_auth_test};
pub use create::{CreateOptions, run_create};
