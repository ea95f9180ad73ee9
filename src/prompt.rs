//! Operator prompts
//!
//! Every value the workflow needs is asked for with a default; empty input
//! selects the default.

use crate::error::{Error, Result};
use dialoguer::Input;
use std::collections::HashMap;
use std::fmt;

/// A value the workflow asks the operator for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    /// Repository identifier (`owner/repo`)
    Repository,
    /// Feature branch name
    Branch,
    /// File to create or edit
    File,
    /// Commit message
    CommitMessage,
    /// PR base branch
    BaseBranch,
    /// PR title
    Title,
    /// PR description
    Body,
    /// Comma-separated labels
    Labels,
    /// Milestone title
    Milestone,
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            Self::Repository => "GitHub repo (owner/repo)",
            Self::Branch => "Feature branch name",
            Self::File => "File to create/edit",
            Self::CommitMessage => "Git commit message",
            Self::BaseBranch => "Base branch",
            Self::Title => "Pull request title",
            Self::Body => "Pull request description",
            Self::Labels => "Labels (comma-separated)",
            Self::Milestone => "Milestone title",
        };
        write!(f, "{text}")
    }
}

/// Source of operator answers
///
/// `ask` is synchronous and may block on the terminal. The workflow calls it
/// between awaited steps, with no other request in flight.
pub trait Prompter: Send + Sync {
    /// Ask for `field`; returns `default` when the answer is empty
    fn ask(&self, field: Field, default: &str) -> Result<String>;
}

/// Apply the empty-means-default rule to a raw answer
pub fn answer_or_default(answer: &str, default: &str) -> String {
    let answer = answer.trim();
    if answer.is_empty() {
        default.to_string()
    } else {
        answer.to_string()
    }
}

/// Prompter backed by the terminal
///
/// Preset answers (from command-line flags) are used without asking. The
/// remaining fields are asked interactively, or take their defaults when
/// interaction is disabled.
#[derive(Debug, Clone, Default)]
pub struct TerminalPrompter {
    presets: HashMap<Field, String>,
    interactive: bool,
}

impl TerminalPrompter {
    /// Ask for every field not preset
    pub fn interactive() -> Self {
        Self {
            presets: HashMap::new(),
            interactive: true,
        }
    }

    /// Accept the default for every field not preset
    pub fn accept_defaults() -> Self {
        Self {
            presets: HashMap::new(),
            interactive: false,
        }
    }

    /// Preset the answer for a field; `None` leaves it to the prompt
    #[must_use]
    pub fn with_preset(mut self, field: Field, value: Option<String>) -> Self {
        if let Some(value) = value {
            self.presets.insert(field, value);
        }
        self
    }
}

impl Prompter for TerminalPrompter {
    fn ask(&self, field: Field, default: &str) -> Result<String> {
        if let Some(preset) = self.presets.get(&field) {
            return Ok(answer_or_default(preset, default));
        }

        if !self.interactive {
            return Ok(default.to_string());
        }

        // Blocks the runtime thread until the operator answers
        let answer: String = Input::new()
            .with_prompt(field.to_string())
            .default(default.to_string())
            .allow_empty(true)
            .interact_text()
            .map_err(|e| Error::Prompt(format!("{field}: {e}")))?;

        Ok(answer_or_default(&answer, default))
    }
}
