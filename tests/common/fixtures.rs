//! Fixtures: scripted prompters, progress recorders and sample values

use async_trait::async_trait;
use auto_pr::error::{Error, Result};
use auto_pr::prompt::{Field, Prompter, answer_or_default};
use auto_pr::types::{Milestone, PullRequest, Session};
use auto_pr::workflow::{Phase, ProgressCallback};
use std::collections::HashMap;
use std::sync::Mutex;

/// Prompter answering from a fixed table
///
/// Unlisted fields are answered with an empty line, which selects the
/// default. Every question is recorded with the default it offered.
#[derive(Default)]
pub struct ScriptedPrompter {
    answers: HashMap<Field, String>,
    asked: Mutex<Vec<(Field, String)>>,
}

impl ScriptedPrompter {
    /// Accept every default
    pub fn defaults() -> Self {
        Self::default()
    }

    /// Answer `field` with `value`
    pub fn answer(mut self, field: Field, value: &str) -> Self {
        self.answers.insert(field, value.to_string());
        self
    }

    /// Fields asked, in order, with the default offered
    pub fn asked(&self) -> Vec<(Field, String)> {
        self.asked.lock().unwrap().clone()
    }

    /// Default offered for `field`, if it was asked
    pub fn default_for(&self, field: Field) -> Option<String> {
        self.asked()
            .into_iter()
            .find(|(f, _)| *f == field)
            .map(|(_, default)| default)
    }
}

impl Prompter for ScriptedPrompter {
    fn ask(&self, field: Field, default: &str) -> Result<String> {
        self.asked
            .lock()
            .unwrap()
            .push((field, default.to_string()));
        let raw = self.answers.get(&field).map_or("", String::as_str);
        Ok(answer_or_default(raw, default))
    }
}

/// Progress events as observed by a [`RecordingProgress`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    Phase(Phase),
    Authenticated(String),
    PrCreated { number: u64, reused: bool },
    LabelCreated(String),
    MilestoneResolved { number: u64, created: bool },
    Error(String),
    Message(String),
}

/// Progress callback that records every event
#[derive(Default)]
pub struct RecordingProgress {
    events: Mutex<Vec<Event>>,
}

impl RecordingProgress {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<Event> {
        self.events.lock().unwrap().clone()
    }

    /// Phases entered, in order
    pub fn phases(&self) -> Vec<Phase> {
        self.events()
            .into_iter()
            .filter_map(|e| match e {
                Event::Phase(p) => Some(p),
                _ => None,
            })
            .collect()
    }

    /// Tolerated errors
    pub fn errors(&self) -> Vec<String> {
        self.events()
            .into_iter()
            .filter_map(|e| match e {
                Event::Error(msg) => Some(msg),
                _ => None,
            })
            .collect()
    }

    fn push(&self, event: Event) {
        self.events.lock().unwrap().push(event);
    }
}

#[async_trait]
impl ProgressCallback for RecordingProgress {
    async fn on_phase(&self, phase: Phase) {
        self.push(Event::Phase(phase));
    }

    async fn on_authenticated(&self, session: &Session) {
        self.push(Event::Authenticated(session.login.clone()));
    }

    async fn on_pr_created(&self, pr: &PullRequest, reused: bool) {
        self.push(Event::PrCreated {
            number: pr.number,
            reused,
        });
    }

    async fn on_label_created(&self, name: &str) {
        self.push(Event::LabelCreated(name.to_string()));
    }

    async fn on_milestone_resolved(&self, milestone: &Milestone, created: bool) {
        self.push(Event::MilestoneResolved {
            number: milestone.number,
            created,
        });
    }

    async fn on_error(&self, error: &Error) {
        self.push(Event::Error(error.to_string()));
    }

    async fn on_message(&self, message: &str) {
        self.push(Event::Message(message.to_string()));
    }
}

/// An open PR for `head`
pub fn open_pr(number: u64, head: &str, base: &str) -> PullRequest {
    PullRequest {
        number,
        html_url: format!("https://github.com/org/repo/pull/{number}"),
        base_ref: base.to_string(),
        head_ref: head.to_string(),
        title: format!("Existing PR for {head}"),
    }
}
