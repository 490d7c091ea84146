//! Per-session chat state: message log and the words already learned

use serde::Serialize;
use std::collections::HashSet;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::User => f.pad("user"),
            Self::Assistant => f.pad("assistant"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Message {
    pub role: Role,
    pub content: String,
}

/// Lives for one continuous chat; never written to disk.
#[derive(Debug, Default)]
pub struct Session {
    messages: Vec<Message>,
    resolved: HashSet<String>,
    saved: Vec<String>,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, role: Role, content: impl Into<String>) {
        self.messages.push(Message {
            role,
            content: content.into(),
        });
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn last_reply(&self) -> Option<&str> {
        self.messages
            .iter()
            .rev()
            .find(|m| m.role == Role::Assistant)
            .map(|m| m.content.as_str())
    }

    pub fn is_resolved(&self, token: &str, fingerprint: &str) -> bool {
        self.resolved.contains(&resolution_key(token, fingerprint))
    }

    pub fn mark_resolved(&mut self, token: &str, fingerprint: &str) {
        self.resolved.insert(resolution_key(token, fingerprint));
    }

    pub fn record_saved(&mut self, token: &str) {
        self.saved.push(token.to_string());
    }

    pub fn saved(&self) -> &[String] {
        &self.saved
    }

    pub fn reset(&mut self) {
        tracing::debug!(
            "Resetting session ({} messages, {} saved words)",
            self.messages.len(),
            self.saved.len()
        );
        *self = Self::default();
    }

    pub fn transcript_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(&self.messages)
    }
}

fn resolution_key(token: &str, fingerprint: &str) -> String {
    format!("{}:{}", token, fingerprint)
}
