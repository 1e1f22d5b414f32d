//! Output formatting for human and JSON modes.

use serde_json::json;
use std::collections::BTreeSet;
use tailbus::{Error, ReadBatch, Token};

/// How results are printed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    Human,
    Json,
}

/// Result of one command.
#[derive(Debug)]
pub enum Output {
    Initialized(Option<Token>),
    Created(String),
    Pushed { topic: String, count: usize },
    Batch(ReadBatch),
    Topics(BTreeSet<String>),
    Info { topic: String, bytes: u64 },
    TokenIssued(Token),
    TokenShown(Token),
    Subscribed(Token),
    Revoked(bool),
}

/// Render a command result.
pub fn format_output(output: &Output, mode: OutputMode) -> String {
    match mode {
        OutputMode::Human => format_human(output),
        OutputMode::Json => format_json(output).to_string(),
    }
}

fn format_human(output: &Output) -> String {
    match output {
        Output::Initialized(Some(token)) => {
            format!("admin token: {}", token.secret)
        }
        Output::Initialized(None) => "token store already initialized".to_string(),
        Output::Created(topic) => format!("OK {}", topic),
        Output::Pushed { count, .. } => format!("(integer) {}", count),
        Output::Batch(batch) => {
            let mut lines: Vec<String> = batch
                .events
                .iter()
                .map(|e| format!("{} {}={}", e.timestamp.to_rfc3339(), e.key, e.value))
                .collect();
            lines.push(format!("seek: {}", batch.cursor));
            lines.join("\n")
        }
        Output::Topics(names) if names.is_empty() => "(empty list)".to_string(),
        Output::Topics(names) => names
            .iter()
            .enumerate()
            .map(|(i, n)| format!("{}) {}", i + 1, n))
            .collect::<Vec<_>>()
            .join("\n"),
        Output::Info { topic, bytes } => format!("{}: {} bytes", topic, bytes),
        Output::TokenIssued(token) => format!(
            "token: {}\npermission: {}",
            token.secret, token.permission
        ),
        Output::TokenShown(token) | Output::Subscribed(token) => {
            let topics = if token.topics.is_empty() {
                "(none)".to_string()
            } else {
                token.topics.join(", ")
            };
            format!("permission: {}\nsubscriptions: {}", token.permission, topics)
        }
        Output::Revoked(true) => "(integer) 1".to_string(),
        Output::Revoked(false) => "(integer) 0".to_string(),
    }
}

fn format_json(output: &Output) -> serde_json::Value {
    match output {
        Output::Initialized(token) => json!({ "token": token }),
        Output::Created(topic) => json!({ "created": topic }),
        Output::Pushed { topic, count } => json!({ "topic": topic, "pushed": count }),
        Output::Batch(batch) => json!(batch),
        Output::Topics(names) => json!({ "topics": names }),
        Output::Info { topic, bytes } => json!({ "topic": topic, "bytes": bytes }),
        Output::TokenIssued(token) | Output::TokenShown(token) | Output::Subscribed(token) => {
            json!(token)
        }
        Output::Revoked(removed) => json!({ "revoked": removed }),
    }
}

/// Render an error.
pub fn format_error(err: &Error, mode: OutputMode) -> String {
    match mode {
        OutputMode::Human => format!("(error) {}: {}", err.code(), err),
        OutputMode::Json => json!({ "error": err.code(), "message": err.to_string() }).to_string(),
    }
}
