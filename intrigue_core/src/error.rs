//! Error types for graph loading, configuration and rule evaluation faults.

use thiserror::Error;

use crate::graph::{Channel, NodeId, Port};

/// A rule graph failed validation.
#[derive(Debug, Error)]
pub enum GraphError {
    #[error("rule '{rule}' has {count} Start nodes, expected one")]
    MultipleStarts { rule: String, count: usize },

    #[error("rule '{rule}' wires node {node}, which does not exist")]
    UnknownNode { rule: String, node: NodeId },

    #[error("rule '{rule}': {kind} node {node} has no '{port}' port")]
    InvalidPort {
        rule: String,
        node: NodeId,
        kind: &'static str,
        port: Port,
    },

    #[error("rule '{rule}': {kind} node {node} cannot be reached through {}", display_channel(.channel))]
    InvalidChannel {
        rule: String,
        node: NodeId,
        kind: &'static str,
        channel: Option<Channel>,
    },

    #[error("invalid graph document: {0}")]
    Json(#[from] serde_json::Error),
}

fn display_channel(channel: &Option<Channel>) -> String {
    match channel {
        Some(channel) => format!("the {} channel", channel),
        None => "a role-less wire".to_string(),
    }
}

/// Engine configuration could not be loaded.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
}

/// A structural or configuration fault met while evaluating a rule.
///
/// Faults never reach callers as errors; the interpreter turns them into a
/// Failed result carrying the fault's message.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RuleFault {
    #[error("unknown rule '{0}'")]
    UnknownRule(String),

    #[error("rule '{0}' has no Start node")]
    MissingStart(String),

    #[error("rule '{rule}' loops back to node {node} with the same actors")]
    Cycle { rule: String, node: NodeId },

    #[error("rule '{rule}' entered node {node} more than {limit} times on one path")]
    VisitLimit {
        rule: String,
        node: NodeId,
        limit: u32,
    },

    #[error("scheme '{0}' requires a target")]
    TargetRequired(String),

    #[error("scheme '{0}' does not take a target")]
    TargetNotAllowed(String),
}
