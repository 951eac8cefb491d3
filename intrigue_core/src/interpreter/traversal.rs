//! Per-evaluation traversal state: the paths walked so far and collected diagnostics.

use intrigue_world::{Actor, ActorId};

use crate::config::InterpreterConfig;
use crate::graph::{Channel, NodeId};

/// The actors a branch is evaluating against.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Pair<'a> {
    pub conspirator: &'a Actor,
    pub target: Option<&'a Actor>,
}

/// A pending node visit.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Frame<'a> {
    pub node: NodeId,
    /// Input role the node was reached through; `None` for Start and diagnostics.
    pub channel: Option<Channel>,
    pub pair: Pair<'a>,
    /// The actor the branch is currently about, used by the `[Actor]` channel.
    pub subject: Option<&'a Actor>,
    /// Step that led here; `None` at Start.
    pub parent: Option<usize>,
}

impl<'a> Frame<'a> {
    /// The single actor a node reached through this frame's channel evaluates.
    pub fn actor(&self) -> Option<&'a Actor> {
        match self.channel {
            Some(Channel::Conspirator) => Some(self.pair.conspirator),
            Some(Channel::Target) => self.pair.target,
            Some(Channel::Actor) | Some(Channel::Dual) | None => self.subject,
        }
    }

    fn state(&self) -> State {
        State {
            node: self.node,
            channel: self.channel,
            conspirator: self.pair.conspirator.id,
            target: self.pair.target.map(|t| t.id),
            subject: self.subject.map(|s| s.id),
        }
    }
}

/// Everything a node's outcome depends on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct State {
    node: NodeId,
    channel: Option<Channel>,
    conspirator: ActorId,
    target: Option<ActorId>,
    subject: Option<ActorId>,
}

/// An entered node. Steps form a tree; following `parent` walks one path back to Start.
#[derive(Debug)]
struct Step {
    state: State,
    parent: Option<usize>,
}

/// Outcome of entering a node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Entry {
    /// Entered; children of the node continue from this step.
    Step(usize),
    /// The path already holds this exact state, so it would repeat forever.
    Cycle,
    /// The path already entered this node `limit` times.
    OverLimit,
}

/// Paths and diagnostics accumulated during one evaluation.
#[derive(Debug, Default)]
pub(crate) struct Traversal {
    steps: Vec<Step>,
    pub warnings: Vec<String>,
    pub errors: Vec<String>,
}

impl Traversal {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record entering `frame.node`, checked against the frame's own path only.
    ///
    /// Rejoining branches of an acyclic graph never share a path, so only a
    /// real cycle can trip either check.
    pub fn enter(&mut self, frame: &Frame<'_>, limit: u32) -> Entry {
        let state = frame.state();
        let mut entered = 0u32;
        let mut cursor = frame.parent;
        while let Some(index) = cursor {
            let step = &self.steps[index];
            if step.state == state {
                return Entry::Cycle;
            }
            if step.state.node == state.node {
                entered += 1;
            }
            cursor = step.parent;
        }
        if entered >= limit {
            return Entry::OverLimit;
        }

        self.steps.push(Step {
            state,
            parent: frame.parent,
        });
        Entry::Step(self.steps.len() - 1)
    }

    pub fn warn(&mut self, message: String) {
        self.warnings.push(message);
    }

    pub fn error(&mut self, message: String) {
        self.errors.push(message);
    }
}

/// Substitute actor name tokens in a diagnostic message.
///
/// Tokens are matched in one left-to-right pass over the template, so a
/// substituted name is never scanned again. Empty tokens are ignored and a
/// target token is left as written when no target is bound.
pub(crate) fn render(template: &str, pair: &Pair<'_>, config: &InterpreterConfig) -> String {
    let mut tokens: Vec<(&str, &str)> = Vec::with_capacity(2);
    if !config.conspirator_token.is_empty() {
        tokens.push((config.conspirator_token.as_str(), pair.conspirator.name.as_str()));
    }
    if let Some(target) = pair.target {
        if !config.target_token.is_empty() {
            tokens.push((config.target_token.as_str(), target.name.as_str()));
        }
    }
    // Longest first, so a token that prefixes another never shadows it.
    tokens.sort_by_key(|(token, _)| std::cmp::Reverse(token.len()));

    let mut message = String::with_capacity(template.len());
    let mut rest = template;
    'scan: while let Some(c) = rest.chars().next() {
        for &(token, name) in &tokens {
            if let Some(after) = rest.strip_prefix(token) {
                message.push_str(name);
                rest = after;
                continue 'scan;
            }
        }
        message.push(c);
        rest = &rest[c.len_utf8()..];
    }
    message
}
