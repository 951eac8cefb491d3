//! The verdict produced by a rule evaluation.

use serde::Serialize;

/// Terminal state of an evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum RuleState {
    Success,
    Failed,
}

/// Pass/fail verdict plus the diagnostics collected on the way.
///
/// The state is derived from the error list: `Failed` exactly when at least
/// one error was recorded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RuleResult {
    state: RuleState,
    warnings: Vec<String>,
    errors: Vec<String>,
}

impl RuleResult {
    pub fn new(warnings: Vec<String>, errors: Vec<String>) -> Self {
        let state = if errors.is_empty() {
            RuleState::Success
        } else {
            RuleState::Failed
        };
        Self {
            state,
            warnings,
            errors,
        }
    }

    pub fn success() -> Self {
        Self::new(Vec::new(), Vec::new())
    }

    /// A failed result with a single error message.
    pub fn failure(message: impl Into<String>) -> Self {
        Self::new(Vec::new(), vec![message.into()])
    }

    pub fn state(&self) -> RuleState {
        self.state
    }

    pub fn is_success(&self) -> bool {
        self.state == RuleState::Success
    }

    pub fn warnings(&self) -> &[String] {
        &self.warnings
    }

    pub fn errors(&self) -> &[String] {
        &self.errors
    }
}
