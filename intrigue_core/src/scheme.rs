//! Schemes: social actions gated by a rule graph.

use intrigue_world::{Actor, VariableSet, WorldQuery};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::RuleFault;
use crate::interpreter::{RuleResult, Ruler};

/// A player or AI initiated action between a conspirator and (usually) a target.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Scheme {
    pub id: String,
    pub name: String,
    /// Rule graph deciding whether the scheme may start.
    pub rule_id: String,
    pub description: Option<String>,
    /// The scheme acts on the conspirator alone; supplying a target fails.
    #[serde(default)]
    pub target_not_required: bool,
    #[serde(default)]
    pub variables: VariableSet,
}

impl Scheme {
    pub fn new(id: impl Into<String>, name: impl Into<String>, rule_id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            rule_id: rule_id.into(),
            description: None,
            target_not_required: false,
            variables: VariableSet::new(),
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn without_target(mut self) -> Self {
        self.target_not_required = true;
        self
    }

    pub fn with_variables(mut self, variables: VariableSet) -> Self {
        self.variables = variables;
        self
    }

    /// Check whether `conspirator` may start this scheme against `target`.
    pub fn is_compatible(
        &self,
        ruler: &Ruler,
        world: &dyn WorldQuery,
        conspirator: &Actor,
        target: Option<&Actor>,
    ) -> RuleResult {
        let fault = match (self.target_not_required, target) {
            (true, Some(_)) => Some(RuleFault::TargetNotAllowed(self.id.clone())),
            (false, None) => Some(RuleFault::TargetRequired(self.id.clone())),
            _ => None,
        };
        if let Some(fault) = fault {
            debug!(scheme = %self.id, %fault, "scheme rejected before evaluation");
            return RuleResult::failure(fault.to_string());
        }

        ruler.start_scheme_graph(world, self, conspirator, target)
    }
}
