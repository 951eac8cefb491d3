//! Ordered collection of variables owned by an entity.

use serde::{Deserialize, Serialize};

use super::{Variable, VariableValue};
use crate::entities::VariableId;

/// Variables attached to an actor, clan, family, scheme or the world.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct VariableSet {
    variables: Vec<Variable>,
}

impl VariableSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a variable, replacing any existing one with the same name.
    pub fn add(&mut self, variable: Variable) {
        match self.variables.iter_mut().find(|v| v.name == variable.name) {
            Some(existing) => *existing = variable,
            None => self.variables.push(variable),
        }
    }

    pub fn with(mut self, variable: Variable) -> Self {
        self.add(variable);
        self
    }

    pub fn get(&self, name: &str) -> Option<&Variable> {
        self.variables.iter().find(|v| v.name == name)
    }

    pub fn get_mut(&mut self, name: &str) -> Option<&mut Variable> {
        self.variables.iter_mut().find(|v| v.name == name)
    }

    pub fn by_id(&self, id: VariableId) -> Option<&Variable> {
        self.variables.iter().find(|v| v.id == id)
    }

    /// Assign a value to the named variable.
    ///
    /// Returns `false` if there is no such variable or the kind differs.
    pub fn set(&mut self, name: &str, value: VariableValue) -> bool {
        self.get_mut(name).is_some_and(|v| v.set(value))
    }

    pub fn remove(&mut self, name: &str) -> Option<Variable> {
        let index = self.variables.iter().position(|v| v.name == name)?;
        Some(self.variables.remove(index))
    }

    /// Deep copy of every variable, identifiers preserved.
    pub fn duplicate(&self) -> Self {
        Self {
            variables: self.variables.iter().map(Variable::duplicate).collect(),
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &Variable> {
        self.variables.iter()
    }

    pub fn len(&self) -> usize {
        self.variables.len()
    }

    pub fn is_empty(&self) -> bool {
        self.variables.is_empty()
    }
}
