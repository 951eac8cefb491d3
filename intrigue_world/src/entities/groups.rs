//! Roles, clans, families and cultures an actor can belong to.

use serde::{Deserialize, Serialize};

use super::{ClanId, CultureId, FamilyId, RoleId};
use crate::variables::VariableSet;

/// A title or office held by an actor (e.g. "Leader", "Spymaster").
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Role {
    pub id: RoleId,
    pub name: String,
    /// Title shown for female holders, when it differs from `name`.
    pub female_title: Option<String>,
    /// Lower values rank higher in succession.
    pub priority: i32,
}

impl Role {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: RoleId::new(),
            name: name.into(),
            female_title: None,
            priority: 0,
        }
    }

    pub fn with_female_title(mut self, title: impl Into<String>) -> Self {
        self.female_title = Some(title.into());
        self
    }

    pub fn with_priority(mut self, priority: i32) -> Self {
        self.priority = priority;
        self
    }
}

/// A political group of actors.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Clan {
    pub id: ClanId,
    pub name: String,
    pub description: Option<String>,
    pub culture: Option<CultureId>,
    #[serde(default)]
    pub variables: VariableSet,
}

impl Clan {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: ClanId::new(),
            name: name.into(),
            description: None,
            culture: None,
            variables: VariableSet::new(),
        }
    }

    pub fn with_culture(mut self, culture: CultureId) -> Self {
        self.culture = Some(culture);
        self
    }

    pub fn with_variables(mut self, variables: VariableSet) -> Self {
        self.variables = variables;
        self
    }

    /// Copy this clan under a fresh id. Variables keep their identifiers.
    pub fn duplicate(&self) -> Self {
        Self {
            id: ClanId::new(),
            name: self.name.clone(),
            description: self.description.clone(),
            culture: self.culture,
            variables: self.variables.duplicate(),
        }
    }
}

/// A household of related actors.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Family {
    pub id: FamilyId,
    pub name: String,
    pub culture: Option<CultureId>,
    #[serde(default)]
    pub variables: VariableSet,
}

impl Family {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: FamilyId::new(),
            name: name.into(),
            culture: None,
            variables: VariableSet::new(),
        }
    }

    pub fn with_culture(mut self, culture: CultureId) -> Self {
        self.culture = Some(culture);
        self
    }

    pub fn with_variables(mut self, variables: VariableSet) -> Self {
        self.variables = variables;
        self
    }

    /// Copy this family under a fresh id. Variables keep their identifiers.
    pub fn duplicate(&self) -> Self {
        Self {
            id: FamilyId::new(),
            name: self.name.clone(),
            culture: self.culture,
            variables: self.variables.duplicate(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Culture {
    pub id: CultureId,
    pub name: String,
    pub description: Option<String>,
}

impl Culture {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: CultureId::new(),
            name: name.into(),
            description: None,
        }
    }
}
