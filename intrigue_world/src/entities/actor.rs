//! Actor definitions.

use serde::{Deserialize, Serialize};

use super::{ActorId, ClanId, CultureId, FamilyId, RoleId};
use crate::variables::VariableSet;

/// Biological gender of an actor, as read by Gender rule nodes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Gender {
    Male,
    Female,
}

/// Lifecycle state of an actor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum ActorState {
    #[default]
    Active,
    /// Dead or otherwise removed from play. Never offered as a match candidate.
    Passive,
}

/// A simulated character that can conspire or be targeted by schemes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Actor {
    pub id: ActorId,
    pub name: String,
    pub gender: Gender,
    pub age: u32,
    /// Whether the actor is driven by AI rather than a player.
    pub is_ai: bool,
    #[serde(default)]
    pub state: ActorState,

    pub role: Option<RoleId>,
    pub clan: Option<ClanId>,
    pub family: Option<FamilyId>,
    pub culture: Option<CultureId>,

    /// Up to two parents; children and siblings are derived from these.
    #[serde(default)]
    pub parents: Vec<ActorId>,

    #[serde(default)]
    pub variables: VariableSet,
}

impl Actor {
    /// Create a new AI-controlled adult actor.
    pub fn new(name: impl Into<String>, gender: Gender) -> Self {
        Self {
            id: ActorId::new(),
            name: name.into(),
            gender,
            age: 18,
            is_ai: true,
            state: ActorState::Active,
            role: None,
            clan: None,
            family: None,
            culture: None,
            parents: Vec::new(),
            variables: VariableSet::new(),
        }
    }

    pub fn with_age(mut self, age: u32) -> Self {
        self.age = age;
        self
    }

    /// Mark the actor as player-controlled (or not).
    pub fn with_player_control(mut self, is_player: bool) -> Self {
        self.is_ai = !is_player;
        self
    }

    pub fn with_state(mut self, state: ActorState) -> Self {
        self.state = state;
        self
    }

    pub fn with_role(mut self, role: RoleId) -> Self {
        self.role = Some(role);
        self
    }

    pub fn with_clan(mut self, clan: ClanId) -> Self {
        self.clan = Some(clan);
        self
    }

    pub fn with_family(mut self, family: FamilyId) -> Self {
        self.family = Some(family);
        self
    }

    pub fn with_culture(mut self, culture: CultureId) -> Self {
        self.culture = Some(culture);
        self
    }

    pub fn with_parent(mut self, parent: ActorId) -> Self {
        if !self.parents.contains(&parent) {
            self.parents.push(parent);
        }
        self
    }

    pub fn is_active(&self) -> bool {
        self.state == ActorState::Active
    }

    /// Check whether this actor is a parent of `other`.
    pub fn is_parent_of(&self, other: &Actor) -> bool {
        other.parents.contains(&self.id)
    }

    /// Check whether this actor shares at least one parent with `other`.
    pub fn is_sibling_of(&self, other: &Actor) -> bool {
        self.id != other.id && self.parents.iter().any(|p| other.parents.contains(p))
    }
}
