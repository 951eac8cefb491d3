//! Call and return shapes of bridge methods.

use intrigue_world::{Actor, ActorId, ClanId, FamilyId, WorldQuery};
use serde::{Deserialize, Serialize};

use crate::scheme::Scheme;

/// What a bridge method receives.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CallShape {
    /// The whole evaluation context, including the scheme being checked.
    Scheme,
    /// The conspirator and a target. Yields null when no target is bound.
    ActorPair,
}

/// What a bridge method returns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ReturnShape {
    Bool,
    Actor,
    ActorPair,
    Clan,
    Family,
}

/// A non-null result of a bridge method.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InvokeValue {
    Bool(bool),
    Actor(ActorId),
    ActorPair(ActorId, ActorId),
    Clan(ClanId),
    Family(FamilyId),
}

impl InvokeValue {
    pub fn shape(&self) -> ReturnShape {
        match self {
            InvokeValue::Bool(_) => ReturnShape::Bool,
            InvokeValue::Actor(_) => ReturnShape::Actor,
            InvokeValue::ActorPair(..) => ReturnShape::ActorPair,
            InvokeValue::Clan(_) => ReturnShape::Clan,
            InvokeValue::Family(_) => ReturnShape::Family,
        }
    }
}

/// Types a bridge method may return.
pub trait Returnable: Send + 'static {
    const SHAPE: ReturnShape;

    fn into_value(self) -> InvokeValue;
}

impl Returnable for bool {
    const SHAPE: ReturnShape = ReturnShape::Bool;

    fn into_value(self) -> InvokeValue {
        InvokeValue::Bool(self)
    }
}

impl Returnable for ActorId {
    const SHAPE: ReturnShape = ReturnShape::Actor;

    fn into_value(self) -> InvokeValue {
        InvokeValue::Actor(self)
    }
}

impl Returnable for (ActorId, ActorId) {
    const SHAPE: ReturnShape = ReturnShape::ActorPair;

    fn into_value(self) -> InvokeValue {
        InvokeValue::ActorPair(self.0, self.1)
    }
}

impl Returnable for ClanId {
    const SHAPE: ReturnShape = ReturnShape::Clan;

    fn into_value(self) -> InvokeValue {
        InvokeValue::Clan(self)
    }
}

impl Returnable for FamilyId {
    const SHAPE: ReturnShape = ReturnShape::Family;

    fn into_value(self) -> InvokeValue {
        InvokeValue::Family(self)
    }
}

/// Everything a bridge method can see about the evaluation that called it.
#[derive(Clone, Copy)]
pub struct InvokeContext<'a> {
    pub rule_id: &'a str,
    /// The scheme being checked, when evaluation came through one.
    pub scheme: Option<&'a Scheme>,
    pub conspirator: &'a Actor,
    pub target: Option<&'a Actor>,
    pub world: &'a dyn WorldQuery,
}

impl std::fmt::Debug for InvokeContext<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InvokeContext")
            .field("rule_id", &self.rule_id)
            .field("scheme", &self.scheme.map(|s| s.id.as_str()))
            .field("conspirator", &self.conspirator.id)
            .field("target", &self.target.map(|t| t.id))
            .finish()
    }
}
