//! Typed variables - named values of a fixed kind.
//!
//! A [`Variable`] is created with a kind and keeps it for life. Assigning a
//! value of another kind is a silent no-op: [`Variable::set`] reports `false`
//! and leaves the stored value untouched. Callers that need strict validation
//! should compare [`Variable::kind`] before calling.
//!
//! Entity references (actor, clan, family) are stored as ids and resolved
//! against a [`WorldQuery`] on read. An id that no longer resolves yields
//! `None`.

mod set;

pub use set::*;

use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::entities::{Actor, ActorId, Clan, ClanId, Family, FamilyId, VariableId};
use crate::world_state::WorldQuery;

/// Callback fired after a variable's value changes.
pub type ChangeHook = Arc<dyn Fn(&Variable) + Send + Sync>;

/// The kind tag of a [`VariableValue`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum VariableKind {
    String,
    Integer,
    Float,
    Bool,
    Object,
    Enum,
    Actor,
    Clan,
    Family,
}

/// A value stored in a [`Variable`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum VariableValue {
    String(String),
    Integer(i64),
    Float(f64),
    Bool(bool),
    /// Key of a host-side object (asset, prefab...), if any.
    Object(Option<String>),
    /// Selected index into a fixed list of labels.
    Enum { index: usize, options: Vec<String> },
    Actor(Option<ActorId>),
    Clan(Option<ClanId>),
    Family(Option<FamilyId>),
}

impl VariableValue {
    pub fn kind(&self) -> VariableKind {
        match self {
            VariableValue::String(_) => VariableKind::String,
            VariableValue::Integer(_) => VariableKind::Integer,
            VariableValue::Float(_) => VariableKind::Float,
            VariableValue::Bool(_) => VariableKind::Bool,
            VariableValue::Object(_) => VariableKind::Object,
            VariableValue::Enum { .. } => VariableKind::Enum,
            VariableValue::Actor(_) => VariableKind::Actor,
            VariableValue::Clan(_) => VariableKind::Clan,
            VariableValue::Family(_) => VariableKind::Family,
        }
    }

    /// Create an enum value selecting `index` among `options`.
    pub fn enumeration<I, S>(index: usize, options: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        VariableValue::Enum {
            index,
            options: options.into_iter().map(Into::into).collect(),
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            VariableValue::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_integer(&self) -> Option<i64> {
        match self {
            VariableValue::Integer(i) => Some(*i),
            _ => None,
        }
    }

    pub fn as_float(&self) -> Option<f64> {
        match self {
            VariableValue::Float(f) => Some(*f),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            VariableValue::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// The label of the selected enum option.
    pub fn enum_label(&self) -> Option<&str> {
        match self {
            VariableValue::Enum { index, options } => options.get(*index).map(String::as_str),
            _ => None,
        }
    }

    pub fn actor_id(&self) -> Option<ActorId> {
        match self {
            VariableValue::Actor(id) => *id,
            _ => None,
        }
    }

    pub fn clan_id(&self) -> Option<ClanId> {
        match self {
            VariableValue::Clan(id) => *id,
            _ => None,
        }
    }

    pub fn family_id(&self) -> Option<FamilyId> {
        match self {
            VariableValue::Family(id) => *id,
            _ => None,
        }
    }
}

/// A named, typed value with a stable identifier.
#[derive(Clone, Serialize, Deserialize)]
pub struct Variable {
    pub id: VariableId,
    pub name: String,
    value: VariableValue,
    #[serde(skip)]
    on_change: Option<ChangeHook>,
}

impl Variable {
    /// Create a variable whose kind is fixed by `value`.
    pub fn new(name: impl Into<String>, value: VariableValue) -> Self {
        Self {
            id: VariableId::new(),
            name: name.into(),
            value,
            on_change: None,
        }
    }

    pub fn with_id(mut self, id: VariableId) -> Self {
        self.id = id;
        self
    }

    /// Attach a hook fired after every change of value.
    pub fn with_hook(mut self, hook: impl Fn(&Variable) + Send + Sync + 'static) -> Self {
        self.on_change = Some(Arc::new(hook));
        self
    }

    pub fn kind(&self) -> VariableKind {
        self.value.kind()
    }

    pub fn get(&self) -> &VariableValue {
        &self.value
    }

    /// Assign `value` if its kind matches this variable's kind.
    ///
    /// Returns whether the assignment was accepted. A kind mismatch, or an
    /// enum index outside the option list, leaves the variable unchanged.
    /// The change hook only fires when the stored value actually changes.
    pub fn set(&mut self, value: VariableValue) -> bool {
        if value.kind() != self.value.kind() {
            return false;
        }

        // Enum options belong to the variable; only the index is assignable.
        let next = match (&self.value, value) {
            (VariableValue::Enum { options, .. }, VariableValue::Enum { index, .. }) => {
                if index >= options.len() {
                    return false;
                }
                VariableValue::Enum {
                    index,
                    options: options.clone(),
                }
            }
            (_, value) => value,
        };

        if next != self.value {
            self.value = next;
            if let Some(hook) = self.on_change.clone() {
                hook(self);
            }
        }
        true
    }

    /// Deep copy preserving the identifier. The change hook is not carried
    /// over; the copy belongs to a new owner.
    pub fn duplicate(&self) -> Self {
        Self {
            id: self.id,
            name: self.name.clone(),
            value: self.value.clone(),
            on_change: None,
        }
    }

    /// Resolve an actor reference against the world.
    pub fn resolve_actor<'w>(&self, world: &'w dyn WorldQuery) -> Option<&'w Actor> {
        self.value.actor_id().and_then(|id| world.actor(id))
    }

    /// Resolve a clan reference against the world.
    pub fn resolve_clan<'w>(&self, world: &'w dyn WorldQuery) -> Option<&'w Clan> {
        self.value.clan_id().and_then(|id| world.clan(id))
    }

    /// Resolve a family reference against the world.
    pub fn resolve_family<'w>(&self, world: &'w dyn WorldQuery) -> Option<&'w Family> {
        self.value.family_id().and_then(|id| world.family(id))
    }
}

impl std::fmt::Debug for Variable {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Variable")
            .field("id", &self.id)
            .field("name", &self.name)
            .field("value", &self.value)
            .field("has_hook", &self.on_change.is_some())
            .finish()
    }
}
