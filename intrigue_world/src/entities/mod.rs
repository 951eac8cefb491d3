//! Entity definitions for the intrigue world.

mod actor;
mod groups;

pub use actor::*;
pub use groups::*;

use serde::{Deserialize, Serialize};

macro_rules! entity_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        pub struct $name(pub uuid::Uuid);

        impl $name {
            /// Create a new random ID.
            pub fn new() -> Self {
                Self(uuid::Uuid::new_v4())
            }

            /// Create an ID from a specific UUID.
            pub fn from_uuid(uuid: uuid::Uuid) -> Self {
                Self(uuid)
            }

            /// Create a nil/empty ID.
            pub fn nil() -> Self {
                Self(uuid::Uuid::nil())
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

entity_id!(
    /// Unique identifier for actors.
    ActorId
);
entity_id!(
    /// Unique identifier for clans.
    ClanId
);
entity_id!(
    /// Unique identifier for families.
    FamilyId
);
entity_id!(
    /// Unique identifier for roles.
    RoleId
);
entity_id!(
    /// Unique identifier for cultures.
    CultureId
);
entity_id!(
    /// Stable identifier of a variable, preserved across duplication.
    VariableId
);
