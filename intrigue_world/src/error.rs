//! Errors raised by world mutations.

use thiserror::Error;

use crate::entities::{ActorId, ClanId, FamilyId, RoleId};

#[derive(Debug, Error)]
pub enum WorldError {
    #[error("unknown actor {0}")]
    UnknownActor(ActorId),

    #[error("unknown clan {0}")]
    UnknownClan(ClanId),

    #[error("unknown family {0}")]
    UnknownFamily(FamilyId),

    #[error("unknown role {0}")]
    UnknownRole(RoleId),

    #[error("actor {0} cannot be its own parent")]
    SelfParent(ActorId),

    #[error("actor {parent} is already a parent of {child}")]
    DuplicateParent { child: ActorId, parent: ActorId },

    #[error("invalid world snapshot: {0}")]
    Snapshot(#[from] serde_json::Error),
}
