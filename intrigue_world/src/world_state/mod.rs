//! World state management - the central structure holding all actors and their groups.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::debug;

use crate::entities::{
    Actor, ActorId, Clan, ClanId, Culture, CultureId, Family, FamilyId, Role, RoleId,
};
use crate::error::WorldError;
use crate::variables::VariableSet;

/// Read contract consumed by rule evaluation.
///
/// Everything the interpreter and predicate callbacks learn about the world
/// goes through this trait, so hosts may back it with their own storage.
pub trait WorldQuery: Send + Sync {
    fn actor(&self, id: ActorId) -> Option<&Actor>;
    fn clan(&self, id: ClanId) -> Option<&Clan>;
    fn family(&self, id: FamilyId) -> Option<&Family>;
    fn role(&self, id: RoleId) -> Option<&Role>;
    fn culture(&self, id: CultureId) -> Option<&Culture>;

    /// Ids of every actor, in a stable order.
    fn actor_ids(&self) -> Vec<ActorId>;

    fn is_parent(&self, parent: ActorId, child: ActorId) -> bool {
        self.actor(child).is_some_and(|c| c.parents.contains(&parent))
    }

    fn is_sibling(&self, a: ActorId, b: ActorId) -> bool {
        match (self.actor(a), self.actor(b)) {
            (Some(a), Some(b)) => a.is_sibling_of(b),
            _ => false,
        }
    }
}

/// The complete set of actors and groups at a point in time.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct World {
    pub actors: HashMap<ActorId, Actor>,
    pub clans: HashMap<ClanId, Clan>,
    pub families: HashMap<FamilyId, Family>,
    pub roles: HashMap<RoleId, Role>,
    pub cultures: HashMap<CultureId, Culture>,

    /// Global variables.
    #[serde(default)]
    pub variables: VariableSet,
}

impl World {
    /// Create a new empty world.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_json(json: &str) -> Result<Self, WorldError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_json(&self) -> Result<String, WorldError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn add_actor(&mut self, actor: Actor) -> ActorId {
        let id = actor.id;
        self.actors.insert(id, actor);
        id
    }

    pub fn add_clan(&mut self, clan: Clan) -> ClanId {
        let id = clan.id;
        self.clans.insert(id, clan);
        id
    }

    pub fn add_family(&mut self, family: Family) -> FamilyId {
        let id = family.id;
        self.families.insert(id, family);
        id
    }

    pub fn add_role(&mut self, role: Role) -> RoleId {
        let id = role.id;
        self.roles.insert(id, role);
        id
    }

    pub fn add_culture(&mut self, culture: Culture) -> CultureId {
        let id = culture.id;
        self.cultures.insert(id, culture);
        id
    }

    pub fn get_actor_mut(&mut self, id: ActorId) -> Option<&mut Actor> {
        self.actors.get_mut(&id)
    }

    /// Move an actor into a clan.
    pub fn join_clan(&mut self, actor: ActorId, clan: ClanId) -> Result<(), WorldError> {
        if !self.clans.contains_key(&clan) {
            return Err(WorldError::UnknownClan(clan));
        }
        self.actor_entry(actor)?.clan = Some(clan);
        Ok(())
    }

    /// Move an actor into a family.
    pub fn join_family(&mut self, actor: ActorId, family: FamilyId) -> Result<(), WorldError> {
        if !self.families.contains_key(&family) {
            return Err(WorldError::UnknownFamily(family));
        }
        self.actor_entry(actor)?.family = Some(family);
        Ok(())
    }

    /// Give an actor a role, or clear it with `None`.
    pub fn assign_role(&mut self, actor: ActorId, role: Option<RoleId>) -> Result<(), WorldError> {
        if let Some(role) = role {
            if !self.roles.contains_key(&role) {
                return Err(WorldError::UnknownRole(role));
            }
        }
        self.actor_entry(actor)?.role = role;
        Ok(())
    }

    /// Record `parent` as a parent of `child`.
    pub fn add_parent(&mut self, child: ActorId, parent: ActorId) -> Result<(), WorldError> {
        if child == parent {
            return Err(WorldError::SelfParent(child));
        }
        if !self.actors.contains_key(&parent) {
            return Err(WorldError::UnknownActor(parent));
        }
        let entry = self.actor_entry(child)?;
        if entry.parents.contains(&parent) {
            return Err(WorldError::DuplicateParent { child, parent });
        }
        entry.parents.push(parent);
        debug!(%child, %parent, "parent link added");
        Ok(())
    }

    pub fn children_of(&self, parent: ActorId) -> Vec<&Actor> {
        self.sorted_actors(|a| a.parents.contains(&parent))
    }

    pub fn siblings_of(&self, actor: ActorId) -> Vec<&Actor> {
        match self.actors.get(&actor) {
            Some(me) => self.sorted_actors(|a| me.is_sibling_of(a)),
            None => Vec::new(),
        }
    }

    pub fn clan_members(&self, clan: ClanId) -> Vec<&Actor> {
        self.sorted_actors(|a| a.clan == Some(clan))
    }

    pub fn family_members(&self, family: FamilyId) -> Vec<&Actor> {
        self.sorted_actors(|a| a.family == Some(family))
    }

    fn actor_entry(&mut self, id: ActorId) -> Result<&mut Actor, WorldError> {
        self.actors.get_mut(&id).ok_or(WorldError::UnknownActor(id))
    }

    fn sorted_actors<F>(&self, predicate: F) -> Vec<&Actor>
    where
        F: Fn(&Actor) -> bool,
    {
        let mut actors: Vec<_> = self.actors.values().filter(|a| predicate(a)).collect();
        actors.sort_by_key(|a| a.id);
        actors
    }
}

impl WorldQuery for World {
    fn actor(&self, id: ActorId) -> Option<&Actor> {
        self.actors.get(&id)
    }

    fn clan(&self, id: ClanId) -> Option<&Clan> {
        self.clans.get(&id)
    }

    fn family(&self, id: FamilyId) -> Option<&Family> {
        self.families.get(&id)
    }

    fn role(&self, id: RoleId) -> Option<&Role> {
        self.roles.get(&id)
    }

    fn culture(&self, id: CultureId) -> Option<&Culture> {
        self.cultures.get(&id)
    }

    fn actor_ids(&self) -> Vec<ActorId> {
        let mut ids: Vec<_> = self.actors.keys().copied().collect();
        ids.sort();
        ids
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::Gender;

    #[test]
    fn test_join_clan() {
        let mut world = World::new();
        let actor = world.add_actor(Actor::new("Ser Bram", Gender::Male));
        let clan = world.add_clan(Clan::new("Vey"));

        world.join_clan(actor, clan).unwrap();

        assert_eq!(world.actor(actor).unwrap().clan, Some(clan));
        assert_eq!(world.clan_members(clan).len(), 1);
    }

    #[test]
    fn test_join_unknown_clan_fails() {
        let mut world = World::new();
        let actor = world.add_actor(Actor::new("Ser Bram", Gender::Male));
        let missing = ClanId::new();

        let err = world.join_clan(actor, missing).unwrap_err();
        assert!(matches!(err, WorldError::UnknownClan(id) if id == missing));
    }

    #[test]
    fn test_assign_and_clear_role() {
        let mut world = World::new();
        let actor = world.add_actor(Actor::new("Ilse", Gender::Female));
        let role = world.add_role(Role::new("Spymaster"));

        world.assign_role(actor, Some(role)).unwrap();
        assert_eq!(world.actor(actor).unwrap().role, Some(role));

        world.assign_role(actor, None).unwrap();
        assert!(world.actor(actor).unwrap().role.is_none());
    }

    #[test]
    fn test_family_tree_queries() {
        let mut world = World::new();
        let mother = world.add_actor(Actor::new("Mother", Gender::Female));
        let a = world.add_actor(Actor::new("A", Gender::Male));
        let b = world.add_actor(Actor::new("B", Gender::Female));

        world.add_parent(a, mother).unwrap();
        world.add_parent(b, mother).unwrap();

        assert_eq!(world.children_of(mother).len(), 2);
        assert!(world.is_parent(mother, a));
        assert!(!world.is_parent(a, mother));
        assert!(world.is_sibling(a, b));
        assert_eq!(world.siblings_of(a).len(), 1);
    }

    #[test]
    fn test_add_parent_rejects_bad_links() {
        let mut world = World::new();
        let a = world.add_actor(Actor::new("A", Gender::Male));
        let b = world.add_actor(Actor::new("B", Gender::Male));

        assert!(matches!(world.add_parent(a, a), Err(WorldError::SelfParent(_))));
        world.add_parent(a, b).unwrap();
        assert!(matches!(
            world.add_parent(a, b),
            Err(WorldError::DuplicateParent { .. })
        ));
        assert!(matches!(
            world.add_parent(a, ActorId::new()),
            Err(WorldError::UnknownActor(_))
        ));
    }

    #[test]
    fn test_json_snapshot() {
        let mut world = World::new();
        let id = world.add_actor(Actor::new("Saved", Gender::Female).with_age(40));

        let json = world.to_json().unwrap();
        let restored = World::from_json(&json).unwrap();

        assert_eq!(restored.actor(id).unwrap().age, 40);
    }
}
