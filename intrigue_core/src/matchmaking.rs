//! Cooperative candidate search over the synchronous interpreter.
//!
//! A search evaluates one rule per candidate and yields to the async runtime
//! after every [`MatchmakingConfig::batch_size`] evaluations, so a large pool
//! never stalls the host loop. Dropping the future cancels the search.

use intrigue_world::{Actor, ActorId, WorldQuery};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use tracing::{debug, info};

use crate::config::MatchmakingConfig;
use crate::interpreter::Ruler;

/// How a search ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchOutcome {
    Found(ActorId),
    NoMatch,
}

impl MatchOutcome {
    pub fn actor(&self) -> Option<ActorId> {
        match self {
            MatchOutcome::Found(id) => Some(*id),
            MatchOutcome::NoMatch => None,
        }
    }
}

#[derive(Clone)]
pub struct Matchmaker {
    ruler: Ruler,
    config: MatchmakingConfig,
}

impl Matchmaker {
    pub fn new(ruler: Ruler) -> Self {
        Self {
            ruler,
            config: MatchmakingConfig::default(),
        }
    }

    pub fn with_config(mut self, config: MatchmakingConfig) -> Self {
        self.config = config;
        self
    }

    pub fn ruler(&self) -> &Ruler {
        &self.ruler
    }

    /// Active actors other than `seeker`, in search order.
    pub fn candidates(&self, world: &dyn WorldQuery, seeker: ActorId) -> Vec<ActorId> {
        let mut pool: Vec<ActorId> = world
            .actor_ids()
            .into_iter()
            .filter(|id| *id != seeker)
            .filter(|id| world.actor(*id).is_some_and(Actor::is_active))
            .collect();

        let mut rng = match self.config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        pool.shuffle(&mut rng);
        pool
    }

    /// Find the first candidate `seeker` passes `rule_id` against.
    ///
    /// `on_found` receives the match, or `None` once the pool is exhausted.
    pub async fn find_match<F>(
        &self,
        world: &dyn WorldQuery,
        rule_id: &str,
        seeker: &Actor,
        on_found: F,
    ) -> MatchOutcome
    where
        F: FnOnce(Option<ActorId>),
    {
        let pool = self.candidates(world, seeker.id);
        let batch = self.config.batch_size.max(1);
        debug!(rule = rule_id, seeker = %seeker.id, candidates = pool.len(), "match search started");

        for (evaluated, id) in pool.into_iter().enumerate() {
            let Some(candidate) = world.actor(id) else {
                continue;
            };
            let result = self.ruler.start_graph(world, rule_id, seeker, Some(candidate));
            if result.is_success() {
                info!(rule = rule_id, seeker = %seeker.id, candidate = %id, "match found");
                on_found(Some(id));
                return MatchOutcome::Found(id);
            }
            if (evaluated + 1) % batch == 0 {
                tokio::task::yield_now().await;
            }
        }

        debug!(rule = rule_id, seeker = %seeker.id, "no match");
        on_found(None);
        MatchOutcome::NoMatch
    }

    /// Evaluate `rule_id` for one pair, then yield once.
    pub async fn is_compatible_async(
        &self,
        world: &dyn WorldQuery,
        rule_id: &str,
        actor: &Actor,
        candidate: &Actor,
    ) -> bool {
        let compatible = self
            .ruler
            .start_graph(world, rule_id, actor, Some(candidate))
            .is_success();
        tokio::task::yield_now().await;
        compatible
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bridge::BridgeBuilder;
    use crate::graph::{Channel, GraphBuilder, NodeKind, Port, RuleLibrary};
    use intrigue_world::{ActorState, Gender, World};
    use std::sync::{Arc, Mutex};

    /// Fails unless the target is female.
    fn women_only() -> RuleLibrary {
        let mut b = GraphBuilder::new("women_only");
        let start = b.start();
        let gender = b.node(NodeKind::Gender);
        let error = b.node(NodeKind::error("{Target} is not eligible"));
        b.wire(start, Port::Run, gender, Channel::Target)
            .flow(gender, Port::Male, error);
        RuleLibrary::new().with(b.build().unwrap())
    }

    fn matchmaker(library: RuleLibrary, seed: u64) -> Matchmaker {
        let ruler = Ruler::new(Arc::new(library), Arc::new(BridgeBuilder::new().build()));
        Matchmaker::new(ruler).with_config(MatchmakingConfig {
            batch_size: 2,
            seed: Some(seed),
        })
    }

    #[tokio::test]
    async fn test_finds_the_only_compatible_candidate() {
        let mut world = World::new();
        let seeker = world.add_actor(Actor::new("Seeker", Gender::Male));
        for name in ["B", "C", "D", "E"] {
            world.add_actor(Actor::new(name, Gender::Male));
        }
        let wife = world.add_actor(Actor::new("Wife", Gender::Female));

        let found = Arc::new(Mutex::new(None));
        let sink = found.clone();
        let mm = matchmaker(women_only(), 7);
        let seeker = world.actors[&seeker].clone();

        let outcome = mm
            .find_match(&world, "women_only", &seeker, move |id| {
                *sink.lock().unwrap() = Some(id);
            })
            .await;

        assert_eq!(outcome, MatchOutcome::Found(wife));
        assert_eq!(*found.lock().unwrap(), Some(Some(wife)));
    }

    #[tokio::test]
    async fn test_exhausted_pool_reports_no_match() {
        let mut world = World::new();
        let seeker = world.add_actor(Actor::new("Seeker", Gender::Male));
        world.add_actor(Actor::new("B", Gender::Male));
        world.add_actor(Actor::new("Hidden", Gender::Female).with_state(ActorState::Passive));

        let mut reported = None;
        let mm = matchmaker(women_only(), 1);
        let seeker = world.actors[&seeker].clone();
        let outcome = mm
            .find_match(&world, "women_only", &seeker, |id| reported = Some(id))
            .await;

        assert_eq!(outcome, MatchOutcome::NoMatch);
        assert_eq!(reported, Some(None));
    }

    #[test]
    fn test_candidates_exclude_seeker_and_passive() {
        let mut world = World::new();
        let seeker = world.add_actor(Actor::new("Seeker", Gender::Male));
        let a = world.add_actor(Actor::new("A", Gender::Male));
        let b = world.add_actor(Actor::new("B", Gender::Female));
        world.add_actor(Actor::new("P", Gender::Female).with_state(ActorState::Passive));

        let mm = matchmaker(women_only(), 3);
        let mut pool = mm.candidates(&world, seeker);
        assert_eq!(pool, mm.candidates(&world, seeker));

        pool.sort();
        let mut expected = vec![a, b];
        expected.sort();
        assert_eq!(pool, expected);
    }

    #[tokio::test]
    async fn test_is_compatible_async() {
        let world = World::new();
        let mm = matchmaker(women_only(), 0);
        let a = Actor::new("A", Gender::Male);
        let woman = Actor::new("W", Gender::Female);
        let man = Actor::new("M", Gender::Male);

        assert!(mm.is_compatible_async(&world, "women_only", &a, &woman).await);
        assert!(!mm.is_compatible_async(&world, "women_only", &a, &man).await);
        assert!(!mm.is_compatible_async(&world, "missing", &a, &woman).await);
    }

    #[tokio::test]
    async fn test_searches_interleave() {
        let log = Arc::new(Mutex::new(Vec::new()));
        let record = log.clone();

        let mut bridge = BridgeBuilder::new();
        bridge.pair_scoped("Court", "Record", move |c: &Actor, _: &Actor, _: &dyn WorldQuery| {
            record.lock().unwrap().push(c.name.clone());
            Some(false)
        });

        let mut b = GraphBuilder::new("never");
        let start = b.start();
        let invoke = b.node(NodeKind::invoke("Record"));
        let error = b.node(NodeKind::error("rejected"));
        b.wire(start, Port::Run, invoke, Channel::Dual)
            .flow(invoke, Port::False, error);
        let ruler = Ruler::new(
            Arc::new(RuleLibrary::new().with(b.build().unwrap())),
            Arc::new(bridge.build()),
        );
        let mm = Matchmaker::new(ruler).with_config(MatchmakingConfig {
            batch_size: 1,
            seed: Some(11),
        });

        let mut world = World::new();
        let first = world.add_actor(Actor::new("First", Gender::Male));
        let second = world.add_actor(Actor::new("Second", Gender::Male));
        world.add_actor(Actor::new("Third", Gender::Female));
        let first = world.actors[&first].clone();
        let second = world.actors[&second].clone();

        let (a, b) = tokio::join!(
            mm.find_match(&world, "never", &first, |_| {}),
            mm.find_match(&world, "never", &second, |_| {}),
        );
        assert_eq!(a, MatchOutcome::NoMatch);
        assert_eq!(b, MatchOutcome::NoMatch);

        let log = log.lock().unwrap();
        assert_eq!(log.len(), 4);
        assert_eq!(log[0], "First");
        assert_eq!(log[1], "Second");
    }
}
