use intrigue_core::{
    BridgeBuilder, Channel, EngineConfig, GraphBuilder, Matchmaker, MatchOutcome, NodeKind,
    Port, RuleLibrary, RuleResult, RuleState, Ruler, Scheme,
};
use intrigue_world::{Actor, Clan, Gender, World, WorldQuery};
use std::sync::Arc;

/// Start -> Gender(Target); Male -> Error("Cannot target male").
fn no_men() -> GraphBuilder {
    let mut b = GraphBuilder::new("no_men");
    let start = b.start();
    let gender = b.node(NodeKind::Gender);
    let error = b.node(NodeKind::error("Cannot target male"));
    b.wire(start, Port::Run, gender, Channel::Target)
        .flow(gender, Port::Male, error);
    b
}

/// Start -> IsAI(Target); True -> Warning("Target is AI").
fn ai_notice() -> GraphBuilder {
    let mut b = GraphBuilder::new("ai_notice");
    let start = b.start();
    let ai = b.node(NodeKind::IsAi);
    let warning = b.node(NodeKind::warning("Target is AI"));
    b.wire(start, Port::Run, ai, Channel::Target)
        .flow(ai, Port::True, warning);
    b
}

fn ruler() -> Ruler {
    let library = RuleLibrary::new()
        .with(no_men().build().unwrap())
        .with(ai_notice().build().unwrap());
    Ruler::new(Arc::new(library), Arc::new(BridgeBuilder::new().build()))
}

#[test]
fn test_gender_gate() {
    let world = World::new();
    let ruler = ruler();
    let conspirator = Actor::new("Littlefinger", Gender::Male);
    let lady = Actor::new("Sansa", Gender::Female);
    let lord = Actor::new("Robin", Gender::Male);

    let allowed = ruler.start_graph(&world, "no_men", &conspirator, Some(&lady));
    assert_eq!(allowed, RuleResult::success());

    let denied = ruler.start_graph(&world, "no_men", &conspirator, Some(&lord));
    assert_eq!(denied.state(), RuleState::Failed);
    assert_eq!(denied.errors(), ["Cannot target male".to_string()]);
    assert!(denied.warnings().is_empty());
}

#[test]
fn test_warning_keeps_success() {
    let world = World::new();
    let ruler = ruler();
    let conspirator = Actor::new("Player", Gender::Female).with_player_control(true);
    let npc = Actor::new("Npc", Gender::Male);

    let result = ruler.start_graph(&world, "ai_notice", &conspirator, Some(&npc));
    assert_eq!(result.state(), RuleState::Success);
    assert_eq!(result.warnings(), ["Target is AI".to_string()]);
    assert!(result.errors().is_empty());

    let human = Actor::new("Human", Gender::Male).with_player_control(true);
    let quiet = ruler.start_graph(&world, "ai_notice", &conspirator, Some(&human));
    assert_eq!(quiet, RuleResult::success());
}

#[test]
fn test_unknown_rule_fails_quietly() {
    let world = World::new();
    let a = Actor::new("A", Gender::Male);

    let result = ruler().start_graph(&world, "does_not_exist", &a, None);
    assert_eq!(result.state(), RuleState::Failed);
}

#[test]
fn test_graph_documents_load_from_json() {
    let json = r#"[
        {
            "id": "clan_feud",
            "nodes": [
                { "kind": "Start" },
                { "kind": "IsSibling" },
                { "kind": "Error", "message": "{Conspirator} will not betray {Target}" }
            ],
            "wires": [
                { "from": 0, "port": "Run", "to": 1, "channel": "[Dual]" },
                { "from": 1, "port": "True", "to": 2 }
            ]
        }
    ]"#;
    let library = RuleLibrary::from_json(json).unwrap();
    let ruler = Ruler::new(Arc::new(library), Arc::new(BridgeBuilder::new().build()));

    let mut world = World::new();
    let mother = world.add_actor(Actor::new("Catelyn", Gender::Female));
    let robb = Actor::new("Robb", Gender::Male).with_parent(mother);
    let arya = Actor::new("Arya", Gender::Female).with_parent(mother);
    let theon = Actor::new("Theon", Gender::Male);

    let result = ruler.start_graph(&world, "clan_feud", &robb, Some(&arya));
    assert_eq!(result.errors(), ["Robb will not betray Arya".to_string()]);
    assert!(ruler.start_graph(&world, "clan_feud", &robb, Some(&theon)).is_success());
}

#[test]
fn test_scheme_gates_on_clan_membership() {
    let mut world = World::new();
    let clan = world.add_clan(Clan::new("Lannister"));

    let mut b = GraphBuilder::new("kin_only");
    let start = b.start();
    let get = b.node(NodeKind::GetClan {
        clan: intrigue_core::Selector::Invoked("ConspiratorClan".into()),
    });
    let error = b.node(NodeKind::error("{Target} is not kin"));
    b.wire(start, Port::Run, get, Channel::Target)
        .flow(get, Port::IsNot, error);

    let mut bridge = BridgeBuilder::new();
    bridge.pair_scoped("Houses", "ConspiratorClan", |c: &Actor, _: &Actor, _: &dyn WorldQuery| {
        c.clan
    });
    let ruler = Ruler::new(
        Arc::new(RuleLibrary::new().with(b.build().unwrap())),
        Arc::new(bridge.build()),
    );

    let scheme = Scheme::new("summon", "Summon Kin", "kin_only");
    let tywin = Actor::new("Tywin", Gender::Male).with_clan(clan);
    let jaime = Actor::new("Jaime", Gender::Male).with_clan(clan);
    let bronn = Actor::new("Bronn", Gender::Male);

    assert!(scheme.is_compatible(&ruler, &world, &tywin, Some(&jaime)).is_success());
    assert_eq!(
        scheme.is_compatible(&ruler, &world, &tywin, Some(&bronn)).errors(),
        ["Bronn is not kin".to_string()]
    );
    assert_eq!(
        scheme.is_compatible(&ruler, &world, &tywin, None).state(),
        RuleState::Failed
    );
}

#[test]
fn test_config_drives_interpreter() {
    let config = EngineConfig::from_toml_str(
        r#"
        [interpreter]
        target_token = "%target%"
        "#,
    )
    .unwrap();

    let mut b = GraphBuilder::new("tokens");
    let start = b.start();
    let error = b.node(NodeKind::error("no %target%"));
    b.flow(start, Port::Run, error);
    let ruler = Ruler::new(
        Arc::new(RuleLibrary::new().with(b.build().unwrap())),
        Arc::new(BridgeBuilder::new().build()),
    )
    .with_config(config.interpreter);

    let world = World::new();
    let a = Actor::new("A", Gender::Male);
    let t = Actor::new("Brienne", Gender::Female);
    assert_eq!(
        ruler.start_graph(&world, "tokens", &a, Some(&t)).errors(),
        ["no Brienne".to_string()]
    );
}

#[tokio::test]
async fn test_matchmaking_finds_eligible_partner() {
    let mut world = World::new();
    let seeker = world.add_actor(Actor::new("Seeker", Gender::Female));
    for name in ["Ser A", "Ser B", "Ser C"] {
        world.add_actor(Actor::new(name, Gender::Male));
    }
    let match_id = world.add_actor(Actor::new("Lady", Gender::Female));

    let mm = Matchmaker::new(ruler());
    let seeker = world.actors[&seeker].clone();
    let mut reported = None;
    let outcome = mm
        .find_match(&world, "no_men", &seeker, |id| reported = id)
        .await;

    assert_eq!(outcome, MatchOutcome::Found(match_id));
    assert_eq!(reported, Some(match_id));
    assert_eq!(outcome.actor(), Some(match_id));
}
