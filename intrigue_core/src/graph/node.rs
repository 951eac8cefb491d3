//! Node definitions - the typed vertices of a rule graph.

use intrigue_world::{ActorId, ClanId, FamilyId, RoleId};
use serde::{Deserialize, Serialize};

/// Index of a node inside its graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodeId(pub usize);

impl std::fmt::Display for NodeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Named output port of a node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Port {
    Run,
    Male,
    Female,
    Is,
    #[serde(rename = "Is Not")]
    IsNot,
    True,
    False,
    Null,
    Next,
}

impl Port {
    pub fn name(&self) -> &'static str {
        match self {
            Port::Run => "Run",
            Port::Male => "Male",
            Port::Female => "Female",
            Port::Is => "Is",
            Port::IsNot => "Is Not",
            Port::True => "True",
            Port::False => "False",
            Port::Null => "Null",
            Port::Next => "Next",
        }
    }
}

impl std::fmt::Display for Port {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Input role through which a condition node is reached.
///
/// The role decides which actor, or which ordered pair of actors, the node's
/// predicate runs against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Channel {
    Conspirator,
    Target,
    /// The actor the branch is currently about.
    #[serde(rename = "[Actor]")]
    Actor,
    /// The ordered (conspirator, target) pair.
    #[serde(rename = "[Dual]")]
    Dual,
}

impl std::fmt::Display for Channel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Channel::Conspirator => "Conspirator",
            Channel::Target => "Target",
            Channel::Actor => "[Actor]",
            Channel::Dual => "[Dual]",
        };
        f.write_str(name)
    }
}

/// What a Get node compares against: a fixed id, or the result of a bridge method.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Selector<T> {
    Fixed(T),
    Invoked(String),
}

const SINGLE_INPUTS: &[Channel] = &[Channel::Conspirator, Channel::Target, Channel::Actor];
const PAIR_INPUTS: &[Channel] = &[Channel::Conspirator, Channel::Target, Channel::Dual];
const INVOKE_INPUTS: &[Channel] = &[
    Channel::Conspirator,
    Channel::Target,
    Channel::Actor,
    Channel::Dual,
];

/// The kind of a node together with its kind-specific fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind")]
pub enum NodeKind {
    /// Entry point; exactly one per graph.
    Start,
    Gender,
    GetActor { actor: Selector<ActorId> },
    GetClan { clan: Selector<ClanId> },
    GetRole { role: RoleId },
    GetFamily { family: Selector<FamilyId> },
    IsAi,
    IsParent,
    IsSibling,
    /// Calls a host predicate registered on the invocation bridge.
    Invoke { method: String },
    /// Records a failure message and carries on through `Next`.
    Error { message: String },
    /// Records an informational message and carries on through `Next`.
    Warning { message: String },
}

impl NodeKind {
    pub fn error(message: impl Into<String>) -> Self {
        NodeKind::Error {
            message: message.into(),
        }
    }

    pub fn warning(message: impl Into<String>) -> Self {
        NodeKind::Warning {
            message: message.into(),
        }
    }

    pub fn invoke(method: impl Into<String>) -> Self {
        NodeKind::Invoke {
            method: method.into(),
        }
    }

    /// Output ports this kind always defines.
    pub fn ports(&self) -> &'static [Port] {
        match self {
            NodeKind::Start => &[Port::Run],
            NodeKind::Gender => &[Port::Male, Port::Female],
            NodeKind::GetActor { .. }
            | NodeKind::GetClan { .. }
            | NodeKind::GetRole { .. }
            | NodeKind::GetFamily { .. } => &[Port::Is, Port::IsNot],
            NodeKind::IsAi | NodeKind::IsParent | NodeKind::IsSibling => {
                &[Port::True, Port::False]
            }
            NodeKind::Invoke { .. } => &[Port::True, Port::False, Port::Null],
            NodeKind::Error { .. } | NodeKind::Warning { .. } => &[Port::Next],
        }
    }

    /// Input channels a wire into this kind may use.
    ///
    /// Empty for Start (never a destination) and for diagnostic nodes, which
    /// take a plain, role-less input.
    pub fn inputs(&self) -> &'static [Channel] {
        match self {
            NodeKind::Start | NodeKind::Error { .. } | NodeKind::Warning { .. } => &[],
            NodeKind::Gender
            | NodeKind::GetActor { .. }
            | NodeKind::GetClan { .. }
            | NodeKind::GetRole { .. }
            | NodeKind::GetFamily { .. }
            | NodeKind::IsAi => SINGLE_INPUTS,
            NodeKind::IsParent | NodeKind::IsSibling => PAIR_INPUTS,
            NodeKind::Invoke { .. } => INVOKE_INPUTS,
        }
    }

    /// Whether a wire arriving through `channel` is valid for this kind.
    pub fn accepts(&self, channel: Option<Channel>) -> bool {
        match (self, channel) {
            (NodeKind::Start, _) => false,
            (NodeKind::Error { .. } | NodeKind::Warning { .. }, None) => true,
            (_, Some(channel)) => self.inputs().contains(&channel),
            (_, None) => false,
        }
    }

    pub fn has_port(&self, port: Port) -> bool {
        self.ports().contains(&port)
    }

    pub fn name(&self) -> &'static str {
        match self {
            NodeKind::Start => "Start",
            NodeKind::Gender => "Gender",
            NodeKind::GetActor { .. } => "GetActor",
            NodeKind::GetClan { .. } => "GetClan",
            NodeKind::GetRole { .. } => "GetRole",
            NodeKind::GetFamily { .. } => "GetFamily",
            NodeKind::IsAi => "IsAI",
            NodeKind::IsParent => "IsParent",
            NodeKind::IsSibling => "IsSibling",
            NodeKind::Invoke { .. } => "Invoke",
            NodeKind::Error { .. } => "Error",
            NodeKind::Warning { .. } => "Warning",
        }
    }
}

/// A node placed in a graph.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Node {
    pub id: NodeId,
    pub kind: NodeKind,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ports_are_exhaustive_per_kind() {
        assert_eq!(NodeKind::Gender.ports(), &[Port::Male, Port::Female]);
        assert_eq!(
            NodeKind::invoke("IsRival").ports(),
            &[Port::True, Port::False, Port::Null]
        );
        assert!(NodeKind::error("x").has_port(Port::Next));
        assert!(!NodeKind::Start.has_port(Port::Next));
    }

    #[test]
    fn test_channel_acceptance() {
        assert!(NodeKind::Gender.accepts(Some(Channel::Target)));
        assert!(NodeKind::Gender.accepts(Some(Channel::Actor)));
        assert!(!NodeKind::Gender.accepts(Some(Channel::Dual)));
        assert!(!NodeKind::Gender.accepts(None));

        assert!(NodeKind::IsParent.accepts(Some(Channel::Dual)));
        assert!(!NodeKind::IsParent.accepts(Some(Channel::Actor)));

        assert!(NodeKind::warning("w").accepts(None));
        assert!(!NodeKind::warning("w").accepts(Some(Channel::Target)));
        assert!(!NodeKind::Start.accepts(None));
    }

    #[test]
    fn test_port_serde_names() {
        assert_eq!(serde_json::to_string(&Port::IsNot).unwrap(), "\"Is Not\"");
        assert_eq!(serde_json::to_string(&Channel::Dual).unwrap(), "\"[Dual]\"");
        let port: Port = serde_json::from_str("\"Is Not\"").unwrap();
        assert_eq!(port, Port::IsNot);
    }

    #[test]
    fn test_node_kind_tagged_json() {
        let kind: NodeKind =
            serde_json::from_str(r#"{"kind":"Error","message":"No"}"#).unwrap();
        assert_eq!(kind, NodeKind::error("No"));

        let json = serde_json::to_string(&NodeKind::GetRole { role: RoleId::nil() }).unwrap();
        assert!(json.contains("\"kind\":\"GetRole\""));
    }
}
