//! Rule Graph - an immutable directed multigraph of typed nodes.
//!
//! The graph consists of:
//! - **Nodes**: an arena indexed by [`NodeId`]
//! - **Wires**: `(node, port)` -> ordered destinations, each with the input
//!   [`Channel`] it arrives through
//!
//! A port may fan out to any number of destinations, or be left unwired,
//! which ends that branch.

mod builder;
mod library;
mod node;

pub use builder::*;
pub use library::*;
pub use node::*;

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::error::GraphError;

/// One destination of an output port.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Link {
    pub node: NodeId,
    /// `None` for diagnostic nodes, which have no input roles.
    pub channel: Option<Channel>,
}

/// Flat wire record used by the serialized document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Wire {
    pub from: NodeId,
    pub port: Port,
    pub to: NodeId,
    #[serde(default)]
    pub channel: Option<Channel>,
}

/// Serialized form of a graph: node kinds in id order plus a wire list.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GraphDocument {
    pub id: String,
    pub nodes: Vec<NodeKind>,
    #[serde(default)]
    pub wires: Vec<Wire>,
}

/// A validated rule graph, addressed by its rule id.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(try_from = "GraphDocument", into = "GraphDocument")]
pub struct RuleGraph {
    id: String,
    nodes: Vec<Node>,
    start: Option<NodeId>,
    outputs: HashMap<(NodeId, Port), Vec<Link>>,
}

impl RuleGraph {
    pub fn id(&self) -> &str {
        &self.id
    }

    /// The Start node, if the graph has one.
    ///
    /// Drafts without a Start node are representable; evaluating them fails.
    pub fn start(&self) -> Option<NodeId> {
        self.start
    }

    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.0)
    }

    /// Destinations wired to `port` of `id`, in wiring order. Possibly empty.
    pub fn outputs(&self, id: NodeId, port: Port) -> &[Link] {
        self.outputs
            .get(&(id, port))
            .map(|v| v.as_slice())
            .unwrap_or(&[])
    }

    /// Destination node ids of `port` of `id`.
    pub fn destinations(&self, id: NodeId, port: Port) -> impl Iterator<Item = NodeId> + '_ {
        self.outputs(id, port).iter().map(|link| link.node)
    }

    pub fn nodes(&self) -> impl Iterator<Item = &Node> {
        self.nodes.iter()
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn wire_count(&self) -> usize {
        self.outputs.values().map(Vec::len).sum()
    }
}

impl TryFrom<GraphDocument> for RuleGraph {
    type Error = GraphError;

    fn try_from(doc: GraphDocument) -> Result<Self, Self::Error> {
        let nodes: Vec<Node> = doc
            .nodes
            .into_iter()
            .enumerate()
            .map(|(index, kind)| Node {
                id: NodeId(index),
                kind,
            })
            .collect();

        let starts: Vec<NodeId> = nodes
            .iter()
            .filter(|n| n.kind == NodeKind::Start)
            .map(|n| n.id)
            .collect();
        if starts.len() > 1 {
            return Err(GraphError::MultipleStarts {
                rule: doc.id,
                count: starts.len(),
            });
        }

        let mut outputs: HashMap<(NodeId, Port), Vec<Link>> = HashMap::new();
        for wire in doc.wires {
            let Some(from) = nodes.get(wire.from.0) else {
                return Err(GraphError::UnknownNode {
                    rule: doc.id,
                    node: wire.from,
                });
            };
            let Some(to) = nodes.get(wire.to.0) else {
                return Err(GraphError::UnknownNode {
                    rule: doc.id,
                    node: wire.to,
                });
            };
            if !from.kind.has_port(wire.port) {
                return Err(GraphError::InvalidPort {
                    rule: doc.id,
                    node: from.id,
                    kind: from.kind.name(),
                    port: wire.port,
                });
            }
            if !to.kind.accepts(wire.channel) {
                return Err(GraphError::InvalidChannel {
                    rule: doc.id,
                    node: to.id,
                    kind: to.kind.name(),
                    channel: wire.channel,
                });
            }

            outputs.entry((wire.from, wire.port)).or_default().push(Link {
                node: wire.to,
                channel: wire.channel,
            });
        }

        Ok(Self {
            id: doc.id,
            start: starts.first().copied(),
            nodes,
            outputs,
        })
    }
}

impl From<RuleGraph> for GraphDocument {
    fn from(graph: RuleGraph) -> Self {
        let mut wires = Vec::with_capacity(graph.wire_count());
        for node in &graph.nodes {
            for &port in node.kind.ports() {
                for link in graph.outputs(node.id, port) {
                    wires.push(Wire {
                        from: node.id,
                        port,
                        to: link.node,
                        channel: link.channel,
                    });
                }
            }
        }

        Self {
            id: graph.id,
            nodes: graph.nodes.into_iter().map(|n| n.kind).collect(),
            wires,
        }
    }
}
