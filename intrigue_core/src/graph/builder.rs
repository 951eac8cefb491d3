//! Fluent construction of rule graphs.

use super::{Channel, GraphDocument, NodeId, NodeKind, Port, RuleGraph, Wire};
use crate::error::GraphError;

/// Assembles a [`RuleGraph`] node by node; validation happens in [`build`](Self::build).
#[derive(Debug, Clone)]
pub struct GraphBuilder {
    id: String,
    nodes: Vec<NodeKind>,
    wires: Vec<Wire>,
}

impl GraphBuilder {
    pub fn new(rule_id: impl Into<String>) -> Self {
        Self {
            id: rule_id.into(),
            nodes: Vec::new(),
            wires: Vec::new(),
        }
    }

    /// Add a node and return its id.
    pub fn node(&mut self, kind: NodeKind) -> NodeId {
        self.nodes.push(kind);
        NodeId(self.nodes.len() - 1)
    }

    pub fn start(&mut self) -> NodeId {
        self.node(NodeKind::Start)
    }

    /// Wire `from.port` into a condition node through `channel`.
    pub fn wire(&mut self, from: NodeId, port: Port, to: NodeId, channel: Channel) -> &mut Self {
        self.wires.push(Wire {
            from,
            port,
            to,
            channel: Some(channel),
        });
        self
    }

    /// Wire `from.port` into an Error or Warning node.
    pub fn flow(&mut self, from: NodeId, port: Port, to: NodeId) -> &mut Self {
        self.wires.push(Wire {
            from,
            port,
            to,
            channel: None,
        });
        self
    }

    pub fn build(self) -> Result<RuleGraph, GraphError> {
        RuleGraph::try_from(GraphDocument {
            id: self.id,
            nodes: self.nodes,
            wires: self.wires,
        })
    }
}
