//! Rule graphs addressed by rule id.

use std::collections::HashMap;

use super::RuleGraph;
use crate::error::GraphError;

/// Lookup contract the interpreter loads graphs through.
pub trait RuleSource: Send + Sync {
    fn graph(&self, rule_id: &str) -> Option<&RuleGraph>;
}

/// In-memory store of rule graphs.
#[derive(Debug, Clone, Default)]
pub struct RuleLibrary {
    graphs: HashMap<String, RuleGraph>,
}

impl RuleLibrary {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a JSON array of graph documents. Every graph is validated.
    pub fn from_json(json: &str) -> Result<Self, GraphError> {
        let graphs: Vec<RuleGraph> = serde_json::from_str(json)?;
        let mut library = Self::new();
        for graph in graphs {
            library.insert(graph);
        }
        Ok(library)
    }

    /// Serialize every graph, sorted by rule id.
    pub fn to_json(&self) -> Result<String, GraphError> {
        let mut graphs: Vec<&RuleGraph> = self.graphs.values().collect();
        graphs.sort_by(|a, b| a.id().cmp(b.id()));
        Ok(serde_json::to_string_pretty(&graphs)?)
    }

    /// Add a graph, returning the one it replaced.
    pub fn insert(&mut self, graph: RuleGraph) -> Option<RuleGraph> {
        self.graphs.insert(graph.id().to_string(), graph)
    }

    pub fn with(mut self, graph: RuleGraph) -> Self {
        self.insert(graph);
        self
    }

    pub fn remove(&mut self, rule_id: &str) -> Option<RuleGraph> {
        self.graphs.remove(rule_id)
    }

    pub fn rule_ids(&self) -> impl Iterator<Item = &str> {
        self.graphs.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.graphs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.graphs.is_empty()
    }
}

impl RuleSource for RuleLibrary {
    fn graph(&self, rule_id: &str) -> Option<&RuleGraph> {
        self.graphs.get(rule_id)
    }
}
