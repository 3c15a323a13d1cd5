//! `WeightedGraph`: named nodes joined by weighted directed edges.

use std::collections::BTreeMap;

use waypoint_search::{Cost, InvalidState, SearchProblem, Successor};

use crate::contract::{HarnessWorld, WorldHarnessError};

/// Node index into [`WeightedGraph::name`].
pub type NodeIndex = usize;

#[derive(Debug, Clone, Default)]
pub struct WeightedGraph {
    names: Vec<String>,
    index: BTreeMap<String, NodeIndex>,
    /// Outgoing edges per node, in insertion order.
    edges: Vec<Vec<(NodeIndex, Cost)>>,
    start: Option<NodeIndex>,
    goals: Vec<NodeIndex>,
}

impl WeightedGraph {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from `(from, to, cost)` triples.
    ///
    /// # Errors
    ///
    /// Returns [`WorldHarnessError::InvalidFixture`] if `start` or a goal
    /// names no node.
    pub fn from_edges(
        edges: &[(&str, &str, Cost)],
        start: &str,
        goals: &[&str],
    ) -> Result<Self, WorldHarnessError> {
        let mut graph = Self::new();
        for &(from, to, cost) in edges {
            graph.add_edge(from, to, cost);
        }
        graph.set_start(start)?;
        for goal in goals {
            graph.add_goal(goal)?;
        }
        Ok(graph)
    }

    /// Intern `name`, returning its index.
    pub fn add_node(&mut self, name: &str) -> NodeIndex {
        if let Some(&i) = self.index.get(name) {
            return i;
        }
        let i = self.names.len();
        self.names.push(name.to_string());
        self.index.insert(name.to_string(), i);
        self.edges.push(Vec::new());
        i
    }

    pub fn add_edge(&mut self, from: &str, to: &str, cost: Cost) {
        let from = self.add_node(from);
        let to = self.add_node(to);
        self.edges[from].push((to, cost));
    }

    /// # Errors
    ///
    /// Returns [`WorldHarnessError::InvalidFixture`] if `name` is unknown.
    pub fn set_start(&mut self, name: &str) -> Result<(), WorldHarnessError> {
        self.start = Some(self.lookup(name)?);
        Ok(())
    }

    /// # Errors
    ///
    /// Returns [`WorldHarnessError::InvalidFixture`] if `name` is unknown.
    pub fn add_goal(&mut self, name: &str) -> Result<(), WorldHarnessError> {
        let i = self.lookup(name)?;
        self.goals.push(i);
        Ok(())
    }

    fn lookup(&self, name: &str) -> Result<NodeIndex, WorldHarnessError> {
        self.index
            .get(name)
            .copied()
            .ok_or_else(|| WorldHarnessError::invalid(format!("unknown node {name:?}")))
    }

    #[must_use]
    pub fn name(&self, node: NodeIndex) -> Option<&str> {
        self.names.get(node).map(String::as_str)
    }

    #[must_use]
    pub fn node_count(&self) -> usize {
        self.names.len()
    }

    #[must_use]
    pub fn edges_from(&self, node: NodeIndex) -> &[(NodeIndex, Cost)] {
        self.edges.get(node).map_or(&[], Vec::as_slice)
    }
}

impl SearchProblem for WeightedGraph {
    type State = NodeIndex;
    type Action = ();

    fn problem_id(&self) -> &str {
        self.world_id()
    }

    fn expand(&self, state: &NodeIndex) -> Result<Vec<Successor<NodeIndex, ()>>, InvalidState> {
        let edges = self
            .edges
            .get(*state)
            .ok_or_else(|| InvalidState::new(format!("node {state} does not exist")))?;
        Ok(edges
            .iter()
            .map(|&(to, cost)| Successor::new(to, cost, ()))
            .collect())
    }

    fn is_goal(&self, state: &NodeIndex) -> bool {
        self.goals.contains(state)
    }
}

impl HarnessWorld for WeightedGraph {
    #[allow(clippy::unnecessary_literal_bound)]
    fn world_id(&self) -> &str {
        "weighted_graph"
    }

    fn initial_state(&self) -> Result<NodeIndex, WorldHarnessError> {
        self.start
            .ok_or_else(|| WorldHarnessError::invalid("no start node"))
    }
}
