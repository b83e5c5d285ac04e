//! Static network model: nodes, bidirectional edges and their adjacency.
//!
//! A [`Graph`] is built once from ingestion records and never changes
//! afterwards. Malformed records do not fail the build; they are left inert
//! and reported through [`Graph::issues`].

mod path;
mod records;

pub use path::{Path, PathSegment};
pub use records::{Edge, Node, NodeId, NodeKind};

use crate::collections::FxIndexMap;
use crate::errors::GraphStructureError;
use log::warn;


#[derive(Debug, Clone, Default)]
pub struct Graph {
    nodes: FxIndexMap<NodeId, Node>,
    edges: Vec<Edge>, // every record, usable or not
    adjacency: FxIndexMap<NodeId, Vec<(NodeId, f64)>>, // follows edge order
    issues: Vec<GraphStructureError>,
}

impl Graph {

    /// Build the graph from ingestion records
    /// - duplicate node ids: the last definition wins, the id keeps its first position
    /// - nodes with a negative or non-finite priority / service cost are not loaded
    /// - edges with an unknown endpoint or an unusable weight get no adjacency at all
    pub fn build<NI, EI>(nodes: NI, edges: EI) -> Self
    where
        NI: IntoIterator<Item = Node>,
        EI: IntoIterator<Item = Edge>,
    {
        let mut graph = Graph::default();

        for node in nodes {
            if let Some(issue) = invalid_attribute(&node) {
                graph.report(issue);
                continue;
            }
            let id = node.id;
            if graph.nodes.insert(id, node).is_some() {
                graph.report(GraphStructureError::DuplicateNode { id });
            }
        }

        for (edge_index, edge) in edges.into_iter().enumerate() {
            if let Some(issue) = graph.unusable_edge(edge_index, &edge) {
                graph.report(issue);
            } else {
                graph.adjacency.entry(edge.from).or_default().push((edge.to, edge.weight));
                // a self-loop only needs one entry
                if edge.from != edge.to {
                    graph.adjacency.entry(edge.to).or_default().push((edge.from, edge.weight));
                }
            }
            graph.edges.push(edge);
        }

        graph
    }

    fn report(&mut self, issue: GraphStructureError) {
        warn!("Graph record ignored: {issue}");
        self.issues.push(issue);
    }

    fn unusable_edge(&self, edge_index: usize, edge: &Edge) -> Option<GraphStructureError> {
        let Edge { from, to, weight } = *edge;
        if let Some(missing) = [from, to].into_iter().find(|id| !self.nodes.contains_key(id)) {
            return Some(GraphStructureError::UnknownEndpoint { edge_index, from, to, missing });
        }
        if !weight.is_finite() || weight < 0.0 {
            return Some(GraphStructureError::InvalidWeight { edge_index, from, to, weight });
        }
        None
    }

    /// Neighbors of a node with the weight of the connecting edge
    /// Every usable edge shows up once on each side, parallel edges included
    /// Unknown ids have no neighbors
    pub fn neighbors(&self, id: NodeId) -> &[(NodeId, f64)] {
        self.adjacency.get(&id).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Weight of the first usable edge joining `a` and `b`, in edge-list order
    pub fn edge_weight(&self, a: NodeId, b: NodeId) -> Option<f64> {
        self.neighbors(a).iter()
            .find(|(neighbor, _)| *neighbor == b)
            .map(|&(_, weight)| weight)
    }

    /// Cheapest of the parallel edges joining `a` and `b`
    /// This is the hop a shortest path actually travels
    pub(crate) fn hop_weight(&self, a: NodeId, b: NodeId) -> Option<f64> {
        self.neighbors(a).iter()
            .filter(|(neighbor, _)| *neighbor == b)
            .map(|&(_, weight)| weight)
            .reduce(f64::min)
    }

    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(&id)
    }

    pub fn contains(&self, id: NodeId) -> bool {
        self.nodes.contains_key(&id)
    }

    /// All loaded nodes, in first-appearance order
    pub fn nodes(&self) -> impl Iterator<Item = &Node> {
        self.nodes.values()
    }

    /// Every edge record, including inert ones
    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    /// Patient ids, in first-appearance order
    pub fn patients(&self) -> Vec<NodeId> {
        self.ids_of(NodeKind::Patient)
    }

    /// Hospital ids, in first-appearance order
    pub fn hospitals(&self) -> Vec<NodeId> {
        self.ids_of(NodeKind::Hospital)
    }

    fn ids_of(&self, kind: NodeKind) -> Vec<NodeId> {
        self.nodes.values()
            .filter(|node| node.kind == kind)
            .map(|node| node.id)
            .collect()
    }

    /// Records skipped or overridden while building
    pub fn issues(&self) -> &[GraphStructureError] {
        &self.issues
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}


fn invalid_attribute(node: &Node) -> Option<GraphStructureError> {
    [("priority_score", node.priority_score), ("service_cost", node.service_cost)]
        .into_iter()
        .find(|&(_, value)| !value.is_finite() || value < 0.0)
        .map(|(field, value)| GraphStructureError::InvalidAttribute { id: node.id, field, value })
}
