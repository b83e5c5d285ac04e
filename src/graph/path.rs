use super::{Graph, NodeId};


/// One hop of a path, as consumed by a renderer
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PathSegment {
    pub from: NodeId,
    pub to: NodeId,
    pub weight: f64,
}


/// Ordered, non-empty sequence of connected nodes plus the total travel cost
/// A single node path means "already there" and costs nothing
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Path {
    nodes: Vec<NodeId>,
    cost: f64,
}

impl Path {

    /// Build a path from a caller-chosen node sequence
    /// Returns None if the sequence is empty, names an unknown node, or skips a missing edge
    /// The cost uses the cheapest edge between each consecutive pair
    pub fn from_nodes(graph: &Graph, nodes: Vec<NodeId>) -> Option<Self> {
        let first = *nodes.first()?;
        if !graph.contains(first) {
            return None;
        }
        let cost = route_cost(graph, &nodes)?;
        Some(Self { nodes, cost })
    }

    pub fn nodes(&self) -> &[NodeId] {
        &self.nodes
    }

    pub fn cost(&self) -> f64 {
        self.cost
    }

    pub fn start(&self) -> NodeId {
        self.nodes[0] // non-empty by construction
    }

    pub fn end(&self) -> NodeId {
        self.nodes[self.nodes.len() - 1]
    }

    /// True for the zero-cost "already at destination" path
    pub fn is_trivial(&self) -> bool {
        self.nodes.len() == 1
    }

    /// Expand the path into the edges it travels
    /// Each hop uses the cheapest parallel edge, so the weights add up to `cost`
    /// when summed from the end with the lower id
    /// Returns None if a hop is not an edge of `graph`
    pub fn segments(&self, graph: &Graph) -> Option<Vec<PathSegment>> {
        self.nodes.windows(2)
            .map(|pair| Some(PathSegment {
                from: pair[0],
                to: pair[1],
                weight: graph.hop_weight(pair[0], pair[1])?,
            }))
            .collect()
    }
}


/// Total of the cheapest hops, always added up from the endpoint with the lower id
/// so a route and its reverse get the same cost to the last bit
fn route_cost(graph: &Graph, nodes: &[NodeId]) -> Option<f64> {
    let add_hop = |cost: f64, pair: &[NodeId]| Some(cost + graph.hop_weight(pair[0], pair[1])?);
    if nodes.first() <= nodes.last() {
        nodes.windows(2).try_fold(0.0, add_hop)
    } else {
        nodes.windows(2).rev().try_fold(0.0, add_hop)
    }
}
