//! Shortest-path solvers running on a [`Graph`].
//!
//! Both solvers are uniform-cost searches over non-negative weights. Ties
//! between equally cheap frontier entries go to the node discovered first, so
//! identical input always produces the identical path. Path costs are added
//! up from the endpoint with the lower id, so `a -> b` and `b -> a` agree.

use crate::graph::{Graph, NodeId, Path};
use crate::graph_algos::{a_star::a_star, dijkstra::dijkstra};

use ordered_float::OrderedFloat;


/// Anything able to answer point-to-point path queries on a graph
/// `None` means there is no path: disconnected endpoints or ids missing from the graph
pub trait PathSolver {
    fn shortest_path(&self, graph: &Graph, start: NodeId, goal: NodeId) -> Option<Path>;
}

impl<S: PathSolver + ?Sized> PathSolver for &S {
    fn shortest_path(&self, graph: &Graph, start: NodeId, goal: NodeId) -> Option<Path> {
        (**self).shortest_path(graph, start, goal)
    }
}


/// Plain Dijkstra, the default solver
#[derive(Debug, Clone, Copy, Default)]
pub struct Dijkstra;

impl PathSolver for Dijkstra {
    fn shortest_path(&self, graph: &Graph, start: NodeId, goal: NodeId) -> Option<Path> {
        if !graph.contains(start) || !graph.contains(goal) {
            return None;
        }
        let (nodes, _) = dijkstra(start, weighted_neighbors(graph), |node| *node == goal).ok()?;
        Path::from_nodes(graph, nodes)
    }
}


/// Heuristic that never guesses, A* then expands exactly like Dijkstra
pub fn zero_heuristic(_node: NodeId, _goal: NodeId) -> f64 {
    0.0
}


/// A* guided by a caller supplied heuristic `(node, goal) -> estimated remaining cost`
/// The heuristic must not overestimate, otherwise paths may not be the cheapest
/// Estimates that are negative or not finite are treated as zero
#[derive(Debug, Clone, Copy)]
pub struct AStar<H = fn(NodeId, NodeId) -> f64> {
    heuristic: H,
}

impl Default for AStar {
    fn default() -> Self {
        Self { heuristic: zero_heuristic }
    }
}

impl<H: Fn(NodeId, NodeId) -> f64> AStar<H> {
    pub fn new(heuristic: H) -> Self {
        Self { heuristic }
    }
}

impl<H: Fn(NodeId, NodeId) -> f64> PathSolver for AStar<H> {
    fn shortest_path(&self, graph: &Graph, start: NodeId, goal: NodeId) -> Option<Path> {
        if !graph.contains(start) || !graph.contains(goal) {
            return None;
        }
        let heuristic = |node: &NodeId| {
            let estimate = (self.heuristic)(*node, goal);
            OrderedFloat(if estimate.is_finite() && estimate > 0.0 { estimate } else { 0.0 })
        };
        let (nodes, _) = a_star(start, weighted_neighbors(graph), heuristic, |node| *node == goal).ok()?;
        Path::from_nodes(graph, nodes)
    }
}


/// Shortest path with the default solver
pub fn shortest_path(graph: &Graph, start: NodeId, goal: NodeId) -> Option<Path> {
    Dijkstra.shortest_path(graph, start, goal)
}


/// Neighbor function for the search kernels, weights wrapped for a total order
fn weighted_neighbors(graph: &Graph) -> impl Fn(&NodeId) -> Vec<(NodeId, OrderedFloat<f64>)> + '_ {
    move |node: &NodeId| {
        graph.neighbors(*node).iter()
            .map(|&(neighbor, weight)| (neighbor, OrderedFloat(weight)))
            .collect()
    }
}
