use crate::errors::PathPlannerError;
use super::frontier::Frontier;
use super::{shortest_path, GraphNodeMap, NO_PARENT};

use std::{collections::BinaryHeap, hash::Hash, fmt::Debug};
use num_traits::Zero;
use indexmap::map::Entry::{Occupied, Vacant};




/// Identify the shortest path using Dijkstra's Algorithm
/// https://en.wikipedia.org/wiki/Dijkstra%27s_algorithm
/// From start Node, traverse through graph until node meets goal criteria
/// Returns the path from start to goal and its total cost
pub fn dijkstra<N, C, IT, NN, G>(start: N, neighbors: NN, goal: G) -> Result<(Vec<N>, C), PathPlannerError>
where
    N: Eq + Hash + Clone + Debug,
    NN: Fn(&N) -> IT, // returns iterator of neighbors + costs
    IT: IntoIterator<Item = (N, C)>, // Iterator of neighbors + edge cost to neighbor node
    C: Zero + Ord + Copy + Debug,
    G: Fn(&N) -> bool, // node qualifier for goal
    {

    // Build the graph - terminates when the goal is met
    let (node_map, goal_index) = build_dijkstra_graph(start, neighbors, goal);

    match goal_index {
        Some(goal_index) => shortest_path(&node_map, goal_index),
        None => Err(PathPlannerError::NoPathFound),
    }
}


/// Traverses the graph using Dijkstra's algorithm
/// Returns a map of nodes with their smallest costs along with the index of the goal node
/// Costs must be non-negative, otherwise settled nodes could still improve
fn build_dijkstra_graph<N, C, IT, NN, G>(start: N, neighbors: NN, goal_fn: G) -> (GraphNodeMap<N, C>, Option<usize>)
where
    N: Eq + Hash + Clone + Debug,
    NN: Fn(&N) -> IT, // returns iterator of neighbors + costs
    IT: IntoIterator<Item = (N, C)>, // Iterator of neighbors + edge cost to neighbor node
    C: Zero + Ord + Copy + Debug,
    G: Fn(&N) -> bool // Returns true if goal is met
    {

    // Nodes to visit - the frontier pops the cheapest entry first
    let mut nodes_to_visit: BinaryHeap<Frontier<C>> = BinaryHeap::new();

    // Best known cost per node, anything missing is still at infinity
    // The tuple contains (parent_index, cost) where parent_index is the index of the parent node in the map
    // for the start node, parent_index is set to NO_PARENT
    let mut nodes_map: GraphNodeMap<N, C> = GraphNodeMap::default();

    let start_index = nodes_map.insert_full(start, (NO_PARENT, Zero::zero())).0;
    nodes_to_visit.push(Frontier {
        index: start_index,
        cost: Zero::zero(),
        priority: Zero::zero(),
    });

    // Loop over each node to visit, removing the smallest node
    while let Some(Frontier { index, cost, .. }) = nodes_to_visit.pop() {

        // fetch current best cost for node
        let Some((node, &(_, c))) = nodes_map.get_index(index) else {
            continue;
        };

        // Stale entry, a cheaper route to this node was already expanded
        if cost > c {
            continue;
        }

        if goal_fn(node) {
            return (nodes_map, Some(index));
        }

        let node = node.clone();

        for (neighbor, edge_cost) in neighbors(&node) {

            let new_cost = edge_cost + c;

            let neighbor_index = match nodes_map.entry(neighbor) {
                Vacant(e) => {
                    let i = e.index();
                    e.insert((index, new_cost));
                    i
                }
                Occupied(mut e) => {
                    // Only a strictly better path replaces the recorded parent
                    if e.get().1 > new_cost {
                        e.insert((index, new_cost));
                        e.index()
                    } else {
                        continue;
                    }
                }
            };

            nodes_to_visit.push(Frontier {
                index: neighbor_index,
                cost: new_cost,
                priority: new_cost,
            });
        }
    }

    (nodes_map, None)
}
