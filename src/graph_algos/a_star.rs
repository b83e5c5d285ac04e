use crate::errors::PathPlannerError;
use super::frontier::Frontier;
use super::{shortest_path, GraphNodeMap, NO_PARENT};

use std::{
    collections::BinaryHeap,
    hash::Hash,
    fmt::Debug,
};
use num_traits::Zero;
use indexmap::map::Entry::{Occupied, Vacant};



/// A* Algorithm
/// https://en.wikipedia.org/wiki/A*_search_algorithm
/// From start Node, traverse through graph until node meets goal criteria
/// The heuristic must be admissible (never overestimates the true cost to reach the goal),
/// otherwise the returned path may not be the cheapest one
/// A zero heuristic turns this into Dijkstra's algorithm
pub fn a_star<N, C, IT, NN, H, G>(start: N, neighbors: NN, heuristic_fn: H, goal_fn: G) -> Result<(Vec<N>, C), PathPlannerError>
where
    N: Eq + Hash + Clone + Debug,
    NN: Fn(&N) -> IT, // returns iterator of neighbors + costs
    H: Fn(&N) -> C, // heuristic function
    IT: IntoIterator<Item = (N, C)>, // Iterator of neighbors + edge cost to neighbor node
    C: Zero + Ord + Copy + Debug,
    G: Fn(&N) -> bool, // node qualifier for goal
    {

    let (node_map, goal_index) = build_a_star_graph(start, neighbors, heuristic_fn, goal_fn);

    match goal_index {
        Some(goal_index) => shortest_path(&node_map, goal_index),
        None => Err(PathPlannerError::NoPathFound),
    }
}


/// Traverses the graph using A* algorithm
/// Returns a map of nodes with their smallest costs along with the index of the goal node
fn build_a_star_graph<N, C, IT, NN, H, G>(start: N, neighbors: NN, heuristic_fn: H, goal_fn: G) -> (GraphNodeMap<N, C>, Option<usize>)
where
    N: Eq + Hash + Clone + Debug,
    NN: Fn(&N) -> IT,
    IT: IntoIterator<Item = (N, C)>,
    C: Zero + Ord + Copy + Debug,
    H: Fn(&N) -> C,
    G: Fn(&N) -> bool
{
    // Open List
    // Nodes that need to be evaluated, sorted by f_cost (cost + heuristic)
    let mut open_list: BinaryHeap<Frontier<C>> = BinaryHeap::new();

    // Closed list with (parent_index, cost) per node, used to find the final path
    let mut closed_list: GraphNodeMap<N, C> = GraphNodeMap::default();

    let start_f = heuristic_fn(&start);
    let start_index = closed_list.insert_full(start, (NO_PARENT, Zero::zero())).0;
    open_list.push(Frontier {
        index: start_index,
        cost: Zero::zero(),
        priority: start_f,
    });

    while let Some(Frontier { index, cost, .. }) = open_list.pop() {

        let Some((node, &(_, c))) = closed_list.get_index(index) else {
            continue;
        };

        // If cost of the popped entry is higher than the best cost, a better path was already found
        if cost > c {
            continue;
        }

        if goal_fn(node) {
            return (closed_list, Some(index));
        }

        let node = node.clone();

        for (neighbor, edge_cost) in neighbors(&node) {

            // Confirmed cost, not heuristic
            let new_cost = edge_cost + c;
            let h_cost: C = heuristic_fn(&neighbor);

            let neighbor_index = match closed_list.entry(neighbor) {
                Vacant(e) => {
                    let i = e.index();
                    e.insert((index, new_cost));
                    i
                }
                Occupied(mut e) => {
                    if e.get().1 > new_cost {
                        e.insert((index, new_cost));
                        e.index()
                    } else {
                        continue;
                    }
                }
            };

            open_list.push(Frontier {
                index: neighbor_index,
                cost: new_cost,
                priority: new_cost + h_cost,
            });
        }
    }
    (closed_list, None)
}



#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn create_neighbor_fn(graph: &HashMap<String, Vec<(String, u32)>>) -> impl Fn(&String) -> Vec<(String, u32)> + '_ {
        move |node: &String| {
            graph.get(node).cloned().unwrap_or_default()
        }
    }

    fn path(nodes: &[&str]) -> Vec<String> {
        nodes.iter().map(|n| n.to_string()).collect()
    }

    #[test]
    fn test_a_star() {
        // Diamond-shaped graph: A -> B -> D and A -> C -> D
        let mut graph = HashMap::new();
        graph.insert("A".to_string(), vec![("B".to_string(), 1), ("C".to_string(), 3)]);
        graph.insert("B".to_string(), vec![("D".to_string(), 5)]);
        graph.insert("C".to_string(), vec![("D".to_string(), 1)]);
        graph.insert("D".to_string(), vec![]);

        let (found, cost) = a_star(
            "A".to_string(),
            create_neighbor_fn(&graph),
            |_node: &String| 0,
            |node| node == "D"
        ).unwrap();

        assert_eq!(found, path(&["A", "C", "D"]));
        assert_eq!(cost, 4);
    }

    #[test]
    fn test_a_star_handles_unreachable_goal() {
        let mut graph = HashMap::new();
        graph.insert("A".to_string(), vec![("B".to_string(), 1)]);
        graph.insert("B".to_string(), vec![("C".to_string(), 1)]);
        graph.insert("C".to_string(), vec![]);
        graph.insert("D".to_string(), vec![]);

        let result = a_star("A".to_string(), create_neighbor_fn(&graph), |_node: &String| 0, |node| node == "D");

        assert!(matches!(result, Err(PathPlannerError::NoPathFound)));
    }

    #[test]
    fn test_build_a_star_graph_with_cycle() {
        let mut graph = HashMap::new();
        graph.insert("A".to_string(), vec![("B".to_string(), 1)]);
        graph.insert("B".to_string(), vec![("C".to_string(), 1)]);
        graph.insert("C".to_string(), vec![("A".to_string(), 1), ("D".to_string(), 2)]);
        graph.insert("D".to_string(), vec![]);

        let (result, _) = build_a_star_graph(
            "A".to_string(),
            create_neighbor_fn(&graph),
            |_node: &String| 0,
            |node| node == "D"
        );

        let costs: HashMap<_, _> = result.iter().map(|(node, (_, cost))| (node.clone(), *cost)).collect();
        assert_eq!(costs["A"], 0);
        assert_eq!(costs["B"], 1);
        assert_eq!(costs["C"], 2);
        assert_eq!(costs["D"], 4);
    }

    #[test]
    fn test_a_star_with_heuristic() {
        // A(0,0) -> B(1,0) -> D(2,0)
        //   |
        // C(0,1) ------> D(2,0)
        let mut graph = HashMap::new();
        graph.insert("A".to_string(), vec![("B".to_string(), 1), ("C".to_string(), 1)]);
        graph.insert("B".to_string(), vec![("D".to_string(), 1)]);
        graph.insert("C".to_string(), vec![("D".to_string(), 2)]);
        graph.insert("D".to_string(), vec![]);

        let coords = HashMap::from([
            ("A".to_string(), (0i32, 0i32)),
            ("B".to_string(), (1i32, 0i32)),
            ("C".to_string(), (0i32, 1i32)),
            ("D".to_string(), (2i32, 0i32)),
        ]);

        // Manhattan distance to D
        let heuristic = |node: &String| {
            let (nx, ny) = coords[node];
            let (gx, gy) = coords["D"];
            ((nx - gx).abs() + (ny - gy).abs()) as u32
        };

        let (found, cost) = a_star("A".to_string(), create_neighbor_fn(&graph), heuristic, |node| node == "D").unwrap();

        assert_eq!(found, path(&["A", "B", "D"]));
        assert_eq!(cost, 2);
    }
}
