use crate::errors::PathPlannerError;
use super::{GraphNodeMap, NO_PARENT};

/// Construct the shortest path from the goal node to the start node
/// Returns the ordered path from start to goal along with the cost recorded for the goal
/// node_map: GraphNodeMap<N, C> - map of nodes with their parent index and cost
/// goal_index: usize - index of the goal node in the node_map
pub(crate) fn shortest_path<N, C>(node_map: &GraphNodeMap<N, C>, goal_index: usize) -> Result<(Vec<N>, C), PathPlannerError>
where
    N: Clone,
    C: Copy,
{

    let goal_cost = match node_map.get_index(goal_index) {
        Some((_, &(_, cost))) => cost,
        None => return Err(PathPlannerError::NoPathFound),
    };

    let mut path = Vec::new();
    let mut current_index = goal_index;

    // Trace back from goal to start
    while current_index != NO_PARENT {
        // A parent chain longer than the map means the map is corrupt
        if path.len() > node_map.len() {
            return Err(PathPlannerError::NoPathFound);
        }
        if let Some((node, &(parent_index, _))) = node_map.get_index(current_index) {
            path.push(node.clone());
            current_index = parent_index;
        } else {
            return Err(PathPlannerError::NoPathFound);
        }
    }

    // The path is in reverse order, so reverse it
    path.reverse();

    Ok((path, goal_cost))
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_path_reconstruction() {
        let mut node_map: GraphNodeMap<u32, u32> = GraphNodeMap::default();

        let a_index = node_map.insert_full(1, (NO_PARENT, 0)).0;
        let b_index = node_map.insert_full(2, (a_index, 1)).0;
        let c_index = node_map.insert_full(3, (a_index, 3)).0;
        let d_index = node_map.insert_full(4, (c_index, 4)).0;

        assert_eq!(shortest_path(&node_map, d_index).unwrap(), (vec![1, 3, 4], 4));
        assert_eq!(shortest_path(&node_map, b_index).unwrap(), (vec![1, 2], 1));
        assert_eq!(shortest_path(&node_map, a_index).unwrap(), (vec![1], 0));
    }

    #[test]
    fn test_unknown_goal_index() {
        let node_map: GraphNodeMap<u32, u32> = GraphNodeMap::default();
        assert_eq!(shortest_path(&node_map, 3), Err(PathPlannerError::NoPathFound));
    }

    #[test]
    fn test_parent_cycle_is_rejected() {
        // 1 and 2 point at each other, nothing reaches the start marker
        let mut node_map: GraphNodeMap<u32, u32> = GraphNodeMap::default();
        node_map.insert(1, (1, 0));
        node_map.insert(2, (0, 1));
        assert_eq!(shortest_path(&node_map, 1), Err(PathPlannerError::NoPathFound));
    }
}
