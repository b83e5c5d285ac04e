use crate::errors::PathPlannerError;
use crate::graph::{Graph, NodeId, Path};
use crate::solver::{Dijkstra, PathSolver};


/// Ad-hoc path request, independent of any simulation run
/// Unknown ids are a caller mistake and come back as `InvalidSelection`,
/// a graph that simply has no route between the two gives `Ok(None)`
pub fn find_path(graph: &Graph, start: NodeId, goal: NodeId) -> Result<Option<Path>, PathPlannerError> {
    find_path_with(graph, &Dijkstra, start, goal)
}

/// Same as [`find_path`] with a caller supplied solver
pub fn find_path_with<S: PathSolver>(graph: &Graph, solver: &S, start: NodeId, goal: NodeId) -> Result<Option<Path>, PathPlannerError> {
    for node in [start, goal] {
        if !graph.contains(node) {
            return Err(PathPlannerError::InvalidSelection { node });
        }
    }
    Ok(solver.shortest_path(graph, start, goal))
}


#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::{Edge, Node};

    fn graph() -> Graph {
        Graph::build(
            (1..=4).map(Node::waypoint),
            vec![Edge::new(1, 2, 5.0), Edge::new(2, 3, 5.0)],
        )
    }

    #[test]
    fn test_found() {
        let path = find_path(&graph(), 1, 3).unwrap().unwrap();
        assert_eq!(path.nodes(), &[1, 2, 3]);
        assert_eq!(path.cost(), 10.0);
    }

    #[test]
    fn test_disconnected_is_not_an_error() {
        assert_eq!(find_path(&graph(), 1, 4), Ok(None));
    }

    #[test]
    fn test_unknown_id_is_an_error() {
        assert_eq!(find_path(&graph(), 1, 40), Err(PathPlannerError::InvalidSelection { node: 40 }));
        assert_eq!(find_path(&graph(), 10, 40), Err(PathPlannerError::InvalidSelection { node: 10 }));
    }
}
