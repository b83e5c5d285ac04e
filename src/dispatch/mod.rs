//! Greedy multi-stop dispatch planning.
//!
//! Each call evaluates every unvisited patient: the trip from the current
//! location to the patient, the treatment time, and the trip on to the nearest
//! reachable hospital. The best feasible candidate according to the
//! [`SelectionStrategy`] is returned. Planning is read-only; applying the
//! decision is up to the caller (normally [`crate::simulation::Simulation`]).

mod strategy;

pub use strategy::{GreedyRatio, SelectionStrategy};

use crate::graph::{Graph, NodeId, Path};
use crate::solver::PathSolver;
use log::debug;


/// One fully evaluated dispatch option
#[derive(Debug, Clone, PartialEq)]
pub struct Candidate {
    pub patient: NodeId,
    pub hospital: NodeId, // nearest hospital reachable from the patient
    pub priority_score: f64,
    pub service_cost: f64,
    pub path_to_patient: Path,
    pub path_to_hospital: Path,
    pub total_cost: f64, // pickup + service + drop-off
}

impl Candidate {

    /// Priority gained per unit of time, undefined for a non-positive total cost
    pub fn ratio(&self) -> Option<f64> {
        if self.total_cost > 0.0 {
            Some(self.priority_score / self.total_cost)
        } else {
            None
        }
    }
}


/// Picks the next patient to serve
#[derive(Debug, Clone, Copy, Default)]
pub struct DispatchPlanner<P = GreedyRatio> {
    strategy: P,
}

impl<P: SelectionStrategy> DispatchPlanner<P> {

    pub fn new(strategy: P) -> Self {
        Self { strategy }
    }

    pub fn strategy(&self) -> &P {
        &self.strategy
    }

    /// Choose the next patient to serve from `current` within `remaining_budget`
    /// Patients and hospitals are evaluated in the order given; on equal rank the earlier patient is kept
    /// Returns None when no candidate is reachable, affordable and qualified
    pub fn choose_next<S: PathSolver>(
        &self,
        graph: &Graph,
        solver: &S,
        current: NodeId,
        remaining_budget: f64,
        unvisited_patients: &[NodeId],
        hospitals: &[NodeId],
    ) -> Option<Candidate> {

        let mut best: Option<(f64, Candidate)> = None;

        for &patient in unvisited_patients {
            let Some(candidate) = evaluate(graph, solver, current, patient, hospitals) else {
                continue;
            };

            if candidate.total_cost > remaining_budget {
                debug!(
                    "Patient {patient} out of budget: needs {:.1}, {:.1} left",
                    candidate.total_cost, remaining_budget
                );
                continue;
            }

            let Some(rank) = self.strategy.rank(&candidate) else {
                debug!("Patient {patient} disqualified by selection strategy");
                continue;
            };

            if best.as_ref().is_none_or(|(best_rank, _)| rank > *best_rank) {
                best = Some((rank, candidate));
            }
        }

        if let Some((rank, candidate)) = &best {
            debug!(
                "Chose patient {} (hospital {}), cost {:.1}, rank {:.3}",
                candidate.patient, candidate.hospital, candidate.total_cost, rank
            );
        }
        best.map(|(_, candidate)| candidate)
    }
}


/// Cost out a single patient, None if it cannot be served at all
fn evaluate<S: PathSolver>(
    graph: &Graph,
    solver: &S,
    current: NodeId,
    patient: NodeId,
    hospitals: &[NodeId],
) -> Option<Candidate> {

    let Some(node) = graph.node(patient).filter(|node| node.is_patient()) else {
        debug!("Skipping {patient}: not a patient of this graph");
        return None;
    };

    let Some(path_to_patient) = solver.shortest_path(graph, current, patient) else {
        debug!("Patient {patient} unreachable from {current}");
        return None;
    };

    // nearest hospital, the first one listed wins a tie
    let mut nearest: Option<(NodeId, Path)> = None;
    for &hospital in hospitals {
        let Some(path) = solver.shortest_path(graph, patient, hospital) else {
            continue;
        };
        if nearest.as_ref().is_none_or(|(_, best)| path.cost() < best.cost()) {
            nearest = Some((hospital, path));
        }
    }
    let Some((hospital, path_to_hospital)) = nearest else {
        debug!("Patient {patient} has no reachable hospital");
        return None;
    };

    let total_cost = path_to_patient.cost() + node.service_cost + path_to_hospital.cost();

    Some(Candidate {
        patient,
        hospital,
        priority_score: node.priority_score,
        service_cost: node.service_cost,
        path_to_patient,
        path_to_hospital,
        total_cost,
    })
}


/// Greedy ratio choice with the given solver
pub fn choose_next<S: PathSolver>(
    graph: &Graph,
    solver: &S,
    current: NodeId,
    remaining_budget: f64,
    unvisited_patients: &[NodeId],
    hospitals: &[NodeId],
) -> Option<Candidate> {
    DispatchPlanner::new(GreedyRatio).choose_next(graph, solver, current, remaining_budget, unvisited_patients, hospitals)
}


#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::{Edge, Node};
    use crate::solver::Dijkstra;
    use rstest::{fixture, rstest};

    // start 1 -3- patient 2 -4- hospital 3
    #[fixture]
    fn single() -> Graph {
        Graph::build(
            vec![Node::waypoint(1), Node::patient(2, 10.0, 2.0), Node::hospital(3)],
            vec![Edge::new(1, 2, 3.0), Edge::new(2, 3, 4.0)],
        )
    }

    #[rstest]
    fn test_single_patient(single: Graph) {
        let choice = choose_next(&single, &Dijkstra, 1, 20.0, &[2], &[3]).unwrap();

        assert_eq!(choice.patient, 2);
        assert_eq!(choice.hospital, 3);
        assert_eq!(choice.total_cost, 9.0);
        assert_eq!(choice.ratio(), Some(10.0 / 9.0));
        assert_eq!(choice.path_to_patient.nodes(), &[1, 2]);
        assert_eq!(choice.path_to_hospital.nodes(), &[2, 3]);
    }

    #[rstest]
    #[case(9.0, true)]
    #[case(8.999, false)]
    #[case(5.0, false)]
    #[case(0.0, false)]
    fn test_budget_is_inclusive(single: Graph, #[case] budget: f64, #[case] feasible: bool) {
        assert_eq!(choose_next(&single, &Dijkstra, 1, budget, &[2], &[3]).is_some(), feasible);
    }

    #[rstest]
    fn test_no_hospital_reachable() {
        let graph = Graph::build(
            vec![Node::waypoint(1), Node::patient(2, 10.0, 2.0), Node::hospital(3)],
            vec![Edge::new(1, 2, 3.0)],
        );
        assert!(choose_next(&graph, &Dijkstra, 1, 100.0, &[2], &[3]).is_none());
    }

    #[rstest]
    fn test_unreachable_patient_skipped() {
        let graph = Graph::build(
            vec![
                Node::waypoint(1),
                Node::patient(2, 50.0, 0.0),
                Node::patient(4, 1.0, 0.0),
                Node::hospital(3),
                Node::hospital(5),
            ],
            // patient 2 and hospital 5 form their own island
            vec![Edge::new(2, 5, 1.0), Edge::new(1, 4, 1.0), Edge::new(4, 3, 1.0)],
        );
        let choice = choose_next(&graph, &Dijkstra, 1, 100.0, &[2, 4], &[3, 5]).unwrap();
        assert_eq!(choice.patient, 4);
    }

    #[rstest]
    fn test_nearest_hospital_chosen() {
        // patient 2 reaches hospital 3 in 6 and hospital 4 in 2
        let graph = Graph::build(
            vec![Node::waypoint(1), Node::patient(2, 4.0, 1.0), Node::hospital(3), Node::hospital(4)],
            vec![Edge::new(1, 2, 1.0), Edge::new(2, 3, 6.0), Edge::new(2, 4, 2.0)],
        );
        let choice = choose_next(&graph, &Dijkstra, 1, 100.0, &[2], &[3, 4]).unwrap();
        assert_eq!(choice.hospital, 4);
        assert_eq!(choice.total_cost, 4.0);
    }

    #[rstest]
    fn test_equidistant_hospitals_first_listed_wins() {
        let graph = Graph::build(
            vec![Node::patient(2, 4.0, 1.0), Node::hospital(3), Node::hospital(4)],
            vec![Edge::new(2, 3, 2.0), Edge::new(2, 4, 2.0)],
        );
        assert_eq!(choose_next(&graph, &Dijkstra, 2, 100.0, &[2], &[4, 3]).unwrap().hospital, 4);
        assert_eq!(choose_next(&graph, &Dijkstra, 2, 100.0, &[2], &[3, 4]).unwrap().hospital, 3);
    }

    #[rstest]
    fn test_best_ratio_wins() {
        // patient 2: 10 / (1 + 0 + 1) = 5, patient 4: 30 / (5 + 0 + 5) = 3
        let graph = Graph::build(
            vec![Node::hospital(1), Node::patient(2, 10.0, 0.0), Node::patient(4, 30.0, 0.0)],
            vec![Edge::new(1, 2, 1.0), Edge::new(1, 4, 5.0)],
        );
        let choice = choose_next(&graph, &Dijkstra, 1, 100.0, &[4, 2], &[1]).unwrap();
        assert_eq!(choice.patient, 2);

        // with only 9 minutes left patient 4 is out of reach anyway
        let choice = choose_next(&graph, &Dijkstra, 1, 9.0, &[4, 2], &[1]).unwrap();
        assert_eq!(choice.patient, 2);
    }

    #[rstest]
    fn test_equal_ratio_keeps_first_listed() {
        let graph = Graph::build(
            vec![Node::hospital(1), Node::patient(2, 10.0, 0.0), Node::patient(3, 10.0, 0.0)],
            vec![Edge::new(1, 2, 1.0), Edge::new(1, 3, 1.0)],
        );
        for _ in 0..5 {
            assert_eq!(choose_next(&graph, &Dijkstra, 1, 100.0, &[2, 3], &[1]).unwrap().patient, 2);
            assert_eq!(choose_next(&graph, &Dijkstra, 1, 100.0, &[3, 2], &[1]).unwrap().patient, 3);
        }
    }

    #[rstest]
    fn test_zero_cost_trip_disqualified() {
        // patient sits on the hospital with nothing to do: total cost 0
        let graph = Graph::build(
            vec![Node::hospital(1), Node::patient(2, 10.0, 0.0)],
            vec![Edge::new(1, 2, 0.0)],
        );
        assert!(choose_next(&graph, &Dijkstra, 1, 100.0, &[2], &[1]).is_none());
    }

    #[rstest]
    fn test_non_patients_are_skipped(single: Graph) {
        assert!(choose_next(&single, &Dijkstra, 1, 100.0, &[1, 3, 77], &[3]).is_none());
    }

    #[rstest]
    fn test_custom_strategy(single: Graph) {
        struct Never;
        impl SelectionStrategy for Never {
            fn rank(&self, _candidate: &Candidate) -> Option<f64> {
                None
            }
        }
        let planner = DispatchPlanner::new(Never);
        assert!(planner.choose_next(&single, &Dijkstra, 1, 100.0, &[2], &[3]).is_none());
    }
}
