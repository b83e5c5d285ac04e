//! Step-by-step ambulance run over a depleting time budget.
//!
//! [`Simulation`] owns the mutable run state and borrows the graph. Every
//! dispatch step asks the planner for one patient, then travels to them,
//! treats them and drops them at the nearest hospital. The run is exposed as a
//! lazy [`Iterator`] of [`StepEvent`]s so a renderer can pull events at its
//! own pace; nothing in here waits or sleeps.

mod events;

pub use events::{CompletionReason, DispatchStep, SimulationReport, SimulationStatus, StepEvent};

use crate::collections::FxIndexSet;
use crate::dispatch::{Candidate, DispatchPlanner, GreedyRatio, SelectionStrategy};
use crate::errors::DispatchError;
use crate::graph::{Graph, NodeId, Path, PathSegment};
use crate::solver::{Dijkstra, PathSolver};

use std::collections::VecDeque;
use log::{debug, info, warn};


/// Where the ambulance starts and how much time it has
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ScenarioConfig {
    pub start_node: NodeId,
    pub total_time_budget: f64,
}

impl ScenarioConfig {
    pub fn new(start_node: NodeId, total_time_budget: f64) -> Self {
        Self { start_node, total_time_budget }
    }
}


/// Mutable state of a run, only ever changed by the simulation itself
#[derive(Debug, Clone, PartialEq)]
pub struct SimulationState {
    current: NodeId,
    remaining_time: f64, // may drop below zero on the last step
    score: f64,
    visited: FxIndexSet<NodeId>,
    log: Vec<StepEvent>,
}

impl SimulationState {

    fn new(start: NodeId, budget: f64) -> Self {
        Self {
            current: start,
            remaining_time: budget,
            score: 0.0,
            visited: FxIndexSet::default(),
            log: Vec::new(),
        }
    }

    pub fn current(&self) -> NodeId {
        self.current
    }

    pub fn remaining_time(&self) -> f64 {
        self.remaining_time
    }

    pub fn score(&self) -> f64 {
        self.score
    }

    /// Served patients, in service order
    pub fn visited(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.visited.iter().copied()
    }

    pub fn is_visited(&self, patient: NodeId) -> bool {
        self.visited.contains(&patient)
    }

    /// Every event emitted so far
    pub fn log(&self) -> &[StepEvent] {
        &self.log
    }
}


pub struct Simulation<'g, S = Dijkstra, P = GreedyRatio> {
    graph: &'g Graph,
    solver: S,
    planner: DispatchPlanner<P>,
    patients: Vec<NodeId>,
    hospitals: Vec<NodeId>,
    state: SimulationState,
    status: SimulationStatus,
    pending: VecDeque<StepEvent>, // emitted but not yet pulled through the iterator
}

impl<'g> Simulation<'g> {

    /// Start a run with Dijkstra and the greedy ratio strategy
    pub fn new(graph: &'g Graph, config: &ScenarioConfig) -> Result<Self, DispatchError> {
        if !graph.contains(config.start_node) {
            return Err(DispatchError::InvalidSelection { node: config.start_node });
        }
        if !config.total_time_budget.is_finite() {
            return Err(DispatchError::InvalidBudget { budget: config.total_time_budget });
        }

        Ok(Self {
            graph,
            solver: Dijkstra,
            planner: DispatchPlanner::default(),
            patients: graph.patients(),
            hospitals: graph.hospitals(),
            state: SimulationState::new(config.start_node, config.total_time_budget),
            status: SimulationStatus::Running,
            pending: VecDeque::new(),
        })
    }
}

impl<'g, S: PathSolver, P: SelectionStrategy> Simulation<'g, S, P> {

    /// Swap the path solver
    pub fn with_solver<T: PathSolver>(self, solver: T) -> Simulation<'g, T, P> {
        Simulation {
            graph: self.graph,
            solver,
            planner: self.planner,
            patients: self.patients,
            hospitals: self.hospitals,
            state: self.state,
            status: self.status,
            pending: self.pending,
        }
    }

    /// Swap the selection strategy
    pub fn with_strategy<Q: SelectionStrategy>(self, strategy: Q) -> Simulation<'g, S, Q> {
        Simulation {
            graph: self.graph,
            solver: self.solver,
            planner: DispatchPlanner::new(strategy),
            patients: self.patients,
            hospitals: self.hospitals,
            state: self.state,
            status: self.status,
            pending: self.pending,
        }
    }

    pub fn state(&self) -> &SimulationState {
        &self.state
    }

    pub fn status(&self) -> SimulationStatus {
        self.status
    }

    pub fn is_running(&self) -> bool {
        self.status == SimulationStatus::Running
    }

    /// Patients not served yet, in graph order
    pub fn unvisited_patients(&self) -> Vec<NodeId> {
        self.patients.iter()
            .copied()
            .filter(|patient| !self.state.is_visited(*patient))
            .collect()
    }

    /// Run one dispatch step
    /// Returns None once the run has completed, the completion event is logged at that point
    pub fn step(&mut self) -> Option<DispatchStep> {
        if !self.is_running() {
            return None;
        }

        if let Some(reason) = self.stop_reason() {
            self.complete(reason);
            return None;
        }

        let unvisited = self.unvisited_patients();
        let Some(candidate) = self.planner.choose_next(
            self.graph,
            &self.solver,
            self.state.current,
            self.state.remaining_time,
            &unvisited,
            &self.hospitals,
        ) else {
            self.complete(CompletionReason::NoFeasibleCandidate);
            return None;
        };

        match self.apply(&candidate) {
            Ok(step) => Some(step),
            Err(error) => {
                warn!("Planner candidate for patient {} rejected: {error}", candidate.patient);
                self.complete(CompletionReason::NoFeasibleCandidate);
                None
            }
        }
    }

    /// Apply a dispatch decision, bypassing the planner
    /// The candidate is checked against the graph and the run state, not against the budget:
    /// an unaffordable step is applied and leaves a negative budget behind
    pub fn apply(&mut self, candidate: &Candidate) -> Result<DispatchStep, DispatchError> {
        if !self.is_running() {
            return Err(DispatchError::Completed);
        }
        self.validate(candidate)?;

        let graph = self.graph;
        let patient = candidate.patient;
        let hospital = candidate.hospital;
        let (priority_score, service_cost) = match graph.node(patient) {
            Some(node) => (node.priority_score, node.service_cost),
            None => return Err(DispatchError::InvalidSelection { node: patient }),
        };
        let (Some(to_patient), Some(to_hospital)) = (
            candidate.path_to_patient.segments(graph),
            candidate.path_to_hospital.segments(graph),
        ) else {
            return Err(DispatchError::DetachedPath { expected_start: self.state.current, expected_end: hospital });
        };
        let time_before = self.state.remaining_time;

        // travel to the patient
        self.emit_segments(&to_patient);
        self.state.remaining_time -= candidate.path_to_patient.cost();

        // treat
        self.state.remaining_time -= service_cost;
        self.state.score += priority_score;
        self.state.visited.insert(patient);
        self.emit(StepEvent::PatientServed {
            id: patient,
            score_gained: priority_score,
            remaining_time: self.state.remaining_time,
        });

        // drop off
        self.emit_segments(&to_hospital);
        self.state.remaining_time -= candidate.path_to_hospital.cost();
        self.state.current = hospital;
        self.emit(StepEvent::HospitalReached { id: hospital });

        debug!(
            "Served patient {patient} (+{priority_score}), now at hospital {hospital} with {:.1} left",
            self.state.remaining_time
        );

        Ok(DispatchStep {
            patient,
            hospital,
            to_patient,
            to_hospital,
            score_gained: priority_score,
            time_spent: time_before - self.state.remaining_time,
            remaining_time: self.state.remaining_time,
            total_score: self.state.score,
        })
    }

    /// Drive the run to completion
    pub fn run(mut self) -> SimulationReport {
        while self.is_running() {
            self.step();
        }
        self.report()
    }

    /// Outcome so far, the reason is only final once the run has completed
    pub fn report(&self) -> SimulationReport {
        let reason = match self.status {
            SimulationStatus::Completed(reason) => reason,
            SimulationStatus::Running => self.stop_reason().unwrap_or(CompletionReason::NoFeasibleCandidate),
        };
        SimulationReport {
            reason,
            final_score: self.state.score,
            remaining_time: self.state.remaining_time,
            final_location: self.state.current,
            served: self.state.visited().collect(),
            log: self.state.log.clone(),
        }
    }

    fn validate(&self, candidate: &Candidate) -> Result<(), DispatchError> {
        let patient = candidate.patient;
        let hospital = candidate.hospital;

        match self.graph.node(patient) {
            None => return Err(DispatchError::InvalidSelection { node: patient }),
            Some(node) if !node.is_patient() => return Err(DispatchError::NotAPatient { node: patient }),
            Some(_) => {}
        }
        if self.state.is_visited(patient) {
            return Err(DispatchError::AlreadyVisited { node: patient });
        }
        match self.graph.node(hospital) {
            None => return Err(DispatchError::InvalidSelection { node: hospital }),
            Some(node) if !node.is_hospital() => return Err(DispatchError::NotAHospital { node: hospital }),
            Some(_) => {}
        }

        self.validate_path(&candidate.path_to_patient, self.state.current, patient)?;
        self.validate_path(&candidate.path_to_hospital, patient, hospital)
    }

    /// The path must join the two nodes over edges of this graph at this graph's cost
    fn validate_path(&self, path: &Path, start: NodeId, end: NodeId) -> Result<(), DispatchError> {
        let detached = DispatchError::DetachedPath { expected_start: start, expected_end: end };
        if path.start() != start || path.end() != end {
            return Err(detached);
        }
        match Path::from_nodes(self.graph, path.nodes().to_vec()) {
            Some(rebuilt) if rebuilt == *path => Ok(()),
            _ => Err(detached),
        }
    }

    fn stop_reason(&self) -> Option<CompletionReason> {
        if self.patients.iter().all(|patient| self.state.is_visited(*patient)) {
            Some(CompletionReason::AllPatientsServed)
        } else if self.state.remaining_time <= 0.0 {
            Some(CompletionReason::BudgetExhausted)
        } else {
            None
        }
    }

    fn complete(&mut self, reason: CompletionReason) {
        self.status = SimulationStatus::Completed(reason);
        info!(
            "Simulation completed ({reason}): score {}, {:.1} time left",
            self.state.score, self.state.remaining_time
        );
        self.emit(StepEvent::SimulationCompleted {
            reason,
            final_score: self.state.score,
            remaining_time: self.state.remaining_time,
        });
    }

    fn emit_segments(&mut self, segments: &[PathSegment]) {
        let mut remaining_time = self.state.remaining_time;
        for segment in segments {
            remaining_time -= segment.weight;
            self.emit(StepEvent::Segment { segment: *segment, remaining_time });
        }
    }

    fn emit(&mut self, event: StepEvent) {
        self.state.log.push(event.clone());
        self.pending.push_back(event);
    }
}


/// Pull-based event stream, each pull runs a dispatch step only when needed
/// The stream ends right after `SimulationCompleted`
impl<S: PathSolver, P: SelectionStrategy> Iterator for Simulation<'_, S, P> {
    type Item = StepEvent;

    fn next(&mut self) -> Option<StepEvent> {
        loop {
            if let Some(event) = self.pending.pop_front() {
                return Some(event);
            }
            if !self.is_running() {
                return None;
            }
            self.step();
        }
    }
}
