use crate::graph::{NodeId, PathSegment};
use std::fmt;


/// Why a run stopped
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CompletionReason {
    BudgetExhausted,
    AllPatientsServed,
    NoFeasibleCandidate,
}

impl fmt::Display for CompletionReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            CompletionReason::BudgetExhausted => "time budget exhausted",
            CompletionReason::AllPatientsServed => "all patients served",
            CompletionReason::NoFeasibleCandidate => "no patient can be served in the remaining time",
        })
    }
}


#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SimulationStatus {
    Running,
    Completed(CompletionReason),
}


/// Everything an observer needs to replay a run, in order
/// `remaining_time` is the budget left once the event has happened
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "event", rename_all = "snake_case"))]
pub enum StepEvent {
    Segment { segment: PathSegment, remaining_time: f64 },
    PatientServed { id: NodeId, score_gained: f64, remaining_time: f64 },
    HospitalReached { id: NodeId },
    SimulationCompleted { reason: CompletionReason, final_score: f64, remaining_time: f64 },
}


/// One applied dispatch decision
#[derive(Debug, Clone, PartialEq)]
pub struct DispatchStep {
    pub patient: NodeId,
    pub hospital: NodeId,
    pub to_patient: Vec<PathSegment>,
    pub to_hospital: Vec<PathSegment>,
    pub score_gained: f64,
    pub time_spent: f64,
    pub remaining_time: f64, // after the drop-off
    pub total_score: f64,
}


/// Final outcome of a run
#[derive(Debug, Clone, PartialEq)]
pub struct SimulationReport {
    pub reason: CompletionReason,
    pub final_score: f64,
    pub remaining_time: f64,
    pub final_location: NodeId,
    pub served: Vec<NodeId>, // in service order
    pub log: Vec<StepEvent>,
}
