use crate::graph::NodeId;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PathPlannerError {
    #[error("no path found")]
    NoPathFound, // Unable to find a path to the goal
    #[error("node {node} is not part of the graph")]
    InvalidSelection { node: NodeId }, // Caller asked for an id the graph never had
}

/// Structural anomaly found while building a graph
/// These never abort a build: the offending record is left inert and the issue is kept on the graph
#[derive(Debug, Clone, PartialEq, Error)]
pub enum GraphStructureError {
    #[error("edge #{edge_index} ({from} - {to}) references unknown node {missing}")]
    UnknownEndpoint { edge_index: usize, from: NodeId, to: NodeId, missing: NodeId },
    #[error("edge #{edge_index} ({from} - {to}) has unusable weight {weight}")]
    InvalidWeight { edge_index: usize, from: NodeId, to: NodeId, weight: f64 },
    #[error("node {id} has unusable {field} {value}")]
    InvalidAttribute { id: NodeId, field: &'static str, value: f64 },
    #[error("node {id} defined more than once, last definition kept")]
    DuplicateNode { id: NodeId },
}

/// Misuse of the simulation driver
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DispatchError {
    #[error("node {node} is not part of the graph")]
    InvalidSelection { node: NodeId },
    #[error("node {node} is not a patient")]
    NotAPatient { node: NodeId },
    #[error("node {node} is not a hospital")]
    NotAHospital { node: NodeId },
    #[error("patient {node} has already been served")]
    AlreadyVisited { node: NodeId },
    #[error("path does not run from {expected_start} to {expected_end}")]
    DetachedPath { expected_start: NodeId, expected_end: NodeId },
    #[error("time budget {budget} is not a finite number")]
    InvalidBudget { budget: f64 },
    #[error("simulation already completed")]
    Completed,
}

