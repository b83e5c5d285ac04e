//! Emergency-response routing on a weighted graph of patients, hospitals and
//! waypoints.
//!
//! - [`graph`] holds the static network built from ingestion records
//! - [`solver`] answers point-to-point shortest path queries
//! - [`dispatch`] greedily picks the next patient to serve
//! - [`simulation`] runs the ambulance against a time budget and emits events
//!
//! ```
//! use ambuseek::graph::{Edge, Graph, Node};
//! use ambuseek::simulation::{CompletionReason, ScenarioConfig, Simulation};
//!
//! let graph = Graph::build(
//!     vec![Node::waypoint(1), Node::patient(2, 10.0, 2.0), Node::hospital(3)],
//!     vec![Edge::new(1, 2, 3.0), Edge::new(2, 3, 4.0)],
//! );
//! let report = Simulation::new(&graph, &ScenarioConfig::new(1, 20.0))?.run();
//!
//! assert_eq!(report.served, vec![2]);
//! assert_eq!(report.remaining_time, 11.0);
//! assert_eq!(report.reason, CompletionReason::AllPatientsServed);
//! # Ok::<(), ambuseek::errors::DispatchError>(())
//! ```

pub mod collections;
pub mod dispatch;
pub mod errors;
pub mod graph;
pub mod graph_algos;
pub mod query;
pub mod simulation;
pub mod solver;

pub use dispatch::{Candidate, DispatchPlanner, GreedyRatio, SelectionStrategy};
pub use errors::{DispatchError, GraphStructureError, PathPlannerError};
pub use graph::{Edge, Graph, Node, NodeId, NodeKind, Path, PathSegment};
pub use query::find_path;
pub use simulation::{CompletionReason, ScenarioConfig, Simulation, SimulationReport, StepEvent};
pub use solver::{shortest_path, AStar, Dijkstra, PathSolver};
