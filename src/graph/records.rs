//! Typed node and edge records handed over by the ingestion layer.

use std::fmt;

/// Stable node identity, as found in the input data
pub type NodeId = u32;


/// Role of a location in the network
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(from = "String", into = "String"))]
pub enum NodeKind {
    Patient,
    Hospital,
    Waypoint,
}

impl NodeKind {

    /// Map an ingestion label onto a kind, case-insensitively
    /// Accepts the Portuguese labels used by the reference datasets ("paciente", "hospital")
    /// Anything unrecognised is treated as a waypoint
    pub fn from_label(label: &str) -> Self {
        match label.trim().to_lowercase().as_str() {
            "patient" | "paciente" => NodeKind::Patient,
            "hospital" => NodeKind::Hospital,
            _ => NodeKind::Waypoint,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            NodeKind::Patient => "patient",
            NodeKind::Hospital => "hospital",
            NodeKind::Waypoint => "waypoint",
        }
    }
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<String> for NodeKind {
    fn from(label: String) -> Self {
        NodeKind::from_label(&label)
    }
}

impl From<NodeKind> for String {
    fn from(kind: NodeKind) -> Self {
        kind.as_str().to_string()
    }
}


/// A location in the network
/// `priority_score` and `service_cost` only mean something for patients
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Node {
    pub id: NodeId,
    pub kind: NodeKind,
    #[cfg_attr(feature = "serde", serde(default))]
    pub label: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub priority_score: f64,
    #[cfg_attr(feature = "serde", serde(default))]
    pub service_cost: f64, // time spent treating the patient on site
}

impl Node {

    pub fn patient(id: NodeId, priority_score: f64, service_cost: f64) -> Self {
        Self {
            id,
            kind: NodeKind::Patient,
            label: format!("patient {id}"),
            priority_score,
            service_cost,
        }
    }

    pub fn hospital(id: NodeId) -> Self {
        Self {
            id,
            kind: NodeKind::Hospital,
            label: format!("hospital {id}"),
            priority_score: 0.0,
            service_cost: 0.0,
        }
    }

    pub fn waypoint(id: NodeId) -> Self {
        Self {
            id,
            kind: NodeKind::Waypoint,
            label: format!("waypoint {id}"),
            priority_score: 0.0,
            service_cost: 0.0,
        }
    }

    /// Replace the display label
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    pub fn is_patient(&self) -> bool {
        self.kind == NodeKind::Patient
    }

    pub fn is_hospital(&self) -> bool {
        self.kind == NodeKind::Hospital
    }
}


/// Bidirectional transit link, `weight` is the travel time in either direction
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Edge {
    pub from: NodeId,
    pub to: NodeId,
    pub weight: f64,
}

impl Edge {
    pub fn new(from: NodeId, to: NodeId, weight: f64) -> Self {
        Self { from, to, weight }
    }
}


#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("paciente", NodeKind::Patient)]
    #[case("Paciente", NodeKind::Patient)]
    #[case("patient", NodeKind::Patient)]
    #[case("HOSPITAL", NodeKind::Hospital)]
    #[case(" hospital ", NodeKind::Hospital)]
    #[case("cruzamento", NodeKind::Waypoint)]
    #[case("", NodeKind::Waypoint)]
    fn test_kind_from_label(#[case] label: &str, #[case] expected: NodeKind) {
        assert_eq!(NodeKind::from_label(label), expected);
    }

    #[test]
    fn test_constructors() {
        let patient = Node::patient(2, 10.0, 2.0).with_label("Maria");
        assert!(patient.is_patient());
        assert_eq!(patient.label, "Maria");
        assert_eq!(patient.priority_score, 10.0);

        let hospital = Node::hospital(3);
        assert!(hospital.is_hospital());
        assert_eq!(hospital.service_cost, 0.0);
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_records_from_json() {
        let nodes: Vec<Node> = serde_json::from_str(r#"[
            {"id": 1, "kind": "Paciente", "label": "Ana", "priority_score": 5, "service_cost": 1.5},
            {"id": 2, "kind": "hospital"},
            {"id": 3, "kind": "rua"}
        ]"#).unwrap();

        assert_eq!(nodes[0].kind, NodeKind::Patient);
        assert_eq!(nodes[0].service_cost, 1.5);
        assert_eq!(nodes[1].kind, NodeKind::Hospital);
        assert_eq!(nodes[1].priority_score, 0.0);
        assert_eq!(nodes[2].kind, NodeKind::Waypoint);
        assert_eq!(nodes[2].label, "");

        let edge: Edge = serde_json::from_str(r#"{"from": 1, "to": 2, "weight": 7}"#).unwrap();
        assert_eq!(edge, Edge::new(1, 2, 7.0));

        let json = serde_json::to_string(&nodes[1].kind).unwrap();
        assert_eq!(json, "\"hospital\"");
    }
}
