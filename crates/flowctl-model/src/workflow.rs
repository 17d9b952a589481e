//! The in-memory workflow document (spec §3).

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// A single connection endpoint: which node, which connection-type slot,
/// and which input index on that node.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConnectionTarget {
    pub node: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub index: u32,
}

/// `mapping from ConnectionType -> ordered list of output-slots`, each
/// slot an ordered list of targets. Represented as an insertion-ordered
/// `Vec` of pairs rather than a `HashMap` so serialization round-trips
/// key order (spec §3: "order is semantically meaningful for display").
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ConnectionGroup {
    pub by_type: Vec<(String, Vec<Vec<ConnectionTarget>>)>,
}

impl ConnectionGroup {
    pub fn slots(&self, connection_type: &str) -> Option<&[Vec<ConnectionTarget>]> {
        self.by_type
            .iter()
            .find(|(t, _)| t == connection_type)
            .map(|(_, slots)| slots.as_slice())
    }

    pub fn slots_mut(&mut self, connection_type: &str) -> &mut Vec<Vec<ConnectionTarget>> {
        if let Some(pos) = self.by_type.iter().position(|(t, _)| t == connection_type) {
            &mut self.by_type[pos].1
        } else {
            self.by_type.push((connection_type.to_string(), Vec::new()));
            &mut self.by_type.last_mut().unwrap().1
        }
    }

    pub fn is_empty(&self) -> bool {
        self.by_type.iter().all(|(_, slots)| slots.iter().all(|s| s.is_empty()))
    }

    pub fn connection_types(&self) -> impl Iterator<Item = &str> {
        self.by_type.iter().map(|(t, _)| t.as_str())
    }

    pub fn all_targets(&self) -> impl Iterator<Item = (&str, u32, &ConnectionTarget)> {
        self.by_type.iter().flat_map(|(ty, slots)| {
            slots
                .iter()
                .enumerate()
                .flat_map(move |(idx, targets)| targets.iter().map(move |t| (ty.as_str(), idx as u32, t)))
        })
    }
}

impl Serialize for ConnectionGroup {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        use serde::ser::SerializeMap;
        let mut map = serializer.serialize_map(Some(self.by_type.len()))?;
        for (k, v) in &self.by_type {
            map.serialize_entry(k, v)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for ConnectionGroup {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let map: BTreeMap<String, Vec<Vec<ConnectionTarget>>> = BTreeMap::deserialize(deserializer)?;
        Ok(ConnectionGroup {
            by_type: map.into_iter().collect(),
        })
    }
}

/// `mapping from source-node-name to ConnectionGroup` (spec §3). Backed
/// by an insertion-ordered `Vec` rather than a `HashMap`, serialized as a
/// JSON object to match the wire format the control plane expects.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ConnectionsMap {
    pub entries: Vec<(String, ConnectionGroup)>,
}

impl ConnectionsMap {
    pub fn get(&self, source: &str) -> Option<&ConnectionGroup> {
        self.entries.iter().find(|(n, _)| n == source).map(|(_, g)| g)
    }

    pub fn get_mut(&mut self, source: &str) -> &mut ConnectionGroup {
        if let Some(pos) = self.entries.iter().position(|(n, _)| n == source) {
            &mut self.entries[pos].1
        } else {
            self.entries.push((source.to_string(), ConnectionGroup::default()));
            &mut self.entries.last_mut().unwrap().1
        }
    }

    pub fn remove(&mut self, source: &str) {
        self.entries.retain(|(n, _)| n != source);
    }

    pub fn sources(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(n, _)| n.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &ConnectionGroup)> {
        self.entries.iter().map(|(n, g)| (n.as_str(), g))
    }
}

impl Serialize for ConnectionsMap {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        use serde::ser::SerializeMap;
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (k, v) in &self.entries {
            map.serialize_entry(k, v)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for ConnectionsMap {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let map: BTreeMap<String, ConnectionGroup> = BTreeMap::deserialize(deserializer)?;
        Ok(ConnectionsMap {
            entries: map.into_iter().collect(),
        })
    }
}

/// (x, y) canvas position; purely cosmetic but must round-trip.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Position(pub f64, pub f64);

/// A node's numeric schema generation tag (spec §3 "typeVersion").
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
pub struct TypeVersion(pub f64);

impl TypeVersion {
    pub fn major(self) -> u32 {
        self.0.trunc() as u32
    }
}

impl std::fmt::Display for TypeVersion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A node in the workflow graph (spec §3).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Node {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub node_type: String,
    #[serde(rename = "typeVersion")]
    pub type_version: TypeVersion,
    pub position: Position,
    #[serde(default)]
    pub parameters: Value,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub credentials: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub disabled: Option<bool>,
    #[serde(default, rename = "webhookId", skip_serializing_if = "Option::is_none")]
    pub webhook_id: Option<String>,
}

impl Node {
    pub fn is_disabled(&self) -> bool {
        self.disabled.unwrap_or(false)
    }
}

/// The root workflow document (spec §3).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Workflow {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub nodes: Vec<Node>,
    #[serde(default)]
    pub connections: ConnectionsMap,
    #[serde(default)]
    pub settings: serde_json::Map<String, Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub active: Option<bool>,
    #[serde(default)]
    pub tags: Vec<String>,
}

impl Workflow {
    pub fn is_active(&self) -> bool {
        self.active.unwrap_or(false)
    }

    pub fn node_by_name(&self, name: &str) -> Option<&Node> {
        self.nodes.iter().find(|n| n.name == name)
    }

    pub fn node_by_name_mut(&mut self, name: &str) -> Option<&mut Node> {
        self.nodes.iter_mut().find(|n| n.name == name)
    }

    pub fn node_index(&self, name: &str) -> Option<usize> {
        self.nodes.iter().position(|n| n.name == name)
    }

    pub fn connections_for(&self, source: &str) -> Option<&ConnectionGroup> {
        self.connections.get(source)
    }

    pub fn connections_for_mut(&mut self, source: &str) -> &mut ConnectionGroup {
        self.connections.get_mut(source)
    }

    pub fn remove_connections_for(&mut self, source: &str) {
        self.connections.remove(source);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_workflow() -> Workflow {
        Workflow {
            name: "demo".into(),
            nodes: vec![Node {
                id: "1".into(),
                name: "Start".into(),
                node_type: "nodes-base.manualTrigger".into(),
                type_version: TypeVersion(1.0),
                position: Position(0.0, 0.0),
                parameters: Value::Object(Default::default()),
                credentials: None,
                disabled: None,
                webhook_id: None,
            }],
            connections: ConnectionsMap::default(),
            settings: Default::default(),
            active: None,
            tags: Vec::new(),
        }
    }

    #[test]
    fn connection_group_round_trips_through_json() {
        let mut group = ConnectionGroup::default();
        group.slots_mut("main").push(vec![ConnectionTarget {
            node: "B".into(),
            kind: "main".into(),
            index: 0,
        }]);
        let json = serde_json::to_string(&group).unwrap();
        let back: ConnectionGroup = serde_json::from_str(&json).unwrap();
        assert_eq!(group, back);
    }

    #[test]
    fn workflow_round_trips_through_json() {
        let workflow = sample_workflow();
        let json = serde_json::to_string(&workflow).unwrap();
        let back: Workflow = serde_json::from_str(&json).unwrap();
        assert_eq!(workflow, back);
    }

    #[test]
    fn node_index_and_lookup() {
        let workflow = sample_workflow();
        assert_eq!(workflow.node_index("Start"), Some(0));
        assert!(workflow.node_by_name("Missing").is_none());
    }

    #[test]
    fn connections_for_mut_creates_then_reuses_entry() {
        let mut workflow = sample_workflow();
        workflow.connections_for_mut("Start").slots_mut("main").push(Vec::new());
        assert_eq!(workflow.connections.entries.len(), 1);
        workflow.connections_for_mut("Start").slots_mut("main").push(Vec::new());
        assert_eq!(workflow.connections.entries.len(), 1);
        assert_eq!(workflow.connections_for("Start").unwrap().slots("main").unwrap().len(), 2);
    }
}
