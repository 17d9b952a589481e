//! `ReverseConnectionIndex` (spec §3): derived, never stored, rebuilt on
//! every mutation. Required for AI-topology checks (spec §4.6 step 5).

use crate::workflow::Workflow;
use std::collections::HashMap;

/// One incoming edge into a consumer node.
#[derive(Debug, Clone, PartialEq)]
pub struct ReverseEdge {
    pub source_name: String,
    pub source_type: String,
    pub index: u32,
}

/// `mapping from consumer-node-name -> list of {sourceName, sourceType, index}`.
#[derive(Debug, Clone, Default)]
pub struct ReverseConnectionIndex {
    incoming: HashMap<String, Vec<ReverseEdge>>,
}

impl ReverseConnectionIndex {
    pub fn build(workflow: &Workflow) -> Self {
        let mut incoming: HashMap<String, Vec<ReverseEdge>> = HashMap::new();
        for (source_name, group) in workflow.connections.iter() {
            for (conn_type, index, target) in group.all_targets() {
                incoming
                    .entry(target.node.clone())
                    .or_default()
                    .push(ReverseEdge {
                        source_name: source_name.to_string(),
                        source_type: conn_type.to_string(),
                        index,
                    });
            }
        }
        Self { incoming }
    }

    pub fn incoming(&self, consumer: &str) -> &[ReverseEdge] {
        self.incoming.get(consumer).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn incoming_of_type<'a>(&'a self, consumer: &str, conn_type: &str) -> impl Iterator<Item = &'a ReverseEdge> {
        self.incoming(consumer)
            .iter()
            .filter(move |e| e.source_type == conn_type)
    }

    pub fn count_of_type(&self, consumer: &str, conn_type: &str) -> usize {
        self.incoming_of_type(consumer, conn_type).count()
    }
}
