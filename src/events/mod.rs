//! Event types for flow mutations.
//!
//! Every successful command on a [`Flow`](crate::flow::Flow) records an
//! event, so the host can re-render exactly what changed.

mod edge;
mod node;

pub use edge::*;
pub use node::*;

use crate::flow::node::NodeId;

/// Top-level event type for flow graph events.
#[derive(Debug, Clone, PartialEq)]
pub enum FlowEvent {
    /// Node-level events (added, removed, branches changed, etc.).
    Node(NodeEvent),
    /// Edge-level events (connected, removed).
    Edge(EdgeEvent),
}

/// Event message containing the node it concerns.
#[derive(Debug, Clone, PartialEq)]
pub struct Message {
    /// Node ID the event concerns; for edge events, the source node.
    pub nid: NodeId,
    /// The actual event data.
    pub event: FlowEvent,
    /// Timestamp in milliseconds of the event.
    pub timestamp: i64,
}

impl Message {
    pub fn new(
        nid: impl Into<NodeId>,
        event: FlowEvent,
    ) -> Self {
        Self {
            nid: nid.into(),
            event,
            timestamp: crate::utils::time::time_millis(),
        }
    }
}

impl FlowEvent {
    pub fn str(&self) -> &str {
        match self {
            FlowEvent::Node(e) => e.str(),
            FlowEvent::Edge(e) => e.str(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_names() {
        let added = FlowEvent::Node(NodeEvent::BranchAdded("b1".to_string()));
        let connected = FlowEvent::Edge(EdgeEvent::Connected {
            edge_id: "e1".to_string(),
            labeled: true,
        });
        assert_eq!(added.str(), "BranchAdded");
        assert_eq!(connected.str(), "Connected");

        let msg = Message::new("d1", added);
        assert_eq!(msg.nid, "d1");
        assert!(msg.timestamp > 0);
    }
}
