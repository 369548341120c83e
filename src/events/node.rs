use crate::flow::{branch::BranchId, edge::EdgeId, node::NodeKind};

#[derive(Debug, Clone, PartialEq)]
pub enum NodeEvent {
    Added(NodeKind),
    Removed { removed_edges: Vec<EdgeId> },
    DataUpdated { removed_edges: Vec<EdgeId> },
    Activated(bool),
    BranchAdded(BranchId),
    BranchDeleted { branch_id: BranchId, removed_edges: Vec<EdgeId> },
}

impl NodeEvent {
    pub fn str(&self) -> &str {
        match self {
            NodeEvent::Added(_) => "Added",
            NodeEvent::Removed { .. } => "Removed",
            NodeEvent::DataUpdated { .. } => "DataUpdated",
            NodeEvent::Activated(_) => "Activated",
            NodeEvent::BranchAdded(_) => "BranchAdded",
            NodeEvent::BranchDeleted { .. } => "BranchDeleted",
        }
    }
}
