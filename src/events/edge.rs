use crate::flow::edge::EdgeId;

#[derive(Debug, Clone, PartialEq)]
pub enum EdgeEvent {
    Connected { edge_id: EdgeId, labeled: bool },
    Removed(EdgeId),
}

impl EdgeEvent {
    pub fn str(&self) -> &str {
        match self {
            EdgeEvent::Connected { .. } => "Connected",
            EdgeEvent::Removed(_) => "Removed",
        }
    }
}
