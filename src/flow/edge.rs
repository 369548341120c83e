//! Flow edge definitions for connecting nodes.
//!
//! Edges leaving a decision node carry the id of the branch they start from
//! as `source_handle`, and the branch condition as their label.

use serde::{Deserialize, Serialize};

use crate::{
    FlowError, Result,
    flow::{branch::BranchId, consts::EDGE_ID_PREFIX, node::NodeId},
    model::{EdgeLabelData, EdgeModel},
};

/// Unique identifier for an edge within a flow.
pub type EdgeId = String;

/// Handle identifier on a node; for decision nodes, a branch id.
pub type HandleId = String;

/// Edge renderer key, as registered with the graph engine.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, Default, PartialEq, Eq, strum::AsRefStr, strum::EnumString)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum EdgeKind {
    /// The engine's built-in edge.
    #[default]
    Default,
    /// Edge drawn with a text label at its midpoint.
    Labeled,
}

/// A proposed connection, as produced by a finished connection drag.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Connection {
    pub source: NodeId,
    #[serde(default)]
    pub source_handle: Option<HandleId>,
    pub target: NodeId,
    #[serde(default)]
    pub target_handle: Option<HandleId>,
}

impl Connection {
    pub fn new(
        source: impl Into<NodeId>,
        target: impl Into<NodeId>,
    ) -> Self {
        Self {
            source: source.into(),
            source_handle: None,
            target: target.into(),
            target_handle: None,
        }
    }

    /// Start the connection from the handle of the given branch.
    pub fn from_branch(
        mut self,
        branch_id: impl Into<BranchId>,
    ) -> Self {
        self.source_handle = Some(branch_id.into());
        self
    }

    pub fn to_handle(
        mut self,
        handle: impl Into<HandleId>,
    ) -> Self {
        self.target_handle = Some(handle.into());
        self
    }

    /// Edge id the graph engine assigns to this connection.
    pub fn edge_id(&self) -> EdgeId {
        format!(
            "{}{}{}-{}{}",
            EDGE_ID_PREFIX,
            self.source,
            self.source_handle.as_deref().unwrap_or_default(),
            self.target,
            self.target_handle.as_deref().unwrap_or_default()
        )
    }
}

/// Directed connection between two node handles.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Edge {
    /// Unique edge identifier.
    pub id: EdgeId,
    /// ID of the source node.
    pub source: NodeId,
    /// Which output handle this edge connects from.
    pub source_handle: Option<HandleId>,
    /// ID of the target node.
    pub target: NodeId,
    /// Which input handle this edge connects to.
    pub target_handle: Option<HandleId>,
    /// Renderer used for this edge.
    pub kind: EdgeKind,
    /// Text shown on labeled edges.
    pub label: Option<String>,
}

impl Edge {
    /// Plain, unlabeled edge for a connection.
    pub fn plain(connection: &Connection) -> Self {
        Self {
            id: connection.edge_id(),
            source: connection.source.clone(),
            source_handle: connection.source_handle.clone(),
            target: connection.target.clone(),
            target_handle: connection.target_handle.clone(),
            kind: EdgeKind::Default,
            label: None,
        }
    }

    /// Labeled edge for a connection.
    pub fn labeled(
        connection: &Connection,
        label: impl Into<String>,
    ) -> Self {
        Self {
            kind: EdgeKind::Labeled,
            label: Some(label.into()),
            ..Self::plain(connection)
        }
    }

    /// Whether this edge starts at the given handle of the given node.
    pub fn leaves(
        &self,
        node_id: &str,
        handle: &str,
    ) -> bool {
        self.source == node_id && self.source_handle.as_deref() == Some(handle)
    }

    /// Whether this edge starts or ends at the given node.
    pub fn touches(
        &self,
        node_id: &str,
    ) -> bool {
        self.source == node_id || self.target == node_id
    }

    /// Whether this edge joins the same handles as the connection.
    pub fn same_route(
        &self,
        connection: &Connection,
    ) -> bool {
        self.source == connection.source
            && self.target == connection.target
            && self.source_handle == connection.source_handle
            && self.target_handle == connection.target_handle
    }
}

impl TryFrom<&EdgeModel> for Edge {
    type Error = FlowError;

    fn try_from(model: &EdgeModel) -> Result<Self> {
        let kind = match model.kind.as_deref() {
            None | Some("") | Some("default") => EdgeKind::Default,
            Some(kind) => kind.parse::<EdgeKind>().map_err(|_| FlowError::Edge(format!("invalid edge type '{}' for edge {}", kind, model.id)))?,
        };

        Ok(Self {
            id: model.id.clone(),
            source: model.source.clone(),
            source_handle: model.source_handle.clone(),
            target: model.target.clone(),
            target_handle: model.target_handle.clone(),
            kind,
            label: model.data.as_ref().and_then(|d| d.label.clone()),
        })
    }
}

impl From<&Edge> for EdgeModel {
    fn from(edge: &Edge) -> Self {
        Self {
            id: edge.id.clone(),
            source: edge.source.clone(),
            source_handle: edge.source_handle.clone(),
            target: edge.target.clone(),
            target_handle: edge.target_handle.clone(),
            kind: match edge.kind {
                EdgeKind::Default => None,
                EdgeKind::Labeled => Some(edge.kind.as_ref().to_string()),
            },
            data: edge.label.clone().map(|label| EdgeLabelData { label: Some(label) }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_edge_id_follows_engine_convention() {
        let conn = Connection::new("d1", "ai1").from_branch("branch-x-1");
        assert_eq!(conn.edge_id(), "xy-edge__d1branch-x-1-ai1");

        let conn = Connection::new("r1", "ai1");
        assert_eq!(conn.edge_id(), "xy-edge__r1-ai1");
    }

    #[test]
    fn test_labeled_edge() {
        let conn = Connection::new("d1", "ai1").from_branch("b1");
        let edge = Edge::labeled(&conn, "yes");
        assert_eq!(edge.kind, EdgeKind::Labeled);
        assert_eq!(edge.label.as_deref(), Some("yes"));
        assert!(edge.leaves("d1", "b1"));
        assert!(!edge.leaves("d1", "b2"));
        assert!(edge.same_route(&conn));
    }

    #[test]
    fn test_edge_from_model() {
        let model: EdgeModel = serde_json::from_value(serde_json::json!({
            "id": "e1",
            "source": "d1",
            "sourceHandle": "b1",
            "target": "ai1",
            "type": "labeled",
            "data": { "label": "yes" }
        }))
        .unwrap();
        let edge = Edge::try_from(&model).unwrap();
        assert_eq!(edge.kind, EdgeKind::Labeled);
        assert_eq!(edge.label.as_deref(), Some("yes"));
        assert_eq!(edge.target_handle, None);

        let back = EdgeModel::from(&edge);
        assert_eq!(back.kind.as_deref(), Some("labeled"));
    }

    #[test]
    fn test_edge_from_model_unknown_type() {
        let model = EdgeModel {
            id: "e1".to_string(),
            source: "a".to_string(),
            target: "b".to_string(),
            kind: Some("animated".to_string()),
            ..Default::default()
        };
        assert!(matches!(Edge::try_from(&model), Err(FlowError::Edge(_))));
    }
}
