use serde::{Deserialize, Serialize};

use crate::{
    FlowError, Result,
    flow::{assistant::AssistantProfile, branch::Branch},
    model::NodeModel,
};

/// node id
pub type NodeId = String;

/// Node renderer key, as registered with the graph engine.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash, strum::AsRefStr, strum::EnumString)]
pub enum NodeKind {
    #[serde(rename = "requestNode")]
    #[strum(serialize = "requestNode")]
    RequestNode,
    #[serde(rename = "myAINode")]
    #[strum(serialize = "myAINode")]
    MyAiNode,
    #[serde(rename = "decisionNode")]
    #[strum(serialize = "decisionNode")]
    DecisionNode,
}

impl NodeKind {
    /// Prefix of ids generated for nodes of this kind.
    pub fn id_prefix(&self) -> &'static str {
        match self {
            NodeKind::RequestNode => "request",
            NodeKind::MyAiNode => "myai",
            NodeKind::DecisionNode => "decision",
        }
    }

    /// Whether nodes of this kind render a target handle.
    pub fn accepts_incoming(&self) -> bool {
        !matches!(self, NodeKind::RequestNode)
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, Default, PartialEq)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

impl Position {
    pub fn new(
        x: f64,
        y: f64,
    ) -> Self {
        Self { x, y }
    }
}

/// Payload of a request node: the question a user asks the flow.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RequestNodeData {
    #[serde(default)]
    pub text_input: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub placeholder: Option<String>,
}

/// Payload of an assistant node.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AssistantNodeData {
    #[serde(rename = "myAI")]
    pub my_ai: AssistantProfile,
    #[serde(default = "default_active")]
    pub is_active: bool,
}

/// Payload of a decision node. Branch order is display and handle order.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DecisionNodeData {
    #[serde(default = "default_active")]
    pub is_active: bool,
    #[serde(default)]
    pub branches: Vec<Branch>,
}

impl Default for DecisionNodeData {
    fn default() -> Self {
        Self {
            is_active: true,
            branches: Vec::new(),
        }
    }
}

impl DecisionNodeData {
    pub fn branch(
        &self,
        id: &str,
    ) -> Option<&Branch> {
        self.branches.iter().find(|b| b.id == id)
    }
}

fn default_active() -> bool {
    true
}

/// Typed node payload, one variant per node kind.
#[derive(Debug, Clone, PartialEq)]
pub enum NodeData {
    Request(RequestNodeData),
    Assistant(AssistantNodeData),
    Decision(DecisionNodeData),
}

impl NodeData {
    pub fn kind(&self) -> NodeKind {
        match self {
            NodeData::Request(_) => NodeKind::RequestNode,
            NodeData::Assistant(_) => NodeKind::MyAiNode,
            NodeData::Decision(_) => NodeKind::DecisionNode,
        }
    }

    /// Decode a payload for the given kind.
    pub fn from_value(
        kind: NodeKind,
        value: serde_json::Value,
    ) -> Result<Self> {
        let value = if value.is_null() { serde_json::Value::Object(Default::default()) } else { value };
        let data = match kind {
            NodeKind::RequestNode => NodeData::Request(serde_json::from_value(value)?),
            NodeKind::MyAiNode => NodeData::Assistant(serde_json::from_value(value)?),
            NodeKind::DecisionNode => NodeData::Decision(serde_json::from_value(value)?),
        };
        Ok(data)
    }

    pub fn to_value(&self) -> Result<serde_json::Value> {
        let value = match self {
            NodeData::Request(d) => serde_json::to_value(d)?,
            NodeData::Assistant(d) => serde_json::to_value(d)?,
            NodeData::Decision(d) => serde_json::to_value(d)?,
        };
        Ok(value)
    }

    /// Active flag of toggleable nodes, `None` for request nodes.
    pub fn is_active(&self) -> Option<bool> {
        match self {
            NodeData::Request(_) => None,
            NodeData::Assistant(d) => Some(d.is_active),
            NodeData::Decision(d) => Some(d.is_active),
        }
    }

    pub fn as_decision(&self) -> Option<&DecisionNodeData> {
        match self {
            NodeData::Decision(d) => Some(d),
            _ => None,
        }
    }

    pub fn as_decision_mut(&mut self) -> Option<&mut DecisionNodeData> {
        match self {
            NodeData::Decision(d) => Some(d),
            _ => None,
        }
    }
}

/// A node on the canvas.
#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    /// node id
    pub id: NodeId,
    /// canvas position
    pub position: Position,
    /// typed payload
    pub data: NodeData,
}

impl Node {
    pub fn new(
        id: impl Into<NodeId>,
        position: Position,
        data: NodeData,
    ) -> Self {
        Self {
            id: id.into(),
            position,
            data,
        }
    }

    pub fn kind(&self) -> NodeKind {
        self.data.kind()
    }

    pub fn is_decision(&self) -> bool {
        self.kind() == NodeKind::DecisionNode
    }
}

impl TryFrom<&NodeModel> for Node {
    type Error = FlowError;

    fn try_from(model: &NodeModel) -> Result<Self> {
        let kind = model
            .kind
            .parse::<NodeKind>()
            .map_err(|_| FlowError::Node(format!("invalid node type '{}' for node {}", model.kind, model.id)))?;
        let data = NodeData::from_value(kind, model.data.clone()).map_err(|e| FlowError::Node(format!("invalid data for node {}: {}", model.id, e)))?;

        Ok(Self {
            id: model.id.clone(),
            position: model.position,
            data,
        })
    }
}

impl TryFrom<&Node> for NodeModel {
    type Error = FlowError;

    fn try_from(node: &Node) -> Result<Self> {
        Ok(Self {
            id: node.id.clone(),
            kind: node.kind().as_ref().to_string(),
            position: node.position,
            data: node.data.to_value()?,
        })
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn model(
        kind: &str,
        data: serde_json::Value,
    ) -> NodeModel {
        NodeModel {
            id: "n1".to_string(),
            kind: kind.to_string(),
            position: Position::new(10.0, 20.0),
            data,
        }
    }

    #[test]
    fn test_node_kind_keys() {
        assert_eq!(NodeKind::MyAiNode.as_ref(), "myAINode");
        assert_eq!("decisionNode".parse::<NodeKind>().unwrap(), NodeKind::DecisionNode);
        assert!(!NodeKind::RequestNode.accepts_incoming());
        assert!(NodeKind::DecisionNode.accepts_incoming());
    }

    #[test]
    fn test_decision_node_from_model_defaults_branches() {
        let node = Node::try_from(&model("decisionNode", json!({ "isActive": true }))).unwrap();
        let data = node.data.as_decision().unwrap();
        assert!(data.is_active);
        assert!(data.branches.is_empty());
        assert_eq!(node.position, Position::new(10.0, 20.0));
    }

    #[test]
    fn test_request_node_from_model() {
        let node = Node::try_from(&model("requestNode", json!({ "textInput": "출장비 정산", "placeholder": "질문" }))).unwrap();
        match node.data {
            NodeData::Request(d) => {
                assert_eq!(d.text_input, "출장비 정산");
                assert_eq!(d.placeholder.as_deref(), Some("질문"));
            }
            other => panic!("unexpected payload: {:?}", other),
        }
    }

    #[test]
    fn test_unknown_node_type() {
        let err = Node::try_from(&model("chartNode", json!({}))).unwrap_err();
        assert!(err.to_string().contains("chartNode"));
    }

    #[test]
    fn test_assistant_node_requires_profile() {
        let err = Node::try_from(&model("myAINode", json!({ "isActive": true }))).unwrap_err();
        assert!(matches!(err, FlowError::Node(_)));
    }

    #[test]
    fn test_node_to_model() {
        let node = Node::new(
            "d1",
            Position::default(),
            NodeData::Decision(DecisionNodeData {
                is_active: false,
                branches: vec![Branch {
                    id: "b1".to_string(),
                    condition: "yes".to_string(),
                }],
            }),
        );
        let model = NodeModel::try_from(&node).unwrap();
        assert_eq!(model.kind, "decisionNode");
        assert_eq!(model.data, json!({ "isActive": false, "branches": [{ "id": "b1", "condition": "yes" }] }));
    }
}
