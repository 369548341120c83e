//! The flow state container.
//!
//! `Flow` owns the node and edge collections of one canvas. The rendering
//! engine reads them and reports user interactions back through the methods
//! here; nothing else mutates them.

use std::collections::HashMap;

use tracing::{debug, trace, warn};

use crate::{
    Config, FlowError, FlowModel, Result,
    events::{EdgeEvent, FlowEvent, Message, NodeEvent},
    flow::{
        assistant::AssistantProfile,
        branch::{Branch, BranchId, IdGenerator},
        commands,
        edge::{Connection, Edge, EdgeId},
        node::{AssistantNodeData, DecisionNodeData, Node, NodeData, NodeId, NodeKind, Position},
        view::DecisionNodeView,
        viewport::Viewport,
    },
    model::{EdgeModel, NodeModel},
};

/// Node and edge collections of a canvas plus the id sources scoped to it.
#[derive(Debug, Clone)]
pub struct Flow {
    config: Config,
    nodes: Vec<Node>,
    edges: Vec<Edge>,
    /// Branch id source of each mounted decision node.
    branch_ids: HashMap<NodeId, IdGenerator>,
    /// Node id source of each node kind added through this flow.
    node_ids: HashMap<NodeKind, IdGenerator>,
    events: Vec<Message>,
}

impl Default for Flow {
    fn default() -> Self {
        Self::new(Config::default())
    }
}

impl Flow {
    /// create an empty flow
    pub fn new(config: Config) -> Self {
        Self {
            config,
            nodes: Vec::new(),
            edges: Vec::new(),
            branch_ids: HashMap::new(),
            node_ids: HashMap::new(),
            events: Vec::new(),
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    /// get node by id
    pub fn node(
        &self,
        id: &str,
    ) -> Option<&Node> {
        self.nodes.iter().find(|n| n.id == id)
    }

    /// get edge by id
    pub fn edge(
        &self,
        id: &str,
    ) -> Option<&Edge> {
        self.edges.iter().find(|e| e.id == id)
    }

    /// Branches of a decision node, in handle order.
    pub fn branches(
        &self,
        node_id: &str,
    ) -> Result<&[Branch]> {
        Ok(&self.decision(node_id)?.branches)
    }

    /// Handle layout of a decision node for its renderer.
    pub fn decision_view(
        &self,
        node_id: &str,
    ) -> Result<DecisionNodeView> {
        let data = self.decision(node_id)?;
        Ok(DecisionNodeView::new(data, self.config.max_branches))
    }

    /// Take all events recorded since the last call.
    pub fn drain_events(&mut self) -> Vec<Message> {
        std::mem::take(&mut self.events)
    }

    /// add a node with the given id
    pub fn add_node(
        &mut self,
        node: Node,
    ) -> Result<NodeId> {
        trace!("flow::add_node({})", node.id);
        if node.id.is_empty() {
            return Err(FlowError::Node("missing id in node".into()));
        }
        if self.node(&node.id).is_some() {
            return Err(FlowError::Node(format!("node {} already exists", node.id)));
        }

        let kind = node.kind();
        if node.is_decision() {
            self.branch_ids.insert(node.id.clone(), IdGenerator::for_branches());
        }
        let id = node.id.clone();
        self.nodes.push(node);
        self.emit(&id, FlowEvent::Node(NodeEvent::Added(kind)));
        Ok(id)
    }

    /// Add a node with a generated id at `position`.
    pub fn add_node_at(
        &mut self,
        data: NodeData,
        position: Position,
    ) -> Result<NodeId> {
        let id = self.next_node_id(data.kind());
        self.add_node(Node::new(id, position, data))
    }

    /// Add an active decision node with no branches, placed in view.
    pub fn add_decision_node(
        &mut self,
        viewport: &Viewport,
    ) -> Result<NodeId> {
        let position = viewport.placement(self.nodes.len(), &self.config.placement);
        self.add_node_at(NodeData::Decision(DecisionNodeData::default()), position)
    }

    /// Add an active node for the selected assistant, placed in view.
    pub fn add_assistant_node(
        &mut self,
        my_ai: AssistantProfile,
        viewport: &Viewport,
    ) -> Result<NodeId> {
        let position = viewport.placement(self.nodes.len(), &self.config.placement);
        self.add_node_at(NodeData::Assistant(AssistantNodeData { my_ai, is_active: true }), position)
    }

    /// Remove a node, its incident edges and the id source scoped to it.
    pub fn remove_node(
        &mut self,
        id: &str,
    ) -> Result<()> {
        trace!("flow::remove_node({})", id);
        let idx = self.index_of(id)?;
        let (edges, removed_edges) = commands::prune_node_edges(&self.edges, id);

        self.edges = edges;
        self.nodes.remove(idx);
        self.branch_ids.remove(id);
        self.emit(id, FlowEvent::Node(NodeEvent::Removed { removed_edges }));
        Ok(())
    }

    /// Replace a node's payload. The node kind cannot change.
    ///
    /// A decision payload must hold a valid branch list. Branches dropped by
    /// the new payload take their edges with them.
    pub fn update_node_data(
        &mut self,
        id: &str,
        data: NodeData,
    ) -> Result<()> {
        trace!("flow::update_node_data({})", id);
        let idx = self.index_of(id)?;
        let node = &self.nodes[idx];
        if node.kind() != data.kind() {
            return Err(FlowError::Node(format!(
                "cannot change node {} from {} to {}",
                id,
                node.kind().as_ref(),
                data.kind().as_ref()
            )));
        }
        let mut removed_edges = Vec::new();
        if let Some(new) = data.as_decision() {
            commands::validate_branches(&new.branches, self.config.max_branches)?;
            let stale: Vec<BranchId> = node
                .data
                .as_decision()
                .map(|old| old.branches.iter().filter(|b| new.branch(&b.id).is_none()).map(|b| b.id.clone()).collect())
                .unwrap_or_default();
            for branch_id in stale {
                let (edges, removed) = commands::prune_branch_edges(&self.edges, id, &branch_id);
                self.edges = edges;
                removed_edges.extend(removed);
            }
        }

        self.nodes[idx].data = data;
        self.emit(id, FlowEvent::Node(NodeEvent::DataUpdated { removed_edges }));
        Ok(())
    }

    /// Set the active flag of an assistant or decision node.
    pub fn set_active(
        &mut self,
        id: &str,
        active: bool,
    ) -> Result<()> {
        let idx = self.index_of(id)?;
        match &mut self.nodes[idx].data {
            NodeData::Assistant(d) => d.is_active = active,
            NodeData::Decision(d) => d.is_active = active,
            NodeData::Request(_) => return Err(FlowError::Node(format!("node {} cannot be toggled", id))),
        }
        debug!("node {} active: {}", id, active);
        self.emit(id, FlowEvent::Node(NodeEvent::Activated(active)));
        Ok(())
    }

    /// Flip the active flag; returns the new value.
    pub fn toggle_active(
        &mut self,
        id: &str,
    ) -> Result<bool> {
        let current = self
            .node(id)
            .ok_or(FlowError::Node(format!("node {} not found", id)))?
            .data
            .is_active()
            .ok_or(FlowError::Node(format!("node {} cannot be toggled", id)))?;
        self.set_active(id, !current)?;
        Ok(!current)
    }

    /// Append a branch to a decision node.
    pub fn add_branch(
        &mut self,
        node_id: &str,
        condition: &str,
    ) -> Result<Branch> {
        trace!("flow::add_branch({})", node_id);
        let idx = self.index_of(node_id)?;
        let max_branches = self.config.max_branches;
        let data = self.nodes[idx].data.as_decision_mut().ok_or(FlowError::Node(format!("node {} is not a decision node", node_id)))?;
        let ids = self.branch_ids.entry(node_id.to_string()).or_insert_with(IdGenerator::for_branches);

        data.branches = commands::add_branch(&data.branches, ids, condition, max_branches)?;
        let branch = data.branches.last().cloned().ok_or(FlowError::Branch("branch list is empty".into()))?;

        self.emit(node_id, FlowEvent::Node(NodeEvent::BranchAdded(branch.id.clone())));
        Ok(branch)
    }

    /// Delete a branch and every edge leaving its handle in one step.
    ///
    /// Returns the ids of the removed edges. Unknown branch ids are a no-op.
    pub fn delete_branch(
        &mut self,
        node_id: &str,
        branch_id: &str,
    ) -> Result<Vec<EdgeId>> {
        trace!("flow::delete_branch({}, {})", node_id, branch_id);
        let idx = self.index_of(node_id)?;
        let data = self.nodes[idx].data.as_decision_mut().ok_or(FlowError::Node(format!("node {} is not a decision node", node_id)))?;

        let deletion = commands::delete_branch(&data.branches, &self.edges, node_id, branch_id);
        if !deletion.found && deletion.removed_edges.is_empty() {
            debug!("branch {} not found on node {}", branch_id, node_id);
            return Ok(Vec::new());
        }
        data.branches = deletion.branches;
        self.edges = deletion.edges;

        self.emit(
            node_id,
            FlowEvent::Node(NodeEvent::BranchDeleted {
                branch_id: branch_id.to_string(),
                removed_edges: deletion.removed_edges.clone(),
            }),
        );
        Ok(deletion.removed_edges)
    }

    /// Add the edge for a finished connection drag; returns the edge joining
    /// the two handles.
    pub fn connect(
        &mut self,
        connection: &Connection,
    ) -> Result<Edge> {
        trace!("flow::connect({:?})", connection);
        let connected = commands::connect(&self.nodes, &self.edges, connection, self.config.dedupe_connections)?;
        self.edges = connected.edges;

        if connected.created {
            self.emit(
                &connection.source,
                FlowEvent::Edge(EdgeEvent::Connected {
                    edge_id: connected.edge.id.clone(),
                    labeled: connected.edge.label.is_some(),
                }),
            );
        }
        Ok(connected.edge)
    }

    /// Remove an edge (clicking an edge deletes it).
    pub fn remove_edge(
        &mut self,
        id: &str,
    ) -> Option<Edge> {
        let idx = self.edges.iter().position(|e| e.id == id)?;
        let edge = self.edges.remove(idx);
        self.emit(&edge.source, FlowEvent::Edge(EdgeEvent::Removed(edge.id.clone())));
        Some(edge)
    }

    /// Node and edge collections in the graph engine's JSON shape.
    pub fn to_model(&self) -> Result<FlowModel> {
        let nodes = self.nodes.iter().map(NodeModel::try_from).collect::<Result<Vec<_>>>()?;
        let edges = self.edges.iter().map(EdgeModel::from).collect();
        Ok(FlowModel { nodes, edges })
    }

    fn decision(
        &self,
        node_id: &str,
    ) -> Result<&DecisionNodeData> {
        self.node(node_id)
            .ok_or(FlowError::Node(format!("node {} not found", node_id)))?
            .data
            .as_decision()
            .ok_or(FlowError::Node(format!("node {} is not a decision node", node_id)))
    }

    fn index_of(
        &self,
        id: &str,
    ) -> Result<usize> {
        self.nodes.iter().position(|n| n.id == id).ok_or(FlowError::Node(format!("node {} not found", id)))
    }

    fn next_node_id(
        &mut self,
        kind: NodeKind,
    ) -> NodeId {
        loop {
            let id = self.node_ids.entry(kind).or_insert_with(|| IdGenerator::new(kind.id_prefix())).next_id();
            if self.node(&id).is_none() {
                return id;
            }
            warn!("generated node id {} already in use", id);
        }
    }

    fn emit(
        &mut self,
        nid: &str,
        event: FlowEvent,
    ) {
        self.events.push(Message::new(nid, event));
    }
}

impl TryFrom<&FlowModel> for Flow {
    type Error = FlowError;

    fn try_from(model: &FlowModel) -> Result<Self> {
        let mut flow = Flow::default();
        flow.load(model)?;
        Ok(flow)
    }
}

impl Flow {
    /// Load nodes and edges handed over by the graph engine.
    ///
    /// Edges whose end nodes are missing, or whose decision source handle
    /// names no branch, are rejected.
    pub(crate) fn load(
        &mut self,
        model: &FlowModel,
    ) -> Result<()> {
        for node in model.nodes.iter() {
            let node = Node::try_from(node)?;
            if let Some(data) = node.data.as_decision() {
                commands::validate_branches(&data.branches, self.config.max_branches)
                    .map_err(|e| FlowError::Branch(format!("node {}: {}", node.id, e)))?;
            }
            self.add_node(node)?;
        }
        for edge in model.edges.iter() {
            let edge = Edge::try_from(edge)?;
            if self.edge(&edge.id).is_some() {
                return Err(FlowError::Edge(format!("edge {} already exists", edge.id)));
            }
            let source = self.node(&edge.source).ok_or(FlowError::Edge(format!("source node {} not found", edge.source)))?;
            if self.node(&edge.target).is_none() {
                return Err(FlowError::Edge(format!("target node {} not found", edge.target)));
            }
            if let (Some(data), Some(handle)) = (source.data.as_decision(), edge.source_handle.as_deref()) {
                if data.branch(handle).is_none() {
                    return Err(FlowError::Edge(format!("edge {} leaves unknown branch {}", edge.id, handle)));
                }
            }
            self.edges.push(edge);
        }
        self.events.clear();
        Ok(())
    }
}
