//! State transitions of the flow as plain functions.
//!
//! Each command takes the state it reads and returns the state it produces,
//! so it can be exercised without a [`Flow`](crate::flow::Flow) or any
//! rendering engine. A command that fails returns an error and produces
//! nothing; the caller's state is left as it was.

use tracing::{debug, warn};

use crate::{
    FlowError, Result,
    flow::{
        branch::{Branch, IdGenerator},
        edge::{Connection, Edge, EdgeId},
        node::{Node, NodeData},
    },
};

/// Branch list and edge list after a branch was deleted.
#[derive(Debug, Clone, PartialEq)]
pub struct BranchDeletion {
    pub branches: Vec<Branch>,
    pub edges: Vec<Edge>,
    /// Ids of the edges that started at the deleted branch.
    pub removed_edges: Vec<EdgeId>,
    /// Whether a branch with the given id existed.
    pub found: bool,
}

/// Edge list after a connection was made.
#[derive(Debug, Clone, PartialEq)]
pub struct Connected {
    pub edges: Vec<Edge>,
    /// The edge now joining the two handles.
    pub edge: Edge,
    /// False when an identical edge already existed and was kept instead.
    pub created: bool,
}

/// Append a branch with the trimmed condition and a fresh id.
///
/// Rejected without consuming an id when the node already owns
/// `max_branches` branches or the condition is blank.
pub fn add_branch(
    branches: &[Branch],
    ids: &mut IdGenerator,
    condition: &str,
    max_branches: usize,
) -> Result<Vec<Branch>> {
    if branches.len() >= max_branches {
        warn!("add_branch rejected: {} of {} branches in use", branches.len(), max_branches);
        return Err(FlowError::Branch(format!("branch limit reached ({}/{})", branches.len(), max_branches)));
    }
    let condition = checked_condition(condition)?;

    let branch = Branch {
        id: ids.next_id(),
        condition: condition.to_string(),
    };
    debug!("branch {} added: {}", branch.id, branch.condition);

    let mut next = Vec::with_capacity(branches.len() + 1);
    next.extend_from_slice(branches);
    next.push(branch);
    Ok(next)
}

/// Trimmed condition text, rejected when blank.
pub fn checked_condition(condition: &str) -> Result<&str> {
    let condition = condition.trim();
    if condition.is_empty() {
        warn!("branch rejected: empty condition");
        return Err(FlowError::Branch("branch condition is empty".to_string()));
    }
    Ok(condition)
}

/// Check a branch list handed in whole (loaded or replaced): at most
/// `max_branches` entries, unique non-empty ids, non-blank conditions.
pub fn validate_branches(
    branches: &[Branch],
    max_branches: usize,
) -> Result<()> {
    if branches.len() > max_branches {
        return Err(FlowError::Branch(format!("branch limit reached ({}/{})", branches.len(), max_branches)));
    }
    for (i, branch) in branches.iter().enumerate() {
        if branch.id.is_empty() {
            return Err(FlowError::Branch("missing id in branch".into()));
        }
        if branches[..i].iter().any(|b| b.id == branch.id) {
            return Err(FlowError::Branch(format!("duplicate branch id {}", branch.id)));
        }
        if branch.condition.trim().is_empty() {
            return Err(FlowError::Branch(format!("branch {} has an empty condition", branch.id)));
        }
    }
    Ok(())
}

/// Split `edges` into the ones kept and the ids of the ones leaving
/// `branch_id` on `node_id`.
pub fn prune_branch_edges(
    edges: &[Edge],
    node_id: &str,
    branch_id: &str,
) -> (Vec<Edge>, Vec<EdgeId>) {
    let (removed, kept): (Vec<&Edge>, Vec<&Edge>) = edges.iter().partition(|e| e.leaves(node_id, branch_id));
    (kept.into_iter().cloned().collect(), removed.into_iter().map(|e| e.id.clone()).collect())
}

/// Remove a branch together with every edge leaving its handle.
///
/// Unknown branch ids are a no-op on the branch list; edges leaving a
/// handle of that id are still pruned so none can dangle.
pub fn delete_branch(
    branches: &[Branch],
    edges: &[Edge],
    node_id: &str,
    branch_id: &str,
) -> BranchDeletion {
    let (edges, removed_edges) = prune_branch_edges(edges, node_id, branch_id);
    let found = branches.iter().any(|b| b.id == branch_id);
    let branches = branches.iter().filter(|b| b.id != branch_id).cloned().collect();

    if !removed_edges.is_empty() {
        debug!("branch {} of node {} removed with edges {:?}", branch_id, node_id, removed_edges);
    }

    BranchDeletion {
        branches,
        edges,
        removed_edges,
        found,
    }
}

/// Label an edge leaving `source` through `handle` would carry: the
/// condition of the decision branch with that id, if any.
pub fn branch_label(
    source: &Node,
    handle: Option<&str>,
) -> Option<String> {
    let (NodeData::Decision(data), Some(handle)) = (&source.data, handle) else {
        return None;
    };
    match data.branch(handle) {
        Some(branch) => Some(branch.condition.clone()),
        None => {
            warn!("stale branch handle {} on node {}, edge left unlabeled", handle, source.id);
            None
        }
    }
}

/// Add an edge for a finished connection drag.
///
/// Edges leaving a decision branch are labeled with the branch condition;
/// all other edges are plain. Both end nodes must exist and the target must
/// accept incoming edges. With `dedupe` set, a connection joining the same
/// handles as an existing edge returns that edge unchanged; without it, a
/// repeated connection gets the engine id plus a `-{n}` suffix so edge ids
/// stay unique.
pub fn connect(
    nodes: &[Node],
    edges: &[Edge],
    connection: &Connection,
    dedupe: bool,
) -> Result<Connected> {
    let source = nodes
        .iter()
        .find(|n| n.id == connection.source)
        .ok_or(FlowError::Edge(format!("source node {} not found", connection.source)))?;
    let target = nodes
        .iter()
        .find(|n| n.id == connection.target)
        .ok_or(FlowError::Edge(format!("target node {} not found", connection.target)))?;
    if !target.kind().accepts_incoming() {
        return Err(FlowError::Edge(format!("node {} ({}) does not accept incoming edges", target.id, target.kind().as_ref())));
    }

    if dedupe {
        if let Some(existing) = edges.iter().find(|e| e.same_route(connection)) {
            debug!("connection {} already exists", existing.id);
            return Ok(Connected {
                edges: edges.to_vec(),
                edge: existing.clone(),
                created: false,
            });
        }
    }

    let mut edge = match branch_label(source, connection.source_handle.as_deref()) {
        Some(label) => Edge::labeled(connection, label),
        None => Edge::plain(connection),
    };
    edge.id = unique_edge_id(edges, edge.id);
    debug!("edge {} connected {} -> {}", edge.id, edge.source, edge.target);

    let mut next = Vec::with_capacity(edges.len() + 1);
    next.extend_from_slice(edges);
    next.push(edge.clone());
    Ok(Connected {
        edges: next,
        edge,
        created: true,
    })
}

/// `id` if no edge uses it yet, otherwise the first free `{id}-{n}`.
fn unique_edge_id(
    edges: &[Edge],
    id: EdgeId,
) -> EdgeId {
    let taken = |candidate: &str| edges.iter().any(|e| e.id == candidate);
    if !taken(&id) {
        return id;
    }
    let mut n = 1;
    loop {
        let candidate = format!("{}-{}", id, n);
        if !taken(&candidate) {
            return candidate;
        }
        n += 1;
    }
}

/// Drop every edge starting or ending at `node_id`.
pub fn prune_node_edges(
    edges: &[Edge],
    node_id: &str,
) -> (Vec<Edge>, Vec<EdgeId>) {
    let (removed, kept): (Vec<&Edge>, Vec<&Edge>) = edges.iter().partition(|e| e.touches(node_id));
    (kept.into_iter().cloned().collect(), removed.into_iter().map(|e| e.id.clone()).collect())
}
