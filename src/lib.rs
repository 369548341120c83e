//! # Flowcanvas
//!
//! Flowcanvas is the headless state model of a visual flow editor: a canvas
//! of request, assistant and decision nodes joined by edges. Rendering,
//! dragging and zooming belong to the graph engine embedding it; this crate
//! owns the node and edge collections and every rule about how they change.
//!
//! ## Core Features
//!
//! - **Typed nodes**: one payload type per node kind, selected by the `type` key
//! - **Decision branches**: up to three labeled outgoing paths per decision node
//! - **Edge synchronization**: branch edges are labeled on connect and removed with their branch
//! - **Headless controls**: the add-branch form, modals and toggles as plain state machines
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use flowcanvas::{Connection, FlowBuilder, Viewport};
//!
//! let mut flow = FlowBuilder::new().build()?;
//! let decision = flow.add_decision_node(&Viewport::default())?;
//! let branch = flow.add_branch(&decision, "금액이 10만원 이상인 경우")?;
//! let edge = flow.connect(&Connection::new(&decision, "approver").from_branch(&branch.id))?;
//! assert_eq!(edge.label.as_deref(), Some("금액이 10만원 이상인 경우"));
//! ```

mod builder;
mod config;
mod error;
mod events;
mod model;
mod utils;

pub mod flow;
pub mod ui;

pub use builder::FlowBuilder;
pub use config::{Config, PlacementConfig};
pub use error::FlowError;
pub use events::{EdgeEvent, FlowEvent, Message, NodeEvent};
pub use flow::{
    Flow,
    branch::{Branch, BranchId, HandlePosition, handle_position},
    edge::{Connection, Edge, EdgeId, EdgeKind},
    node::{Node, NodeData, NodeId, NodeKind, Position},
    view::{DecisionNodeView, HandleView},
    viewport::Viewport,
};
pub use model::*;

/// Result type alias for Flowcanvas operations.
pub type Result<T> = std::result::Result<T, FlowError>;
