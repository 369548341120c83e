mod edge;
mod flow;
mod node;

pub use edge::{EdgeLabelData, EdgeModel};
pub use flow::FlowModel;
pub use node::NodeModel;
