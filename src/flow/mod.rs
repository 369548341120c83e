pub mod assistant;
pub mod branch;
pub mod commands;
pub mod consts;
pub mod edge;
pub mod node;
pub mod view;
pub mod viewport;
mod flow;

pub use assistant::AssistantProfile;
pub use flow::Flow;
