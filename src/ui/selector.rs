use crate::{
    FlowError, Result,
    flow::{AssistantProfile, Flow, node::NodeId, viewport::Viewport},
    ui::Toggle,
};

/// Sidebar popover listing assistants; picking one adds its node and closes the list.
#[derive(Debug, Clone, Default)]
pub struct AssistantSelector {
    visible: Toggle,
    assistants: Vec<AssistantProfile>,
}

impl AssistantSelector {
    pub fn new(assistants: Vec<AssistantProfile>) -> Self {
        Self {
            visible: Toggle::default(),
            assistants,
        }
    }

    pub fn assistants(&self) -> &[AssistantProfile] {
        &self.assistants
    }

    pub fn is_visible(&self) -> bool {
        self.visible.is_on()
    }

    /// Sidebar button press.
    pub fn toggle(&mut self) {
        self.visible.toggle();
    }

    pub fn close(&mut self) {
        self.visible.close();
    }

    /// Add a node for the assistant at `index` and close the list.
    pub fn select(
        &mut self,
        index: usize,
        flow: &mut Flow,
        viewport: &Viewport,
    ) -> Result<NodeId> {
        let profile = self
            .assistants
            .get(index)
            .cloned()
            .ok_or(FlowError::Node(format!("no assistant at position {}", index)))?;
        let id = flow.add_assistant_node(profile, viewport)?;
        self.close();
        Ok(id)
    }
}
