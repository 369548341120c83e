use crate::{Config, Flow, FlowModel, Result};

#[derive(Default)]
pub struct FlowBuilder {
    config: Config,
    model: Option<FlowModel>,
}

impl FlowBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn config(
        mut self,
        config: Config,
    ) -> Self {
        self.config = config;
        self
    }

    pub fn max_branches(
        mut self,
        n: usize,
    ) -> Self {
        self.config.max_branches = n;
        self
    }

    /// Initial nodes and edges handed over by the graph engine.
    pub fn model(
        mut self,
        model: FlowModel,
    ) -> Self {
        self.model = Some(model);
        self
    }

    pub fn build(&self) -> Result<Flow> {
        let mut flow = Flow::new(self.config.clone());
        if let Some(model) = &self.model {
            flow.load(model)?;
        }

        Ok(flow)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::flow::viewport::Viewport;

    #[test]
    fn test_build_with_branch_limit() {
        let mut flow = FlowBuilder::new().max_branches(1).build().unwrap();
        let d = flow.add_decision_node(&Viewport::default()).unwrap();
        flow.add_branch(&d, "only").unwrap();
        assert!(flow.add_branch(&d, "second").is_err());
        assert_eq!(flow.decision_view(&d).unwrap().max_branches, 1);
    }

    #[test]
    fn test_build_from_json() {
        let json = r#"{
            "nodes": [
                { "id": "1", "type": "requestNode", "position": { "x": 0, "y": 0 }, "data": { "textInput": "" } },
                { "id": "2", "type": "decisionNode", "position": { "x": 200, "y": 0 }, "data": { "isActive": true } }
            ],
            "edges": [{ "id": "e1-2", "source": "1", "target": "2" }]
        }"#;
        let flow = FlowBuilder::new().model(FlowModel::from_json(json).unwrap()).build().unwrap();
        assert_eq!(flow.nodes().len(), 2);
        assert_eq!(flow.edge("e1-2").unwrap().label, None);
    }

    #[test]
    fn test_build_rejects_bad_json() {
        assert!(FlowModel::from_json("{ nodes: ").is_err());
    }
}
