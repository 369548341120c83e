use serde::Serialize;

use crate::flow::{
    branch::{BranchId, HandlePosition},
    node::DecisionNodeData,
};

/// One branch handle of a decision node as its renderer draws it.
#[derive(Serialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct HandleView {
    /// Handle id, equal to the branch id.
    pub branch_id: BranchId,
    pub condition: String,
    /// Vertical offset as a CSS percentage, e.g. `"50%"`.
    pub top: String,
}

/// What a decision node renderer needs: handles in order and the add-branch affordance.
#[derive(Serialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DecisionNodeView {
    pub is_active: bool,
    pub handles: Vec<HandleView>,
    pub branch_count: usize,
    pub max_branches: usize,
    pub can_add_branch: bool,
}

impl DecisionNodeView {
    pub fn new(
        data: &DecisionNodeData,
        max_branches: usize,
    ) -> Self {
        let total = data.branches.len();
        let handles = data
            .branches
            .iter()
            .enumerate()
            .map(|(index, branch)| HandleView {
                branch_id: branch.id.clone(),
                condition: branch.condition.clone(),
                top: HandlePosition::of(index, total).to_string(),
            })
            .collect();

        Self {
            is_active: data.is_active,
            handles,
            branch_count: total,
            max_branches,
            can_add_branch: total < max_branches,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::flow::branch::Branch;

    fn data(n: usize) -> DecisionNodeData {
        DecisionNodeData {
            is_active: true,
            branches: (1..=n)
                .map(|i| Branch {
                    id: format!("b{}", i),
                    condition: format!("c{}", i),
                })
                .collect(),
        }
    }

    #[test]
    fn test_empty_decision_view() {
        let view = DecisionNodeView::new(&data(0), 3);
        assert!(view.handles.is_empty());
        assert!(view.can_add_branch);
    }

    #[test]
    fn test_handles_spread_evenly() {
        let view = DecisionNodeView::new(&data(3), 3);
        let tops: Vec<&str> = view.handles.iter().map(|h| h.top.as_str()).collect();
        assert_eq!(tops, vec!["25%", "50%", "75%"]);
        assert_eq!(view.handles[1].branch_id, "b2");
        assert!(!view.can_add_branch);
    }
}
