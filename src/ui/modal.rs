//! Modal dialogs: dismiss rules and the add-branch form.

use tracing::{debug, trace};

use crate::{
    FlowError, Result,
    flow::{Flow, branch::Branch},
};

/// Key that closes an open modal.
pub const ESCAPE_KEY: &str = "Escape";

/// When a modal closes without an explicit button press.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ModalDismiss {
    /// Keep the modal open on Escape and on backdrop clicks.
    pub disable_away_click: bool,
}

impl ModalDismiss {
    /// Whether a key press closes the modal.
    pub fn on_key(
        &self,
        is_show: bool,
        key: &str,
    ) -> bool {
        is_show && !self.disable_away_click && key == ESCAPE_KEY
    }

    /// Whether a click on the backdrop closes the modal. Clicks that land in
    /// the modal content bubble up with a different target and are ignored.
    pub fn on_backdrop_click(
        &self,
        target_is_backdrop: bool,
    ) -> bool {
        !self.disable_away_click && target_is_backdrop
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, strum::AsRefStr)]
pub enum ModalState {
    #[default]
    Closed,
    Open,
}

/// The form that commits a new branch to a decision node.
///
/// Closed until opened; every open starts with an empty input. Saving adds
/// the trimmed input as a branch and closes; cancelling closes without
/// adding. Saving is blocked while the input is blank or the node is at its
/// branch cap.
#[derive(Debug, Clone, Default)]
pub struct BranchAddModal {
    state: ModalState,
    input: String,
    dismiss: ModalDismiss,
}

impl BranchAddModal {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_dismiss(dismiss: ModalDismiss) -> Self {
        Self {
            dismiss,
            ..Self::default()
        }
    }

    pub fn state(&self) -> ModalState {
        self.state
    }

    pub fn is_open(&self) -> bool {
        self.state == ModalState::Open
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn open(&mut self) {
        trace!("branch modal open");
        self.input.clear();
        self.state = ModalState::Open;
    }

    /// Replace the typed text. Ignored while closed or while the node with
    /// `branch_count` branches is at its cap; returns whether it was taken.
    pub fn set_input(
        &mut self,
        text: impl Into<String>,
        branch_count: usize,
        max_branches: usize,
    ) -> bool {
        if !self.is_input_enabled(branch_count, max_branches) {
            return false;
        }
        self.input = text.into();
        true
    }

    /// Whether the text control accepts input for a node with `branch_count` branches.
    pub fn is_input_enabled(
        &self,
        branch_count: usize,
        max_branches: usize,
    ) -> bool {
        self.is_open() && branch_count < max_branches
    }

    pub fn can_save(
        &self,
        branch_count: usize,
        max_branches: usize,
    ) -> bool {
        self.is_input_enabled(branch_count, max_branches) && !self.input.trim().is_empty()
    }

    /// Commit the input as a new branch of `node_id` and close.
    ///
    /// A blocked save leaves the modal open with its input intact.
    pub fn save(
        &mut self,
        flow: &mut Flow,
        node_id: &str,
    ) -> Result<Branch> {
        if !self.is_open() {
            return Err(FlowError::Modal("branch modal is not open".into()));
        }
        let count = flow.branches(node_id)?.len();
        let max = flow.config().max_branches;
        if !self.can_save(count, max) {
            debug!("branch modal save blocked ({}/{} branches, input {:?})", count, max, self.input);
            return Err(FlowError::Branch(if count >= max {
                format!("branch limit reached ({}/{})", count, max)
            } else {
                "branch condition is empty".to_string()
            }));
        }

        let branch = flow.add_branch(node_id, self.input.trim())?;
        self.input.clear();
        self.state = ModalState::Closed;
        Ok(branch)
    }

    /// Close without adding a branch, discarding the input.
    pub fn cancel(&mut self) {
        trace!("branch modal cancel");
        self.input.clear();
        self.state = ModalState::Closed;
    }

    /// Handle a key press; returns true if it closed the modal.
    pub fn on_key(
        &mut self,
        key: &str,
    ) -> bool {
        let close = self.dismiss.on_key(self.is_open(), key);
        if close {
            self.cancel();
        }
        close
    }

    /// Handle a backdrop click; returns true if it closed the modal.
    pub fn on_backdrop_click(
        &mut self,
        target_is_backdrop: bool,
    ) -> bool {
        let close = self.is_open() && self.dismiss.on_backdrop_click(target_is_backdrop);
        if close {
            self.cancel();
        }
        close
    }

    /// Branch counter shown in the form header.
    pub fn counter_label(
        branch_count: usize,
        max_branches: usize,
    ) -> String {
        format!("현재 분기: {} / {}", branch_count, max_branches)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::flow::viewport::Viewport;

    fn setup() -> (Flow, String, BranchAddModal) {
        let mut flow = Flow::default();
        let d = flow.add_decision_node(&Viewport::default()).unwrap();
        (flow, d, BranchAddModal::new())
    }

    #[test]
    fn test_save_adds_trimmed_branch_and_closes() {
        let (mut flow, d, mut modal) = setup();
        modal.open();
        modal.set_input("  금액이 10만원 이상인 경우 ", 0, 3);
        assert!(modal.can_save(0, 3));

        let branch = modal.save(&mut flow, &d).unwrap();
        assert_eq!(branch.condition, "금액이 10만원 이상인 경우");
        assert_eq!(modal.state(), ModalState::Closed);
        assert_eq!(modal.input(), "");
        assert_eq!(flow.branches(&d).unwrap().len(), 1);
    }

    #[test]
    fn test_save_rejects_whitespace() {
        let (mut flow, d, mut modal) = setup();
        modal.open();
        modal.set_input("   ", 0, 3);
        assert!(!modal.can_save(0, 3));
        assert!(modal.save(&mut flow, &d).is_err());
        assert!(modal.is_open());
        assert!(flow.branches(&d).unwrap().is_empty());
    }

    #[test]
    fn test_save_blocked_at_cap_keeps_input() {
        let (mut flow, d, mut modal) = setup();
        modal.open();
        modal.set_input("fourth", 0, 3);
        for c in ["a", "b", "c"] {
            flow.add_branch(&d, c).unwrap();
        }
        assert!(!modal.is_input_enabled(3, 3));
        assert!(!modal.set_input("fifth", 3, 3));
        assert!(!modal.can_save(3, 3));
        assert!(matches!(modal.save(&mut flow, &d), Err(FlowError::Branch(_))));
        assert_eq!(modal.input(), "fourth");
        assert_eq!(flow.branches(&d).unwrap().len(), 3);
    }

    #[test]
    fn test_input_disabled_at_cap() {
        let (mut flow, d, mut modal) = setup();
        for c in ["a", "b", "c"] {
            flow.add_branch(&d, c).unwrap();
        }
        modal.open();
        assert!(!modal.set_input("fourth", 3, 3));
        assert_eq!(modal.input(), "");
        assert!(modal.set_input("fourth", 2, 3));
        assert_eq!(modal.input(), "fourth");
    }

    #[test]
    fn test_cancel_discards_and_reopen_is_empty() {
        let (mut flow, d, mut modal) = setup();
        modal.open();
        modal.set_input("draft", 0, 3);
        modal.cancel();
        assert!(!modal.is_open());
        assert!(flow.branches(&d).unwrap().is_empty());

        modal.open();
        assert_eq!(modal.input(), "");
        assert!(modal.save(&mut flow, &d).is_err());
    }

    #[test]
    fn test_closed_modal_ignores_input_and_save() {
        let (mut flow, d, mut modal) = setup();
        modal.set_input("x", 0, 3);
        assert_eq!(modal.input(), "");
        assert!(matches!(modal.save(&mut flow, &d), Err(FlowError::Modal(_))));
    }

    #[test]
    fn test_escape_and_backdrop_dismiss() {
        let mut modal = BranchAddModal::new();
        modal.open();
        modal.set_input("draft", 0, 3);
        assert!(!modal.on_key("Enter"));
        assert!(modal.on_key(ESCAPE_KEY));
        assert!(!modal.is_open());
        assert_eq!(modal.input(), "");

        modal.open();
        assert!(!modal.on_backdrop_click(false));
        assert!(modal.on_backdrop_click(true));
        assert!(!modal.is_open());
    }

    #[test]
    fn test_disable_away_click() {
        let mut modal = BranchAddModal::with_dismiss(ModalDismiss { disable_away_click: true });
        modal.open();
        assert!(!modal.on_key(ESCAPE_KEY));
        assert!(!modal.on_backdrop_click(true));
        assert!(modal.is_open());
    }

    #[test]
    fn test_counter_label() {
        assert_eq!(BranchAddModal::counter_label(2, 3), "현재 분기: 2 / 3");
    }
}
