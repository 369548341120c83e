//! Headless state of the editor's interactive controls.

mod modal;
mod selector;
mod toggle;

pub use modal::{BranchAddModal, ESCAPE_KEY, ModalDismiss, ModalState};
pub use selector::AssistantSelector;
pub use toggle::{ClickAway, PointerTarget, Switch, Toggle};
