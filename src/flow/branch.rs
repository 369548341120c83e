//! Decision branches, their identities and handle placement.
//!
//! A branch is a named outgoing path from a decision node. Each branch is
//! rendered as one source handle whose id equals the branch id, so edges
//! drawn from that handle carry the branch id as their `source_handle`.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::flow::consts::{BRANCH_ID_PREFIX, INSTANCE_PREFIX_LEN};

/// Unique identifier of a branch within its owning node's lifetime.
pub type BranchId = String;

/// One outgoing path of a decision node.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Branch {
    /// Branch id, also the id of the handle it renders as.
    pub id: BranchId,
    /// Human-readable condition, trimmed and non-empty once committed.
    pub condition: String,
}

/// Monotonic id source scoped to one owner instance.
///
/// Ids have the form `{kind}-{instance}-{counter}`. The instance part is
/// random per generator, so two generators that both start counting from 1
/// never hand out the same id. The counter never rewinds, so an id is not
/// reused after the item carrying it is deleted.
#[derive(Debug, Clone)]
pub struct IdGenerator {
    kind: String,
    instance: String,
    counter: u64,
}

impl IdGenerator {
    /// Create a generator with a fresh random instance prefix.
    pub fn new(kind: impl Into<String>) -> Self {
        Self::with_instance(kind, nanoid::nanoid!(INSTANCE_PREFIX_LEN))
    }

    /// Create a generator with a fixed instance prefix.
    pub fn with_instance(
        kind: impl Into<String>,
        instance: impl Into<String>,
    ) -> Self {
        Self {
            kind: kind.into(),
            instance: instance.into(),
            counter: 0,
        }
    }

    /// Generator for the branches of one decision node.
    pub fn for_branches() -> Self {
        Self::new(BRANCH_ID_PREFIX)
    }

    /// Advance the counter and return the next id.
    pub fn next_id(&mut self) -> String {
        self.counter += 1;
        format!("{}-{}-{}", self.kind, self.instance, self.counter)
    }

    /// Number of ids handed out so far.
    pub fn issued(&self) -> u64 {
        self.counter
    }

    pub fn instance(&self) -> &str {
        &self.instance
    }
}

/// Normalized vertical position of a branch handle, in percent.
///
/// Handles are spread evenly over `total + 1` slots, leaving a margin at both
/// ends: the result is `(index + 1) / (total + 1) * 100`, strictly between 0
/// and 100 and strictly increasing in `index`.
///
/// `index` must be less than `total`.
pub fn handle_position(
    index: usize,
    total: usize,
) -> f64 {
    debug_assert!(index < total, "handle index {} out of range for {} branches", index, total);
    ((index + 1) as f64 / (total + 1) as f64) * 100.0
}

/// A handle position rendered as a CSS percentage (`"50%"`).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HandlePosition(pub f64);

impl HandlePosition {
    pub fn of(
        index: usize,
        total: usize,
    ) -> Self {
        Self(handle_position(index, total))
    }

    pub fn percent(&self) -> f64 {
        self.0
    }
}

impl fmt::Display for HandlePosition {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        write!(f, "{}%", self.0)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    #[test]
    fn test_handle_position_single_branch_centers() {
        assert_eq!(handle_position(0, 1), 50.0);
    }

    #[test]
    fn test_handle_position_two_branches() {
        assert!((handle_position(0, 2) - 33.333).abs() < 0.01);
        assert!((handle_position(1, 2) - 66.667).abs() < 0.01);
    }

    #[test]
    fn test_handle_position_increasing_and_bounded() {
        for total in 1..=10 {
            let mut prev = 0.0;
            for index in 0..total {
                let pos = handle_position(index, total);
                assert!(pos > prev, "position must increase: {} <= {}", pos, prev);
                assert!(pos > 0.0 && pos < 100.0);
                prev = pos;
            }
        }
    }

    #[test]
    fn test_handle_position_display() {
        assert_eq!(HandlePosition::of(0, 1).to_string(), "50%");
        assert_eq!(HandlePosition::of(2, 3).to_string(), "75%");
    }

    #[test]
    fn test_id_generator_monotonic() {
        let mut ids = IdGenerator::with_instance("branch", "abc");
        assert_eq!(ids.next_id(), "branch-abc-1");
        assert_eq!(ids.next_id(), "branch-abc-2");
        assert_eq!(ids.issued(), 2);
    }

    #[test]
    fn test_id_generator_instances_do_not_collide() {
        let mut a = IdGenerator::for_branches();
        let mut b = IdGenerator::for_branches();
        assert_ne!(a.instance(), b.instance());

        let from_a: HashSet<String> = (0..5).map(|_| a.next_id()).collect();
        let from_b: HashSet<String> = (0..5).map(|_| b.next_id()).collect();
        assert!(from_a.is_disjoint(&from_b));
    }
}
