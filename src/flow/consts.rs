/// Branch cap of a decision node.
pub const MAX_BRANCHES: usize = 3;

/// Prefix of generated branch ids.
pub const BRANCH_ID_PREFIX: &str = "branch";

/// Length of the random per-instance part of generated ids.
pub const INSTANCE_PREFIX_LEN: usize = 8;

/// Prefix of generated edge ids, as the graph engine names them.
pub const EDGE_ID_PREFIX: &str = "xy-edge__";
