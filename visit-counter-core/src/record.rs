//! The single counter record every invocation increments.

/// Name of the hash key attribute of the counter table.
pub const KEY_ATTRIBUTE: &str = "visit";

/// Constant key value identifying the counter record.
pub const KEY_VALUE: &str = "visit_info";

/// Numeric attribute holding the number of visits.
pub const COUNT_ATTRIBUTE: &str = "visit_count";
