//! Crate-level tests for `spindle-engine`.
