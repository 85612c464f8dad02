//! Crate-level tests for `spindle-syntax`.
