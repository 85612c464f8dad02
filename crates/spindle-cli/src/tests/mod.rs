//! Crate-level tests for `spindle-cli`.

mod behaviour;
mod support;
