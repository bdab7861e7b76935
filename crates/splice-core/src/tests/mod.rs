//! Crate-level tests for splice-core.

mod behaviour;
