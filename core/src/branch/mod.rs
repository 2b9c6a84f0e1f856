// wizflow/src/branch/mod.rs

//! Data-dependent branching.
//!
//! A step can always return follow-up steps itself through
//! `StepOutcome::branch`. This module offers the declarative form: wrap a
//! step with `BranchBuilder` and list which follow-ups to insert for which
//! accepted states.

pub(crate) mod arm;
pub mod builder;

pub use builder::BranchBuilder;
