// wizflow/src/wizard/mod.rs

//! Defines the `Wizard<T, R, Err>` controller: its construction, history
//! bookkeeping, transition hooks and execution logic.

pub mod definition;
pub mod execution;
pub(crate) mod history;
pub mod hooks;

pub use definition::Wizard;
pub use hooks::{EventListener, WizardEvent};
