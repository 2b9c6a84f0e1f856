pub mod control;
pub mod state;
pub mod step;

// Re-export key types for easier access from other wizflow modules (and lib.rs)
pub use control::{WizardOutcome, WizardStatus};
pub use state::{Progress, WizardState};
pub use step::{SkipCondition, StepDef, StepHandler, StepOutcome};
