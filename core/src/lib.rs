// src/lib.rs

//! wizflow: an ASYNC multi-step wizard engine for Rust.
//!
//! wizflow drives guided, multi-question flows (resource-creation wizards,
//! setup assistants) with features like:
//!  - Named asynchronous steps that read the accumulated state and return a new one.
//!  - Arbitrary-depth "go back": a step returning `StepOutcome::back()` re-invokes
//!    the previous step with the state it accepted, so prompts can be pre-filled.
//!  - Dynamic step insertion: a step can splice follow-up steps in right after
//!    itself, and they disappear again when the user backs out past it.
//!  - Declarative data-dependent branching with `BranchBuilder`.
//!  - Skip conditions, progress metadata ("Step 3 of 5") and transition hooks.
//!  - Prompt primitives (`Prompter`) with validation callbacks, plus a scripted
//!    prompter for tests.

pub mod branch;
pub mod core;
pub mod error;
pub mod mapper;
pub mod prompt;
pub mod wizard;

// --- Re-exports for the Public API ---

// Core types that users will interact with frequently
pub use crate::core::control::{WizardOutcome, WizardStatus};
pub use crate::core::state::{Progress, WizardState};
pub use crate::core::step::{SkipCondition, StepDef, StepOutcome};

// The controller and its hooks
pub use crate::wizard::definition::Wizard;
pub use crate::wizard::hooks::WizardEvent;

pub use crate::branch::builder::BranchBuilder;

pub use crate::mapper::{to_compact_json, ResultMapper};

pub use crate::prompt::{
  InputBoxOptions, Prompter, QuickPick, QuickPickItem, QuickPickOptions, ScriptedAnswer, ScriptedPrompter, Validator,
};

pub use crate::error::{StepFault, WizardError, WizardResult};

/*
    Core Workflow:
    1. Define a state struct `MyForm` whose fields are all optional answers.
    2. Create a `Wizard<MyForm, MyRequest>` with a result mapper
       `Fn(&WizardState<MyForm>) -> MyRequest` and an initial state.
    3. Add steps with `StepDef::new("name", |state| async move { ... })`:
       - prompt through a `Prompter`, pre-filling from `state.data`;
       - on `None` from the prompt, return `StepOutcome::back()`;
       - otherwise return `StepOutcome::next(state.update(|f| MyForm { answer, ..f }))`,
         or `StepOutcome::branch(..)` to splice in follow-up steps.
    4. `wizard.run().await` yields `Some(MyRequest)`, or `None` on cancel/failure;
       `wizard.run_outcome().await` tells cancel and failure apart.
*/
