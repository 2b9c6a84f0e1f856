// wizflow/src/core/state.rs

//! Defines `WizardState<T>`: the domain state of a wizard plus the progress
//! metadata that steps read for their prompt titles.

use crate::error::StepFault;
use std::fmt;

/// Progress of a wizard, as shown in prompt titles ("Step 3 of 5").
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Progress {
  pub current: usize,
  pub total: usize,
}

impl fmt::Display for Progress {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "Step {} of {}", self.current, self.total)
  }
}

/// The accumulated state handed from step to step.
///
/// A state is never mutated in place by the controller: a step consumes the
/// state it receives and returns a new one (see [`WizardState::update`]), and
/// backtracking restores an older copy from history.
///
/// `current_step` is 1-based. `current_step <= total_steps` holds while a
/// wizard is active, but it is informational only and not enforced.
#[derive(Debug, Clone, PartialEq)]
pub struct WizardState<T> {
  pub data: T,
  pub current_step: usize,
  pub total_steps: usize,
  /// Set by a step to report a fault. The controller raises it as
  /// `WizardError::StepFault`, ending the run.
  pub error: Option<StepFault>,
}

impl<T> WizardState<T> {
  pub fn new(data: T) -> Self {
    Self {
      data,
      current_step: 1,
      total_steps: 0,
      error: None,
    }
  }

  /// Returns the state with its domain data replaced by `f(data)`.
  /// Progress metadata and any recorded fault are carried over.
  pub fn update(self, f: impl FnOnce(T) -> T) -> Self {
    Self {
      data: f(self.data),
      ..self
    }
  }

  /// Returns the state with `error` set.
  pub fn with_error(self, fault: StepFault) -> Self {
    Self {
      error: Some(fault),
      ..self
    }
  }

  pub fn progress(&self) -> Progress {
    Progress {
      current: self.current_step,
      total: self.total_steps,
    }
  }

  /// Prompt title decorated with progress, e.g. `"Create service (Step 2 of 4)"`.
  pub fn title(&self, base: &str) -> String {
    format!("{} ({})", base, self.progress())
  }
}

impl<T: Default> Default for WizardState<T> {
  fn default() -> Self {
    Self::new(T::default())
  }
}

impl<T> From<T> for WizardState<T> {
  fn from(data: T) -> Self {
    Self::new(data)
  }
}
