// wizflow/src/core/control.rs

//! Defines the lifecycle status of a wizard and the outcome of a wizard run.

/// Lifecycle of a `Wizard`.
///
/// `Completed` and `Cancelled` are terminal: a finished wizard only runs again
/// after `Wizard::reset`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WizardStatus {
  /// Not yet run (or reset since the last run).
  Pending,
  /// A run is in progress, or a run future was dropped before it settled.
  Running,
  /// The step plan was exhausted and the result mapper produced a value.
  Completed,
  /// The user backed out of the first step, or a step failed.
  Cancelled,
}

impl WizardStatus {
  pub fn is_terminal(self) -> bool {
    matches!(self, WizardStatus::Completed | WizardStatus::Cancelled)
  }
}

/// Outcome of a full wizard run that did not fail.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WizardOutcome<R> {
  /// Every step accepted a state; carries the mapped result.
  Completed(R),
  /// The user backed out of the outermost step.
  Cancelled,
}

impl<R> WizardOutcome<R> {
  /// The mapped result, if the run completed.
  pub fn into_result(self) -> Option<R> {
    match self {
      WizardOutcome::Completed(result) => Some(result),
      WizardOutcome::Cancelled => None,
    }
  }

  pub fn is_completed(&self) -> bool {
    matches!(self, WizardOutcome::Completed(_))
  }
}
