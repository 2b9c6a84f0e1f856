// wizflow/src/error.rs
use anyhow::Error as AnyhowError;
use std::fmt;
use std::sync::Arc;
use thiserror::Error;

use crate::core::control::WizardStatus;

/// A fault recorded by a step in `WizardState::error`.
///
/// Wraps the underlying `anyhow::Error` in an `Arc` so that states carrying a
/// fault stay `Clone` (history snapshots are copies). Two faults compare equal
/// when their messages are equal.
#[derive(Clone)]
pub struct StepFault(Arc<AnyhowError>);

impl StepFault {
  pub fn new(err: impl Into<AnyhowError>) -> Self {
    StepFault(Arc::new(err.into()))
  }

  pub fn msg(message: impl fmt::Display + fmt::Debug + Send + Sync + 'static) -> Self {
    StepFault(Arc::new(AnyhowError::msg(message)))
  }

  /// The wrapped error.
  pub fn inner(&self) -> &AnyhowError {
    &self.0
  }
}

impl fmt::Display for StepFault {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    fmt::Display::fmt(&*self.0, f)
  }
}

impl fmt::Debug for StepFault {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_tuple("StepFault").field(&self.0.to_string()).finish()
  }
}

impl std::error::Error for StepFault {
  fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
    let inner: &(dyn std::error::Error + Send + Sync + 'static) = &**self.0;
    inner.source()
  }
}

impl PartialEq for StepFault {
  fn eq(&self, other: &Self) -> bool {
    Arc::ptr_eq(&self.0, &other.0) || self.0.to_string() == other.0.to_string()
  }
}

impl Eq for StepFault {}

#[derive(Debug, Error)]
pub enum WizardError {
  #[error("Step '{step_name}' reported a fault: {source}")]
  StepFault {
    step_name: String,
    #[source]
    source: StepFault,
  },

  #[error("Error in user-provided step or external operation. Source: {source}")]
  StepError {
    #[source]
    source: AnyhowError,
  },

  #[error("Wizard '{wizard}' has already finished ({status:?}); call reset() before running it again")]
  SessionFinished { wizard: String, status: WizardStatus },

  #[error("Internal wizard error: {0}")]
  Internal(String),
}

impl From<AnyhowError> for WizardError {
  fn from(err: AnyhowError) -> Self {
    match err.downcast::<WizardError>() {
      Ok(wizard_err) => wizard_err,
      Err(other) => WizardError::StepError { source: other },
    }
  }
}

pub type WizardResult<T, E = WizardError> = std::result::Result<T, E>;
