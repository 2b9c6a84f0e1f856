// demos/app_runner/src/errors.rs

use thiserror::Error;
use wizflow::WizardError;

#[derive(Debug, Error)]
pub enum AppError {
  #[error("Configuration Error: {0}")]
  Config(String),

  #[error("Catalog Error: {0}")]
  Catalog(String),

  #[error("Wizard Error: {source}")]
  Wizard {
    #[from] // Engine failures reach the app through the wizard's error type
    source: WizardError,
  },

  #[error("Step Error: {0}")]
  Step(anyhow::Error),

  #[error("Serialization Error: {0}")]
  Serialization(#[from] serde_json::Error),
}

// Prompters and catalog calls return anyhow::Result; steps use `?` on them.
impl From<anyhow::Error> for AppError {
  fn from(err: anyhow::Error) -> Self {
    match err.downcast::<AppError>() {
      Ok(app_err) => app_err,
      Err(err) => match err.downcast::<WizardError>() {
        Ok(wizard_err) => AppError::Wizard { source: wizard_err },
        Err(err) => AppError::Step(err),
      },
    }
  }
}

pub type Result<T, E = AppError> = std::result::Result<T, E>;
