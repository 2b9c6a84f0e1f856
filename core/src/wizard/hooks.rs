// wizflow/src/wizard/hooks.rs

//! Transition hooks: synchronous observers notified as a wizard moves
//! forward, backward, skips a step or terminates. Typical consumers are
//! progress indicators and audit logs; listeners cannot alter control flow.

use crate::core::state::Progress;
use crate::error::WizardError;
use crate::wizard::definition::Wizard;
use tracing::{event, Level};

/// A transition observed during a wizard run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WizardEvent {
  Started {
    progress: Progress,
  },
  /// `step` accepted a state; `progress` is the progress of the next step.
  Advanced {
    step: String,
    progress: Progress,
    inserted: usize,
  },
  /// The user backed out; `step` is the step about to be re-invoked.
  Rewound {
    step: String,
    progress: Progress,
  },
  Skipped {
    step: String,
  },
  Completed {
    progress: Progress,
  },
  Cancelled,
  Failed {
    step: String,
    message: String,
  },
}

pub type EventListener = Box<dyn Fn(&WizardEvent) + Send + Sync>;

impl<T, R, Err> Wizard<T, R, Err>
where
  T: Clone + Send + Sync + 'static,
  R: 'static,
  Err: std::error::Error + From<WizardError> + Send + Sync + 'static,
{
  /// Registers a listener called for every transition, in registration order.
  pub fn on_event(&mut self, listener: impl Fn(&WizardEvent) + Send + Sync + 'static) {
    self.listeners.push(Box::new(listener));
    event!(Level::DEBUG, wizard = %self.name, listeners = self.listeners.len(), "Event listener registered.");
  }

  pub(crate) fn emit(&self, wizard_event: WizardEvent) {
    event!(Level::TRACE, wizard = %self.name, wizard_event = ?wizard_event, "Dispatching wizard event.");
    for listener in &self.listeners {
      listener(&wizard_event);
    }
  }
}
