// wizflow/src/wizard/definition.rs

//! Contains the `Wizard<T, R, Err>` struct definition and the methods for its
//! construction, static step list and post-run inspection.

use crate::core::control::WizardStatus;
use crate::core::state::WizardState;
use crate::core::step::StepDef;
use crate::error::WizardError;
use crate::mapper::ResultMapper;
use crate::wizard::hooks::EventListener;
use tracing::{event, Level};

/// A multi-step wizard.
///
/// `T` is the domain state accumulated by the steps, `R` the result produced by
/// the result mapper once every step has accepted a state, and `Err` the error
/// type returned by step handlers.
///
/// `Err` must be `From<WizardError>` so that engine-level failures (a step
/// fault recorded in state, a run requested on a finished wizard) can be
/// reported through the same channel as step errors.
pub struct Wizard<T, R, Err = WizardError>
where
  T: Clone + Send + Sync + 'static,
  R: 'static,
  Err: std::error::Error + From<WizardError> + Send + Sync + 'static,
{
  pub(crate) name: String,
  /// The static step list. Dynamic steps never land here; they live in the
  /// per-frame plans of a running session.
  pub(crate) steps: Vec<StepDef<T, Err>>,
  pub(crate) initial_state: WizardState<T>,
  pub(crate) result_mapper: Box<dyn ResultMapper<T, R>>,
  pub(crate) listeners: Vec<EventListener>,
  pub(crate) final_state: Option<WizardState<T>>,
  pub(crate) status: WizardStatus,
}

impl<T, R, Err> Wizard<T, R, Err>
where
  T: Clone + Send + Sync + 'static,
  R: 'static,
  Err: std::error::Error + From<WizardError> + Send + Sync + 'static,
{
  /// Creates a wizard with a result mapper and an initial state.
  ///
  /// A bare `T` is accepted as the initial state and starts at step 1 of 0.
  pub fn new(result_mapper: impl ResultMapper<T, R> + 'static, initial_state: impl Into<WizardState<T>>) -> Self {
    Self::named("wizard", result_mapper, initial_state)
  }

  /// Like [`Wizard::new`], with a name used in logs, events and errors.
  pub fn named(
    name: impl Into<String>,
    result_mapper: impl ResultMapper<T, R> + 'static,
    initial_state: impl Into<WizardState<T>>,
  ) -> Self {
    Self {
      name: name.into(),
      steps: Vec::new(),
      initial_state: initial_state.into(),
      result_mapper: Box::new(result_mapper),
      listeners: Vec::new(),
      final_state: None,
      status: WizardStatus::Pending,
    }
  }

  /// Creates a wizard starting from `T::default()`.
  pub fn with_default(result_mapper: impl ResultMapper<T, R> + 'static) -> Self
  where
    T: Default,
  {
    Self::new(result_mapper, WizardState::<T>::default())
  }

  /// Appends a step to the static step list and counts it in `total_steps`.
  pub fn add_step(&mut self, step: StepDef<T, Err>) {
    if self.status != WizardStatus::Pending {
      event!(Level::WARN, wizard = %self.name, step_name = %step.name, status = ?self.status,
        "Step added to a wizard that already ran; it takes effect after reset().");
    }
    event!(Level::TRACE, wizard = %self.name, step_name = %step.name, "Step added.");
    self.steps.push(step);
    self.initial_state.total_steps += 1;
  }

  /// Chaining form of [`Wizard::add_step`].
  pub fn with_step(mut self, step: StepDef<T, Err>) -> Self {
    self.add_step(step);
    self
  }

  pub fn add_steps(&mut self, steps: impl IntoIterator<Item = StepDef<T, Err>>) {
    for step in steps {
      self.add_step(step);
    }
  }

  pub fn name(&self) -> &str {
    &self.name
  }

  pub fn status(&self) -> WizardStatus {
    self.status
  }

  pub fn steps(&self) -> &[StepDef<T, Err>] {
    &self.steps
  }

  pub fn initial_state(&self) -> &WizardState<T> {
    &self.initial_state
  }

  /// A copy of the last accepted state of a completed run.
  ///
  /// `None` before the wizard completes, after a cancelled run, and after
  /// `reset()`.
  pub fn final_state(&self) -> Option<WizardState<T>> {
    self.final_state.clone()
  }

  /// Applies the result mapper to `state`.
  pub fn map_result(&self, state: &WizardState<T>) -> R {
    self.result_mapper.map(state)
  }

  /// Rewinds the wizard so it can be run again from its initial state.
  pub fn reset(&mut self) {
    event!(Level::DEBUG, wizard = %self.name, previous_status = ?self.status, "Wizard reset.");
    self.final_state = None;
    self.status = WizardStatus::Pending;
  }
}

impl<T, R, Err> std::fmt::Debug for Wizard<T, R, Err>
where
  T: Clone + Send + Sync + std::fmt::Debug + 'static,
  R: 'static,
  Err: std::error::Error + From<WizardError> + Send + Sync + 'static,
{
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.debug_struct("Wizard")
      .field("name", &self.name)
      .field("steps", &self.steps)
      .field("initial_state", &self.initial_state)
      .field("status", &self.status)
      .field("listeners", &self.listeners.len())
      .finish()
  }
}
