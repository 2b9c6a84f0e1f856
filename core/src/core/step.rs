// wizflow/src/core/step.rs

//! Defines a single wizard step (`StepDef`) and what a step hands back to the
//! controller (`StepOutcome`).

use super::WizardState;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

/// Boxed future returned by a step handler.
pub type StepFuture<T, Err> = Pin<Box<dyn Future<Output = Result<StepOutcome<T, Err>, Err>> + Send>>;

/// Type alias for a step handler.
///
/// A handler takes ownership of the current `WizardState<T>` and resolves to a
/// `StepOutcome`. Returning `Err` is fatal to the whole wizard run; retries
/// (re-prompting on invalid input, refetching a listing) belong inside the
/// handler.
pub type StepHandler<T, Err> = Arc<dyn Fn(WizardState<T>) -> StepFuture<T, Err> + Send + Sync>;

/// Predicate evaluated on the arriving state. If true, the step is skipped.
pub type SkipCondition<T> = Arc<dyn Fn(&WizardState<T>) -> bool + Send + Sync + 'static>;

/// A named step of a wizard.
///
/// Steps are cheap to clone (the handler is shared) because every history
/// frame keeps its own copy of the step plan.
pub struct StepDef<T: 'static, Err: 'static> {
  pub name: String,
  pub skip_if: Option<SkipCondition<T>>,
  pub(crate) handler: StepHandler<T, Err>,
}

impl<T, Err> StepDef<T, Err>
where
  T: Send + Sync + 'static,
  Err: Send + 'static,
{
  /// Creates a step from an async handler.
  ///
  /// The handler may fail with any error convertible into the wizard's `Err`.
  pub fn new<F, Fut, E>(name: impl Into<String>, handler_fn: F) -> Self
  where
    F: Fn(WizardState<T>) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Result<StepOutcome<T, Err>, E>> + Send + 'static,
    E: Into<Err> + 'static,
  {
    let handler: StepHandler<T, Err> = Arc::new(move |state| {
      let user_fut = handler_fn(state);
      Box::pin(async move { user_fut.await.map_err(Into::into) })
    });
    Self {
      name: name.into(),
      skip_if: None,
      handler,
    }
  }

  /// Skips this step whenever `condition` holds for the state it would receive.
  pub fn skip_when(mut self, condition: impl Fn(&WizardState<T>) -> bool + Send + Sync + 'static) -> Self {
    self.skip_if = Some(Arc::new(condition));
    self
  }

  pub(crate) fn should_skip(&self, state: &WizardState<T>) -> bool {
    self.skip_if.as_ref().map_or(false, |condition| condition(state))
  }

  pub(crate) fn invoke(&self, state: WizardState<T>) -> StepFuture<T, Err> {
    (self.handler)(state)
  }
}

impl<T: 'static, Err: 'static> Clone for StepDef<T, Err> {
  fn clone(&self) -> Self {
    Self {
      name: self.name.clone(),
      skip_if: self.skip_if.clone(),
      handler: Arc::clone(&self.handler),
    }
  }
}

impl<T: 'static, Err: 'static> std::fmt::Debug for StepDef<T, Err> {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.debug_struct("StepDef")
      .field("name", &self.name)
      .field("skip_if_present", &self.skip_if.is_some())
      .finish()
  }
}

/// What a step hands back to the controller.
///
/// - `next_state: None` means the user backed out of the step.
/// - `next_steps` are spliced in right after the current step.
///
/// Steps should derive `next_state` from the state they received so that
/// `current_step` and `total_steps` stay consistent.
pub struct StepOutcome<T: 'static, Err: 'static> {
  pub next_state: Option<WizardState<T>>,
  pub next_steps: Vec<StepDef<T, Err>>,
}

impl<T: 'static, Err: 'static> StepOutcome<T, Err> {
  /// Accept `state` and move on.
  pub fn next(state: WizardState<T>) -> Self {
    Self {
      next_state: Some(state),
      next_steps: Vec::new(),
    }
  }

  /// Accept `state` and run `steps` immediately after this step.
  pub fn branch(state: WizardState<T>, steps: Vec<StepDef<T, Err>>) -> Self {
    Self {
      next_state: Some(state),
      next_steps: steps,
    }
  }

  /// Go back to the previous step.
  pub fn back() -> Self {
    Self {
      next_state: None,
      next_steps: Vec::new(),
    }
  }

  pub fn is_back(&self) -> bool {
    self.next_state.is_none()
  }
}

impl<T: std::fmt::Debug + 'static, Err: 'static> std::fmt::Debug for StepOutcome<T, Err> {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.debug_struct("StepOutcome")
      .field("next_state", &self.next_state)
      .field("next_steps", &self.next_steps)
      .finish()
  }
}
