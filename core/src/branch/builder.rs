// wizflow/src/branch/builder.rs

//! Implements the fluent builder (`BranchBuilder`) for data-dependent
//! branching: a step whose accepted state selects which follow-up steps are
//! spliced in after it.

use crate::branch::arm::{BranchArm, FollowUps};
use crate::core::state::WizardState;
use crate::core::step::{StepDef, StepHandler, StepOutcome};
use std::sync::Arc;
use tracing::{event, instrument, Level};

/// Builder wrapping a step with conditional follow-up steps.
///
/// Arms are checked in insertion order against the state the wrapped step
/// accepted; the first match wins. The matched arm's steps are appended to
/// any `next_steps` the wrapped step produced itself. A back from the wrapped
/// step passes through untouched.
///
/// ```ignore
/// let source = BranchBuilder::new(pick_source_step)
///   .when(|s| s.data.source == Some(Source::Ecr), vec![image_step, port_step])
///   .when(|s| s.data.source == Some(Source::Repository), vec![repository_step])
///   .build();
/// wizard.add_step(source);
/// ```
pub struct BranchBuilder<T: 'static, Err: 'static> {
  step: StepDef<T, Err>,
  arms: Vec<BranchArm<T, Err>>,
  fallback: Option<FollowUps<T, Err>>,
}

impl<T, Err> BranchBuilder<T, Err>
where
  T: Send + Sync + 'static,
  Err: Send + 'static,
{
  pub fn new(step: StepDef<T, Err>) -> Self {
    Self {
      step,
      arms: Vec::new(),
      fallback: None,
    }
  }

  /// Adds an arm with a fixed list of follow-up steps.
  pub fn when(
    mut self,
    condition: impl Fn(&WizardState<T>) -> bool + Send + Sync + 'static,
    steps: Vec<StepDef<T, Err>>,
  ) -> Self {
    self.arms.push(BranchArm::new(Arc::new(condition), FollowUps::Fixed(Arc::new(steps))));
    self
  }

  /// Adds an arm whose follow-up steps are built from the accepted state.
  pub fn when_with(
    mut self,
    condition: impl Fn(&WizardState<T>) -> bool + Send + Sync + 'static,
    factory: impl Fn(&WizardState<T>) -> Vec<StepDef<T, Err>> + Send + Sync + 'static,
  ) -> Self {
    self.arms.push(BranchArm::new(Arc::new(condition), FollowUps::Built(Arc::new(factory))));
    self
  }

  /// Follow-up steps used when no arm matches. Without it, nothing is inserted.
  pub fn otherwise(mut self, steps: Vec<StepDef<T, Err>>) -> Self {
    self.fallback = Some(FollowUps::Fixed(Arc::new(steps)));
    self
  }

  #[instrument(
        name = "BranchBuilder::build",
        skip_all,
        fields(step_name = %self.step.name, num_arms = self.arms.len())
    )]
  pub fn build(self) -> StepDef<T, Err> {
    let step_name = self.step.name.clone();
    let inner = self.step.handler.clone();
    let arms = Arc::new(self.arms);
    let fallback = self.fallback;

    let handler: StepHandler<T, Err> = Arc::new(move |state: WizardState<T>| {
      let inner_fut = inner(state);
      let arms = Arc::clone(&arms);
      let fallback = fallback.clone();
      let step_name = step_name.clone();

      Box::pin(async move {
        let outcome = match inner_fut.await {
          Ok(outcome) => outcome,
          Err(e) => return Err(e),
        };
        let Some(accepted) = outcome.next_state else {
          return Ok(StepOutcome::back());
        };

        let mut next_steps = outcome.next_steps;
        match arms.iter().position(|arm| arm.matches(&accepted)) {
          Some(arm_index) => {
            let follow_ups = arms[arm_index].follow_ups(&accepted);
            event!(Level::DEBUG, %step_name, arm_index, follow_ups = follow_ups.len(), "Branch arm matched.");
            next_steps.extend(follow_ups);
          }
          None => {
            if let Some(fallback) = &fallback {
              let follow_ups = fallback.resolve(&accepted);
              event!(Level::DEBUG, %step_name, follow_ups = follow_ups.len(), "No branch arm matched; using fallback steps.");
              next_steps.extend(follow_ups);
            } else {
              event!(Level::DEBUG, %step_name, "No branch arm matched; nothing inserted.");
            }
          }
        }
        Ok(StepOutcome::branch(accepted, next_steps))
      })
    });

    event!(Level::DEBUG, "Branching step built.");
    StepDef {
      name: self.step.name,
      skip_if: self.step.skip_if,
      handler,
    }
  }
}
