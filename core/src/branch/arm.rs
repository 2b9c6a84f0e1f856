// wizflow/src/branch/arm.rs

//! One arm of a branching step: a condition on the accepted state paired
//! with the follow-up steps to insert when it holds.

use crate::core::state::WizardState;
use crate::core::step::StepDef;
use std::sync::Arc;

pub(crate) type BranchCondition<T> = Arc<dyn Fn(&WizardState<T>) -> bool + Send + Sync + 'static>;

pub(crate) type StepFactory<T, Err> = Arc<dyn Fn(&WizardState<T>) -> Vec<StepDef<T, Err>> + Send + Sync + 'static>;

/// Where an arm's follow-up steps come from.
pub(crate) enum FollowUps<T: 'static, Err: 'static> {
  /// A fixed list, cloned (cheaply) each time the arm is taken.
  Fixed(Arc<Vec<StepDef<T, Err>>>),
  /// Built from the accepted state each time the arm is taken.
  Built(StepFactory<T, Err>),
}

impl<T: 'static, Err: 'static> FollowUps<T, Err> {
  pub(crate) fn resolve(&self, state: &WizardState<T>) -> Vec<StepDef<T, Err>> {
    match self {
      FollowUps::Fixed(steps) => Vec::clone(steps),
      FollowUps::Built(factory) => factory(state),
    }
  }
}

impl<T: 'static, Err: 'static> Clone for FollowUps<T, Err> {
  fn clone(&self) -> Self {
    match self {
      FollowUps::Fixed(steps) => FollowUps::Fixed(Arc::clone(steps)),
      FollowUps::Built(factory) => FollowUps::Built(Arc::clone(factory)),
    }
  }
}

pub(crate) struct BranchArm<T: 'static, Err: 'static> {
  condition: BranchCondition<T>,
  follow_ups: FollowUps<T, Err>,
}

impl<T: 'static, Err: 'static> BranchArm<T, Err> {
  pub(crate) fn new(condition: BranchCondition<T>, follow_ups: FollowUps<T, Err>) -> Self {
    Self { condition, follow_ups }
  }

  pub(crate) fn matches(&self, state: &WizardState<T>) -> bool {
    (self.condition)(state)
  }

  pub(crate) fn follow_ups(&self, state: &WizardState<T>) -> Vec<StepDef<T, Err>> {
    self.follow_ups.resolve(state)
  }
}
