// wizflow/src/wizard/history.rs

//! Session bookkeeping for a single wizard run.
//!
//! Every accepted state is recorded as a `Frame` together with the step plan
//! and cursor in force when it was accepted. Splicing dynamic steps creates a
//! new plan for the following frame only, so rewinding to an older frame
//! drops an abandoned branch's steps and restores the matching `total_steps`
//! in one move.

use crate::core::state::WizardState;
use crate::core::step::StepDef;
use std::sync::Arc;

pub(crate) type Plan<T, Err> = Arc<Vec<StepDef<T, Err>>>;

pub(crate) struct Frame<T: 'static, Err: 'static> {
  pub(crate) state: WizardState<T>,
  pub(crate) plan: Plan<T, Err>,
  pub(crate) cursor: usize,
  /// True when the frame was restored by a rewind. Skip conditions are only
  /// evaluated on forward arrival.
  pub(crate) revisit: bool,
}

pub(crate) struct Session<T: 'static, Err: 'static> {
  current: Frame<T, Err>,
  history: Vec<Frame<T, Err>>,
}

impl<T, Err> Session<T, Err>
where
  T: Clone + 'static,
  Err: 'static,
{
  pub(crate) fn start(initial_state: WizardState<T>, steps: Vec<StepDef<T, Err>>) -> Self {
    Self {
      current: Frame {
        state: initial_state,
        plan: Arc::new(steps),
        cursor: 0,
        revisit: false,
      },
      history: Vec::new(),
    }
  }

  /// The step at the cursor, or `None` once the plan is exhausted.
  pub(crate) fn current_step(&self) -> Option<&StepDef<T, Err>> {
    self.current.plan.get(self.current.cursor)
  }

  pub(crate) fn state(&self) -> &WizardState<T> {
    &self.current.state
  }

  pub(crate) fn cursor(&self) -> usize {
    self.current.cursor
  }

  pub(crate) fn plan_len(&self) -> usize {
    self.current.plan.len()
  }

  pub(crate) fn is_revisit(&self) -> bool {
    self.current.revisit
  }

  pub(crate) fn depth(&self) -> usize {
    self.history.len()
  }

  /// Moves past the step at the cursor without invoking it.
  pub(crate) fn skip(&mut self) {
    self.current.cursor += 1;
    self.current.state.total_steps = self.current.state.total_steps.saturating_sub(1);
    self.current.revisit = false;
  }

  /// Records `accepted` as the outcome of the step at the cursor and moves to
  /// the next step, splicing `next_steps` right after the current one.
  ///
  /// Returns the number of inserted steps.
  pub(crate) fn advance(&mut self, accepted: WizardState<T>, next_steps: Vec<StepDef<T, Err>>) -> usize {
    let inserted = next_steps.len();
    let next_cursor = self.current.cursor + 1;

    let plan = if inserted == 0 {
      Arc::clone(&self.current.plan)
    } else {
      let mut spliced = Vec::clone(&self.current.plan);
      spliced.splice(next_cursor..next_cursor, next_steps);
      Arc::new(spliced)
    };

    let mut state = accepted.clone();
    state.current_step += 1;
    state.total_steps += inserted;

    let next = Frame {
      state,
      plan,
      cursor: next_cursor,
      revisit: false,
    };
    let mut previous = std::mem::replace(&mut self.current, next);
    // Restoring this frame re-invokes the same step with what it accepted.
    previous.state = accepted;
    previous.revisit = true;
    self.history.push(previous);
    inserted
  }

  /// Restores the most recent frame. Returns false when there is nothing to
  /// rewind to (the user backed out of the first step).
  pub(crate) fn rewind(&mut self) -> bool {
    match self.history.pop() {
      Some(frame) => {
        self.current = frame;
        true
      }
      None => false,
    }
  }

  pub(crate) fn into_state(self) -> WizardState<T> {
    self.current.state
  }
}
