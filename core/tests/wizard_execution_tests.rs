// tests/wizard_execution_tests.rs
mod common;

use common::*;
use serial_test::serial;
use std::sync::atomic::Ordering;
use wizflow::{StepDef, StepOutcome, Wizard, WizardError, WizardOutcome, WizardState, WizardStatus};

#[tokio::test]
async fn test_linear_wizard_runs_steps_in_order() {
  setup_tracing();
  let log = CallLog::default();
  let mut wizard = Wizard::<TestForm, TestForm>::new(|state: &WizardState<TestForm>| state.data.clone(), TestForm::default());
  wizard.add_step(accepting_step("step1", log.clone()));
  wizard.add_step(accepting_step("step2", log.clone()));
  wizard.add_step(accepting_step("step3", log.clone()));

  let result = wizard.run().await.expect("wizard should complete");

  assert_eq!(log.names(), vec!["step1", "step2", "step3"]);
  assert_eq!(result.counter, 3);
  assert_eq!(result.steps_seen, vec!["step1", "step2", "step3"]);
  assert_eq!(wizard.status(), WizardStatus::Completed);
}

#[tokio::test]
async fn test_progress_after_n_accepting_steps() {
  setup_tracing();
  for n in [1usize, 2, 5, 8] {
    let log = CallLog::default();
    let mut wizard = Wizard::<TestForm, usize>::with_default(|state: &WizardState<TestForm>| state.current_step);
    for _ in 0..n {
      wizard.add_step(accepting_step("step", log.clone()));
    }
    assert_eq!(wizard.initial_state().total_steps, n);

    let mapped_current_step = wizard.run().await.unwrap();
    let final_state = wizard.final_state().unwrap();
    assert_eq!(final_state.current_step, n + 1);
    assert_eq!(final_state.total_steps, n);
    assert_eq!(mapped_current_step, n + 1, "mapper must see the last produced state");
    assert_eq!(final_state.data.counter as usize, n);
  }
}

#[tokio::test]
async fn test_steps_observe_progress_in_state() {
  setup_tracing();
  let log = CallLog::default();
  let mut wizard = Wizard::<TestForm, ()>::with_default(|_: &WizardState<TestForm>| ());
  wizard.add_step(accepting_step("a", log.clone()));
  wizard.add_step(accepting_step("b", log.clone()));
  wizard.add_step(accepting_step("c", log.clone()));
  wizard.run().await.unwrap();

  let seen: Vec<(usize, usize)> = ["a", "b", "c"]
    .iter()
    .map(|name| {
      let state = &log.states_for(name)[0];
      (state.current_step, state.total_steps)
    })
    .collect();
  assert_eq!(seen, vec![(1, 3), (2, 3), (3, 3)]);
}

#[tokio::test]
async fn test_first_step_back_cancels_without_running_others() {
  setup_tracing();
  let log = CallLog::default();
  let mut wizard = Wizard::<TestForm, TestResult>::with_default(map_result);
  wizard.add_step(backing_step("first", log.clone()));
  wizard.add_step(accepting_step("second", log.clone()));

  assert_eq!(wizard.run().await, None);
  assert_eq!(log.names(), vec!["first"]);
  assert_eq!(wizard.status(), WizardStatus::Cancelled);
  assert!(wizard.final_state().is_none());
}

#[tokio::test]
async fn test_run_outcome_reports_cancel() {
  setup_tracing();
  let log = CallLog::default();
  let mut wizard = Wizard::<TestForm, TestResult>::with_default(map_result);
  wizard.add_step(backing_step("only", log.clone()));

  let outcome = wizard.run_outcome().await.unwrap();
  assert_eq!(outcome, WizardOutcome::Cancelled);
}

#[tokio::test]
async fn test_wizard_without_steps_completes_immediately() {
  setup_tracing();
  let mut wizard = Wizard::<TestForm, TestResult>::new(
    map_result,
    TestForm {
      name: Some("preset".to_string()),
      ..Default::default()
    },
  );
  let result = wizard.run().await.unwrap();
  assert_eq!(result.name.as_deref(), Some("preset"));
  assert_eq!(wizard.final_state().unwrap().current_step, 1);
}

#[tokio::test]
#[serial]
async fn test_result_mapper_runs_once_and_is_pure() {
  setup_tracing();
  reset_counters();
  let log = CallLog::default();
  let mut wizard = Wizard::<TestForm, TestResult>::with_default(|state: &WizardState<TestForm>| {
    MAPPER_EXEC_COUNTER.fetch_add(1, Ordering::SeqCst);
    map_result(state)
  });
  wizard.add_step(accepting_step("a", log.clone()));
  wizard.add_step(accepting_step("b", log.clone()));

  let result = wizard.run().await.unwrap();
  assert_eq!(MAPPER_EXEC_COUNTER.load(Ordering::SeqCst), 1);

  let final_state = wizard.final_state().unwrap();
  assert_eq!(wizard.map_result(&final_state), wizard.map_result(&final_state));
  assert_eq!(wizard.map_result(&final_state), result);
}

#[tokio::test]
async fn test_second_run_requires_reset() {
  setup_tracing();
  let log = CallLog::default();
  let mut wizard = Wizard::<TestForm, u32>::with_default(|state: &WizardState<TestForm>| state.data.counter);
  wizard.add_step(accepting_step("a", log.clone()));

  assert_eq!(wizard.run().await, Some(1));

  match wizard.run_outcome().await {
    Err(WizardError::SessionFinished { status, .. }) => assert_eq!(status, WizardStatus::Completed),
    other => panic!("Expected SessionFinished, got {:?}", other),
  }
  assert_eq!(wizard.run().await, None);
  assert_eq!(log.names(), vec!["a"]);

  wizard.reset();
  assert_eq!(wizard.status(), WizardStatus::Pending);
  assert!(wizard.final_state().is_none());
  assert_eq!(wizard.run().await, Some(1), "reset wizard starts again from the initial state");
  assert_eq!(log.names(), vec!["a", "a"]);
}

#[tokio::test]
async fn test_with_step_chaining_and_custom_error_type() {
  setup_tracing();
  let mut wizard = Wizard::<TestForm, Option<String>, TestError>::named(
    "chained",
    |state: &WizardState<TestForm>| state.data.name.clone(),
    TestForm::default(),
  )
  .with_step(StepDef::new("name", |state: WizardState<TestForm>| async move {
    let next = state.update(|form| TestForm {
      name: Some("api".to_string()),
      ..form
    });
    Ok::<_, TestError>(StepOutcome::next(next))
  }));

  assert_eq!(wizard.name(), "chained");
  assert_eq!(wizard.steps().len(), 1);
  assert_eq!(wizard.run().await, Some(Some("api".to_string())));
}
