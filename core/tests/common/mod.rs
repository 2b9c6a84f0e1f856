// tests/common/mod.rs
#![allow(dead_code)] // Allow unused code in this common test module

use once_cell::sync::Lazy;
use parking_lot::Mutex;
use std::sync::{
  atomic::{AtomicUsize, Ordering},
  Arc,
};
use tracing::Level;
use wizflow::{StepDef, StepOutcome, WizardError, WizardState};

// --- Common State Structs ---
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TestForm {
  pub name: Option<String>,
  pub port: Option<u16>,
  pub confirmed: bool,
  pub source: Option<String>,
  pub steps_seen: Vec<String>,
  pub counter: u32,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TestResult {
  pub name: Option<String>,
  pub port: Option<u16>,
  pub confirmed: bool,
}

pub fn map_result(state: &WizardState<TestForm>) -> TestResult {
  TestResult {
    name: state.data.name.clone(),
    port: state.data.port,
    confirmed: state.data.confirmed,
  }
}

// --- Common Error Type for Tests ---
#[derive(Debug, thiserror::Error)]
pub enum TestError {
  #[error("Wizard framework error: {0}")]
  Wizard(#[from] WizardError),

  #[error("Test step failed: {0}")]
  Step(String),
}

// --- Call log shared between a test and its steps ---

/// Records (step name, state received) for every invocation.
#[derive(Clone, Default)]
pub struct CallLog(Arc<Mutex<Vec<(String, WizardState<TestForm>)>>>);

impl CallLog {
  pub fn record(&self, step: &str, state: &WizardState<TestForm>) {
    self.0.lock().push((step.to_string(), state.clone()));
  }

  pub fn names(&self) -> Vec<String> {
    self.0.lock().iter().map(|(name, _)| name.clone()).collect()
  }

  pub fn states_for(&self, step: &str) -> Vec<WizardState<TestForm>> {
    self
      .0
      .lock()
      .iter()
      .filter(|(name, _)| name == step)
      .map(|(_, state)| state.clone())
      .collect()
  }
}

// --- Common Step Creators ---

/// A step that always accepts, incrementing `counter` and appending its name.
pub fn accepting_step(name: &'static str, log: CallLog) -> StepDef<TestForm, WizardError> {
  StepDef::new(name, move |state: WizardState<TestForm>| {
    let log = log.clone();
    async move {
      log.record(name, &state);
      let next = state.update(|form| {
        let mut steps_seen = form.steps_seen;
        steps_seen.push(name.to_string());
        TestForm {
          counter: form.counter + 1,
          steps_seen,
          ..form
        }
      });
      Ok::<_, WizardError>(StepOutcome::next(next))
    }
  })
}

/// A step that follows a script: each invocation pops the next verdict
/// (`true` accepts, `false` backs out). Accepts once the script is exhausted.
pub fn scripted_step(name: &'static str, log: CallLog, verdicts: Vec<bool>) -> StepDef<TestForm, WizardError> {
  let verdicts = Arc::new(Mutex::new(verdicts.into_iter().collect::<std::collections::VecDeque<_>>()));
  StepDef::new(name, move |state: WizardState<TestForm>| {
    let log = log.clone();
    let verdicts = verdicts.clone();
    async move {
      log.record(name, &state);
      let accept = verdicts.lock().pop_front().unwrap_or(true);
      if !accept {
        return Ok::<_, WizardError>(StepOutcome::back());
      }
      let next = state.update(|form| {
        let mut steps_seen = form.steps_seen;
        steps_seen.push(name.to_string());
        TestForm {
          counter: form.counter + 1,
          steps_seen,
          ..form
        }
      });
      Ok(StepOutcome::next(next))
    }
  })
}

/// A step that always backs out.
pub fn backing_step(name: &'static str, log: CallLog) -> StepDef<TestForm, WizardError> {
  StepDef::new(name, move |state: WizardState<TestForm>| {
    let log = log.clone();
    async move {
      log.record(name, &state);
      Ok::<_, WizardError>(StepOutcome::back())
    }
  })
}

// --- Helper for Tracing Setup (call once per test run if needed) ---
static TRACING_INIT: Lazy<()> = Lazy::new(|| {
  tracing_subscriber::fmt()
    .with_max_level(Level::DEBUG)
    .with_test_writer() // Important for tests to capture output
    .try_init()
    .ok(); // Allow multiple initializations in tests (ok if fails)
});

pub fn setup_tracing() {
  Lazy::force(&TRACING_INIT);
}

// --- Atomic counters for checking execution counts ---
pub static STEP_EXEC_COUNTER: Lazy<Arc<AtomicUsize>> = Lazy::new(|| Arc::new(AtomicUsize::new(0)));
pub static MAPPER_EXEC_COUNTER: Lazy<Arc<AtomicUsize>> = Lazy::new(|| Arc::new(AtomicUsize::new(0)));

pub fn reset_counters() {
  STEP_EXEC_COUNTER.store(0, Ordering::SeqCst);
  MAPPER_EXEC_COUNTER.store(0, Ordering::SeqCst);
}
