// tests/hooks_tests.rs
mod common;

use common::*;
use parking_lot::Mutex;
use std::sync::Arc;
use wizflow::{Progress, Wizard, WizardEvent, WizardState};

fn progress(current: usize, total: usize) -> Progress {
  Progress { current, total }
}

fn recording(wizard: &mut Wizard<TestForm, TestResult>) -> Arc<Mutex<Vec<WizardEvent>>> {
  let events = Arc::new(Mutex::new(Vec::new()));
  let sink = events.clone();
  wizard.on_event(move |event| sink.lock().push(event.clone()));
  events
}

#[tokio::test]
async fn test_events_for_forward_and_backward_moves() {
  setup_tracing();
  let log = CallLog::default();
  let mut wizard = Wizard::<TestForm, TestResult>::with_default(map_result);
  wizard.add_step(accepting_step("name", log.clone()));
  wizard.add_step(scripted_step("port", log.clone(), vec![false]));
  let events = recording(&mut wizard);

  wizard.run().await.unwrap();
  assert_eq!(
    *events.lock(),
    vec![
      WizardEvent::Started { progress: progress(1, 2) },
      WizardEvent::Advanced {
        step: "name".to_string(),
        progress: progress(2, 2),
        inserted: 0,
      },
      WizardEvent::Rewound {
        step: "name".to_string(),
        progress: progress(1, 2),
      },
      WizardEvent::Advanced {
        step: "name".to_string(),
        progress: progress(2, 2),
        inserted: 0,
      },
      WizardEvent::Advanced {
        step: "port".to_string(),
        progress: progress(3, 2),
        inserted: 0,
      },
      WizardEvent::Completed { progress: progress(3, 2) },
    ]
  );
}

#[tokio::test]
async fn test_events_for_skip_and_cancel() {
  setup_tracing();
  let log = CallLog::default();
  let mut wizard = Wizard::<TestForm, TestResult>::with_default(map_result);
  wizard.add_step(accepting_step("hidden", log.clone()).skip_when(|_: &WizardState<TestForm>| true));
  wizard.add_step(backing_step("name", log.clone()));
  let events = recording(&mut wizard);

  assert_eq!(wizard.run().await, None);
  assert_eq!(
    *events.lock(),
    vec![
      WizardEvent::Started { progress: progress(1, 2) },
      WizardEvent::Skipped {
        step: "hidden".to_string()
      },
      WizardEvent::Cancelled,
    ]
  );
}

#[tokio::test]
async fn test_listeners_called_in_registration_order() {
  setup_tracing();
  let calls = Arc::new(Mutex::new(Vec::new()));
  let mut wizard = Wizard::<TestForm, TestResult>::with_default(map_result);
  for id in 0..3 {
    let calls = calls.clone();
    wizard.on_event(move |event| {
      if matches!(event, WizardEvent::Completed { .. }) {
        calls.lock().push(id);
      }
    });
  }

  wizard.run().await.unwrap();
  assert_eq!(*calls.lock(), vec![0, 1, 2]);
}
