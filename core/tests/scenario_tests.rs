// tests/scenario_tests.rs
//
// End-to-end runs of a small "create service" wizard driven by a scripted
// prompter: name -> port -> confirm.
mod common;

use common::*;
use std::sync::Arc;
use wizflow::prompt::PromptKind;
use wizflow::{
  InputBoxOptions, Prompter, QuickPick, ScriptedAnswer, ScriptedPrompter, StepDef, StepOutcome, Wizard,
  WizardError, WizardState,
};

fn validate_name(input: &str) -> Option<String> {
  input.trim().is_empty().then(|| "Service name is required".to_string())
}

fn validate_port(input: &str) -> Option<String> {
  match input.parse::<u16>() {
    Ok(port) if port > 0 => None,
    _ => Some("Port must be a number between 1 and 65535".to_string()),
  }
}

fn name_step(prompter: Arc<ScriptedPrompter>) -> StepDef<TestForm, WizardError> {
  StepDef::new("name", move |state: WizardState<TestForm>| {
    let prompter = prompter.clone();
    async move {
      let options = InputBoxOptions::new(state.title("Service name"))
        .value(state.data.name.clone())
        .validate_with(validate_name);
      let Some(name) = prompter.input_box(options).await? else {
        return Ok::<_, WizardError>(StepOutcome::back());
      };
      Ok(StepOutcome::next(state.update(|form| TestForm {
        name: Some(name),
        ..form
      })))
    }
  })
}

fn port_step(prompter: Arc<ScriptedPrompter>) -> StepDef<TestForm, WizardError> {
  StepDef::new("port", move |state: WizardState<TestForm>| {
    let prompter = prompter.clone();
    async move {
      let options = InputBoxOptions::new(state.title("Port"))
        .value(state.data.port.map(|port| port.to_string()))
        .validate_with(validate_port);
      let Some(port) = prompter.input_box(options).await? else {
        return Ok::<_, WizardError>(StepOutcome::back());
      };
      let port = port.parse::<u16>().map_err(anyhow::Error::from)?;
      Ok(StepOutcome::next(state.update(|form| TestForm {
        port: Some(port),
        ..form
      })))
    }
  })
}

fn confirm_step(prompter: Arc<ScriptedPrompter>) -> StepDef<TestForm, WizardError> {
  StepDef::new("confirm", move |state: WizardState<TestForm>| {
    let prompter = prompter.clone();
    async move {
      let confirmed = state.data.confirmed;
      let pick = QuickPick::new(state.title("Confirm"))
        .items([("Yes", true), ("No", false)])
        .preselect(|value| *value == confirmed);
      let Some(confirmed) = pick.prompt(prompter.as_ref()).await? else {
        return Ok::<_, WizardError>(StepOutcome::back());
      };
      Ok(StepOutcome::next(state.update(|form| TestForm { confirmed, ..form })))
    }
  })
}

fn service_wizard(prompter: &Arc<ScriptedPrompter>) -> Wizard<TestForm, TestResult> {
  Wizard::named("create-service", map_result, TestForm::default())
    .with_step(name_step(prompter.clone()))
    .with_step(port_step(prompter.clone()))
    .with_step(confirm_step(prompter.clone()))
}

#[tokio::test]
async fn test_straight_through_run() {
  setup_tracing();
  let prompter = Arc::new(ScriptedPrompter::new().input("api").input("8080").pick_label("Yes"));
  let mut wizard = service_wizard(&prompter);

  let result = wizard.run().await.unwrap();
  assert_eq!(
    result,
    TestResult {
      name: Some("api".to_string()),
      port: Some(8080),
      confirmed: true,
    }
  );
  assert_eq!(
    prompter.titles(),
    vec!["Service name (Step 1 of 3)", "Port (Step 2 of 3)", "Confirm (Step 3 of 3)"]
  );
  assert_eq!(wizard.final_state().unwrap().current_step, 4);
  assert_eq!(prompter.remaining(), 0);
}

#[tokio::test]
async fn test_back_from_port_reprompts_name_prefilled() {
  setup_tracing();
  let prompter = Arc::new(ScriptedPrompter::with_answers([
    ScriptedAnswer::Input("my-svc".to_string()),
    ScriptedAnswer::Back,
    ScriptedAnswer::Input("api".to_string()),
    ScriptedAnswer::Input("abc".to_string()),
    ScriptedAnswer::Input("8080".to_string()),
    ScriptedAnswer::PickLabel("Yes".to_string()),
  ]));
  let mut wizard = service_wizard(&prompter);

  let result = wizard.run().await.unwrap();
  assert_eq!(result.name.as_deref(), Some("api"));
  assert_eq!(result.port, Some(8080));
  assert!(result.confirmed);

  let records = prompter.records();
  assert_eq!(
    prompter.titles(),
    vec![
      "Service name (Step 1 of 3)",
      "Port (Step 2 of 3)",
      "Service name (Step 1 of 3)",
      "Port (Step 2 of 3)",
      "Confirm (Step 3 of 3)",
    ]
  );
  assert_eq!(records[0].prefill, None);
  assert_eq!(records[1].answer, None, "port was backed out of");
  assert_eq!(records[2].prefill.as_deref(), Some("my-svc"));
  assert_eq!(records[3].prefill, None);
  assert_eq!(
    records[3].validation_messages,
    vec!["Port must be a number between 1 and 65535".to_string()]
  );
  assert_eq!(records[3].answer.as_deref(), Some("8080"));
  assert_eq!(wizard.final_state().unwrap().current_step, 4);
}

#[tokio::test]
async fn test_back_from_confirm_prefills_port_and_selection() {
  setup_tracing();
  let prompter = Arc::new(
    ScriptedPrompter::new()
      .input("api")
      .input("8080")
      .back()
      .input("9090")
      .pick_label("No"),
  );
  let mut wizard = service_wizard(&prompter);

  let result = wizard.run().await.unwrap();
  assert_eq!(result.port, Some(9090));
  assert!(!result.confirmed);

  let records = prompter.records();
  assert_eq!(records[2].kind, PromptKind::QuickPick);
  assert_eq!(records[2].labels, vec!["Yes".to_string(), "No".to_string()]);
  assert_eq!(records[2].prefill.as_deref(), Some("No"));
  assert_eq!(records[3].prefill.as_deref(), Some("8080"));
}

#[tokio::test]
async fn test_back_from_first_prompt_cancels() {
  setup_tracing();
  let prompter = Arc::new(ScriptedPrompter::new().back());
  let mut wizard = service_wizard(&prompter);

  assert_eq!(wizard.run().await, None);
  assert_eq!(prompter.records().len(), 1);
}

#[tokio::test]
async fn test_prompter_failure_fails_the_wizard() {
  setup_tracing();
  // Two answers for three prompts: the confirm prompt fails.
  let prompter = Arc::new(ScriptedPrompter::new().input("api").input("8080"));
  let mut wizard = service_wizard(&prompter);

  match wizard.run_outcome().await {
    Err(WizardError::StepError { source }) => assert!(source.to_string().contains("no answer left")),
    other => panic!("Expected WizardError::StepError, got {:?}", other),
  }
}

#[tokio::test]
async fn test_empty_name_is_rejected_until_valid() {
  setup_tracing();
  let prompter = Arc::new(
    ScriptedPrompter::new()
      .input("")
      .input("   ")
      .input("api")
      .input("80")
      .pick(0),
  );
  let mut wizard = service_wizard(&prompter);

  let result = wizard.run().await.unwrap();
  assert_eq!(result.name.as_deref(), Some("api"));
  assert_eq!(prompter.records()[0].validation_messages.len(), 2);
}
