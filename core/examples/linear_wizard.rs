// wizflow/examples/linear_wizard.rs

use std::sync::Arc;
use tracing::info;
use wizflow::{InputBoxOptions, Prompter, ScriptedPrompter, StepDef, StepOutcome, Wizard, WizardError, WizardState};

// 1. Define the state accumulated by the wizard. Every answer is optional.
#[derive(Clone, Debug, Default)]
struct ServiceForm {
  name: Option<String>,
  port: Option<u16>,
}

// 2. Define the result the wizard produces.
#[derive(Debug)]
struct CreateService {
  name: String,
  port: u16,
}

#[tokio::main]
async fn main() -> Result<(), WizardError> {
  tracing_subscriber::fmt().with_max_level(tracing::Level::INFO).init();

  info!("--- Linear Wizard Example ---");

  // 3. A prompter. The scripted one answers "orders", then backs out of the
  //    port prompt, renames the service to "orders-api" and enters a port.
  let prompter = Arc::new(
    ScriptedPrompter::new()
      .input("orders")
      .back()
      .input("orders-api")
      .input("8080"),
  );

  // 4. Create the wizard with a result mapper.
  let mut wizard = Wizard::<ServiceForm, CreateService>::named(
    "create-service",
    |state: &WizardState<ServiceForm>| CreateService {
      name: state.data.name.clone().unwrap_or_default(),
      port: state.data.port.unwrap_or(80),
    },
    ServiceForm::default(),
  );

  // 5. Add steps. A `None` from a prompt means "go back".
  let name_prompter = prompter.clone();
  wizard.add_step(StepDef::new("name", move |state: WizardState<ServiceForm>| {
    let prompter = name_prompter.clone();
    async move {
      let options = InputBoxOptions::new(state.title("Service name"))
        .value(state.data.name.clone())
        .validate_with(|input| input.is_empty().then(|| "A name is required".to_string()));
      match prompter.input_box(options).await? {
        Some(name) => Ok::<_, WizardError>(StepOutcome::next(state.update(|form| ServiceForm {
          name: Some(name),
          ..form
        }))),
        None => Ok(StepOutcome::back()),
      }
    }
  }));

  let port_prompter = prompter.clone();
  wizard.add_step(StepDef::new("port", move |state: WizardState<ServiceForm>| {
    let prompter = port_prompter.clone();
    async move {
      let options = InputBoxOptions::new(state.title("Port"))
        .value(state.data.port.map(|port| port.to_string()))
        .validate_with(|input| input.parse::<u16>().err().map(|e| format!("Invalid port: {}", e)));
      let Some(port) = prompter.input_box(options).await? else {
        return Ok::<_, WizardError>(StepOutcome::back());
      };
      let port = port.parse::<u16>().map_err(anyhow::Error::from)?;
      Ok(StepOutcome::next(state.update(|form| ServiceForm {
        port: Some(port),
        ..form
      })))
    }
  }));

  // 6. Run it.
  match wizard.run_outcome().await?.into_result() {
    Some(request) => info!("Wizard completed: {:?}", request),
    None => info!("Wizard cancelled."),
  }

  info!("Prompts shown:");
  for record in prompter.records() {
    info!("- {} (prefill: {:?}, answer: {:?})", record.title, record.prefill, record.answer);
  }

  Ok(())
}
