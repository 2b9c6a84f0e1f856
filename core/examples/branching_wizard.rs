// wizflow/examples/branching_wizard.rs

use serde::Serialize;
use std::sync::Arc;
use tracing::info;
use wizflow::{
  to_compact_json, BranchBuilder, Prompter, QuickPick, ScriptedPrompter, StepDef, StepOutcome, Wizard, WizardError,
  WizardEvent, WizardState,
};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Source {
  Image,
  Repository,
}

#[derive(Clone, Debug, Default)]
struct DeployForm {
  source: Option<Source>,
  image: Option<String>,
  repository: Option<String>,
  role: Option<String>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct DeployRequest {
  image: Option<String>,
  repository: Option<String>,
  access_role: Option<String>,
}

type DeployStep = StepDef<DeployForm, WizardError>;

/// A quick pick step writing the chosen label into the form with `apply`.
fn pick_step(
  name: &'static str,
  prompter: Arc<ScriptedPrompter>,
  labels: &'static [&'static str],
  apply: fn(DeployForm, String) -> DeployForm,
) -> DeployStep {
  StepDef::new(name, move |state: WizardState<DeployForm>| {
    let prompter = prompter.clone();
    async move {
      let pick = QuickPick::new(state.title(name)).items(labels.iter().map(|label| (*label, label.to_string())));
      let Some(choice) = pick.prompt(prompter.as_ref()).await? else {
        return Ok::<_, WizardError>(StepOutcome::back());
      };
      Ok(StepOutcome::next(state.update(|form| apply(form, choice))))
    }
  })
}

#[tokio::main]
async fn main() -> Result<(), WizardError> {
  tracing_subscriber::fmt().with_max_level(tracing::Level::INFO).init();

  info!("--- Branching Wizard Example ---");

  // Picks "Image" first, backs out of the image prompt, then goes the
  // repository way instead.
  let prompter = Arc::new(
    ScriptedPrompter::new()
      .pick_label("Image")
      .back()
      .pick_label("Repository")
      .pick_label("github.com/acme/orders"),
  );

  let source_prompter = prompter.clone();
  let choose_source = StepDef::new("Source", move |state: WizardState<DeployForm>| {
    let prompter = source_prompter.clone();
    async move {
      let current = state.data.source;
      let pick = QuickPick::new(state.title("Source"))
        .items([("Image", Source::Image), ("Repository", Source::Repository)])
        .preselect(|source| Some(*source) == current);
      let Some(source) = pick.prompt(prompter.as_ref()).await? else {
        return Ok::<_, WizardError>(StepOutcome::back());
      };
      Ok(StepOutcome::next(state.update(|form| DeployForm {
        source: Some(source),
        ..form
      })))
    }
  });

  // The follow-up steps depend on the chosen source.
  let source = BranchBuilder::new(choose_source)
    .when(
      |state: &WizardState<DeployForm>| state.data.source == Some(Source::Image),
      vec![pick_step("Image", prompter.clone(), &["orders:latest", "orders:v2"], |form, image| {
        DeployForm {
          image: Some(image),
          ..form
        }
      })],
    )
    .when(
      |state: &WizardState<DeployForm>| state.data.source == Some(Source::Repository),
      vec![pick_step(
        "Repository",
        prompter.clone(),
        &["github.com/acme/orders", "github.com/acme/billing"],
        |form, repository| DeployForm {
          repository: Some(repository),
          ..form
        },
      )],
    )
    .build();

  // Only image deployments need an access role.
  let role = pick_step("Access role", prompter.clone(), &["ecr-access"], |form, role| DeployForm {
    role: Some(role),
    ..form
  })
  .skip_when(|state: &WizardState<DeployForm>| state.data.source != Some(Source::Image));

  let mut wizard = Wizard::<DeployForm, DeployRequest>::named(
    "deploy",
    |state: &WizardState<DeployForm>| DeployRequest {
      image: state.data.image.clone(),
      repository: state.data.repository.clone(),
      access_role: state.data.role.clone(),
    },
    DeployForm::default(),
  )
  .with_step(source)
  .with_step(role);

  wizard.on_event(|event| match event {
    WizardEvent::Advanced { step, progress, inserted } => {
      info!("'{}' accepted, now at {} ({} steps inserted)", step, progress, inserted)
    }
    WizardEvent::Rewound { step, progress } => info!("Back to '{}' at {}", step, progress),
    WizardEvent::Skipped { step } => info!("'{}' skipped", step),
    _ => {}
  });

  if let Some(request) = wizard.run().await {
    let payload = to_compact_json(&request).map_err(|e| WizardError::Internal(e.to_string()))?;
    info!("Request payload: {}", payload);
  }

  Ok(())
}
