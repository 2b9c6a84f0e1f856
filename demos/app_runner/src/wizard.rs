// demos/app_runner/src/wizard.rs

//! The "Create App Runner Service" wizard.
//!
//! Static steps: source, access role, service name, instance size. Picking
//! the ECR source splices in an image step and a port step right after the
//! source step; picking a repository splices in a repository step. The access
//! role is only asked for ECR images.

use crate::client::{AppRunnerCatalog, CodeRepository};
use crate::config::DemoConfig;
use crate::errors::AppError;
use serde::Serialize;
use std::sync::Arc;
use tracing::{event, Level};
use wizflow::{BranchBuilder, InputBoxOptions, Prompter, QuickPick, QuickPickItem, StepDef, StepOutcome, Wizard, WizardState};

pub const WIZARD_TITLE: &str = "Create App Runner Service";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceKind {
  Ecr,
  Repository,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InstanceSize {
  Small,
  Medium,
  Large,
}

impl InstanceSize {
  pub const ALL: [InstanceSize; 3] = [InstanceSize::Small, InstanceSize::Medium, InstanceSize::Large];

  pub fn cpu(self) -> &'static str {
    match self {
      InstanceSize::Small => "1 vCPU",
      InstanceSize::Medium => "2 vCPU",
      InstanceSize::Large => "4 vCPU",
    }
  }

  pub fn memory(self) -> &'static str {
    match self {
      InstanceSize::Small => "2 GB",
      InstanceSize::Medium => "4 GB",
      InstanceSize::Large => "12 GB",
    }
  }

  pub fn label(self) -> String {
    format!("{}, {}", self.cpu(), self.memory())
  }
}

/// Answers collected by the wizard. Fields of the branch not taken stay `None`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CreateServiceForm {
  pub source: Option<SourceKind>,
  pub image_identifier: Option<String>,
  pub port: Option<u16>,
  pub code_repository: Option<CodeRepository>,
  pub access_role_arn: Option<String>,
  pub service_name: Option<String>,
  pub instance_size: Option<InstanceSize>,
}

// --- Request payload (App Runner CreateService shape) ---

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct CreateServiceRequest {
  #[serde(skip_serializing_if = "Option::is_none")]
  pub service_name: Option<String>,
  pub source_configuration: SourceConfiguration,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub instance_configuration: Option<InstanceConfiguration>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct SourceConfiguration {
  #[serde(skip_serializing_if = "Option::is_none")]
  pub image_repository: Option<ImageRepositorySource>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub code_repository: Option<CodeRepositorySource>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub authentication_configuration: Option<AuthenticationConfiguration>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct ImageRepositorySource {
  #[serde(skip_serializing_if = "Option::is_none")]
  pub image_identifier: Option<String>,
  pub image_repository_type: &'static str,
  pub image_configuration: ImageConfiguration,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct ImageConfiguration {
  #[serde(skip_serializing_if = "Option::is_none")]
  pub port: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct CodeRepositorySource {
  pub repository_url: String,
  pub source_code_version: SourceCodeVersion,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct SourceCodeVersion {
  pub r#type: &'static str,
  pub value: &'static str,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct AuthenticationConfiguration {
  #[serde(skip_serializing_if = "Option::is_none")]
  pub access_role_arn: Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub connection_arn: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct InstanceConfiguration {
  pub cpu: &'static str,
  pub memory: &'static str,
}

/// Maps the final answers to the request payload. Absent answers stay `None`
/// and are left out when serialized.
pub fn map_request(state: &WizardState<CreateServiceForm>) -> CreateServiceRequest {
  let form = &state.data;

  let image_repository = (form.source == Some(SourceKind::Ecr)).then(|| ImageRepositorySource {
    image_identifier: form.image_identifier.clone(),
    image_repository_type: "ECR",
    image_configuration: ImageConfiguration {
      port: form.port.map(|port| port.to_string()),
    },
  });

  let code_repository = match (&form.source, &form.code_repository) {
    (Some(SourceKind::Repository), Some(repository)) => Some(CodeRepositorySource {
      repository_url: repository.url.clone(),
      source_code_version: SourceCodeVersion {
        r#type: "BRANCH",
        value: "main",
      },
    }),
    _ => None,
  };

  let connection_arn = match form.source {
    Some(SourceKind::Repository) => form.code_repository.as_ref().map(|r| r.connection_arn.clone()),
    _ => None,
  };
  let access_role_arn = match form.source {
    Some(SourceKind::Ecr) => form.access_role_arn.clone(),
    _ => None,
  };
  let authentication_configuration = (access_role_arn.is_some() || connection_arn.is_some()).then(|| {
    AuthenticationConfiguration {
      access_role_arn,
      connection_arn,
    }
  });

  CreateServiceRequest {
    service_name: form.service_name.clone(),
    source_configuration: SourceConfiguration {
      image_repository,
      code_repository,
      authentication_configuration,
    },
    instance_configuration: form.instance_size.map(|size| InstanceConfiguration {
      cpu: size.cpu(),
      memory: size.memory(),
    }),
  }
}

// --- Validators ---

pub fn validate_port(input: &str) -> Option<String> {
  match input.trim().parse::<u16>() {
    Ok(port) if port > 0 => None,
    _ => Some("Port must be a number between 1 and 65535".to_string()),
  }
}

/// App Runner service names: 4 to 40 characters, letters, digits, `-` and
/// `_`, starting with a letter or digit.
pub fn validate_service_name(input: &str) -> Option<String> {
  let length = input.chars().count();
  if !(4..=40).contains(&length) {
    return Some("Service name must be between 4 and 40 characters".to_string());
  }
  if !input.starts_with(|c: char| c.is_ascii_alphanumeric()) {
    return Some("Service name must start with a letter or a digit".to_string());
  }
  if !input.chars().all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_') {
    return Some("Service name may only contain letters, digits, '-' and '_'".to_string());
  }
  None
}

// --- Steps ---

type ServiceStep = StepDef<CreateServiceForm, AppError>;

fn source_step(prompter: Arc<dyn Prompter>) -> ServiceStep {
  StepDef::new("source", move |state: WizardState<CreateServiceForm>| {
    let prompter = prompter.clone();
    async move {
      let current = state.data.source;
      let pick = QuickPick::new(state.title(WIZARD_TITLE))
        .placeholder("Select a source")
        .item(
          QuickPickItem::new("ECR").description("Deploy an image from Amazon ECR"),
          SourceKind::Ecr,
        )
        .item(
          QuickPickItem::new("Repository").description("Build from a source code repository"),
          SourceKind::Repository,
        )
        .preselect(|source| Some(*source) == current);
      let Some(source) = pick.prompt(prompter.as_ref()).await? else {
        return Ok::<_, AppError>(StepOutcome::back());
      };
      Ok(StepOutcome::next(state.update(|form| CreateServiceForm {
        source: Some(source),
        ..form
      })))
    }
  })
}

fn image_step(prompter: Arc<dyn Prompter>, catalog: Arc<dyn AppRunnerCatalog>) -> ServiceStep {
  StepDef::new("image", move |state: WizardState<CreateServiceForm>| {
    let prompter = prompter.clone();
    let catalog = catalog.clone();
    async move {
      let repositories = catalog.list_image_repositories().await?;
      if repositories.is_empty() {
        return Err(AppError::Catalog("No ECR repositories found".to_string()));
      }
      let current = state.data.image_identifier.clone();
      let pick = repositories
        .into_iter()
        .fold(
          QuickPick::new(state.title(WIZARD_TITLE)).placeholder("Select an image repository"),
          |pick, repository| {
            let identifier = format!("{}:latest", repository.uri);
            pick.item(QuickPickItem::new(repository.name).detail(repository.uri), identifier)
          },
        )
        .preselect(|identifier| current.as_ref() == Some(identifier));
      let Some(image_identifier) = pick.prompt(prompter.as_ref()).await? else {
        return Ok(StepOutcome::back());
      };
      Ok(StepOutcome::next(state.update(|form| CreateServiceForm {
        image_identifier: Some(image_identifier),
        ..form
      })))
    }
  })
}

fn port_step(prompter: Arc<dyn Prompter>, default_port: u16) -> ServiceStep {
  StepDef::new("port", move |state: WizardState<CreateServiceForm>| {
    let prompter = prompter.clone();
    async move {
      let prefill = state.data.port.unwrap_or(default_port);
      let options = InputBoxOptions::new(state.title(WIZARD_TITLE))
        .prompt("Port the container listens on")
        .value(Some(prefill.to_string()))
        .validate_with(validate_port);
      let Some(input) = prompter.input_box(options).await? else {
        return Ok::<_, AppError>(StepOutcome::back());
      };
      let port = input.trim().parse::<u16>().map_err(anyhow::Error::from)?;
      Ok(StepOutcome::next(state.update(|form| CreateServiceForm {
        port: Some(port),
        ..form
      })))
    }
  })
}

fn repository_step(prompter: Arc<dyn Prompter>, catalog: Arc<dyn AppRunnerCatalog>) -> ServiceStep {
  StepDef::new("repository", move |state: WizardState<CreateServiceForm>| {
    let prompter = prompter.clone();
    let catalog = catalog.clone();
    async move {
      let repositories = catalog.list_code_repositories().await?;
      if repositories.is_empty() {
        return Err(AppError::Catalog("No source code repositories found".to_string()));
      }
      let current = state.data.code_repository.clone();
      let pick = repositories
        .into_iter()
        .fold(
          QuickPick::new(state.title(WIZARD_TITLE)).placeholder("Select a repository"),
          |pick, repository| {
            let item = QuickPickItem::new(repository.url.clone()).description(repository.connection_name.clone());
            pick.item(item, repository)
          },
        )
        .preselect(|repository| current.as_ref() == Some(repository));
      let Some(repository) = pick.prompt(prompter.as_ref()).await? else {
        return Ok(StepOutcome::back());
      };
      Ok(StepOutcome::next(state.update(|form| CreateServiceForm {
        code_repository: Some(repository),
        ..form
      })))
    }
  })
}

fn access_role_step(prompter: Arc<dyn Prompter>, catalog: Arc<dyn AppRunnerCatalog>) -> ServiceStep {
  StepDef::new("access_role", move |state: WizardState<CreateServiceForm>| {
    let prompter = prompter.clone();
    let catalog = catalog.clone();
    async move {
      let roles = catalog.list_access_roles().await?;
      if roles.is_empty() {
        return Err(AppError::Catalog("No IAM role can grant App Runner access to ECR".to_string()));
      }
      let current = state.data.access_role_arn.clone();
      let pick = roles
        .into_iter()
        .fold(
          QuickPick::new(state.title(WIZARD_TITLE)).placeholder("Select an ECR access role"),
          |pick, role| pick.item(QuickPickItem::new(role.name).detail(role.arn.clone()), role.arn),
        )
        .preselect(|arn| current.as_ref() == Some(arn));
      let Some(arn) = pick.prompt(prompter.as_ref()).await? else {
        return Ok(StepOutcome::back());
      };
      Ok(StepOutcome::next(state.update(|form| CreateServiceForm {
        access_role_arn: Some(arn),
        ..form
      })))
    }
  })
  .skip_when(|state: &WizardState<CreateServiceForm>| state.data.source != Some(SourceKind::Ecr))
}

fn service_name_step(prompter: Arc<dyn Prompter>) -> ServiceStep {
  StepDef::new("service_name", move |state: WizardState<CreateServiceForm>| {
    let prompter = prompter.clone();
    async move {
      let options = InputBoxOptions::new(state.title(WIZARD_TITLE))
        .prompt("Name your service")
        .value(state.data.service_name.clone())
        .validate_with(validate_service_name);
      let Some(name) = prompter.input_box(options).await? else {
        return Ok::<_, AppError>(StepOutcome::back());
      };
      Ok(StepOutcome::next(state.update(|form| CreateServiceForm {
        service_name: Some(name),
        ..form
      })))
    }
  })
}

fn instance_size_step(prompter: Arc<dyn Prompter>) -> ServiceStep {
  StepDef::new("instance_size", move |state: WizardState<CreateServiceForm>| {
    let prompter = prompter.clone();
    async move {
      let current = state.data.instance_size.unwrap_or(InstanceSize::Small);
      let pick = QuickPick::new(state.title(WIZARD_TITLE))
        .placeholder("Select instance size")
        .items(InstanceSize::ALL.map(|size| (size.label(), size)))
        .preselect(|size| *size == current);
      let Some(size) = pick.prompt(prompter.as_ref()).await? else {
        return Ok::<_, AppError>(StepOutcome::back());
      };
      Ok(StepOutcome::next(state.update(|form| CreateServiceForm {
        instance_size: Some(size),
        ..form
      })))
    }
  })
}

/// Builds the wizard. Prompts go through `prompter`, listings through
/// `catalog`.
pub fn create_service_wizard(
  prompter: Arc<dyn Prompter>,
  catalog: Arc<dyn AppRunnerCatalog>,
  config: &DemoConfig,
) -> Wizard<CreateServiceForm, CreateServiceRequest, AppError> {
  let source = BranchBuilder::new(source_step(prompter.clone()))
    .when(
      |state: &WizardState<CreateServiceForm>| state.data.source == Some(SourceKind::Ecr),
      vec![
        image_step(prompter.clone(), catalog.clone()),
        port_step(prompter.clone(), config.default_port),
      ],
    )
    .when(
      |state: &WizardState<CreateServiceForm>| state.data.source == Some(SourceKind::Repository),
      vec![repository_step(prompter.clone(), catalog.clone())],
    )
    .build();

  let mut wizard = Wizard::named("create-app-runner-service", map_request, CreateServiceForm::default());
  wizard.add_step(source);
  wizard.add_step(access_role_step(prompter.clone(), catalog));
  wizard.add_step(service_name_step(prompter.clone()));
  wizard.add_step(instance_size_step(prompter));

  wizard.on_event(|wizard_event| event!(Level::DEBUG, ?wizard_event, "Create service wizard transition."));
  wizard
}
