// demos/app_runner/src/main.rs

use app_runner_wizard::{create_service_wizard, AppError, DemoConfig, StaticCatalog, TerminalPrompter};
use std::sync::Arc;
use tracing::Level;
use wizflow::{to_compact_json, WizardOutcome};

#[tokio::main]
async fn main() -> Result<(), AppError> {
  // Logs go to stderr so the payload on stdout stays clean.
  tracing_subscriber::fmt()
    .with_max_level(Level::WARN)
    .with_env_filter(tracing_subscriber::EnvFilter::from_default_env()) // Allow RUST_LOG override
    .with_writer(std::io::stderr)
    .init();

  let config = match DemoConfig::from_env() {
    Ok(config) => config,
    Err(e) => {
      tracing::error!(error = %e, "Failed to load demo configuration.");
      return Err(e);
    }
  };

  if !TerminalPrompter::is_interactive() {
    return Err(AppError::Config("create-app-runner-service needs an interactive terminal".to_string()));
  }

  let catalog = Arc::new(StaticCatalog::from_config(&config));
  let prompter = Arc::new(TerminalPrompter::new());
  let mut wizard = create_service_wizard(prompter, catalog, &config);

  match wizard.run_outcome().await? {
    WizardOutcome::Completed(request) => {
      let payload = to_compact_json(&request)?;
      println!("{}", serde_json::to_string_pretty(&payload)?);
    }
    WizardOutcome::Cancelled => {
      tracing::info!("Wizard cancelled by the user.");
      eprintln!("Cancelled.");
    }
  }

  Ok(())
}
