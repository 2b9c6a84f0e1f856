// demos/app_runner/src/config.rs

use crate::errors::{AppError, Result};
use dotenvy::dotenv;
use std::env;

pub const DEFAULT_REGION: &str = "us-east-1";
pub const DEFAULT_PORT: u16 = 8080;
pub const DEFAULT_ACCOUNT_ID: &str = "123456789012";
pub const DEFAULT_CONNECTION: &str = "github-main";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DemoConfig {
  pub region: String,
  /// Port pre-filled in the port prompt of the image branch.
  pub default_port: u16,
  pub account_id: String,
  /// Names of the source code connections offered by the catalog.
  pub connections: Vec<String>,
}

impl Default for DemoConfig {
  fn default() -> Self {
    Self {
      region: DEFAULT_REGION.to_string(),
      default_port: DEFAULT_PORT,
      account_id: DEFAULT_ACCOUNT_ID.to_string(),
      connections: vec![DEFAULT_CONNECTION.to_string()],
    }
  }
}

impl DemoConfig {
  pub fn from_env() -> Result<Self> {
    dotenv().ok(); // Load .env file if present
    let config = Self::from_lookup(|var_name| env::var(var_name).ok())?;
    tracing::info!(region = %config.region, connections = config.connections.len(), "Demo configuration loaded.");
    Ok(config)
  }

  /// Builds the configuration from `lookup`, which returns the value of an
  /// environment variable if it is set.
  pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
    let region = lookup("APP_RUNNER_REGION").unwrap_or_else(|| DEFAULT_REGION.to_string());
    if region.trim().is_empty() {
      return Err(AppError::Config("APP_RUNNER_REGION must not be empty".to_string()));
    }

    let default_port = match lookup("APP_RUNNER_DEFAULT_PORT") {
      Some(raw) => raw
        .trim()
        .parse::<u16>()
        .map_err(|e| AppError::Config(format!("Invalid APP_RUNNER_DEFAULT_PORT '{}': {}", raw, e)))?,
      None => DEFAULT_PORT,
    };

    let account_id = lookup("APP_RUNNER_ACCOUNT_ID").unwrap_or_else(|| DEFAULT_ACCOUNT_ID.to_string());
    if account_id.len() != 12 || !account_id.chars().all(|c| c.is_ascii_digit()) {
      return Err(AppError::Config(format!(
        "Invalid APP_RUNNER_ACCOUNT_ID '{}': expected 12 digits",
        account_id
      )));
    }

    let connections: Vec<String> = lookup("APP_RUNNER_CONNECTIONS")
      .unwrap_or_else(|| DEFAULT_CONNECTION.to_string())
      .split(',')
      .map(|name| name.trim().to_string())
      .filter(|name| !name.is_empty())
      .collect();
    if connections.is_empty() {
      return Err(AppError::Config("APP_RUNNER_CONNECTIONS names no connection".to_string()));
    }

    Ok(Self {
      region,
      default_port,
      account_id,
      connections,
    })
  }
}
