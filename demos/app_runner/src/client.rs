// demos/app_runner/src/client.rs

//! Read-only catalog of the account resources the wizard offers as choices.

use crate::config::DemoConfig;
use async_trait::async_trait;
use tracing::{info, instrument};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageRepository {
  pub name: String,
  pub uri: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodeRepository {
  pub url: String,
  pub connection_name: String,
  pub connection_arn: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccessRole {
  pub name: String,
  pub arn: String,
}

/// Listing calls made by wizard steps. A failing call fails the wizard.
#[async_trait]
pub trait AppRunnerCatalog: Send + Sync {
  async fn list_image_repositories(&self) -> anyhow::Result<Vec<ImageRepository>>;

  async fn list_code_repositories(&self) -> anyhow::Result<Vec<CodeRepository>>;

  async fn list_access_roles(&self) -> anyhow::Result<Vec<AccessRole>>;
}

/// Catalog answering from a fixed resource set derived from the configuration.
#[derive(Debug, Clone)]
pub struct StaticCatalog {
  image_repositories: Vec<ImageRepository>,
  code_repositories: Vec<CodeRepository>,
  access_roles: Vec<AccessRole>,
}

impl StaticCatalog {
  pub fn new(
    image_repositories: Vec<ImageRepository>,
    code_repositories: Vec<CodeRepository>,
    access_roles: Vec<AccessRole>,
  ) -> Self {
    Self {
      image_repositories,
      code_repositories,
      access_roles,
    }
  }

  pub fn from_config(config: &DemoConfig) -> Self {
    let registry = format!("{}.dkr.ecr.{}.amazonaws.com", config.account_id, config.region);
    let image_repositories = ["orders-api", "billing-worker"]
      .into_iter()
      .map(|name| ImageRepository {
        name: name.to_string(),
        uri: format!("{}/{}", registry, name),
      })
      .collect();

    let code_repositories = config
      .connections
      .iter()
      .flat_map(|connection| {
        let connection_arn = format!(
          "arn:aws:apprunner:{}:{}:connection/{}",
          config.region, config.account_id, connection
        );
        ["orders-api", "storefront"].into_iter().map(move |repo| CodeRepository {
          url: format!("https://github.com/acme/{}", repo),
          connection_name: connection.clone(),
          connection_arn: connection_arn.clone(),
        })
      })
      .collect();

    let access_roles = vec![AccessRole {
      name: "AppRunnerECRAccessRole".to_string(),
      arn: format!("arn:aws:iam::{}:role/service-role/AppRunnerECRAccessRole", config.account_id),
    }];

    Self::new(image_repositories, code_repositories, access_roles)
  }
}

#[async_trait]
impl AppRunnerCatalog for StaticCatalog {
  #[instrument(skip(self))]
  async fn list_image_repositories(&self) -> anyhow::Result<Vec<ImageRepository>> {
    info!(count = self.image_repositories.len(), "Listing image repositories.");
    Ok(self.image_repositories.clone())
  }

  #[instrument(skip(self))]
  async fn list_code_repositories(&self) -> anyhow::Result<Vec<CodeRepository>> {
    info!(count = self.code_repositories.len(), "Listing code repositories.");
    Ok(self.code_repositories.clone())
  }

  #[instrument(skip(self))]
  async fn list_access_roles(&self) -> anyhow::Result<Vec<AccessRole>> {
    info!(count = self.access_roles.len(), "Listing access roles.");
    Ok(self.access_roles.clone())
  }
}
