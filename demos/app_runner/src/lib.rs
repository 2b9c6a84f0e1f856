// demos/app_runner/src/lib.rs

//! A "Create App Runner Service" wizard built on `wizflow`: a branching
//! source step (ECR image or source code repository), a skippable access
//! role step, and a result mapper producing the CreateService payload.

pub mod client;
pub mod config;
pub mod errors;
pub mod terminal;
pub mod wizard;

pub use crate::client::{AppRunnerCatalog, StaticCatalog};
pub use crate::config::DemoConfig;
pub use crate::errors::AppError;
pub use crate::terminal::TerminalPrompter;
pub use crate::wizard::{create_service_wizard, map_request, CreateServiceForm, CreateServiceRequest};
