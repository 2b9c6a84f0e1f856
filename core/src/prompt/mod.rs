// wizflow/src/prompt/mod.rs

//! Prompt primitives consumed by wizard steps.
//!
//! A prompt asks a single question and resolves to `Ok(Some(value))`, or to
//! `Ok(None)` when the user backed out. `Err` is reserved for failures of the
//! prompting channel itself (a closed terminal, a dropped webview) and is
//! fatal to the wizard once a step propagates it.
//!
//! The wizard engine never calls prompts itself; steps do, and map `None` to
//! `StepOutcome::back()`.

pub mod quick_pick;
pub mod scripted;

use async_trait::async_trait;
use std::sync::Arc;

pub use quick_pick::QuickPick;
pub use scripted::{PromptKind, PromptRecord, ScriptedAnswer, ScriptedPrompter};

/// Validation callback run on every candidate answer.
///
/// Returning `Some(message)` blocks acceptance and keeps the prompt open;
/// `None` accepts the answer.
pub type Validator = Arc<dyn Fn(&str) -> Option<String> + Send + Sync + 'static>;

/// Options for a free-text prompt.
#[derive(Clone, Default)]
pub struct InputBoxOptions {
  pub title: String,
  pub prompt: Option<String>,
  pub placeholder: Option<String>,
  /// Pre-filled value, typically taken from the state on a revisit.
  pub value: Option<String>,
  pub validator: Option<Validator>,
}

impl InputBoxOptions {
  pub fn new(title: impl Into<String>) -> Self {
    Self {
      title: title.into(),
      ..Default::default()
    }
  }

  pub fn prompt(mut self, prompt: impl Into<String>) -> Self {
    self.prompt = Some(prompt.into());
    self
  }

  pub fn placeholder(mut self, placeholder: impl Into<String>) -> Self {
    self.placeholder = Some(placeholder.into());
    self
  }

  /// Pre-fills the prompt. `None` leaves it blank.
  pub fn value(mut self, value: Option<impl Into<String>>) -> Self {
    self.value = value.map(Into::into);
    self
  }

  pub fn validate_with(mut self, validator: impl Fn(&str) -> Option<String> + Send + Sync + 'static) -> Self {
    self.validator = Some(Arc::new(validator));
    self
  }

  /// Runs the validator, if any, on `input`.
  pub fn validate(&self, input: &str) -> Option<String> {
    self.validator.as_ref().and_then(|validator| validator(input))
  }
}

impl std::fmt::Debug for InputBoxOptions {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.debug_struct("InputBoxOptions")
      .field("title", &self.title)
      .field("prompt", &self.prompt)
      .field("placeholder", &self.placeholder)
      .field("value", &self.value)
      .field("validator_present", &self.validator.is_some())
      .finish()
  }
}

/// One entry of a quick pick.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct QuickPickItem {
  pub label: String,
  pub description: Option<String>,
  pub detail: Option<String>,
  /// Pre-selected, typically because the state already holds this choice.
  pub picked: bool,
}

impl QuickPickItem {
  pub fn new(label: impl Into<String>) -> Self {
    Self {
      label: label.into(),
      ..Default::default()
    }
  }

  pub fn description(mut self, description: impl Into<String>) -> Self {
    self.description = Some(description.into());
    self
  }

  pub fn detail(mut self, detail: impl Into<String>) -> Self {
    self.detail = Some(detail.into());
    self
  }
}

/// Options for a single-selection list prompt.
#[derive(Clone, Default)]
pub struct QuickPickOptions {
  pub title: String,
  pub placeholder: Option<String>,
  pub items: Vec<QuickPickItem>,
  /// Runs on the label of the selected item.
  pub validator: Option<Validator>,
}

impl QuickPickOptions {
  pub fn new(title: impl Into<String>) -> Self {
    Self {
      title: title.into(),
      ..Default::default()
    }
  }

  pub fn validate(&self, label: &str) -> Option<String> {
    self.validator.as_ref().and_then(|validator| validator(label))
  }

  /// Index of the first pre-selected item.
  pub fn picked_index(&self) -> Option<usize> {
    self.items.iter().position(|item| item.picked)
  }
}

impl std::fmt::Debug for QuickPickOptions {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.debug_struct("QuickPickOptions")
      .field("title", &self.title)
      .field("placeholder", &self.placeholder)
      .field("items", &self.items)
      .field("validator_present", &self.validator.is_some())
      .finish()
  }
}

/// Single-question UI primitives.
#[async_trait]
pub trait Prompter: Send + Sync {
  /// Asks for free text. `Ok(None)` means the user backed out.
  async fn input_box(&self, options: InputBoxOptions) -> anyhow::Result<Option<String>>;

  /// Asks to choose one item; resolves to its index. `Ok(None)` means the
  /// user backed out.
  async fn quick_pick(&self, options: QuickPickOptions) -> anyhow::Result<Option<usize>>;
}
