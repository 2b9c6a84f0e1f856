// demos/app_runner/src/terminal.rs

//! `Prompter` backed by `dialoguer`. Input boxes treat a lone `<` as "go
//! back"; quick picks go back on Esc or `q`.

use async_trait::async_trait;
use dialoguer::{Input, Select};
use std::io::IsTerminal;
use wizflow::{InputBoxOptions, Prompter, QuickPickOptions};

pub const BACK_KEYWORD: &str = "<";

#[derive(Debug, Default)]
pub struct TerminalPrompter;

impl TerminalPrompter {
  pub fn new() -> Self {
    Self
  }

  pub fn is_interactive() -> bool {
    std::io::stdin().is_terminal()
  }
}

fn prompt_text(title: &str, detail: Option<&str>) -> String {
  match detail {
    Some(detail) => format!("{}\n  {} ('{}' to go back)", title, detail, BACK_KEYWORD),
    None => format!("{} ('{}' to go back)", title, BACK_KEYWORD),
  }
}

fn item_text(label: &str, description: Option<&str>, detail: Option<&str>) -> String {
  let mut text = label.to_string();
  if let Some(description) = description {
    text.push_str(&format!(" - {}", description));
  }
  if let Some(detail) = detail {
    text.push_str(&format!(" ({})", detail));
  }
  text
}

#[async_trait]
impl Prompter for TerminalPrompter {
  async fn input_box(&self, options: InputBoxOptions) -> anyhow::Result<Option<String>> {
    let answer = tokio::task::spawn_blocking(move || -> anyhow::Result<Option<String>> {
      let detail = options.prompt.as_deref().or(options.placeholder.as_deref());
      let validator = options.validator.clone();
      let mut input = Input::<String>::new()
        .with_prompt(prompt_text(&options.title, detail))
        .allow_empty(true)
        .validate_with(move |text: &String| -> Result<(), String> {
          if text == BACK_KEYWORD {
            return Ok(());
          }
          match validator.as_ref().and_then(|validate| validate(text)) {
            Some(message) => Err(message),
            None => Ok(()),
          }
        });
      if let Some(value) = &options.value {
        input = input.with_initial_text(value.clone());
      }
      let text = input.interact_text()?;
      Ok((text != BACK_KEYWORD).then_some(text))
    })
    .await??;
    Ok(answer)
  }

  async fn quick_pick(&self, options: QuickPickOptions) -> anyhow::Result<Option<usize>> {
    let answer = tokio::task::spawn_blocking(move || -> anyhow::Result<Option<usize>> {
      let items: Vec<String> = options
        .items
        .iter()
        .map(|item| item_text(&item.label, item.description.as_deref(), item.detail.as_deref()))
        .collect();
      let prompt = match &options.placeholder {
        Some(placeholder) => format!("{}\n  {}", options.title, placeholder),
        None => options.title.clone(),
      };
      let mut default = options.picked_index().unwrap_or(0);
      loop {
        let Some(index) = Select::new()
          .with_prompt(prompt.as_str())
          .items(&items)
          .default(default)
          .interact_opt()?
        else {
          return Ok(None);
        };
        match options.validate(&options.items[index].label) {
          Some(message) => {
            eprintln!("  {}", message);
            default = index;
          }
          None => return Ok(Some(index)),
        }
      }
    })
    .await??;
    Ok(answer)
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn item_text_joins_description_and_detail() {
    assert_eq!(item_text("ECR", None, None), "ECR");
    assert_eq!(
      item_text("orders-api", Some("github-main"), Some("https://github.com/acme/orders-api")),
      "orders-api - github-main (https://github.com/acme/orders-api)"
    );
  }

  #[test]
  fn prompt_text_mentions_back_keyword() {
    assert!(prompt_text("Create App Runner Service (Step 1 of 4)", Some("Port")).contains("'<' to go back"));
  }
}
