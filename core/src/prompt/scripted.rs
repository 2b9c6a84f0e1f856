// wizflow/src/prompt/scripted.rs

//! A `Prompter` that replays queued answers and records every prompt it
//! served. Used to drive wizards in tests and non-interactive runs.

use super::{InputBoxOptions, Prompter, QuickPickOptions};
use anyhow::{anyhow, bail};
use async_trait::async_trait;
use parking_lot::Mutex;
use std::collections::VecDeque;
use tracing::{event, Level};

/// One queued answer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScriptedAnswer {
  /// Text for an input box.
  Input(String),
  /// Index of the item to select in a quick pick.
  Pick(usize),
  /// Label of the item to select in a quick pick.
  PickLabel(String),
  /// Back out of whatever prompt is showing.
  Back,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PromptKind {
  InputBox,
  QuickPick,
}

/// What a scripted prompt showed and how it was answered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromptRecord {
  pub kind: PromptKind,
  pub title: String,
  /// Pre-filled input value, or label of the pre-selected item.
  pub prefill: Option<String>,
  /// Item labels offered by a quick pick.
  pub labels: Vec<String>,
  /// Messages returned by the validator for rejected answers.
  pub validation_messages: Vec<String>,
  /// Accepted answer (input text or item label); `None` when backed out.
  pub answer: Option<String>,
}

impl PromptRecord {
  fn new(kind: PromptKind, title: &str, prefill: Option<String>, labels: Vec<String>) -> Self {
    Self {
      kind,
      title: title.to_string(),
      prefill,
      labels,
      validation_messages: Vec::new(),
      answer: None,
    }
  }
}

#[derive(Debug, Default)]
pub struct ScriptedPrompter {
  answers: Mutex<VecDeque<ScriptedAnswer>>,
  records: Mutex<Vec<PromptRecord>>,
}

impl ScriptedPrompter {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn with_answers(answers: impl IntoIterator<Item = ScriptedAnswer>) -> Self {
    Self {
      answers: Mutex::new(answers.into_iter().collect()),
      records: Mutex::new(Vec::new()),
    }
  }

  pub fn input(self, text: impl Into<String>) -> Self {
    self.push(ScriptedAnswer::Input(text.into()));
    self
  }

  pub fn pick(self, index: usize) -> Self {
    self.push(ScriptedAnswer::Pick(index));
    self
  }

  pub fn pick_label(self, label: impl Into<String>) -> Self {
    self.push(ScriptedAnswer::PickLabel(label.into()));
    self
  }

  pub fn back(self) -> Self {
    self.push(ScriptedAnswer::Back);
    self
  }

  /// Queues another answer behind the ones already queued.
  pub fn push(&self, answer: ScriptedAnswer) {
    self.answers.lock().push_back(answer);
  }

  pub fn remaining(&self) -> usize {
    self.answers.lock().len()
  }

  pub fn records(&self) -> Vec<PromptRecord> {
    self.records.lock().clone()
  }

  pub fn titles(&self) -> Vec<String> {
    self.records.lock().iter().map(|r| r.title.clone()).collect()
  }

  fn next_answer(&self, title: &str) -> anyhow::Result<ScriptedAnswer> {
    self
      .answers
      .lock()
      .pop_front()
      .ok_or_else(|| anyhow!("Scripted prompter has no answer left for prompt '{}'", title))
  }

  fn finish(&self, record: PromptRecord) {
    event!(Level::TRACE, title = %record.title, answer = ?record.answer, "Scripted prompt answered.");
    self.records.lock().push(record);
  }
}

#[async_trait]
impl Prompter for ScriptedPrompter {
  async fn input_box(&self, options: InputBoxOptions) -> anyhow::Result<Option<String>> {
    let mut record = PromptRecord::new(PromptKind::InputBox, &options.title, options.value.clone(), Vec::new());
    loop {
      let answer = match self.next_answer(&options.title) {
        Ok(answer) => answer,
        Err(e) => {
          self.finish(record);
          return Err(e);
        }
      };
      match answer {
        ScriptedAnswer::Back => {
          self.finish(record);
          return Ok(None);
        }
        ScriptedAnswer::Input(text) => {
          if let Some(message) = options.validate(&text) {
            event!(Level::DEBUG, title = %options.title, %message, "Scripted input rejected by validator.");
            record.validation_messages.push(message);
            continue;
          }
          record.answer = Some(text.clone());
          self.finish(record);
          return Ok(Some(text));
        }
        other => {
          self.finish(record);
          bail!("Input box '{}' received a quick pick answer: {:?}", options.title, other);
        }
      }
    }
  }

  async fn quick_pick(&self, options: QuickPickOptions) -> anyhow::Result<Option<usize>> {
    let labels: Vec<String> = options.items.iter().map(|item| item.label.clone()).collect();
    let prefill = options.picked_index().map(|index| labels[index].clone());
    let mut record = PromptRecord::new(PromptKind::QuickPick, &options.title, prefill, labels.clone());
    loop {
      let answer = match self.next_answer(&options.title) {
        Ok(answer) => answer,
        Err(e) => {
          self.finish(record);
          return Err(e);
        }
      };
      let index = match answer {
        ScriptedAnswer::Back => {
          self.finish(record);
          return Ok(None);
        }
        ScriptedAnswer::Pick(index) if index < labels.len() => index,
        ScriptedAnswer::PickLabel(label) => match labels.iter().position(|l| *l == label) {
          Some(index) => index,
          None => {
            self.finish(record);
            bail!("Quick pick '{}' has no item labelled '{}'", options.title, label);
          }
        },
        other => {
          self.finish(record);
          bail!("Quick pick '{}' cannot accept scripted answer {:?}", options.title, other);
        }
      };
      if let Some(message) = options.validate(&labels[index]) {
        event!(Level::DEBUG, title = %options.title, %message, "Scripted pick rejected by validator.");
        record.validation_messages.push(message);
        continue;
      }
      record.answer = Some(labels[index].clone());
      self.finish(record);
      return Ok(Some(index));
    }
  }
}
