// wizflow/src/prompt/quick_pick.rs

//! `QuickPick<V>`: a typed quick pick that maps the selected item back to a
//! value instead of an index.

use super::{Prompter, QuickPickItem, QuickPickOptions};
use anyhow::anyhow;
use std::sync::Arc;

pub struct QuickPick<V> {
  options: QuickPickOptions,
  values: Vec<V>,
}

impl<V> QuickPick<V> {
  pub fn new(title: impl Into<String>) -> Self {
    Self {
      options: QuickPickOptions::new(title),
      values: Vec::new(),
    }
  }

  pub fn placeholder(mut self, placeholder: impl Into<String>) -> Self {
    self.options.placeholder = Some(placeholder.into());
    self
  }

  pub fn item(mut self, item: QuickPickItem, value: V) -> Self {
    self.options.items.push(item);
    self.values.push(value);
    self
  }

  /// Adds one item per `(label, value)` pair.
  pub fn items<L: Into<String>>(mut self, entries: impl IntoIterator<Item = (L, V)>) -> Self {
    for (label, value) in entries {
      self = self.item(QuickPickItem::new(label), value);
    }
    self
  }

  /// Marks the items whose value satisfies `is_current` as pre-selected.
  pub fn preselect(mut self, is_current: impl Fn(&V) -> bool) -> Self {
    for (item, value) in self.options.items.iter_mut().zip(&self.values) {
      item.picked = is_current(value);
    }
    self
  }

  pub fn validate_with(mut self, validator: impl Fn(&str) -> Option<String> + Send + Sync + 'static) -> Self {
    self.options.validator = Some(Arc::new(validator));
    self
  }

  pub fn options(&self) -> &QuickPickOptions {
    &self.options
  }

  pub fn is_empty(&self) -> bool {
    self.values.is_empty()
  }

  /// Shows the pick and resolves to the selected value, or `None` if the user
  /// backed out.
  pub async fn prompt(mut self, prompter: &dyn Prompter) -> anyhow::Result<Option<V>> {
    let title = self.options.title.clone();
    let item_count = self.values.len();
    match prompter.quick_pick(self.options).await? {
      None => Ok(None),
      Some(index) if index < item_count => Ok(Some(self.values.swap_remove(index))),
      Some(index) => Err(anyhow!(
        "Quick pick '{}' returned index {} but only {} items were offered",
        title,
        index,
        item_count
      )),
    }
  }
}
