// wizflow/src/mapper.rs

//! Result mappers turn the final `WizardState<T>` into the caller's output
//! (typically an API request payload).
//!
//! A mapper runs exactly once per completed run and must be pure. Every
//! domain field may be absent because branching can skip the steps that
//! would have filled it.

use crate::core::state::WizardState;
use serde::Serialize;
use serde_json::Value;

pub trait ResultMapper<T, R>: Send + Sync {
  fn map(&self, state: &WizardState<T>) -> R;
}

impl<T, R, F> ResultMapper<T, R> for F
where
  F: Fn(&WizardState<T>) -> R + Send + Sync,
{
  fn map(&self, state: &WizardState<T>) -> R {
    self(state)
  }
}

/// Serializes `value` to JSON and removes every `null`, at any depth.
///
/// Objects left empty by the removal are kept as `{}`; array elements are
/// never removed, only compacted.
pub fn to_compact_json<S: Serialize + ?Sized>(value: &S) -> serde_json::Result<Value> {
  let mut json = serde_json::to_value(value)?;
  strip_nulls(&mut json);
  Ok(json)
}

/// Removes `null`-valued object entries from `value` in place.
pub fn strip_nulls(value: &mut Value) {
  match value {
    Value::Object(map) => {
      map.retain(|_, v| !v.is_null());
      for v in map.values_mut() {
        strip_nulls(v);
      }
    }
    Value::Array(items) => {
      for item in items.iter_mut() {
        strip_nulls(item);
      }
    }
    _ => {}
  }
}
