//! Per-field validation errors shared by every form.

use std::{collections::BTreeMap, fmt};

use serde::Serialize;

/// A form field that can fail client-side validation.
#[derive(
  Debug,
  Clone,
  Copy,
  PartialEq,
  Eq,
  PartialOrd,
  Ord,
  Hash,
  Serialize,
  strum::Display,
  strum::IntoStaticStr,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum Field {
  Title,
  Genres,
  Images,
  Skills,
  Email,
  Password,
  PasswordConfirmation,
  Token,
}

/// Message recorded for a missing required value.
pub const REQUIRED: &str = "required";

/// Validation failures keyed by field, at most one message per field.
///
/// Iteration order follows the declaration order of [`Field`] so reports are
/// stable.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct FieldErrors(BTreeMap<Field, String>);

impl FieldErrors {
  pub fn new() -> Self { Self::default() }

  /// Record `message` for `field`. A later message replaces an earlier one.
  pub fn insert(&mut self, field: Field, message: impl Into<String>) {
    self.0.insert(field, message.into());
  }

  /// Record [`REQUIRED`] for `field` when `missing` holds.
  pub fn require(&mut self, field: Field, missing: bool) {
    if missing {
      self.insert(field, REQUIRED);
    }
  }

  pub fn get(&self, field: Field) -> Option<&str> {
    self.0.get(&field).map(String::as_str)
  }

  pub fn contains(&self, field: Field) -> bool { self.0.contains_key(&field) }

  pub fn len(&self) -> usize { self.0.len() }

  pub fn is_empty(&self) -> bool { self.0.is_empty() }

  pub fn iter(&self) -> impl Iterator<Item = (Field, &str)> {
    self.0.iter().map(|(f, m)| (*f, m.as_str()))
  }

  /// `Ok(value)` when no errors were recorded, otherwise `Err(self)`.
  pub fn into_result<T>(self, value: T) -> Result<T, Self> {
    if self.is_empty() { Ok(value) } else { Err(self) }
  }
}

impl fmt::Display for FieldErrors {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    for (i, (field, message)) in self.iter().enumerate() {
      if i > 0 {
        f.write_str("; ")?;
      }
      write!(f, "{field}: {message}")?;
    }
    Ok(())
  }
}

impl std::error::Error for FieldErrors {}
