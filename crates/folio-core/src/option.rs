//! Option sets and the [`OptionSource`] trait.
//!
//! An option is an opaque string label (a skill, a genre, a job type or a
//! graduation year such as `"2026卒"`). Option sets are fetched once per
//! screen and shared read-only afterwards.

use std::{collections::HashMap, future::Future, sync::Arc};

use chrono::Local;
use serde::{Deserialize, Serialize};

use crate::{Error, year::graduation_year_options};

// ─── Kind ────────────────────────────────────────────────────────────────────

/// The named enumerable sets the UI selects from.
#[derive(
  Debug,
  Clone,
  Copy,
  PartialEq,
  Eq,
  Hash,
  Serialize,
  Deserialize,
  strum::Display,
  strum::EnumString,
  strum::EnumIter,
  strum::IntoStaticStr,
)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum OptionKind {
  Skills,
  Genres,
  JobTypes,
  GraduationYears,
}

impl OptionKind {
  /// Path segment under `/options/` for kinds served by the backend.
  pub fn path(self) -> Option<&'static str> {
    match self {
      Self::Skills => Some("skills"),
      Self::Genres => Some("genre"),
      Self::JobTypes => Some("job-types"),
      Self::GraduationYears => None,
    }
  }

  /// Key of the list in the backend's response envelope.
  pub fn response_key(self) -> Option<&'static str> {
    match self {
      Self::Skills => Some("skills"),
      Self::Genres => Some("genres"),
      Self::JobTypes => Some("jobTypes"),
      Self::GraduationYears => None,
    }
  }

  /// Whether this kind is fetched from the backend rather than computed.
  pub fn is_remote(self) -> bool { self.path().is_some() }
}

// ─── Snapshot ────────────────────────────────────────────────────────────────

/// An immutable snapshot of one option set, in the order the source gave.
///
/// Clones share the labels behind an `Arc`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OptionSet {
  kind:    OptionKind,
  options: Arc<[String]>,
}

impl OptionSet {
  pub fn new<I, S>(kind: OptionKind, options: I) -> Self
  where
    I: IntoIterator<Item = S>,
    S: Into<String>,
  {
    Self {
      kind,
      options: options.into_iter().map(Into::into).collect(),
    }
  }

  pub fn empty(kind: OptionKind) -> Self { Self::new(kind, Vec::<String>::new()) }

  pub fn kind(&self) -> OptionKind { self.kind }

  pub fn as_slice(&self) -> &[String] { &self.options }

  pub fn iter(&self) -> impl Iterator<Item = &str> {
    self.options.iter().map(String::as_str)
  }

  pub fn len(&self) -> usize { self.options.len() }

  pub fn is_empty(&self) -> bool { self.options.is_empty() }

  pub fn contains(&self, option: &str) -> bool {
    self.options.iter().any(|o| o == option)
  }
}

// ─── Source ──────────────────────────────────────────────────────────────────

/// A read-only provider of option sets.
///
/// Implemented by the HTTP client in `folio-client` and by [`StaticOptions`]
/// for tests and offline use.
pub trait OptionSource: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  /// Fetch the labels for `kind` once. No retries.
  fn fetch_options(
    &self,
    kind: OptionKind,
  ) -> impl Future<Output = Result<Vec<String>, Self::Error>> + Send + '_;
}

/// Load the option set for `kind`.
///
/// Graduation years are computed from today's date and never fetched. A
/// failed fetch is logged and yields an empty set: callers treat that as
/// "no options available", not as an error.
pub async fn load<S: OptionSource>(source: &S, kind: OptionKind) -> OptionSet {
  if !kind.is_remote() {
    return OptionSet::new(kind, graduation_year_options(Local::now().date_naive()));
  }

  match source.fetch_options(kind).await {
    Ok(options) => {
      tracing::debug!(%kind, count = options.len(), "loaded options");
      OptionSet::new(kind, options)
    }
    Err(e) => {
      tracing::warn!(%kind, error = %e, "failed to load options; continuing without");
      OptionSet::empty(kind)
    }
  }
}

/// An in-memory [`OptionSource`].
///
/// Kinds that were never registered fail with
/// [`Error::OptionsUnavailable`], which [`load`] turns into an empty set.
#[derive(Debug, Clone, Default)]
pub struct StaticOptions {
  sets: HashMap<OptionKind, Vec<String>>,
}

impl StaticOptions {
  pub fn new() -> Self { Self::default() }

  /// Register the labels returned for `kind`.
  pub fn with<I, S>(mut self, kind: OptionKind, options: I) -> Self
  where
    I: IntoIterator<Item = S>,
    S: Into<String>,
  {
    self
      .sets
      .insert(kind, options.into_iter().map(Into::into).collect());
    self
  }
}

impl OptionSource for StaticOptions {
  type Error = Error;

  async fn fetch_options(&self, kind: OptionKind) -> Result<Vec<String>, Error> {
    self
      .sets
      .get(&kind)
      .cloned()
      .ok_or(Error::OptionsUnavailable(kind))
  }
}

#[cfg(test)]
mod tests {
  use std::str::FromStr;

  use super::*;

  #[tokio::test]
  async fn load_returns_source_order() {
    let source = StaticOptions::new().with(OptionKind::Skills, ["Rust", "Go", "TypeScript"]);
    let set = load(&source, OptionKind::Skills).await;
    assert_eq!(set.kind(), OptionKind::Skills);
    assert_eq!(set.as_slice(), ["Rust", "Go", "TypeScript"]);
  }

  #[tokio::test]
  async fn failed_fetch_yields_empty_set() {
    let source = StaticOptions::new();
    let set = load(&source, OptionKind::Genres).await;
    assert!(set.is_empty());
    assert_eq!(set.kind(), OptionKind::Genres);
  }

  #[tokio::test]
  async fn graduation_years_are_computed_locally() {
    // No graduation years registered: the source must not be consulted.
    let source = StaticOptions::new();
    let set = load(&source, OptionKind::GraduationYears).await;
    assert_eq!(set.len(), 4);
    assert!(set.iter().all(|y| y.ends_with('卒')));
  }

  #[test]
  fn kinds_parse_from_kebab_case() {
    assert_eq!(OptionKind::from_str("job-types").unwrap(), OptionKind::JobTypes);
    assert_eq!(OptionKind::Genres.to_string(), "genres");
    assert_eq!(OptionKind::Genres.path(), Some("genre"));
    assert!(!OptionKind::GraduationYears.is_remote());
  }
}
