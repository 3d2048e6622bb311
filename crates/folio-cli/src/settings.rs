//! Layered configuration: TOML file, then `FOLIO_*` environment variables,
//! then command-line flags.

use std::{path::Path, time::Duration};

use anyhow::Context as _;
use folio_client::ApiConfig;
use serde::Deserialize;

fn default_base_url() -> String { "http://localhost:8080".to_owned() }

fn default_timeout_secs() -> u64 { 30 }

/// Shape of the optional config file.
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
  #[serde(default = "default_base_url")]
  pub base_url:     String,
  #[serde(default = "default_timeout_secs")]
  pub timeout_secs: u64,
  /// Credentials used to log in at startup, if both are set.
  #[serde(default)]
  pub email:        Option<String>,
  #[serde(default)]
  pub password:     Option<String>,
}

impl Default for Settings {
  fn default() -> Self {
    Self {
      base_url:     default_base_url(),
      timeout_secs: default_timeout_secs(),
      email:        None,
      password:     None,
    }
  }
}

impl Settings {
  /// Read `path` (optional) and the environment.
  pub fn load(path: &Path) -> anyhow::Result<Self> {
    config::Config::builder()
      .add_source(config::File::from(path).required(false))
      .add_source(config::Environment::with_prefix("FOLIO"))
      .build()
      .with_context(|| format!("failed to read config file {}", path.display()))?
      .try_deserialize()
      .context("failed to deserialise settings")
  }

  /// CLI flags override the file and the environment.
  pub fn with_overrides(
    mut self,
    url: Option<String>,
    email: Option<String>,
    password: Option<String>,
  ) -> Self {
    if let Some(url) = url {
      self.base_url = url;
    }
    if email.is_some() {
      self.email = email;
    }
    if password.is_some() {
      self.password = password;
    }
    self
  }

  pub fn api_config(&self) -> ApiConfig {
    ApiConfig {
      base_url: self.base_url.clone(),
      timeout:  Duration::from_secs(self.timeout_secs),
    }
  }

  /// Email and password, when both are configured and non-empty.
  pub fn credentials(&self) -> Option<(&str, &str)> {
    match (self.email.as_deref(), self.password.as_deref()) {
      (Some(e), Some(p)) if !e.is_empty() && !p.is_empty() => Some((e, p)),
      _ => None,
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn missing_file_falls_back_to_defaults() {
    let settings = Settings::load(Path::new("does-not-exist.toml")).unwrap();
    assert_eq!(settings.timeout_secs, 30);
    assert!(settings.base_url.starts_with("http"));
  }

  #[test]
  fn flags_override_and_credentials_need_both() {
    let settings = Settings::default().with_overrides(
      Some("http://example.test".into()),
      Some("a@example.com".into()),
      None,
    );
    assert_eq!(settings.base_url, "http://example.test");
    assert!(settings.credentials().is_none());

    let settings = settings.with_overrides(None, None, Some("password1".into()));
    assert_eq!(settings.credentials(), Some(("a@example.com", "password1")));
  }
}
