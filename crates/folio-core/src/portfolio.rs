//! Portfolio records as returned by the backend.
//!
//! Records are read-only here: they are created by the backend when a
//! submission is accepted and are never mutated by the client.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{de, user::User};

/// A reference to an uploaded image. The URL is opaque.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageRef {
  #[serde(alias = "id", rename = "ID", default)]
  pub id:  u64,
  #[serde(alias = "url", rename = "URL", default, deserialize_with = "de::nullable_string")]
  pub url: String,
}

/// A published work entry.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct PortfolioRecord {
  #[serde(alias = "id", rename = "ID", default)]
  pub id:           u64,
  #[serde(alias = "title", default, deserialize_with = "de::nullable_string")]
  pub title:        String,
  #[serde(alias = "description", default, deserialize_with = "de::nullable_string")]
  pub description:  String,
  #[serde(alias = "githubLink", rename = "GitHubLink", default, deserialize_with = "de::nullable_string")]
  pub github_link:  String,
  #[serde(alias = "productLink", default, deserialize_with = "de::nullable_string")]
  pub product_link: String,
  #[serde(alias = "genres", default, deserialize_with = "de::nullable_vec")]
  pub genres:       Vec<String>,
  #[serde(alias = "skills", default, deserialize_with = "de::nullable_vec")]
  pub skills:       Vec<String>,
  #[serde(alias = "images", default, deserialize_with = "de::nullable_vec")]
  pub images:       Vec<ImageRef>,
  #[serde(alias = "userId", rename = "UserID", default)]
  pub user_id:      u64,
  /// The author summary; absent when the backend did not preload it.
  #[serde(alias = "user", default)]
  pub user:         Option<User>,
  #[serde(alias = "createdAt", default)]
  pub created_at:   Option<DateTime<Utc>>,
}

impl PortfolioRecord {
  /// The author's canonical graduation year, if known.
  pub fn graduation_year(&self) -> Option<String> {
    self.user.as_ref().and_then(User::graduation_year)
  }

  /// The first image, used as the listing thumbnail.
  pub fn cover(&self) -> Option<&ImageRef> { self.images.first() }
}
