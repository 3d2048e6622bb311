//! Response envelopes, one per endpoint shape.
//!
//! The backend wraps most payloads in a single-key object and sends Go nil
//! slices as `null`; both are narrowed here before anything else sees them.
//! Newer backends return the post endpoints unwrapped, so those accept either.

use std::collections::HashMap;

use folio_core::{portfolio::PortfolioRecord, user::User};
use serde::Deserialize;

/// `{ "skills": [...] }`, `{ "genres": [...] }` or `{ "jobTypes": [...] }`.
pub(crate) type OptionsBody = HashMap<String, Option<Vec<String>>>;

/// `GET /Portfolio/getAllPosts`. Newer backends send the bare array.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub(crate) enum AllPosts {
  Bare(Vec<PortfolioRecord>),
  Wrapped {
    #[serde(default)]
    portfolio: Option<Vec<PortfolioRecord>>,
  },
}

impl AllPosts {
  pub fn into_records(self) -> Vec<PortfolioRecord> {
    match self {
      Self::Bare(records) => records,
      Self::Wrapped { portfolio } => portfolio.unwrap_or_default(),
    }
  }
}

/// `GET /Portfolio/getUserPosts`. Newer backends send the bare array.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub(crate) enum UserPosts {
  Bare(Vec<PortfolioRecord>),
  Wrapped {
    #[serde(default)]
    posts: Option<Vec<PortfolioRecord>>,
  },
}

impl UserPosts {
  pub fn into_records(self) -> Vec<PortfolioRecord> {
    match self {
      Self::Bare(records) => records,
      Self::Wrapped { posts } => posts.unwrap_or_default(),
    }
  }
}

/// `GET /Portfolio/{id}`. Newer backends send the bare record.
///
/// `Wrapped` is tried first: every record field is optional, so `Bare` would
/// also accept `{ "post": ... }` as an empty record.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub(crate) enum OnePost {
  Wrapped { post: PortfolioRecord },
  Bare(PortfolioRecord),
}

impl OnePost {
  pub fn into_post(self) -> PortfolioRecord {
    match self {
      Self::Wrapped { post } | Self::Bare(post) => post,
    }
  }
}

/// `GET /user/GetInfo` and the user update endpoints.
#[derive(Debug, Deserialize)]
pub(crate) struct UserBody {
  pub user: User,
}

/// Any success response carrying a human-readable message.
#[derive(Debug, Default, Deserialize)]
pub(crate) struct MessageBody {
  #[serde(default)]
  pub message: Option<String>,
}

/// Any failure response.
#[derive(Debug, Default, Deserialize)]
pub(crate) struct ErrorBody {
  #[serde(default)]
  pub error: Option<String>,
}

impl ErrorBody {
  /// The backend's message, if the body carried a non-blank one.
  pub fn parse(body: &[u8]) -> Option<String> {
    serde_json::from_slice::<Self>(body)
      .ok()
      .and_then(|b| b.error)
      .filter(|m| !m.trim().is_empty())
  }
}
