//! Error type for `folio-client`.

use folio_core::{FieldErrors, option::OptionKind};
use thiserror::Error;

/// Shown when the backend rejects a request without saying why.
pub const REJECTED_FALLBACK: &str = "the server rejected the request";

#[derive(Debug, Error)]
pub enum ClientError {
  /// Transport failure; the request may not have reached the backend.
  #[error("a network error occurred")]
  Network(#[source] reqwest::Error),

  /// Non-2xx response. `message` is the backend's own `error` text when it
  /// sent one, [`REJECTED_FALLBACK`] otherwise.
  #[error("{message}")]
  Rejected { status: u16, message: String },

  #[error("unexpected response from {endpoint}: {source}")]
  Decode {
    endpoint: String,
    #[source]
    source:   serde_json::Error,
  },

  /// Client-side validation failed; nothing was sent.
  #[error("invalid input: {0}")]
  Invalid(#[from] FieldErrors),

  #[error("cannot attach {file_name}: {source}")]
  Attachment {
    file_name: String,
    #[source]
    source:    reqwest::Error,
  },

  #[error("{0} options are not served by the backend")]
  NotServed(OptionKind),

  #[error("failed to build HTTP client: {0}")]
  Build(#[source] reqwest::Error),
}

impl ClientError {
  /// HTTP status of a rejected request.
  pub fn status(&self) -> Option<u16> {
    match self {
      Self::Rejected { status, .. } => Some(*status),
      _ => None,
    }
  }

  pub fn is_unauthorized(&self) -> bool { self.status() == Some(401) }
}

pub type Result<T, E = ClientError> = std::result::Result<T, E>;
