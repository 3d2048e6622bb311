//! Error types for `folio-core`.

use thiserror::Error;

use crate::{field::FieldErrors, option::OptionKind};

#[derive(Debug, Error)]
pub enum Error {
  #[error("at most {max} options can be selected")]
  SelectionLimit { max: usize },

  #[error("at most {max} images can be attached ({attempted} requested)")]
  TooManyImages { max: usize, attempted: usize },

  #[error("no {0} options are available")]
  OptionsUnavailable(OptionKind),

  #[error("invalid input: {0}")]
  Invalid(#[from] FieldErrors),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
