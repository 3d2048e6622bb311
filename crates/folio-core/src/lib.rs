//! Core types and selection logic for the folio portfolio client.
//!
//! No HTTP here. This crate owns the option sets, the tag selector, the
//! listing filter and the draft submission; `folio-client` moves them to and
//! from the backend.

// Implementors of `OptionSource` write `async fn`.
#![allow(async_fn_in_trait)]

pub mod attachment;
pub mod auth;
pub mod draft;
pub mod error;
pub mod field;
pub mod filter;
pub mod option;
pub mod portfolio;
pub mod selector;
pub mod user;
pub mod year;

mod de;

pub use error::{Error, Result};
pub use field::{Field, FieldErrors};
