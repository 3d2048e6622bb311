//! Async HTTP client for the portfolio backend.
//!
//! Every consumed endpoint has one typed method on [`ApiClient`]. Responses
//! are decoded into explicit envelopes at the boundary; sessions ride on the
//! client's cookie store.

mod client;
mod envelope;
mod multipart;

pub mod error;

pub use client::{ApiClient, ApiConfig, Submitted};
pub use error::{ClientError, Result};

#[cfg(test)]
mod tests;
