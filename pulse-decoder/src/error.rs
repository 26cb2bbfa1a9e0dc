//! Decoder error types.

use thiserror::Error;

/// The master table did not expose every column the dictionary needs.
///
/// Fatal to dictionary construction: the caller must fall back to an
/// empty dictionary and surface this to the operator rather than parse
/// against a partial one.
#[derive(Debug, Clone, Error)]
#[error(
    "SKU master data must contain the columns {}; missing: {}",
    .required.join(", "),
    .missing.join(", ")
)]
pub struct SchemaError {
    /// The full set of required column names.
    pub required: [&'static str; 3],
    /// The subset that was not found in the input headers.
    pub missing: Vec<String>,
}
