//! Business-digest pipeline over decoded SKU data.
//!
//! The crate covers everything between the raw spreadsheet exports and
//! the rendered digest: CSV loaders for the four export types, SKU
//! decoration of the transaction tables, date/category filtering,
//! chart-ready aggregations, and a staged candidate pipeline that turns
//! sales-vs-stock imbalances into restock and markdown recommendations.

pub mod aggregate;
pub mod candidate_pipeline;
pub mod components;
pub mod dataset;
pub mod decorate;
pub mod error;
pub mod filter;
pub mod hydrator;
pub mod loaders;
pub mod pipelines;
pub mod query_hydrator;
pub mod scorer;
pub mod selector;
pub mod side_effect;
pub mod source;
pub mod types;
pub mod util;

pub use dataset::Dataset;
pub use error::{LoadError, LoadResult};
