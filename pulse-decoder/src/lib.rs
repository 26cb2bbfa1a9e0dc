//! SKU decoding core.
//!
//! A SKU like `Z1182221BAS LUNA-BWT03` packs category, sub-category,
//! production year, season, product name, color, and size into fixed
//! positions. This crate turns a master reference table into a
//! [`Dictionary`](dictionary::Dictionary) and decodes raw SKU strings
//! into [`DecodedSku`](parser::DecodedSku) records.
//!
//! Both halves are pure functions over immutable inputs: build the
//! dictionary once, then decode any number of SKUs against it, in
//! parallel if the batch is large.

pub mod dictionary;
pub mod error;
pub mod parser;

pub use dictionary::{Dictionary, Entry, Kind, RawRow};
pub use error::SchemaError;
pub use parser::{parse, parse_batch, DecodedSku};
