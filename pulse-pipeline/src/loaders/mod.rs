//! CSV loaders for the four spreadsheet exports.
//!
//! One loader per export: the SKU master reference plus the sales,
//! inbound, and stock transaction tables. Headers are cleaned and
//! renamed to one canonical set per table before rows deserialize, so
//! the record structs never see the exports' raw header quirks.

pub mod clean;
pub mod inbound;
pub mod master;
pub mod sales;
pub mod stock;

use std::fs::File;
use std::io::Read;

use serde::de::DeserializeOwned;

use crate::error::{LoadError, LoadResult};

pub(crate) fn open(path: &str) -> LoadResult<File> {
    File::open(path).map_err(|source| LoadError::Io {
        path: path.to_string(),
        source,
    })
}

pub(crate) fn csv_reader<R: Read>(reader: R) -> csv::Reader<R> {
    csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_reader(reader)
}

/// Read a whole export: headers are whitespace-normalized and passed
/// through the table's rename map, then every row deserializes against
/// the cleaned header set. Errors carry the 1-based file line.
pub(crate) fn read_table<R, T>(
    reader: R,
    rename: fn(String) -> String,
) -> LoadResult<(Vec<String>, Vec<T>)>
where
    R: Read,
    T: DeserializeOwned,
{
    let mut csv_reader = csv_reader(reader);
    let headers: Vec<String> = csv_reader
        .headers()
        .map_err(LoadError::Header)?
        .iter()
        .map(|header| rename(clean::normalize_header(header)))
        .collect();
    let header_record = csv::StringRecord::from(headers.clone());

    let mut rows = Vec::new();
    for (index, record) in csv_reader.records().enumerate() {
        let line = index + 2;
        let record = record.map_err(|source| LoadError::Csv { line, source })?;
        let row: T = record
            .deserialize(Some(&header_record))
            .map_err(|source| LoadError::Csv { line, source })?;
        rows.push(row);
    }
    Ok((headers, rows))
}
