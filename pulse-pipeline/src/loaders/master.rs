//! SKU master reference loader.
//!
//! The master export carries `CODE`, `ARTI`, `JENIS` columns; the
//! dictionary builder owns the schema check, so a master file missing
//! one of them surfaces as a `SchemaError` and the caller falls back to
//! an empty dictionary.

use std::io::Read;

use pulse_decoder::Dictionary;

use super::clean;
use crate::error::{LoadError, LoadResult};

/// Load the master reference from a CSV reader and build the decoder
/// dictionary from it.
pub fn load_master<R: Read>(reader: R) -> LoadResult<Dictionary> {
    let mut csv_reader = super::csv_reader(reader);
    let headers: Vec<String> = csv_reader
        .headers()
        .map_err(LoadError::Header)?
        .iter()
        .map(clean::normalize_header)
        .collect();

    let mut records = Vec::new();
    for (index, record) in csv_reader.records().enumerate() {
        let record = record.map_err(|source| LoadError::Csv {
            line: index + 2,
            source,
        })?;
        records.push(record.iter().map(str::to_string).collect::<Vec<String>>());
    }

    Ok(Dictionary::from_table(&headers, records)?)
}

/// Load the master reference from a CSV file path.
pub fn load_master_file(path: &str) -> LoadResult<Dictionary> {
    load_master(super::open(path)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pulse_decoder::Kind;

    const SAMPLE_CSV: &str = "\
CODE, ARTI ,JENIS
Z11,Jackets,CATEGORY
822,Winter,SUB CATEGORY
21,2021,
z11,Jackets (revised),CATEGORY
";

    #[test]
    fn master_builds_a_dictionary() {
        let dict = load_master(SAMPLE_CSV.as_bytes()).unwrap();
        assert_eq!(dict.len(), 3);
        assert_eq!(
            dict.meaning_for_kind("822", Kind::SubCategory),
            Some("Winter")
        );
        // Later duplicate wins, case-insensitively.
        assert_eq!(dict.meaning("Z11"), Some("Jackets (revised)"));
    }

    #[test]
    fn missing_kind_column_is_a_schema_error() {
        let csv_data = "CODE,ARTI\nZ11,Jackets\n";
        let err = load_master(csv_data.as_bytes()).unwrap_err();
        match err {
            LoadError::Schema(schema) => {
                assert_eq!(schema.missing, vec!["JENIS".to_string()])
            }
            other => panic!("expected SchemaError, got {other}"),
        }
    }

    #[test]
    fn empty_master_yields_an_empty_dictionary() {
        let csv_data = "CODE,ARTI,JENIS\n";
        let dict = load_master(csv_data.as_bytes()).unwrap();
        assert!(dict.is_empty());
    }
}
