//! Decoder dictionary construction.
//!
//! The master reference table maps short codes to human-readable
//! meanings. Rows are `(code, meaning, kind)` triples; only category
//! and sub-category codes carry a meaningful kind tag, every other code
//! is disambiguated by its position in the SKU pattern.

use std::collections::HashMap;

use crate::error::SchemaError;

/// Master-table column holding the lookup code.
pub const CODE_COLUMN: &str = "CODE";
/// Master-table column holding the human-readable meaning.
pub const MEANING_COLUMN: &str = "ARTI";
/// Master-table column holding the kind tag.
pub const KIND_COLUMN: &str = "JENIS";
/// All three columns the master table must expose.
pub const REQUIRED_COLUMNS: [&str; 3] = [CODE_COLUMN, MEANING_COLUMN, KIND_COLUMN];

/// The kind tag recorded for a code, parsed once at build time so the
/// parser's kind gate is an enum comparison rather than a repeated
/// string compare.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Kind {
    Category,
    SubCategory,
    /// Year/season/product/color/size codes carry no kind tag.
    Untagged,
}

impl Kind {
    /// Parse the raw master-file tag. Anything other than the two known
    /// tags (after trimming and upper-casing) is untagged.
    pub fn from_raw(raw: &str) -> Self {
        match raw.trim().to_uppercase().as_str() {
            "CATEGORY" => Kind::Category,
            "SUB CATEGORY" => Kind::SubCategory,
            _ => Kind::Untagged,
        }
    }
}

/// One master-table row before normalization.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RawRow {
    pub code: String,
    pub meaning: String,
    pub kind: String,
}

/// The stored value for a code.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Entry {
    pub meaning: String,
    pub kind: Kind,
}

/// Mapping from normalized code to its meaning and kind.
///
/// Codes are trimmed and upper-cased on the way in; lookups expect the
/// caller to pass codes normalized the same way (the parser upper-cases
/// every captured group before resolving it).
#[derive(Clone, Debug, Default)]
pub struct Dictionary {
    entries: HashMap<String, Entry>,
}

impl Dictionary {
    /// A dictionary with no entries. Parsing against it yields
    /// all-sentinel records, which is valid output, not an error.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Build from normalized rows. Pure and idempotent: rebuilding from
    /// the same rows yields the same mapping.
    ///
    /// Blank codes are skipped silently. Duplicate codes resolve to the
    /// last row in input order.
    pub fn from_rows<I>(rows: I) -> Self
    where
        I: IntoIterator<Item = RawRow>,
    {
        let mut entries = HashMap::new();
        for row in rows {
            let code = row.code.trim().to_uppercase();
            if code.is_empty() {
                continue;
            }
            entries.insert(
                code,
                Entry {
                    meaning: row.meaning.trim().to_string(),
                    kind: Kind::from_raw(&row.kind),
                },
            );
        }
        Self { entries }
    }

    /// Build from a header row plus string records, the shape a
    /// spreadsheet export loader hands over.
    ///
    /// Header names are whitespace-normalized before matching, the way
    /// the exports' column names need cleaning. All three of `CODE`,
    /// `ARTI`, `JENIS` must be present; any extra columns are ignored.
    /// Cells missing from short rows read as blank.
    pub fn from_table<S, R>(headers: &[S], records: R) -> Result<Self, SchemaError>
    where
        S: AsRef<str>,
        R: IntoIterator<Item = Vec<String>>,
    {
        let normalized: Vec<String> = headers
            .iter()
            .map(|h| normalize_header(h.as_ref()))
            .collect();

        let position = |name: &str| normalized.iter().position(|h| h == name);
        let code_idx = position(CODE_COLUMN);
        let meaning_idx = position(MEANING_COLUMN);
        let kind_idx = position(KIND_COLUMN);

        let missing: Vec<String> = REQUIRED_COLUMNS
            .iter()
            .zip([code_idx, meaning_idx, kind_idx])
            .filter(|(_, idx)| idx.is_none())
            .map(|(name, _)| name.to_string())
            .collect();
        if !missing.is_empty() {
            return Err(SchemaError {
                required: REQUIRED_COLUMNS,
                missing,
            });
        }

        let (code_idx, meaning_idx, kind_idx) =
            (code_idx.unwrap(), meaning_idx.unwrap(), kind_idx.unwrap());
        let cell = |record: &Vec<String>, idx: usize| {
            record.get(idx).cloned().unwrap_or_default()
        };

        Ok(Self::from_rows(records.into_iter().map(|record| RawRow {
            code: cell(&record, code_idx),
            meaning: cell(&record, meaning_idx),
            kind: cell(&record, kind_idx),
        })))
    }

    /// Look up a normalized code.
    pub fn get(&self, code: &str) -> Option<&Entry> {
        self.entries.get(code)
    }

    /// The meaning for a code, ignoring its kind.
    pub fn meaning(&self, code: &str) -> Option<&str> {
        self.entries.get(code).map(|e| e.meaning.as_str())
    }

    /// The meaning for a code only if its recorded kind matches.
    pub fn meaning_for_kind(&self, code: &str, kind: Kind) -> Option<&str> {
        self.entries
            .get(code)
            .filter(|e| e.kind == kind)
            .map(|e| e.meaning.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Collapse internal whitespace runs to single spaces and trim.
fn normalize_header(header: &str) -> String {
    header.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(code: &str, meaning: &str, kind: &str) -> RawRow {
        RawRow {
            code: code.into(),
            meaning: meaning.into(),
            kind: kind.into(),
        }
    }

    #[test]
    fn codes_are_trimmed_and_upper_cased() {
        let dict = Dictionary::from_rows([row("  z11 ", " Jackets ", "category")]);
        let entry = dict.get("Z11").unwrap();
        assert_eq!(entry.meaning, "Jackets");
        assert_eq!(entry.kind, Kind::Category);
    }

    #[test]
    fn blank_codes_are_skipped() {
        let dict = Dictionary::from_rows([row("   ", "ignored", ""), row("A", "kept", "")]);
        assert_eq!(dict.len(), 1);
        assert_eq!(dict.meaning("A"), Some("kept"));
    }

    #[test]
    fn duplicate_codes_take_the_last_row() {
        let dict = Dictionary::from_rows([
            row("Z11", "First", "CATEGORY"),
            row("z11", "Second", "SUB CATEGORY"),
        ]);
        assert_eq!(dict.len(), 1);
        let entry = dict.get("Z11").unwrap();
        assert_eq!(entry.meaning, "Second");
        assert_eq!(entry.kind, Kind::SubCategory);
    }

    #[test]
    fn kind_gate_distinguishes_tags() {
        let dict = Dictionary::from_rows([
            row("Z11", "Jackets", "CATEGORY"),
            row("822", "Winter", "SUB CATEGORY"),
            row("21", "2021", ""),
        ]);
        assert_eq!(dict.meaning_for_kind("Z11", Kind::Category), Some("Jackets"));
        assert_eq!(dict.meaning_for_kind("Z11", Kind::SubCategory), None);
        assert_eq!(dict.meaning_for_kind("822", Kind::SubCategory), Some("Winter"));
        assert_eq!(dict.meaning_for_kind("21", Kind::Category), None);
        assert_eq!(dict.meaning("21"), Some("2021"));
    }

    #[test]
    fn unknown_kind_strings_are_untagged() {
        assert_eq!(Kind::from_raw(" category "), Kind::Category);
        assert_eq!(Kind::from_raw("sub category"), Kind::SubCategory);
        assert_eq!(Kind::from_raw("YEAR"), Kind::Untagged);
        assert_eq!(Kind::from_raw(""), Kind::Untagged);
    }

    #[test]
    fn from_table_maps_columns_by_header() {
        let headers = ["CODE", "ARTI", "JENIS", "KETERANGAN"];
        let records = vec![
            vec!["Z11".into(), "Jackets".into(), "CATEGORY".into(), "extra".into()],
            vec!["21".into(), "2021".into(), "".into()],
        ];
        let dict = Dictionary::from_table(&headers, records).unwrap();
        assert_eq!(dict.len(), 2);
        assert_eq!(dict.meaning("Z11"), Some("Jackets"));
        // Short row: missing kind cell reads as blank.
        assert_eq!(dict.get("21").unwrap().kind, Kind::Untagged);
    }

    #[test]
    fn from_table_normalizes_messy_headers() {
        // Stray padding and embedded newlines collapse away.
        let headers = ["CODE\n", " ARTI ", "JENIS  "].map(String::from);
        let dict = Dictionary::from_table(&headers, Vec::new()).unwrap();
        assert!(dict.is_empty());

        // Whitespace runs collapse to one space, they do not disappear:
        // "AR TI" stays distinct from ARTI.
        let headers = ["CODE", "AR  TI", "JENIS"].map(String::from);
        let err = Dictionary::from_table(&headers, Vec::new()).unwrap_err();
        assert_eq!(err.missing, vec!["ARTI".to_string()]);
    }

    #[test]
    fn from_table_reports_all_missing_columns() {
        let headers = ["CODE"].map(String::from);
        let err = Dictionary::from_table(&headers, Vec::new()).unwrap_err();
        assert_eq!(err.required, REQUIRED_COLUMNS);
        assert_eq!(err.missing, vec!["ARTI".to_string(), "JENIS".to_string()]);
        let text = err.to_string();
        assert!(text.contains("CODE, ARTI, JENIS"), "message was: {text}");
    }
}
