//! End-to-end decoding scenarios against a realistic master dictionary.

use pulse_decoder::dictionary::{Dictionary, Kind, RawRow};
use pulse_decoder::parser::{
    parse, parse_batch, DecodedSku, UNKNOWN_CATEGORY, UNKNOWN_COLOR, UNKNOWN_PRODUCT,
    UNKNOWN_SEASON, UNKNOWN_SIZE, UNKNOWN_SUB_CATEGORY, UNKNOWN_YEAR,
};

fn raw(code: &str, meaning: &str, kind: &str) -> RawRow {
    RawRow {
        code: code.into(),
        meaning: meaning.into(),
        kind: kind.into(),
    }
}

/// The reference dictionary: one kind-tagged code pair plus one code for
/// each positional field.
fn master() -> Dictionary {
    Dictionary::from_rows([
        raw("Z11", "Jackets", "CATEGORY"),
        raw("822", "Winter", "SUB CATEGORY"),
        raw("21", "2021", ""),
        raw("BAS", "Basic", ""),
        raw("LUNA", "Luna Line", ""),
        raw("BWT", "Beige/White", ""),
        raw("03", "Size M", ""),
    ])
}

#[test]
fn two_token_head_resolves_category_and_sub_category() {
    let decoded = parse("Z1182221BAS LUNA-BWT03", &master());
    assert_eq!(
        decoded,
        DecodedSku {
            original: "Z1182221BAS LUNA-BWT03".into(),
            category: "Jackets".into(),
            sub_category: "Winter".into(),
            production_year: "2021".into(),
            season: "Basic".into(),
            product_name: "Luna Line".into(),
            color: "Beige/White".into(),
            size: "Size M".into(),
        }
    );
}

#[test]
fn head_variant_without_year_token_degrades_gracefully() {
    // Same shape minus the year token: the category prefix still
    // resolves, the fields whose codes are absent fall to sentinels.
    let decoded = parse("Z11822BAS LUNA-BWT03", &master());
    assert_eq!(decoded.category, "Jackets");
    assert_eq!(decoded.sub_category, UNKNOWN_SUB_CATEGORY);
    assert_eq!(decoded.production_year, UNKNOWN_YEAR);
    assert_eq!(decoded.season, "Basic");
    assert_eq!(decoded.product_name, "Luna Line");
    assert_eq!(decoded.color, "Beige/White");
    assert_eq!(decoded.size, "Size M");
}

#[test]
fn unrecognized_codes_yield_all_sentinels() {
    let decoded = parse("ZOZA21BAS-MIA-TBW35", &Dictionary::empty());
    assert_eq!(decoded.original, "ZOZA21BAS-MIA-TBW35");
    assert_eq!(decoded.category, UNKNOWN_CATEGORY);
    assert_eq!(decoded.sub_category, UNKNOWN_SUB_CATEGORY);
    assert_eq!(decoded.production_year, UNKNOWN_YEAR);
    assert_eq!(decoded.season, UNKNOWN_SEASON);
    assert_eq!(decoded.product_name, UNKNOWN_PRODUCT);
    assert_eq!(decoded.color, UNKNOWN_COLOR);
    assert_eq!(decoded.size, UNKNOWN_SIZE);
}

#[test]
fn empty_string_yields_all_sentinels() {
    let decoded = parse("", &master());
    assert_eq!(decoded, DecodedSku::unknown(""));
}

#[test]
fn master_without_kind_column_is_a_schema_error() {
    let headers = ["CODE", "ARTI"].map(String::from);
    let records = vec![vec!["Z11".to_string(), "Jackets".to_string()]];
    let err = Dictionary::from_table(&headers, records).unwrap_err();
    assert_eq!(err.missing, vec!["JENIS".to_string()]);

    // The caller's fallback is an empty dictionary; parsing against it
    // still works and yields sentinel records.
    let decoded = parse("Z1182221BAS LUNA-BWT03", &Dictionary::empty());
    assert_eq!(decoded.category, UNKNOWN_CATEGORY);
}

#[test]
fn dictionary_round_trips_master_rows() {
    let dict = master();
    assert_eq!(dict.meaning_for_kind("Z11", Kind::Category), Some("Jackets"));
    assert_eq!(
        dict.meaning_for_kind("822", Kind::SubCategory),
        Some("Winter")
    );
    assert_eq!(dict.meaning("LUNA"), Some("Luna Line"));
    assert_eq!(dict.meaning("03"), Some("Size M"));
}

#[test]
fn batch_decodes_mixed_quality_exports() {
    let dict = master();
    let skus: Vec<String> = vec![
        "Z1182221BAS LUNA-BWT03".into(),
        "201A21BAS-CND-ORG02".into(),
        "not-a-sku".into(),
        "".into(),
    ];
    let decoded = parse_batch(&skus, &dict);
    assert_eq!(decoded.len(), skus.len());
    assert_eq!(decoded[0].category, "Jackets");
    // A structurally valid SKU with unlisted codes resolves only the
    // fields whose codes exist.
    assert_eq!(decoded[1].production_year, "2021");
    assert_eq!(decoded[1].season, "Basic");
    assert_eq!(decoded[1].color, UNKNOWN_COLOR);
    assert_eq!(decoded[2], DecodedSku::unknown("not-a-sku"));
    assert_eq!(decoded[3], DecodedSku::unknown(""));
}
