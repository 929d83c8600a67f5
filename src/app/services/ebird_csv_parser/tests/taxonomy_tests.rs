//! Tests for countable-species rules

use crate::app::services::ebird_csv_parser::{TaxonCategory, is_countable};

#[test]
fn test_category_parsing_is_case_insensitive() {
    assert_eq!("Species".parse::<TaxonCategory>(), Ok(TaxonCategory::Species));
    assert_eq!(" SPUH ".parse::<TaxonCategory>(), Ok(TaxonCategory::Spuh));
    assert_eq!("issf".parse::<TaxonCategory>(), Ok(TaxonCategory::Issf));
    assert!("subspecies".parse::<TaxonCategory>().is_err());
}

#[test]
fn test_countable_categories() {
    assert!(TaxonCategory::Species.is_countable());
    assert!(TaxonCategory::Issf.is_countable());
    assert!(TaxonCategory::Form.is_countable());
    for category in [
        TaxonCategory::Spuh,
        TaxonCategory::Slash,
        TaxonCategory::Hybrid,
        TaxonCategory::Intergrade,
        TaxonCategory::Domestic,
    ] {
        assert!(!category.is_countable(), "{:?} should not count", category);
    }
}

#[test]
fn test_name_inference() {
    assert_eq!(
        TaxonCategory::infer("Northern Cardinal", "Cardinalis cardinalis"),
        TaxonCategory::Species
    );
    assert_eq!(
        TaxonCategory::infer("Rock Pigeon (Feral Pigeon)", "Columba livia (Feral Pigeon)"),
        TaxonCategory::Species
    );
    assert_eq!(
        TaxonCategory::infer("Muscovy Duck (Domestic type)", "Cairina moschata (Domestic type)"),
        TaxonCategory::Domestic
    );
    assert_eq!(
        TaxonCategory::infer("Glaucous-winged x Western Gull", "Larus glaucescens x occidentalis"),
        TaxonCategory::Hybrid
    );
    assert_eq!(
        TaxonCategory::infer("Alder/Willow Flycatcher", "Empidonax alnorum/traillii"),
        TaxonCategory::Slash
    );
    assert_eq!(
        TaxonCategory::infer("gull sp.", "Larinae sp."),
        TaxonCategory::Spuh
    );
    assert_eq!(
        TaxonCategory::infer("Northern Flicker (Yellow-shafted intergrade)", "Colaptes auratus"),
        TaxonCategory::Intergrade
    );
}

#[test]
fn test_unknown_category_value_falls_back_to_names() {
    assert!(is_countable(Some("unknown"), "Blue Jay", "Cyanocitta cristata"));
    assert!(!is_countable(Some("unknown"), "Domestic Goose", "Anser anser"));
    assert!(!is_countable(Some("slash"), "Blue Jay", "Cyanocitta cristata"));
    assert!(is_countable(None, "Blue Jay", "Cyanocitta cristata"));
}
