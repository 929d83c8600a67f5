//! Countable-species rules for eBird taxa
//!
//! Only identifiable wild species count toward a Big Year total. eBird tags
//! every taxon with a category; exports that carry a category column are
//! classified from it, otherwise the category is inferred from the naming
//! conventions eBird uses for non-species taxa ("Mallard (Domestic type)",
//! "Mallard x American Black Duck (hybrid)", "Greater/Lesser Scaup", "duck sp.").

use crate::constants::taxonomy_markers;
use std::str::FromStr;

/// eBird taxonomic category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TaxonCategory {
    Species,
    /// Identifiable sub-specific group
    Issf,
    Form,
    /// Genus-level or broader ("duck sp.")
    Spuh,
    /// Either-or identification ("Greater/Lesser Scaup")
    Slash,
    Hybrid,
    Intergrade,
    Domestic,
}

impl TaxonCategory {
    /// Whether sightings of this category count toward species totals
    pub fn is_countable(&self) -> bool {
        matches!(
            self,
            TaxonCategory::Species | TaxonCategory::Issf | TaxonCategory::Form
        )
    }

    /// Infer the category from common and scientific names
    pub fn infer(common_name: &str, scientific_name: &str) -> Self {
        let common = common_name.to_lowercase();
        let scientific = scientific_name.to_lowercase();
        let mentions = |markers: &[&str]| {
            markers
                .iter()
                .any(|marker| common.contains(marker) || scientific.contains(marker))
        };

        if mentions(taxonomy_markers::DOMESTIC) {
            TaxonCategory::Domestic
        } else if mentions(taxonomy_markers::HYBRID) {
            TaxonCategory::Hybrid
        } else if mentions(taxonomy_markers::INTERGRADE) {
            TaxonCategory::Intergrade
        } else if mentions(taxonomy_markers::SLASH) {
            TaxonCategory::Slash
        } else if mentions(taxonomy_markers::SPUH) || common.ends_with(" sp") {
            TaxonCategory::Spuh
        } else {
            TaxonCategory::Species
        }
    }
}

impl FromStr for TaxonCategory {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "species" => Ok(TaxonCategory::Species),
            "issf" => Ok(TaxonCategory::Issf),
            "form" => Ok(TaxonCategory::Form),
            "spuh" => Ok(TaxonCategory::Spuh),
            "slash" => Ok(TaxonCategory::Slash),
            "hybrid" => Ok(TaxonCategory::Hybrid),
            "intergrade" => Ok(TaxonCategory::Intergrade),
            "domestic" => Ok(TaxonCategory::Domestic),
            other => Err(format!("unknown taxonomic category '{}'", other)),
        }
    }
}

/// Decide countability for one row
///
/// An explicit category value wins; an unrecognised or absent value falls
/// back to name inference.
pub fn is_countable(category: Option<&str>, common_name: &str, scientific_name: &str) -> bool {
    category
        .and_then(|value| value.parse::<TaxonCategory>().ok())
        .unwrap_or_else(|| TaxonCategory::infer(common_name, scientific_name))
        .is_countable()
}
