//! FinBIF API payloads
//!
//! Only the fields used for the summary are modeled; every field defaults
//! when absent.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// Entry of `GET /taxa/search`
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TaxonSearchHit {
    pub id: String,
    pub scientific_name: String,
    pub scientific_name_authorship: String,
    pub taxon_rank: String,
    pub name_type: String,
    /// Language code → name
    pub vernacular_name: BTreeMap<String, Value>,
}

impl TaxonSearchHit {
    /// Vernacular name in `lang`, empty if missing
    pub fn vernacular(&self, lang: &str) -> &str {
        self.vernacular_name
            .get(lang)
            .and_then(Value::as_str)
            .unwrap_or("")
    }
}

/// Response of `GET /taxa/{id}`
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TaxonDetails {
    pub invasive_species: bool,
    pub observation_count_finland: u64,
    pub has_descriptions: bool,
    pub primary_habitat: Option<Habitat>,
    pub descriptions: Vec<Description>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct Habitat {
    pub habitat: String,
}

/// One species card
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Description {
    pub groups: Vec<DescriptionGroup>,
    pub species_card_authors: Option<DescriptionVariable>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct DescriptionGroup {
    pub variables: Vec<DescriptionVariable>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct DescriptionVariable {
    pub title: String,
    pub content: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_search_hit_from_api_json() {
        let hit: TaxonSearchHit = serde_json::from_str(
            r#"{
                "id": "MX.199863",
                "scientificName": "Pyrrhocoris apterus",
                "scientificNameAuthorship": "(Linnaeus, 1758)",
                "taxonRank": "MX.species",
                "nameType": "MX.hasScientificName",
                "vernacularName": {"fi": "tulilude", "en": "firebug"},
                "cursiveName": true
            }"#,
        )
        .expect("valid search hit");

        assert_eq!(hit.id, "MX.199863");
        assert_eq!(hit.vernacular("fi"), "tulilude");
        assert_eq!(hit.vernacular("sv"), "");
    }

    #[test]
    fn test_details_defaults() {
        let details: TaxonDetails = serde_json::from_str("{}").expect("empty object");
        assert!(!details.invasive_species);
        assert_eq!(details.observation_count_finland, 0);
        assert!(details.primary_habitat.is_none());
        assert!(details.descriptions.is_empty());
    }
}
