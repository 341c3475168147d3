//! Reshaping FinBIF payloads into a display summary

use super::{TaxonDetails, TaxonSearchHit};
use serde::Serialize;
use std::time::Duration;
use taxai_common::Locale;

/// Description variable shown separately as the card lead-in
const LEAD_VARIABLE_TITLE: &str = "Ingressi";

const LICENSE_URL: &str = "https://creativecommons.org/licenses/by/4.0/";

/// Flat taxon summary returned by `GET /taxon/:name`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TaxonSummary {
    pub taxon: String,
    pub taxon_id: String,
    pub vernacular_name: String,
    pub scientific_name: String,
    pub author: String,
    pub rank: String,
    pub name_type: String,
    pub is_invasive: bool,
    pub occurrence_count: u64,
    pub has_descriptions: bool,
    pub primary_habitat: String,
    /// HTML fragment built from the species card
    pub description: String,
    /// Lookup duration in seconds
    pub response_time: f64,
}

/// Human-readable rank name for a FinBIF rank URI such as `MX.species`
pub fn translate_rank(rank: &str, locale: Locale) -> String {
    match (rank, locale) {
        ("MX.species", Locale::En) => "species".to_string(),
        ("MX.species", Locale::Fi) => "laji".to_string(),
        ("MX.genus", Locale::En) => "genus".to_string(),
        ("MX.genus", Locale::Fi) => "suku".to_string(),
        (other, _) => other.replace("MX.", ""),
    }
}

/// Species card as HTML
///
/// Uses the first description only. Content comes from the API as HTML and
/// is inserted as is.
pub fn description_html(details: &TaxonDetails, taxon_id: &str, locale: Locale) -> String {
    let Some(description) = details.descriptions.first() else {
        return String::new();
    };

    let (source_heading, card_link_text, license_text) = match locale {
        Locale::En => ("Source", "Species description at Laji.fi", "Creative Commons Attribution 4.0"),
        Locale::Fi => ("Lähde", "Lajikuvaus Laji.fi:ssa", "Creative Commons Nimeä 4.0"),
    };

    let mut html = String::new();
    for variable in description
        .groups
        .iter()
        .flat_map(|group| group.variables.iter())
        .filter(|variable| variable.title != LEAD_VARIABLE_TITLE)
    {
        html.push_str(&format!("<h4>{}</h4>\n{}\n", variable.title, variable.content));
    }

    html.push_str(&format!("<h4>{}</h4>\n", source_heading));
    if let Some(authors) = &description.species_card_authors {
        html.push_str(&format!("{}\n", authors.content));
    }

    html.push_str(&format!(
        "<p><a href='https://laji.fi/taxon/{}'>{}</a>, <a href='{}'>{}</a></p>\n",
        taxon_id, card_link_text, LICENSE_URL, license_text
    ));

    html
}

/// Combine search hit and details into a summary
pub fn summarize(
    taxon: &str,
    hit: &TaxonSearchHit,
    details: &TaxonDetails,
    locale: Locale,
    elapsed: Duration,
) -> TaxonSummary {
    let vernacular_name = match hit.vernacular(locale.as_str()) {
        "" => hit.vernacular(Locale::Fi.as_str()),
        name => name,
    };

    let description = if details.has_descriptions {
        description_html(details, &hit.id, locale)
    } else {
        String::new()
    };

    TaxonSummary {
        taxon: taxon.to_string(),
        taxon_id: hit.id.clone(),
        vernacular_name: vernacular_name.to_string(),
        scientific_name: hit.scientific_name.clone(),
        author: hit.scientific_name_authorship.clone(),
        rank: translate_rank(&hit.taxon_rank, locale),
        name_type: hit.name_type.clone(),
        is_invasive: details.invasive_species,
        occurrence_count: details.observation_count_finland,
        has_descriptions: details.has_descriptions,
        primary_habitat: details
            .primary_habitat
            .as_ref()
            .map(|h| h.habitat.clone())
            .unwrap_or_default(),
        description,
        response_time: (elapsed.as_secs_f64() * 1000.0).round() / 1000.0,
    }
}
