//! Species ranking and genus aggregation

use super::{round_confidence, ProbabilityDistribution, GENUS_CAP};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// A taxon with its (aggregated) confidence
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankedEntry {
    pub taxon: String,
    pub confidence: f64,
}

impl RankedEntry {
    pub fn new(taxon: impl Into<String>, confidence: f64) -> Self {
        Self {
            taxon: taxon.into(),
            confidence,
        }
    }

    /// Copy with confidence rounded for output
    pub fn rounded(&self) -> Self {
        Self {
            taxon: self.taxon.clone(),
            confidence: round_confidence(self.confidence),
        }
    }
}

/// Descending confidence, ties broken by ascending label
fn by_confidence_desc(a: &RankedEntry, b: &RankedEntry) -> Ordering {
    b.confidence
        .total_cmp(&a.confidence)
        .then_with(|| a.taxon.cmp(&b.taxon))
}

/// Uppercase the first character and lowercase the rest
///
/// Normalizes the classifier's inconsistently cased label set, so
/// `"pyrrhocoris APTERUS"` becomes `"Pyrrhocoris apterus"`.
pub fn capitalize_label(label: &str) -> String {
    let mut chars = label.chars();
    match chars.next() {
        Some(first) => first
            .to_uppercase()
            .chain(chars.flat_map(char::to_lowercase))
            .collect(),
        None => String::new(),
    }
}

/// Genus part of a species label: everything before the first space
///
/// Bare higher-rank labels (no space) have no genus token.
pub fn genus_token(taxon: &str) -> Option<&str> {
    taxon.split_once(' ').map(|(genus, _)| genus)
}

/// Full species ranking, highest confidence first
///
/// Every class of the distribution is included; callers take the top K.
pub fn rank_species(distribution: &ProbabilityDistribution) -> Vec<RankedEntry> {
    let mut ranking: Vec<RankedEntry> = distribution
        .iter()
        .map(|(label, confidence)| RankedEntry::new(capitalize_label(label), confidence))
        .collect();
    ranking.sort_by(by_confidence_desc);
    ranking
}

/// Sum species confidences per genus, highest total first
///
/// Scans `ranking` in order and stops as soon as the `GENUS_CAP`-th distinct
/// genus is first seen. Entries below that point are never added, even to
/// genera already collected, so a genus total can be incomplete. Callers
/// depend on this exact cut-off.
pub fn aggregate_genera(ranking: &[RankedEntry]) -> Vec<RankedEntry> {
    let mut genera: Vec<RankedEntry> = Vec::with_capacity(GENUS_CAP);

    for entry in ranking {
        let Some(genus) = genus_token(&entry.taxon) else {
            continue;
        };

        match genera.iter_mut().find(|g| g.taxon == genus) {
            Some(existing) => existing.confidence += entry.confidence,
            None => genera.push(RankedEntry::new(genus, entry.confidence)),
        }

        if genera.len() >= GENUS_CAP {
            break;
        }
    }

    genera.sort_by(by_confidence_desc);
    genera
}
