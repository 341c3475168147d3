//! Prediction report assembly

use super::{
    aggregate_genera, rank_species, round_confidence, AdvisoryTable, ConfidenceTier, Locale,
    ProbabilityDistribution, RankedEntry, TOP_K,
};
use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Winning taxon with a display confidence text
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BestPick {
    pub taxon: String,
    pub confidence: f64,
    pub confidence_text: String,
}

impl BestPick {
    /// Build from an already-rounded entry
    ///
    /// The tier is taken from the rounded value so the text always agrees
    /// with the number shown next to it.
    fn from_rounded(entry: &RankedEntry, locale: Locale) -> Self {
        Self {
            taxon: entry.taxon.clone(),
            confidence: entry.confidence,
            confidence_text: ConfidenceTier::from_confidence(entry.confidence)
                .label(locale)
                .to_string(),
        }
    }
}

/// Structured result for one image
///
/// All confidences are rounded to 3 decimals.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictionReport {
    pub best_species: BestPick,
    pub best_genus: BestPick,
    pub top_species: Vec<RankedEntry>,
    pub top_genus: Vec<RankedEntry>,
    /// Best genus confidence minus best species confidence (signed)
    pub genus_superiority: f64,
    /// Advisory text for the winning genus, empty if none
    pub notes: String,
}

/// Ranking and aggregation engine
///
/// Holds only read-only configuration, so one instance can serve any number
/// of concurrent requests.
#[derive(Debug, Clone, PartialEq)]
pub struct PredictionEngine {
    advisories: AdvisoryTable,
    locale: Locale,
}

impl Default for PredictionEngine {
    fn default() -> Self {
        Self::new(AdvisoryTable::builtin(Locale::En), Locale::En)
    }
}

impl PredictionEngine {
    pub fn new(advisories: AdvisoryTable, locale: Locale) -> Self {
        Self { advisories, locale }
    }

    pub fn locale(&self) -> Locale {
        self.locale
    }

    pub fn advisories(&self) -> &AdvisoryTable {
        &self.advisories
    }

    /// Build the report for one distribution
    ///
    /// # Errors
    /// `InvalidInput` if the distribution is empty or contains no
    /// `"Genus species"` label to aggregate.
    pub fn evaluate(&self, distribution: &ProbabilityDistribution) -> Result<PredictionReport> {
        if distribution.is_empty() {
            return Err(Error::InvalidInput(
                "Probability distribution is empty".to_string(),
            ));
        }

        let ranking = rank_species(distribution);
        let genera = aggregate_genera(&ranking);

        let (Some(best_species), Some(best_genus)) = (ranking.first(), genera.first()) else {
            return Err(Error::InvalidInput(
                "Probability distribution has no genus-level labels".to_string(),
            ));
        };

        // Unrounded difference; rounded once below
        let genus_superiority = best_genus.confidence - best_species.confidence;
        let notes = self.advisories.note_for(&best_genus.taxon).to_string();

        let top_species: Vec<RankedEntry> =
            ranking.iter().take(TOP_K).map(RankedEntry::rounded).collect();
        let top_genus: Vec<RankedEntry> =
            genera.iter().take(TOP_K).map(RankedEntry::rounded).collect();

        let best_species = BestPick::from_rounded(&best_species.rounded(), self.locale);
        let best_genus = BestPick::from_rounded(&best_genus.rounded(), self.locale);

        debug!(
            classes = distribution.len(),
            best_species = %best_species.taxon,
            best_genus = %best_genus.taxon,
            "Prediction evaluated"
        );

        Ok(PredictionReport {
            best_species,
            best_genus,
            top_species,
            top_genus,
            genus_superiority: round_confidence(genus_superiority),
            notes,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::prediction::AdvisoryRule;

    fn dist(entries: &[(&str, f64)]) -> ProbabilityDistribution {
        entries.iter().map(|(l, p)| (*l, *p)).collect()
    }

    #[test]
    fn test_empty_distribution_is_invalid_input() {
        let engine = PredictionEngine::default();
        let err = engine
            .evaluate(&ProbabilityDistribution::default())
            .unwrap_err();
        assert!(matches!(err, Error::InvalidInput(_)));
    }

    #[test]
    fn test_no_species_labels_is_invalid_input() {
        let engine = PredictionEngine::default();
        let err = engine
            .evaluate(&dist(&[("Corixidae", 0.7), ("Miridae", 0.3)]))
            .unwrap_err();
        assert!(matches!(err, Error::InvalidInput(_)));
    }

    #[test]
    fn test_superiority_rounded_once() {
        // Bare label wins the species ranking; raw difference is about -0.00049
        let engine = PredictionEngine::new(AdvisoryTable::empty(), Locale::En);
        let report = engine
            .evaluate(&dist(&[("Corixidae", 0.5), ("Aa bb", 0.49951)]))
            .expect("valid distribution");

        assert_eq!(report.best_species.taxon, "Corixidae");
        assert_eq!(report.best_genus.taxon, "Aa");
        assert_eq!(report.genus_superiority, 0.0);
        assert!(report.genus_superiority.is_sign_negative());
    }

    #[test]
    fn test_positive_superiority_when_genus_mass_is_spread() {
        // Species "Bb x" wins, but genus "Aa" wins the genus ranking
        let engine = PredictionEngine::new(AdvisoryTable::empty(), Locale::En);
        let report = engine
            .evaluate(&dist(&[("Bb x", 0.4), ("Aa y", 0.3), ("Aa z", 0.3)]))
            .expect("valid distribution");

        assert_eq!(report.best_species.taxon, "Bb x");
        assert_eq!(report.best_genus.taxon, "Aa");
        assert_eq!(report.best_genus.confidence, 0.6);
        assert_eq!(report.genus_superiority, 0.2);
    }

    #[test]
    fn test_negative_superiority() {
        let engine = PredictionEngine::new(AdvisoryTable::empty(), Locale::En);
        let report = engine
            .evaluate(&dist(&[("Corixidae", 0.6), ("Aa y", 0.4)]))
            .expect("valid distribution");

        assert_eq!(report.best_species.taxon, "Corixidae");
        assert_eq!(report.best_genus.taxon, "Aa");
        assert_eq!(report.genus_superiority, -0.2);
    }

    #[test]
    fn test_confidence_text_uses_engine_locale() {
        let engine = PredictionEngine::new(AdvisoryTable::empty(), Locale::Fi);
        let report = engine
            .evaluate(&dist(&[("Aa bb", 0.96), ("Cc dd", 0.04)]))
            .expect("valid distribution");

        assert_eq!(report.best_species.confidence_text, "todennäköinen");
        assert_eq!(report.best_genus.confidence_text, "todennäköinen");
    }

    #[test]
    fn test_confidence_text_follows_rounded_value() {
        // 0.9896 is shown as 0.99, so it reads "almost certain"
        let engine = PredictionEngine::default();
        let report = engine
            .evaluate(&dist(&[("Aa bb", 0.9896), ("Cc dd", 0.0104)]))
            .expect("valid distribution");

        assert_eq!(report.best_species.confidence, 0.99);
        assert_eq!(report.best_species.confidence_text, "almost certain");
    }

    #[test]
    fn test_injected_advisory_table() {
        let table = AdvisoryTable::empty().with_rule(AdvisoryRule::new(["Aa"], "fixture note"));
        let engine = PredictionEngine::new(table, Locale::En);

        let report = engine
            .evaluate(&dist(&[("Aa bb", 0.9), ("Cc dd", 0.1)]))
            .expect("valid distribution");
        assert_eq!(report.notes, "fixture note");

        let report = engine
            .evaluate(&dist(&[("Cc dd", 0.9), ("Aa bb", 0.1)]))
            .expect("valid distribution");
        assert_eq!(report.notes, "");
    }
}
