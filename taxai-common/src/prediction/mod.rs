//! Prediction ranking and aggregation
//!
//! Turns a flat class → probability distribution from the classifier into a
//! genus-aware report: ranked species, aggregated genera, confidence tiers
//! and advisory notes for taxa the classifier is known to handle poorly.

pub mod advisory;
pub mod distribution;
pub mod locale;
pub mod ranking;
pub mod report;
pub mod tiers;

pub use advisory::{AdvisoryRule, AdvisoryTable};
pub use distribution::ProbabilityDistribution;
pub use locale::Locale;
pub use ranking::{aggregate_genera, capitalize_label, genus_token, rank_species, RankedEntry};
pub use report::{BestPick, PredictionEngine, PredictionReport};
pub use tiers::ConfidenceTier;

/// Number of species and genera reported
pub const TOP_K: usize = 10;

/// Distinct genera observed before the aggregation scan stops
pub const GENUS_CAP: usize = 10;

/// Round a confidence value to 3 decimal places for serialization
///
/// Only applied when building the final report. Aggregation always works on
/// unrounded values.
///
/// Scales by 1000 and rounds half away from zero. This is not a correctly
/// rounded decimal conversion: a value whose scaled product lands within an
/// ulp of a `.5` boundary may round differently than a decimal-exact
/// implementation would.
pub fn round_confidence(value: f64) -> f64 {
    (value * 1000.0).round() / 1000.0
}
