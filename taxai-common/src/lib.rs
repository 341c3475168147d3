//! # TaxAI Common Library
//!
//! Shared code for the TaxAI species identification service:
//! - Error types
//! - Configuration loading
//! - Prediction ranking and aggregation (species, genus, confidence tiers, advisories)

pub mod config;
pub mod error;
pub mod prediction;

pub use error::{Error, Result};
pub use prediction::{
    AdvisoryTable, ConfidenceTier, Locale, PredictionEngine, PredictionReport,
    ProbabilityDistribution, RankedEntry,
};
