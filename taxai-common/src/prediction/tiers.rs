//! Confidence tiers for display

use super::Locale;

/// Six non-overlapping bands covering [0, 1]
///
/// Lower bounds are inclusive, upper bounds exclusive (except 1.0).
///
/// | range        | tier           |
/// |--------------|----------------|
/// | [0.99, 1.0]  | AlmostCertain  |
/// | [0.95, 0.99) | Likely         |
/// | [0.85, 0.95) | Possible       |
/// | [0.70, 0.85) | Uncertain      |
/// | [0.50, 0.70) | JustAGuess     |
/// | [0, 0.50)    | CannotIdentify |
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ConfidenceTier {
    CannotIdentify,
    JustAGuess,
    Uncertain,
    Possible,
    Likely,
    AlmostCertain,
}

impl ConfidenceTier {
    /// All tiers, highest first
    pub const ALL: [ConfidenceTier; 6] = [
        ConfidenceTier::AlmostCertain,
        ConfidenceTier::Likely,
        ConfidenceTier::Possible,
        ConfidenceTier::Uncertain,
        ConfidenceTier::JustAGuess,
        ConfidenceTier::CannotIdentify,
    ];

    /// Inclusive lower bound of the band
    pub fn lower_bound(self) -> f64 {
        match self {
            ConfidenceTier::AlmostCertain => 0.99,
            ConfidenceTier::Likely => 0.95,
            ConfidenceTier::Possible => 0.85,
            ConfidenceTier::Uncertain => 0.70,
            ConfidenceTier::JustAGuess => 0.50,
            ConfidenceTier::CannotIdentify => 0.0,
        }
    }

    /// Tier for a confidence value
    ///
    /// Values below every bound (including NaN) fall into `CannotIdentify`.
    pub fn from_confidence(confidence: f64) -> Self {
        Self::ALL
            .into_iter()
            .find(|tier| confidence >= tier.lower_bound())
            .unwrap_or(ConfidenceTier::CannotIdentify)
    }

    pub fn label(self, locale: Locale) -> &'static str {
        match locale {
            Locale::En => match self {
                ConfidenceTier::AlmostCertain => "almost certain",
                ConfidenceTier::Likely => "likely",
                ConfidenceTier::Possible => "possible",
                ConfidenceTier::Uncertain => "uncertain",
                ConfidenceTier::JustAGuess => "just a guess",
                ConfidenceTier::CannotIdentify => "cannot identify",
            },
            Locale::Fi => match self {
                ConfidenceTier::AlmostCertain => "melkein varma",
                ConfidenceTier::Likely => "todennäköinen",
                ConfidenceTier::Possible => "mahdollinen",
                ConfidenceTier::Uncertain => "epävarma",
                ConfidenceTier::JustAGuess => "pelkkä arvaus",
                ConfidenceTier::CannotIdentify => "en osaa tunnistaa",
            },
        }
    }
}
