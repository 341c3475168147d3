//! Classifier output: taxon label → probability

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};

/// Immutable mapping from taxon label to probability
///
/// Labels are either `"Genus species"` or a bare higher-rank name. Values are
/// expected in [0, 1] and to sum to 1.0; the engine trusts the classifier
/// adapter and does not re-validate them.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProbabilityDistribution {
    entries: BTreeMap<String, f64>,
}

impl ProbabilityDistribution {
    pub fn new(entries: BTreeMap<String, f64>) -> Self {
        Self { entries }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Probability for an exact label
    pub fn get(&self, label: &str) -> Option<f64> {
        self.entries.get(label).copied()
    }

    /// Iterate `(label, probability)` pairs in label order
    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> + '_ {
        self.entries.iter().map(|(label, p)| (label.as_str(), *p))
    }

    /// Highest probability in the distribution, `None` if empty
    pub fn max_confidence(&self) -> Option<f64> {
        self.entries.values().copied().reduce(f64::max)
    }

    /// Sum of all probabilities
    pub fn total(&self) -> f64 {
        self.entries.values().sum()
    }
}

impl<S: Into<String>> FromIterator<(S, f64)> for ProbabilityDistribution {
    fn from_iter<I: IntoIterator<Item = (S, f64)>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().map(|(l, p)| (l.into(), p)).collect(),
        }
    }
}

impl From<HashMap<String, f64>> for ProbabilityDistribution {
    fn from(map: HashMap<String, f64>) -> Self {
        map.into_iter().collect()
    }
}

impl From<BTreeMap<String, f64>> for ProbabilityDistribution {
    fn from(entries: BTreeMap<String, f64>) -> Self {
        Self::new(entries)
    }
}
