//! Advisory notes for genera the classifier cannot identify reliably

use super::Locale;
use serde::{Deserialize, Serialize};

/// Water boatmen (Corixidae) genera present in the label set
pub const CORIXIDAE_GENERA: [&str; 7] = [
    "Hesperocorixa",
    "Callicorixa",
    "Sigara",
    "Cymatia",
    "Arctocorisa",
    "Glaenocorisa",
    "Micronecta",
];

pub const PHYTOCORIS: &str = "Phytocoris";

/// A set of genera sharing one caveat
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdvisoryRule {
    pub genera: Vec<String>,
    pub note: String,
}

impl AdvisoryRule {
    pub fn new<I, S>(genera: I, note: impl Into<String>) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            genera: genera.into_iter().map(Into::into).collect(),
            note: note.into(),
        }
    }

    pub fn matches(&self, genus: &str) -> bool {
        self.genera.iter().any(|g| g == genus)
    }
}

/// Lookup table from winning genus to caveat text
///
/// Rules are checked in order; the first match wins.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AdvisoryTable {
    rules: Vec<AdvisoryRule>,
}

impl AdvisoryTable {
    pub fn new(rules: Vec<AdvisoryRule>) -> Self {
        Self { rules }
    }

    /// Table without any rules; every genus gets an empty note
    pub fn empty() -> Self {
        Self::default()
    }

    /// Built-in caveats for Phytocoris and the Corixidae genera
    pub fn builtin(locale: Locale) -> Self {
        let (phytocoris_note, corixidae_note) = match locale {
            Locale::En => (
                "This application cannot reliably identify species of the genus Phytocoris. \
                 Reliable identification requires examining small details.",
                "This application cannot reliably identify water boatmen (Corixidae). \
                 Reliable identification requires examining small details.",
            ),
            Locale::Fi => (
                "Tämä sovellus ei tunnista luotettavasti Phytocoris-suvun lajeja. \
                 Luotettava tunnistaminen edellyttää pienten yksityiskohtien tutkimista.",
                "Tämä sovellus ei tunnista luotettavasti pikkumalluaisia (Corixidae). \
                 Luotettava tunnistaminen edellyttää pienten yksityiskohtien tutkimista.",
            ),
        };

        Self::new(vec![
            AdvisoryRule::new([PHYTOCORIS], phytocoris_note),
            AdvisoryRule::new(CORIXIDAE_GENERA, corixidae_note),
        ])
    }

    /// Append a rule (checked after existing ones)
    pub fn with_rule(mut self, rule: AdvisoryRule) -> Self {
        self.rules.push(rule);
        self
    }

    pub fn rules(&self) -> &[AdvisoryRule] {
        &self.rules
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Caveat for a genus, empty string when none applies
    pub fn note_for(&self, genus: &str) -> &str {
        self.rules
            .iter()
            .find(|rule| rule.matches(genus))
            .map(|rule| rule.note.as_str())
            .unwrap_or("")
    }
}
