//! Class index ↔ label mapping for backends that return bare probability vectors

use super::ClassifierError;
use serde_json::Value;
use std::collections::BTreeMap;
use std::path::Path;

/// Model output index → taxon label
///
/// Loaded from the training label map, a JSON object `{label: index}`.
/// Indices may be JSON numbers or numeric strings and must cover `0..n`
/// without gaps.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LabelMap {
    labels: Vec<String>,
}

impl LabelMap {
    pub fn load(path: &Path) -> Result<Self, ClassifierError> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| ClassifierError::LabelMap(format!("{}: {}", path.display(), e)))?;
        Self::from_json_str(&content)
    }

    pub fn from_json_str(content: &str) -> Result<Self, ClassifierError> {
        let raw: BTreeMap<String, Value> = serde_json::from_str(content)
            .map_err(|e| ClassifierError::LabelMap(e.to_string()))?;

        let mut by_index: BTreeMap<usize, String> = BTreeMap::new();
        for (label, index) in raw {
            let index = match &index {
                Value::Number(n) => n.as_u64().map(|n| n as usize),
                Value::String(s) => s.trim().parse::<usize>().ok(),
                _ => None,
            }
            .ok_or_else(|| {
                ClassifierError::LabelMap(format!("Invalid index for label {}: {}", label, index))
            })?;

            if let Some(previous) = by_index.insert(index, label.clone()) {
                return Err(ClassifierError::LabelMap(format!(
                    "Index {} assigned to both {} and {}",
                    index, previous, label
                )));
            }
        }

        // BTreeMap iterates in index order; any gap shows up as a mismatch
        let labels: Vec<String> = by_index
            .into_iter()
            .enumerate()
            .map(|(expected, (index, label))| {
                if expected == index {
                    Ok(label)
                } else {
                    Err(ClassifierError::LabelMap(format!(
                        "Missing label for index {}",
                        expected
                    )))
                }
            })
            .collect::<Result<_, _>>()?;

        Ok(Self { labels })
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    pub fn label(&self, index: usize) -> Option<&str> {
        self.labels.get(index).map(String::as_str)
    }
}
