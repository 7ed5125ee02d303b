use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Dimensions carrying this prefix subtract from profile scores instead of adding to them.
pub const PENALTY_PREFIX: &str = "ng.";
/// Dimensions carrying this prefix select the closing next-action sentence.
pub const MOTIVATION_PREFIX: &str = "motivation.";

pub fn is_penalty(dimension: &str) -> bool {
    dimension.starts_with(PENALTY_PREFIX)
}

pub fn is_motivation(dimension: &str) -> bool {
    dimension.starts_with(MOTIVATION_PREFIX)
}

/// Numeric scores keyed by dimension name.
///
/// Lookups of unknown dimensions read as `0.0`. Iteration follows insertion order, so maps
/// derived from the catalog maxima walk dimensions in the order the catalog first mentions them.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DimensionScores(IndexMap<String, f64>);

impl DimensionScores {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, dimension: &str) -> f64 {
        self.0.get(dimension).copied().unwrap_or(0.0)
    }

    pub fn contains(&self, dimension: &str) -> bool {
        self.0.contains_key(dimension)
    }

    pub fn set(&mut self, dimension: impl Into<String>, value: f64) {
        self.0.insert(dimension.into(), value);
    }

    /// Adds `value` to the running total for `dimension`, starting from zero.
    pub fn add(&mut self, dimension: &str, value: f64) {
        match self.0.get_mut(dimension) {
            Some(total) => *total += value,
            None => {
                self.0.insert(dimension.to_string(), value);
            }
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> + '_ {
        self.0.iter().map(|(dimension, value)| (dimension.as_str(), *value))
    }

    pub fn dimensions(&self) -> impl Iterator<Item = &str> + '_ {
        self.0.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<K: Into<String>> FromIterator<(K, f64)> for DimensionScores {
    fn from_iter<T: IntoIterator<Item = (K, f64)>>(iter: T) -> Self {
        Self(
            iter.into_iter()
                .map(|(dimension, value)| (dimension.into(), value))
                .collect(),
        )
    }
}
