use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;

use serde::{Deserialize, Serialize};

use super::super::catalog::{read_source, CatalogError};
use super::super::domain::{CategoryKey, VectorKey};

const BUILTIN_SCORING: &str = include_str!("../../../data/scoring.json");

/// Dimension weights shared by both profile groups.
pub trait WeightedProfile {
    fn weights(&self) -> &BTreeMap<String, f64>;
    fn penalties(&self) -> Option<&BTreeMap<String, f64>>;
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryProfile {
    pub key: CategoryKey,
    pub label: String,
    pub strength: String,
    pub utilization: String,
    pub caution_fallback: String,
    pub weights: BTreeMap<String, f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub penalties: Option<BTreeMap<String, f64>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VectorProfile {
    pub key: VectorKey,
    pub label: String,
    pub strength_suffix: String,
    pub utilization_addon: String,
    pub weights: BTreeMap<String, f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub penalties: Option<BTreeMap<String, f64>>,
}

impl WeightedProfile for CategoryProfile {
    fn weights(&self) -> &BTreeMap<String, f64> {
        &self.weights
    }

    fn penalties(&self) -> Option<&BTreeMap<String, f64>> {
        self.penalties.as_ref()
    }
}

impl WeightedProfile for VectorProfile {
    fn weights(&self) -> &BTreeMap<String, f64> {
        &self.weights
    }

    fn penalties(&self) -> Option<&BTreeMap<String, f64>> {
        self.penalties.as_ref()
    }
}

/// Priority lists resolving equal top scores; earlier keys win.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TieBreakers {
    pub categories: Vec<CategoryKey>,
    pub vectors: Vec<VectorKey>,
}

/// Text tables feeding the message composer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MessageConfig {
    #[serde(default)]
    pub penalty_messages: BTreeMap<String, String>,
    #[serde(default)]
    pub motivation_messages: BTreeMap<String, String>,
    pub default_next_action: String,
}

/// Profiles, tie-break orders and message text, loaded once at startup.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoringConfig {
    pub categories: Vec<CategoryProfile>,
    pub vectors: Vec<VectorProfile>,
    pub tie_breakers: TieBreakers,
    pub message: MessageConfig,
}

impl ScoringConfig {
    pub fn from_json(raw: &str) -> Result<Self, CatalogError> {
        let config: Self = serde_json::from_str(raw).map_err(|source| CatalogError::Parse {
            what: "scoring configuration",
            source,
        })?;
        config.validated()
    }

    pub fn from_path(path: &Path) -> Result<Self, CatalogError> {
        Self::from_json(&read_source(path)?)
    }

    /// The profiles and message text shipped with the crate.
    pub fn builtin() -> Result<Self, CatalogError> {
        Self::from_json(BUILTIN_SCORING)
    }

    pub fn validated(self) -> Result<Self, CatalogError> {
        let problems = self.violations();
        if problems.is_empty() {
            Ok(self)
        } else {
            Err(CatalogError::Invalid {
                what: "scoring configuration",
                problems,
            })
        }
    }

    pub fn category(&self, key: CategoryKey) -> Option<&CategoryProfile> {
        self.categories.iter().find(|profile| profile.key == key)
    }

    pub fn vector(&self, key: VectorKey) -> Option<&VectorProfile> {
        self.vectors.iter().find(|profile| profile.key == key)
    }

    /// Checks the structural invariants the engine relies on, returning every violation found.
    pub fn violations(&self) -> Vec<String> {
        let mut problems = Vec::new();

        check_profile_group(
            "category",
            &CategoryKey::ALL,
            self.categories.iter().map(|profile| profile.key),
            &mut problems,
        );
        check_profile_group(
            "vector",
            &VectorKey::ALL,
            self.vectors.iter().map(|profile| profile.key),
            &mut problems,
        );
        check_total_order(
            "category",
            &CategoryKey::ALL,
            &self.tie_breakers.categories,
            &mut problems,
        );
        check_total_order(
            "vector",
            &VectorKey::ALL,
            &self.tie_breakers.vectors,
            &mut problems,
        );

        for profile in &self.categories {
            check_weights(profile.key.as_str(), profile, &mut problems);
        }
        for profile in &self.vectors {
            check_weights(profile.key.as_str(), profile, &mut problems);
        }

        problems
    }
}

fn check_profile_group<K, I>(group: &str, expected: &[K], found: I, problems: &mut Vec<String>)
where
    K: Ord + Copy + std::fmt::Debug,
    I: Iterator<Item = K>,
{
    let mut seen = BTreeSet::new();
    for key in found {
        if !seen.insert(key) {
            problems.push(format!("{group} profile {key:?} is defined more than once"));
        }
    }
    for key in expected {
        if !seen.contains(key) {
            problems.push(format!("{group} profile {key:?} is missing"));
        }
    }
}

fn check_total_order<K>(group: &str, expected: &[K], order: &[K], problems: &mut Vec<String>)
where
    K: Ord + Copy + std::fmt::Debug,
{
    let unique: BTreeSet<K> = order.iter().copied().collect();
    let complete = expected.iter().all(|key| unique.contains(key));
    if unique.len() != order.len() || !complete {
        problems.push(format!(
            "{group} tie-break order must list each of {expected:?} exactly once, found {order:?}"
        ));
    }
}

fn check_weights<P: WeightedProfile>(name: &str, profile: &P, problems: &mut Vec<String>) {
    let penalties = profile.penalties().into_iter().flatten();
    for (dimension, weight) in profile.weights().iter().chain(penalties) {
        if !weight.is_finite() || *weight < 0.0 {
            problems.push(format!(
                "profile {name} has invalid weight {weight} for dimension {dimension}"
            ));
        }
    }
}
