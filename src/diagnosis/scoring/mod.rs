mod config;
pub mod rules;
mod selection;

pub use config::{
    CategoryProfile, MessageConfig, ScoringConfig, TieBreakers, VectorProfile, WeightedProfile,
};
pub use rules::SplitScores;
pub use selection::{select_top_profile, SelectionError, TieBreakOrder, TopProfile};

use std::collections::BTreeMap;
use std::sync::Arc;

use super::domain::{CategoryKey, VectorKey};

/// Stateless scorer applying the profile weights and tie-break ranks to a split score map.
#[derive(Debug, Clone)]
pub struct ProfileScorer {
    config: Arc<ScoringConfig>,
    category_order: TieBreakOrder<CategoryKey>,
    vector_order: TieBreakOrder<VectorKey>,
}

impl ProfileScorer {
    pub fn new(config: Arc<ScoringConfig>) -> Self {
        let category_order = TieBreakOrder::new(&config.tie_breakers.categories);
        let vector_order = TieBreakOrder::new(&config.tie_breakers.vectors);
        Self {
            config,
            category_order,
            vector_order,
        }
    }

    pub fn config(&self) -> &ScoringConfig {
        &self.config
    }

    /// Scores all eight profiles from the same positive and penalty maps.
    pub fn score(&self, split: &SplitScores) -> ProfileScores {
        let categories = self
            .config
            .categories
            .iter()
            .map(|profile| {
                let score =
                    rules::compute_profile_score(profile, &split.positive, &split.penalties);
                (profile.key, score)
            })
            .collect();
        let vectors = self
            .config
            .vectors
            .iter()
            .map(|profile| {
                let score =
                    rules::compute_profile_score(profile, &split.positive, &split.penalties);
                (profile.key, score)
            })
            .collect();

        ProfileScores {
            categories,
            vectors,
        }
    }

    /// Selects the winning category and vector independently, in configuration order.
    pub fn select(
        &self,
        scores: &ProfileScores,
    ) -> Result<(TopProfile<CategoryKey>, TopProfile<VectorKey>), SelectionError> {
        let category_keys: Vec<CategoryKey> = self
            .config
            .categories
            .iter()
            .map(|profile| profile.key)
            .collect();
        let vector_keys: Vec<VectorKey> = self
            .config
            .vectors
            .iter()
            .map(|profile| profile.key)
            .collect();

        let category =
            select_top_profile(&category_keys, &scores.categories, &self.category_order)?;
        let vector = select_top_profile(&vector_keys, &scores.vectors, &self.vector_order)?;
        Ok((category, vector))
    }
}

/// Per-profile scores for both groups.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ProfileScores {
    pub categories: BTreeMap<CategoryKey, f64>,
    pub vectors: BTreeMap<VectorKey, f64>,
}
