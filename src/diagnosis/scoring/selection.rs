use std::collections::{BTreeMap, HashMap};
use std::hash::Hash;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SelectionError {
    #[error("unable to determine top profile")]
    NoProfiles,
}

/// Priority ranks for equal scores; rank 0 is the highest priority.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TieBreakOrder<K: Eq + Hash> {
    ranks: HashMap<K, usize>,
}

impl<K: Copy + Eq + Hash> TieBreakOrder<K> {
    /// Builds the rank table. A key listed twice keeps its first position.
    pub fn new(order: &[K]) -> Self {
        let mut ranks = HashMap::with_capacity(order.len());
        for (position, key) in order.iter().enumerate() {
            ranks.entry(*key).or_insert(position);
        }
        Self { ranks }
    }

    pub fn rank(&self, key: &K) -> Option<usize> {
        self.ranks.get(key).copied()
    }

    /// True when `candidate` should displace an incumbent holding the same score.
    ///
    /// Unranked candidates never displace; a ranked candidate displaces an unranked incumbent
    /// or one ranked after it.
    pub fn prefers(&self, candidate: &K, incumbent: &K) -> bool {
        match (self.rank(candidate), self.rank(incumbent)) {
            (None, _) => false,
            (Some(_), None) => true,
            (Some(candidate_rank), Some(incumbent_rank)) => candidate_rank < incumbent_rank,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TopProfile<K> {
    pub key: K,
    pub score: f64,
}

/// Picks the highest-scoring key, scanning `candidates` in order and consulting `order` on ties.
///
/// Candidates without a score are treated as negative infinity and can never win.
pub fn select_top_profile<K>(
    candidates: &[K],
    scores: &BTreeMap<K, f64>,
    order: &TieBreakOrder<K>,
) -> Result<TopProfile<K>, SelectionError>
where
    K: Copy + Ord + Hash,
{
    let mut best: Option<K> = None;
    let mut best_score = f64::NEG_INFINITY;

    for candidate in candidates {
        let value = scores.get(candidate).copied().unwrap_or(f64::NEG_INFINITY);
        if value > best_score {
            best = Some(*candidate);
            best_score = value;
            continue;
        }
        if let Some(incumbent) = best {
            if value == best_score && order.prefers(candidate, &incumbent) {
                best = Some(*candidate);
            }
        }
    }

    best.map(|key| TopProfile {
        key,
        score: best_score,
    })
    .ok_or(SelectionError::NoProfiles)
}
