use indexmap::IndexMap;

use super::super::catalog::QuestionCatalog;
use super::super::dimensions::{is_penalty, DimensionScores};
use super::super::domain::{AnswerInput, Question};
use super::super::validation::{resolve_selected_keys, ValidationError};
use super::config::WeightedProfile;

/// Sums the contributions of every selected option into one raw map.
///
/// Stops at the first unknown question, malformed selection, or unknown option key.
pub fn aggregate_raw_scores(
    answers: &[AnswerInput],
    catalog: &QuestionCatalog,
) -> Result<DimensionScores, ValidationError> {
    let mut totals = DimensionScores::new();

    for answer in answers {
        let question =
            catalog
                .question(&answer.question_id)
                .ok_or_else(|| ValidationError::UnknownQuestion {
                    question_id: answer.question_id.clone(),
                })?;

        for key in resolve_selected_keys(answer, question)? {
            let option = question
                .option(key)
                .ok_or_else(|| ValidationError::UnknownOption {
                    question_id: question.id.clone(),
                    option_key: key.to_string(),
                })?;
            for (dimension, value) in &option.scores {
                totals.add(dimension, *value);
            }
        }
    }

    Ok(totals)
}

/// Best attainable raw score per dimension, treating each question independently.
///
/// Non-positive contributions never raise a maximum. A single-select question contributes its
/// largest option value; a multi-select question contributes the sum of its top `cap` values.
/// Dimensions appear in the order the catalog first gives them a positive value.
pub fn compute_max_scores(questions: &[Question]) -> DimensionScores {
    let mut totals = DimensionScores::new();

    for question in questions {
        let mut contributions: IndexMap<&str, Vec<f64>> = IndexMap::new();
        for option in &question.options {
            for (dimension, value) in &option.scores {
                if *value <= 0.0 {
                    continue;
                }
                contributions
                    .entry(dimension.as_str())
                    .or_default()
                    .push(*value);
            }
        }

        let cap = question.selection_cap();
        for (dimension, mut values) in contributions {
            values.sort_by(|a, b| b.total_cmp(a));
            let best: f64 = values.iter().take(cap).sum();
            totals.add(dimension, best);
        }
    }

    totals
}

/// Maps raw scores into `[0, 1]` for every dimension present in `max_scores`.
pub fn normalize_scores(raw: &DimensionScores, max_scores: &DimensionScores) -> DimensionScores {
    normalize_dimensions(raw, max_scores, max_scores.dimensions())
}

/// Normalizes an explicit set of dimensions; anything missing from either map reads as zero.
pub fn normalize_dimensions<'a, I>(
    raw: &DimensionScores,
    max_scores: &DimensionScores,
    dimensions: I,
) -> DimensionScores
where
    I: IntoIterator<Item = &'a str>,
{
    dimensions
        .into_iter()
        .map(|dimension| {
            (
                dimension,
                normalize_value(raw.get(dimension), max_scores.get(dimension)),
            )
        })
        .collect()
}

fn normalize_value(raw: f64, max: f64) -> f64 {
    if max <= 0.0 || !max.is_finite() {
        return 0.0;
    }
    let value = (raw / max).min(1.0);
    if value.is_finite() {
        value
    } else {
        0.0
    }
}

/// Positive and penalty halves of a normalized map; no dimension lands in both.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SplitScores {
    pub positive: DimensionScores,
    pub penalties: DimensionScores,
}

pub fn separate_penalties(normalized: &DimensionScores) -> SplitScores {
    let mut split = SplitScores::default();
    for (dimension, value) in normalized.iter() {
        if is_penalty(dimension) {
            split.penalties.set(dimension, value);
        } else {
            split.positive.set(dimension, value);
        }
    }
    split
}

/// Weighted positive dimensions minus weighted penalties, floored at zero.
pub fn compute_profile_score<P: WeightedProfile>(
    profile: &P,
    positive: &DimensionScores,
    penalties: &DimensionScores,
) -> f64 {
    let mut score = 0.0;
    for (dimension, weight) in profile.weights() {
        score += positive.get(dimension) * weight;
    }

    if let Some(penalty_weights) = profile.penalties() {
        let mut penalty_total = 0.0;
        for (dimension, weight) in penalty_weights {
            penalty_total += penalties.get(dimension) * weight;
        }
        score -= penalty_total;
    }

    score.max(0.0)
}
