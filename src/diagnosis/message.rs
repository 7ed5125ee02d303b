use serde::Serialize;

use super::dimensions::{is_motivation, DimensionScores};
use super::domain::TypeId;
use super::scoring::{CategoryProfile, MessageConfig, VectorProfile};

const SENTENCE_DELIMITER: &str = " ";

fn trim_ending_punctuation(text: &str) -> &str {
    text.trim()
        .trim_end_matches(|c| matches!(c, '.' | '。' | '．'))
        .trim_end()
}

/// Penalty dimension with the strictly largest positive value; the first one in catalog order
/// wins a tie.
pub fn top_penalty(penalties: &DimensionScores) -> Option<(&str, f64)> {
    let mut top: Option<(&str, f64)> = None;
    let mut top_score = 0.0;
    for (dimension, value) in penalties.iter() {
        if value > top_score {
            top_score = value;
            top = Some((dimension, value));
        }
    }
    top
}

/// Motivation dimension with the largest value, compared with `>=` so the last one in catalog
/// order wins a tie.
///
/// Unlike [`top_penalty`], a motivation scoring exactly zero still qualifies.
pub fn top_motivation(positive: &DimensionScores) -> Option<(&str, f64)> {
    let mut top: Option<(&str, f64)> = None;
    let mut top_score = 0.0;
    let motivations = positive
        .iter()
        .filter(|(dimension, _)| is_motivation(dimension));
    for (dimension, value) in motivations {
        if value >= top_score {
            top_score = value;
            top = Some((dimension, value));
        }
    }
    top
}

/// Builds the five-sentence explanation for a diagnosed type.
pub fn compose_message(
    messages: &MessageConfig,
    category: &CategoryProfile,
    vector: &VectorProfile,
    penalties: &DimensionScores,
    positive: &DimensionScores,
) -> String {
    let caution = top_penalty(penalties)
        .and_then(|(dimension, _)| messages.penalty_messages.get(dimension))
        .map(String::as_str)
        .unwrap_or(category.caution_fallback.as_str());

    let next_action = top_motivation(positive)
        .and_then(|(dimension, _)| messages.motivation_messages.get(dimension))
        .map(String::as_str)
        .unwrap_or(messages.default_next_action.as_str());

    paragraph(category, vector, caution, next_action)
}

fn paragraph(
    category: &CategoryProfile,
    vector: &VectorProfile,
    caution: &str,
    next_action: &str,
) -> String {
    let sentences = [
        format!(
            "You are a {} × {} type: {} {}.",
            category.label,
            vector.label,
            trim_ending_punctuation(&category.strength),
            trim_ending_punctuation(&vector.strength_suffix)
        ),
        format!("That said, {}.", trim_ending_punctuation(caution)),
        format!(
            "To make the most of this strength, {}.",
            trim_ending_punctuation(&category.utilization)
        ),
        format!(
            "In particular, {}.",
            trim_ending_punctuation(&vector.utilization_addon)
        ),
        format!("As a next step, {}.", trim_ending_punctuation(next_action)),
    ];
    sentences.join(SENTENCE_DELIMITER)
}

/// Answer-independent description of a type, for result pages opened from a shared link.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TypeDescription {
    pub type_id: TypeId,
    pub category_label: String,
    pub vector_label: String,
    pub message: String,
}

/// Same paragraph shape as [`compose_message`], using the category's fallback caution and the
/// default next action.
pub fn describe_type(
    messages: &MessageConfig,
    type_id: TypeId,
    category: &CategoryProfile,
    vector: &VectorProfile,
) -> TypeDescription {
    TypeDescription {
        type_id,
        category_label: category.label.clone(),
        vector_label: vector.label.clone(),
        message: paragraph(
            category,
            vector,
            &category.caution_fallback,
            &messages.default_next_action,
        ),
    }
}
