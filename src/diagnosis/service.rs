use std::path::Path;
use std::sync::Arc;

use serde::Serialize;
use tracing::debug;

use super::catalog::{CatalogError, QuestionCatalog};
use super::domain::{AnswerInput, DiagnoseResult, Question, QuestionKind, ScoreBreakdown, TypeId};
use super::message::{compose_message, describe_type, TypeDescription};
use super::scoring::rules::{aggregate_raw_scores, normalize_scores, separate_penalties};
use super::scoring::{ProfileScorer, ScoringConfig, SelectionError};
use super::validation::{ensure_all_questions_answered, ValidationError};

/// Service composing the question catalog, the profile scorer, and the message composer.
///
/// Holds only immutable data, so one instance can be shared across request handlers.
#[derive(Debug, Clone)]
pub struct DiagnosisService {
    catalog: Arc<QuestionCatalog>,
    scorer: ProfileScorer,
}

impl DiagnosisService {
    pub fn new(catalog: QuestionCatalog, scoring: ScoringConfig) -> Self {
        Self {
            catalog: Arc::new(catalog),
            scorer: ProfileScorer::new(Arc::new(scoring)),
        }
    }

    /// Service backed by the questionnaire and profiles compiled into the crate.
    pub fn builtin() -> Result<Self, CatalogError> {
        Ok(Self::new(QuestionCatalog::builtin()?, ScoringConfig::builtin()?))
    }

    /// Loads override files where given, falling back to the built-in data for the rest.
    pub fn load(questions: Option<&Path>, scoring: Option<&Path>) -> Result<Self, CatalogError> {
        let catalog = match questions {
            Some(path) => QuestionCatalog::from_path(path)?,
            None => QuestionCatalog::builtin()?,
        };
        let scoring = match scoring {
            Some(path) => ScoringConfig::from_path(path)?,
            None => ScoringConfig::builtin()?,
        };
        Ok(Self::new(catalog, scoring))
    }

    pub fn catalog(&self) -> &QuestionCatalog {
        &self.catalog
    }

    pub fn scoring(&self) -> &ScoringConfig {
        self.scorer.config()
    }

    /// Runs the full pipeline over one complete answer set.
    pub fn diagnose(&self, answers: &[AnswerInput]) -> Result<DiagnoseResult, DiagnoseError> {
        ensure_all_questions_answered(answers, self.catalog.questions())?;

        let raw = aggregate_raw_scores(answers, &self.catalog)?;
        let normalized = normalize_scores(&raw, self.catalog.max_scores());
        let split = separate_penalties(&normalized);

        let profile_scores = self.scorer.score(&split);
        let (category, vector) = self.scorer.select(&profile_scores)?;
        let type_id = TypeId::new(category.key, vector.key);

        debug!(
            type_id = %type_id,
            category_score = category.score,
            vector_score = vector.score,
            answers = answers.len(),
            "diagnosis completed"
        );

        let config = self.scorer.config();
        let category_profile = config
            .category(category.key)
            .ok_or_else(|| DiagnoseError::UnknownProfile(category.key.to_string()))?;
        let vector_profile = config
            .vector(vector.key)
            .ok_or_else(|| DiagnoseError::UnknownProfile(vector.key.to_string()))?;

        let message = compose_message(
            &config.message,
            category_profile,
            vector_profile,
            &split.penalties,
            &split.positive,
        );

        Ok(DiagnoseResult {
            type_id,
            category: category.key,
            vector: vector.key,
            scores: ScoreBreakdown {
                raw,
                normalized: split.positive,
                penalties: split.penalties,
                categories: profile_scores.categories,
                vectors: profile_scores.vectors,
            },
            message,
        })
    }

    /// Generic explanation for a type, independent of any answers.
    pub fn describe(&self, type_id: TypeId) -> Result<TypeDescription, DiagnoseError> {
        let config = self.scorer.config();
        let category = config
            .category(type_id.category)
            .ok_or_else(|| DiagnoseError::UnknownProfile(type_id.category.to_string()))?;
        let vector = config
            .vector(type_id.vector)
            .ok_or_else(|| DiagnoseError::UnknownProfile(type_id.vector.to_string()))?;
        Ok(describe_type(&config.message, type_id, category, vector))
    }

    /// Client-facing questionnaire without the per-option scoring tables.
    pub fn questionnaire(&self) -> Vec<QuestionView> {
        self.catalog
            .questions()
            .iter()
            .map(QuestionView::from)
            .collect()
    }
}

#[derive(Debug, thiserror::Error)]
pub enum DiagnoseError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    Selection(#[from] SelectionError),
    #[error("profile {0} has no configuration")]
    UnknownProfile(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuestionView {
    pub id: String,
    pub prompt: String,
    #[serde(rename = "type")]
    pub kind: QuestionKind,
    pub max_select: usize,
    pub options: Vec<OptionView>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OptionView {
    pub key: String,
    pub label: String,
}

impl From<&Question> for QuestionView {
    fn from(question: &Question) -> Self {
        Self {
            id: question.id.clone(),
            prompt: question.prompt.clone(),
            kind: question.kind,
            max_select: question.selection_cap(),
            options: question
                .options
                .iter()
                .map(|option| OptionView {
                    key: option.key.clone(),
                    label: option.label.clone(),
                })
                .collect(),
        }
    }
}
