use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};

use super::dimensions::DimensionScores;
use super::domain::{Question, QuestionKind};
use super::scoring::rules::compute_max_scores;

const BUILTIN_QUESTIONS: &str = include_str!("../../data/questions.json");

/// Failure loading or validating the question catalog or the scoring configuration.
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("unable to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("malformed {what}: {source}")]
    Parse {
        what: &'static str,
        source: serde_json::Error,
    },
    #[error("invalid {what}: {}", problems.join("; "))]
    Invalid {
        what: &'static str,
        problems: Vec<String>,
    },
}

pub(crate) fn read_source(path: &Path) -> Result<String, CatalogError> {
    std::fs::read_to_string(path).map_err(|source| CatalogError::Io {
        path: path.to_path_buf(),
        source,
    })
}

/// Immutable question list with an id index and the memoised per-dimension maxima.
#[derive(Debug, Clone)]
pub struct QuestionCatalog {
    questions: Vec<Question>,
    index: HashMap<String, usize>,
    max_scores: DimensionScores,
}

impl QuestionCatalog {
    pub fn new(questions: Vec<Question>) -> Result<Self, CatalogError> {
        let problems = catalog_violations(&questions);
        if !problems.is_empty() {
            return Err(CatalogError::Invalid {
                what: "question catalog",
                problems,
            });
        }

        let index = questions
            .iter()
            .enumerate()
            .map(|(position, question)| (question.id.clone(), position))
            .collect();
        let max_scores = compute_max_scores(&questions);

        Ok(Self {
            questions,
            index,
            max_scores,
        })
    }

    pub fn from_json(raw: &str) -> Result<Self, CatalogError> {
        let questions = serde_json::from_str(raw).map_err(|source| CatalogError::Parse {
            what: "question catalog",
            source,
        })?;
        Self::new(questions)
    }

    pub fn from_path(path: &Path) -> Result<Self, CatalogError> {
        Self::from_json(&read_source(path)?)
    }

    /// The questionnaire shipped with the crate.
    pub fn builtin() -> Result<Self, CatalogError> {
        Self::from_json(BUILTIN_QUESTIONS)
    }

    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    pub fn question(&self, id: &str) -> Option<&Question> {
        self.index.get(id).map(|position| &self.questions[*position])
    }

    /// Upper bound per dimension used as the normalisation denominator.
    ///
    /// Each question contributes its best case independently, so no single answer set needs to
    /// reach every maximum at once. Changing this bound shifts every normalized score.
    pub fn max_scores(&self) -> &DimensionScores {
        &self.max_scores
    }

    pub fn len(&self) -> usize {
        self.questions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }
}

fn catalog_violations(questions: &[Question]) -> Vec<String> {
    let mut problems = Vec::new();
    let mut ids = HashSet::new();

    for question in questions {
        if !ids.insert(question.id.as_str()) {
            problems.push(format!("question {} is defined more than once", question.id));
        }
        if question.options.is_empty() {
            problems.push(format!("question {} has no options", question.id));
        }
        if question.kind == QuestionKind::Multi && question.max_select == Some(0) {
            problems.push(format!("question {} allows zero selections", question.id));
        }

        let mut keys = HashSet::new();
        for option in &question.options {
            if !keys.insert(option.key.as_str()) {
                problems.push(format!(
                    "question {} repeats option key {}",
                    question.id, option.key
                ));
            }
            if let Some((dimension, _)) = option.scores.iter().find(|(_, value)| !value.is_finite())
            {
                problems.push(format!(
                    "question {} option {} has a non-finite score for {}",
                    question.id, option.key, dimension
                ));
            }
        }
    }

    problems
}
