use std::collections::{HashMap, HashSet};

use super::domain::{AnswerInput, AnswerSelection, Question, QuestionKind};

/// Caller-input faults; messages are surfaced verbatim to clients.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("missing answer for question {question_id}")]
    MissingAnswer { question_id: String },
    #[error("duplicate answer for question {question_id}")]
    DuplicateAnswer { question_id: String },
    #[error("unknown question id: {question_id}")]
    UnknownQuestion { question_id: String },
    #[error("invalid option {option_key} for question {question_id}")]
    UnknownOption {
        question_id: String,
        option_key: String,
    },
    #[error("question {question_id} allows up to {max_select} selections")]
    TooManySelections {
        question_id: String,
        max_select: usize,
    },
    #[error("no options selected for question {question_id}")]
    NoSelection { question_id: String },
    #[error("single choice question {question_id} expects exactly one option")]
    SingleSelectionShape { question_id: String },
    #[error("multiple choice question {question_id} expects a list of option keys")]
    MultipleSelectionShape { question_id: String },
}

impl ValidationError {
    pub fn question_id(&self) -> &str {
        match self {
            ValidationError::MissingAnswer { question_id }
            | ValidationError::DuplicateAnswer { question_id }
            | ValidationError::UnknownQuestion { question_id }
            | ValidationError::UnknownOption { question_id, .. }
            | ValidationError::TooManySelections { question_id, .. }
            | ValidationError::NoSelection { question_id }
            | ValidationError::SingleSelectionShape { question_id }
            | ValidationError::MultipleSelectionShape { question_id } => question_id,
        }
    }
}

/// Rejects answer sets that repeat a question or leave one out.
///
/// Duplicates are reported before omissions, each in input order.
pub fn ensure_all_questions_answered(
    answers: &[AnswerInput],
    questions: &[Question],
) -> Result<(), ValidationError> {
    let mut answered: HashMap<&str, &AnswerInput> = HashMap::with_capacity(answers.len());
    for answer in answers {
        if answered.insert(answer.question_id.as_str(), answer).is_some() {
            return Err(ValidationError::DuplicateAnswer {
                question_id: answer.question_id.clone(),
            });
        }
    }

    match questions
        .iter()
        .find(|question| !answered.contains_key(question.id.as_str()))
    {
        Some(question) => Err(ValidationError::MissingAnswer {
            question_id: question.id.clone(),
        }),
        None => Ok(()),
    }
}

/// Resolves the option keys an answer selects, enforcing the question's selection shape.
///
/// Multi-select keys are de-duplicated, keeping first occurrences, before the cap is checked.
/// Keys are not checked against the question's options here.
pub fn resolve_selected_keys<'a>(
    answer: &'a AnswerInput,
    question: &Question,
) -> Result<Vec<&'a str>, ValidationError> {
    match (question.kind, &answer.selection) {
        (QuestionKind::Single, AnswerSelection::Single { option_key }) => {
            Ok(vec![option_key.as_str()])
        }
        (QuestionKind::Single, AnswerSelection::Multiple { option_keys }) => {
            match option_keys.as_slice() {
                [only] => Ok(vec![only.as_str()]),
                _ => Err(ValidationError::SingleSelectionShape {
                    question_id: question.id.clone(),
                }),
            }
        }
        (QuestionKind::Multi, AnswerSelection::Single { .. }) => {
            Err(ValidationError::MultipleSelectionShape {
                question_id: question.id.clone(),
            })
        }
        (QuestionKind::Multi, AnswerSelection::Multiple { option_keys }) => {
            let mut seen = HashSet::with_capacity(option_keys.len());
            let unique: Vec<&str> = option_keys
                .iter()
                .map(String::as_str)
                .filter(|key| seen.insert(*key))
                .collect();

            let max_select = question.selection_cap();
            if unique.len() > max_select {
                return Err(ValidationError::TooManySelections {
                    question_id: question.id.clone(),
                    max_select,
                });
            }
            if unique.is_empty() {
                return Err(ValidationError::NoSelection {
                    question_id: question.id.clone(),
                });
            }
            Ok(unique)
        }
    }
}
