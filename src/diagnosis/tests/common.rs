use std::sync::Arc;

use axum::http::StatusCode;
use axum::response::Response;
use indexmap::IndexMap;
use serde::Deserialize;
use serde_json::Value;

use crate::diagnosis::catalog::QuestionCatalog;
use crate::diagnosis::domain::{AnswerInput, Question, QuestionKind, QuestionOption};
use crate::diagnosis::scoring::ScoringConfig;
use crate::diagnosis::{diagnosis_router, DiagnosisService};

pub(super) const TOLERANCE: f64 = 1e-9;

pub(super) const FIXTURES: [(&str, &str); 4] = [
    (
        "challenge-speed",
        include_str!("../../../tests/fixtures/challenge-speed.json"),
    ),
    (
        "support-connect",
        include_str!("../../../tests/fixtures/support-connect.json"),
    ),
    (
        "strategy-structure",
        include_str!("../../../tests/fixtures/strategy-structure.json"),
    ),
    (
        "create-explore",
        include_str!("../../../tests/fixtures/create-explore.json"),
    ),
];

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct AnswerFixture {
    pub(super) type_id: String,
    pub(super) answers: Vec<AnswerInput>,
}

pub(super) fn fixture(name: &str) -> AnswerFixture {
    let (_, raw) = FIXTURES
        .iter()
        .find(|(fixture_name, _)| *fixture_name == name)
        .expect("fixture exists");
    serde_json::from_str(raw).expect("fixture parses")
}

pub(super) fn all_fixtures() -> Vec<AnswerFixture> {
    FIXTURES.iter().map(|(name, _)| fixture(name)).collect()
}

pub(super) fn builtin_service() -> DiagnosisService {
    DiagnosisService::builtin().expect("builtin data loads")
}

pub(super) fn builtin_catalog() -> QuestionCatalog {
    QuestionCatalog::builtin().expect("builtin catalog loads")
}

pub(super) fn builtin_scoring() -> ScoringConfig {
    ScoringConfig::builtin().expect("builtin scoring loads")
}

pub(super) fn router() -> axum::Router {
    diagnosis_router(Arc::new(builtin_service()))
}

/// Question whose options contribute the given scores, keyed `A`, `B`, `C`...
pub(super) fn question(
    id: &str,
    kind: QuestionKind,
    max_select: Option<usize>,
    options: &[&[(&str, f64)]],
) -> Question {
    Question {
        id: id.to_string(),
        prompt: format!("prompt for {id}"),
        kind,
        max_select,
        options: options
            .iter()
            .enumerate()
            .map(|(position, scores)| {
                let key = char::from(b'A' + position as u8).to_string();
                QuestionOption {
                    label: format!("option {key}"),
                    key,
                    scores: scores
                        .iter()
                        .map(|(dimension, value)| (dimension.to_string(), *value))
                        .collect::<IndexMap<_, _>>(),
                }
            })
            .collect(),
    }
}

/// Two-question catalog: a single-select pace question and a multi-select drive question.
pub(super) fn small_catalog() -> QuestionCatalog {
    QuestionCatalog::new(vec![
        question(
            "P1",
            QuestionKind::Single,
            None,
            &[&[("style.speed", 2.0)], &[("style.structure", 1.0)]],
        ),
        question(
            "P2",
            QuestionKind::Multi,
            Some(2),
            &[
                &[("motivation.growth", 1.0)],
                &[("motivation.security", 1.0)],
                &[("ng.isolation", 1.0)],
            ],
        ),
    ])
    .expect("small catalog is valid")
}

pub(super) fn assert_close(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < TOLERANCE,
        "expected {expected}, got {actual}"
    );
}

pub(super) async fn json_body(response: Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body bytes");
    serde_json::from_slice(&bytes).expect("json body")
}

pub(super) async fn assert_error_response(response: Response, status: StatusCode, message: &str) {
    assert_eq!(response.status(), status);
    let body = json_body(response).await;
    assert_eq!(body["error"], message);
}
