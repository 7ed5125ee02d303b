use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::Deserialize;
use serde_json::json;
use tracing::warn;

use super::domain::{AnswerInput, TypeId};
use super::service::{DiagnoseError, DiagnosisService};

/// Request body accepted by the diagnose endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct DiagnoseRequest {
    pub answers: Vec<AnswerInput>,
}

/// Router builder exposing the questionnaire, diagnosis, and type description endpoints.
pub fn diagnosis_router(service: Arc<DiagnosisService>) -> Router {
    Router::new()
        .route("/api/v1/diagnose", post(diagnose_handler))
        .route("/api/v1/questions", get(questions_handler))
        .route("/api/v1/types/:type_id", get(type_handler))
        .with_state(service)
}

pub(crate) async fn diagnose_handler(
    State(service): State<Arc<DiagnosisService>>,
    request: Result<Json<DiagnoseRequest>, JsonRejection>,
) -> Response {
    let Json(request) = match request {
        Ok(request) => request,
        Err(rejection) => {
            warn!(error = %rejection.body_text(), "malformed diagnose request");
            let payload = json!({
                "error": rejection.body_text(),
            });
            return (StatusCode::BAD_REQUEST, Json(payload)).into_response();
        }
    };

    match service.diagnose(&request.answers) {
        Ok(result) => (StatusCode::OK, Json(result)).into_response(),
        Err(DiagnoseError::Validation(error)) => {
            warn!(question_id = error.question_id(), %error, "rejected answer set");
            let payload = json!({
                "error": error.to_string(),
            });
            (StatusCode::BAD_REQUEST, Json(payload)).into_response()
        }
        Err(other) => {
            let payload = json!({
                "error": other.to_string(),
            });
            (StatusCode::INTERNAL_SERVER_ERROR, Json(payload)).into_response()
        }
    }
}

pub(crate) async fn questions_handler(State(service): State<Arc<DiagnosisService>>) -> Response {
    (StatusCode::OK, Json(service.questionnaire())).into_response()
}

pub(crate) async fn type_handler(
    State(service): State<Arc<DiagnosisService>>,
    Path(raw_type_id): Path<String>,
) -> Response {
    let type_id = match raw_type_id.parse::<TypeId>() {
        Ok(type_id) => type_id,
        Err(error) => {
            let payload = json!({
                "error": error.to_string(),
            });
            return (StatusCode::NOT_FOUND, Json(payload)).into_response();
        }
    };

    match service.describe(type_id) {
        Ok(description) => (StatusCode::OK, Json(description)).into_response(),
        Err(other) => {
            let payload = json!({
                "error": other.to_string(),
            });
            (StatusCode::INTERNAL_SERVER_ERROR, Json(payload)).into_response()
        }
    }
}
