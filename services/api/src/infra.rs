use metrics_exporter_prometheus::PrometheusHandle;
use persona_diagnosis::config::CatalogConfig;
use persona_diagnosis::diagnosis::{AnswerInput, DiagnoseRequest, DiagnosisService};
use persona_diagnosis::error::AppError;
use serde::Deserialize;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;
use tracing::info;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Builds the diagnosis service from configured overrides, falling back to the built-in data.
pub(crate) fn load_service(config: &CatalogConfig) -> Result<DiagnosisService, AppError> {
    let service = DiagnosisService::load(
        config.questions_path.as_deref(),
        config.scoring_path.as_deref(),
    )?;

    info!(
        questions = service.catalog().len(),
        questions_override = config.questions_path.is_some(),
        scoring_override = config.scoring_path.is_some(),
        "diagnosis catalog loaded"
    );
    Ok(service)
}

/// Saved answer files may wrap the list like the HTTP body or hold a bare array.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum AnswerFile {
    Wrapped(DiagnoseRequest),
    Bare(Vec<AnswerInput>),
}

pub(crate) fn parse_answers(raw: &str) -> Result<Vec<AnswerInput>, AppError> {
    let answers = match serde_json::from_str(raw)? {
        AnswerFile::Wrapped(request) => request.answers,
        AnswerFile::Bare(answers) => answers,
    };
    Ok(answers)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_wrapped_and_bare_answer_files() {
        let wrapped = r#"{"answers": [{"questionId": "Q01", "optionKey": "A"}]}"#;
        let bare = r#"[{"questionId": "Q15", "optionKeys": ["Growth"]}]"#;

        assert_eq!(
            parse_answers(wrapped).expect("wrapped file parses"),
            vec![AnswerInput::single("Q01", "A")]
        );
        assert_eq!(
            parse_answers(bare).expect("bare file parses"),
            vec![AnswerInput::multiple("Q15", ["Growth"])]
        );
    }

    #[test]
    fn rejects_answers_without_a_selection() {
        let err = parse_answers(r#"[{"questionId": "Q01"}]"#).expect_err("selection missing");
        assert!(matches!(err, AppError::Payload(_)));
    }

    #[test]
    fn default_catalog_config_loads_builtin_data() {
        let service = load_service(&CatalogConfig::default()).expect("builtin data loads");
        assert_eq!(service.catalog().len(), 25);
    }
}
