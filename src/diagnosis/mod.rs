//! Personality diagnosis engine.
//!
//! Answers flow through validation, raw aggregation, normalisation against the catalog maxima,
//! penalty separation, weighted profile scoring, tie-broken selection, and finally message
//! composition. Every stage is a pure function over immutable catalog data.

pub mod catalog;
pub mod dimensions;
pub mod domain;
pub mod message;
pub mod router;
pub mod scoring;
pub mod service;
pub mod validation;

#[cfg(test)]
mod tests;

pub use catalog::{CatalogError, QuestionCatalog};
pub use dimensions::DimensionScores;
pub use domain::{
    AnswerInput, AnswerSelection, AnswerShapeError, CategoryKey, DiagnoseResult, Question,
    QuestionKind, QuestionOption, ScoreBreakdown, TypeId, TypeIdParseError, VectorKey,
};
pub use message::TypeDescription;
pub use router::{diagnosis_router, DiagnoseRequest};
pub use scoring::{ScoringConfig, SelectionError};
pub use service::{DiagnoseError, DiagnosisService, QuestionView};
pub use validation::ValidationError;
