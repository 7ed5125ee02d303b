use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use super::dimensions::DimensionScores;

/// Whether a question accepts exactly one option or a capped set of options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuestionKind {
    Single,
    Multi,
}

/// Selectable answer carrying its per-dimension point contributions, in document order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuestionOption {
    pub key: String,
    pub label: String,
    #[serde(default)]
    pub scores: IndexMap<String, f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Question {
    pub id: String,
    pub prompt: String,
    #[serde(rename = "type")]
    pub kind: QuestionKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_select: Option<usize>,
    pub options: Vec<QuestionOption>,
}

impl Question {
    /// Number of distinct options a respondent may pick; single-select questions always allow one.
    pub fn selection_cap(&self) -> usize {
        match self.kind {
            QuestionKind::Single => 1,
            QuestionKind::Multi => self.max_select.unwrap_or(self.options.len()),
        }
    }

    pub fn option(&self, key: &str) -> Option<&QuestionOption> {
        self.options.iter().find(|option| option.key == key)
    }
}

/// Respondent's pick for one question, in either wire shape.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum AnswerSelection {
    Single {
        #[serde(rename = "optionKey")]
        option_key: String,
    },
    Multiple {
        #[serde(rename = "optionKeys")]
        option_keys: Vec<String>,
    },
}

/// One answer on the wire. Parsing requires exactly one of `optionKey` or `optionKeys` and
/// rejects any other field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", try_from = "RawAnswer")]
pub struct AnswerInput {
    pub question_id: String,
    #[serde(flatten)]
    pub selection: AnswerSelection,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
struct RawAnswer {
    question_id: String,
    #[serde(default)]
    option_key: Option<String>,
    #[serde(default)]
    option_keys: Option<Vec<String>>,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AnswerShapeError {
    #[error("answer for question {question_id} carries both optionKey and optionKeys")]
    Ambiguous { question_id: String },
    #[error("answer for question {question_id} carries neither optionKey nor optionKeys")]
    MissingSelection { question_id: String },
}

impl TryFrom<RawAnswer> for AnswerInput {
    type Error = AnswerShapeError;

    fn try_from(raw: RawAnswer) -> Result<Self, Self::Error> {
        let question_id = raw.question_id;
        let selection = match (raw.option_key, raw.option_keys) {
            (Some(option_key), None) => AnswerSelection::Single { option_key },
            (None, Some(option_keys)) => AnswerSelection::Multiple { option_keys },
            (Some(_), Some(_)) => return Err(AnswerShapeError::Ambiguous { question_id }),
            (None, None) => return Err(AnswerShapeError::MissingSelection { question_id }),
        };
        Ok(Self {
            question_id,
            selection,
        })
    }
}

impl AnswerInput {
    pub fn single(question_id: impl Into<String>, option_key: impl Into<String>) -> Self {
        Self {
            question_id: question_id.into(),
            selection: AnswerSelection::Single {
                option_key: option_key.into(),
            },
        }
    }

    pub fn multiple<I, S>(question_id: impl Into<String>, option_keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            question_id: question_id.into(),
            selection: AnswerSelection::Multiple {
                option_keys: option_keys.into_iter().map(Into::into).collect(),
            },
        }
    }
}

/// The four category profiles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CategoryKey {
    Challenge,
    Create,
    Support,
    Strategy,
}

impl CategoryKey {
    pub const ALL: [CategoryKey; 4] = [
        CategoryKey::Challenge,
        CategoryKey::Create,
        CategoryKey::Support,
        CategoryKey::Strategy,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            CategoryKey::Challenge => "challenge",
            CategoryKey::Create => "create",
            CategoryKey::Support => "support",
            CategoryKey::Strategy => "strategy",
        }
    }
}

/// The four vector profiles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VectorKey {
    Speed,
    Structure,
    Explore,
    Connect,
}

impl VectorKey {
    pub const ALL: [VectorKey; 4] = [
        VectorKey::Speed,
        VectorKey::Structure,
        VectorKey::Explore,
        VectorKey::Connect,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            VectorKey::Speed => "speed",
            VectorKey::Structure => "structure",
            VectorKey::Explore => "explore",
            VectorKey::Connect => "connect",
        }
    }
}

impl fmt::Display for CategoryKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for VectorKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CategoryKey {
    type Err = TypeIdParseError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        CategoryKey::ALL
            .into_iter()
            .find(|key| key.as_str() == value)
            .ok_or_else(|| TypeIdParseError(value.to_string()))
    }
}

impl FromStr for VectorKey {
    type Err = TypeIdParseError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        VectorKey::ALL
            .into_iter()
            .find(|key| key.as_str() == value)
            .ok_or_else(|| TypeIdParseError(value.to_string()))
    }
}

/// Composed `category-vector` classification, e.g. `challenge-speed`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TypeId {
    pub category: CategoryKey,
    pub vector: VectorKey,
}

impl TypeId {
    pub fn new(category: CategoryKey, vector: VectorKey) -> Self {
        Self { category, vector }
    }
}

impl fmt::Display for TypeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.category, self.vector)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown type id: {0}")]
pub struct TypeIdParseError(pub String);

impl FromStr for TypeId {
    type Err = TypeIdParseError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let (category, vector) = value
            .trim()
            .split_once('-')
            .ok_or_else(|| TypeIdParseError(value.to_string()))?;
        let category = category
            .parse()
            .map_err(|_| TypeIdParseError(value.to_string()))?;
        let vector = vector
            .parse()
            .map_err(|_| TypeIdParseError(value.to_string()))?;
        Ok(Self { category, vector })
    }
}

impl Serialize for TypeId {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for TypeId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

/// Every intermediate map the engine produced, kept for transparency.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoreBreakdown {
    pub raw: DimensionScores,
    /// Normalized positive dimensions only; penalty dimensions live in `penalties`.
    pub normalized: DimensionScores,
    pub penalties: DimensionScores,
    pub categories: BTreeMap<CategoryKey, f64>,
    pub vectors: BTreeMap<VectorKey, f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DiagnoseResult {
    pub type_id: TypeId,
    pub category: CategoryKey,
    pub vector: VectorKey,
    pub scores: ScoreBreakdown,
    pub message: String,
}
