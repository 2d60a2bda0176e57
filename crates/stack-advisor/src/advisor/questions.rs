use std::collections::HashSet;
use std::io::Read;
use std::path::Path;

use serde::{Deserialize, Serialize};

use super::catalog::CatalogError;

const BUNDLED_QUESTIONS: &str = include_str!("../../data/decision_questions.json");

/// Well-known question ids consulted by the engine and the recommendation summary.
pub mod ids {
    pub const DAILY_VOLUME: &str = "s1_daily_volume";
    pub const GROWTH_RATE: &str = "s2_growth_rate";
    pub const SOURCE_COUNT: &str = "s3_source_count";
    pub const RETENTION_DAYS: &str = "s4_retention_days";

    pub const ISOLATION_PATTERN: &str = "f0_isolation_pattern";
    pub const TABLE_FORMAT: &str = "f1_table_format";
    pub const CATALOG: &str = "f2_catalog";
    pub const TRANSFORMATION: &str = "f3_transformation";
    pub const QUERY_ENGINE_CHARACTERISTICS: &str = "f4_query_engine_characteristics";

    pub const TEAM_SIZE: &str = "q1_team_size";
    pub const BUDGET: &str = "q2_budget";
    pub const CLOUD_ENVIRONMENT: &str = "q3_cloud_environment";
    pub const VENDOR_TOLERANCE: &str = "q4_vendor_tolerance";
    pub const PRIMARY_USE_CASE: &str = "q5_primary_use_case";
}

/// Category encoded by the question id prefix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuestionCategory {
    Sizing,
    Foundational,
    Constraint,
}

impl QuestionCategory {
    pub fn from_question_id(question_id: &str) -> Option<Self> {
        match question_id.chars().next() {
            Some('s') => Some(Self::Sizing),
            Some('f') => Some(Self::Foundational),
            Some('q') => Some(Self::Constraint),
            _ => None,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Sizing => "Data Scale",
            Self::Foundational => "Foundational Architecture",
            Self::Constraint => "Organizational Constraints",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChoiceOption {
    pub id: String,
    pub label: String,
    #[serde(default)]
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub performance_overhead: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub performance_gain: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tco: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub production_examples: Vec<String>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RangeScale {
    #[default]
    Linear,
    Logarithmic,
}

/// Bounds and slider metadata for a numeric question.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RangeSpec {
    pub min: f64,
    pub max: f64,
    pub default: f64,
    #[serde(default)]
    pub scale: RangeScale,
    #[serde(default)]
    pub markers: Vec<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unit: Option<String>,
}

impl RangeSpec {
    pub fn contains(&self, value: f64) -> bool {
        value >= self.min && value <= self.max
    }

    pub fn clamp(&self, value: f64) -> f64 {
        if value.is_nan() {
            return self.default;
        }
        value.clamp(self.min, self.max)
    }

    /// Nearest marker, measured in log space for logarithmic sliders.
    pub fn snap_to_marker(&self, value: f64) -> f64 {
        let value = self.clamp(value);
        let distance = |marker: f64| match self.scale {
            RangeScale::Linear => (marker - value).abs(),
            RangeScale::Logarithmic => (marker.ln() - value.ln()).abs(),
        };

        self.markers
            .iter()
            .copied()
            .min_by(|a, b| distance(*a).total_cmp(&distance(*b)))
            .unwrap_or(value)
    }

    /// Value at a slider position in `[0, 1]`.
    pub fn value_at(&self, position: f64) -> f64 {
        let position = if position.is_nan() {
            0.0
        } else {
            position.clamp(0.0, 1.0)
        };
        match self.scale {
            RangeScale::Linear => self.min + position * (self.max - self.min),
            RangeScale::Logarithmic => {
                let (low, high) = (self.min.ln(), self.max.ln());
                (low + position * (high - low)).exp()
            }
        }
    }

    pub fn position_of(&self, value: f64) -> f64 {
        let value = self.clamp(value);
        match self.scale {
            RangeScale::Linear => (value - self.min) / (self.max - self.min),
            RangeScale::Logarithmic => {
                (value.ln() - self.min.ln()) / (self.max.ln() - self.min.ln())
            }
        }
    }

    pub fn format_value(&self, value: f64) -> String {
        let number = if value.fract() == 0.0 {
            format!("{value:.0}")
        } else {
            format!("{value:.1}")
        };
        match &self.unit {
            Some(unit) => format!("{number} {unit}"),
            None => number,
        }
    }

    fn check(&self, question_id: &str) -> Result<(), CatalogError> {
        let invalid = |detail: &str| CatalogError::InvalidRange {
            question: question_id.to_string(),
            detail: detail.to_string(),
        };

        if !(self.min.is_finite() && self.max.is_finite()) || self.min >= self.max {
            return Err(invalid("min must be finite and below max"));
        }
        if self.scale == RangeScale::Logarithmic && self.min <= 0.0 {
            return Err(invalid("logarithmic ranges need a positive min"));
        }
        if !self.contains(self.default) {
            return Err(invalid("default lies outside [min, max]"));
        }
        if self.markers.iter().any(|marker| !self.contains(*marker)) {
            return Err(invalid("marker lies outside [min, max]"));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum QuestionKind {
    SingleChoice { options: Vec<ChoiceOption> },
    MultiChoice { options: Vec<ChoiceOption> },
    NumericRange { range: RangeSpec },
}

impl QuestionKind {
    pub const fn label(&self) -> &'static str {
        match self {
            Self::SingleChoice { .. } => "single choice",
            Self::MultiChoice { .. } => "multi choice",
            Self::NumericRange { .. } => "numeric range",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuestionDefinition {
    pub id: String,
    pub order: u32,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub section: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub help: Option<String>,
    #[serde(default)]
    pub required: bool,
    #[serde(flatten)]
    pub kind: QuestionKind,
}

impl QuestionDefinition {
    pub fn category(&self) -> Option<QuestionCategory> {
        QuestionCategory::from_question_id(&self.id)
    }

    pub fn options(&self) -> &[ChoiceOption] {
        match &self.kind {
            QuestionKind::SingleChoice { options } | QuestionKind::MultiChoice { options } => {
                options
            }
            QuestionKind::NumericRange { .. } => &[],
        }
    }

    pub fn option(&self, option_id: &str) -> Option<&ChoiceOption> {
        self.options().iter().find(|option| option.id == option_id)
    }

    pub fn range(&self) -> Option<&RangeSpec> {
        match &self.kind {
            QuestionKind::NumericRange { range } => Some(range),
            _ => None,
        }
    }

    pub fn is_multi_choice(&self) -> bool {
        matches!(self.kind, QuestionKind::MultiChoice { .. })
    }

    fn check(&self) -> Result<(), CatalogError> {
        if self.category().is_none() {
            return Err(CatalogError::UnknownCategory(self.id.clone()));
        }

        match &self.kind {
            QuestionKind::SingleChoice { options } | QuestionKind::MultiChoice { options } => {
                if options.is_empty() {
                    return Err(CatalogError::EmptyOptions(self.id.clone()));
                }
                let mut seen = HashSet::new();
                for option in options {
                    if !seen.insert(option.id.as_str()) {
                        return Err(CatalogError::DuplicateOption {
                            question: self.id.clone(),
                            option: option.id.clone(),
                        });
                    }
                }
                Ok(())
            }
            QuestionKind::NumericRange { range } => range.check(&self.id),
        }
    }
}

#[derive(Debug, Deserialize)]
struct QuestionDocument {
    questions: Vec<QuestionDefinition>,
}

/// Ordered, validated set of questions presented by the questionnaire.
#[derive(Debug, Clone)]
pub struct QuestionCatalog {
    questions: Vec<QuestionDefinition>,
}

impl QuestionCatalog {
    pub fn new(mut questions: Vec<QuestionDefinition>) -> Result<Self, CatalogError> {
        if questions.is_empty() {
            return Err(CatalogError::Empty("question catalog"));
        }

        let mut seen = HashSet::new();
        for question in &questions {
            if !seen.insert(question.id.as_str()) {
                return Err(CatalogError::DuplicateQuestion(question.id.clone()));
            }
            question.check()?;
        }

        questions.sort_by_key(|question| question.order);
        Ok(Self { questions })
    }

    /// Question set shipped with the crate.
    pub fn bundled() -> Result<Self, CatalogError> {
        Self::from_reader(BUNDLED_QUESTIONS.as_bytes())
    }

    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, CatalogError> {
        let path = path.as_ref();
        let file = std::fs::File::open(path).map_err(|source| CatalogError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_reader(file)
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Self, CatalogError> {
        let document: QuestionDocument = serde_json::from_reader(reader)?;
        Self::new(document.questions)
    }

    pub fn questions(&self) -> &[QuestionDefinition] {
        &self.questions
    }

    pub fn get(&self, question_id: &str) -> Option<&QuestionDefinition> {
        self.questions
            .iter()
            .find(|question| question.id == question_id)
    }

    pub fn required_ids(&self) -> Vec<&str> {
        self.questions
            .iter()
            .filter(|question| question.required)
            .map(|question| question.id.as_str())
            .collect()
    }

    pub fn option_label(&self, question_id: &str, option_id: &str) -> Option<&str> {
        self.get(question_id)
            .and_then(|question| question.option(option_id))
            .map(|option| option.label.as_str())
    }

    pub fn len(&self) -> usize {
        self.questions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }
}
