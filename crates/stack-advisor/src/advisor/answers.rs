use std::collections::BTreeMap;
use std::io::Read;
use std::path::Path;

use serde::{Deserialize, Serialize};

use super::questions::{QuestionCatalog, QuestionCategory, QuestionKind};

/// What a single-choice interaction did to the stored answer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChoiceTransition {
    Selected,
    Replaced { previous: String },
    Deselected,
}

/// The user's answers so far, partitioned by category.
///
/// Single-choice answers live in exactly one bucket, chosen from the question id prefix:
/// `f*` questions go to `foundational`, everything else to `constraints`. Numeric answers
/// (sizing sliders and the budget ceiling) go to `sizing`.
///
/// Not deserializable. Saved answers are restored through [`AnswerSheet::apply`].
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct AnswerState {
    sizing: BTreeMap<String, f64>,
    foundational: BTreeMap<String, String>,
    constraints: BTreeMap<String, String>,
    selections: BTreeMap<String, Vec<String>>,
}

impl AnswerState {
    pub fn new() -> Self {
        Self::default()
    }

    fn choice_bucket(&mut self, question_id: &str) -> &mut BTreeMap<String, String> {
        match QuestionCategory::from_question_id(question_id) {
            Some(QuestionCategory::Foundational) => &mut self.foundational,
            _ => &mut self.constraints,
        }
    }

    /// Select `option_id`, or deselect it when it is already the active answer.
    pub fn set_single_choice(&mut self, question_id: &str, option_id: &str) -> ChoiceTransition {
        let bucket = self.choice_bucket(question_id);
        if bucket.get(question_id).map(String::as_str) == Some(option_id) {
            bucket.remove(question_id);
            return ChoiceTransition::Deselected;
        }

        match bucket.insert(question_id.to_string(), option_id.to_string()) {
            Some(previous) => ChoiceTransition::Replaced { previous },
            None => ChoiceTransition::Selected,
        }
    }

    /// Flip membership of `option_id`; returns whether it is selected afterwards.
    pub fn toggle_multi_choice(&mut self, question_id: &str, option_id: &str) -> bool {
        let selected = self.selections.entry(question_id.to_string()).or_default();
        let now_selected = match selected.iter().position(|id| id == option_id) {
            Some(index) => {
                selected.remove(index);
                false
            }
            None => {
                selected.push(option_id.to_string());
                true
            }
        };

        if selected.is_empty() {
            self.selections.remove(question_id);
        }
        now_selected
    }

    /// Store a slider value. Callers clamp to the question's range first.
    pub fn set_range(&mut self, question_id: &str, value: f64) {
        self.sizing.insert(question_id.to_string(), value);
    }

    pub fn clear_answer(&mut self, question_id: &str) {
        self.sizing.remove(question_id);
        self.foundational.remove(question_id);
        self.constraints.remove(question_id);
        self.selections.remove(question_id);
    }

    pub fn clear(&mut self) {
        self.sizing.clear();
        self.foundational.clear();
        self.constraints.clear();
        self.selections.clear();
    }

    pub fn numeric(&self, question_id: &str) -> Option<f64> {
        self.sizing.get(question_id).copied()
    }

    pub fn choice(&self, question_id: &str) -> Option<&str> {
        self.foundational
            .get(question_id)
            .or_else(|| self.constraints.get(question_id))
            .map(String::as_str)
    }

    pub fn selections(&self, question_id: &str) -> &[String] {
        self.selections
            .get(question_id)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn is_selected(&self, question_id: &str, option_id: &str) -> bool {
        self.selections(question_id).iter().any(|id| id == option_id)
    }

    pub fn has_answer(&self, question_id: &str) -> bool {
        self.sizing.contains_key(question_id)
            || self.foundational.contains_key(question_id)
            || self.constraints.contains_key(question_id)
            || !self.selections(question_id).is_empty()
    }

    pub fn missing<'a>(&self, required_ids: &[&'a str]) -> Vec<&'a str> {
        required_ids
            .iter()
            .copied()
            .filter(|question_id| !self.has_answer(question_id))
            .collect()
    }

    pub fn is_complete(&self, required_ids: &[&str]) -> bool {
        self.missing(required_ids).is_empty()
    }

    pub fn is_empty(&self) -> bool {
        self.sizing.is_empty()
            && self.foundational.is_empty()
            && self.constraints.is_empty()
            && self.selections.is_empty()
    }

    pub fn answered_count(&self) -> usize {
        self.sizing.len() + self.foundational.len() + self.constraints.len() + self.selections.len()
    }
}

/// Raw answer as written in an answer sheet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AnswerValue {
    Number(f64),
    Choice(String),
    Many(Vec<String>),
}

#[derive(Debug, thiserror::Error)]
pub enum AnswerSheetError {
    #[error("failed to read answer sheet {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid answer sheet: {0}")]
    Json(#[from] serde_json::Error),
    #[error("unknown question '{0}'")]
    UnknownQuestion(String),
    #[error("question '{question}' has no option '{option}'")]
    UnknownOption { question: String, option: String },
    #[error("question '{question}' expects a {expected} answer")]
    KindMismatch {
        question: String,
        expected: &'static str,
    },
    #[error("value {value} for '{question}' lies outside [{min}, {max}]")]
    OutOfRange {
        question: String,
        value: f64,
        min: f64,
        max: f64,
    },
}

/// Question id to answer mapping loaded from JSON, validated once against the catalog.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AnswerSheet {
    pub answers: BTreeMap<String, AnswerValue>,
}

impl AnswerSheet {
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, AnswerSheetError> {
        let path = path.as_ref();
        let file = std::fs::File::open(path).map_err(|source| AnswerSheetError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_reader(file)
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Self, AnswerSheetError> {
        Ok(serde_json::from_reader(reader)?)
    }

    pub fn apply(&self, questions: &QuestionCatalog) -> Result<AnswerState, AnswerSheetError> {
        let mut state = AnswerState::new();

        for (question_id, value) in &self.answers {
            let question = questions
                .get(question_id)
                .ok_or_else(|| AnswerSheetError::UnknownQuestion(question_id.clone()))?;

            let known = |option_id: &str| -> Result<(), AnswerSheetError> {
                question
                    .option(option_id)
                    .map(|_| ())
                    .ok_or_else(|| AnswerSheetError::UnknownOption {
                        question: question_id.clone(),
                        option: option_id.to_string(),
                    })
            };
            let mismatch = || AnswerSheetError::KindMismatch {
                question: question_id.clone(),
                expected: question.kind.label(),
            };

            match (&question.kind, value) {
                (QuestionKind::SingleChoice { .. }, AnswerValue::Choice(option_id)) => {
                    known(option_id)?;
                    state.set_single_choice(question_id, option_id);
                }
                (QuestionKind::MultiChoice { .. }, AnswerValue::Choice(option_id)) => {
                    known(option_id)?;
                    state.toggle_multi_choice(question_id, option_id);
                }
                (QuestionKind::MultiChoice { .. }, AnswerValue::Many(option_ids)) => {
                    for option_id in option_ids {
                        known(option_id)?;
                        if !state.is_selected(question_id, option_id) {
                            state.toggle_multi_choice(question_id, option_id);
                        }
                    }
                }
                (QuestionKind::NumericRange { range }, AnswerValue::Number(number)) => {
                    if !range.contains(*number) {
                        return Err(AnswerSheetError::OutOfRange {
                            question: question_id.clone(),
                            value: *number,
                            min: range.min,
                            max: range.max,
                        });
                    }
                    state.set_range(question_id, *number);
                }
                _ => return Err(mismatch()),
            }
        }

        Ok(state)
    }
}
