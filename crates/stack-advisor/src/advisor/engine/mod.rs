//! Staged filter and scoring pipeline over the reference catalog.
//!
//! Every call to [`AdvisorEngine::evaluate`] starts from the full catalog with zero scores,
//! folds the ordered rule table over it and ranks what survives. Nothing is cached between
//! calls, so the output depends only on the catalog, the answers and the configuration.

mod config;
mod ranking;
mod rules;

#[cfg(test)]
mod tests;

pub use config::EngineConfig;

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use super::answers::AnswerState;
use super::catalog::ReferenceCatalog;
use super::domain::{CandidateId, CandidateRecord};
use rules::{Pass, RULES};

/// Pipeline stages in the order they run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Stage {
    ScaleElimination,
    ArchitecturalConstraints,
    OrganizationalConstraints,
    UseCaseScoring,
}

impl Stage {
    pub const fn ordered() -> [Self; 4] {
        [
            Self::ScaleElimination,
            Self::ArchitecturalConstraints,
            Self::OrganizationalConstraints,
            Self::UseCaseScoring,
        ]
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::ScaleElimination => "Scale elimination",
            Self::ArchitecturalConstraints => "Architectural constraints",
            Self::OrganizationalConstraints => "Organizational constraints",
            Self::UseCaseScoring => "Use-case scoring",
        }
    }
}

/// Points awarded to a candidate by one rule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreComponent {
    pub question_id: String,
    pub points: i32,
    pub notes: String,
}

/// Why a candidate left the working set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Elimination {
    pub candidate_id: CandidateId,
    pub question_id: String,
    pub reason: String,
}

/// Per-evaluation wrapper carrying the scratch score.
#[derive(Debug, Clone)]
pub(crate) struct ScoredCandidate {
    pub candidate: CandidateRecord,
    pub score: i32,
    pub components: Vec<ScoreComponent>,
}

impl ScoredCandidate {
    pub fn new(candidate: CandidateRecord) -> Self {
        Self {
            candidate,
            score: 0,
            components: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankedCandidate {
    pub rank: usize,
    pub candidate: CandidateRecord,
    pub score: i32,
    pub components: Vec<ScoreComponent>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StageSnapshot {
    pub stage: Stage,
    pub remaining: usize,
}

/// Output of one evaluation pass.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Evaluation {
    pub total: usize,
    pub ranked: Vec<RankedCandidate>,
    /// Candidates remaining after each question's rule ran, including unanswered questions.
    pub per_question_counts: BTreeMap<String, usize>,
    pub stages: Vec<StageSnapshot>,
    pub eliminations: Vec<Elimination>,
}

impl Evaluation {
    pub fn remaining(&self) -> usize {
        self.ranked.len()
    }

    pub fn count_after(&self, question_id: &str) -> Option<usize> {
        self.per_question_counts.get(question_id).copied()
    }

    pub fn eliminated_by<'a>(&'a self, question_id: &'a str) -> impl Iterator<Item = &'a Elimination> {
        self.eliminations
            .iter()
            .filter(move |elimination| elimination.question_id == question_id)
    }

    pub fn top(&self, limit: usize) -> &[RankedCandidate] {
        &self.ranked[..limit.min(self.ranked.len())]
    }
}

/// Stateless evaluator applying the configured thresholds to an answer state.
#[derive(Debug, Clone, Default)]
pub struct AdvisorEngine {
    config: EngineConfig,
}

impl AdvisorEngine {
    pub fn new(config: EngineConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn evaluate(&self, catalog: &ReferenceCatalog, answers: &AnswerState) -> Evaluation {
        let mut pass = Pass::new(catalog);
        let mut per_question_counts = BTreeMap::new();
        let mut stages = Vec::with_capacity(Stage::ordered().len());

        for stage in Stage::ordered() {
            for rule in RULES.iter().filter(|rule| rule.stage == stage) {
                let before = pass.remaining();
                (rule.apply)(&mut pass, answers, &self.config);
                debug!(
                    question = rule.question_id,
                    before,
                    after = pass.remaining(),
                    "rule applied"
                );
                per_question_counts.insert(rule.question_id.to_string(), pass.remaining());
            }
            stages.push(StageSnapshot {
                stage,
                remaining: pass.remaining(),
            });
        }

        let (survivors, eliminations) = pass.finish();
        let ranked = ranking::rank(survivors);

        info!(
            total = catalog.len(),
            remaining = ranked.len(),
            answered = answers.answered_count(),
            top = ranked.first().map(|entry| entry.candidate.id.as_str()),
            "evaluation complete"
        );

        Evaluation {
            total: catalog.len(),
            ranked,
            per_question_counts,
            stages,
            eliminations,
        }
    }
}

/// Evaluates with the default thresholds.
pub fn evaluate(catalog: &ReferenceCatalog, answers: &AnswerState) -> Evaluation {
    AdvisorEngine::default().evaluate(catalog, answers)
}
