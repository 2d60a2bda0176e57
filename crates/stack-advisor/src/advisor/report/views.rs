use chrono::NaiveDate;
use serde::Serialize;

use super::super::engine::{RankedCandidate, StageSnapshot};
use super::tco::TcoProjection;

/// One answered question rendered as `title: answer`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RequirementLine {
    pub question_id: String,
    pub section: Option<String>,
    pub title: String,
    pub answer: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TradeoffKind {
    Benefit,
    Risk,
}

/// One consequence of the chosen isolation pattern.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Tradeoff {
    pub kind: TradeoffKind,
    pub topic: String,
    pub detail: String,
}

/// Derived architecture recommendations. `None` means more answers are needed.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ArchitectureSummary {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub isolation_pattern: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub catalog: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub table_format: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub query_engine: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub performance: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tco: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub production_examples: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub tradeoffs: Vec<Tradeoff>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CandidateSummary {
    pub rank: usize,
    pub id: String,
    pub name: String,
    pub category: String,
    pub description: String,
    pub cost_range: String,
    pub cost_notes: String,
    pub highlights: Vec<&'static str>,
    pub operational_complexity: &'static str,
    pub team_size: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,
    pub score: i32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tco: Option<TcoProjection>,
}

impl CandidateSummary {
    pub fn from_ranked(entry: &RankedCandidate) -> Self {
        let candidate = &entry.candidate;
        Self {
            rank: entry.rank,
            id: candidate.id.to_string(),
            name: candidate.name.clone(),
            category: candidate.category.clone(),
            description: candidate.description.clone(),
            cost_range: candidate.typical_annual_cost_range.clone(),
            cost_notes: candidate.cost_notes.clone(),
            highlights: candidate.capabilities.highlights(),
            operational_complexity: candidate.capabilities.operational_complexity.label(),
            team_size: candidate.capabilities.team_size_required.label(),
            website: candidate.website.clone(),
            score: entry.score,
            tco: None,
        }
    }

    pub fn with_tco(mut self, projection: TcoProjection) -> Self {
        self.tco = Some(projection);
        self
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StageCountEntry {
    pub stage_label: &'static str,
    pub remaining: usize,
}

impl From<&StageSnapshot> for StageCountEntry {
    fn from(snapshot: &StageSnapshot) -> Self {
        Self {
            stage_label: snapshot.stage.label(),
            remaining: snapshot.remaining,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RecommendationReportView {
    pub generated_on: NaiveDate,
    pub requirements: Vec<RequirementLine>,
    pub missing_required: Vec<String>,
    pub architecture: ArchitectureSummary,
    pub stage_counts: Vec<StageCountEntry>,
    pub candidates: Vec<CandidateSummary>,
    pub remaining: usize,
    pub total: usize,
}
