use chrono::NaiveDate;

use super::super::answers::AnswerState;
use super::super::engine::{EngineConfig, Evaluation};
use super::super::questions::{QuestionCatalog, QuestionDefinition, QuestionKind};
use super::recommendations::recommend_architecture;
use super::tco::{project_tco, TcoInputs};
use super::views::{CandidateSummary, RecommendationReportView, RequirementLine, StageCountEntry};

/// Inputs of one recommendation report: the questionnaire, its answers and the engine result.
#[derive(Debug, Clone, Copy)]
pub struct RecommendationReport<'a> {
    pub questions: &'a QuestionCatalog,
    pub answers: &'a AnswerState,
    pub evaluation: &'a Evaluation,
}

impl<'a> RecommendationReport<'a> {
    pub fn new(
        questions: &'a QuestionCatalog,
        answers: &'a AnswerState,
        evaluation: &'a Evaluation,
    ) -> Self {
        Self {
            questions,
            answers,
            evaluation,
        }
    }

    /// Answered questions in questionnaire order.
    pub fn requirements(&self) -> Vec<RequirementLine> {
        self.questions
            .questions()
            .iter()
            .filter_map(|question| {
                describe_answer(question, self.answers).map(|answer| RequirementLine {
                    question_id: question.id.clone(),
                    section: question.section.clone(),
                    title: question.title.clone(),
                    answer,
                })
            })
            .collect()
    }

    /// Top candidates with a cost projection sized from the answered workload.
    pub fn shortlist(&self, top_n: usize) -> Vec<CandidateSummary> {
        let inputs = TcoInputs::from_answers(self.answers);
        self.evaluation
            .top(top_n)
            .iter()
            .map(|entry| {
                CandidateSummary::from_ranked(entry).with_tco(project_tco(&entry.candidate, &inputs))
            })
            .collect()
    }

    pub fn summary(
        &self,
        config: &EngineConfig,
        top_n: usize,
        generated_on: NaiveDate,
    ) -> RecommendationReportView {
        RecommendationReportView {
            generated_on,
            requirements: self.requirements(),
            missing_required: self
                .answers
                .missing(&self.questions.required_ids())
                .into_iter()
                .map(str::to_string)
                .collect(),
            architecture: recommend_architecture(self.answers, self.questions, config),
            stage_counts: self
                .evaluation
                .stages
                .iter()
                .map(StageCountEntry::from)
                .collect(),
            candidates: self.shortlist(top_n),
            remaining: self.evaluation.remaining(),
            total: self.evaluation.total,
        }
    }
}

fn describe_answer(question: &QuestionDefinition, answers: &AnswerState) -> Option<String> {
    let label = |option_id: &str| {
        question
            .option(option_id)
            .map(|option| option.label.clone())
            .unwrap_or_else(|| option_id.to_string())
    };

    match &question.kind {
        QuestionKind::NumericRange { range } => answers
            .numeric(&question.id)
            .map(|value| range.format_value(value)),
        QuestionKind::SingleChoice { .. } => answers.choice(&question.id).map(label),
        QuestionKind::MultiChoice { .. } => {
            let selected = answers.selections(&question.id);
            if selected.is_empty() {
                None
            } else {
                Some(
                    selected
                        .iter()
                        .map(|option_id| label(option_id))
                        .collect::<Vec<_>>()
                        .join(", "),
                )
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::advisor::catalog::ReferenceCatalog;
    use crate::advisor::engine::AdvisorEngine;
    use crate::advisor::questions::ids;

    #[test]
    fn summary_lists_answers_in_question_order_with_labels() {
        let questions = QuestionCatalog::bundled().expect("bundled questions");
        let catalog = ReferenceCatalog::bundled().expect("bundled vendors");
        let mut answers = AnswerState::new();
        answers.toggle_multi_choice(ids::PRIMARY_USE_CASE, "ad_hoc_hunting");
        answers.toggle_multi_choice(ids::PRIMARY_USE_CASE, "detection_rules");
        answers.set_single_choice(ids::TEAM_SIZE, "lean");
        answers.set_range(ids::DAILY_VOLUME, 250.0);
        let evaluation = AdvisorEngine::default().evaluate(&catalog, &answers);

        let view = RecommendationReport::new(&questions, &answers, &evaluation).summary(
            &EngineConfig::default(),
            3,
            NaiveDate::from_ymd_opt(2026, 10, 19).expect("valid date"),
        );

        let titles: Vec<&str> = view
            .requirements
            .iter()
            .map(|line| line.question_id.as_str())
            .collect();
        assert_eq!(
            titles,
            vec![ids::DAILY_VOLUME, ids::TEAM_SIZE, ids::PRIMARY_USE_CASE]
        );
        assert_eq!(view.requirements[0].answer, "250 GB/day");
        assert_eq!(view.requirements[1].answer, "Lean (1-2 engineers)");
        assert_eq!(
            view.requirements[2].answer,
            "Ad-hoc threat hunting, Detection rules"
        );
        assert_eq!(
            view.missing_required,
            vec![ids::ISOLATION_PATTERN.to_string(), ids::BUDGET.to_string()]
        );
        assert!(view.candidates.len() <= 3);
        assert_eq!(view.candidates[0].rank, 1);
        assert_eq!(view.remaining, evaluation.remaining());
        assert_eq!(view.total, catalog.len());
        assert_eq!(view.stage_counts.len(), 4);
        for candidate in &view.candidates {
            let projection = candidate.tco.as_ref().expect("shortlist carries a projection");
            assert_eq!(projection.candidate_id, candidate.id);
            assert_eq!(projection.annual_costs.len(), 5);
            assert!(projection
                .assumptions
                .iter()
                .any(|line| line.starts_with("Team size: lean")));
        }
    }
}
