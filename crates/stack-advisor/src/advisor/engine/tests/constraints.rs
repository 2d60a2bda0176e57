use super::common::*;
use crate::advisor::answers::AnswerState;
use crate::advisor::domain::{CloudProvider, DeploymentModel, OperationalComplexity};
use crate::advisor::questions::ids;

#[test]
fn lean_teams_keep_low_complexity_or_managed_candidates() {
    let catalog = catalog(vec![
        candidate("simple"),
        with_caps("hosted", |caps| {
            caps.operational_complexity = OperationalComplexity::High;
            caps.managed_service_available = true;
        }),
        with_caps("diy", |caps| {
            caps.operational_complexity = OperationalComplexity::Medium
        }),
    ]);
    let mut answers = AnswerState::new();

    answers.set_single_choice(ids::TEAM_SIZE, "lean");
    assert_eq!(ranked_ids(&run(&catalog, &answers)), vec!["simple", "hosted"]);

    answers.set_single_choice(ids::TEAM_SIZE, "large");
    assert_eq!(run(&catalog, &answers).remaining(), 3);
}

#[test]
fn structured_cost_floor_beats_cost_range_text() {
    let mut floored = commercial("floored", "$100K-$300K");
    floored.annual_cost_floor_k = Some(600);
    let mut cheap_but_marked = commercial("marked", "$50K-$1M");
    cheap_but_marked.annual_cost_floor_k = Some(50);
    let catalog = catalog(vec![floored, cheap_but_marked]);

    let mut answers = AnswerState::new();
    answers.set_range(ids::BUDGET, 400.0);

    let evaluation = run(&catalog, &answers);

    assert_eq!(ranked_ids(&evaluation), vec!["marked"]);
    let reasons: Vec<_> = evaluation.eliminated_by(ids::BUDGET).collect();
    assert_eq!(reasons[0].candidate_id.as_str(), "floored");
}

#[test]
fn low_budget_drops_enterprise_tier_even_with_affordable_floor() {
    let mut tiered = commercial("tiered", "$300K-$1M+");
    tiered.annual_cost_floor_k = Some(300);
    tiered.capabilities.high_cost_tier = true;
    let mut modest = commercial("modest", "$50K-$200K");
    modest.annual_cost_floor_k = Some(50);
    let catalog = catalog(vec![tiered, modest]);
    let mut answers = AnswerState::new();

    answers.set_range(ids::BUDGET, 400.0);
    let evaluation = run(&catalog, &answers);
    assert_eq!(ranked_ids(&evaluation), vec!["modest"]);
    match evaluation.eliminated_by(ids::BUDGET).next() {
        Some(elimination) => {
            assert_eq!(elimination.candidate_id.as_str(), "tiered");
            assert!(elimination.reason.contains("enterprise pricing tier"));
        }
        other => panic!("expected a budget elimination, got {other:?}"),
    }

    answers.set_range(ids::BUDGET, 500.0);
    assert_eq!(ranked_ids(&run(&catalog, &answers)), vec!["tiered", "modest"]);
}

#[test]
fn low_budget_without_floor_uses_cost_markers_case_insensitively() {
    let catalog = catalog(vec![
        commercial("upper", "$1M-$3M"),
        commercial("lower", "$2m+"),
        with_caps("tier", |caps| caps.high_cost_tier = true),
        commercial("modest", "$100K-$400K"),
    ]);
    let mut answers = AnswerState::new();

    answers.set_range(ids::BUDGET, 250.0);
    assert_eq!(ranked_ids(&run(&catalog, &answers)), vec!["modest"]);

    answers.set_range(ids::BUDGET, 500.0);
    assert_eq!(run(&catalog, &answers).remaining(), 4);
}

#[test]
fn on_prem_environment_keeps_on_prem_or_hybrid_candidates() {
    let catalog = catalog(vec![
        with_caps("rack", |caps| caps.deployment_models = vec![DeploymentModel::OnPrem]),
        with_caps("bridge", |caps| caps.deployment_models = vec![DeploymentModel::Hybrid]),
        candidate("saas"),
    ]);
    let mut answers = AnswerState::new();
    answers.toggle_multi_choice(ids::CLOUD_ENVIRONMENT, "on_prem");

    let evaluation = run(&catalog, &answers);

    assert_eq!(ranked_ids(&evaluation), vec!["rack", "bridge"]);
}

#[test]
fn cloud_selection_scores_provider_fit() {
    let catalog = catalog(vec![
        cloud_candidate("aws-only", &[CloudProvider::Aws], false),
        cloud_candidate("gcp-only", &[CloudProvider::Gcp], false),
        cloud_candidate(
            "everywhere",
            &[CloudProvider::Aws, CloudProvider::Azure, CloudProvider::Gcp],
            true,
        ),
    ]);
    let mut answers = AnswerState::new();

    answers.toggle_multi_choice(ids::CLOUD_ENVIRONMENT, "gcp");
    let single = run(&catalog, &answers);
    assert_eq!(score_of(&single, "gcp-only"), 1);
    assert_eq!(score_of(&single, "everywhere"), 1);
    assert_eq!(score_of(&single, "aws-only"), 0);
    assert_eq!(ranked_ids(&single), vec!["gcp-only", "everywhere", "aws-only"]);

    answers.toggle_multi_choice(ids::CLOUD_ENVIRONMENT, "aws");
    let multi = run(&catalog, &answers);
    assert_eq!(score_of(&multi, "everywhere"), 3);
    assert_eq!(score_of(&multi, "gcp-only"), 0);
    assert_eq!(ranked_ids(&multi)[0], "everywhere");
}

#[test]
fn vendor_tolerance_filters_on_licensing() {
    let mut oss_based = commercial("oss-based", "$100K-$200K");
    oss_based.cost_notes = "Commercial distribution of an Open Source engine".to_string();
    let catalog = catalog(vec![
        candidate("community"),
        oss_based,
        commercial("proprietary", "$100K-$200K"),
    ]);
    let mut answers = AnswerState::new();

    answers.set_single_choice(ids::VENDOR_TOLERANCE, "oss_first");
    assert_eq!(
        ranked_ids(&run(&catalog, &answers)),
        vec!["community", "oss-based"]
    );

    answers.set_single_choice(ids::VENDOR_TOLERANCE, "commercial_only");
    assert_eq!(
        ranked_ids(&run(&catalog, &answers)),
        vec!["oss-based", "proprietary"]
    );

    answers.set_single_choice(ids::VENDOR_TOLERANCE, "flexible");
    assert_eq!(run(&catalog, &answers).remaining(), 3);
}
