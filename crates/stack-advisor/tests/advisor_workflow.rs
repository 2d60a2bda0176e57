//! End-to-end flows through the public API using the bundled vendor and question datasets.

use std::io::Cursor;

use chrono::NaiveDate;
use stack_advisor::advisor::{
    ids, AdvisorEngine, AnswerSheet, AnswerState, DeploymentModel, EngineConfig,
    OperationalComplexity, QuestionCatalog, RecommendationReport, ReferenceCatalog,
};

fn datasets() -> (ReferenceCatalog, QuestionCatalog) {
    (
        ReferenceCatalog::bundled().expect("bundled vendors load"),
        QuestionCatalog::bundled().expect("bundled questions load"),
    )
}

fn ranked_ids(answers: &AnswerState) -> Vec<String> {
    let (catalog, _) = datasets();
    AdvisorEngine::default()
        .evaluate(&catalog, answers)
        .ranked
        .iter()
        .map(|entry| entry.candidate.id.to_string())
        .collect()
}

#[test]
fn mssp_on_tight_budget_ranks_serverless_rls_platforms() {
    let (catalog, questions) = datasets();
    let sheet = AnswerSheet::from_reader(Cursor::new(
        r#"{
            "f0_isolation_pattern": "multi_tenant_mssp",
            "q2_budget": 400,
            "q3_cloud_environment": ["aws"],
            "q5_primary_use_case": ["compliance_reporting"]
        }"#,
    ))
    .expect("answer sheet parses");
    let answers = sheet.apply(&questions).expect("answers validate");

    let evaluation = AdvisorEngine::default().evaluate(&catalog, &answers);

    let ranked: Vec<&str> = evaluation
        .ranked
        .iter()
        .map(|entry| entry.candidate.id.as_str())
        .collect();
    assert_eq!(
        ranked,
        vec!["starburst", "amazon-athena", "google-bigquery", "dremio"]
    );
    assert_eq!(evaluation.count_after(ids::ISOLATION_PATTERN), Some(6));
    assert_eq!(evaluation.count_after(ids::BUDGET), Some(4));
    let over_budget: Vec<&str> = evaluation
        .eliminated_by(ids::BUDGET)
        .map(|elimination| elimination.candidate_id.as_str())
        .collect();
    assert_eq!(over_budget, vec!["databricks", "snowflake"]);
}

#[test]
fn bundled_enterprise_tier_vendors_never_fit_a_small_budget() {
    let (catalog, _) = datasets();
    let mut answers = AnswerState::new();
    answers.set_range(ids::BUDGET, 400.0);

    let evaluation = AdvisorEngine::default().evaluate(&catalog, &answers);

    for entry in &evaluation.ranked {
        assert!(
            !entry.candidate.capabilities.high_cost_tier,
            "{} is an enterprise-tier vendor",
            entry.candidate.id
        );
    }
    for id in ["databricks", "snowflake", "splunk"] {
        assert!(
            evaluation
                .eliminated_by(ids::BUDGET)
                .any(|elimination| elimination.candidate_id.as_str() == id),
            "{id} should not survive a $400K budget"
        );
    }
    assert!(evaluation
        .ranked
        .iter()
        .any(|entry| entry.candidate.id.as_str() == "amazon-athena"));
}

#[test]
fn lean_open_source_on_prem_survivors_satisfy_every_filter() {
    let mut answers = AnswerState::new();
    answers.set_single_choice(ids::TEAM_SIZE, "lean");
    answers.set_single_choice(ids::VENDOR_TOLERANCE, "oss_first");
    answers.toggle_multi_choice(ids::CLOUD_ENVIRONMENT, "on_prem");
    let (catalog, _) = datasets();

    let evaluation = AdvisorEngine::default().evaluate(&catalog, &answers);

    assert!(!evaluation.ranked.is_empty());
    for entry in &evaluation.ranked {
        let candidate = &entry.candidate;
        let caps = &candidate.capabilities;
        assert!(
            caps.operational_complexity == OperationalComplexity::Low
                || caps.managed_service_available,
            "{} is too heavy for a lean team",
            candidate.id
        );
        assert!(candidate.signals_open_source(), "{} is not OSS", candidate.id);
        assert!(
            caps.supports_deployment(DeploymentModel::OnPrem)
                || caps.supports_deployment(DeploymentModel::Hybrid),
            "{} cannot run on-premises",
            candidate.id
        );
    }
    assert!(!evaluation
        .ranked
        .iter()
        .any(|entry| entry.candidate.id.as_str() == "splunk"));
}

#[test]
fn repeated_use_case_in_answer_sheet_scores_once() {
    let (catalog, questions) = datasets();
    let sheet = AnswerSheet::from_reader(Cursor::new(
        r#"{ "q5_primary_use_case": ["detection_rules", "detection_rules", "detection_rules"] }"#,
    ))
    .expect("answer sheet parses");
    let answers = sheet.apply(&questions).expect("answers validate");

    let evaluation = AdvisorEngine::default().evaluate(&catalog, &answers);

    let top = evaluation.ranked.first().expect("catalog is not empty");
    assert_eq!(top.score, EngineConfig::default().use_case_weight);
    assert_eq!(top.components.len(), 1);
}

#[test]
fn huge_volume_never_returns_single_node_engines() {
    let mut answers = AnswerState::new();
    answers.set_range(ids::DAILY_VOLUME, 25_000.0);

    let ranked = ranked_ids(&answers);

    assert!(!ranked.contains(&"duckdb".to_string()));
    assert!(ranked.contains(&"clickhouse".to_string()));
}

#[test]
fn incremental_answers_narrow_and_revocation_widens() {
    let (catalog, _) = datasets();
    let engine = AdvisorEngine::new(EngineConfig::default());
    let mut answers = AnswerState::new();
    let mut remaining = vec![engine.evaluate(&catalog, &answers).remaining()];

    answers.set_single_choice(ids::ISOLATION_PATTERN, "shared_corporate");
    remaining.push(engine.evaluate(&catalog, &answers).remaining());
    answers.set_single_choice(ids::TABLE_FORMAT, "delta_lake");
    remaining.push(engine.evaluate(&catalog, &answers).remaining());
    answers.set_single_choice(ids::TEAM_SIZE, "lean");
    remaining.push(engine.evaluate(&catalog, &answers).remaining());

    assert_eq!(remaining[0], catalog.len());
    assert!(remaining.windows(2).all(|pair| pair[1] <= pair[0]));

    answers.clear_answer(ids::TABLE_FORMAT);
    // selecting the active option again deselects it
    answers.set_single_choice(ids::TEAM_SIZE, "lean");
    assert_eq!(engine.evaluate(&catalog, &answers).remaining(), remaining[1]);

    answers.clear();
    assert_eq!(engine.evaluate(&catalog, &answers).remaining(), catalog.len());
}

#[test]
fn complete_questionnaire_produces_report_view() {
    let (catalog, questions) = datasets();
    let sheet = AnswerSheet::from_reader(Cursor::new(
        r#"{
            "s1_daily_volume": 500,
            "f0_isolation_pattern": "isolated_dedicated",
            "q1_team_size": "standard",
            "q2_budget": 250,
            "q5_primary_use_case": ["ad_hoc_hunting", "real_time_dashboards"]
        }"#,
    ))
    .expect("answer sheet parses");
    let answers = sheet.apply(&questions).expect("answers validate");
    assert!(answers.is_complete(&questions.required_ids()));

    let config = EngineConfig::default();
    let evaluation = AdvisorEngine::new(config.clone()).evaluate(&catalog, &answers);
    let view = RecommendationReport::new(&questions, &answers, &evaluation).summary(
        &config,
        5,
        NaiveDate::from_ymd_opt(2026, 10, 19).expect("valid date"),
    );

    assert!(view.missing_required.is_empty());
    assert_eq!(view.requirements.len(), 5);
    assert_eq!(
        view.architecture.catalog.as_deref(),
        Some("Polaris or Nessie (OSS, $0)")
    );
    assert_eq!(
        view.architecture.query_engine.as_deref(),
        Some("ClickHouse + DuckDB")
    );
    assert!(!view.candidates.is_empty() && view.candidates.len() <= 5);
    assert!(view
        .candidates
        .windows(2)
        .all(|pair| pair[0].score >= pair[1].score));

    let json = serde_json::to_value(&view).expect("view serializes");
    assert_eq!(json["total"], catalog.len());
}
