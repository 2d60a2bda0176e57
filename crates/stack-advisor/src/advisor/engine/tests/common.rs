use crate::advisor::answers::AnswerState;
use crate::advisor::catalog::ReferenceCatalog;
use crate::advisor::domain::{
    CandidateId, CandidateRecord, Capabilities, CloudProvider, DeploymentModel,
    OperationalComplexity, TeamSize, VendorType,
};
use crate::advisor::engine::{AdvisorEngine, EngineConfig, Evaluation};

pub(super) fn capabilities() -> Capabilities {
    Capabilities {
        iceberg_support: false,
        delta_lake_support: false,
        hudi_support: false,
        polaris_catalog_support: false,
        nessie_catalog_support: false,
        unity_catalog_support: false,
        glue_catalog_support: false,
        hive_metastore_support: false,
        rls_catalog_support: false,
        dbt_integration: false,
        spark_transformation_support: false,
        operational_complexity: OperationalComplexity::Low,
        team_size_required: TeamSize::Lean,
        managed_service_available: false,
        serverless: false,
        deployment_models: vec![DeploymentModel::Cloud],
        cloud_native: false,
        multi_cloud: false,
        cloud_providers: Vec::new(),
        query_latency_p95: None,
        query_concurrency: None,
        single_node_only: false,
        elastic_scaling: false,
        etl_connectors: false,
        time_travel: false,
        streaming_query: false,
        ad_hoc_query: false,
        high_cost_tier: false,
    }
}

/// Open-source, low-complexity, cloud-only candidate with every optional flag off.
pub(super) fn candidate(id: &str) -> CandidateRecord {
    CandidateRecord {
        id: CandidateId(id.to_string()),
        name: id.to_uppercase(),
        category: "Query Engine".to_string(),
        description: format!("{id} fixture"),
        vendor_type: VendorType::OpenSource,
        website: None,
        typical_annual_cost_range: "$0 (infrastructure only)".to_string(),
        cost_notes: String::new(),
        annual_cost_floor_k: None,
        cost_model: None,
        capabilities: capabilities(),
    }
}

pub(super) fn with_caps(id: &str, adjust: impl FnOnce(&mut Capabilities)) -> CandidateRecord {
    let mut record = candidate(id);
    adjust(&mut record.capabilities);
    record
}

pub(super) fn commercial(id: &str, cost_range: &str) -> CandidateRecord {
    let mut record = candidate(id);
    record.vendor_type = VendorType::Commercial;
    record.typical_annual_cost_range = cost_range.to_string();
    record
}

pub(super) fn catalog(records: Vec<CandidateRecord>) -> ReferenceCatalog {
    ReferenceCatalog::new(records).expect("fixture catalog is valid")
}

/// A: open source, low complexity, Iceberg. B: commercial seven-figure. C: open source, no Iceberg.
pub(super) fn abc_catalog() -> ReferenceCatalog {
    catalog(vec![
        with_caps("a", |caps| caps.iceberg_support = true),
        commercial("b", "$1M+"),
        candidate("c"),
    ])
}

pub(super) fn cloud_candidate(id: &str, providers: &[CloudProvider], multi: bool) -> CandidateRecord {
    with_caps(id, |caps| {
        caps.cloud_providers = providers.to_vec();
        caps.multi_cloud = multi;
    })
}

pub(super) fn engine() -> AdvisorEngine {
    AdvisorEngine::new(EngineConfig::default())
}

pub(super) fn run(catalog: &ReferenceCatalog, answers: &AnswerState) -> Evaluation {
    engine().evaluate(catalog, answers)
}

pub(super) fn ranked_ids(evaluation: &Evaluation) -> Vec<&str> {
    evaluation
        .ranked
        .iter()
        .map(|entry| entry.candidate.id.as_str())
        .collect()
}

pub(super) fn score_of(evaluation: &Evaluation, id: &str) -> i32 {
    evaluation
        .ranked
        .iter()
        .find(|entry| entry.candidate.id.as_str() == id)
        .map(|entry| entry.score)
        .unwrap_or_else(|| panic!("{id} was not ranked"))
}
