use serde::{Deserialize, Serialize};

use super::super::answers::AnswerState;
use super::super::engine::EngineConfig;
use super::super::questions::{ids, QuestionCatalog};
use super::views::{ArchitectureSummary, Tradeoff, TradeoffKind};

/// How security data is separated from other tenants of the platform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IsolationPattern {
    IsolatedDedicated,
    SharedCorporate,
    MultiTenantMssp,
}

impl IsolationPattern {
    pub fn from_option_id(option_id: &str) -> Option<Self> {
        match option_id {
            "isolated_dedicated" => Some(Self::IsolatedDedicated),
            "shared_corporate" => Some(Self::SharedCorporate),
            "multi_tenant_mssp" => Some(Self::MultiTenantMssp),
            _ => None,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::IsolatedDedicated => "Isolated Dedicated (0% RLS overhead)",
            Self::SharedCorporate => "Shared Corporate (15-50% RLS overhead)",
            Self::MultiTenantMssp => "Multi-tenant MSSP (5-30% RLS overhead)",
        }
    }

    pub const fn is_shared(self) -> bool {
        matches!(self, Self::SharedCorporate | Self::MultiTenantMssp)
    }

    pub fn tradeoffs(self) -> Vec<Tradeoff> {
        use TradeoffKind::{Benefit, Risk};

        let notes: [(TradeoffKind, &str, &str); 3] = match self {
            Self::IsolatedDedicated => [
                (
                    Benefit,
                    "Simplicity",
                    "Table-level RBAC is simpler to manage than row-level security policies",
                ),
                (
                    Benefit,
                    "Performance",
                    "15-50% faster queries without RLS overhead",
                ),
                (
                    Risk,
                    "Governance",
                    "Co-locating security data with corporate data later means migrating to Unity Catalog",
                ),
            ],
            Self::SharedCorporate => [
                (
                    Benefit,
                    "Governance",
                    "Strong fine-grained access control for compliance",
                ),
                (
                    Risk,
                    "Performance",
                    "15-50% query overhead from RLS and column masking",
                ),
                (
                    Risk,
                    "Cost",
                    "Unity Catalog licensing ($10K-50K/year) plus additional compute",
                ),
            ],
            Self::MultiTenantMssp => [
                (
                    Benefit,
                    "Tenant isolation",
                    "Row-level security keeps customer data separated",
                ),
                (
                    Benefit,
                    "Compliance",
                    "Meets multi-tenant MSSP regulatory requirements",
                ),
                (
                    Risk,
                    "Cost",
                    "High TCO, but essential for the business model",
                ),
            ],
        };

        notes
            .into_iter()
            .map(|(kind, topic, detail)| Tradeoff {
                kind,
                topic: topic.to_string(),
                detail: detail.to_string(),
            })
            .collect()
    }
}

pub fn recommend_architecture(
    answers: &AnswerState,
    questions: &QuestionCatalog,
    config: &EngineConfig,
) -> ArchitectureSummary {
    let isolation_option = answers.choice(ids::ISOLATION_PATTERN);
    let isolation = isolation_option.and_then(IsolationPattern::from_option_id);
    // Cost and performance notes only make sense once the budget is known.
    let costed_option = isolation_option
        .filter(|_| answers.numeric(ids::BUDGET).is_some())
        .and_then(|option_id| {
            questions
                .get(ids::ISOLATION_PATTERN)
                .and_then(|question| question.option(option_id))
        });

    ArchitectureSummary {
        isolation_pattern: isolation.map(|pattern| pattern.label().to_string()),
        catalog: catalog_recommendation(answers, questions, isolation, config),
        table_format: table_format_recommendation(answers, isolation),
        query_engine: query_engine_recommendation(answers),
        performance: costed_option.and_then(|option| {
            option
                .performance_gain
                .clone()
                .or_else(|| option.performance_overhead.clone())
        }),
        tco: costed_option.and_then(|option| option.tco.clone()),
        production_examples: costed_option
            .map(|option| option.production_examples.clone())
            .unwrap_or_default(),
        tradeoffs: isolation
            .map(IsolationPattern::tradeoffs)
            .unwrap_or_default(),
    }
}

fn catalog_recommendation(
    answers: &AnswerState,
    questions: &QuestionCatalog,
    isolation: Option<IsolationPattern>,
    config: &EngineConfig,
) -> Option<String> {
    if let Some(choice) = answers.choice(ids::CATALOG) {
        if choice != "undecided" {
            let label = questions.option_label(ids::CATALOG, choice).unwrap_or(choice);
            return Some(label.to_string());
        }
    }

    let budget = answers.numeric(ids::BUDGET)?;
    let recommendation = match isolation? {
        IsolationPattern::IsolatedDedicated if budget < config.low_budget_ceiling_k => {
            "Polaris or Nessie (OSS, $0)"
        }
        IsolationPattern::IsolatedDedicated => {
            "Polaris (vendor-neutral) or Nessie (Git workflows)"
        }
        IsolationPattern::SharedCorporate | IsolationPattern::MultiTenantMssp => {
            "Unity Catalog (REQUIRED for RLS)"
        }
    };
    Some(recommendation.to_string())
}

fn derived_table_format(isolation: Option<IsolationPattern>) -> &'static str {
    match isolation {
        Some(IsolationPattern::IsolatedDedicated) => "Iceberg (recommended)",
        _ => "Delta Lake or Iceberg",
    }
}

fn table_format_recommendation(
    answers: &AnswerState,
    isolation: Option<IsolationPattern>,
) -> Option<String> {
    let recommendation = match answers.choice(ids::TABLE_FORMAT) {
        Some("iceberg") => "Apache Iceberg",
        Some("delta_lake") => "Delta Lake",
        Some("hudi") => "Apache Hudi",
        Some(_) => derived_table_format(isolation),
        None => derived_table_format(Some(isolation?)),
    };
    Some(recommendation.to_string())
}

fn query_engine_recommendation(answers: &AnswerState) -> Option<String> {
    let use_cases = answers.selections(ids::PRIMARY_USE_CASE);
    if use_cases.is_empty() {
        return None;
    }

    let engines: Vec<&str> = [
        ("real_time_dashboards", "ClickHouse"),
        ("ad_hoc_hunting", "DuckDB"),
        ("compliance_reporting", "Athena"),
        ("detection_rules", "Kafka + Flink"),
    ]
    .into_iter()
    .filter(|(use_case, _)| use_cases.iter().any(|selected| selected == use_case))
    .map(|(_, engine)| engine)
    .collect();

    if engines.is_empty() {
        Some("Trino (flexible)".to_string())
    } else {
        Some(engines.join(" + "))
    }
}
