use super::super::answers::AnswerState;
use super::super::catalog::ReferenceCatalog;
use super::super::domain::{CandidateRecord, CloudProvider, DeploymentModel, OperationalComplexity};
use super::super::questions::ids;
use super::config::EngineConfig;
use super::{Elimination, ScoreComponent, ScoredCandidate, Stage};

/// One step of the pipeline, keyed by the question whose answer drives it.
pub(crate) struct Rule {
    pub question_id: &'static str,
    pub stage: Stage,
    pub apply: fn(&mut Pass, &AnswerState, &EngineConfig),
}

/// Pipeline order. Filters in later stages only ever see survivors of earlier ones.
pub(crate) const RULES: [Rule; 14] = [
    Rule {
        question_id: ids::DAILY_VOLUME,
        stage: Stage::ScaleElimination,
        apply: daily_volume,
    },
    Rule {
        question_id: ids::GROWTH_RATE,
        stage: Stage::ScaleElimination,
        apply: growth_rate,
    },
    Rule {
        question_id: ids::SOURCE_COUNT,
        stage: Stage::ScaleElimination,
        apply: source_count,
    },
    Rule {
        question_id: ids::RETENTION_DAYS,
        stage: Stage::ScaleElimination,
        apply: retention_days,
    },
    Rule {
        question_id: ids::ISOLATION_PATTERN,
        stage: Stage::ArchitecturalConstraints,
        apply: isolation_pattern,
    },
    Rule {
        question_id: ids::TABLE_FORMAT,
        stage: Stage::ArchitecturalConstraints,
        apply: table_format,
    },
    Rule {
        question_id: ids::CATALOG,
        stage: Stage::ArchitecturalConstraints,
        apply: catalog,
    },
    Rule {
        question_id: ids::TRANSFORMATION,
        stage: Stage::ArchitecturalConstraints,
        apply: transformation,
    },
    Rule {
        question_id: ids::QUERY_ENGINE_CHARACTERISTICS,
        stage: Stage::ArchitecturalConstraints,
        apply: query_engine_characteristics,
    },
    Rule {
        question_id: ids::TEAM_SIZE,
        stage: Stage::OrganizationalConstraints,
        apply: team_size,
    },
    Rule {
        question_id: ids::BUDGET,
        stage: Stage::OrganizationalConstraints,
        apply: budget,
    },
    Rule {
        question_id: ids::CLOUD_ENVIRONMENT,
        stage: Stage::OrganizationalConstraints,
        apply: cloud_environment,
    },
    Rule {
        question_id: ids::VENDOR_TOLERANCE,
        stage: Stage::OrganizationalConstraints,
        apply: vendor_tolerance,
    },
    Rule {
        question_id: ids::PRIMARY_USE_CASE,
        stage: Stage::UseCaseScoring,
        apply: primary_use_case,
    },
];

/// Working set for one evaluation. Rules can only drop survivors or add points to them.
pub(crate) struct Pass {
    survivors: Vec<ScoredCandidate>,
    eliminations: Vec<Elimination>,
}

impl Pass {
    pub fn new(catalog: &ReferenceCatalog) -> Self {
        Self {
            survivors: catalog
                .candidates()
                .iter()
                .cloned()
                .map(ScoredCandidate::new)
                .collect(),
            eliminations: Vec::new(),
        }
    }

    pub fn remaining(&self) -> usize {
        self.survivors.len()
    }

    pub fn retain<F>(&mut self, question_id: &'static str, reason: &str, keep: F)
    where
        F: Fn(&CandidateRecord) -> bool,
    {
        let eliminations = &mut self.eliminations;
        self.survivors.retain(|scored| {
            if keep(&scored.candidate) {
                return true;
            }
            eliminations.push(Elimination {
                candidate_id: scored.candidate.id.clone(),
                question_id: question_id.to_string(),
                reason: reason.to_string(),
            });
            false
        });
    }

    pub fn award<F>(&mut self, question_id: &'static str, points: i32, notes: &str, matches: F)
    where
        F: Fn(&CandidateRecord) -> bool,
    {
        for scored in self
            .survivors
            .iter_mut()
            .filter(|scored| matches(&scored.candidate))
        {
            scored.score += points;
            scored.components.push(ScoreComponent {
                question_id: question_id.to_string(),
                points,
                notes: notes.to_string(),
            });
        }
    }

    pub fn finish(self) -> (Vec<ScoredCandidate>, Vec<Elimination>) {
        (self.survivors, self.eliminations)
    }
}

fn daily_volume(pass: &mut Pass, answers: &AnswerState, config: &EngineConfig) {
    let Some(volume) = answers.numeric(ids::DAILY_VOLUME) else {
        return;
    };

    if volume < config.low_volume_gb_per_day {
        pass.retain(
            ids::DAILY_VOLUME,
            &format!(
                "enterprise pricing tier not justified below {} GB/day",
                config.low_volume_gb_per_day
            ),
            |candidate| !candidate.capabilities.high_cost_tier,
        );
    }
    if volume >= config.mid_volume_gb_per_day {
        pass.retain(
            ids::DAILY_VOLUME,
            &format!("single-node engine cannot absorb {volume} GB/day"),
            |candidate| !candidate.capabilities.single_node_only,
        );
    }
    if volume > config.high_volume_gb_per_day {
        pass.retain(
            ids::DAILY_VOLUME,
            &format!("{volume} GB/day needs cloud or hybrid deployment"),
            |candidate| {
                candidate.capabilities.supports_deployment(DeploymentModel::Cloud)
                    || candidate.capabilities.supports_deployment(DeploymentModel::Hybrid)
            },
        );
    }
}

fn growth_rate(pass: &mut Pass, answers: &AnswerState, config: &EngineConfig) {
    if let Some(growth) = answers.numeric(ids::GROWTH_RATE) {
        if growth >= config.growth_rate_threshold_pct {
            pass.award(
                ids::GROWTH_RATE,
                config.scale_bonus,
                "elastic scaling for fast growth",
                |candidate| candidate.capabilities.elastic_scaling,
            );
        }
    }
}

fn source_count(pass: &mut Pass, answers: &AnswerState, config: &EngineConfig) {
    if let Some(sources) = answers.numeric(ids::SOURCE_COUNT) {
        if sources >= config.source_count_threshold {
            pass.award(
                ids::SOURCE_COUNT,
                config.scale_bonus,
                "prebuilt connectors for many sources",
                |candidate| candidate.capabilities.etl_connectors,
            );
        }
    }
}

fn retention_days(pass: &mut Pass, answers: &AnswerState, config: &EngineConfig) {
    if let Some(days) = answers.numeric(ids::RETENTION_DAYS) {
        if days >= config.retention_threshold_days {
            pass.award(
                ids::RETENTION_DAYS,
                config.scale_bonus,
                "time travel for long retention",
                |candidate| candidate.capabilities.time_travel,
            );
        }
    }
}

fn isolation_pattern(pass: &mut Pass, answers: &AnswerState, _config: &EngineConfig) {
    match answers.choice(ids::ISOLATION_PATTERN) {
        Some("shared_corporate") | Some("multi_tenant_mssp") => pass.retain(
            ids::ISOLATION_PATTERN,
            "shared platform needs a catalog with row-level security",
            |candidate| candidate.capabilities.rls_catalog_support,
        ),
        Some("isolated_dedicated") => pass.retain(
            ids::ISOLATION_PATTERN,
            "dedicated platform expects the Iceberg ecosystem",
            |candidate| candidate.capabilities.iceberg_ecosystem(),
        ),
        _ => {}
    }
}

fn table_format(pass: &mut Pass, answers: &AnswerState, _config: &EngineConfig) {
    let question = ids::TABLE_FORMAT;
    match answers.choice(question) {
        Some("iceberg") => pass.retain(question, "no Iceberg table support", |candidate| {
            candidate.capabilities.iceberg_support
        }),
        Some("delta_lake") => pass.retain(question, "no Delta Lake table support", |candidate| {
            candidate.capabilities.delta_lake_support
        }),
        Some("hudi") => pass.retain(question, "no Hudi table support", |candidate| {
            candidate.capabilities.hudi_support
        }),
        _ => {}
    }
}

fn catalog(pass: &mut Pass, answers: &AnswerState, _config: &EngineConfig) {
    let question = ids::CATALOG;
    match answers.choice(question) {
        Some("polaris") => pass.retain(question, "does not integrate with Polaris", |candidate| {
            candidate.capabilities.polaris_catalog_support
        }),
        Some("unity_catalog") => pass.retain(
            question,
            "does not integrate with Unity Catalog",
            |candidate| candidate.capabilities.unity_catalog_support,
        ),
        Some("nessie") => pass.retain(question, "does not integrate with Nessie", |candidate| {
            candidate.capabilities.nessie_catalog_support
        }),
        Some("glue") => pass.retain(question, "does not integrate with Glue", |candidate| {
            candidate.capabilities.glue_catalog_support
        }),
        Some("hive_metastore") => pass.retain(
            question,
            "does not integrate with Hive Metastore",
            |candidate| candidate.capabilities.hive_metastore_support,
        ),
        _ => {}
    }
}

fn transformation(pass: &mut Pass, answers: &AnswerState, _config: &EngineConfig) {
    match answers.choice(ids::TRANSFORMATION) {
        Some("dbt") => pass.retain(ids::TRANSFORMATION, "no dbt adapter", |candidate| {
            candidate.capabilities.dbt_integration
        }),
        Some("spark") => pass.retain(
            ids::TRANSFORMATION,
            "no Spark transformation support",
            |candidate| candidate.capabilities.spark_transformation_support,
        ),
        _ => {}
    }
}

fn query_engine_characteristics(pass: &mut Pass, answers: &AnswerState, config: &EngineConfig) {
    let question = ids::QUERY_ENGINE_CHARACTERISTICS;
    for characteristic in answers.selections(question) {
        match characteristic.as_str() {
            "low_latency" => pass.award(
                question,
                config.low_latency_weight,
                "low query latency",
                |candidate| {
                    candidate
                        .capabilities
                        .latency_below(config.low_latency_threshold_ms)
                },
            ),
            "high_concurrency" => pass.award(
                question,
                config.high_concurrency_weight,
                "high query concurrency",
                |candidate| {
                    candidate
                        .capabilities
                        .query_concurrency
                        .map(|concurrency| concurrency >= config.high_concurrency_threshold)
                        .unwrap_or(false)
                },
            ),
            "serverless" => pass.award(
                question,
                config.serverless_weight,
                "serverless or managed operation",
                |candidate| {
                    candidate.capabilities.serverless
                        || candidate.capabilities.managed_service_available
                },
            ),
            "cost_optimized" => pass.award(
                question,
                config.cost_optimized_weight,
                "open source cost profile",
                CandidateRecord::is_open_source,
            ),
            _ => {}
        }
    }
}

fn team_size(pass: &mut Pass, answers: &AnswerState, _config: &EngineConfig) {
    if answers.choice(ids::TEAM_SIZE) == Some("lean") {
        pass.retain(
            ids::TEAM_SIZE,
            "too much operational load for a lean team",
            |candidate| {
                candidate.capabilities.operational_complexity == OperationalComplexity::Low
                    || candidate.capabilities.managed_service_available
            },
        );
    }
}

fn budget(pass: &mut Pass, answers: &AnswerState, config: &EngineConfig) {
    let Some(ceiling) = answers.numeric(ids::BUDGET) else {
        return;
    };
    let low_budget = ceiling < config.low_budget_ceiling_k;

    if low_budget {
        pass.retain(
            ids::BUDGET,
            &format!("enterprise pricing tier exceeds ${ceiling}K/year budget"),
            |candidate| !candidate.capabilities.high_cost_tier,
        );
    }

    // Cost-range markers only stand in for a missing floor.
    pass.retain(
        ids::BUDGET,
        &format!("typical spend exceeds ${ceiling}K/year budget"),
        |candidate| match candidate.annual_cost_floor_k {
            Some(floor) => f64::from(floor) <= ceiling,
            None => {
                !low_budget
                    || !config
                        .high_cost_markers
                        .iter()
                        .any(|marker| candidate.cost_range_mentions(marker))
            }
        },
    );
}

fn cloud_environment(pass: &mut Pass, answers: &AnswerState, config: &EngineConfig) {
    let question = ids::CLOUD_ENVIRONMENT;
    let selected = answers.selections(question);

    if selected.iter().any(|option| option == "on_prem") {
        pass.retain(question, "no on-premises deployment", |candidate| {
            candidate.capabilities.supports_deployment(DeploymentModel::OnPrem)
                || candidate.capabilities.supports_deployment(DeploymentModel::Hybrid)
        });
    }

    let providers: Vec<CloudProvider> = selected
        .iter()
        .filter_map(|option| CloudProvider::from_option_id(option))
        .collect();
    match providers.as_slice() {
        [] => {}
        [provider] => pass.award(
            question,
            config.single_cloud_weight,
            &format!("runs on {}", provider.label()),
            |candidate| candidate.capabilities.cloud_providers.contains(provider),
        ),
        _ => pass.award(
            question,
            config.multi_cloud_weight,
            "multi-cloud deployment",
            |candidate| candidate.capabilities.multi_cloud,
        ),
    }
}

fn vendor_tolerance(pass: &mut Pass, answers: &AnswerState, _config: &EngineConfig) {
    match answers.choice(ids::VENDOR_TOLERANCE) {
        Some("oss_first") => pass.retain(
            ids::VENDOR_TOLERANCE,
            "not open source or OSS-based",
            CandidateRecord::signals_open_source,
        ),
        Some("commercial_only") => pass.retain(
            ids::VENDOR_TOLERANCE,
            "no commercial vendor behind it",
            |candidate| !candidate.is_open_source(),
        ),
        _ => {}
    }
}

fn primary_use_case(pass: &mut Pass, answers: &AnswerState, config: &EngineConfig) {
    let question = ids::PRIMARY_USE_CASE;
    let weight = config.use_case_weight;
    for use_case in answers.selections(question) {
        match use_case.as_str() {
            "real_time_dashboards" => {
                pass.award(question, weight, "fast enough for live dashboards", |candidate| {
                    candidate
                        .capabilities
                        .latency_below(config.low_latency_threshold_ms)
                })
            }
            "ad_hoc_hunting" => pass.award(question, weight, "ad-hoc hunting queries", |candidate| {
                candidate.capabilities.ad_hoc_query
            }),
            "compliance_reporting" => {
                pass.award(question, weight, "serverless scheduled reporting", |candidate| {
                    candidate.capabilities.serverless
                })
            }
            "detection_rules" => pass.award(question, weight, "streaming detections", |candidate| {
                candidate.capabilities.streaming_query
            }),
            _ => {}
        }
    }
}
