use serde::{Deserialize, Serialize};

/// Thresholds and weights used by the filter and scoring rules.
///
/// Every field has a default, so a partial JSON document only overrides what it names.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Below this daily volume (GB/day) enterprise pricing tiers are eliminated.
    pub low_volume_gb_per_day: f64,
    /// At or above this daily volume single-node engines are eliminated.
    pub mid_volume_gb_per_day: f64,
    /// Above this daily volume candidates need cloud or hybrid deployment.
    pub high_volume_gb_per_day: f64,

    pub growth_rate_threshold_pct: f64,
    pub source_count_threshold: f64,
    pub retention_threshold_days: f64,
    pub scale_bonus: i32,

    pub low_latency_threshold_ms: f64,
    pub high_concurrency_threshold: u32,
    pub low_latency_weight: i32,
    pub high_concurrency_weight: i32,
    pub serverless_weight: i32,
    pub cost_optimized_weight: i32,

    /// Budget ceilings ($K/year) below this apply the cost-range marker check.
    pub low_budget_ceiling_k: f64,
    /// Case-insensitive substrings of a cost range that signal seven-figure pricing.
    pub high_cost_markers: Vec<String>,

    pub multi_cloud_weight: i32,
    pub single_cloud_weight: i32,
    pub use_case_weight: i32,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            low_volume_gb_per_day: 100.0,
            mid_volume_gb_per_day: 1_000.0,
            high_volume_gb_per_day: 10_000.0,
            growth_rate_threshold_pct: 50.0,
            source_count_threshold: 20.0,
            retention_threshold_days: 365.0,
            scale_bonus: 2,
            low_latency_threshold_ms: 1_000.0,
            high_concurrency_threshold: 50,
            low_latency_weight: 3,
            high_concurrency_weight: 2,
            serverless_weight: 2,
            cost_optimized_weight: 1,
            low_budget_ceiling_k: 500.0,
            high_cost_markers: vec!["$1m".to_string(), "$2m".to_string()],
            multi_cloud_weight: 3,
            single_cloud_weight: 1,
            use_case_weight: 3,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_documents_keep_remaining_defaults() {
        let config: EngineConfig =
            serde_json::from_str(r#"{ "low_budget_ceiling_k": 250, "use_case_weight": 5 }"#)
                .expect("config parses");

        assert_eq!(config.low_budget_ceiling_k, 250.0);
        assert_eq!(config.use_case_weight, 5);
        assert_eq!(config.mid_volume_gb_per_day, 1_000.0);
        assert_eq!(config.high_cost_markers, vec!["$1m", "$2m"]);
    }
}
