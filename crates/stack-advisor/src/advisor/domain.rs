use serde::{Deserialize, Serialize};

/// Identifier wrapper for catalog candidates.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CandidateId(pub String);

impl CandidateId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for CandidateId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Commercial relationship a candidate implies, used by vendor-tolerance filtering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VendorType {
    OpenSource,
    Commercial,
    Managed,
}

impl VendorType {
    pub const fn label(self) -> &'static str {
        match self {
            Self::OpenSource => "Open Source",
            Self::Commercial => "Commercial",
            Self::Managed => "Managed Service",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DeploymentModel {
    #[serde(rename = "on-prem")]
    OnPrem,
    #[serde(rename = "hybrid")]
    Hybrid,
    #[serde(rename = "cloud")]
    Cloud,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CloudProvider {
    Aws,
    Azure,
    Gcp,
}

impl CloudProvider {
    pub const fn ordered() -> [Self; 3] {
        [Self::Aws, Self::Azure, Self::Gcp]
    }

    /// Maps a cloud-environment option id onto a provider.
    pub fn from_option_id(option_id: &str) -> Option<Self> {
        match option_id {
            "aws" => Some(Self::Aws),
            "azure" => Some(Self::Azure),
            "gcp" => Some(Self::Gcp),
            _ => None,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Aws => "AWS",
            Self::Azure => "Azure",
            Self::Gcp => "Google Cloud",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OperationalComplexity {
    Low,
    Medium,
    High,
}

impl OperationalComplexity {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        }
    }
}

/// Minimum team capacity a candidate needs to run effectively.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TeamSize {
    Lean,
    Standard,
    Large,
}

impl TeamSize {
    /// Maps a team-size option id onto the enum.
    pub fn from_option_id(option_id: &str) -> Option<Self> {
        match option_id {
            "lean" => Some(Self::Lean),
            "standard" => Some(Self::Standard),
            "large" => Some(Self::Large),
            _ => None,
        }
    }

    /// Typical full-time engineers behind each size.
    pub const fn typical_fte(self) -> f64 {
        match self {
            Self::Lean => 1.5,
            Self::Standard => 4.0,
            Self::Large => 8.0,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Lean => "lean (1-2 engineers)",
            Self::Standard => "standard (3-5 engineers)",
            Self::Large => "large (6+ engineers)",
        }
    }
}

/// How a candidate charges, which decides how its spend follows data growth.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CostModel {
    PerGb,
    Consumption,
    Subscription,
    OpenSource,
    Hybrid,
}

impl CostModel {
    pub const fn label(self) -> &'static str {
        match self {
            Self::PerGb => "per-GB",
            Self::Consumption => "consumption",
            Self::Subscription => "subscription",
            Self::OpenSource => "open source",
            Self::Hybrid => "hybrid",
        }
    }
}

/// Capability flags consulted by the filter and scoring rules.
///
/// Boolean flags default to `false` so reference data only lists what a candidate supports.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Capabilities {
    #[serde(default)]
    pub iceberg_support: bool,
    #[serde(default)]
    pub delta_lake_support: bool,
    #[serde(default)]
    pub hudi_support: bool,

    #[serde(default)]
    pub polaris_catalog_support: bool,
    #[serde(default)]
    pub nessie_catalog_support: bool,
    #[serde(default)]
    pub unity_catalog_support: bool,
    #[serde(default)]
    pub glue_catalog_support: bool,
    #[serde(default)]
    pub hive_metastore_support: bool,
    /// Centralized catalog able to enforce row-level security for shared platforms.
    #[serde(default)]
    pub rls_catalog_support: bool,

    #[serde(default)]
    pub dbt_integration: bool,
    #[serde(default)]
    pub spark_transformation_support: bool,

    pub operational_complexity: OperationalComplexity,
    pub team_size_required: TeamSize,
    #[serde(default)]
    pub managed_service_available: bool,
    #[serde(default)]
    pub serverless: bool,

    pub deployment_models: Vec<DeploymentModel>,
    #[serde(default)]
    pub cloud_native: bool,
    #[serde(default)]
    pub multi_cloud: bool,
    #[serde(default)]
    pub cloud_providers: Vec<CloudProvider>,

    #[serde(default)]
    pub query_latency_p95: Option<f64>,
    #[serde(default)]
    pub query_concurrency: Option<u32>,
    #[serde(default)]
    pub single_node_only: bool,
    #[serde(default)]
    pub elastic_scaling: bool,

    #[serde(default)]
    pub etl_connectors: bool,
    #[serde(default)]
    pub time_travel: bool,
    #[serde(default)]
    pub streaming_query: bool,
    #[serde(default)]
    pub ad_hoc_query: bool,

    /// Enterprise pricing tier that a small budget cannot absorb.
    #[serde(default)]
    pub high_cost_tier: bool,
}

impl Capabilities {
    pub fn supports_deployment(&self, model: DeploymentModel) -> bool {
        self.deployment_models.contains(&model)
    }

    pub fn iceberg_ecosystem(&self) -> bool {
        self.iceberg_support || self.polaris_catalog_support || self.nessie_catalog_support
    }

    pub fn latency_below(&self, threshold_ms: f64) -> bool {
        self.query_latency_p95
            .map(|latency| latency < threshold_ms)
            .unwrap_or(false)
    }

    /// Short capability phrases used by report cards.
    pub fn highlights(&self) -> Vec<&'static str> {
        let mut highlights = Vec::new();
        if self.managed_service_available {
            highlights.push("Managed service available");
        }
        if self.cloud_native {
            highlights.push("Cloud-native architecture");
        }
        if self.iceberg_support {
            highlights.push("Iceberg support");
        }
        if self.unity_catalog_support {
            highlights.push("Unity Catalog support");
        }
        if self.dbt_integration {
            highlights.push("dbt integration");
        }
        if self.streaming_query {
            highlights.push("Streaming query");
        }
        highlights
    }
}

/// Immutable reference record describing one vendor or technology.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CandidateRecord {
    pub id: CandidateId,
    pub name: String,
    pub category: String,
    #[serde(default)]
    pub description: String,
    pub vendor_type: VendorType,
    #[serde(default)]
    pub website: Option<String>,
    #[serde(default)]
    pub typical_annual_cost_range: String,
    #[serde(default)]
    pub cost_notes: String,
    /// Structured minimum annual spend in thousands of dollars, when known.
    #[serde(default)]
    pub annual_cost_floor_k: Option<u32>,
    #[serde(default)]
    pub cost_model: Option<CostModel>,
    pub capabilities: Capabilities,
}

impl CandidateRecord {
    pub fn is_open_source(&self) -> bool {
        self.vendor_type == VendorType::OpenSource
    }

    /// Open-source signal used by the OSS-first tolerance, including commercially hosted OSS.
    pub fn signals_open_source(&self) -> bool {
        if self.is_open_source() {
            return true;
        }
        let notes = self.cost_notes.to_lowercase();
        notes.contains("oss") || notes.contains("open source")
    }

    /// Declared pricing model, falling back to what the vendor type implies.
    pub fn pricing_model(&self) -> CostModel {
        self.cost_model.unwrap_or(match self.vendor_type {
            VendorType::OpenSource => CostModel::OpenSource,
            VendorType::Commercial => CostModel::Subscription,
            VendorType::Managed => CostModel::Consumption,
        })
    }

    pub fn cost_range_mentions(&self, marker: &str) -> bool {
        self.typical_annual_cost_range
            .to_lowercase()
            .contains(&marker.to_lowercase())
    }
}
