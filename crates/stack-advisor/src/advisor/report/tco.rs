//! Five-year total cost of ownership projections for shortlisted candidates.
//!
//! A projection starts from the midpoint of the published cost range and grows platform spend
//! with data volume according to the pricing model. Team time and hidden costs (egress, support
//! contracts, first-year migration) are added on top.

use serde::Serialize;

use super::super::answers::AnswerState;
use super::super::domain::{
    CandidateRecord, CostModel, DeploymentModel, OperationalComplexity, TeamSize, VendorType,
};
use super::super::questions::ids;

const PROJECTION_YEARS: usize = 5;
const ENGINEER_COST_PER_YEAR: f64 = 150_000.0;
const EGRESS_SHARE: f64 = 0.15;
const SUPPORT_SHARE: f64 = 0.12;
const MIGRATION_COST: f64 = 50_000.0;
/// Query spend grows slower than stored data on consumption pricing.
const CONSUMPTION_GROWTH_SHARE: f64 = 0.6;

/// Annual cost bounds in dollars.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CostRange {
    pub min: f64,
    pub max: f64,
}

impl CostRange {
    pub fn midpoint(self) -> f64 {
        (self.min + self.max) / 2.0
    }
}

/// Parses ranges such as `$50K-$200K`, `$3M-12M/year` or `$300K-$1M+`.
///
/// Trailing qualifiers after ` for `, ` at ` or a comma are ignored. Anything that is not a
/// two-sided range yields `None`.
pub fn parse_cost_range(text: &str) -> Option<CostRange> {
    let normalized = text
        .to_lowercase()
        .replace("/year", "")
        .replace("/month", "")
        .replace('$', "");
    let range = [" for ", " at ", ","]
        .iter()
        .find(|separator| normalized.contains(**separator))
        .and_then(|separator| normalized.split(*separator).next())
        .unwrap_or(normalized.as_str());

    let (low, high) = range.split_once('-')?;
    if high.contains('-') {
        return None;
    }
    Some(CostRange {
        min: parse_amount(low)?,
        max: parse_amount(high)?,
    })
}

fn parse_amount(raw: &str) -> Option<f64> {
    let cleaned: String = raw
        .chars()
        .filter(|c| c.is_ascii_digit() || matches!(*c, '.' | 'k' | 'm'))
        .collect();

    if let Some(number) = cleaned.strip_suffix('m') {
        number.parse::<f64>().ok().map(|value| value * 1_000_000.0)
    } else if let Some(number) = cleaned.strip_suffix('k') {
        number.parse::<f64>().ok().map(|value| value * 1_000.0)
    } else {
        cleaned.parse().ok()
    }
}

/// Workload assumptions behind a projection.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TcoInputs {
    pub daily_volume_tb: f64,
    /// Annual data growth as a fraction (0.2 is 20%).
    pub growth_rate: f64,
    pub team_size: TeamSize,
}

impl Default for TcoInputs {
    fn default() -> Self {
        Self {
            daily_volume_tb: 1.0,
            growth_rate: 0.20,
            team_size: TeamSize::Standard,
        }
    }
}

impl TcoInputs {
    /// Reads volume, growth and team size from the answers, keeping defaults for gaps.
    pub fn from_answers(answers: &AnswerState) -> Self {
        let defaults = Self::default();
        Self {
            daily_volume_tb: answers
                .numeric(ids::DAILY_VOLUME)
                .map(|gb_per_day| gb_per_day / 1_000.0)
                .unwrap_or(defaults.daily_volume_tb),
            growth_rate: answers
                .numeric(ids::GROWTH_RATE)
                .map(|percent| percent / 100.0)
                .unwrap_or(defaults.growth_rate),
            team_size: answers
                .choice(ids::TEAM_SIZE)
                .and_then(TeamSize::from_option_id)
                .unwrap_or(defaults.team_size),
        }
    }
}

/// Five-year spend split by where the money goes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct TcoBreakdown {
    pub platform: f64,
    pub operational: f64,
    pub hidden: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TcoProjection {
    pub candidate_id: String,
    pub name: String,
    pub cost_model: CostModel,
    pub year_one: f64,
    pub five_year_total: f64,
    pub annual_costs: Vec<f64>,
    pub breakdown: TcoBreakdown,
    pub assumptions: Vec<String>,
    pub warnings: Vec<String>,
}

impl TcoProjection {
    pub fn summary(&self) -> String {
        format!(
            "{}: ${:.0}K/year -> ${:.0}K total (5-year)",
            self.name,
            self.year_one / 1_000.0,
            self.five_year_total / 1_000.0
        )
    }
}

pub fn project_tco(candidate: &CandidateRecord, inputs: &TcoInputs) -> TcoProjection {
    let model = candidate.pricing_model();
    let capabilities = &candidate.capabilities;
    let mut assumptions = Vec::new();

    let baseline = match parse_cost_range(&candidate.typical_annual_cost_range)
        .filter(|range| range.max > 0.0)
    {
        Some(range) => range.midpoint(),
        None => {
            assumptions.push(format!(
                "Platform cost estimated from {} pricing (no published range)",
                model.label()
            ));
            estimate_from_model(model, inputs.daily_volume_tb)
        }
    };
    let operational = operational_cost(capabilities.operational_complexity);

    let mut annual_costs = Vec::with_capacity(PROJECTION_YEARS);
    let mut breakdown = TcoBreakdown::default();
    let mut volume_multiplier = 1.0;
    for year in 1..=PROJECTION_YEARS {
        let platform = match model {
            CostModel::PerGb => baseline * volume_multiplier,
            CostModel::Consumption => {
                baseline * (1.0 + (volume_multiplier - 1.0) * CONSUMPTION_GROWTH_SHARE)
            }
            CostModel::Subscription | CostModel::OpenSource | CostModel::Hybrid => baseline,
        };
        let hidden = hidden_cost(candidate, platform, year);

        breakdown.platform += platform;
        breakdown.operational += operational;
        breakdown.hidden += hidden;
        annual_costs.push(platform + operational + hidden);
        volume_multiplier *= 1.0 + inputs.growth_rate;
    }

    assumptions.push(format!(
        "Data volume: {:.1} TB/day growing {:.0}%/year",
        inputs.daily_volume_tb,
        inputs.growth_rate * 100.0
    ));
    assumptions.push(format!(
        "Team size: {} ({} FTE)",
        inputs.team_size.label(),
        inputs.team_size.typical_fte()
    ));
    assumptions.push(format!("Cost model: {}", model.label()));

    let mut warnings = Vec::new();
    if model == CostModel::PerGb {
        warnings.push("Per-GB pricing: costs climb with data volume growth".to_string());
    }
    if !capabilities.cloud_native && capabilities.supports_deployment(DeploymentModel::Cloud) {
        warnings.push("Not cloud-native: expect higher cloud infrastructure costs".to_string());
    }
    if capabilities.operational_complexity == OperationalComplexity::High {
        warnings.push("High operational complexity: significant team time required".to_string());
    }

    TcoProjection {
        candidate_id: candidate.id.to_string(),
        name: candidate.name.clone(),
        cost_model: model,
        year_one: annual_costs.first().copied().unwrap_or_default(),
        five_year_total: annual_costs.iter().sum(),
        annual_costs,
        breakdown,
        assumptions,
        warnings,
    }
}

/// Projects every candidate and orders them by five-year total, cheapest first.
pub fn compare_tco<'a, I>(candidates: I, inputs: &TcoInputs) -> Vec<TcoProjection>
where
    I: IntoIterator<Item = &'a CandidateRecord>,
{
    let mut projections: Vec<TcoProjection> = candidates
        .into_iter()
        .map(|candidate| project_tco(candidate, inputs))
        .collect();
    projections.sort_by(|left, right| left.five_year_total.total_cmp(&right.five_year_total));
    projections
}

fn estimate_from_model(model: CostModel, daily_volume_tb: f64) -> f64 {
    let yearly_tb_months = daily_volume_tb * 30.0 * 12.0;
    match model {
        CostModel::PerGb => yearly_tb_months * 175.0,
        CostModel::Consumption => yearly_tb_months * 75.0,
        CostModel::OpenSource => yearly_tb_months * 100.0,
        CostModel::Subscription => 350_000.0,
        CostModel::Hybrid => 400_000.0,
    }
}

fn operational_cost(complexity: OperationalComplexity) -> f64 {
    let fte = match complexity {
        OperationalComplexity::Low => 0.25,
        OperationalComplexity::Medium => 0.5,
        OperationalComplexity::High => 1.0,
    };
    fte * ENGINEER_COST_PER_YEAR
}

fn hidden_cost(candidate: &CandidateRecord, platform: f64, year: usize) -> f64 {
    let mut hidden = 0.0;
    if candidate
        .capabilities
        .supports_deployment(DeploymentModel::Cloud)
    {
        hidden += platform * EGRESS_SHARE;
    }
    if candidate.vendor_type != VendorType::OpenSource {
        hidden += platform * SUPPORT_SHARE;
    }
    if year == 1 {
        hidden += MIGRATION_COST;
    }
    hidden
}
