mod export;
mod recommendations;
mod summary;
mod tco;
pub mod views;

pub use export::write_shortlist_csv;
pub use recommendations::{recommend_architecture, IsolationPattern};
pub use summary::RecommendationReport;
pub use tco::{
    compare_tco, parse_cost_range, project_tco, CostRange, TcoBreakdown, TcoInputs, TcoProjection,
};
