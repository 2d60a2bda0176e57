pub mod answers;
pub mod catalog;
pub mod domain;
pub mod engine;
pub mod questions;
pub mod report;

pub use answers::{AnswerSheet, AnswerSheetError, AnswerState, AnswerValue, ChoiceTransition};
pub use catalog::{CatalogError, ReferenceCatalog};
pub use domain::{
    CandidateId, CandidateRecord, Capabilities, CloudProvider, CostModel, DeploymentModel,
    OperationalComplexity, TeamSize, VendorType,
};
pub use engine::{
    evaluate, AdvisorEngine, Elimination, EngineConfig, Evaluation, RankedCandidate,
    ScoreComponent, Stage, StageSnapshot,
};
pub use questions::{
    ids, ChoiceOption, QuestionCatalog, QuestionCategory, QuestionDefinition, QuestionKind,
    RangeScale, RangeSpec,
};
pub use report::views::{
    ArchitectureSummary, CandidateSummary, RecommendationReportView, RequirementLine, Tradeoff,
    TradeoffKind,
};
pub use report::{
    compare_tco, parse_cost_range, project_tco, recommend_architecture, write_shortlist_csv,
    CostRange, IsolationPattern, RecommendationReport, TcoBreakdown, TcoInputs, TcoProjection,
};
