use chrono::NaiveDate;
use std::path::{Path, PathBuf};
use tracing::info;

use stack_advisor::advisor::{
    AdvisorEngine, AnswerSheet, AnswerState, QuestionCatalog, ReferenceCatalog,
};
use stack_advisor::config::AppConfig;
use stack_advisor::error::AppError;
use stack_advisor::telemetry;

/// Dataset paths given on the command line. They win over the environment.
#[derive(Debug, Default, Clone)]
pub(crate) struct DataOverrides {
    pub(crate) catalog: Option<PathBuf>,
    pub(crate) questions: Option<PathBuf>,
}

/// Everything a subcommand needs: configuration, loaded datasets and the engine.
pub(crate) struct AdvisorContext {
    pub(crate) config: AppConfig,
    pub(crate) catalog: ReferenceCatalog,
    pub(crate) questions: QuestionCatalog,
    pub(crate) engine: AdvisorEngine,
}

impl AdvisorContext {
    pub(crate) fn load(overrides: &DataOverrides) -> Result<Self, AppError> {
        let config = AppConfig::load()?;
        telemetry::init(&config.telemetry)?;

        let catalog_path = overrides
            .catalog
            .as_ref()
            .or(config.data.catalog_path.as_ref());
        let catalog = match catalog_path {
            Some(path) => ReferenceCatalog::from_path(path)?,
            None => ReferenceCatalog::bundled()?,
        };

        let questions_path = overrides
            .questions
            .as_ref()
            .or(config.data.questions_path.as_ref());
        let questions = match questions_path {
            Some(path) => QuestionCatalog::from_path(path)?,
            None => QuestionCatalog::bundled()?,
        };

        info!(
            ?config.environment,
            vendors = catalog.len(),
            questions = questions.len(),
            "reference data loaded"
        );

        let engine = AdvisorEngine::new(config.engine.clone());
        Ok(Self {
            config,
            catalog,
            questions,
            engine,
        })
    }

    pub(crate) fn top_n(&self, requested: Option<usize>) -> usize {
        requested
            .filter(|top| *top >= 1)
            .unwrap_or(self.config.report.top_n)
    }
}

pub(crate) fn load_answers(path: &Path, questions: &QuestionCatalog) -> Result<AnswerState, AppError> {
    let sheet = AnswerSheet::from_path(path)?;
    let answers = sheet.apply(questions)?;
    info!(
        path = %path.display(),
        answered = answers.answered_count(),
        "answer sheet applied"
    );
    Ok(answers)
}

pub(crate) fn parse_date(raw: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .map_err(|err| format!("failed to parse '{raw}' as YYYY-MM-DD ({err})"))
}
