use crate::demo::run_demo;
use crate::infra::{load_answers, AdvisorContext, DataOverrides};
use crate::render;
use chrono::{Local, NaiveDate};
use clap::{Args, Parser, Subcommand, ValueEnum};
use serde::Serialize;
use stack_advisor::advisor::{
    write_shortlist_csv, CandidateSummary, RecommendationReport, StageSnapshot,
};
use stack_advisor::error::AppError;
use std::collections::BTreeMap;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "stack-advisor",
    about = "Shortlist security data platform vendors from architecture constraints",
    version
)]
struct Cli {
    /// Vendor catalog JSON overriding the bundled dataset
    #[arg(long, global = true)]
    catalog: Option<PathBuf>,
    /// Question catalog JSON overriding the bundled questionnaire
    #[arg(long, global = true)]
    questions: Option<PathBuf>,
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List the questionnaire in presentation order
    Questions,
    /// Rank vendors for an answer sheet
    Evaluate(EvaluateArgs),
    /// Write a plain-text recommendation report for an answer sheet
    Report(ReportArgs),
    /// Walk through a scripted session showing how answers narrow the catalog (default command)
    Demo,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub(crate) enum OutputFormat {
    #[default]
    Text,
    Json,
    Csv,
}

#[derive(Args, Debug)]
pub(crate) struct EvaluateArgs {
    /// Answer sheet JSON mapping question ids to answers
    #[arg(long)]
    pub(crate) answers: PathBuf,
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub(crate) format: OutputFormat,
    /// Number of vendors to show (defaults to ADVISOR_TOP_N)
    #[arg(long)]
    pub(crate) top: Option<usize>,
}

#[derive(Args, Debug)]
pub(crate) struct ReportArgs {
    /// Answer sheet JSON mapping question ids to answers
    #[arg(long)]
    pub(crate) answers: PathBuf,
    /// Write the report to a file instead of stdout
    #[arg(long)]
    pub(crate) output: Option<PathBuf>,
    /// Report date (YYYY-MM-DD). Defaults to today.
    #[arg(long, value_parser = crate::infra::parse_date)]
    pub(crate) today: Option<NaiveDate>,
    #[arg(long)]
    pub(crate) top: Option<usize>,
}

#[derive(Debug, Serialize)]
struct EvaluateOutput<'a> {
    remaining: usize,
    total: usize,
    shortlist: Vec<CandidateSummary>,
    per_question_counts: &'a BTreeMap<String, usize>,
    stages: &'a [StageSnapshot],
}

pub(crate) fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let overrides = DataOverrides {
        catalog: cli.catalog,
        questions: cli.questions,
    };
    let context = AdvisorContext::load(&overrides)?;

    match cli.command.unwrap_or(Command::Demo) {
        Command::Questions => {
            let stdout = io::stdout();
            render::write_questions(&mut stdout.lock(), &context.questions)?;
            Ok(())
        }
        Command::Evaluate(args) => run_evaluate(&context, args),
        Command::Report(args) => run_report(&context, args),
        Command::Demo => run_demo(&context),
    }
}

fn run_evaluate(context: &AdvisorContext, args: EvaluateArgs) -> Result<(), AppError> {
    let answers = load_answers(&args.answers, &context.questions)?;
    let evaluation = context.engine.evaluate(&context.catalog, &answers);
    let shortlist = RecommendationReport::new(&context.questions, &answers, &evaluation)
        .shortlist(context.top_n(args.top));

    let stdout = io::stdout();
    let mut out = stdout.lock();
    match args.format {
        OutputFormat::Text => {
            render::write_shortlist(&mut out, &evaluation, &shortlist)?;
            render::write_question_counts(&mut out, &context.questions, &evaluation)?;
        }
        OutputFormat::Json => {
            let output = EvaluateOutput {
                remaining: evaluation.remaining(),
                total: evaluation.total,
                shortlist,
                per_question_counts: &evaluation.per_question_counts,
                stages: &evaluation.stages,
            };
            serde_json::to_writer_pretty(&mut out, &output)?;
            writeln!(out)?;
        }
        OutputFormat::Csv => write_shortlist_csv(&mut out, &shortlist)?,
    }
    Ok(())
}

fn run_report(context: &AdvisorContext, args: ReportArgs) -> Result<(), AppError> {
    let answers = load_answers(&args.answers, &context.questions)?;
    let evaluation = context.engine.evaluate(&context.catalog, &answers);
    let today = args.today.unwrap_or_else(|| Local::now().date_naive());
    let view = RecommendationReport::new(&context.questions, &answers, &evaluation).summary(
        context.engine.config(),
        context.top_n(args.top),
        today,
    );

    match args.output {
        Some(path) => {
            let mut file = BufWriter::new(File::create(&path)?);
            render::write_report(&mut file, &view)?;
            file.flush()?;
            println!("Report written to {}", path.display());
        }
        None => {
            let stdout = io::stdout();
            render::write_report(&mut stdout.lock(), &view)?;
        }
    }
    Ok(())
}
