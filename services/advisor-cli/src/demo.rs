use std::io::{self, Write};

use stack_advisor::advisor::{
    ids, recommend_architecture, AdvisorEngine, AnswerState, ChoiceTransition, QuestionCatalog,
    RecommendationReport, ReferenceCatalog,
};
use stack_advisor::error::AppError;

use crate::infra::AdvisorContext;
use crate::render;

/// One scripted interaction in the walkthrough.
enum DemoStep {
    Slide {
        question: &'static str,
        position: f64,
    },
    Choose {
        question: &'static str,
        option: &'static str,
    },
    Toggle {
        question: &'static str,
        option: &'static str,
    },
}

const SCRIPT: [DemoStep; 8] = [
    DemoStep::Slide {
        question: ids::DAILY_VOLUME,
        position: 0.62,
    },
    DemoStep::Choose {
        question: ids::ISOLATION_PATTERN,
        option: "isolated_dedicated",
    },
    DemoStep::Choose {
        question: ids::ISOLATION_PATTERN,
        option: "isolated_dedicated",
    },
    DemoStep::Choose {
        question: ids::ISOLATION_PATTERN,
        option: "shared_corporate",
    },
    DemoStep::Slide {
        question: ids::BUDGET,
        position: 0.35,
    },
    DemoStep::Toggle {
        question: ids::PRIMARY_USE_CASE,
        option: "compliance_reporting",
    },
    DemoStep::Toggle {
        question: ids::PRIMARY_USE_CASE,
        option: "detection_rules",
    },
    DemoStep::Toggle {
        question: ids::PRIMARY_USE_CASE,
        option: "detection_rules",
    },
];

pub(crate) fn run_demo(context: &AdvisorContext) -> Result<(), AppError> {
    let stdout = io::stdout();
    let mut out = stdout.lock();
    let answers = walkthrough(
        &mut out,
        &context.catalog,
        &context.questions,
        &context.engine,
    )?;

    let evaluation = context.engine.evaluate(&context.catalog, &answers);
    let shortlist = RecommendationReport::new(&context.questions, &answers, &evaluation)
        .shortlist(context.config.report.top_n);
    writeln!(out, "\nShortlist")?;
    render::write_shortlist(&mut out, &evaluation, &shortlist)?;

    let architecture =
        recommend_architecture(&answers, &context.questions, context.engine.config());
    writeln!(out, "\nArchitecture")?;
    for (label, value) in [
        ("Isolation pattern", architecture.isolation_pattern),
        ("Catalog", architecture.catalog),
        ("Table format", architecture.table_format),
        ("Query engine", architecture.query_engine),
    ] {
        writeln!(
            out,
            "  {label}: {}",
            value.as_deref().unwrap_or("answer more questions")
        )?;
    }
    render::write_tradeoffs(&mut out, &architecture.tradeoffs)?;
    Ok(())
}

/// Replays the script, printing the remaining count after each interaction.
fn walkthrough<W: Write>(
    out: &mut W,
    catalog: &ReferenceCatalog,
    questions: &QuestionCatalog,
    engine: &AdvisorEngine,
) -> io::Result<AnswerState> {
    let mut answers = AnswerState::new();
    let baseline = engine.evaluate(catalog, &answers);
    writeln!(out, "Stack advisor demo")?;
    writeln!(
        out,
        "  {:<56} {:>3}/{} remaining",
        "start (no answers)",
        baseline.remaining(),
        baseline.total
    )?;

    for step in &SCRIPT {
        let description = apply_step(step, &mut answers, questions);
        let evaluation = engine.evaluate(catalog, &answers);
        let leader = evaluation
            .ranked
            .first()
            .map(|entry| entry.candidate.name.as_str())
            .unwrap_or("none");
        writeln!(
            out,
            "  {:<56} {:>3}/{} remaining  top: {}",
            description,
            evaluation.remaining(),
            evaluation.total,
            leader
        )?;
    }
    Ok(answers)
}

fn apply_step(step: &DemoStep, answers: &mut AnswerState, questions: &QuestionCatalog) -> String {
    match step {
        DemoStep::Slide { question, position } => {
            match questions.get(question).and_then(|definition| definition.range()) {
                Some(range) => {
                    let value = range.snap_to_marker(range.value_at(*position));
                    answers.set_range(question, value);
                    format!("slide {question} to {}", range.format_value(value))
                }
                None => format!("skip {question} (no range defined)"),
            }
        }
        DemoStep::Choose { question, option } => {
            match answers.set_single_choice(question, option) {
                ChoiceTransition::Selected => format!("select {question} = {option}"),
                ChoiceTransition::Replaced { previous } => {
                    format!("change {question}: {previous} -> {option}")
                }
                ChoiceTransition::Deselected => format!("deselect {question} = {option}"),
            }
        }
        DemoStep::Toggle { question, option } => {
            if answers.toggle_multi_choice(question, option) {
                format!("add {option} to {question}")
            } else {
                format!("remove {option} from {question}")
            }
        }
    }
}
