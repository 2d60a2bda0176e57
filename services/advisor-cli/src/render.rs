use std::io::{self, Write};

use stack_advisor::advisor::{
    CandidateSummary, Evaluation, QuestionCatalog, QuestionKind, RecommendationReportView,
    Tradeoff, TradeoffKind,
};

pub(crate) fn write_questions<W: Write>(out: &mut W, questions: &QuestionCatalog) -> io::Result<()> {
    let mut section = None;
    for question in questions.questions() {
        if question.section.as_deref() != section {
            section = question.section.as_deref();
            writeln!(out, "\n{}", section.unwrap_or("General"))?;
        }

        let required = if question.required { " (required)" } else { "" };
        writeln!(
            out,
            "  [{}] {}{} - {}",
            question.id,
            question.title,
            required,
            question.kind.label()
        )?;

        match &question.kind {
            QuestionKind::NumericRange { range } => writeln!(
                out,
                "      {} to {}, default {}",
                range.format_value(range.min),
                range.format_value(range.max),
                range.format_value(range.default)
            )?,
            QuestionKind::SingleChoice { options } | QuestionKind::MultiChoice { options } => {
                for option in options {
                    writeln!(out, "      {}: {}", option.id, option.label)?;
                }
            }
        }
    }
    Ok(())
}

pub(crate) fn write_shortlist<W: Write>(
    out: &mut W,
    evaluation: &Evaluation,
    shortlist: &[CandidateSummary],
) -> io::Result<()> {
    writeln!(
        out,
        "{} of {} vendors remain",
        evaluation.remaining(),
        evaluation.total
    )?;
    if shortlist.is_empty() {
        writeln!(out, "No vendor satisfies every constraint. Relax an answer and retry.")?;
        return Ok(());
    }

    for candidate in shortlist {
        writeln!(
            out,
            "  {:>2}. {:<28} {:<20} score {:>3}  {}",
            candidate.rank, candidate.name, candidate.category, candidate.score, candidate.cost_range
        )?;
        if let Some(tco) = &candidate.tco {
            writeln!(out, "      {}", tco.summary())?;
        }
    }
    Ok(())
}

pub(crate) fn write_tradeoffs<W: Write>(out: &mut W, tradeoffs: &[Tradeoff]) -> io::Result<()> {
    if tradeoffs.is_empty() {
        return Ok(());
    }
    writeln!(out, "  Trade-offs:")?;
    for tradeoff in tradeoffs {
        let marker = match tradeoff.kind {
            TradeoffKind::Benefit => '+',
            TradeoffKind::Risk => '!',
        };
        writeln!(out, "    {marker} {}: {}", tradeoff.topic, tradeoff.detail)?;
    }
    Ok(())
}

pub(crate) fn write_question_counts<W: Write>(
    out: &mut W,
    questions: &QuestionCatalog,
    evaluation: &Evaluation,
) -> io::Result<()> {
    writeln!(out, "\nRemaining after each question")?;
    for question in questions.questions() {
        if let Some(count) = evaluation.count_after(&question.id) {
            let eliminated = evaluation.eliminated_by(&question.id).count();
            writeln!(
                out,
                "  {:<36} {:>3} remaining ({} eliminated)",
                question.id, count, eliminated
            )?;
        }
    }
    Ok(())
}

pub(crate) fn write_report<W: Write>(out: &mut W, view: &RecommendationReportView) -> io::Result<()> {
    writeln!(out, "Security Data Platform Recommendation")?;
    writeln!(out, "Generated: {}", view.generated_on)?;

    writeln!(out, "\nRequirements")?;
    if view.requirements.is_empty() {
        writeln!(out, "  No answers recorded")?;
    }
    for line in &view.requirements {
        writeln!(out, "  {}: {}", line.title, line.answer)?;
    }
    if !view.missing_required.is_empty() {
        writeln!(
            out,
            "  Unanswered required questions: {}",
            view.missing_required.join(", ")
        )?;
    }

    let architecture = &view.architecture;
    writeln!(out, "\nArchitecture")?;
    for (label, value) in [
        ("Isolation pattern", &architecture.isolation_pattern),
        ("Catalog", &architecture.catalog),
        ("Table format", &architecture.table_format),
        ("Query engine", &architecture.query_engine),
        ("Performance", &architecture.performance),
        ("TCO", &architecture.tco),
    ] {
        writeln!(
            out,
            "  {label}: {}",
            value.as_deref().unwrap_or("answer more questions")
        )?;
    }
    if !architecture.production_examples.is_empty() {
        writeln!(out, "  Production examples:")?;
        for example in &architecture.production_examples {
            writeln!(out, "    - {example}")?;
        }
    }
    write_tradeoffs(out, &architecture.tradeoffs)?;

    writeln!(out, "\nFiltering")?;
    for entry in &view.stage_counts {
        writeln!(out, "  {:<28} {:>3} remaining", entry.stage_label, entry.remaining)?;
    }

    writeln!(
        out,
        "\nTop {} of {} remaining ({} evaluated)",
        view.candidates.len(),
        view.remaining,
        view.total
    )?;
    for candidate in &view.candidates {
        writeln!(
            out,
            "\n  {}. {} [{}] score {}",
            candidate.rank, candidate.name, candidate.category, candidate.score
        )?;
        if !candidate.description.is_empty() {
            writeln!(out, "     {}", candidate.description)?;
        }
        if candidate.cost_notes.is_empty() {
            writeln!(out, "     Cost: {}", candidate.cost_range)?;
        } else {
            writeln!(
                out,
                "     Cost: {} ({})",
                candidate.cost_range, candidate.cost_notes
            )?;
        }
        if !candidate.highlights.is_empty() {
            writeln!(out, "     Highlights: {}", candidate.highlights.join(", "))?;
        }
        writeln!(
            out,
            "     Operations: {} complexity, {} team",
            candidate.operational_complexity, candidate.team_size
        )?;
        if let Some(tco) = &candidate.tco {
            writeln!(
                out,
                "     5-year TCO: ${:.0}K (year one ${:.0}K, {} pricing)",
                tco.five_year_total / 1_000.0,
                tco.year_one / 1_000.0,
                tco.cost_model.label()
            )?;
            for warning in &tco.warnings {
                writeln!(out, "     Cost risk: {warning}")?;
            }
        }
        if let Some(website) = &candidate.website {
            writeln!(out, "     Website: {website}")?;
        }
    }
    Ok(())
}
