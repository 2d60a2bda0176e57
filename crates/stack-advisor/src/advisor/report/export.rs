use std::io::Write;

use serde::Serialize;

use super::views::CandidateSummary;

#[derive(Debug, Serialize)]
struct ShortlistRow<'a> {
    rank: usize,
    id: &'a str,
    name: &'a str,
    category: &'a str,
    score: i32,
    cost_range: &'a str,
    year_one_cost_k: Option<u64>,
    five_year_tco_k: Option<u64>,
    operational_complexity: &'a str,
    team_size: &'a str,
    highlights: String,
    website: Option<&'a str>,
}

/// Writes the shortlist as CSV with a header row.
pub fn write_shortlist_csv<W: Write>(
    writer: W,
    candidates: &[CandidateSummary],
) -> Result<(), csv::Error> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    for candidate in candidates {
        csv_writer.serialize(ShortlistRow {
            rank: candidate.rank,
            id: &candidate.id,
            name: &candidate.name,
            category: &candidate.category,
            score: candidate.score,
            cost_range: &candidate.cost_range,
            year_one_cost_k: candidate
                .tco
                .as_ref()
                .map(|tco| thousands(tco.year_one)),
            five_year_tco_k: candidate
                .tco
                .as_ref()
                .map(|tco| thousands(tco.five_year_total)),
            operational_complexity: candidate.operational_complexity,
            team_size: candidate.team_size,
            highlights: candidate.highlights.join("; "),
            website: candidate.website.as_deref(),
        })?;
    }
    csv_writer.flush()?;
    Ok(())
}

fn thousands(dollars: f64) -> u64 {
    (dollars / 1_000.0).round().max(0.0) as u64
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::advisor::domain::CostModel;
    use crate::advisor::report::tco::{TcoBreakdown, TcoProjection};

    fn summary(rank: usize, id: &str, website: Option<&str>) -> CandidateSummary {
        CandidateSummary {
            rank,
            id: id.to_string(),
            name: id.to_uppercase(),
            category: "Query Engine".to_string(),
            description: String::new(),
            cost_range: "$10K-$200K".to_string(),
            cost_notes: String::new(),
            highlights: vec!["Iceberg support", "dbt integration"],
            operational_complexity: "low",
            team_size: "lean (1-2 engineers)",
            website: website.map(str::to_string),
            score: 7,
            tco: None,
        }
    }

    #[test]
    fn writes_header_and_one_row_per_candidate() {
        let mut buffer = Vec::new();
        write_shortlist_csv(
            &mut buffer,
            &[
                summary(1, "athena", Some("https://aws.amazon.com/athena")),
                summary(2, "duckdb", None),
            ],
        )
        .expect("csv writes");

        let output = String::from_utf8(buffer).expect("utf8");
        let lines: Vec<&str> = output.lines().collect();
        assert_eq!(
            lines[0],
            "rank,id,name,category,score,cost_range,year_one_cost_k,five_year_tco_k,operational_complexity,team_size,highlights,website"
        );
        assert_eq!(lines.len(), 3);
        assert!(lines[1].starts_with("1,athena,ATHENA,Query Engine,7,$10K-$200K,,,low,"));
        assert!(lines[1].contains("Iceberg support; dbt integration"));
        assert!(lines[2].ends_with(','));
    }

    #[test]
    fn projected_costs_are_written_in_thousands() {
        let mut athena = summary(1, "athena", None);
        athena.tco = Some(TcoProjection {
            candidate_id: "athena".to_string(),
            name: "ATHENA".to_string(),
            cost_model: CostModel::Consumption,
            year_one: 211_499.6,
            five_year_total: 1_000_400.0,
            annual_costs: Vec::new(),
            breakdown: TcoBreakdown::default(),
            assumptions: Vec::new(),
            warnings: Vec::new(),
        });
        let mut buffer = Vec::new();

        write_shortlist_csv(&mut buffer, &[athena]).expect("csv writes");

        let output = String::from_utf8(buffer).expect("utf8");
        assert!(output
            .lines()
            .nth(1)
            .is_some_and(|row| row.contains(",$10K-$200K,211,1000,low,")));
    }
}
