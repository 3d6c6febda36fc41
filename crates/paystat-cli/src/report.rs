use std::io::Write;

use anyhow::Result;
use chrono::{DateTime, Utc};
use comfy_table::{Cell, CellAlignment, ContentArrangement, Table, presets::ASCII_FULL};
use paystat_core::{StatisticsTable, TermFailure};
use serde::Serialize;

const HEADERS: [&str; 4] = [
    "Language",
    "Vacancies found",
    "Vacancies processed",
    "Average salary",
];

/// Statistics of one provider run, ready to present.
#[derive(Debug, Serialize)]
pub struct ProviderReport {
    pub provider: String,
    pub title: String,
    pub statistics: StatisticsTable,
    pub failures: Vec<TermFailure>,
}

impl ProviderReport {
    pub fn new(provider: &str, region_label: &str, statistics: StatisticsTable) -> Self {
        let failures = statistics.failures().to_vec();
        Self {
            provider: provider.to_string(),
            title: format!("{provider} {region_label}"),
            statistics,
            failures,
        }
    }
}

#[derive(Debug, Serialize)]
struct JsonReport<'a> {
    generated_at: DateTime<Utc>,
    reports: &'a [ProviderReport],
}

/// Render a titled ASCII table, followed by any isolated failures.
pub fn render_table(report: &ProviderReport) -> String {
    let mut table = Table::new();
    table.load_preset(ASCII_FULL);
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(HEADERS.to_vec());

    for (term, stats) in report.statistics.iter() {
        table.add_row(vec![
            Cell::new(term).set_alignment(CellAlignment::Left),
            Cell::new(stats.vacancies_found).set_alignment(CellAlignment::Right),
            Cell::new(stats.vacancies_processed).set_alignment(CellAlignment::Right),
            Cell::new(stats.average_salary).set_alignment(CellAlignment::Right),
        ]);
    }

    let mut out = format!("{}\n{table}\n", report.title);
    if !report.failures.is_empty() {
        out.push_str("Failed terms:\n");
        for failure in &report.failures {
            out.push_str(&format!("  {}: {}\n", failure.term, failure.error));
        }
    }
    out
}

pub fn write_table<W: Write>(out: &mut W, report: &ProviderReport) -> Result<()> {
    writeln!(out, "{}", render_table(report))?;
    Ok(())
}

pub fn write_json<W: Write>(
    out: &mut W,
    reports: &[ProviderReport],
    generated_at: DateTime<Utc>,
) -> Result<()> {
    let doc = JsonReport {
        generated_at,
        reports,
    };
    serde_json::to_writer_pretty(&mut *out, &doc)?;
    writeln!(out)?;
    Ok(())
}

pub fn write_csv<W: Write>(out: W, reports: &[ProviderReport]) -> Result<()> {
    let mut writer = csv::Writer::from_writer(out);
    writer.write_record([
        "provider",
        "term",
        "vacancies_found",
        "vacancies_processed",
        "average_salary",
    ])?;
    for report in reports {
        for (term, stats) in report.statistics.iter() {
            let found = stats.vacancies_found.to_string();
            let processed = stats.vacancies_processed.to_string();
            let average = stats.average_salary.to_string();
            writer.write_record([
                report.provider.as_str(),
                term,
                found.as_str(),
                processed.as_str(),
                average.as_str(),
            ])?;
        }
    }
    writer.flush()?;
    Ok(())
}
