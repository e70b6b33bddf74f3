//! Plain-text and JSON renderings of a [`SummaryReport`].

use crate::error::Result;
use crate::summarizer::{
    AgeGenderPyramid, BracketCount, CategoryCount, CategoryEntry, ColumnBinding, SummaryReport,
    View,
};
use crate::utils::fmt_opt;
use std::fmt::Write as _;

pub fn render_json(report: &SummaryReport) -> Result<String> {
    Ok(serde_json::to_string_pretty(report)?)
}

pub fn render_text(report: &SummaryReport) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Internship summary: {} records", report.record_count);

    section(&mut out, "Columns");
    for (field, binding) in &report.columns {
        let source = match binding {
            ColumnBinding::Header(header) => format!("{:?}", header),
            ColumnBinding::Missing { expected } => format!("missing ({expected})"),
        };
        let _ = writeln!(out, "  {:<20} {}", field.name(), source);
    }

    section(&mut out, "Gender");
    view(&mut out, &report.gender, counts);
    section(&mut out, "Age brackets");
    view(&mut out, &report.age_brackets, brackets);
    section(&mut out, "Age pyramid by gender");
    view(&mut out, &report.age_gender_pyramid, pyramid);
    section(&mut out, "Metropolitan region");
    view(&mut out, &report.region, counts);
    section(&mut out, "Initiative");
    view(&mut out, &report.initiative, counts);
    section(&mut out, "Agreement type");
    view(&mut out, &report.agreement_type, counts);
    section(&mut out, "Top integration agents");
    view(&mut out, &report.top_integration_agents, ranking);
    section(&mut out, "Workload");
    view(&mut out, &report.workload_ranking, ranking);

    section(&mut out, "Averages");
    let averages = [
        ("Age", &report.averages.age, " anos", ""),
        ("Tenure", &report.averages.tenure_months, " meses", ""),
        (
            "Total compensation",
            &report.averages.total_compensation,
            "",
            "R$ ",
        ),
        ("Workload", &report.averages.workload_hours, " h", ""),
    ];
    for (name, average, unit, prefix) in averages {
        match average {
            View::Ready(Some(v)) => {
                let _ = writeln!(out, "  {name:<20} {prefix}{}{unit}", fmt_opt(Some(*v)));
            }
            View::Ready(None) => {
                let _ = writeln!(out, "  {name:<20} {}", fmt_opt(None));
            }
            View::Failed(msg) => {
                let _ = writeln!(out, "  {name:<20} unavailable: {msg}");
            }
        }
    }

    out
}

fn section(out: &mut String, title: &str) {
    let _ = writeln!(out, "\n{title}");
}

fn view<T>(out: &mut String, view: &View<T>, render: fn(&mut String, &T)) {
    match view {
        View::Ready(value) => render(out, value),
        View::Failed(msg) => {
            let _ = writeln!(out, "  unavailable: {msg}");
        }
    }
}

fn counts(out: &mut String, counts: &CategoryCount) {
    for entry in counts.iter() {
        let _ = writeln!(out, "  {:<30} {:>6}", entry.label, entry.count);
    }
}

fn ranking(out: &mut String, entries: &Vec<CategoryEntry>) {
    for (i, entry) in entries.iter().enumerate() {
        let _ = writeln!(out, "  {:>2}. {:<26} {:>6}", i + 1, entry.label, entry.count);
    }
}

fn brackets(out: &mut String, brackets: &Vec<BracketCount>) {
    for bracket in brackets {
        let _ = writeln!(out, "  {:<30} {:>6}", bracket.label, bracket.count);
    }
}

fn pyramid(out: &mut String, pyramid: &AgeGenderPyramid) {
    let _ = write!(out, "  {:<14}", "");
    for gender in &pyramid.genders {
        let _ = write!(out, " {gender:>10}");
    }
    out.push('\n');
    for row in &pyramid.rows {
        let _ = write!(out, "  {:<14}", row.bracket);
        for count in &row.counts {
            let _ = write!(out, " {count:>10}");
        }
        out.push('\n');
    }
}
