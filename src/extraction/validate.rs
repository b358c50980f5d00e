//! Structural and format checks over extracted records.

use lazy_regex::regex;

use super::{
    classify::TableType,
    records::{ExtractionRecord, ValidationIssue},
};

/// Validates a document's full record sequence, yielding one issue per
/// flawed record. Clean records yield nothing; validation never blocks
/// further processing.
pub fn validate(records: &[ExtractionRecord]) -> Vec<ValidationIssue> {
    records
        .iter()
        .enumerate()
        .filter_map(|(idx, record)| {
            let problems = record_problems(record);
            if problems.is_empty() {
                return None;
            }
            Some(ValidationIssue {
                row: idx + 1,
                outlet: record.outlet_raw.clone(),
                substance: record.substance.clone(),
                page: record.page,
                table_type: record.table_type,
                problems: problems.join(", "),
            })
        })
        .collect()
}

fn record_problems(record: &ExtractionRecord) -> Vec<String> {
    let mut problems = Vec::new();

    for (name, value) in [
        ("outlet_code", &record.outlet_code),
        ("substance", &record.substance),
    ] {
        if value.trim().is_empty() {
            problems.push(format!("required field missing: {name}"));
        }
    }

    if !record.outlet_code.is_empty()
        && !regex!(r"^#?[A-Z]+\d*$").is_match(&record.outlet_code)
    {
        problems.push(format!("outlet code format error: {}", record.outlet_code));
    }

    for (name, value) in [
        ("concentration", &record.concentration),
        ("emission_quantity", &record.emission_quantity),
        ("max_standard", &record.max_standard),
        ("permit_standard", &record.permit_standard),
    ] {
        if let Some(problem) = numeric_problem(name, value) {
            problems.push(problem);
        }
    }

    if !record.max_standard.is_empty() && record.max_standard_basis.is_empty() {
        problems.push("maximum standard basis missing".to_string());
    }

    if record.table_type == TableType::EmissionStandards
        && record.max_standard.is_empty()
        && record.permit_standard.is_empty()
    {
        problems.push("standards table has no standard value".to_string());
    }

    problems
}

/// Checks a loosely numeric field. Empty values and the single-dash
/// placeholder are exempt; separators and range punctuation are stripped
/// before requiring digits and dots.
fn numeric_problem(name: &str, value: &str) -> Option<String> {
    if value.is_empty() || value == "-" {
        return None;
    }

    let cleaned: String = value
        .chars()
        .filter(|c| !matches!(c, ',' | ' ' | '/' | '-'))
        .collect();

    if !cleaned.is_empty() && !regex!(r"^[\d.]+$").is_match(&cleaned) {
        Some(format!("numeric format error: {name} = {value}"))
    } else {
        None
    }
}
