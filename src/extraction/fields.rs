//! Maps header-labelled cells onto canonical record fields.

use lazy_regex::{Regex, regex};

use crate::config::ExtractConfig;
use crate::table::Table;

use super::{
    basis::normalize_basis,
    classify::TableType,
    header::{self, HeaderSpec},
    records::{ExtractionRecord, RawTraceRecord},
};

/// Ordered outlet-code patterns, most specific first.
fn outlet_patterns() -> [&'static Regex; 3] {
    [
        regex!(r"^#[A-Z]+\d*"),
        regex!(r"^#[A-Z]+"),
        regex!(r"^[A-Z]+\d*"),
    ]
}

/// Extracts a normalised outlet code from the leading text of a data row.
/// Total: text matching none of the patterns is returned verbatim.
pub fn outlet_code(first_cell: &str) -> String {
    for pattern in outlet_patterns() {
        if let Some(found) = pattern.find(first_cell) {
            return found.as_str().to_string();
        }
    }
    first_cell.to_string()
}

/// Canonical output fields a header label can map onto.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
enum CanonicalField {
    Substance,
    Concentration,
    EmissionQuantity,
    Unit,
    MaxStandard,
    PermitStandard,
    MaxBasis,
    PermitBasis,
    Remark,
}

/// A label-classification rule: the first rule with a keyword contained in
/// the trimmed, lower-cased label decides the canonical field.
struct LabelRule {
    keywords: &'static [&'static str],
    field: CanonicalField,
}

/// Ordered label rules. Order is significant: a label such as
/// `최대배출기준근거` maps to the standard-value field, not the basis
/// field, because the standard rule precedes the basis rule.
const LABEL_RULES: &[LabelRule] = &[
    LabelRule {
        keywords: &["물질명", "오염물질", "항목"],
        field: CanonicalField::Substance,
    },
    LabelRule {
        keywords: &["농도", "배출농도"],
        field: CanonicalField::Concentration,
    },
    LabelRule {
        keywords: &["배출량", "연간배출량"],
        field: CanonicalField::EmissionQuantity,
    },
    LabelRule {
        keywords: &["단위"],
        field: CanonicalField::Unit,
    },
    LabelRule {
        keywords: &["최대배출기준"],
        field: CanonicalField::MaxStandard,
    },
    LabelRule {
        keywords: &["허가배출기준"],
        field: CanonicalField::PermitStandard,
    },
    LabelRule {
        keywords: &["근거"],
        field: CanonicalField::MaxBasis,
    },
    LabelRule {
        keywords: &["비고"],
        field: CanonicalField::Remark,
    },
];

/// Classifies a header label against [LABEL_RULES], refining a basis match
/// by its qualifier.
fn classify_label(label: &str) -> Option<CanonicalField> {
    let rule = LABEL_RULES
        .iter()
        .find(|rule| rule.keywords.iter().any(|keyword| label.contains(keyword)))?;

    Some(match rule.field {
        // Unqualified 근거 labels default to the maximum-standard basis.
        CanonicalField::MaxBasis if label.contains("허가") && !label.contains("최대") => {
            CanonicalField::PermitBasis
        }
        field => field,
    })
}

/// Assigns a header-labelled cell value to the record: once to its
/// canonical field (if the label classifies), and always under the original
/// label for traceability.
fn assign(record: &mut ExtractionRecord, label: &str, value: String) {
    use CanonicalField::*;

    let normalised_label = label.trim().to_lowercase();
    match classify_label(&normalised_label) {
        Some(Substance) => record.substance = value.clone(),
        Some(Concentration) => record.concentration = value.clone(),
        Some(EmissionQuantity) => record.emission_quantity = value.clone(),
        Some(Unit) => record.unit = value.clone(),
        Some(MaxStandard) => record.max_standard = value.clone(),
        Some(PermitStandard) => record.permit_standard = value.clone(),
        Some(MaxBasis) => record.max_standard_basis = normalize_basis(&value),
        Some(PermitBasis) => record.permit_standard_basis = normalize_basis(&value),
        Some(Remark) => {
            // Merged cells can bleed a standard value into the remark
            // column; such values are not remarks.
            if !value.is_empty() && !value.contains("최대배출기준") {
                record.remark = value.clone();
            }
        }
        None => {}
    }

    record.by_header.insert(label.to_string(), value);
}

/// Builds canonical records for one table. Each data row whose first cell
/// starts with a requested outlet-type prefix yields exactly one record
/// (first matching prefix wins). Returns nothing when the table has no
/// recognisable header row.
pub fn extract_records(
    table: &Table,
    table_type: TableType,
    page: usize,
    table_idx: usize,
    cfg: &ExtractConfig,
) -> Vec<ExtractionRecord> {
    let Some(HeaderSpec { labels, data_start }) = locate_table_header(table, table_type) else {
        return Vec::new();
    };

    let mut records = Vec::new();
    for row in table.get(data_start..).unwrap_or_default() {
        if row.is_blank() {
            continue;
        }

        let first_cell = row.text(0);
        let Some(outlet_type) = cfg
            .outlet_types
            .iter()
            .find(|prefix| first_cell.starts_with(prefix.as_str()))
        else {
            continue;
        };

        let mut record = ExtractionRecord::new(
            page,
            table_idx + 1,
            table_type,
            outlet_type.clone(),
            outlet_code(first_cell),
            first_cell.to_string(),
            row.clone(),
            labels.clone(),
        );

        for (col, label) in labels.iter().enumerate() {
            if col >= row.len() || label.is_empty() {
                continue;
            }
            assign(&mut record, label, row.text(col).to_string());
        }

        records.push(record);
    }

    records
}

/// Resolves the header to map fields through. Emission-standards tables get
/// the two-row composite treatment; every other type, and any standards
/// table the composite locator cannot place, falls through to the simpler
/// single-row scan.
fn locate_table_header(table: &Table, table_type: TableType) -> Option<HeaderSpec> {
    if table_type == TableType::EmissionStandards
        && let Some(spec) = header::locate_composite_header(table)
    {
        return Some(spec);
    }

    let header_idx = header::locate_keyword_row(table)?;
    let labels = table[header_idx]
        .iter()
        .map(|cell| cell.clone().unwrap_or_default())
        .collect();
    Some(HeaderSpec {
        labels,
        data_start: header_idx + 1,
    })
}

/// Produces raw-trace records for emission-standards and emission-data
/// tables, independent of the outlet-type filter. Other table types leave
/// no trace.
pub fn extract_traces(
    table: &Table,
    table_type: TableType,
    page: usize,
    table_idx: usize,
) -> Vec<RawTraceRecord> {
    match table_type {
        TableType::EmissionStandards => standards_traces(table, table_type, page, table_idx),
        TableType::EmissionData => data_traces(table, table_type, page, table_idx),
        _ => Vec::new(),
    }
}

/// Traces rows under a composite header whose first cell starts with the
/// outlet marker or contains alphabetic text.
fn standards_traces(
    table: &Table,
    table_type: TableType,
    page: usize,
    table_idx: usize,
) -> Vec<RawTraceRecord> {
    let Some(spec) = header::locate_composite_header(table) else {
        return Vec::new();
    };

    table
        .get(spec.data_start..)
        .unwrap_or_default()
        .iter()
        .filter(|row| !row.is_blank())
        .filter(|row| {
            let first_cell = row.text(0);
            first_cell.starts_with('#') || first_cell.chars().any(char::is_alphabetic)
        })
        .map(|row| RawTraceRecord {
            page,
            table: table_idx + 1,
            table_type,
            row: row.clone(),
            headers: spec.labels.clone(),
        })
        .collect()
}

/// Traces outlet-marked rows from the first row mentioning an outlet
/// onwards. This looser path records no header set.
fn data_traces(
    table: &Table,
    table_type: TableType,
    page: usize,
    table_idx: usize,
) -> Vec<RawTraceRecord> {
    let Some(marker_idx) = table.iter().position(|row| {
        row.iter()
            .filter_map(|cell| cell.as_deref())
            .any(|text| text.contains("배출구") || text.contains('#'))
    }) else {
        return Vec::new();
    };

    table[marker_idx..]
        .iter()
        .filter(|row| row.text(0).starts_with('#'))
        .map(|row| RawTraceRecord {
            page,
            table: table_idx + 1,
            table_type,
            row: row.clone(),
            headers: Vec::new(),
        })
        .collect()
}
