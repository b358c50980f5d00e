//! Locates header rows within a raw table.

use crate::table::Table;

/// Keywords identifying the primary row of a composite header.
const PRIMARY_KEYWORDS: &[&str] = &["배출구", "물질명"];
/// Keywords for the simpler single-row header scan used by the general
/// extraction path.
const ROW_KEYWORDS: &[&str] = &["배출구", "물질명", "농도"];

/// Column labels positionally aligned to a table's columns, plus the row
/// index at which data rows begin.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct HeaderSpec {
    pub labels: Vec<String>,
    pub data_start: usize,
}

/// Locates a possibly two-row composite header. The first row containing an
/// outlet or substance keyword is the primary header row; where its cells
/// are empty, labels are taken from the following sub-header row, and
/// failing that a synthetic `컬럼{i}` placeholder. Returns `None` when no
/// row matches, in which case callers fall through to the simpler
/// single-row scan.
pub fn locate_composite_header(table: &Table) -> Option<HeaderSpec> {
    let primary_idx = find_keyword_row(table, PRIMARY_KEYWORDS)?;
    let primary = &table[primary_idx];
    let sub = table.get(primary_idx + 1);

    let labels = primary
        .iter()
        .enumerate()
        .map(|(col, cell)| {
            let primary_text = cell.as_deref().unwrap_or("");
            if !primary_text.is_empty() {
                return primary_text.to_string();
            }
            match sub.map(|row| row.text(col)) {
                Some(sub_text) if !sub_text.is_empty() => sub_text.to_string(),
                _ => format!("컬럼{}", col + 1),
            }
        })
        .collect();

    // A sub-header row counts as part of the header whenever it exists with
    // a non-empty cell list, even if every cell in it is null.
    let has_sub = sub.is_some_and(|row| !row.is_empty());
    let data_start = primary_idx + if has_sub { 2 } else { 1 };

    Some(HeaderSpec { labels, data_start })
}

/// Finds the single-row header used by the general extraction path: the
/// first row with a cell mentioning an outlet, substance, or concentration.
pub fn locate_keyword_row(table: &Table) -> Option<usize> {
    find_keyword_row(table, ROW_KEYWORDS)
}

fn find_keyword_row(table: &Table, keywords: &[&str]) -> Option<usize> {
    table.iter().position(|row| {
        row.iter()
            .filter_map(|cell| cell.as_deref())
            .any(|text| keywords.iter().any(|keyword| text.contains(keyword)))
    })
}
