//! Structural classification of raw tables.

use serde::Serialize;
use strum_macros::Display;

use crate::table::Table;

/// Structural type of a raw table, derived once from its first two rows.
#[derive(Clone, Copy, Debug, Display, Eq, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum TableType {
    EmissionStandards,
    EmissionData,
    PermitConditions,
    General,
    Unknown,
}

/// Keywords marking a table that carries per-outlet emission data.
const DATA_KEYWORDS: &[&str] = &["배출구", "물질명", "농도", "배출량"];
/// Keywords upgrading an emission-data table to an emission-standards table.
const STANDARD_KEYWORDS: &[&str] = &["최대배출기준", "허가배출기준"];
/// Keywords marking a permit-conditions table.
const CONDITION_KEYWORDS: &[&str] = &["허가조건", "조건"];

/// Classifies `table` by the content of its first two rows. Later rows are
/// never consulted, so a table whose real header starts at row 3 or beyond
/// classifies as [TableType::General].
pub fn classify(table: &Table) -> TableType {
    if table.len() < 2 {
        return TableType::Unknown;
    }

    let header_text = leading_text(table);

    if contains_any(&header_text, DATA_KEYWORDS) {
        if contains_any(&header_text, STANDARD_KEYWORDS) {
            TableType::EmissionStandards
        } else {
            TableType::EmissionData
        }
    } else if contains_any(&header_text, CONDITION_KEYWORDS) {
        TableType::PermitConditions
    } else {
        TableType::General
    }
}

/// Concatenates the non-empty cell texts of the first two rows.
fn leading_text(table: &Table) -> String {
    let cells: Vec<&str> = table
        .iter()
        .take(2)
        .flat_map(|row| row.iter())
        .filter_map(|cell| cell.as_deref())
        .filter(|text| !text.is_empty())
        .collect();
    cells.join(" ")
}

fn contains_any(text: &str, keywords: &[&str]) -> bool {
    keywords.iter().any(|keyword| text.contains(keyword))
}

#[cfg(test)]
mod tests {
    use googletest::prelude::*;

    use super::{TableType, classify};
    use crate::table::Table;

    #[gtest]
    fn tables_shorter_than_two_rows_are_unknown() {
        let empty = Table(vec![]);
        let one_row: Table = [["배출구", "물질명"]].into();

        expect_that!(classify(&empty), eq(TableType::Unknown));
        expect_that!(classify(&one_row), eq(TableType::Unknown));
    }

    #[gtest]
    fn data_keywords_classify_as_emission_data() {
        let table: Table = [
            ["배출구", "물질명", "농도"],
            ["#A1", "NOx", "12"],
        ]
        .into();

        expect_that!(classify(&table), eq(TableType::EmissionData));
    }

    #[gtest]
    fn standard_keyword_upgrades_to_emission_standards() {
        let table: Table = [
            ["배출구", "물질명", "최대배출기준"],
            ["#A1", "NOx", "30"],
        ]
        .into();

        expect_that!(classify(&table), eq(TableType::EmissionStandards));
    }

    #[gtest]
    fn keywords_in_the_second_row_also_count() {
        let table: Table = [
            ["", "", ""],
            ["배출구", "허가배출기준", ""],
            ["#A1", "30", ""],
        ]
        .into();

        expect_that!(classify(&table), eq(TableType::EmissionStandards));
    }

    #[gtest]
    fn condition_keyword_classifies_as_permit_conditions() {
        let table: Table = [["허가조건", "내용"], ["1", "연 1회 측정"]].into();

        expect_that!(classify(&table), eq(TableType::PermitConditions));
    }

    #[gtest]
    fn unrecognised_headers_classify_as_general() {
        let table: Table = [["시설명", "용량"], ["보일러", "10"]].into();

        expect_that!(classify(&table), eq(TableType::General));
    }

    #[gtest]
    fn keywords_in_the_third_row_are_ignored() {
        let table: Table = [
            ["제목", ""],
            ["", ""],
            ["배출구", "물질명"],
            ["#A1", "NOx"],
        ]
        .into();

        expect_that!(classify(&table), eq(TableType::General));
    }
}
