//! Owned result records handed to the reporting collaborators.

use hashbrown::HashMap;
use serde::{Deserialize, Serialize};

use crate::table::{Row, Table};

use super::classify::TableType;

/// Tables found on one page, in the shape handed over by the
/// document-reading collaborator.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct PageTables {
    pub page: usize,
    pub tables: Vec<Table>,
}

/// One canonical output row.
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct ExtractionRecord {
    pub page: usize,
    /// 1-based table index within the page.
    pub table: usize,
    pub table_type: TableType,
    /// The selected outlet-type prefix that admitted the row.
    pub outlet_type: String,
    pub outlet_code: String,
    /// Original text of the row's first cell.
    pub outlet_raw: String,
    pub substance: String,
    pub concentration: String,
    pub emission_quantity: String,
    pub unit: String,
    pub max_standard: String,
    pub permit_standard: String,
    pub max_standard_basis: String,
    pub permit_standard_basis: String,
    pub remark: String,
    pub raw_row: Row,
    pub headers: Vec<String>,
    /// Every original header label with its raw cell value, canonical or
    /// not, for traceability.
    pub by_header: HashMap<String, String>,
}

impl ExtractionRecord {
    /// Creates a record with every canonical field initialised to the
    /// empty string. Field mapping never has to rely on a caller having
    /// pre-populated anything.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        page: usize,
        table: usize,
        table_type: TableType,
        outlet_type: String,
        outlet_code: String,
        outlet_raw: String,
        raw_row: Row,
        headers: Vec<String>,
    ) -> Self {
        Self {
            page,
            table,
            table_type,
            outlet_type,
            outlet_code,
            outlet_raw,
            substance: String::new(),
            concentration: String::new(),
            emission_quantity: String::new(),
            unit: String::new(),
            max_standard: String::new(),
            permit_standard: String::new(),
            max_standard_basis: String::new(),
            permit_standard_basis: String::new(),
            remark: String::new(),
            raw_row,
            headers,
            by_header: HashMap::new(),
        }
    }
}

/// Looser-structured counterpart to [ExtractionRecord], preserving a data
/// row as found for debugging and audit.
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct RawTraceRecord {
    pub page: usize,
    /// 1-based table index within the page.
    pub table: usize,
    pub table_type: TableType,
    pub row: Row,
    pub headers: Vec<String>,
}

/// Per-page processing summary.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize)]
pub struct PageInfo {
    pub page: usize,
    pub tables: usize,
    pub records: usize,
    pub traces: usize,
}

/// One flawed record's accumulated problems.
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct ValidationIssue {
    /// 1-based index within the validated record sequence.
    pub row: usize,
    pub outlet: String,
    pub substance: String,
    pub page: usize,
    pub table_type: TableType,
    pub problems: String,
}

/// Everything extracted from one document.
#[derive(Debug, Default, Eq, PartialEq, Serialize)]
pub struct DocumentExtract {
    pub records: Vec<ExtractionRecord>,
    pub traces: Vec<RawTraceRecord>,
    pub pages: Vec<PageInfo>,
}
