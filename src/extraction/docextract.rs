//! Drives classification and extraction across a whole document.

use crate::{config::ExtractConfig, table::Table};

use super::{
    classify, fields,
    records::{DocumentExtract, ExtractionRecord, PageInfo, PageTables, RawTraceRecord},
};

/// Receives notifications as document extraction progresses, and may end
/// the run early between page boundaries.
pub trait ExtractEvents {
    /// Called after each page has been processed.
    fn on_page(&mut self, completed: usize, total: usize);

    /// Extraction stops before the next page when this returns `false`.
    fn do_continue(&self) -> bool {
        true
    }
}

/// Event sink that ignores all events and never stops a run.
#[derive(Debug, Default)]
pub struct NullEvents;

impl ExtractEvents for NullEvents {
    fn on_page(&mut self, _completed: usize, _total: usize) {}
}

/// Extracts canonical records and raw traces from every table of one
/// document, in page and table order. Each call returns owned, independent
/// collections; nothing is shared between documents.
pub fn extract_document(
    pages: &[PageTables],
    cfg: &ExtractConfig,
    events: &mut dyn ExtractEvents,
) -> DocumentExtract {
    let mut out = DocumentExtract::default();

    for (completed, page_tables) in pages.iter().enumerate() {
        let info = process_page(page_tables, cfg, &mut out);
        log::debug!(
            "Page {}: {} tables, {} records, {} traces.",
            info.page,
            info.tables,
            info.records,
            info.traces,
        );
        out.pages.push(info);

        events.on_page(completed + 1, pages.len());
        if !events.do_continue() {
            log::warn!("Extraction stopped after page {}.", page_tables.page);
            break;
        }
    }

    out
}

/// Processes the tables of a single page, appending to `out` and returning
/// the page summary.
fn process_page(
    page_tables: &PageTables,
    cfg: &ExtractConfig,
    out: &mut DocumentExtract,
) -> PageInfo {
    let mut info = PageInfo {
        page: page_tables.page,
        tables: 0,
        records: 0,
        traces: 0,
    };

    for (table_idx, table) in page_tables.tables.iter().enumerate() {
        if table.is_empty() {
            continue;
        }
        info.tables += 1;

        let (records, traces) = process_table(table, page_tables.page, table_idx, cfg);

        info.records += records.len();
        info.traces += traces.len();
        out.records.extend(records);
        out.traces.extend(traces);
    }

    info
}

/// Pure per-table step: classifies the table once and returns its raw
/// traces and canonical records.
fn process_table(
    table: &Table,
    page: usize,
    table_idx: usize,
    cfg: &ExtractConfig,
) -> (Vec<ExtractionRecord>, Vec<RawTraceRecord>) {
    let table_type = classify::classify(table);
    let traces = fields::extract_traces(table, table_type, page, table_idx);
    let records = fields::extract_records(table, table_type, page, table_idx, cfg);
    (records, traces)
}
