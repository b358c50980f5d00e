use std::{
    fs::File,
    io::BufReader,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use clap::Args;
use serde::Serialize;
use simple_bar::ProgressBar;

use crate::{
    clock::{Clock, RealClock, Timestamp},
    config::ExtractConfig,
    extraction::{
        docextract::{self, ExtractEvents},
        records::{DocumentExtract, PageTables, ValidationIssue},
        validate,
    },
};

/// Extracts and validates emission-outlet records from a plan document's
/// table dump (and optionally a review document's), writing a single JSON
/// result bundle for the spreadsheet-rendering step.
#[derive(Args, Debug)]
pub struct Command {
    /// Path to the plan document's table dump (JSON pages of tables).
    plan: PathBuf,

    /// Path to the review document's table dump.
    #[arg(long)]
    review: Option<PathBuf>,

    /// Directory to write the result bundle into.
    #[arg(long, default_value = ".")]
    output: PathBuf,

    /// Label prefixed to the timestamped output filename.
    #[arg(long, default_value = "extract")]
    label: String,

    /// Outlet-type prefixes to accept, e.g. `#A,#B,#C`. Overrides the
    /// configuration file.
    #[arg(long, value_delimiter(','))]
    outlet_types: Vec<String>,

    /// Path to an optional YAML configuration file.
    #[arg(long)]
    config: Option<PathBuf>,
}

/// Runs the subcommand.
pub fn run(cmd: &Command) -> Result<()> {
    let cfg = resolve_config(cmd)?;

    let plan = extract_file(&cmd.plan, &cfg)?;
    let review = cmd
        .review
        .as_ref()
        .map(|path| extract_file(path, &cfg))
        .transpose()?;

    let bundle = ResultBundle { plan, review };
    log::info!(
        "Extracted {} plan records, {} review records, {} validation issues.",
        bundle.plan.extract.records.len(),
        bundle
            .review
            .as_ref()
            .map_or(0, |doc| doc.extract.records.len()),
        bundle.issue_count(),
    );

    let out_path = cmd
        .output
        .join(output_filename(&cmd.label, RealClock::new().now()));
    let out_file = File::create(&out_path)
        .with_context(|| format!("creating output file {:?}", out_path))?;
    serde_json::to_writer_pretty(out_file, &bundle).with_context(|| "writing result bundle")?;

    println!("Wrote {}", out_path.display());
    Ok(())
}

/// One document's extraction output together with its validation issues.
#[derive(Debug, Serialize)]
struct DocumentResult {
    #[serde(flatten)]
    extract: DocumentExtract,
    issues: Vec<ValidationIssue>,
}

#[derive(Debug, Serialize)]
struct ResultBundle {
    plan: DocumentResult,
    review: Option<DocumentResult>,
}

impl ResultBundle {
    fn issue_count(&self) -> usize {
        self.plan.issues.len() + self.review.as_ref().map_or(0, |doc| doc.issues.len())
    }
}

fn resolve_config(cmd: &Command) -> Result<ExtractConfig> {
    let mut cfg = match &cmd.config {
        Some(path) => ExtractConfig::load(path)?,
        None => ExtractConfig::default(),
    };
    if !cmd.outlet_types.is_empty() {
        cfg.outlet_types = cmd.outlet_types.clone();
    }
    cfg.ensure_valid()?;
    Ok(cfg)
}

/// Extracts and validates one document from its table dump.
fn extract_file(path: &Path, cfg: &ExtractConfig) -> Result<DocumentResult> {
    let file = File::open(path).with_context(|| format!("opening table dump {:?}", path))?;
    let pages: Vec<PageTables> = serde_json::from_reader(BufReader::new(file))
        .with_context(|| format!("parsing table dump {:?}", path))?;

    let mut events = EventDisplayer::new();
    let extract = docextract::extract_document(&pages, cfg, &mut events);
    let issues = validate::validate(&extract.records);

    Ok(DocumentResult { extract, issues })
}

/// Names the result bundle `<label>_<YYYYMMDD_HHMMSS>.json`.
fn output_filename(label: &str, now: Timestamp) -> String {
    format!("{}_{}.json", label, now.format("%Y%m%d_%H%M%S"))
}

struct EventDisplayer {
    progress_bar: Option<ProgressBar>,
}

impl EventDisplayer {
    fn new() -> Self {
        Self { progress_bar: None }
    }
}

impl ExtractEvents for EventDisplayer {
    fn on_page(&mut self, _completed: usize, total: usize) {
        let progress_bar: &mut ProgressBar = match self.progress_bar.as_mut() {
            Some(progress_bar) => progress_bar,
            None => {
                let progress_bar = ProgressBar::cargo_style(total as u32, 80, true);
                self.progress_bar = Some(progress_bar);
                self.progress_bar.as_mut().unwrap()
            }
        };

        progress_bar.update();
    }
}

#[cfg(test)]
mod tests {
    use chrono::prelude::*;
    use googletest::prelude::*;

    use super::{extract_file, output_filename};
    use crate::{
        clock::{Clock, FixedClock},
        config::ExtractConfig,
    };

    #[gtest]
    fn output_filename_carries_label_and_timestamp() {
        let clock = FixedClock(
            Local
                .with_ymd_and_hms(2024, 3, 5, 14, 30, 9)
                .single()
                .expect("should be a valid local time"),
        );

        expect_that!(
            output_filename("정리양식", clock.now()),
            eq("정리양식_20240305_143009.json"),
        );
    }

    #[gtest]
    fn extract_file_round_trips_a_table_dump() {
        let dump = serde_json::json!([
            {
                "page": 1,
                "tables": [[
                    ["배출구", "물질명", "농도"],
                    ["#A1", "NOx", "12"],
                ]],
            },
        ]);
        let dir = tempfile::tempdir().expect("should create a tempdir");
        let dump_path = dir.path().join("plan.json");
        std::fs::write(&dump_path, dump.to_string()).expect("should write the dump");

        let result =
            extract_file(&dump_path, &ExtractConfig::default()).expect("should extract");

        expect_that!(result.extract.records, len(eq(1)));
        expect_that!(result.extract.records[0].substance, eq("NOx"));
        expect_that!(result.issues, is_empty());
    }
}
