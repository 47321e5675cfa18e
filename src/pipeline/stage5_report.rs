use std::io::Write;
use std::path::Path;

use crate::model::dataset::{Dataset, Schema};
use crate::pipeline::stage3_classify::{Outcome, Stage3Output};
use crate::pipeline::stage4_aggregate::AggregatedResult;
use crate::report::json::{ControlRecord, ControlStatus, RunSummary, render_summary_json};
use crate::report::text::write_console_lines;
use crate::report::xlsx::render_workbook;
use crate::report::{SheetTable, WriteError, results_dataset, stage_file};

pub const SHEET_RAW_DATA: &str = "Raw Data";
pub const SHEET_PRE_PROCESSED: &str = "Pre Processed";
pub const SHEET_RESULTS: &str = "Results";

#[derive(Debug, Clone)]
pub struct Stage5Input<'a> {
    pub classified: &'a Stage3Output,
    pub pre_processed: &'a Dataset,
    pub results: &'a [AggregatedResult],
    pub schema: &'a Schema,

    pub input_path: &'a Path,
    pub output_path: &'a Path,
    pub summary_path: Option<&'a Path>,
    /// Keep only this many leading columns on the pre-processed sheet.
    pub pre_columns: Option<usize>,

    pub tool_name: String,
    pub tool_version: String,
}

pub fn write_reports(input: &Stage5Input<'_>, console: &mut dyn Write) -> Result<(), WriteError> {
    let pre = match input.pre_columns {
        Some(n) => input.pre_processed.truncate_columns(n),
        None => input.pre_processed.clone(),
    };
    let results = results_dataset(input.results);

    let sheets = [
        SheetTable {
            name: SHEET_RAW_DATA,
            data: &input.classified.dataset,
        },
        SheetTable {
            name: SHEET_PRE_PROCESSED,
            data: &pre,
        },
        SheetTable {
            name: SHEET_RESULTS,
            data: &results,
        },
    ];
    let bytes = render_workbook(&sheets)?;
    let summary = match input.summary_path {
        Some(path) => Some((path, render_summary_json(&build_summary(input))?)),
        None => None,
    };

    // Nothing becomes visible until every output is staged.
    let workbook = stage_file(input.output_path, &bytes)?;
    let summary = match summary {
        Some((path, json)) => Some((path, stage_file(path, json.as_bytes())?)),
        None => None,
    };

    workbook.commit()?;
    tracing::info!(
        path = %input.output_path.display(),
        sheets = sheets.len(),
        "wrote workbook"
    );
    if let Some((path, staged)) = summary {
        staged.commit()?;
        tracing::info!(path = %path.display(), "wrote run summary");
    }

    write_console_lines(input.results, console).map_err(WriteError::Console)?;
    Ok(())
}

pub fn build_summary(input: &Stage5Input<'_>) -> RunSummary {
    let classified = input.classified;
    let mut controls = Vec::new();
    let mut n_undefined = 0usize;

    for (row, c) in classified.dataset.rows.iter().zip(&classified.classifications) {
        match c.outcome {
            Outcome::Control {
                sample,
                assay,
                passed,
            } => controls.push(ControlRecord {
                sample_id: sample.id().to_string(),
                assay,
                call: row
                    .get(input.schema.call)
                    .map(|cell| cell.as_key().into_owned())
                    .unwrap_or_default(),
                status: if passed {
                    ControlStatus::Passed
                } else {
                    ControlStatus::Failed
                },
            }),
            Outcome::Undefined => n_undefined += 1,
            Outcome::Genotype => {}
        }
    }

    RunSummary {
        tool: input.tool_name.clone(),
        version: input.tool_version.clone(),
        input: input.input_path.display().to_string(),
        output: input.output_path.display().to_string(),
        n_rows: classified.dataset.rows.len(),
        n_samples: input.results.len(),
        n_undefined,
        controls,
        results: input.results.to_vec(),
    }
}

#[cfg(test)]
#[path = "../../tests/src_inline/pipeline/stage5_report.rs"]
mod tests;
