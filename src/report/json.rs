use serde::Serialize;

use crate::model::assay::Assay;
use crate::pipeline::stage4_aggregate::AggregatedResult;
use crate::report::WriteError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ControlStatus {
    Passed,
    Failed,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ControlRecord {
    pub sample_id: String,
    pub assay: Assay,
    pub call: String,
    pub status: ControlStatus,
}

#[derive(Debug, Clone, Serialize)]
pub struct RunSummary {
    pub tool: String,
    pub version: String,
    pub input: String,
    pub output: String,
    pub n_rows: usize,
    pub n_samples: usize,
    pub n_undefined: usize,
    pub controls: Vec<ControlRecord>,
    pub results: Vec<AggregatedResult>,
}

pub fn render_summary_json(summary: &RunSummary) -> Result<String, WriteError> {
    let mut out = serde_json::to_string_pretty(summary)?;
    out.push('\n');
    Ok(out)
}
