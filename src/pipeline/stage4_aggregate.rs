use std::collections::HashMap;

use serde::Serialize;

use crate::model::dataset::{COL_SAMPLE_ID, Cell, Schema, SchemaError};
use crate::pipeline::stage3_classify::Stage3Output;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum ResultOrder {
    /// Ascending by sample ID.
    #[default]
    Sorted,
    /// Order in which each sample ID first appears in the dataset.
    FirstSeen,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AggregatedResult {
    pub sample_id: String,
    pub classification: String,
}

pub fn run_stage4(
    classified: &Stage3Output,
    schema: &Schema,
    order: ResultOrder,
) -> Result<Vec<AggregatedResult>, SchemaError> {
    let mut groups: Vec<(String, Vec<&str>)> = Vec::new();
    let mut index: HashMap<String, usize> = HashMap::new();

    for (i, (row, c)) in classified
        .dataset
        .rows
        .iter()
        .zip(&classified.classifications)
        .enumerate()
    {
        let sample_id = row
            .get(schema.sample_id)
            .map(Cell::as_key)
            .ok_or(SchemaError::MissingField {
                row: i + 1,
                column: COL_SAMPLE_ID,
            })?;
        let slot = match index.get(&*sample_id) {
            Some(&slot) => slot,
            None => {
                index.insert(sample_id.to_string(), groups.len());
                groups.push((sample_id.to_string(), Vec::new()));
                groups.len() - 1
            }
        };
        groups[slot].1.push(c.text.as_str());
    }

    if order == ResultOrder::Sorted {
        groups.sort_by(|a, b| a.0.cmp(&b.0));
    }

    let results: Vec<AggregatedResult> = groups
        .into_iter()
        .map(|(sample_id, texts)| AggregatedResult {
            sample_id,
            classification: texts.join(" "),
        })
        .collect();

    tracing::info!(samples = results.len(), "aggregated classifications");
    Ok(results)
}

#[cfg(test)]
#[path = "../../tests/src_inline/pipeline/stage4_aggregate.rs"]
mod tests;
