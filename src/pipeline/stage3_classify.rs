use crate::model::assay::{Assay, Call};
use crate::model::controls::{ControlSample, expectation};
use crate::model::dataset::{COL_CLASSIFICATION, Cell, Dataset, Schema, SchemaError};

pub const UNDEFINED_ASSAY: &str = "Assay is Undefined";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Control {
        sample: ControlSample,
        assay: Assay,
        passed: bool,
    },
    Genotype,
    Undefined,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Classification {
    pub text: String,
    pub outcome: Outcome,
}

#[derive(Debug, Clone)]
pub struct Stage3Output {
    /// Normalized rows with the classification column appended.
    pub dataset: Dataset,
    /// One entry per row, aligned with `dataset.rows`.
    pub classifications: Vec<Classification>,
}

/// First match wins: control table, then C282Y, then H63D, then undefined.
pub fn classify(sample_id: &str, assay_name: &str, call: &str) -> Classification {
    let assay = Assay::parse(assay_name);
    let call = Call::parse(call);

    if let Some(sample) = ControlSample::parse(sample_id) {
        if let Some(exp) = assay.and_then(|a| expectation(sample, a)) {
            let passed = call == exp.expected;
            let text = match (passed, exp.silent_on_pass) {
                (true, true) => String::new(),
                (true, false) => format!("{} control has passed", sample.id()),
                (false, _) => format!("{} control has failed", sample.id()),
            };
            return Classification {
                text,
                outcome: Outcome::Control {
                    sample,
                    assay: exp.assay,
                    passed,
                },
            };
        }
        return undefined();
    }

    match assay {
        Some(Assay::C282Y) => Classification {
            text: format!(
                "{} is {} for C282Y",
                sample_id,
                call.state().unwrap_or("inconclusive")
            ),
            outcome: Outcome::Genotype,
        },
        Some(Assay::H63D) => Classification {
            text: format!("and {} for H63D", call.state().unwrap_or("inconclusive")),
            outcome: Outcome::Genotype,
        },
        None => undefined(),
    }
}

fn undefined() -> Classification {
    Classification {
        text: UNDEFINED_ASSAY.to_string(),
        outcome: Outcome::Undefined,
    }
}

/// Writes the classification into an existing `Classification` column when the
/// export already carries one, otherwise appends it.
pub fn run_stage3(input: &Dataset, schema: &Schema) -> Result<Stage3Output, SchemaError> {
    let existing = input.columns.iter().position(|c| c == COL_CLASSIFICATION);
    if existing.is_some() {
        tracing::warn!("input already has a Classification column; its values are replaced");
    }

    let mut classifications = Vec::with_capacity(input.rows.len());
    let mut rows = Vec::with_capacity(input.rows.len());

    for (i, row) in input.rows.iter().enumerate() {
        let fields = schema.fields(row, i + 1)?;
        let c = classify(&fields.sample_id, &fields.assay_name, &fields.call);
        if let Outcome::Control {
            sample,
            assay,
            passed: false,
        } = c.outcome
        {
            tracing::warn!(
                control = sample.id(),
                assay = assay.name(),
                call = %fields.call,
                "control call does not match its expected genotype"
            );
        }
        let mut out = row.clone();
        let cell = Cell::Text(c.text.clone());
        match existing {
            Some(idx) => {
                if out.len() <= idx {
                    out.resize(idx + 1, Cell::Missing);
                }
                out[idx] = cell;
            }
            None => out.push(cell),
        }
        rows.push(out);
        classifications.push(c);
    }

    let undefined = classifications
        .iter()
        .filter(|c| c.outcome == Outcome::Undefined)
        .count();
    tracing::info!(rows = rows.len(), undefined, "classified rows");

    let mut columns = input.columns.clone();
    if existing.is_none() {
        columns.push(COL_CLASSIFICATION.to_string());
    }

    Ok(Stage3Output {
        dataset: Dataset { columns, rows },
        classifications,
    })
}

#[cfg(test)]
#[path = "../../tests/src_inline/pipeline/stage3_classify.rs"]
mod tests;
