mod input;
mod logging;
mod model;
mod pipeline;
mod report;

use std::io::{BufRead, Write};
use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use thiserror::Error;

use crate::input::{
    DEFAULT_FOOTER_ROWS, DEFAULT_PREAMBLE_LINES, ExportLayout, LoadError, load_export,
};
use crate::model::dataset::{Schema, SchemaError};
use crate::pipeline::stage2_normalize::run_stage2;
use crate::pipeline::stage3_classify::run_stage3;
use crate::pipeline::stage4_aggregate::{ResultOrder, run_stage4};
use crate::pipeline::stage5_report::{Stage5Input, write_reports};
use crate::report::WriteError;

const INPUT_PROMPT: &str = "Input Text File Path:";
const OUTPUT_PROMPT: &str = "Input Output File Path:";

#[derive(Parser, Debug)]
#[command(name = "kira-hfeqc", version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Classify an instrument export and write the xlsx report
    Run(RunArgs),
}

#[derive(Args, Debug, Clone)]
struct RunArgs {
    /// Tab-delimited instrument export (prompted for when omitted)
    #[arg(long)]
    input: Option<PathBuf>,

    /// Destination .xlsx workbook (prompted for when omitted)
    #[arg(long)]
    output: Option<PathBuf>,

    /// Instrument metadata lines before the header row
    #[arg(long, default_value_t = DEFAULT_PREAMBLE_LINES)]
    preamble_lines: usize,

    /// Instrument footer rows at the end of the table
    #[arg(long, default_value_t = DEFAULT_FOOTER_ROWS)]
    footer_rows: usize,

    /// Keep only the first N columns on the "Pre Processed" sheet
    #[arg(long)]
    pre_columns: Option<usize>,

    /// Order of the per-sample results
    #[arg(long, value_enum, default_value_t = ResultOrder::Sorted)]
    result_order: ResultOrder,

    /// Also write a JSON run summary to this path
    #[arg(long)]
    summary: Option<PathBuf>,

    /// Debug-level logging
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct RunConfig {
    input: PathBuf,
    output: PathBuf,
    layout: ExportLayout,
    pre_columns: Option<usize>,
    result_order: ResultOrder,
    summary: Option<PathBuf>,
}

#[derive(Error, Debug)]
enum RunError {
    #[error("{0}")]
    Config(String),

    #[error(transparent)]
    Load(#[from] LoadError),

    #[error(transparent)]
    Schema(#[from] SchemaError),

    #[error(transparent)]
    Write(#[from] WriteError),
}

impl RunError {
    fn exit_code(&self) -> i32 {
        match self {
            RunError::Config(_) => 1,
            RunError::Load(_) => 2,
            RunError::Schema(_) => 3,
            RunError::Write(_) => 4,
        }
    }
}

fn main() {
    let cli = Cli::parse();
    let Command::Run(args) = cli.command;
    logging::init_logging(args.verbose);

    let stdin = std::io::stdin();
    let result = resolve_config(args, &mut stdin.lock(), &mut std::io::stderr())
        .and_then(|config| execute(&config, &mut std::io::stdout().lock()));

    if let Err(err) = result {
        eprintln!("error: {err}");
        std::process::exit(err.exit_code());
    }
}

fn resolve_config(
    args: RunArgs,
    answers: &mut dyn BufRead,
    prompts: &mut dyn Write,
) -> Result<RunConfig, RunError> {
    let input = match args.input {
        Some(path) => path,
        None => prompt_path(INPUT_PROMPT, answers, prompts)?,
    };
    let output = match args.output {
        Some(path) => path,
        None => prompt_path(OUTPUT_PROMPT, answers, prompts)?,
    };
    if input == output {
        return Err(RunError::Config(format!(
            "output path {} would overwrite the input export",
            output.display()
        )));
    }

    Ok(RunConfig {
        input,
        output,
        layout: ExportLayout {
            preamble_lines: args.preamble_lines,
            footer_rows: args.footer_rows,
        },
        pre_columns: args.pre_columns,
        result_order: args.result_order,
        summary: args.summary,
    })
}

fn prompt_path(
    label: &str,
    answers: &mut dyn BufRead,
    prompts: &mut dyn Write,
) -> Result<PathBuf, RunError> {
    let io_err = |e: std::io::Error| RunError::Config(format!("prompt '{label}' failed: {e}"));
    write!(prompts, "{label}").map_err(io_err)?;
    prompts.flush().map_err(io_err)?;

    let mut line = String::new();
    answers.read_line(&mut line).map_err(io_err)?;
    let answer = line.trim().trim_matches(|c| c == '"' || c == '\'');
    if answer.is_empty() {
        return Err(RunError::Config(format!("no path given for '{label}'")));
    }
    Ok(PathBuf::from(answer))
}

fn execute(config: &RunConfig, console: &mut dyn Write) -> Result<(), RunError> {
    let raw = load_export(&config.input, &config.layout)?;
    tracing::info!(
        path = %config.input.display(),
        rows = raw.n_rows(),
        columns = raw.columns.len(),
        "loaded instrument export"
    );

    let schema = Schema::resolve(&raw.columns)?;
    let pre_processed = run_stage2(&raw, &schema);
    let classified = run_stage3(&pre_processed, &schema)?;
    let results = run_stage4(&classified, &schema, config.result_order)?;

    let input = Stage5Input {
        classified: &classified,
        pre_processed: &pre_processed,
        results: &results,
        schema: &schema,
        input_path: &config.input,
        output_path: &config.output,
        summary_path: config.summary.as_deref(),
        pre_columns: config.pre_columns,
        tool_name: env!("CARGO_PKG_NAME").to_string(),
        tool_version: env!("CARGO_PKG_VERSION").to_string(),
    };
    write_reports(&input, console)?;
    Ok(())
}

#[cfg(test)]
#[path = "../tests/src_inline/main_inline.rs"]
mod tests;
