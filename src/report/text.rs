use std::io::Write;

use crate::pipeline::stage4_aggregate::AggregatedResult;

/// One classification line per sample, in result order.
pub fn write_console_lines(results: &[AggregatedResult], out: &mut dyn Write) -> std::io::Result<()> {
    for r in results {
        writeln!(out, "{}", r.classification)?;
    }
    out.flush()
}
