use std::io::IsTerminal;

use tracing::Subscriber;
use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

/// Installs the global subscriber. Logs go to stderr so stdout carries only
/// per-sample classification lines. `RUST_LOG` overrides the default level.
pub fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("kira_hfeqc={default_level}")));

    let ansi = std::io::stderr().is_terminal();
    let _ = build_subscriber(filter, std::io::stderr, ansi).try_init();
}

/// Colour escapes are emitted only when `ansi` is set, so redirected logs stay plain.
fn build_subscriber<W>(filter: EnvFilter, writer: W, ansi: bool) -> impl Subscriber + Send + Sync
where
    W: for<'w> MakeWriter<'w> + Send + Sync + 'static,
{
    tracing_subscriber::registry().with(filter).with(
        fmt::layer()
            .with_writer(writer)
            .with_target(false)
            .with_ansi(ansi),
    )
}

#[cfg(test)]
#[path = "../tests/src_inline/logging.rs"]
mod tests;
