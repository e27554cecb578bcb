//! Logging for the `tlint` binary.
//!
//! Library crates only emit `tracing` events, the subscriber is installed
//! here. Logs go to stderr so they never mix with diagnostics on stdout.
//!
//! `--log-level` sets the level of the `tlint` crates and silences everything
//! else (parser, file walker). `TLINT_LOG` replaces that filter entirely and
//! uses the `RUST_LOG` syntax, e.g. `TLINT_LOG=tlint_core::discovery=trace`.

use std::fmt::Display;

use tracing_subscriber::EnvFilter;

const TLINT_LOG: &str = "TLINT_LOG";

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, clap::ValueEnum)]
pub enum LogLevel {
    Error,
    #[default]
    Warn,
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    fn as_str(&self) -> &'static str {
        match self {
            LogLevel::Error => "error",
            LogLevel::Warn => "warn",
            LogLevel::Info => "info",
            LogLevel::Debug => "debug",
            LogLevel::Trace => "trace",
        }
    }
}

impl Display for LogLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Directives restricting output to the workspace crates.
fn directives(log_level: LogLevel) -> String {
    format!("off,tlint={log_level},tlint_core={log_level}")
}

fn build_filter(log_level: LogLevel) -> EnvFilter {
    match std::env::var(TLINT_LOG) {
        Ok(value) => EnvFilter::builder().parse_lossy(value),
        Err(_) => EnvFilter::builder().parse_lossy(directives(log_level)),
    }
}

pub fn init_logging(log_level: LogLevel) {
    let filter = build_filter(log_level);

    // `try_init()` fails if a subscriber is already set, e.g. when `run()` is
    // called several times in the same process. The first one is kept.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .try_init();
}
