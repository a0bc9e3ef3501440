//! Tracing setup for the CLI.

use tracing_subscriber::EnvFilter;
use tracing_subscriber::prelude::*;

/// Environment variable holding a level or a full filter spec.
pub const LOG_ENV: &str = "YAPI2TS_LOG";

/// Crates a plain level applies to.
const WORKSPACE_CRATES: [&str; 3] = ["yapi2ts", "yapi2ts_cli", "yapi2ts_core"];

/// Install the stderr fmt subscriber.
///
/// `YAPI2TS_LOG` takes "trace", "debug", "info", "warn", "error" or a full
/// tracing filter spec like "yapi2ts_core=debug,reqwest=warn".
pub fn init_tracing() {
    let filter = filter_spec(std::env::var(LOG_ENV).ok().as_deref());

    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_filter(EnvFilter::new(filter));

    if tracing_subscriber::registry()
        .with(fmt_layer)
        .try_init()
        .is_err()
    {
        eprintln!("Warning: tracing subscriber already initialized");
    }
}

fn filter_spec(value: Option<&str>) -> String {
    match value.map(str::trim) {
        Some(level) if is_plain_level(level) => workspace_filter(&level.to_ascii_lowercase()),
        Some(spec) if !spec.is_empty() => spec.to_string(),
        _ => workspace_filter("info"),
    }
}

fn workspace_filter(level: &str) -> String {
    WORKSPACE_CRATES
        .iter()
        .map(|krate| format!("{krate}={level}"))
        .collect::<Vec<_>>()
        .join(",")
}

fn is_plain_level(s: &str) -> bool {
    matches!(
        s.to_ascii_lowercase().as_str(),
        "trace" | "debug" | "info" | "warn" | "error"
    )
}
