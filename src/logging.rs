//! Logging setup

use clap::ValueEnum;
use tracing_subscriber::EnvFilter;

/// Log output format
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

/// Filter used when `RUST_LOG` is not set
pub fn default_filter(debug: bool) -> &'static str {
    if debug {
        "actions_pin=debug"
    } else {
        "actions_pin=info"
    }
}

/// Install the global subscriber, writing to stderr
///
/// `--debug` always wins over `RUST_LOG`.
pub fn init(debug: bool, format: LogFormat) {
    let filter = if debug {
        EnvFilter::new(default_filter(true))
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter(false)))
    };

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false);

    match format {
        LogFormat::Text => builder.init(),
        LogFormat::Json => builder.json().init(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_filter_switches_on_debug() {
        assert_eq!(default_filter(true), "actions_pin=debug");
        assert_eq!(default_filter(false), "actions_pin=info");
    }
}
