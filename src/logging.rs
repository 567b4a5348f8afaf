//! Logging setup for the CLI

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::LoggingConfig;

/// Install the global subscriber. `RUST_LOG` wins over the configured level.
///
/// Logs go to stderr so table and JSON output on stdout stay clean.
pub fn init(config: &LoggingConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(directive(&config.level)));

    let registry = tracing_subscriber::registry().with(filter);

    let result = if config.format.eq_ignore_ascii_case("json") {
        registry
            .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
            .try_init()
    } else {
        registry
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .try_init()
    };

    if let Err(e) = result {
        eprintln!("Logging already initialised: {}", e);
    }
}

/// Bare levels apply to this crate only; full directives pass through
fn directive(level: &str) -> String {
    if level.contains('=') || level.contains(',') {
        level.to_string()
    } else {
        format!("hq_console={}", level)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_directive() {
        assert_eq!(directive("debug"), "hq_console=debug");
        assert_eq!(directive("hq_console=trace,reqwest=info"), "hq_console=trace,reqwest=info");
    }
}
