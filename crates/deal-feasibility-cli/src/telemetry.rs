use thiserror::Error;
use tracing_subscriber::filter::ParseError;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Error)]
pub enum TelemetryError {
    #[error("invalid log filter '{directive}' (from {origin})")]
    Filter {
        directive: String,
        origin: &'static str,
        #[source]
        source: ParseError,
    },

    #[error("log subscriber already installed: {0}")]
    Install(#[source] Box<dyn std::error::Error + Send + Sync>),
}

/// The filter directive in force and where it came from.
///
/// A non-empty `RUST_LOG` beats `--log-level`.
fn choose_directive(rust_log: Option<String>, log_level: &str) -> (String, &'static str) {
    match rust_log {
        Some(directive) if !directive.trim().is_empty() => (directive, "RUST_LOG"),
        _ => (log_level.to_string(), "--log-level"),
    }
}

fn build_filter(directive: String, origin: &'static str) -> Result<EnvFilter, TelemetryError> {
    EnvFilter::try_new(&directive).map_err(|source| TelemetryError::Filter {
        directive,
        origin,
        source,
    })
}

/// Install the stderr log subscriber so stdout carries only command output.
pub fn init(log_level: &str) -> Result<(), TelemetryError> {
    let (directive, origin) = choose_directive(std::env::var("RUST_LOG").ok(), log_level);
    let filter = build_filter(directive, origin)?;

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_ansi(false)
        .compact()
        .try_init()
        .map_err(TelemetryError::Install)
}
