//! Diagnostics go to stderr; stdout is reserved for the envelope, hash or
//! JSON a command produces, so `stellar-envelope sign ... | curl -d @-` works
//! with logging turned up.

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::cli::LogFormatArg;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Pretty,
    Json,
}

impl From<LogFormatArg> for LogFormat {
    fn from(arg: LogFormatArg) -> Self {
        match arg {
            LogFormatArg::Pretty => LogFormat::Pretty,
            LogFormatArg::Json => LogFormat::Json,
        }
    }
}

/// `RUST_LOG` wins over `default_directives` when it parses.
fn env_filter(default_directives: &str) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directives))
}

/// Installs the global subscriber. Must run once, before the first event.
///
/// ```text
/// RUST_LOG=stellar_envelope=debug stellar-envelope sign --tx ...
/// ```
pub fn init_logging(default_directives: &str, format: LogFormat) {
    let registry = tracing_subscriber::registry().with(env_filter(default_directives));

    match format {
        LogFormat::Pretty => registry
            .with(
                fmt::layer()
                    .with_writer(std::io::stderr)
                    .with_file(false)
                    .with_line_number(false),
            )
            .init(),
        LogFormat::Json => registry
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .init(),
    }

    tracing::debug!(?format, "logging ready");
}
