//! Tracing bootstrap shared by the job board binaries.
//!
//! The degraded paths of the submission flow (mirror drift, dropped admin
//! notifications) are only observable through logs, so the subscriber is
//! installed before any store or gateway is built.

use crate::config::TelemetryConfig;
use tracing_subscriber::filter::ParseError;
use tracing_subscriber::EnvFilter;

#[derive(Debug, thiserror::Error)]
pub enum TelemetryError {
    #[error("invalid log level/filter '{value}'")]
    Filter {
        value: String,
        #[source]
        source: ParseError,
    },
    #[error("tracing subscriber already installed: {0}")]
    AlreadyInstalled(Box<dyn std::error::Error + Send + Sync>),
}

/// Directives derived from the configured level. `RUST_LOG` takes precedence
/// when set; otherwise the HTTP client chatter behind the notification
/// gateway is capped at `warn` so submission logs stay readable.
fn filter_directives(level: &str) -> String {
    format!("{level},hyper=warn,reqwest=warn")
}

pub fn init(config: &TelemetryConfig) -> Result<(), TelemetryError> {
    let env_filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::try_new(filter_directives(&config.log_level)).map_err(|source| {
            TelemetryError::Filter {
                value: config.log_level.clone(),
                source,
            }
        })?,
    };

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .compact()
        .with_ansi(false)
        .try_init()
        .map_err(TelemetryError::AlreadyInstalled)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn directives_cap_gateway_chatter() {
        let directives = filter_directives("debug");
        assert!(EnvFilter::try_new(&directives).is_ok());
        assert!(directives.starts_with("debug,"));
        assert!(directives.contains("reqwest=warn"));
    }

    #[test]
    fn invalid_levels_are_reported_with_the_offending_value() {
        let error = EnvFilter::try_new(filter_directives("no-such-level!"))
            .map_err(|source| TelemetryError::Filter {
                value: "no-such-level!".to_string(),
                source,
            })
            .expect_err("bogus level is refused");
        assert!(error.to_string().contains("no-such-level!"));
    }
}
