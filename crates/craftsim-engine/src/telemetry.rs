//! Tracing subscriber setup.

use thiserror::Error;
use tracing_subscriber::filter::ParseError;
use tracing_subscriber::util::TryInitError;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use crate::config::SimConfig;

/// Errors raised while installing the subscriber.
#[derive(Debug, Error)]
pub enum TelemetryError {
    /// The filter directive did not parse
    #[error("Invalid log filter: {0}")]
    InvalidFilter(#[from] ParseError),

    /// A global subscriber is already installed
    #[error("Tracing already initialized: {0}")]
    AlreadyInitialized(#[from] TryInitError),
}

/// Installs the global subscriber.
///
/// `RUST_LOG` directives apply on top of `filter`. With `json` set, log
/// lines are written as JSON objects.
pub fn init_tracing(filter: &str, json: bool) -> Result<(), TelemetryError> {
    let filter = EnvFilter::from_default_env().add_directive(filter.parse()?);
    let registry = tracing_subscriber::registry().with(filter);

    if json {
        registry.with(fmt::layer().json()).try_init()?;
    } else {
        registry.with(fmt::layer()).try_init()?;
    }
    Ok(())
}

/// Installs the global subscriber from the logging section of `config`.
pub fn init_from_config(config: &SimConfig) -> Result<(), TelemetryError> {
    init_tracing(&config.log_filter, config.log_json)
}
