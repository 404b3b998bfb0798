//! # CraftSim Engine
//!
//! Ties the crafting systems to the outside world:
//! - File-backed record sources
//! - TOML configuration
//! - Tracing subscriber setup
//! - Sessions that load an inventory and recipes from configuration

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(clippy::unwrap_used)]

pub mod config;
pub mod session;
pub mod sources;
pub mod telemetry;

pub use config::{SimConfig, DEFAULT_LOG_FILTER};
pub use session::{Session, SessionError, SessionResult};
pub use sources::FileSource;
pub use telemetry::{init_from_config, init_tracing, TelemetryError};
