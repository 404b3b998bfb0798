//! # CraftSim Common
//!
//! Shared types for the crafting simulation:
//! - Material identity (`MaterialId`, `Material`, `MaterialKey`)
//! - Error types for construction and bulk loading
//! - Prelude for convenient imports

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(clippy::unwrap_used)]

pub mod error;
pub mod material;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::error::*;
    pub use crate::material::*;
}

pub use prelude::*;
