//! # CraftSim Gameplay
//!
//! Crafting systems for the simulation:
//! - Record sources and record parsing
//! - Inventory with id/name material resolution
//! - Recipes with resolved and unresolved ingredients
//! - Crafter: recipe loading and craft transactions
//! - Random source for craft outcomes

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(clippy::unwrap_used)]

pub mod crafting;
pub mod inventory;
pub mod recipes;
pub mod records;
pub mod roll;

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::crafting::*;
    pub use crate::inventory::*;
    pub use crate::recipes::*;
    pub use crate::records::*;
    pub use crate::roll::*;
}

pub use prelude::*;
