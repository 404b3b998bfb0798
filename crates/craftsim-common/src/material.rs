//! Material identity.
//!
//! A material is identified by an integer id and a display name. Two
//! materials are considered the same resource when either their ids match
//! or their names match ignoring case. That rule is not transitive across
//! inconsistent data (`(1, "Wood")`, `(2, "wood")` and `(2, "Stone")`), so
//! containers must not rely on it for hashing. [`MaterialKey`] is the strict
//! key for that purpose.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{MaterialError, MaterialResult};

/// Identifier of a material type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct MaterialId(i32);

impl MaterialId {
    /// Creates a material ID from a raw value.
    #[must_use]
    pub const fn new(id: i32) -> Self {
        Self(id)
    }

    /// Returns the raw ID value.
    #[must_use]
    pub const fn raw(self) -> i32 {
        self.0
    }
}

impl fmt::Display for MaterialId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Folds a material name into the form used for case-insensitive matching.
#[must_use]
pub fn name_key(name: &str) -> String {
    name.to_lowercase()
}

/// A craftable resource.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Material {
    id: MaterialId,
    name: String,
}

impl Material {
    /// Creates a material.
    ///
    /// Fails with [`MaterialError::InvalidName`] when the name is empty or
    /// only whitespace.
    pub fn new(id: MaterialId, name: impl Into<String>) -> MaterialResult<Self> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(MaterialError::InvalidName { id: id.raw() });
        }
        Ok(Self { id, name })
    }

    /// Returns the material id.
    #[must_use]
    pub const fn id(&self) -> MaterialId {
        self.id
    }

    /// Returns the display name, as given at construction.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// True when the ids match or the names match ignoring case.
    #[must_use]
    pub fn is_same_as(&self, other: &Self) -> bool {
        self.id == other.id || self.name.to_lowercase() == other.name.to_lowercase()
    }

    /// Strict key over `(id, folded name)`.
    ///
    /// Materials that are only equivalent through one of the two fields
    /// produce different keys.
    #[must_use]
    pub fn key(&self) -> MaterialKey {
        MaterialKey {
            id: self.id,
            name: name_key(&self.name),
        }
    }
}

impl fmt::Display for Material {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Material(Id={}, Name={})", self.id, self.name)
    }
}

/// Display name for a material known only by id.
#[must_use]
pub fn placeholder_name(id: MaterialId) -> String {
    format!("Material{id}")
}

/// Hashable key combining a material's id and case-folded name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MaterialKey {
    /// Material id
    pub id: MaterialId,
    /// Lowercased name
    pub name: String,
}
