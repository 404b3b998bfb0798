//! Recipe definitions.

use std::borrow::Cow;
use std::fmt;

use craftsim_common::{placeholder_name, Material, MaterialId};
use thiserror::Error;

/// Recipe construction errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RecipeError {
    /// Name was empty or whitespace
    #[error("Recipe name cannot be empty")]
    EmptyName,
}

/// Result type for recipe construction.
pub type RecipeResult<T> = Result<T, RecipeError>;

/// A material referenced by a recipe.
#[derive(Debug, Clone)]
pub enum Ingredient {
    /// Material that existed in the inventory when the recipe was loaded
    Resolved(Material),
    /// Material id the inventory did not know about at load time
    Unresolved(MaterialId),
}

impl Ingredient {
    /// Returns the material id.
    #[must_use]
    pub fn id(&self) -> MaterialId {
        match self {
            Self::Resolved(material) => material.id(),
            Self::Unresolved(id) => *id,
        }
    }

    /// Returns the display name.
    ///
    /// Unresolved ingredients are shown as `Material<id>`. The stand-in
    /// name is never used to match inventory entries.
    #[must_use]
    pub fn name(&self) -> Cow<'_, str> {
        match self {
            Self::Resolved(material) => Cow::Borrowed(material.name()),
            Self::Unresolved(id) => Cow::Owned(placeholder_name(*id)),
        }
    }

    /// Returns true if the material was unknown at load time.
    #[must_use]
    pub const fn is_unresolved(&self) -> bool {
        matches!(self, Self::Unresolved(_))
    }
}

/// An ingredient and the quantity consumed.
#[derive(Debug, Clone)]
pub struct Requirement {
    /// Material consumed
    pub ingredient: Ingredient,
    /// Quantity consumed, always positive
    pub quantity: u32,
}

/// A crafting recipe.
#[derive(Debug, Clone)]
pub struct Recipe {
    name: String,
    success_rate: f64,
    requirements: Vec<Requirement>,
}

impl Recipe {
    /// Creates a new recipe builder.
    #[must_use]
    pub fn builder(name: impl Into<String>, success_rate: f64) -> RecipeBuilder {
        RecipeBuilder::new(name, success_rate)
    }

    /// Returns the recipe name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Chance of success, as given. Not clamped.
    #[must_use]
    pub const fn success_rate(&self) -> f64 {
        self.success_rate
    }

    /// Returns the requirements in the order they were declared.
    #[must_use]
    pub fn requirements(&self) -> &[Requirement] {
        &self.requirements
    }

    /// Returns the ingredients that were unknown at load time.
    pub fn unresolved(&self) -> impl Iterator<Item = MaterialId> + '_ {
        self.requirements
            .iter()
            .filter(|req| req.ingredient.is_unresolved())
            .map(|req| req.ingredient.id())
    }

    /// Returns true if `name` matches this recipe's name ignoring case.
    #[must_use]
    pub fn is_named(&self, name: &str) -> bool {
        self.name.to_lowercase() == name.to_lowercase()
    }
}

impl fmt::Display for Recipe {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Recipe(Name={}, SuccessRate={}, Materials={})",
            self.name,
            self.success_rate,
            self.requirements.len()
        )
    }
}

/// Builder for creating recipes.
///
/// Requirements naming an id that was already added are summed into the
/// first one.
#[derive(Debug)]
pub struct RecipeBuilder {
    name: String,
    success_rate: f64,
    requirements: Vec<Requirement>,
}

impl RecipeBuilder {
    fn new(name: impl Into<String>, success_rate: f64) -> Self {
        Self {
            name: name.into(),
            success_rate,
            requirements: Vec::new(),
        }
    }

    /// Adds a requirement. A zero quantity is ignored.
    #[must_use]
    pub fn requirement(mut self, ingredient: Ingredient, quantity: u32) -> Self {
        if quantity == 0 {
            return self;
        }
        let id = ingredient.id();
        match self
            .requirements
            .iter_mut()
            .find(|req| req.ingredient.id() == id)
        {
            Some(existing) => existing.quantity = existing.quantity.saturating_add(quantity),
            None => self.requirements.push(Requirement {
                ingredient,
                quantity,
            }),
        }
        self
    }

    /// Adds a requirement on a known material.
    #[must_use]
    pub fn requires(self, material: Material, quantity: u32) -> Self {
        self.requirement(Ingredient::Resolved(material), quantity)
    }

    /// Adds a requirement on a material known only by id.
    #[must_use]
    pub fn requires_unresolved(self, id: MaterialId, quantity: u32) -> Self {
        self.requirement(Ingredient::Unresolved(id), quantity)
    }

    /// Builds the recipe.
    pub fn build(self) -> RecipeResult<Recipe> {
        if self.name.trim().is_empty() {
            return Err(RecipeError::EmptyName);
        }
        Ok(Recipe {
            name: self.name,
            success_rate: self.success_rate,
            requirements: self.requirements,
        })
    }
}
