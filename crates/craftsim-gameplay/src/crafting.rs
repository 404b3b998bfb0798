//! Crafting system.
//!
//! A [`Crafter`] holds the loaded recipes and a random source. Crafting an
//! item runs as one transaction against an [`Inventory`]:
//!
//! 1. Look the recipe up by name, ignoring case.
//! 2. Check every requirement against the inventory without touching it.
//! 3. Remove all required materials in a single batch.
//! 4. Roll against the recipe's success rate.
//!
//! Materials are consumed whether the roll succeeds or not.

use std::fmt;

use craftsim_common::MaterialId;
use tracing::{debug, info, warn};

use crate::inventory::Inventory;
use crate::recipes::{Ingredient, Recipe};
use crate::records::{is_blank, parse_recipe_header, parse_requirement, LoadReport, RecordSource};
use crate::roll::OutcomeRoll;

/// Result of a craft attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CraftOutcome {
    /// No recipe has the requested name
    RecipeNotFound,
    /// A required material is not held at all
    MissingMaterial {
        /// Material name
        material: String,
    },
    /// A required material is held, but not enough of it
    NotEnough {
        /// Material name
        material: String,
        /// Quantity the recipe needs
        needed: u32,
        /// Quantity held
        have: u32,
    },
    /// Materials could not be removed as a batch
    InsufficientMaterials,
    /// Materials consumed, craft succeeded
    Succeeded {
        /// Recipe name
        recipe: String,
    },
    /// Materials consumed, craft failed
    Failed {
        /// Recipe name
        recipe: String,
    },
}

impl CraftOutcome {
    /// Returns true if the item was crafted.
    #[must_use]
    pub const fn is_success(&self) -> bool {
        matches!(self, Self::Succeeded { .. })
    }

    /// Returns true if materials were taken from the inventory.
    #[must_use]
    pub const fn consumed_materials(&self) -> bool {
        matches!(self, Self::Succeeded { .. } | Self::Failed { .. })
    }
}

impl fmt::Display for CraftOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::RecipeNotFound => f.write_str("Recipe not found."),
            Self::MissingMaterial { material } => write!(f, "Missing material: {material}"),
            Self::NotEnough {
                material,
                needed,
                have,
            } => write!(f, "Not enough {material} (need {needed}, have {have})"),
            Self::InsufficientMaterials => f.write_str("Not enough materials"),
            Self::Succeeded { recipe } => write!(f, "Crafting '{recipe}' succeeded!"),
            Self::Failed { recipe } => write!(f, "Crafting '{recipe}' failed. Materials lost."),
        }
    }
}

/// Finds the inventory entry an ingredient draws from.
///
/// Resolved ingredients match by id or name; unresolved ones by id only.
fn stock_id(ingredient: &Ingredient, inventory: &Inventory) -> Option<MaterialId> {
    match ingredient {
        Ingredient::Resolved(material) => inventory.resolve(material),
        Ingredient::Unresolved(id) => inventory.material(*id).map(|_| *id),
    }
}

/// Checks every requirement of a recipe, in order.
///
/// Returns the outcome for the first requirement that is short.
fn check_requirements(recipe: &Recipe, inventory: &Inventory) -> Option<CraftOutcome> {
    recipe.requirements().iter().find_map(|req| {
        let have = stock_id(&req.ingredient, inventory)
            .map_or(0, |id| inventory.quantity_of_id(id));
        if have >= req.quantity {
            return None;
        }
        let material = req.ingredient.name().into_owned();
        Some(if have == 0 {
            CraftOutcome::MissingMaterial { material }
        } else {
            CraftOutcome::NotEnough {
                material,
                needed: req.quantity,
                have,
            }
        })
    })
}

/// Recipe book and craft executor.
#[derive(Debug)]
pub struct Crafter<R = fastrand::Rng> {
    /// Recipes sorted by name, ignoring case
    recipes: Vec<Recipe>,
    /// Random source for outcomes
    roll: R,
}

impl Crafter {
    /// Creates a crafter with an entropy-seeded random source.
    #[must_use]
    pub fn new() -> Self {
        Self::with_roll(fastrand::Rng::new())
    }

    /// Creates a crafter whose outcomes are reproducible.
    #[must_use]
    pub fn with_seed(seed: u64) -> Self {
        Self::with_roll(fastrand::Rng::with_seed(seed))
    }
}

impl Default for Crafter {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: OutcomeRoll> Crafter<R> {
    /// Creates a crafter using the given random source.
    #[must_use]
    pub fn with_roll(roll: R) -> Self {
        Self {
            recipes: Vec::new(),
            roll,
        }
    }

    /// Returns the loaded recipes, sorted by name.
    #[must_use]
    pub fn recipes(&self) -> &[Recipe] {
        &self.recipes
    }

    /// Returns the number of loaded recipes.
    #[must_use]
    pub fn recipe_count(&self) -> usize {
        self.recipes.len()
    }

    /// Finds a recipe by name, ignoring case. The first match wins.
    #[must_use]
    pub fn recipe(&self, name: &str) -> Option<&Recipe> {
        self.recipes.iter().find(|recipe| recipe.is_named(name))
    }

    /// Replaces the recipe list with the given recipes, sorted by name.
    ///
    /// Names are compared uppercased, so `aB` sorts before `a_b`. Recipes
    /// with the same name keep their relative order.
    pub fn set_recipes(&mut self, mut recipes: Vec<Recipe>) {
        recipes.sort_by_cached_key(|recipe| recipe.name().to_uppercase());
        self.recipes = recipes;
    }

    /// Loads one recipe per source, replacing the current list.
    ///
    /// Ingredients are resolved against `inventory` by id; ids it does not
    /// hold become [`Ingredient::Unresolved`]. Sources that are missing,
    /// too short, or have a bad header are skipped.
    pub fn load_recipes<S: RecordSource>(
        &mut self,
        sources: &[S],
        inventory: &Inventory,
    ) -> LoadReport {
        let mut report = LoadReport::default();
        let mut recipes = Vec::with_capacity(sources.len());

        for source in sources {
            match read_recipe(source, inventory) {
                Some(recipe) => {
                    recipes.push(recipe);
                    report.applied += 1;
                },
                None => report.skipped += 1,
            }
        }

        self.set_recipes(recipes);
        info!(
            "Loaded {} recipes from {} sources ({} skipped)",
            report.applied,
            sources.len(),
            report.skipped
        );
        report
    }

    /// Looks up a recipe and checks its requirements without side effects.
    ///
    /// Returns the recipe if it can be crafted now, or the outcome a craft
    /// attempt would report.
    pub fn validate(&self, name: &str, inventory: &Inventory) -> Result<&Recipe, CraftOutcome> {
        let recipe = self.recipe(name).ok_or(CraftOutcome::RecipeNotFound)?;
        match check_requirements(recipe, inventory) {
            Some(outcome) => Err(outcome),
            None => Ok(recipe),
        }
    }

    /// Returns the recipes whose requirements are currently met.
    pub fn craftable_recipes<'a>(
        &'a self,
        inventory: &'a Inventory,
    ) -> impl Iterator<Item = &'a Recipe> {
        self.recipes
            .iter()
            .filter(move |recipe| check_requirements(recipe, inventory).is_none())
    }

    /// Attempts to craft the named recipe.
    pub fn craft_item(&mut self, name: &str, inventory: &mut Inventory) -> CraftOutcome {
        let (recipe_name, success_rate) = {
            let recipe = match self.validate(name, inventory) {
                Ok(recipe) => recipe,
                Err(outcome) => {
                    debug!("Craft of {:?} rejected: {}", name, outcome);
                    return outcome;
                },
            };

            let requests: Option<Vec<(MaterialId, u32)>> = recipe
                .requirements()
                .iter()
                .map(|req| Some((stock_id(&req.ingredient, inventory)?, req.quantity)))
                .collect();
            let Some(requests) = requests else {
                warn!("Craft of {:?} lost track of an ingredient", recipe.name());
                return CraftOutcome::InsufficientMaterials;
            };

            if let Err(e) = inventory.remove_batch_by_id(&requests) {
                warn!("Craft of {:?} could not consume materials: {}", recipe.name(), e);
                return CraftOutcome::InsufficientMaterials;
            }

            (recipe.name().to_string(), recipe.success_rate())
        };

        let outcome = if self.roll.roll() < success_rate {
            CraftOutcome::Succeeded {
                recipe: recipe_name,
            }
        } else {
            CraftOutcome::Failed {
                recipe: recipe_name,
            }
        };
        debug!("{}", outcome);
        outcome
    }
}

/// Reads a single recipe source.
fn read_recipe<S: RecordSource>(source: &S, inventory: &Inventory) -> Option<Recipe> {
    let label = source.describe();
    if !source.exists() {
        warn!("Recipe source not found: {}", label);
        return None;
    }

    let records = match source.read_records() {
        Ok(records) => records,
        Err(e) => {
            warn!("Failed to read recipe source {}: {}", label, e);
            return None;
        },
    };

    if records.len() < 2 {
        warn!("Recipe source {} has no requirements", label);
        return None;
    }

    let Some((name, success_rate)) = parse_recipe_header(&records[0]) else {
        warn!("Recipe source {} has a malformed header: {:?}", label, records[0]);
        return None;
    };

    let mut builder = Recipe::builder(name, success_rate);
    for (line, record) in records.iter().enumerate().skip(1) {
        if is_blank(record) {
            continue;
        }
        let Some((id, quantity)) = parse_requirement(record) else {
            debug!("Skipping malformed requirement {} in {}: {:?}", line + 1, label, record);
            continue;
        };
        let ingredient = match inventory.material(id) {
            Some(material) => Ingredient::Resolved(material.clone()),
            None => {
                debug!("Recipe {:?} needs material {} not in inventory", name, id);
                Ingredient::Unresolved(id)
            },
        };
        builder = builder.requirement(ingredient, quantity);
    }

    match builder.build() {
        Ok(recipe) => {
            debug!("Loaded {} from {}", recipe, label);
            Some(recipe)
        },
        Err(e) => {
            warn!("Skipping recipe source {}: {}", label, e);
            None
        },
    }
}
