//! A crafting session.
//!
//! A session owns the inventory and the crafter built from a
//! [`SimConfig`]. Every mutating call takes `&mut self`, so the
//! validate-then-consume craft transaction never interleaves with a load or
//! another craft. Callers sharing a session across threads wrap it in a
//! lock.

use craftsim_common::LoadError;
use craftsim_gameplay::{CraftOutcome, Crafter, Inventory, LoadReport, OutcomeRoll};
use thiserror::Error;
use tracing::info;

use crate::config::SimConfig;
use crate::sources::FileSource;

/// Session startup errors.
#[derive(Debug, Error)]
pub enum SessionError {
    /// The materials file could not be loaded
    #[error("Failed to load materials: {0}")]
    Materials(#[from] LoadError),
}

/// Result type for session operations.
pub type SessionResult<T> = Result<T, SessionError>;

/// Inventory and crafter loaded from configuration.
#[derive(Debug)]
pub struct Session<R = fastrand::Rng> {
    config: SimConfig,
    inventory: Inventory,
    crafter: Crafter<R>,
}

impl Session {
    /// Starts a session, seeding outcomes from `config.seed` when set.
    pub fn start(config: SimConfig) -> SessionResult<Self> {
        let crafter = match config.seed {
            Some(seed) => Crafter::with_seed(seed),
            None => Crafter::new(),
        };
        Self::with_crafter(config, crafter)
    }
}

impl<R: OutcomeRoll> Session<R> {
    /// Starts a session around an existing crafter.
    ///
    /// Materials load first so recipes can resolve their ingredients.
    pub fn with_crafter(config: SimConfig, crafter: Crafter<R>) -> SessionResult<Self> {
        let mut inventory = Inventory::new();
        inventory.load_materials(&FileSource::new(&config.materials_path))?;

        let mut session = Self {
            config,
            inventory,
            crafter,
        };
        session.reload_recipes();
        Ok(session)
    }

    /// Reloads every configured recipe file, replacing the recipe list.
    pub fn reload_recipes(&mut self) -> LoadReport {
        let sources = FileSource::all(self.config.recipe_sources());
        self.crafter.load_recipes(&sources, &self.inventory)
    }

    /// Crafts the named recipe against the session inventory.
    pub fn craft(&mut self, recipe: &str) -> CraftOutcome {
        let outcome = self.crafter.craft_item(recipe, &mut self.inventory);
        info!(recipe, success = outcome.is_success(), "{}", outcome);
        outcome
    }

    /// Returns the configuration the session was started with.
    #[must_use]
    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    /// Returns the inventory.
    #[must_use]
    pub fn inventory(&self) -> &Inventory {
        &self.inventory
    }

    /// Returns the inventory for direct edits.
    pub fn inventory_mut(&mut self) -> &mut Inventory {
        &mut self.inventory
    }

    /// Returns the crafter.
    #[must_use]
    pub fn crafter(&self) -> &Crafter<R> {
        &self.crafter
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use craftsim_common::MaterialId;
    use craftsim_gameplay::FixedRoll;
    use std::fs;
    use std::path::Path;
    use tempfile::TempDir;

    fn write(path: &Path, contents: &str) {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("Failed to create dir");
        }
        fs::write(path, contents).expect("Failed to write file");
    }

    fn workshop(dir: &Path) -> SimConfig {
        write(&dir.join("materials.txt"), "1,Wood,5\n2,Iron,1\n3,Wood,2\n");
        write(&dir.join("recipes/axe.txt"), "Axe,1.0\n1,3\n");
        write(&dir.join("recipes/sword.txt"), "Sword,1.0\n2,2\n");
        write(&dir.join("recipes/broken.txt"), "Broken\n");

        SimConfig {
            materials_path: dir.join("materials.txt"),
            recipe_dir: Some(dir.join("recipes")),
            seed: Some(9),
            ..SimConfig::default()
        }
    }

    #[test]
    fn test_start_loads_materials_and_recipes() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let session = Session::start(workshop(temp_dir.path())).expect("session starts");

        assert_eq!(session.inventory().quantity_of_id(MaterialId::new(1)), 7);
        let names: Vec<&str> = session
            .crafter()
            .recipes()
            .iter()
            .map(|recipe| recipe.name())
            .collect();
        assert_eq!(names, vec!["Axe", "Sword"]);
    }

    #[test]
    fn test_craft_through_session() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let config = workshop(temp_dir.path());
        let mut session =
            Session::with_crafter(config, Crafter::with_roll(FixedRoll(0.0))).expect("session starts");

        assert_eq!(session.craft("axe").to_string(), "Crafting 'Axe' succeeded!");
        assert_eq!(session.inventory().quantity_of_id(MaterialId::new(1)), 4);

        assert_eq!(
            session.craft("Sword").to_string(),
            "Not enough Iron (need 2, have 1)"
        );
        assert_eq!(session.craft("Shield"), CraftOutcome::RecipeNotFound);
    }

    #[test]
    fn test_reload_picks_up_new_files() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let mut session = Session::start(workshop(temp_dir.path())).expect("session starts");
        assert_eq!(session.crafter().recipe_count(), 2);

        write(&temp_dir.path().join("recipes/bow.txt"), "Bow,0.5\n1,2\n");
        let report = session.reload_recipes();

        assert_eq!(report, LoadReport { applied: 3, skipped: 1 });
        assert!(session.crafter().recipe("bow").is_some());
    }

    #[test]
    fn test_missing_materials_file() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let config = SimConfig {
            materials_path: temp_dir.path().join("missing.txt"),
            recipe_dir: None,
            ..SimConfig::default()
        };

        assert!(matches!(
            Session::start(config),
            Err(SessionError::Materials(LoadError::SourceNotFound(_)))
        ));
    }

    #[test]
    fn test_blank_material_name_stops_start() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let mut config = workshop(temp_dir.path());
        write(&config.materials_path, "1,Wood,5\n2,  ,1\n");
        config.recipe_dir = None;

        assert!(matches!(
            Session::start(config),
            Err(SessionError::Materials(LoadError::InvalidMaterial(_)))
        ));
    }
}
