//! Simulation configuration.
//!
//! Names the record files a session loads, the random seed, and the log
//! filter. Configuration can be loaded from and saved to a TOML file.

use serde::{Deserialize, Serialize};
use std::fs;
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Configuration file name.
const CONFIG_FILE: &str = "craftsim.toml";

/// Log filter used when none is configured.
pub const DEFAULT_LOG_FILTER: &str = "craftsim=info";

/// Simulation configuration parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    // === Data ===
    /// Materials file (`id,name,quantity` per line)
    pub materials_path: PathBuf,
    /// Recipe files loaded before the directory scan
    pub recipe_paths: Vec<PathBuf>,
    /// Directory scanned for recipe files
    pub recipe_dir: Option<PathBuf>,
    /// Extension of recipe files in `recipe_dir`
    pub recipe_extension: String,

    // === Crafting ===
    /// Seed for craft outcomes (None = random)
    pub seed: Option<u64>,

    // === Logging ===
    /// `tracing` filter directive
    pub log_filter: String,
    /// Emit JSON log lines
    pub log_json: bool,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            materials_path: PathBuf::from("data/materials.txt"),
            recipe_paths: Vec::new(),
            recipe_dir: Some(PathBuf::from("data/recipes")),
            recipe_extension: "txt".to_string(),

            seed: None,

            log_filter: DEFAULT_LOG_FILTER.to_string(),
            log_json: false,
        }
    }
}

impl SimConfig {
    /// Load configuration from the default file location.
    /// Returns default config if file doesn't exist.
    pub fn load() -> Self {
        Self::load_from(CONFIG_FILE)
    }

    /// Load configuration from a specific path.
    /// Returns default config if file doesn't exist or is invalid.
    pub fn load_from<P: AsRef<Path>>(path: P) -> Self {
        let path = path.as_ref();

        if !path.exists() {
            info!("Config file not found, using defaults");
            return Self::default();
        }

        match fs::File::open(path) {
            Ok(mut file) => {
                let mut contents = String::new();
                if let Err(e) = file.read_to_string(&mut contents) {
                    warn!("Failed to read config file: {e}");
                    return Self::default();
                }

                match toml::from_str::<Self>(&contents) {
                    Ok(mut config) => {
                        config.validate();
                        info!("Loaded config from {}", path.display());
                        config
                    },
                    Err(e) => {
                        warn!("Failed to parse config file: {e}");
                        Self::default()
                    },
                }
            },
            Err(e) => {
                warn!("Failed to open config file: {e}");
                Self::default()
            },
        }
    }

    /// Save configuration to the default file location.
    pub fn save(&self) -> io::Result<()> {
        self.save_to(CONFIG_FILE)
    }

    /// Save configuration to a specific path.
    pub fn save_to<P: AsRef<Path>>(&self, path: P) -> io::Result<()> {
        let path = path.as_ref();

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let contents = toml::to_string_pretty(self)
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;

        let mut file = fs::File::create(path)?;
        file.write_all(contents.as_bytes())?;

        info!("Saved config to {}", path.display());
        Ok(())
    }

    /// Normalize values that would otherwise be silently ignored.
    pub fn validate(&mut self) {
        let extension = self.recipe_extension.trim().trim_start_matches('.');
        self.recipe_extension = if extension.is_empty() {
            "txt".to_string()
        } else {
            extension.to_string()
        };

        if self.log_filter.trim().is_empty() {
            self.log_filter = DEFAULT_LOG_FILTER.to_string();
        }
    }

    /// Lists recipe files: explicit paths first, then the directory scan
    /// sorted by path.
    #[must_use]
    pub fn recipe_sources(&self) -> Vec<PathBuf> {
        let mut paths = self.recipe_paths.clone();

        let Some(dir) = &self.recipe_dir else {
            return paths;
        };

        let entries = match fs::read_dir(dir) {
            Ok(entries) => entries,
            Err(e) => {
                warn!("Failed to scan recipe directory {}: {e}", dir.display());
                return paths;
            },
        };

        let mut found: Vec<PathBuf> = entries
            .flatten()
            .map(|entry| entry.path())
            .filter(|path| {
                path.is_file()
                    && path
                        .extension()
                        .is_some_and(|ext| ext == self.recipe_extension.as_str())
            })
            .collect();
        found.sort();
        paths.extend(found);
        paths
    }
}
