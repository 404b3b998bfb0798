//! Inventory system.
//!
//! The inventory keeps one canonical entry per material. A material given
//! to any operation is matched against the canonical entries by id first,
//! then by case-insensitive name, so `(1, "Wood")` and `(1, "Plank")` or
//! `(1, "Wood")` and `(9, "WOOD")` all land on the same entry. Two indexes
//! back that lookup: entries are keyed by canonical id, and a second map
//! goes from folded name to canonical id. Both stay unique because an
//! incoming material that matches either one is merged instead of inserted.

use std::collections::HashMap;

use craftsim_common::{
    name_key, placeholder_name, LoadError, LoadResult, Material, MaterialId,
};
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::records::{is_blank, parse_material_record, LoadReport, RecordSource};

/// Inventory error types.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InventoryError {
    /// Not enough of a material
    #[error("Not enough {name}: need {needed}, have {have}")]
    Insufficient {
        /// Material name
        name: String,
        /// Amount needed
        needed: u32,
        /// Amount available
        have: u32,
    },
    /// Zero quantity requested
    #[error("Invalid quantity for {name}")]
    InvalidQuantity {
        /// Material name
        name: String,
    },
}

/// Result type for inventory operations.
pub type InventoryResult<T> = Result<T, InventoryError>;

#[derive(Debug, Clone)]
struct Stock {
    material: Material,
    quantity: u32,
}

/// The material ledger.
#[derive(Debug, Clone, Default)]
pub struct Inventory {
    /// Canonical entries by id
    stock: HashMap<MaterialId, Stock>,
    /// Folded name -> canonical id
    names: HashMap<String, MaterialId>,
}

impl Inventory {
    /// Creates an empty inventory.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of distinct materials held.
    #[must_use]
    pub fn len(&self) -> usize {
        self.stock.len()
    }

    /// Returns true if nothing is held.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.stock.is_empty()
    }

    /// Returns the canonical id of the entry equivalent to `material`.
    ///
    /// The id is matched first, then the name ignoring case.
    #[must_use]
    pub fn resolve(&self, material: &Material) -> Option<MaterialId> {
        if self.stock.contains_key(&material.id()) {
            return Some(material.id());
        }
        self.names.get(&name_key(material.name())).copied()
    }

    /// Returns the quantity held of an equivalent material, or 0.
    #[must_use]
    pub fn quantity(&self, material: &Material) -> u32 {
        self.resolve(material)
            .map_or(0, |id| self.quantity_of_id(id))
    }

    /// Returns the quantity held under a canonical id, or 0.
    #[must_use]
    pub fn quantity_of_id(&self, id: MaterialId) -> u32 {
        self.stock.get(&id).map_or(0, |stock| stock.quantity)
    }

    /// Returns the canonical material stored under `id`.
    #[must_use]
    pub fn material(&self, id: MaterialId) -> Option<&Material> {
        self.stock.get(&id).map(|stock| &stock.material)
    }

    /// Adds to an equivalent entry, or inserts the material as a new one.
    ///
    /// A zero quantity is ignored. Quantities saturate at `u32::MAX`.
    pub fn add_material(&mut self, material: &Material, quantity: u32) {
        if quantity == 0 {
            return;
        }

        if let Some(id) = self.resolve(material) {
            if let Some(stock) = self.stock.get_mut(&id) {
                stock.quantity = stock.quantity.saturating_add(quantity);
            }
            return;
        }

        self.names.insert(name_key(material.name()), material.id());
        self.stock.insert(
            material.id(),
            Stock {
                material: material.clone(),
                quantity,
            },
        );
    }

    /// Removes from an equivalent entry.
    ///
    /// Returns false, leaving the inventory untouched, when the quantity is
    /// zero or more than is held.
    pub fn remove_material(&mut self, material: &Material, quantity: u32) -> bool {
        if quantity == 0 {
            return false;
        }
        match self.resolve(material) {
            Some(id) if self.quantity_of_id(id) >= quantity => {
                self.take(id, quantity);
                true
            },
            _ => false,
        }
    }

    /// Removes several materials as one transaction.
    ///
    /// Every request is resolved and checked before anything is removed;
    /// requests that resolve to the same entry are summed. On error the
    /// inventory is unchanged.
    pub fn remove_batch(&mut self, requests: &[(&Material, u32)]) -> InventoryResult<()> {
        let mut resolved = Vec::with_capacity(requests.len());
        for &(material, quantity) in requests {
            if quantity == 0 {
                return Err(InventoryError::InvalidQuantity {
                    name: material.name().to_string(),
                });
            }
            let Some(id) = self.resolve(material) else {
                return Err(InventoryError::Insufficient {
                    name: material.name().to_string(),
                    needed: quantity,
                    have: 0,
                });
            };
            resolved.push((id, quantity));
        }
        self.remove_batch_by_id(&resolved)
    }

    /// Removes several canonical entries as one transaction.
    ///
    /// Ids are matched exactly, never by name. Requests for the same id are
    /// summed. On error the inventory is unchanged.
    pub fn remove_batch_by_id(&mut self, requests: &[(MaterialId, u32)]) -> InventoryResult<()> {
        let mut staged: Vec<(MaterialId, u32)> = Vec::with_capacity(requests.len());

        for &(id, quantity) in requests {
            if quantity == 0 {
                return Err(InventoryError::InvalidQuantity {
                    name: self.display_name(id),
                });
            }
            match staged.iter_mut().find(|(staged_id, _)| *staged_id == id) {
                Some((_, total)) => *total = total.saturating_add(quantity),
                None => staged.push((id, quantity)),
            }
        }

        for &(id, needed) in &staged {
            let have = self.quantity_of_id(id);
            if have < needed {
                return Err(InventoryError::Insufficient {
                    name: self.display_name(id),
                    needed,
                    have,
                });
            }
        }

        for (id, quantity) in staged {
            self.take(id, quantity);
        }
        Ok(())
    }

    fn display_name(&self, id: MaterialId) -> String {
        self.material(id)
            .map_or_else(|| placeholder_name(id), |m| m.name().to_string())
    }

    /// Decrements a canonical entry known to hold at least `quantity`.
    fn take(&mut self, id: MaterialId, quantity: u32) {
        let Some(stock) = self.stock.get_mut(&id) else {
            return;
        };
        stock.quantity -= quantity;
        if stock.quantity == 0 {
            let key = name_key(stock.material.name());
            self.stock.remove(&id);
            self.names.remove(&key);
        }
    }

    /// Returns an iterator over the canonical materials.
    pub fn materials(&self) -> impl Iterator<Item = &Material> + '_ {
        self.stock.values().map(|stock| &stock.material)
    }

    /// Returns an iterator over all materials and their quantities.
    pub fn iter(&self) -> impl Iterator<Item = (&Material, u32)> + '_ {
        self.stock
            .values()
            .map(|stock| (&stock.material, stock.quantity))
    }

    /// Returns every entry, ordered by material id.
    #[must_use]
    pub fn snapshot(&self) -> Vec<(Material, u32)> {
        let mut entries: Vec<_> = self
            .iter()
            .map(|(material, quantity)| (material.clone(), quantity))
            .collect();
        entries.sort_by_key(|(material, _)| material.id());
        entries
    }

    /// Loads `id,name,quantity` records and adds each one.
    ///
    /// Malformed records are skipped. Fails if the source is missing or
    /// unreadable, or if a record names a material with a blank name.
    /// Records applied before the invalid one stay in the inventory.
    pub fn load_materials<S: RecordSource>(&mut self, source: &S) -> LoadResult<LoadReport> {
        if !source.exists() {
            return Err(LoadError::SourceNotFound(source.describe()));
        }

        let records = source.read_records()?;
        let mut report = LoadReport::default();

        for (line, record) in records.iter().enumerate() {
            if is_blank(record) {
                continue;
            }

            let Some(parsed) = parse_material_record(record) else {
                debug!("Skipping malformed material record {}: {:?}", line + 1, record);
                report.skipped += 1;
                continue;
            };

            let material = Material::new(parsed.id, parsed.name).map_err(|e| {
                warn!("Material record {} in {} is invalid: {}", line + 1, source.describe(), e);
                e
            })?;

            let quantity = match u32::try_from(parsed.quantity) {
                Ok(quantity) if quantity > 0 => quantity,
                _ => {
                    debug!(
                        "Skipping material record {} with quantity {}",
                        line + 1,
                        parsed.quantity
                    );
                    report.skipped += 1;
                    continue;
                },
            };

            self.add_material(&material, quantity);
            report.applied += 1;
        }

        info!(
            "Loaded {} material records from {} ({} skipped)",
            report.applied,
            source.describe(),
            report.skipped
        );
        Ok(report)
    }
}
