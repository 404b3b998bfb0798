//! Error types shared across the crafting simulation.

use thiserror::Error;

/// Material construction errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MaterialError {
    /// Name was empty or whitespace
    #[error("Material {id} has an empty name")]
    InvalidName {
        /// Id the material was being created with
        id: i32,
    },
}

/// Result type for material construction.
pub type MaterialResult<T> = Result<T, MaterialError>;

/// Bulk-load errors.
///
/// Only failures that stop a whole load are reported here; malformed
/// individual records are skipped by the loaders. A record that parses but
/// names an invalid material stops the load.
#[derive(Debug, Error)]
pub enum LoadError {
    /// The record source does not exist
    #[error("Record source not found: {0}")]
    SourceNotFound(String),

    /// The record source exists but could not be read
    #[error("Failed to read record source: {0}")]
    Io(#[from] std::io::Error),

    /// A record named a material that could not be constructed
    #[error("Invalid material record: {0}")]
    InvalidMaterial(#[from] MaterialError),
}

/// Result type for bulk loads.
pub type LoadResult<T> = Result<T, LoadError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = MaterialError::InvalidName { id: 4 };
        assert_eq!(err.to_string(), "Material 4 has an empty name");

        let err = LoadError::SourceNotFound("materials.txt".to_string());
        assert_eq!(err.to_string(), "Record source not found: materials.txt");

        let err = LoadError::from(MaterialError::InvalidName { id: 2 });
        assert_eq!(err.to_string(), "Invalid material record: Material 2 has an empty name");
    }

    #[test]
    fn test_io_error_converts() {
        fn read() -> LoadResult<String> {
            let contents = std::fs::read_to_string("/nonexistent/craftsim/materials.txt")?;
            Ok(contents)
        }

        assert!(matches!(read(), Err(LoadError::Io(_))));
    }
}
