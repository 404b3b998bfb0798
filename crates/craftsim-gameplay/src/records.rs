//! Record sources and record parsing.
//!
//! A record source supplies an ordered list of text records, one per line
//! of the underlying storage. Records are comma separated; each field is
//! trimmed before it is parsed.

use std::io;

use craftsim_common::MaterialId;

/// Supplier of ordered text records.
pub trait RecordSource {
    /// Human readable description used in logs and errors.
    fn describe(&self) -> String;

    /// Returns true if the source exists.
    fn exists(&self) -> bool;

    /// Reads every record in order.
    fn read_records(&self) -> io::Result<Vec<String>>;
}

impl<S: RecordSource + ?Sized> RecordSource for &S {
    fn describe(&self) -> String {
        (**self).describe()
    }

    fn exists(&self) -> bool {
        (**self).exists()
    }

    fn read_records(&self) -> io::Result<Vec<String>> {
        (**self).read_records()
    }
}

/// In-memory record source.
#[derive(Debug, Clone, Default)]
pub struct MemorySource {
    label: String,
    records: Option<Vec<String>>,
}

impl MemorySource {
    /// Creates a source holding the given records.
    #[must_use]
    pub fn new<I, T>(label: impl Into<String>, records: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        Self {
            label: label.into(),
            records: Some(records.into_iter().map(Into::into).collect()),
        }
    }

    /// Creates a source that reports itself as missing.
    #[must_use]
    pub fn missing(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            records: None,
        }
    }

    /// Splits text into records, one per line.
    #[must_use]
    pub fn from_text(label: impl Into<String>, text: &str) -> Self {
        Self::new(label, text.lines())
    }
}

impl RecordSource for MemorySource {
    fn describe(&self) -> String {
        self.label.clone()
    }

    fn exists(&self) -> bool {
        self.records.is_some()
    }

    fn read_records(&self) -> io::Result<Vec<String>> {
        self.records.clone().ok_or_else(|| {
            io::Error::new(
                io::ErrorKind::NotFound,
                format!("{} does not exist", self.label),
            )
        })
    }
}

/// Counters reported by bulk loads.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LoadReport {
    /// Records (or recipe sources) that were applied
    pub applied: u32,
    /// Records (or recipe sources) that were skipped
    pub skipped: u32,
}

/// Returns true if a record holds nothing but whitespace.
#[must_use]
pub fn is_blank(record: &str) -> bool {
    record.trim().is_empty()
}

/// Splits a record into trimmed fields.
#[must_use]
pub fn fields(record: &str) -> Vec<&str> {
    record.split(',').map(str::trim).collect()
}

/// A parsed `id,name,quantity` material record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MaterialRecord<'a> {
    /// Material id
    pub id: MaterialId,
    /// Material name, trimmed
    pub name: &'a str,
    /// Quantity on hand, possibly non-positive
    pub quantity: i64,
}

/// Parses a material record, or `None` when it is malformed.
#[must_use]
pub fn parse_material_record(record: &str) -> Option<MaterialRecord<'_>> {
    let fields = fields(record);
    let [id, name, quantity] = fields.as_slice() else {
        return None;
    };
    Some(MaterialRecord {
        id: MaterialId::new(id.parse().ok()?),
        name: *name,
        quantity: quantity.parse().ok()?,
    })
}

/// Parses a recipe header `name,successRate`.
#[must_use]
pub fn parse_recipe_header(record: &str) -> Option<(&str, f64)> {
    let fields = fields(record);
    let [name, rate] = fields.as_slice() else {
        return None;
    };
    let rate: f64 = rate.parse().ok()?;
    if name.is_empty() {
        return None;
    }
    Some((*name, rate))
}

/// Parses a recipe requirement `materialId,quantity`.
///
/// Requirements must ask for a positive quantity.
#[must_use]
pub fn parse_requirement(record: &str) -> Option<(MaterialId, u32)> {
    let fields = fields(record);
    let [id, quantity] = fields.as_slice() else {
        return None;
    };
    let id = MaterialId::new(id.parse().ok()?);
    let quantity: u32 = quantity.parse().ok()?;
    (quantity > 0).then_some((id, quantity))
}
