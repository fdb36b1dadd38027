use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use fruitshop_core::{DomainError, DomainResult, Money};

/// One configured item: its name, starting price, starting stock and unit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogEntry {
    pub name: String,
    pub price: Money,
    pub stock: u32,
    pub unit: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
}

impl CatalogEntry {
    pub fn new(name: impl Into<String>, price: Money, stock: u32, unit: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            price,
            stock,
            unit: unit.into(),
            icon: None,
        }
    }

    pub fn with_icon(mut self, icon: impl Into<String>) -> Self {
        self.icon = Some(icon.into());
        self
    }
}

/// The starting state an `InventoryStore` is seeded (and re-seeded) from.
///
/// Invariants: at least one entry, names are non-blank and unique.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<CatalogEntry>", into = "Vec<CatalogEntry>")]
pub struct Catalog {
    entries: Vec<CatalogEntry>,
}

impl Catalog {
    pub fn new(entries: Vec<CatalogEntry>) -> DomainResult<Self> {
        if entries.is_empty() {
            return Err(DomainError::invalid_value("catalog must contain at least one item"));
        }

        let mut seen = HashSet::new();
        for entry in &entries {
            if entry.name.trim().is_empty() {
                return Err(DomainError::invalid_value("catalog item name cannot be empty"));
            }
            if !seen.insert(entry.name.as_str()) {
                return Err(DomainError::invalid_value(format!(
                    "duplicate catalog item: {}",
                    entry.name
                )));
            }
        }

        Ok(Self { entries })
    }

    /// The shop's built-in produce list.
    pub fn fruit_shop() -> Self {
        Self {
            entries: vec![
                CatalogEntry::new("Apple", Money::from_rupees(50), 10, "KG").with_icon("🍎"),
                CatalogEntry::new("Banana", Money::from_rupees(10), 25, "Dozen").with_icon("🍌"),
                CatalogEntry::new("Orange", Money::from_rupees(30), 15, "KG").with_icon("🍊"),
                CatalogEntry::new("Mango", Money::from_rupees(60), 8, "KG").with_icon("🥭"),
                CatalogEntry::new("Grapes", Money::from_rupees(40), 12, "KG").with_icon("🍇"),
            ],
        }
    }

    pub fn entries(&self) -> &[CatalogEntry] {
        &self.entries
    }

    pub fn get(&self, name: &str) -> Option<&CatalogEntry> {
        self.entries.iter().find(|e| e.name == name)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::fruit_shop()
    }
}

impl TryFrom<Vec<CatalogEntry>> for Catalog {
    type Error = DomainError;

    fn try_from(entries: Vec<CatalogEntry>) -> Result<Self, Self::Error> {
        Catalog::new(entries)
    }
}

impl From<Catalog> for Vec<CatalogEntry> {
    fn from(catalog: Catalog) -> Self {
        catalog.entries
    }
}
