use core::fmt;

use fruitshop_core::{DomainError, DomainResult};

use crate::catalog::Catalog;
use crate::item::Item;

/// Live stock levels, seeded from a `Catalog`.
///
/// Items keep catalog order for display. Stock never goes negative: the only
/// mutation is a checked decrement, and `reset` re-seeds from the catalog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InventoryStore {
    catalog: Catalog,
    items: Vec<Item>,
}

/// One selectable row: `"🍎 Apple (Stock: 7 KG)"`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayEntry {
    pub name: String,
    pub label: String,
    pub stock: u32,
    pub unit: String,
}

impl fmt::Display for DisplayEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (Stock: {} {})", self.label, self.stock, self.unit)
    }
}

impl InventoryStore {
    /// Store seeded from the built-in fruit catalog.
    pub fn initialize() -> Self {
        Self::from_catalog(Catalog::fruit_shop())
    }

    pub fn from_catalog(catalog: Catalog) -> Self {
        let items = catalog.entries().iter().map(Item::from).collect();
        Self { catalog, items }
    }

    /// Discard all stock movements and re-seed from the catalog.
    pub fn reset(&mut self) {
        self.items = self.catalog.entries().iter().map(Item::from).collect();
        tracing::debug!(items = self.items.len(), "inventory reset to catalog defaults");
    }

    pub fn items(&self) -> &[Item] {
        &self.items
    }

    pub fn get(&self, name: &str) -> Option<&Item> {
        self.items.iter().find(|item| item.name() == name)
    }

    pub fn stock(&self, name: &str) -> Option<u32> {
        self.get(name).map(Item::stock)
    }

    pub fn decrement_stock(&mut self, name: &str, amount: u32) -> DomainResult<()> {
        let item = self
            .items
            .iter_mut()
            .find(|item| item.name() == name)
            .ok_or_else(|| DomainError::invalid_operation(format!("no such item: {name}")))?;

        let remaining = item.stock().checked_sub(amount).ok_or_else(|| {
            DomainError::invalid_operation(format!(
                "cannot take {amount} of {name}: only {} in stock",
                item.stock()
            ))
        })?;

        item.set_stock(remaining);
        tracing::debug!(item = name, amount, remaining, "stock decremented");
        Ok(())
    }

    pub fn list_display_entries(&self) -> Vec<DisplayEntry> {
        self.items
            .iter()
            .map(|item| DisplayEntry {
                name: item.name().to_string(),
                label: item.label(),
                stock: item.stock(),
                unit: item.unit().to_string(),
            })
            .collect()
    }
}

impl Default for InventoryStore {
    fn default() -> Self {
        Self::initialize()
    }
}
