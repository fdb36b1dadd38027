use serde::{Deserialize, Serialize};

use fruitshop_core::{Entity, Money};

use crate::catalog::CatalogEntry;

/// A stocked item. Identified by its name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    name: String,
    icon: Option<String>,
    price: Money,
    stock: u32,
    unit: String,
}

impl Item {
    pub fn new(name: impl Into<String>, price: Money, stock: u32, unit: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            icon: None,
            price,
            stock,
            unit: unit.into(),
        }
    }

    pub fn with_icon(mut self, icon: impl Into<String>) -> Self {
        self.icon = Some(icon.into());
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Selection label, e.g. `"🍎 Apple"`.
    pub fn label(&self) -> String {
        match &self.icon {
            Some(icon) => format!("{icon} {}", self.name),
            None => self.name.clone(),
        }
    }

    pub fn price(&self) -> Money {
        self.price
    }

    pub fn stock(&self) -> u32 {
        self.stock
    }

    pub fn unit(&self) -> &str {
        &self.unit
    }

    pub(crate) fn set_stock(&mut self, stock: u32) {
        self.stock = stock;
    }
}

impl Entity for Item {
    type Id = String;

    fn id(&self) -> &Self::Id {
        &self.name
    }
}

impl From<&CatalogEntry> for Item {
    fn from(entry: &CatalogEntry) -> Self {
        Self {
            name: entry.name.clone(),
            icon: entry.icon.clone(),
            price: entry.price,
            stock: entry.stock,
            unit: entry.unit.clone(),
        }
    }
}
