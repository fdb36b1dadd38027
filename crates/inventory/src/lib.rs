//! Inventory domain module.
//!
//! Holds the shop's item catalog and the live stock levels derived from it.
//! Pure domain logic: no IO, no persistence.

pub mod catalog;
pub mod item;
pub mod store;

pub use catalog::{Catalog, CatalogEntry};
pub use item::Item;
pub use store::{DisplayEntry, InventoryStore};
