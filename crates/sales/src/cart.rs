use serde::{Deserialize, Serialize};

use fruitshop_core::Money;
use fruitshop_inventory::InventoryStore;

use crate::pricing::{Discount, Totals};

/// Accumulated quantity of one item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartLine {
    pub item: String,
    pub quantity: u32,
}

/// Pending line items, one per item, in the order they were first added.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cart {
    lines: Vec<CartLine>,
}

impl Cart {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Quantity held for `item` (0 when absent).
    pub fn quantity(&self, item: &str) -> u32 {
        self.lines
            .iter()
            .find(|line| line.item == item)
            .map_or(0, |line| line.quantity)
    }

    /// Add `quantity` to the line for `item`, opening the line if needed.
    pub fn add(&mut self, item: &str, quantity: u32) {
        match self.lines.iter_mut().find(|line| line.item == item) {
            Some(line) => line.quantity = line.quantity.saturating_add(quantity),
            None => self.lines.push(CartLine {
                item: item.to_string(),
                quantity,
            }),
        }
    }

    pub fn clear(&mut self) {
        self.lines.clear();
    }

    /// Undiscounted sum of `price * quantity`, priced from `store`.
    ///
    /// Lines whose item is missing from the store contribute nothing.
    pub fn compute_total(&self, store: &InventoryStore) -> Money {
        self.lines
            .iter()
            .filter_map(|line| store.get(&line.item).map(|item| item.price().times(line.quantity)))
            .sum()
    }

    pub fn totals(&self, store: &InventoryStore, discount: Discount) -> Totals {
        Totals::new(self.compute_total(store), discount)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn repeated_adds_accumulate_on_one_line() {
        let mut cart = Cart::new();
        cart.add("Apple", 2);
        cart.add("Mango", 1);
        cart.add("Apple", 3);

        assert_eq!(cart.lines().len(), 2);
        assert_eq!(cart.lines()[0].item, "Apple");
        assert_eq!(cart.quantity("Apple"), 5);
        assert_eq!(cart.quantity("Mango"), 1);
        assert_eq!(cart.quantity("Grapes"), 0);
    }

    #[test]
    fn total_is_sum_of_price_times_quantity() {
        let store = InventoryStore::initialize();
        let mut cart = Cart::new();
        assert_eq!(cart.compute_total(&store), Money::ZERO);

        cart.add("Apple", 3);
        cart.add("Banana", 2);
        assert_eq!(cart.compute_total(&store), Money::from_rupees(170));
    }

    #[test]
    fn unknown_lines_are_skipped_when_pricing() {
        let store = InventoryStore::initialize();
        let mut cart = Cart::new();
        cart.add("Durian", 4);
        cart.add("Orange", 1);
        assert_eq!(cart.compute_total(&store), Money::from_rupees(30));
    }

    #[test]
    fn clear_drops_every_line() {
        let mut cart = Cart::new();
        cart.add("Apple", 1);
        cart.clear();
        assert!(cart.is_empty());
    }
}
