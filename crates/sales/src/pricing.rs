use serde::{Deserialize, Serialize};

use fruitshop_core::Money;

/// Flat percentage taken off a subtotal.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Discount {
    percent: u32,
}

/// The shop-wide discount, used by both the running total and the invoice.
pub const STANDARD_DISCOUNT: Discount = Discount::percent(10);

impl Discount {
    pub const fn percent(percent: u32) -> Self {
        Self { percent }
    }

    pub fn rate(&self) -> u32 {
        self.percent
    }

    /// Amount taken off, rounded half-up to the paisa.
    pub fn amount_on(&self, subtotal: Money) -> Money {
        subtotal.percent(self.percent)
    }

    /// What remains payable: `(100 - percent)`% of the subtotal, rounded
    /// half-up on its own. It need not add back to the subtotal with
    /// `amount_on` when both land on a half paisa.
    pub fn apply_to(&self, subtotal: Money) -> Money {
        subtotal.percent(100u32.saturating_sub(self.percent))
    }
}

/// Subtotal, discount and payable total of one order.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Totals {
    pub subtotal: Money,
    pub discount_rate: u32,
    pub discount: Money,
    pub total: Money,
}

impl Totals {
    pub fn new(subtotal: Money, discount: Discount) -> Self {
        Self {
            subtotal,
            discount_rate: discount.rate(),
            discount: discount.amount_on(subtotal),
            total: discount.apply_to(subtotal),
        }
    }
}
