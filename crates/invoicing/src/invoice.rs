use core::fmt::Write as _;

use serde::{Deserialize, Serialize};

use fruitshop_core::Money;
use fruitshop_inventory::InventoryStore;
use fruitshop_sales::{Cart, Discount, STANDARD_DISCOUNT, Session, Totals};

/// Invoice line derived from a cart line, priced at the store's unit price.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InvoiceLine {
    pub item: String,
    pub quantity: u32,
    pub unit: String,
    pub unit_price: Money,
    pub amount: Money,
}

/// Whether the totals block is rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InvoiceMode {
    /// Customer header and lines only (what the operator sees while building).
    Preview,
    /// Lines plus subtotal, discount and total.
    Final,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Invoice {
    pub customer_name: String,
    pub lines: Vec<InvoiceLine>,
    pub totals: Totals,
}

impl Invoice {
    /// Price every cart line against `store`. Lines for items the store no
    /// longer carries are left out.
    pub fn from_cart(
        customer_name: &str,
        cart: &Cart,
        store: &InventoryStore,
        discount: Discount,
    ) -> Self {
        let lines: Vec<InvoiceLine> = cart
            .lines()
            .iter()
            .filter_map(|line| {
                let item = store.get(&line.item)?;
                Some(InvoiceLine {
                    item: item.name().to_string(),
                    quantity: line.quantity,
                    unit: item.unit().to_string(),
                    unit_price: item.price(),
                    amount: item.price().times(line.quantity),
                })
            })
            .collect();

        let subtotal = lines.iter().map(|line| line.amount).sum();

        Self {
            customer_name: customer_name.to_string(),
            lines,
            totals: Totals::new(subtotal, discount),
        }
    }

    pub fn render(&self, mode: InvoiceMode) -> String {
        let mut out = String::new();
        // Writing into a String cannot fail.
        let _ = writeln!(out, "Customer: {}", self.customer_name);
        out.push('\n');

        for line in &self.lines {
            let _ = writeln!(
                out,
                "{} x {} {} = {}",
                line.item, line.quantity, line.unit, line.amount
            );
        }

        if mode == InvoiceMode::Final {
            let _ = write!(
                out,
                "\nSubtotal: {}\nDiscount ({}%): {}\nTotal: {}",
                self.totals.subtotal, self.totals.discount_rate, self.totals.discount, self.totals.total
            );
        }

        out
    }
}

/// Render the session's cart for `customer_name` (trimmed), with the totals
/// block when `finalize` is set. Uses the shop-wide discount.
pub fn render_invoice(session: &Session, customer_name: &str, finalize: bool) -> String {
    let invoice = Invoice::from_cart(
        customer_name.trim(),
        session.cart(),
        session.inventory(),
        STANDARD_DISCOUNT,
    );
    let mode = if finalize {
        InvoiceMode::Final
    } else {
        InvoiceMode::Preview
    };
    invoice.render(mode)
}
