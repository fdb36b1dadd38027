//! Sales domain module: the cart and the checkout session around it.
//!
//! Business rules only (no IO). Rendering and persisting invoices live in
//! `fruitshop-invoicing` and `fruitshop-infra`.

pub mod cart;
pub mod pricing;
pub mod quantity;
pub mod session;

pub use cart::{Cart, CartLine};
pub use pricing::{Discount, STANDARD_DISCOUNT, Totals};
pub use quantity::parse_quantity;
pub use session::{
    AddToCart, ClearSession, FinalizeSession, ItemAdded, Session, SessionCleared, SessionCommand,
    SessionEvent, SessionFinalized, SessionStatus, UnknownItemPolicy,
};
