//! Invoicing domain module.
//!
//! Turns a cart into an invoice and renders it as the plain text that is
//! shown to the operator and appended to the sales log.

pub mod invoice;

pub use invoice::{Invoice, InvoiceLine, InvoiceMode, render_invoice};
