//! Append-only invoice log boundary.
//!
//! Finalized invoices are persisted as plain text blocks. The trait keeps the
//! checkout pipeline independent of where those blocks end up.

pub mod file;
pub mod in_memory;
pub mod r#trait;

pub use file::FileInvoiceLog;
pub use in_memory::InMemoryInvoiceLog;
pub use r#trait::{InvoiceLog, InvoiceLogError};
