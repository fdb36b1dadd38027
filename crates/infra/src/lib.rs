//! Infrastructure layer: invoice persistence, configuration, and the
//! checkout pipeline that ties them to the domain.

pub mod checkout;
pub mod config;
pub mod invoice_log;


pub use checkout::{Checkout, CheckoutError, SessionView};
pub use config::{ConfigError, ShopConfig};
pub use invoice_log::{FileInvoiceLog, InMemoryInvoiceLog, InvoiceLog, InvoiceLogError};
