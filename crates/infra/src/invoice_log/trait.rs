use std::io;
use std::sync::Arc;

use thiserror::Error;

/// Invoice log operation error.
///
/// Never fatal: the caller reports it and may retry the finalize.
#[derive(Debug, Error)]
pub enum InvoiceLogError {
    #[error("failed to append invoice to {target}: {source}")]
    Io {
        target: String,
        #[source]
        source: io::Error,
    },
}

impl InvoiceLogError {
    pub fn io(target: impl Into<String>, source: io::Error) -> Self {
        Self::Io {
            target: target.into(),
            source,
        }
    }
}

/// Append-only sink for rendered invoices.
///
/// `append` stores `text` followed by a blank line (two newlines) so that
/// consecutive invoices stay visually separated. Each call is self-contained:
/// implementations must not hold the underlying resource open between calls.
pub trait InvoiceLog: Send + Sync {
    fn append(&self, text: &str) -> Result<(), InvoiceLogError>;
}

impl<L> InvoiceLog for Arc<L>
where
    L: InvoiceLog + ?Sized,
{
    fn append(&self, text: &str) -> Result<(), InvoiceLogError> {
        (**self).append(text)
    }
}

/// Separator written after every invoice.
pub(crate) const ENTRY_TERMINATOR: &str = "\n\n";
