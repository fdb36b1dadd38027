use std::io;
use std::sync::RwLock;
use std::sync::atomic::{AtomicBool, Ordering};

use super::r#trait::{ENTRY_TERMINATOR, InvoiceLog, InvoiceLogError};

/// In-memory invoice log.
///
/// Intended for tests/dev. Can be switched offline to exercise the
/// write-failure path.
#[derive(Debug, Default)]
pub struct InMemoryInvoiceLog {
    entries: RwLock<Vec<String>>,
    offline: AtomicBool,
}

impl InMemoryInvoiceLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// While offline, every append fails with an IO error.
    pub fn set_offline(&self, offline: bool) {
        self.offline.store(offline, Ordering::SeqCst);
    }

    /// Invoices appended so far, without the trailing separator.
    pub fn entries(&self) -> Vec<String> {
        self.entries
            .read()
            .map(|entries| entries.clone())
            .unwrap_or_default()
    }

    /// Everything written, as it would appear in a log file.
    pub fn contents(&self) -> String {
        self.entries()
            .iter()
            .map(|entry| format!("{entry}{ENTRY_TERMINATOR}"))
            .collect()
    }
}

impl InvoiceLog for InMemoryInvoiceLog {
    fn append(&self, text: &str) -> Result<(), InvoiceLogError> {
        if self.offline.load(Ordering::SeqCst) {
            return Err(InvoiceLogError::io(
                "memory",
                io::Error::new(io::ErrorKind::PermissionDenied, "invoice log is offline"),
            ));
        }

        let mut entries = self.entries.write().map_err(|_| {
            InvoiceLogError::io("memory", io::Error::other("invoice log lock poisoned"))
        })?;
        entries.push(text.to_string());
        Ok(())
    }
}
