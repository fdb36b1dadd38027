use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};

use super::r#trait::{ENTRY_TERMINATOR, InvoiceLog, InvoiceLogError};

/// Invoice log backed by a UTF-8 text file (`sales.txt` by default).
///
/// The file is opened in append mode (created if missing), written and closed
/// on every call.
#[derive(Debug, Clone)]
pub struct FileInvoiceLog {
    path: PathBuf,
}

impl FileInvoiceLog {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl InvoiceLog for FileInvoiceLog {
    fn append(&self, text: &str) -> Result<(), InvoiceLogError> {
        let target = self.path.display().to_string();
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .map_err(|e| InvoiceLogError::io(target.clone(), e))?;

        let mut entry = String::with_capacity(text.len() + ENTRY_TERMINATOR.len());
        entry.push_str(text);
        entry.push_str(ENTRY_TERMINATOR);

        file.write_all(entry.as_bytes())
            .and_then(|()| file.flush())
            .map_err(|e| InvoiceLogError::io(target, e))?;

        tracing::debug!(path = %self.path.display(), bytes = entry.len(), "invoice appended");
        Ok(())
    }
}
