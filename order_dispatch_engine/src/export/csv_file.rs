use std::{
    fs::{create_dir_all, OpenOptions},
    path::PathBuf,
};

use log::trace;
use odg_common::Money;

use crate::{
    db_types::OrderId,
    traits::{ExportError, ExportSink},
};

pub const DEFAULT_EXPORT_PATH: &str = "data/exports/orders.csv";
/// The note column value for annotated rows. Empty otherwise.
pub const HIGH_VALUE_NOTE: &str = "high value";

const HEADER: [&str; 3] = ["order_id", "amount", "note"];

/// An [`ExportSink`] that appends one CSV record per call to a file, writing the header when it creates the file.
/// Parent directories are created on first write.
#[derive(Debug, Clone)]
pub struct CsvExporter {
    path: PathBuf,
}

impl CsvExporter {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &PathBuf {
        &self.path
    }

    fn append_row(&self, order_id: OrderId, amount: Money, high_value: bool) -> Result<(), ExportError> {
        if let Some(dir) = self.path.parent() {
            if !dir.as_os_str().is_empty() {
                create_dir_all(dir)?;
            }
        }
        let write_header = !self.path.exists();
        let file = OpenOptions::new().create(true).append(true).open(&self.path)?;
        let mut writer = csv::WriterBuilder::new().has_headers(false).from_writer(file);
        if write_header {
            writer.write_record(HEADER)?;
        }
        let note = if high_value { HIGH_VALUE_NOTE } else { "" };
        writer.write_record([order_id.value().to_string(), amount.to_string(), note.to_string()])?;
        writer.flush()?;
        trace!("📤️ Order {order_id} ({amount}) appended to {}", self.path.display());
        Ok(())
    }
}

impl ExportSink for CsvExporter {
    async fn export_row(&self, order_id: OrderId, amount: Money, high_value: bool) -> Result<(), ExportError> {
        self.append_row(order_id, amount, high_value)
    }
}
