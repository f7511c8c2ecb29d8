mod csv_file;

pub use csv_file::{CsvExporter, DEFAULT_EXPORT_PATH, HIGH_VALUE_NOTE};
