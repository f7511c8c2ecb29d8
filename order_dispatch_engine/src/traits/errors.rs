use thiserror::Error;

use crate::db_types::OrderId;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Database driver error: {0}")]
    DriverError(#[from] sqlx::Error),
    #[error("Database query error: {0}")]
    QueryError(String),
}

#[derive(Debug, Error)]
pub enum DecisionApiError {
    #[error("Could not initialize client: {0}")]
    Initialization(String),
    #[error("Decision request failed: {0}")]
    RequestError(String),
    #[error("Decision query failed. Error {status}. {message}")]
    QueryError { status: u16, message: String },
    #[error("Could not deserialize decision: {0}")]
    JsonError(String),
    #[error("Decision service is unreachable for order {0}")]
    Unreachable(OrderId),
}

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("Could not write to the export destination: {0}")]
    IoError(#[from] std::io::Error),
    #[error("Could not serialize the export row: {0}")]
    CsvError(#[from] csv::Error),
}
