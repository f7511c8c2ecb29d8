//! The capability seams of the dispatch engine.
//!
//! The engine never talks to a database, a network service or the file system directly. Everything it needs from the
//! outside world comes through the three traits in this module, which keeps failure injection in tests a matter of
//! swapping in a different implementation.

mod decision_service;
mod errors;
mod export_sink;
mod order_store;

pub use decision_service::DecisionService;
pub use errors::{DecisionApiError, ExportError, StoreError};
pub use export_sink::ExportSink;
pub use order_store::OrderStore;
