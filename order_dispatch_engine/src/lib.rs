//! Order Dispatch Engine
//!
//! The Order Dispatch Engine processes a user's orders in a single sequential batch. Each order is routed to one of
//! several handlers based on its declared type, the handler resolves a terminal (status, priority) pair, and the
//! result is written back to the order store. This library contains the core decision logic. It is backend-agnostic.
//!
//! The library is divided into three main sections:
//! 1. The capability seams ([`mod@traits`]). The engine only ever talks to its collaborators through the three traits
//!    defined here: [`traits::OrderStore`], [`traits::DecisionService`] and [`traits::ExportSink`]. Swap in your own
//!    implementations to change where orders live, who adjudicates type B orders, or where type A exports land.
//! 2. The dispatch API ([`DispatchApi`]). This owns all of the per-type business rules and all of the
//!    failure-to-status mapping. A single failing order never aborts the rest of the batch; only an unclassified
//!    failure collapses the batch result to `false`.
//! 3. Bundled collaborators. An in-memory store and a Sqlite-backed store ([`MemoryStore`], [`SqliteStore`]), a
//!    file-appending CSV exporter ([`CsvExporter`]), and two decision services (an in-process
//!    [`StaticDecisionService`] and, behind the `http` feature, a [`HttpDecisionService`] REST client).
mod db;
mod dispatch;

pub mod db_types;
pub mod decision;
pub mod export;
pub mod traits;

#[cfg(test)]
mod dispatch_tests;

pub use db::memory::MemoryStore;
#[cfg(feature = "sqlite")]
pub use db::sqlite::{db_url, SqliteStore};
pub use decision::StaticDecisionService;
#[cfg(feature = "http")]
pub use decision::HttpDecisionService;
pub use dispatch::{
    DispatchApi, DispatchError, HIGH_PRIORITY_LIMIT, HIGH_VALUE_NOTE_LIMIT, TYPE_B_AMOUNT_LIMIT, TYPE_B_PAYLOAD_LIMIT,
};
pub use export::CsvExporter;
