use odg_common::Money;

use crate::db_types::OrderId;
use crate::traits::ExportError;

/// The export seam used by the type A rule branch.
///
/// The high-value threshold is engine knowledge; the sink only receives the computed flag and renders it however its
/// destination format calls for.
#[allow(async_fn_in_trait)]
pub trait ExportSink {
    /// Appends one row describing an order to the export destination.
    async fn export_row(&self, order_id: OrderId, amount: Money, high_value: bool) -> Result<(), ExportError>;
}
