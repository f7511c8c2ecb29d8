use std::fmt::Debug;

use log::*;
use odg_common::Money;

use crate::{
    db_types::{Order, OrderStatus, OrderType, Priority},
    dispatch::DispatchError,
    traits::{DecisionService, ExportSink, OrderStore},
};

/// Type A orders above this amount carry a "high value" note in their export row.
pub const HIGH_VALUE_NOTE_LIMIT: Money = Money::from_cents(150_00);
/// Type A orders above this amount resolve to high priority. Note the gap to [`HIGH_VALUE_NOTE_LIMIT`]: an order
/// between the two limits is annotated but stays low priority.
pub const HIGH_PRIORITY_LIMIT: Money = Money::from_cents(200_00);
/// Type B orders at or above this amount fail validation when the decision payload clears
/// [`TYPE_B_PAYLOAD_LIMIT`].
pub const TYPE_B_AMOUNT_LIMIT: Money = Money::from_cents(100_00);
/// Decision payloads below this value leave a type B order pending for lack of data.
pub const TYPE_B_PAYLOAD_LIMIT: i64 = 50;

/// `DispatchApi` is the primary API for running a user's orders through the per-type business rules and persisting
/// each order's terminal (status, priority) pair.
///
/// It is generic over the three capability seams: the order store, the decision service consulted for type B
/// orders, and the export sink fed by type A orders. All failure-to-status mapping lives here; the collaborators
/// raise their own error kinds and the engine decides what each one means for the order at hand.
pub struct DispatchApi<B, D, X> {
    store: B,
    decisions: D,
    exporter: X,
}

impl<B, D, X> Debug for DispatchApi<B, D, X> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "DispatchApi")
    }
}

impl<B, D, X> DispatchApi<B, D, X> {
    pub fn new(store: B, decisions: D, exporter: X) -> Self {
        Self { store, decisions, exporter }
    }
}

impl<B, D, X> DispatchApi<B, D, X>
where
    B: OrderStore,
    D: DecisionService,
    X: ExportSink,
{
    /// Processes every order the store holds for `user_id`, one at a time, in store order.
    ///
    /// Returns `true` if the batch was non-empty and completed, and `false` if there was nothing to do or an
    /// unclassified failure aborted the batch. Per-order failures (a CSV write error, a decision service outage, a
    /// store error on one order's update) are mapped to terminal statuses and never abort the remaining orders.
    /// This method does not raise; the boolean is the only caller-visible signal.
    pub async fn process_batch(&self, user_id: &str) -> bool {
        match self.run_batch(user_id).await {
            Ok(did_work) => did_work,
            Err(e) => {
                error!("🔀️ Order batch for user [{user_id}] aborted: {e}");
                false
            },
        }
    }

    async fn run_batch(&self, user_id: &str) -> Result<bool, DispatchError> {
        let orders = self.store.orders_for_user(user_id).await?;
        if orders.is_empty() {
            info!("🔀️ No orders to process for user [{user_id}]");
            return Ok(false);
        }
        debug!("🔀️ Processing {} orders for user [{user_id}]", orders.len());
        for order in &orders {
            let (status, priority) = self.dispatch_order(order).await;
            self.persist_outcome(order, status, priority).await;
        }
        debug!("🔀️ Batch for user [{user_id}] complete");
        Ok(true)
    }

    /// Evaluates exactly one rule branch, selected by the order's type, and returns the terminal pair. Branches
    /// that do not rewrite the priority pass the order's pre-existing value through unchanged.
    async fn dispatch_order(&self, order: &Order) -> (OrderStatus, Priority) {
        match &order.order_type {
            OrderType::A => self.export_order(order).await,
            OrderType::B => self.validate_order(order).await,
            OrderType::C => complete_order(order),
            OrderType::Other(t) => {
                debug!("🔀️ Order {} has unknown type [{t}]", order.id);
                (OrderStatus::UnknownType, order.priority)
            },
        }
    }

    /// Type A: write one export row. The priority is keyed on the amount alone, so it is rewritten whether or not
    /// the write succeeds; only the status records the export outcome.
    async fn export_order(&self, order: &Order) -> (OrderStatus, Priority) {
        let high_value = order.amount > HIGH_VALUE_NOTE_LIMIT;
        let priority = if order.amount > HIGH_PRIORITY_LIMIT { Priority::High } else { Priority::Low };
        let status = match self.exporter.export_row(order.id, order.amount, high_value).await {
            Ok(()) => OrderStatus::Exported,
            Err(e) => {
                warn!("📤️ Export row for order {} could not be written: {e}", order.id);
                OrderStatus::ExportFailed
            },
        };
        (status, priority)
    }

    /// Type B: consult the decision service, then resolve in precedence order: a raised service failure beats
    /// everything, the hold flag beats the response, a rejection beats the payload rules.
    async fn validate_order(&self, order: &Order) -> (OrderStatus, Priority) {
        let decision = match self.decisions.decide(order.id).await {
            Ok(d) => d,
            Err(e) => {
                warn!("🛰️ Decision service failed for order {}: {e}", order.id);
                return (OrderStatus::ApiFailure, order.priority);
            },
        };
        if order.flag {
            trace!("🛰️ Order {} is flagged to hold; leaving it pending", order.id);
            return (OrderStatus::Pending, order.priority);
        }
        if !decision.is_success() {
            debug!("🛰️ Decision service rejected order {} with status [{}]", order.id, decision.status);
            return (OrderStatus::ApiError, order.priority);
        }
        if decision.payload < TYPE_B_PAYLOAD_LIMIT {
            (OrderStatus::Pending, order.priority)
        } else if order.amount < TYPE_B_AMOUNT_LIMIT {
            (OrderStatus::Processed, order.priority)
        } else {
            (OrderStatus::Error, Priority::Low)
        }
    }

    /// Asks the store to persist the terminal pair. A store failure here is scoped to this order: the order
    /// conceptually lands on `db_error`, nothing is recorded for it, and the batch carries on.
    async fn persist_outcome(&self, order: &Order, status: OrderStatus, priority: Priority) {
        match self.store.update_status(order.id, status.clone(), priority).await {
            Ok(true) => trace!("🔀️ Order {} resolved to [{status}] with priority [{priority}]", order.id),
            Ok(false) => warn!("🔀️ Store did not acknowledge the update for order {}", order.id),
            Err(e) => {
                warn!("🔀️ Order {} resolves to [{}]; its outcome [{status}] was not persisted: {e}", order.id, OrderStatus::DbError)
            },
        }
    }
}

/// Type C needs no collaborators: the flag alone decides between completed and in progress.
fn complete_order(order: &Order) -> (OrderStatus, Priority) {
    let status = if order.flag { OrderStatus::Completed } else { OrderStatus::InProgress };
    (status, order.priority)
}
