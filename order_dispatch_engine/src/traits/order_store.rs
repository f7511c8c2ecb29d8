use crate::db_types::{Order, OrderId, OrderStatus, Priority};
use crate::traits::StoreError;

/// The persistence seam for orders.
///
/// The store owns the authoritative order records. The engine only ever reads a snapshot list for one user and
/// writes back a single (status, priority) pair per order by id. Seeding and any richer querying are inherent
/// methods of the concrete backends, not part of this seam.
#[allow(async_fn_in_trait)]
pub trait OrderStore {
    /// Fetches all orders for the given user, in store-defined iteration order. May be empty.
    async fn orders_for_user(&self, user_id: &str) -> Result<Vec<Order>, StoreError>;

    /// Persists a new status and priority for the order with the given id.
    ///
    /// Returns `true` if a record was updated, and `false` if the id is unknown to the store. Raises a
    /// [`StoreError`] on a persistence failure.
    async fn update_status(&self, id: OrderId, status: OrderStatus, priority: Priority) -> Result<bool, StoreError>;
}
