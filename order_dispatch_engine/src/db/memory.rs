use std::{
    collections::BTreeMap,
    sync::{Arc, Mutex, MutexGuard},
};

use chrono::Utc;
use log::trace;

use crate::{
    db_types::{NewOrder, Order, OrderId, OrderStatus, Priority},
    traits::{OrderStore, StoreError},
};

/// An in-memory order store backed by a `BTreeMap`, so iteration order is id order. Ids are assigned on insertion,
/// starting at 1. This is the default backend for tests and demos; nothing survives the process.
#[derive(Clone, Default)]
pub struct MemoryStore {
    inner: Arc<Mutex<Inner>>,
}

#[derive(Default)]
struct Inner {
    orders: BTreeMap<OrderId, Order>,
    next_id: i64,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        // A panic while holding the lock only happens in tests; the data is still consistent.
        self.inner.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Inserts a new order, assigning it the next id, and returns the stored record.
    pub fn insert_order(&self, order: NewOrder) -> Order {
        let mut inner = self.lock();
        inner.next_id += 1;
        let id = OrderId(inner.next_id);
        let now = Utc::now();
        let order = Order {
            id,
            user_id: order.user_id,
            order_type: order.order_type,
            amount: order.amount,
            flag: order.flag,
            status: OrderStatus::New,
            priority: order.priority,
            created_at: now,
            updated_at: now,
        };
        inner.orders.insert(id, order.clone());
        trace!("🗃️ Order {id} stored for user [{}]", order.user_id);
        order
    }

    pub fn insert_orders(&self, orders: impl IntoIterator<Item = NewOrder>) -> Vec<Order> {
        orders.into_iter().map(|o| self.insert_order(o)).collect()
    }

    pub fn fetch_order(&self, id: OrderId) -> Option<Order> {
        self.lock().orders.get(&id).cloned()
    }

    pub fn order_count(&self) -> usize {
        self.lock().orders.len()
    }
}

impl OrderStore for MemoryStore {
    async fn orders_for_user(&self, user_id: &str) -> Result<Vec<Order>, StoreError> {
        let orders = self.lock().orders.values().filter(|o| o.user_id == user_id).cloned().collect();
        Ok(orders)
    }

    async fn update_status(&self, id: OrderId, status: OrderStatus, priority: Priority) -> Result<bool, StoreError> {
        let mut inner = self.lock();
        match inner.orders.get_mut(&id) {
            Some(order) => {
                order.status = status;
                order.priority = priority;
                order.updated_at = Utc::now();
                Ok(true)
            },
            None => Ok(false),
        }
    }
}
