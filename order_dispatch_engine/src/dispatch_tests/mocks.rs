use mockall::mock;
use odg_common::Money;

use crate::{
    db_types::{Decision, Order, OrderId, OrderStatus, Priority},
    traits::{DecisionApiError, DecisionService, ExportError, ExportSink, OrderStore, StoreError},
};

mock! {
    pub Store {}
    impl OrderStore for Store {
        async fn orders_for_user(&self, user_id: &str) -> Result<Vec<Order>, StoreError>;
        async fn update_status(&self, id: OrderId, status: OrderStatus, priority: Priority) -> Result<bool, StoreError>;
    }
}

mock! {
    pub Decisions {}
    impl DecisionService for Decisions {
        async fn decide(&self, order_id: OrderId) -> Result<Decision, DecisionApiError>;
    }
}

mock! {
    pub Exporter {}
    impl ExportSink for Exporter {
        async fn export_row(&self, order_id: OrderId, amount: Money, high_value: bool) -> Result<(), ExportError>;
    }
}
