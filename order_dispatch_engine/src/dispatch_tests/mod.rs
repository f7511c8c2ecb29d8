mod mocks;

use std::io;

use chrono::Utc;
use odg_common::Money;

use crate::{
    db_types::{Decision, Order, OrderId, OrderStatus, OrderType, Priority},
    dispatch_tests::mocks::{MockDecisions, MockExporter, MockStore},
    traits::{DecisionApiError, ExportError, StoreError},
    DispatchApi,
};

fn init() {
    let _ = env_logger::try_init();
}

fn order(id: i64, order_type: OrderType, amount: Money, flag: bool) -> Order {
    let now = Utc::now();
    Order {
        id: OrderId(id),
        user_id: "alice".to_string(),
        order_type,
        amount,
        flag,
        status: OrderStatus::New,
        priority: Priority::Medium,
        created_at: now,
        updated_at: now,
    }
}

fn store_returning(orders: Vec<Order>) -> MockStore {
    let mut store = MockStore::new();
    store.expect_orders_for_user().withf(|user| user == "alice").return_once(move |_| Ok(orders));
    store
}

fn expect_update(store: &mut MockStore, id: i64, status: OrderStatus, priority: Priority) {
    store
        .expect_update_status()
        .withf(move |oid, s, p| *oid == OrderId(id) && *s == status && *p == priority)
        .times(1)
        .returning(|_, _, _| Ok(true));
}

/// Runs a single order through the engine and asserts the terminal pair via the store update expectation.
async fn assert_outcome(
    order: Order,
    decisions: MockDecisions,
    exporter: MockExporter,
    status: OrderStatus,
    priority: Priority,
) {
    init();
    let id = order.id.value();
    let mut store = store_returning(vec![order]);
    expect_update(&mut store, id, status, priority);
    let api = DispatchApi::new(store, decisions, exporter);
    assert!(api.process_batch("alice").await);
}

fn exporter_expecting(id: i64, high_value: bool) -> MockExporter {
    let mut exporter = MockExporter::new();
    exporter
        .expect_export_row()
        .withf(move |oid, _, hv| *oid == OrderId(id) && *hv == high_value)
        .times(1)
        .returning(|_, _, _| Ok(()));
    exporter
}

fn decisions_answering(id: i64, decision: Decision) -> MockDecisions {
    let mut decisions = MockDecisions::new();
    decisions.expect_decide().withf(move |oid| *oid == OrderId(id)).times(1).return_once(move |_| Ok(decision));
    decisions
}

#[tokio::test]
async fn empty_batch_returns_false() {
    init();
    let store = store_returning(vec![]);
    let api = DispatchApi::new(store, MockDecisions::new(), MockExporter::new());
    assert!(!api.process_batch("alice").await);
}

#[tokio::test]
async fn fetch_failure_returns_false() {
    init();
    let mut store = MockStore::new();
    store.expect_orders_for_user().returning(|_| Err(StoreError::QueryError("no such table".to_string())));
    let api = DispatchApi::new(store, MockDecisions::new(), MockExporter::new());
    assert!(!api.process_batch("alice").await);
}

#[tokio::test]
async fn type_a_low_amount_exports_at_low_priority() {
    let o = order(1, OrderType::A, Money::from_whole(75), false);
    assert_outcome(o, MockDecisions::new(), exporter_expecting(1, false), OrderStatus::Exported, Priority::Low).await;
}

#[tokio::test]
async fn type_a_at_150_is_not_annotated() {
    let o = order(2, OrderType::A, Money::from_cents(150_00), false);
    assert_outcome(o, MockDecisions::new(), exporter_expecting(2, false), OrderStatus::Exported, Priority::Low).await;
}

#[tokio::test]
async fn type_a_between_150_and_200_is_annotated_but_low_priority() {
    let o = order(3, OrderType::A, Money::from_cents(175_50), false);
    assert_outcome(o, MockDecisions::new(), exporter_expecting(3, true), OrderStatus::Exported, Priority::Low).await;
}

#[tokio::test]
async fn type_a_at_200_stays_low_priority() {
    let o = order(4, OrderType::A, Money::from_cents(200_00), false);
    assert_outcome(o, MockDecisions::new(), exporter_expecting(4, true), OrderStatus::Exported, Priority::Low).await;
}

#[tokio::test]
async fn type_a_above_200_is_high_priority() {
    let o = order(5, OrderType::A, Money::from_cents(200_01), false);
    assert_outcome(o, MockDecisions::new(), exporter_expecting(5, true), OrderStatus::Exported, Priority::High).await;
}

#[tokio::test]
async fn type_a_export_failure_maps_to_export_failed() {
    let mut exporter = MockExporter::new();
    exporter
        .expect_export_row()
        .times(1)
        .returning(|_, _, _| Err(ExportError::IoError(io::Error::new(io::ErrorKind::PermissionDenied, "read-only"))));
    let o = order(6, OrderType::A, Money::from_whole(75), false);
    // The priority rewrite is keyed on the amount alone, so it still lands on low.
    assert_outcome(o, MockDecisions::new(), exporter, OrderStatus::ExportFailed, Priority::Low).await;
}

#[tokio::test]
async fn type_b_flagged_order_stays_pending_regardless_of_response() {
    let o = order(7, OrderType::B, Money::from_whole(75), true);
    let decisions = decisions_answering(7, Decision::new("failed", 99));
    assert_outcome(o, decisions, MockExporter::new(), OrderStatus::Pending, Priority::Medium).await;
}

#[tokio::test]
async fn type_b_success_with_data_and_small_amount_is_processed() {
    let o = order(8, OrderType::B, Money::from_whole(75), false);
    let decisions = decisions_answering(8, Decision::success(60));
    assert_outcome(o, decisions, MockExporter::new(), OrderStatus::Processed, Priority::Medium).await;
}

#[tokio::test]
async fn type_b_low_payload_is_pending() {
    let o = order(9, OrderType::B, Money::from_whole(75), false);
    let decisions = decisions_answering(9, Decision::success(49));
    assert_outcome(o, decisions, MockExporter::new(), OrderStatus::Pending, Priority::Medium).await;
}

#[tokio::test]
async fn type_b_boundary_payload_and_amount_resolve_to_error() {
    // payload exactly 50 and amount exactly 100.00 both sit on the inclusive side of the error branch
    let o = order(10, OrderType::B, Money::from_cents(100_00), false);
    let decisions = decisions_answering(10, Decision::success(50));
    assert_outcome(o, decisions, MockExporter::new(), OrderStatus::Error, Priority::Low).await;
}

#[tokio::test]
async fn type_b_large_amount_resolves_to_error() {
    let o = order(11, OrderType::B, Money::from_whole(150), false);
    let decisions = decisions_answering(11, Decision::success(60));
    assert_outcome(o, decisions, MockExporter::new(), OrderStatus::Error, Priority::Low).await;
}

#[tokio::test]
async fn type_b_service_failure_maps_to_api_failure() {
    let mut decisions = MockDecisions::new();
    decisions.expect_decide().times(1).returning(|id| Err(DecisionApiError::Unreachable(id)));
    let o = order(12, OrderType::B, Money::from_whole(75), false);
    assert_outcome(o, decisions, MockExporter::new(), OrderStatus::ApiFailure, Priority::Medium).await;
}

#[tokio::test]
async fn type_b_rejection_maps_to_api_error() {
    let o = order(13, OrderType::B, Money::from_whole(75), false);
    let decisions = decisions_answering(13, Decision::new("failed", 99));
    assert_outcome(o, decisions, MockExporter::new(), OrderStatus::ApiError, Priority::Medium).await;
}

#[tokio::test]
async fn type_c_flag_set_completes() {
    let o = order(14, OrderType::C, Money::from_whole(10), true);
    assert_outcome(o, MockDecisions::new(), MockExporter::new(), OrderStatus::Completed, Priority::Medium).await;
}

#[tokio::test]
async fn type_c_flag_clear_is_in_progress() {
    let o = order(15, OrderType::C, Money::from_whole(10), false);
    assert_outcome(o, MockDecisions::new(), MockExporter::new(), OrderStatus::InProgress, Priority::Medium).await;
}

#[tokio::test]
async fn unknown_type_is_terminal() {
    let o = order(16, OrderType::Other("D".to_string()), Money::from_whole(10), false);
    assert_outcome(o, MockDecisions::new(), MockExporter::new(), OrderStatus::UnknownType, Priority::Medium).await;
}

#[tokio::test]
async fn mixed_batch_resolves_each_order_independently() {
    init();
    let orders = vec![
        order(1, OrderType::A, Money::from_whole(75), false),
        order(2, OrderType::B, Money::from_whole(75), false),
        order(3, OrderType::C, Money::from_whole(75), true),
    ];
    let mut store = store_returning(orders);
    expect_update(&mut store, 1, OrderStatus::Exported, Priority::Low);
    expect_update(&mut store, 2, OrderStatus::Processed, Priority::Medium);
    expect_update(&mut store, 3, OrderStatus::Completed, Priority::Medium);
    let decisions = decisions_answering(2, Decision::success(60));
    let exporter = exporter_expecting(1, false);
    let api = DispatchApi::new(store, decisions, exporter);
    assert!(api.process_batch("alice").await);
}

#[tokio::test]
async fn store_failure_on_one_update_does_not_abort_the_batch() {
    init();
    let orders = vec![order(1, OrderType::C, Money::from_whole(10), true), order(2, OrderType::C, Money::from_whole(10), false)];
    let mut store = store_returning(orders);
    store
        .expect_update_status()
        .withf(|id, _, _| *id == OrderId(1))
        .times(1)
        .returning(|_, _, _| Err(StoreError::QueryError("disk I/O error".to_string())));
    expect_update(&mut store, 2, OrderStatus::InProgress, Priority::Medium);
    let api = DispatchApi::new(store, MockDecisions::new(), MockExporter::new());
    assert!(api.process_batch("alice").await);
}

#[tokio::test]
async fn unacknowledged_update_does_not_abort_the_batch() {
    init();
    let orders = vec![order(1, OrderType::C, Money::from_whole(10), true)];
    let mut store = store_returning(orders);
    store.expect_update_status().times(1).returning(|_, _, _| Ok(false));
    let api = DispatchApi::new(store, MockDecisions::new(), MockExporter::new());
    assert!(api.process_batch("alice").await);
}
