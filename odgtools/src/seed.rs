use anyhow::Result;
use log::*;
use odg_common::Money;
use order_dispatch_engine::{
    db_types::{NewOrder, OrderType},
    SqliteStore,
};
use rand::Rng;

/// Inserts a demo batch for the given user: a few fixed boundary orders, then random ones.
pub async fn seed_orders(store: &SqliteStore, user: &str, count: usize) -> Result<()> {
    let fixed = [
        NewOrder::new(user, OrderType::A, Money::from_cents(150_00)),
        NewOrder::new(user, OrderType::A, Money::from_cents(200_00)),
        NewOrder::new(user, OrderType::B, Money::from_cents(100_00)),
    ];
    let mut seeded = 0;
    for order in fixed.into_iter().take(count) {
        store.insert_order(order).await?;
        seeded += 1;
    }
    let mut rng = rand::thread_rng();
    while seeded < count {
        let order_type = match rng.gen_range(0..4) {
            0 => OrderType::A,
            1 => OrderType::B,
            2 => OrderType::C,
            _ => OrderType::Other("D".to_string()),
        };
        let amount = Money::from_cents(rng.gen_range(10_00..300_00));
        let flag = rng.gen_bool(0.5);
        let order = store.insert_order(NewOrder::new(user, order_type, amount).with_flag(flag)).await?;
        debug!("🚀️ Seeded order {} ({} @ {})", order.id, order.order_type, order.amount);
        seeded += 1;
    }
    info!("🚀️ Seeded {seeded} orders for user [{user}]");
    Ok(())
}
