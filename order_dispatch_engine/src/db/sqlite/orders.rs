use log::trace;
use sqlx::{sqlite::SqliteRow, Row, SqlitePool};

use crate::{
    db_types::{NewOrder, Order, OrderId, OrderStatus, Priority},
    traits::StoreError,
};

const CREATE_ORDERS_TABLE: &str = r#"
    CREATE TABLE IF NOT EXISTS orders (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        user_id TEXT NOT NULL,
        order_type TEXT NOT NULL,
        amount INTEGER NOT NULL,
        flag BOOLEAN NOT NULL DEFAULT 0,
        status TEXT NOT NULL DEFAULT 'new',
        priority TEXT NOT NULL DEFAULT 'medium',
        created_at TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP,
        updated_at TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP
    );
"#;

const CREATE_USER_INDEX: &str = "CREATE INDEX IF NOT EXISTS orders_user_id ON orders (user_id);";

pub async fn create_orders_table(pool: &SqlitePool) -> Result<(), StoreError> {
    sqlx::query(CREATE_ORDERS_TABLE).execute(pool).await?;
    sqlx::query(CREATE_USER_INDEX).execute(pool).await?;
    Ok(())
}

fn order_from_row(row: &SqliteRow) -> Result<Order, StoreError> {
    let order = Order {
        id: row.try_get("id")?,
        user_id: row.try_get("user_id")?,
        order_type: row.try_get::<String, _>("order_type")?.into(),
        amount: row.try_get("amount")?,
        flag: row.try_get("flag")?,
        status: row.try_get::<String, _>("status")?.into(),
        priority: row.try_get::<String, _>("priority")?.into(),
        created_at: row.try_get("created_at")?,
        updated_at: row.try_get("updated_at")?,
    };
    Ok(order)
}

pub async fn insert_order(order: NewOrder, pool: &SqlitePool) -> Result<Order, StoreError> {
    let row = sqlx::query(
        r#"
            INSERT INTO orders (user_id, order_type, amount, flag, status, priority)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING id, user_id, order_type, amount, flag, status, priority, created_at, updated_at;
        "#,
    )
    .bind(&order.user_id)
    .bind(order.order_type.to_string())
    .bind(order.amount)
    .bind(order.flag)
    .bind(OrderStatus::New.to_string())
    .bind(order.priority.to_string())
    .fetch_one(pool)
    .await?;
    let order = order_from_row(&row)?;
    trace!("🗃️ Order {} stored for user [{}]", order.id, order.user_id);
    Ok(order)
}

pub async fn fetch_order_by_id(id: OrderId, pool: &SqlitePool) -> Result<Option<Order>, StoreError> {
    let row = sqlx::query("SELECT * FROM orders WHERE id = $1 LIMIT 1;").bind(id).fetch_one(pool).await;
    match row {
        Err(sqlx::Error::RowNotFound) => Ok(None),
        Err(e) => Err(e.into()),
        Ok(row) => Ok(Some(order_from_row(&row)?)),
    }
}

pub async fn fetch_orders_for_user(user_id: &str, pool: &SqlitePool) -> Result<Vec<Order>, StoreError> {
    let rows = sqlx::query("SELECT * FROM orders WHERE user_id = $1 ORDER BY id;").bind(user_id).fetch_all(pool).await?;
    rows.iter().map(order_from_row).collect()
}

pub async fn update_order_status(
    id: OrderId,
    status: &OrderStatus,
    priority: Priority,
    pool: &SqlitePool,
) -> Result<bool, StoreError> {
    let result = sqlx::query(
        r#"
            UPDATE orders
            SET status = $1, priority = $2, updated_at = CURRENT_TIMESTAMP
            WHERE id = $3;
        "#,
    )
    .bind(status.to_string())
    .bind(priority.to_string())
    .bind(id)
    .execute(pool)
    .await?;
    trace!("🗃️ Order {id} updated to [{status}] ({} rows)", result.rows_affected());
    Ok(result.rows_affected() > 0)
}
