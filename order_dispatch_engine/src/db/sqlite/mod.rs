pub mod orders;

use std::{env, str::FromStr, time::Duration};

use log::info;
use sqlx::{
    sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions},
    SqlitePool,
};

use crate::{
    db_types::{NewOrder, Order, OrderId, OrderStatus, Priority},
    traits::{OrderStore, StoreError},
};

const SQLITE_DB_URL: &str = "sqlite://data/odg.db";

pub fn db_url() -> String {
    let result = env::var("ODG_DATABASE_URL").unwrap_or_else(|_| {
        info!("ODG_DATABASE_URL is not set. Using the default.");
        SQLITE_DB_URL.to_string()
    });
    info!("Using database URL: {result}");
    result
}

pub async fn new_pool(url: &str, max_connections: u32) -> Result<SqlitePool, StoreError> {
    // WAL mode, so a read on one pooled connection sees writes committed on another.
    let options = SqliteConnectOptions::from_str(url)?
        .create_if_missing(true)
        .journal_mode(SqliteJournalMode::Wal)
        .busy_timeout(Duration::from_secs(5));
    let pool = SqlitePoolOptions::new().max_connections(max_connections).connect_with(options).await?;
    Ok(pool)
}

/// A Sqlite-backed order store. One table, schema applied on connect. This is a thin collaborator, not a
/// persistence engine: no migrations framework and no transactions beyond single statements.
#[derive(Clone)]
pub struct SqliteStore {
    url: String,
    pool: SqlitePool,
}

impl SqliteStore {
    pub async fn new_with_url(url: &str, max_connections: u32) -> Result<Self, StoreError> {
        let pool = new_pool(url, max_connections).await?;
        orders::create_orders_table(&pool).await?;
        info!("🗃️ Connected to order store at {url}");
        Ok(Self { url: url.to_string(), pool })
    }

    pub async fn new_default() -> Result<Self, StoreError> {
        Self::new_with_url(&db_url(), 5).await
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    pub async fn insert_order(&self, order: NewOrder) -> Result<Order, StoreError> {
        orders::insert_order(order, &self.pool).await
    }

    pub async fn fetch_order(&self, id: OrderId) -> Result<Option<Order>, StoreError> {
        orders::fetch_order_by_id(id, &self.pool).await
    }

    pub async fn close(&mut self) -> Result<(), StoreError> {
        self.pool.close().await;
        Ok(())
    }
}

impl OrderStore for SqliteStore {
    async fn orders_for_user(&self, user_id: &str) -> Result<Vec<Order>, StoreError> {
        orders::fetch_orders_for_user(user_id, &self.pool).await
    }

    async fn update_status(&self, id: OrderId, status: OrderStatus, priority: Priority) -> Result<bool, StoreError> {
        orders::update_order_status(id, &status, priority, &self.pool).await
    }
}
