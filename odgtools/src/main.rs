use std::time::Duration;

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use log::*;
use odg_common::Money;
use order_dispatch_engine::{
    db_types::Order,
    traits::{DecisionService, OrderStore},
    CsvExporter, DispatchApi, HttpDecisionService, SqliteStore, StaticDecisionService,
};
use prettytable::{row, Table};

mod config;
mod seed;

use config::OdgConfig;

#[derive(Parser, Debug)]
#[command(version = "0.1.0", about = "Order dispatch gateway tools")]
pub struct Arguments {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    #[clap(name = "seed", about = "Insert a demo batch of orders for a user")]
    Seed(SeedParams),
    #[clap(name = "process", about = "Run the dispatch engine over a user's orders")]
    Process(UserParams),
    #[clap(name = "list", about = "List a user's orders")]
    List(UserParams),
}

#[derive(Debug, Args)]
pub struct SeedParams {
    /// The user to seed orders for
    #[arg(short, long, default_value = "alice")]
    user: String,
    /// How many orders to insert
    #[arg(short, long, default_value = "8")]
    count: usize,
}

#[derive(Debug, Args)]
pub struct UserParams {
    /// The user whose orders to work on
    #[arg(short, long, default_value = "alice")]
    user: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    env_logger::init();
    let args = Arguments::parse();
    let config = OdgConfig::from_env_or_default();
    let store = SqliteStore::new_with_url(&config.database_url, 5).await?;
    match args.command {
        Command::Seed(params) => seed::seed_orders(&store, &params.user, params.count).await?,
        Command::Process(params) => process_orders(&config, store, &params.user).await?,
        Command::List(params) => list_orders(&store, &params.user).await?,
    }
    Ok(())
}

async fn process_orders(config: &OdgConfig, store: SqliteStore, user: &str) -> Result<()> {
    let exporter = CsvExporter::new(&config.export_path);
    let outcome = match &config.decision_api_url {
        Some(url) => {
            info!("🚀️ Using the HTTP decision service at {url}");
            let timeout = Duration::from_secs(config.decision_timeout_secs);
            let decisions = HttpDecisionService::new(url.clone(), timeout)?;
            run_batch(store.clone(), decisions, exporter, user).await
        },
        None => {
            info!("🚀️ Using the in-process static decision service");
            run_batch(store.clone(), StaticDecisionService::default(), exporter, user).await
        },
    };
    println!("Batch result for {user}: {outcome}");
    list_orders(&store, user).await
}

async fn run_batch<D: DecisionService>(store: SqliteStore, decisions: D, exporter: CsvExporter, user: &str) -> bool {
    DispatchApi::new(store, decisions, exporter).process_batch(user).await
}

async fn list_orders(store: &SqliteStore, user: &str) -> Result<()> {
    let orders = store.orders_for_user(user).await?;
    if orders.is_empty() {
        println!("No orders for {user}");
        return Ok(());
    }
    print_orders(&orders);
    let total: Money = orders.iter().map(|o| o.amount).sum();
    println!("{} orders, {total} in total", orders.len());
    Ok(())
}

fn print_orders(orders: &[Order]) {
    let mut table = Table::new();
    table.add_row(row!["ID", "Type", "Amount", "Flag", "Status", "Priority"]);
    for order in orders {
        table.add_row(row![order.id, order.order_type, order.amount, order.flag, order.status, order.priority]);
    }
    table.printstd();
}
