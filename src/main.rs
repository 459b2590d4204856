//! Roster - asynchronous user manager demo.
//!
//! ## Architecture
//!
//! - `config` - Environment configuration
//! - `cache` - Typed in-memory caching with Moka
//! - `users` - User models, the cache-backed `UserManager` and helpers
//! - `database` - Scoped mock database connection
//! - `utils` - Execution timing

mod cache;
mod config;
mod database;
mod users;
mod utils;

use anyhow::Context;
use serde_json::{Map, json};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use config::Config;
use database::{ConnectionHandle, DatabaseConnection};
use users::{
    ApiResponse, User, UserManager, UserStatus, UserUpdate, create_user_from_map,
    filter_users_by_status, serialize_users, user_statistics,
};
use utils::{log_completion_time, log_execution_time};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env once, before config and logging read the environment
    dotenvy::dotenv().ok();

    // If RUST_LOG is not set, default to "info" level for our crate
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("roster=info"));

    tracing_subscriber::fmt().with_env_filter(filter).init();

    info!("Starting Roster demo...");

    let config = Config::from_env();
    info!("Configuration loaded successfully");

    let manager = UserManager::new(&config);
    info!("User manager ready (API: {})", manager.base_url());

    let db = DatabaseConnection::from_config(&config);

    let demo = db.scope(|conn| run_demo(&manager, conn));
    if let Err(e) = log_execution_time("demo", demo).await {
        error!("Main execution failed: {:#}", e);
    }

    Ok(())
}

/// Walk through fetch, batch fetch, update and clear.
async fn run_demo(manager: &UserManager, conn: ConnectionHandle) -> anyhow::Result<()> {
    info!("Using database connection #{} ({})", conn.id(), conn.url());

    // Single fetch
    let user = log_execution_time("fetch", manager.fetch("123")).await?;
    println!("Fetched user: {} ({})", user.display_name(), user.email);

    // Batch fetch
    let user_ids = ["123", "456", "789"];
    let fetched = log_completion_time("batch_fetch", manager.batch_fetch(&user_ids)).await;
    let active_users = fetched.values().flatten().filter(|u| u.is_active()).count();
    println!("Fetched {} active users", active_users);

    // Update
    let mut changes = Map::new();
    changes.insert("name".to_string(), json!("Updated User"));
    let changes = UserUpdate::from_map(&changes)?;
    let update_success = manager.update("123", changes).await;
    println!("Update successful: {}", update_success);

    // Import a user from a loose document and summarize everyone seen so far
    let imported = create_user_from_map(&json!({
        "id": "900",
        "name": "Imported User",
        "email": "imported@example.com",
        "status": "pending",
        "metadata": { "source": "import" }
    }))?;

    let mut everyone: Vec<User> = fetched.into_values().flatten().collect();
    everyone.sort_by(|a, b| a.id.cmp(&b.id));
    everyone.push(imported);

    let pending = filter_users_by_status(&everyone, UserStatus::Pending);
    println!("Pending users: {}", pending.len());

    let summary = if everyone.is_empty() {
        ApiResponse::error("No users collected")
    } else {
        ApiResponse::success(user_statistics(&everyone))
    };
    println!(
        "{}",
        serde_json::to_string_pretty(&summary).context("Failed to serialize statistics")?
    );
    println!("{}", serialize_users(&everyone)?);

    let stats = manager.stats();
    info!("Cache stats: {} hits, {} misses", stats.hits, stats.misses);

    // Clear cache
    let cleared_count = manager.clear();
    println!("Cleared {} items from cache", cleared_count);

    Ok(())
}
