//! Scoped mock database connection.
//!
//! A connection is held by a [`ConnectionGuard`]; dropping the guard closes
//! it. Release therefore happens on every exit path of the owning scope,
//! including `?` early returns, panics and cancelled futures.

use std::future::Future;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use anyhow::{Result, bail};
use tracing::info;

use crate::config::Config;

/// Placeholder for a live database handle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConnectionHandle {
    id: usize,
    url: Arc<str>,
}

impl ConnectionHandle {
    pub fn id(&self) -> usize {
        self.id
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

/// Factory for scoped database connections.
#[derive(Debug, Clone)]
pub struct DatabaseConnection {
    url: Arc<str>,
    connect_delay: Duration,
    active: Arc<AtomicUsize>,
    opened: Arc<AtomicUsize>,
}

impl DatabaseConnection {
    pub fn new(url: impl Into<Arc<str>>, connect_delay: Duration) -> Self {
        Self {
            url: url.into(),
            connect_delay,
            active: Arc::new(AtomicUsize::new(0)),
            opened: Arc::new(AtomicUsize::new(0)),
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(config.database_url.as_str(), config.db_connect_delay)
    }

    /// Open a connection.
    ///
    /// # Errors
    /// Returns error if the connection string is empty.
    pub async fn acquire(&self) -> Result<ConnectionGuard> {
        if self.url.trim().is_empty() {
            bail!("database connection string must not be empty");
        }

        info!("Connecting to database: {}", self.url);
        tokio::time::sleep(self.connect_delay).await;

        let id = self.opened.fetch_add(1, Ordering::SeqCst) + 1;
        self.active.fetch_add(1, Ordering::SeqCst);

        Ok(ConnectionGuard {
            handle: ConnectionHandle {
                id,
                url: Arc::clone(&self.url),
            },
            active: Arc::clone(&self.active),
        })
    }

    /// Run `f` with an open connection, closing it when `f` completes.
    pub async fn scope<F, Fut, T>(&self, f: F) -> Result<T>
    where
        F: FnOnce(ConnectionHandle) -> Fut,
        Fut: Future<Output = Result<T>>,
    {
        let guard = self.acquire().await?;
        let result = f(guard.handle().clone()).await;
        drop(guard);
        result
    }

    /// Number of connections currently open.
    pub fn active_connections(&self) -> usize {
        self.active.load(Ordering::SeqCst)
    }
}

/// An open connection. Closed on drop.
#[derive(Debug)]
pub struct ConnectionGuard {
    handle: ConnectionHandle,
    active: Arc<AtomicUsize>,
}

impl ConnectionGuard {
    pub fn handle(&self) -> &ConnectionHandle {
        &self.handle
    }
}

impl Drop for ConnectionGuard {
    fn drop(&mut self) {
        info!("Closing database connection #{}", self.handle.id);
        self.active.fetch_sub(1, Ordering::SeqCst);
    }
}
