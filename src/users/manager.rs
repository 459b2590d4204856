//! User manager with a cache-first fetch path.
//!
//! The remote user API is simulated: a cache miss sleeps for the configured
//! fetch delay and synthesizes a deterministic user from its id.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use chrono::Utc;
use futures::future::join_all;
use tracing::{debug, error, info};

use super::error::{UserError, UserResult};
use super::models::{Metadata, User, UserStatus};
use super::update::UserUpdate;
use crate::cache::{CacheConfig, TypedCache};
use crate::config::Config;

/// Cache hit/miss counters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CacheStats {
    pub hits: u64,
    pub misses: u64,
}

/// Asynchronous user manager backed by an in-memory cache.
#[derive(Debug)]
pub struct UserManager {
    base_url: String,
    #[allow(dead_code)]
    timeout: Duration,
    #[allow(dead_code)]
    retry_attempts: u32,
    fetch_delay: Duration,
    cache: TypedCache<String, User>,
    hits: AtomicU64,
    misses: AtomicU64,
}

impl UserManager {
    pub fn new(config: &Config) -> Self {
        Self {
            base_url: config.api_base_url.clone(),
            timeout: config.timeout(),
            retry_attempts: config.retry_attempts,
            fetch_delay: config.fetch_delay,
            cache: TypedCache::new("users", CacheConfig::unbounded()),
            hits: AtomicU64::new(0),
            misses: AtomicU64::new(0),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Fetch a user by id, serving from cache when possible.
    ///
    /// # Errors
    /// - [`UserError::InvalidArgument`] if `user_id` is empty.
    /// - [`UserError::Connection`] if the remote call fails; no retry is made.
    pub async fn fetch(&self, user_id: &str) -> UserResult<User> {
        if user_id.is_empty() {
            return Err(UserError::InvalidArgument(
                "user id must be a non-empty string".to_string(),
            ));
        }

        if let Some(user) = self.cache.get(&user_id.to_string()) {
            self.hits.fetch_add(1, Ordering::Relaxed);
            debug!("Cache hit for user: {}", user_id);
            return Ok(user);
        }

        self.misses.fetch_add(1, Ordering::Relaxed);
        debug!("Cache miss for user: {}", user_id);

        let user = self.fetch_remote(user_id).await.map_err(|e| {
            error!("Failed to fetch user {}: {}", user_id, e);
            UserError::connection(user_id, e)
        })?;

        self.cache.insert(user_id.to_string(), user.clone());
        info!("Fetched and cached user: {}", user_id);

        Ok(user)
    }

    /// Simulated `GET {base_url}/users/{id}`.
    async fn fetch_remote(&self, user_id: &str) -> UserResult<User> {
        tokio::time::sleep(self.fetch_delay).await;

        debug!("GET {}/users/{}", self.base_url, user_id);

        let mut metadata = Metadata::new();
        metadata.insert("last_login".to_string(), Utc::now().to_rfc3339().into());

        let user = User::new(
            user_id,
            format!("User {user_id}"),
            format!("user{user_id}@example.com"),
        )?
        .with_status(UserStatus::Active)
        .with_metadata(metadata);

        Ok(user)
    }

    /// Fetch several users concurrently.
    ///
    /// Every requested id is a key in the result; ids whose fetch failed map
    /// to `None` without affecting the others.
    pub async fn batch_fetch<S>(&self, user_ids: &[S]) -> HashMap<String, Option<User>>
    where
        S: AsRef<str>,
    {
        let fetches = user_ids.iter().map(|id| async move {
            let id = id.as_ref();
            (id.to_string(), self.fetch(id).await.ok())
        });

        join_all(fetches).await.into_iter().collect()
    }

    /// Apply `changes` to a user and report whether it succeeded.
    ///
    /// Failures are logged and collapsed to `false`; use
    /// [`try_update`](Self::try_update) to see the error.
    pub async fn update(&self, user_id: &str, changes: Vec<UserUpdate>) -> bool {
        match self.try_update(user_id, changes).await {
            Ok(_) => true,
            Err(e) => {
                error!("Failed to update user {}: {}", user_id, e);
                false
            }
        }
    }

    /// Apply `changes` to a user (fetching it if needed) and return the result.
    pub async fn try_update(&self, user_id: &str, changes: Vec<UserUpdate>) -> UserResult<User> {
        let mut user = self.fetch(user_id).await?;

        let fields: Vec<&'static str> = changes.iter().map(UserUpdate::field).collect();
        for change in changes {
            change.apply(&mut user);
        }

        self.cache.insert(user_id.to_string(), user.clone());
        info!("Updated user {}: {:?}", user_id, fields);

        Ok(user)
    }

    /// Empty the cache, returning the number of users removed.
    pub fn clear(&self) -> u64 {
        let count = self.cache.clear();
        info!("Cleared {} items from cache", count);
        count
    }

    pub fn stats(&self) -> CacheStats {
        CacheStats {
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
        }
    }
}

impl Default for UserManager {
    fn default() -> Self {
        Self::new(&Config::default())
    }
}
