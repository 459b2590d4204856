//! Cache module - typed in-memory caching using Moka.
//!
//! ## Usage
//!
//! ```rust,ignore
//! let users: TypedCache<String, User> = TypedCache::new("users", CacheConfig::unbounded());
//!
//! users.insert(user.id.clone(), user);
//! let cached = users.get(&id);
//! let removed = users.clear();
//! ```

mod config;
mod typed;

pub use config::CacheConfig;
pub use typed::TypedCache;
