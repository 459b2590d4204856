//! User management: models, the cache-backed manager and helpers.

mod error;
mod manager;
mod models;
mod update;
mod utils;

pub use error::{UserError, UserResult};
pub use manager::{CacheStats, UserManager};
pub use models::{ApiResponse, Metadata, MetadataValue, User, UserStatistics, UserStatus};
pub use update::UserUpdate;
pub use utils::{create_user_from_map, filter_users_by_status, serialize_users, user_statistics};
