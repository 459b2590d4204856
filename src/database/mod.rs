//! Database module exports.

mod connection;

pub use connection::{ConnectionGuard, ConnectionHandle, DatabaseConnection};
