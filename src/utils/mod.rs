//! Utility functions.

pub mod timing;

pub use timing::{log_completion_time, log_execution_time};
