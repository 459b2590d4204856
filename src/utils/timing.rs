//! Execution timing for async operations.

use std::fmt::Display;
use std::future::Future;
use std::time::Instant;

use tracing::{error, info};

/// Await `operation`, logging how long it took.
///
/// Success is logged at info, failure at error together with the error.
/// The result is returned unchanged either way.
pub async fn log_execution_time<F, T, E>(name: &str, operation: F) -> Result<T, E>
where
    F: Future<Output = Result<T, E>>,
    E: Display,
{
    let start = Instant::now();
    let result = operation.await;
    let secs = start.elapsed().as_secs_f64();

    match &result {
        Ok(_) => info!("{} executed in {:.2}s", name, secs),
        Err(e) => error!("{} failed after {:.2}s: {}", name, secs, e),
    }

    result
}

/// Await an operation that cannot fail, logging how long it took.
pub async fn log_completion_time<F>(name: &str, operation: F) -> F::Output
where
    F: Future,
{
    let start = Instant::now();
    let output = operation.await;
    info!("{} executed in {:.2}s", name, start.elapsed().as_secs_f64());
    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::users::UserError;

    #[tokio::test]
    async fn test_passes_value_through() {
        let result: Result<u32, UserError> = log_execution_time("answer", async { Ok(42) }).await;
        assert_eq!(result.unwrap(), 42);
    }

    #[tokio::test]
    async fn test_returns_original_error() {
        let result: Result<(), UserError> = log_execution_time("lookup", async {
            Err(UserError::UnknownField("nickname".to_string()))
        })
        .await;

        assert!(matches!(result, Err(UserError::UnknownField(ref f)) if f == "nickname"));
    }

    #[tokio::test]
    async fn test_completion_time_returns_output() {
        let output = log_completion_time("sum", async { (1..=4).sum::<u32>() }).await;
        assert_eq!(output, 10);
    }

    #[tokio::test]
    async fn test_works_with_anyhow() {
        let result: anyhow::Result<()> =
            log_execution_time("demo", async { Err(anyhow::anyhow!("boom")) }).await;
        assert_eq!(result.unwrap_err().to_string(), "boom");
    }
}
