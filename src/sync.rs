//! Optimistic Writes
//!
//! Local state changes first; the previous value is kept and handed back
//! if the remote write fails.

use std::future::Future;

use crate::error::AppError;

/// State captured before an optimistic change
#[derive(Debug, Clone, PartialEq)]
pub struct Rollback<T> {
    previous: T,
}

impl<T: Clone> Rollback<T> {
    pub fn capture(current: &T) -> Self {
        Self { previous: current.clone() }
    }
}

/// Await `write`; on failure pass the captured state to `restore`.
pub async fn commit_or_restore<T, R, W>(rollback: Rollback<T>, write: W, restore: impl FnOnce(T)) -> Result<R, AppError>
where
    W: Future<Output = Result<R, AppError>>,
{
    match write.await {
        Ok(value) => Ok(value),
        Err(e) => {
            log::warn!("write failed, restoring previous state: {}", e);
            restore(rollback.previous);
            Err(e)
        }
    }
}
