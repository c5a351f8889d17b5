//! Concurrent fan-out/fan-in over a list of fallible async operations.

use futures::future::join_all;
use std::future::Future;

/// Partitioned results of a batch run.
///
/// Counts are derived from the buckets and cannot drift from them. Within
/// each bucket, results keep the input order of their items.
#[derive(Debug, Clone)]
pub struct BatchOutcome<S, E> {
    /// Results of the items that succeeded.
    pub successes: Vec<S>,
    /// Results of the items that failed.
    pub errors: Vec<E>,
}

impl<S, E> BatchOutcome<S, E> {
    /// Number of items that succeeded.
    #[must_use]
    pub fn success_count(&self) -> usize {
        self.successes.len()
    }

    /// Number of items that failed.
    #[must_use]
    pub fn error_count(&self) -> usize {
        self.errors.len()
    }

    /// Total number of items processed.
    #[must_use]
    pub fn total(&self) -> usize {
        self.successes.len() + self.errors.len()
    }

    /// Whether any item failed.
    #[must_use]
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }
}

/// Run `op` over every item and partition the settled results.
///
/// All invocations are created before any result is awaited, then joined
/// concurrently. A failing item lands in the error bucket and never aborts
/// the rest of the batch.
pub async fn run_batch<T, S, E, F, Fut>(
    items: impl IntoIterator<Item = T>,
    mut op: F,
) -> BatchOutcome<S, E>
where
    F: FnMut(T) -> Fut,
    Fut: Future<Output = Result<S, E>>,
{
    let pending: Vec<Fut> = items.into_iter().map(|item| op(item)).collect();

    let mut outcome = BatchOutcome {
        successes: Vec::new(),
        errors: Vec::new(),
    };
    for result in join_all(pending).await {
        match result {
            Ok(success) => outcome.successes.push(success),
            Err(error) => outcome.errors.push(error),
        }
    }
    outcome
}
