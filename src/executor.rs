//! Concurrency-limited task runner.
//!
//! A fixed number of workers pull indices from a shared cursor until the
//! input is exhausted, so no worker sits idle while items remain. Workers are
//! futures joined on the caller's task; the cursor and completion counter are
//! atomics so the same code stays correct if a unit hops threads.

use futures_util::future::try_join_all;
use std::future::Future;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Runs `unit` over every item with at most `limit` in flight.
///
/// `on_progress(completed, total)` is called once after every item finishes,
/// whether it succeeded or not, with `completed` counting up from 1 to
/// `items.len()`. Results come back in input order.
///
/// The first error is returned to the caller and the remaining workers are
/// dropped, cancelling whatever they were doing. A `limit` of 0 is treated
/// as 1.
pub async fn run_bounded<'a, T, R, E, F, Fut, P>(
    items: &'a [T],
    limit: usize,
    unit: F,
    on_progress: P,
) -> Result<Vec<R>, E>
where
    F: Fn(&'a T, usize) -> Fut,
    Fut: Future<Output = Result<R, E>>,
    P: Fn(usize, usize),
{
    let total = items.len();
    if total == 0 {
        return Ok(Vec::new());
    }

    let worker_count = limit.max(1).min(total);
    let cursor = AtomicUsize::new(0);
    let completed = AtomicUsize::new(0);

    let (cursor, completed, unit, on_progress) = (&cursor, &completed, &unit, &on_progress);
    let workers = (0..worker_count).map(move |_| async move {
        let mut finished = Vec::new();
        loop {
            let index = cursor.fetch_add(1, Ordering::SeqCst);
            if index >= total {
                return Ok::<_, E>(finished);
            }

            let outcome = unit(&items[index], index).await;

            // Progress advances before the outcome is inspected so failures are counted too.
            let done = completed.fetch_add(1, Ordering::SeqCst) + 1;
            on_progress(done, total);

            finished.push((index, outcome?));
        }
    });

    let mut slots: Vec<(usize, R)> = try_join_all(workers).await?.into_iter().flatten().collect();
    slots.sort_unstable_by_key(|(index, _)| *index);
    Ok(slots.into_iter().map(|(_, result)| result).collect())
}
