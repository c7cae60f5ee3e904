//! Worker pool for concurrent processing with backpressure.
//!
//! Spawns N persistent tokio tasks that pull work items from a bounded
//! async-channel. Results are sent to an unbounded channel for consumption
//! by the caller.
//!
//! Uses `async-channel` for work distribution: its `Receiver` is `Clone`,
//! so each worker gets its own handle with no `Mutex` around a shared
//! receiver.

use std::future::Future;
use std::sync::Arc;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;

/// A pool of worker tasks that process items concurrently.
///
/// Every submitted item produces exactly one result; callers rely on this to
/// know the scan is complete once [`recv()`](Self::recv) returns `None`.
///
/// # Example
///
/// ```ignore
/// let mut pool = WorkerPool::start(4, items, |item| async move {
///     process(item).await
/// });
///
/// while let Some(result) = pool.recv().await {
///     handle(result);
/// }
/// ```
pub struct WorkerPool<R: Send + 'static> {
    result_rx: mpsc::UnboundedReceiver<R>,
    _handles: Vec<JoinHandle<()>>,
}

impl<R: Send + 'static> WorkerPool<R> {
    /// Spawn N workers, submit all items, and return a pool for receiving results.
    ///
    /// Items are submitted via a bounded channel (capacity N) providing
    /// natural backpressure. Submission happens in a background task so the
    /// caller can start receiving results immediately. `n` is clamped to at
    /// least one worker.
    pub fn start<W, F, Fut>(n: usize, items: Vec<W>, process_fn: F) -> Self
    where
        W: Send + 'static,
        F: Fn(W) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = R> + Send + 'static,
    {
        let n = n.max(1);
        let (work_tx, work_rx) = async_channel::bounded::<W>(n);
        let (result_tx, result_rx) = mpsc::unbounded_channel::<R>();
        let process_fn = Arc::new(process_fn);

        let handles: Vec<JoinHandle<()>> = (0..n)
            .map(|_| {
                let work_rx = work_rx.clone();
                let result_tx = result_tx.clone();
                let process_fn = process_fn.clone();
                tokio::spawn(async move {
                    while let Ok(item) = work_rx.recv().await {
                        let r = process_fn(item).await;
                        if result_tx.send(r).is_err() {
                            break; // Receiver dropped
                        }
                    }
                    // Channel closed (sender dropped) → worker exits
                })
            })
            .collect();

        // Drop our copy of result_tx so the channel closes when all workers finish
        drop(result_tx);

        tokio::spawn(async move {
            for item in items {
                if work_tx.send(item).await.is_err() {
                    break;
                }
            }
            // work_tx dropped here -> channel closes -> workers drain remaining items then stop
        });

        Self {
            result_rx,
            _handles: handles,
        }
    }

    /// Receive the next result. Returns `None` when all items have been
    /// processed and all workers have shut down.
    pub async fn recv(&mut self) -> Option<R> {
        self.result_rx.recv().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_every_item_yields_one_result() {
        let items: Vec<u32> = (0..50).collect();
        let mut pool = WorkerPool::start(4, items, |n| async move { n * 2 });

        let mut results = Vec::new();
        while let Some(r) = pool.recv().await {
            results.push(r);
        }
        results.sort();
        assert_eq!(results, (0..50).map(|n| n * 2).collect::<Vec<_>>());
    }

    #[tokio::test]
    async fn test_zero_workers_still_processes() {
        let mut pool = WorkerPool::start(0, vec![1, 2, 3], |n| async move { n });
        let mut count = 0;
        while pool.recv().await.is_some() {
            count += 1;
        }
        assert_eq!(count, 3);
    }

    #[tokio::test]
    async fn test_no_items_closes_immediately() {
        let mut pool = WorkerPool::start(2, Vec::<u8>::new(), |n| async move { n });
        assert!(pool.recv().await.is_none());
    }
}
