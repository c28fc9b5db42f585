//! # WorkerPool — Fixed-Chunk Parallel Dispatch
//!
//! Splits bulk per-entity work across a fixed number of worker threads and
//! blocks until every chunk has finished. This is a synchronous fan-out/
//! fan-in barrier, not fire-and-forget: when [`for_each_indexed`] returns,
//! all writes made by the workers are visible to the caller.
//!
//! ## Chunking
//!
//! The index range is cut into `worker_count` contiguous chunks of
//! `len / worker_count` entries (integer division). The final chunk runs to
//! the end of the slice, so it absorbs the remainder and may be larger than
//! the others. With fewer items than workers each chunk holds one item and
//! the surplus workers get nothing.
//!
//! ## Safety model
//!
//! Each worker receives an exclusive sub-slice via `split_at_mut`, so
//! cross-chunk writes are unrepresentable. Shared reads (e.g. the transform
//! store during resolution) go through a `&` capture in the closure. The
//! barrier comes from [`rayon::ThreadPool::scope`], which joins every
//! spawned task before returning.
//!
//! [`for_each_indexed`]: WorkerPool::for_each_indexed

/// A fixed-size thread pool for bulk per-entity updates.
pub struct WorkerPool {
    pool: rayon::ThreadPool,
    workers: usize,
}

impl WorkerPool {
    /// Build a pool with the given number of worker threads.
    ///
    /// # Panics
    ///
    /// Panics if `workers` is zero or the underlying threads cannot be
    /// spawned.
    pub fn new(workers: usize) -> Self {
        assert!(workers > 0, "WorkerPool needs at least one worker");
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(workers)
            .build()
            .expect("failed to build worker pool");
        Self { pool, workers }
    }

    /// Number of worker threads.
    pub fn worker_count(&self) -> usize {
        self.workers
    }

    /// Run `f(index, &mut item)` for every item, fanned out across the
    /// workers in contiguous chunks. Blocks until every chunk completes.
    pub fn for_each_indexed<T, F>(&self, items: &mut [T], f: F)
    where
        T: Send,
        F: Fn(usize, &mut T) + Sync,
    {
        let len = items.len();
        if len == 0 {
            return;
        }
        let chunk = (len / self.workers).max(1);

        self.pool.scope(|scope| {
            let mut rest = items;
            let mut start = 0;
            let mut worker = 0;
            while !rest.is_empty() {
                // The last worker's chunk runs to the end of the slice.
                let end = if worker + 1 >= self.workers {
                    len
                } else {
                    (start + chunk).min(len)
                };
                let (head, tail) = std::mem::take(&mut rest).split_at_mut(end - start);
                rest = tail;
                let f = &f;
                scope.spawn(move |_| {
                    for (offset, item) in head.iter_mut().enumerate() {
                        f(start + offset, item);
                    }
                });
                start = end;
                worker += 1;
            }
        });
    }
}

impl Default for WorkerPool {
    /// Four workers, matching the runtime's default dispatch width.
    fn default() -> Self {
        Self::new(4)
    }
}
