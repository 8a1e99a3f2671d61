use std::any::Any;
use std::panic::{self, AssertUnwindSafe};
#[cfg(feature = "rayon")]
use std::sync::{Arc, Mutex};
use std::thread;

use tracing::trace;

use super::index::LoopIndex;
use super::partition;
use crate::error::{Error, Result};

/// How partitions are dispatched to workers.
///
/// Every parallel operation funnels through a single fork-join entry point that
/// matches on this value, so switching strategy is a configuration choice.
/// The default is [`Executor::ScopedThreads`] with the `parallel` feature and
/// [`Executor::Sequential`] without it.
#[derive(Clone, Debug, Default)]
pub enum Executor {
    /// One OS thread per dispatched partition, joined before returning.
    #[cfg_attr(feature = "parallel", default)]
    ScopedThreads,
    /// Everything runs on the calling thread.
    #[cfg_attr(not(feature = "parallel"), default)]
    Sequential,
    /// Partitions are spawned into a dedicated rayon pool.
    #[cfg(feature = "rayon")]
    Rayon(Arc<rayon::ThreadPool>),
}

/// A bounded fork-join worker pool.
///
/// `workers` counts threads *besides* the caller: work is split into at most
/// `workers + 1` contiguous partitions and the last one always runs inline.
/// Every operation blocks until all partitions have finished.
#[derive(Clone, Debug)]
pub struct Pool {
    workers: usize,
    executor: Executor,
}

/// `available_parallelism() - 1`, or 0 when it cannot be determined.
pub fn available_workers() -> usize {
    thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(1)
        .saturating_sub(1)
}

impl Pool {
    /// Pool with a fixed number of extra worker threads.
    ///
    /// Uses the default [`Executor`]; without the `parallel` feature that is
    /// [`Executor::Sequential`] and no thread is ever spawned.
    pub fn new(workers: usize) -> Self {
        Self {
            workers,
            executor: Executor::default(),
        }
    }

    /// Pool that never leaves the calling thread.
    pub fn sequential() -> Self {
        Self {
            workers: 0,
            executor: Executor::Sequential,
        }
    }

    /// Pool sized from the hardware, computed once at construction.
    ///
    /// Without the `parallel` feature this is [`Pool::sequential`].
    pub fn from_available_parallelism() -> Self {
        #[cfg(feature = "parallel")]
        {
            Self::new(available_workers())
        }
        #[cfg(not(feature = "parallel"))]
        {
            Self::sequential()
        }
    }

    /// Pool backed by a dedicated rayon thread pool with `workers` threads.
    #[cfg(feature = "rayon")]
    pub fn rayon(workers: usize) -> Result<Self> {
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(workers.max(1))
            .thread_name(|i| format!("antclump-rayon-{i}"))
            .build()
            .map_err(|e| Error::Other(e.to_string()))?;
        Ok(Self {
            workers,
            executor: Executor::Rayon(Arc::new(pool)),
        })
    }

    /// Replace the executor, keeping the worker count.
    pub fn with_executor(mut self, executor: Executor) -> Self {
        self.executor = executor;
        self
    }

    /// Number of threads used besides the caller.
    pub fn workers(&self) -> usize {
        match self.executor {
            Executor::Sequential => 0,
            _ => self.workers,
        }
    }

    /// The configured executor.
    pub fn executor(&self) -> &Executor {
        &self.executor
    }

    /// Invoke `task(i)` for `i = start, start + step, ...` while `i < end`.
    ///
    /// Indices are visited exactly once each, in no particular order across
    /// partitions. A panicking task is reported as [`Error::WorkerFailure`] once
    /// every partition has been joined. The index may be any primitive integer
    /// type (see [`LoopIndex`]).
    ///
    /// # Errors
    ///
    /// [`Error::InvalidParameter`] if `step` is not positive, or if the range has
    /// more iterations than fit in a `usize`.
    pub fn parallel_for<I, F>(&self, start: I, end: I, step: I, task: F) -> Result<()>
    where
        I: LoopIndex,
        F: Fn(I) + Sync,
    {
        self.try_parallel_for(start, end, step, |i| {
            task(i);
            Ok(())
        })
    }

    /// [`Pool::parallel_for`] with a step of one.
    pub fn parallel_for_range<I, F>(&self, start: I, end: I, task: F) -> Result<()>
    where
        I: LoopIndex,
        F: Fn(I) + Sync,
    {
        self.parallel_for(start, end, I::from_i128(1), task)
    }

    /// Fallible [`Pool::parallel_for`].
    ///
    /// A partition stops at its first failing index; other partitions run to
    /// completion. The first failure in partition order is returned.
    pub fn try_parallel_for<I, F>(&self, start: I, end: I, step: I, task: F) -> Result<()>
    where
        I: LoopIndex,
        F: Fn(I) -> Result<()> + Sync,
    {
        let (start, end, step) = (start.to_i128(), end.to_i128(), step.to_i128());
        if step <= 0 {
            return Err(Error::InvalidParameter {
                name: "step",
                message: "must be at least 1",
            });
        }
        let count = usize::try_from(partition::iteration_count(start, end, step)).map_err(|_| {
            Error::InvalidParameter {
                name: "end",
                message: "range has more iterations than fit in usize",
            }
        })?;
        let ranges = partition::split(count, self.workers());
        self.run_partitions(ranges, |range| {
            for k in range {
                task(I::from_i128(start + k as i128 * step))?;
            }
            Ok(())
        })
    }

    /// Invoke `task` on every element of a slice.
    pub fn parallel_for_each<T, F>(&self, items: &[T], task: F) -> Result<()>
    where
        T: Sync,
        F: Fn(&T) + Sync,
    {
        let chunk = partition::chunk_len(items.len(), self.workers());
        let parts: Vec<&[T]> = items.chunks(chunk).collect();
        self.run_partitions(parts, |part| {
            part.iter().for_each(&task);
            Ok(())
        })
    }

    /// Invoke `task` on every element of a mutable slice.
    ///
    /// Each element is handed to exactly one worker, which makes this the way to
    /// collect per-position results without locking.
    pub fn parallel_for_each_mut<T, F>(&self, items: &mut [T], task: F) -> Result<()>
    where
        T: Send,
        F: Fn(&mut T) + Sync,
    {
        let chunk = partition::chunk_len(items.len(), self.workers());
        let parts: Vec<&mut [T]> = items.chunks_mut(chunk).collect();
        self.run_partitions(parts, |part| {
            part.iter_mut().for_each(&task);
            Ok(())
        })
    }

    /// Invoke `task` on every item of a forward-only sequence.
    ///
    /// The sequence is advanced once on the calling thread and the items are then
    /// partitioned like a slice.
    pub fn parallel_for_each_iter<I, F>(&self, items: I, task: F) -> Result<()>
    where
        I: IntoIterator,
        I::Item: Send,
        F: Fn(I::Item) + Sync,
    {
        self.try_parallel_for_each_iter(items, |item| {
            task(item);
            Ok(())
        })
    }

    /// Fallible [`Pool::parallel_for_each_iter`].
    pub fn try_parallel_for_each_iter<I, F>(&self, items: I, task: F) -> Result<()>
    where
        I: IntoIterator,
        I::Item: Send,
        F: Fn(I::Item) -> Result<()> + Sync,
    {
        let items: Vec<I::Item> = items.into_iter().collect();
        let parts = partition::split_owned(items, self.workers());
        self.run_partitions(parts, |part| {
            for item in part {
                task(item)?;
            }
            Ok(())
        })
    }

    /// Fork-join over pre-built partitions; the last one runs on the caller.
    fn run_partitions<T, F>(&self, parts: Vec<T>, body: F) -> Result<()>
    where
        T: Send,
        F: Fn(T) -> Result<()> + Sync,
    {
        trace!(partitions = parts.len(), workers = self.workers(), "fork");
        match &self.executor {
            Executor::Sequential => {
                for (idx, part) in parts.into_iter().enumerate() {
                    run_caught(idx, part, &body)?;
                }
                Ok(())
            }
            Executor::ScopedThreads => run_scoped(parts, &body),
            #[cfg(feature = "rayon")]
            Executor::Rayon(pool) => run_rayon(pool, parts, &body),
        }
    }
}

impl Default for Pool {
    fn default() -> Self {
        Self::from_available_parallelism()
    }
}

fn run_scoped<T, F>(mut parts: Vec<T>, body: &F) -> Result<()>
where
    T: Send,
    F: Fn(T) -> Result<()> + Sync,
{
    let Some(inline) = parts.pop() else {
        return Ok(());
    };
    let inline_idx = parts.len();
    if parts.is_empty() {
        return run_caught(inline_idx, inline, body);
    }

    thread::scope(|s| {
        let mut handles = Vec::with_capacity(parts.len());
        for (idx, part) in parts.into_iter().enumerate() {
            let handle = thread::Builder::new()
                .name(format!("antclump-worker-{idx}"))
                .spawn_scoped(s, move || run_caught(idx, part, body))
                .map_err(|e| Error::Other(format!("failed to spawn worker {idx}: {e}")))?;
            handles.push((idx, handle));
        }

        let inline_result = run_caught(inline_idx, inline, body);

        let mut first: Option<Error> = None;
        for (idx, handle) in handles {
            let result = handle.join().unwrap_or_else(|payload| {
                Err(Error::WorkerFailure {
                    partition: idx,
                    message: panic_message(payload.as_ref()),
                })
            });
            if let Err(e) = result {
                first.get_or_insert(e);
            }
        }
        match first {
            Some(e) => Err(e),
            None => inline_result,
        }
    })
}

#[cfg(feature = "rayon")]
fn run_rayon<T, F>(pool: &rayon::ThreadPool, mut parts: Vec<T>, body: &F) -> Result<()>
where
    T: Send,
    F: Fn(T) -> Result<()> + Sync,
{
    let Some(inline) = parts.pop() else {
        return Ok(());
    };
    let inline_idx = parts.len();
    let failures: Mutex<Vec<(usize, Error)>> = Mutex::new(Vec::new());

    pool.in_place_scope(|s| {
        for (idx, part) in parts.into_iter().enumerate() {
            let failures = &failures;
            s.spawn(move |_| {
                if let Err(e) = run_caught(idx, part, body) {
                    if let Ok(mut guard) = failures.lock() {
                        guard.push((idx, e));
                    }
                }
            });
        }
        if let Err(e) = run_caught(inline_idx, inline, body) {
            if let Ok(mut guard) = failures.lock() {
                guard.push((inline_idx, e));
            }
        }
    });

    let mut failures = failures
        .into_inner()
        .map_err(|_| Error::Other("failure list poisoned".to_string()))?;
    failures.sort_by_key(|(idx, _)| *idx);
    match failures.into_iter().next() {
        Some((_, e)) => Err(e),
        None => Ok(()),
    }
}

fn run_caught<T, F>(partition: usize, part: T, body: &F) -> Result<()>
where
    F: Fn(T) -> Result<()>,
{
    match panic::catch_unwind(AssertUnwindSafe(|| body(part))) {
        Ok(result) => result,
        Err(payload) => Err(Error::WorkerFailure {
            partition,
            message: panic_message(payload.as_ref()),
        }),
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "non-string panic payload".to_string()
    }
}
