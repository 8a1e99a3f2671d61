//! Fork-join loop parallelism over a bounded worker pool.
//!
//! [`Pool`] splits a loop or a sequence into contiguous partitions, hands all but
//! one of them to worker threads, runs the last one on the calling thread, and
//! returns only after every partition has finished. Tasks return nothing; callers
//! that need results write into position-indexed storage, typically through
//! [`Pool::parallel_for_each_mut`].
//!
//! ```rust
//! use antclump::parallel::Pool;
//!
//! let pool = Pool::new(3);
//! let mut squares = vec![0usize; 16];
//! for (i, s) in squares.iter_mut().enumerate() {
//!     *s = i;
//! }
//! pool.parallel_for_each_mut(&mut squares, |v| *v *= *v).unwrap();
//! assert_eq!(squares[15], 225);
//! ```
//!
//! The pool size is explicit. [`Pool::from_available_parallelism`] computes
//! `available_parallelism() - 1` once; tests pass a fixed size instead.

mod index;
mod partition;
mod pool;

pub use index::LoopIndex;
pub use pool::{available_workers, Executor, Pool};

use crate::error::Result;

/// [`Pool::parallel_for`] on a pool sized from the hardware.
pub fn parallel_for<I, F>(start: I, end: I, step: I, task: F) -> Result<()>
where
    I: LoopIndex,
    F: Fn(I) + Sync,
{
    Pool::from_available_parallelism().parallel_for(start, end, step, task)
}

/// [`Pool::parallel_for_each`] on a pool sized from the hardware.
pub fn parallel_for_each<T, F>(items: &[T], task: F) -> Result<()>
where
    T: Sync,
    F: Fn(&T) + Sync,
{
    Pool::from_available_parallelism().parallel_for_each(items, task)
}
