//! Splitting work into contiguous partitions.
//!
//! Ranges are split by *iteration number* rather than by raw index, so a stepped
//! loop `start, start + step, ...` is cut at step-aligned boundaries and every
//! partition visits exactly the indices the sequential loop would.

use std::ops::Range;

/// Number of iterations of `for (i = start; i < end; i += step)`.
#[inline]
pub(crate) fn iteration_count(start: i128, end: i128, step: i128) -> u128 {
    debug_assert!(step > 0);
    if start >= end {
        0
    } else {
        (end - start).unsigned_abs().div_ceil(step.unsigned_abs())
    }
}

/// Length of each partition when `len` items are shared by `workers` dispatched
/// workers plus the calling thread.
///
/// Never less than one, so short inputs are not split below a single item.
#[inline]
pub(crate) fn chunk_len(len: usize, workers: usize) -> usize {
    len.div_ceil(workers.saturating_add(1)).max(1)
}

/// Split `0..len` into contiguous, non-overlapping ranges covering every item once.
///
/// At most `workers + 1` ranges are produced; fewer when `len` is small.
pub(crate) fn split(len: usize, workers: usize) -> Vec<Range<usize>> {
    if len == 0 {
        return Vec::new();
    }
    let chunk = chunk_len(len, workers);
    let mut out = Vec::with_capacity(len.div_ceil(chunk));
    let mut lo = 0;
    while lo < len {
        let hi = (lo + chunk).min(len);
        out.push(lo..hi);
        lo = hi;
    }
    out
}

/// Partition an owned sequence into contiguous groups, advancing through it once.
pub(crate) fn split_owned<T>(items: Vec<T>, workers: usize) -> Vec<Vec<T>> {
    if items.is_empty() {
        return Vec::new();
    }
    let chunk = chunk_len(items.len(), workers);
    let mut out = Vec::with_capacity(items.len().div_ceil(chunk));
    let mut iter = items.into_iter();
    loop {
        let part: Vec<T> = iter.by_ref().take(chunk).collect();
        if part.is_empty() {
            break;
        }
        out.push(part);
    }
    out
}
