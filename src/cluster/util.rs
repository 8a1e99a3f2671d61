#[inline]
pub(crate) fn squared_euclidean(a: &[f64], b: &[f64]) -> f64 {
    debug_assert_eq!(a.len(), b.len());
    a.iter()
        .zip(b.iter())
        .map(|(x, y)| {
            let d = x - y;
            d * d
        })
        .sum()
}

/// Per-cluster mean of the rows assigned to it.
///
/// Returns `None` for clusters with no members.
pub(crate) fn cluster_centers(
    rows: &[Vec<f64>],
    labels: &[usize],
    n_clusters: usize,
    dim: usize,
) -> Vec<Option<Vec<f64>>> {
    debug_assert_eq!(rows.len(), labels.len());
    let mut sums = vec![vec![0.0; dim]; n_clusters];
    let mut counts = vec![0usize; n_clusters];

    for (row, &label) in rows.iter().zip(labels) {
        counts[label] += 1;
        for (s, &x) in sums[label].iter_mut().zip(row) {
            *s += x;
        }
    }

    sums.into_iter()
        .zip(counts)
        .map(|(mut sum, count)| {
            if count == 0 {
                return None;
            }
            let inv = 1.0 / count as f64;
            sum.iter_mut().for_each(|s| *s *= inv);
            Some(sum)
        })
        .collect()
}
