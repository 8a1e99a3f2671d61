//! Points and dense pairwise distances.

use std::sync::Arc;

use crate::cluster::util::squared_euclidean;
use crate::error::{Error, Result};
use crate::parallel::Pool;

/// A point in feature space. Immutable once built.
#[derive(Clone, Debug, PartialEq)]
pub struct Coordinate {
    values: Vec<f64>,
}

impl Coordinate {
    /// Wrap a list of dimension values.
    pub fn new(values: Vec<f64>) -> Self {
        Self { values }
    }

    /// Number of dimensions.
    pub fn dimension(&self) -> usize {
        self.values.len()
    }

    /// Dimension values in order.
    pub fn as_slice(&self) -> &[f64] {
        &self.values
    }

    /// Euclidean distance to `other`.
    ///
    /// # Errors
    ///
    /// [`Error::DimensionMismatch`] if the two points have different dimensionality.
    pub fn distance(&self, other: &Coordinate) -> Result<f64> {
        if self.dimension() != other.dimension() {
            return Err(Error::DimensionMismatch {
                expected: self.dimension(),
                found: other.dimension(),
            });
        }
        Ok(squared_euclidean(&self.values, &other.values).sqrt())
    }
}

impl From<Vec<f64>> for Coordinate {
    fn from(values: Vec<f64>) -> Self {
        Self::new(values)
    }
}

impl<const D: usize> From<[f64; D]> for Coordinate {
    fn from(values: [f64; D]) -> Self {
        Self::new(values.to_vec())
    }
}

/// Square matrix of pairwise distances, stored row-major.
///
/// Cloning is cheap and clones share storage, so a matrix can be handed to
/// workers freely. [`DistanceMatrix::make_mut`] detaches before writing.
#[derive(Clone, Debug, PartialEq)]
pub struct DistanceMatrix {
    n: usize,
    data: Arc<Vec<f64>>,
}

impl DistanceMatrix {
    /// Wrap a precomputed matrix.
    ///
    /// # Errors
    ///
    /// [`Error::NonSquareMatrix`] if any row length differs from the row count.
    pub fn from_matrix(rows: Vec<Vec<f64>>) -> Result<Self> {
        let n = rows.len();
        let mut data = Vec::with_capacity(n * n);
        for (row, values) in rows.into_iter().enumerate() {
            if values.len() != n {
                return Err(Error::NonSquareMatrix {
                    row,
                    expected: n,
                    found: values.len(),
                });
            }
            data.extend(values);
        }
        Ok(Self {
            n,
            data: Arc::new(data),
        })
    }

    /// Compute all pairwise distances on the calling thread.
    pub fn from_coordinates(points: &[Coordinate]) -> Result<Self> {
        Self::from_coordinates_with(points, &Pool::sequential())
    }

    /// Compute all pairwise distances, one row per task on `pool`.
    ///
    /// # Errors
    ///
    /// [`Error::DimensionMismatch`] if the points do not share one dimensionality.
    pub fn from_coordinates_with(points: &[Coordinate], pool: &Pool) -> Result<Self> {
        let n = points.len();
        let mut rows: Vec<Vec<f64>> = vec![Vec::new(); n];
        pool.try_parallel_for_each_iter(rows.iter_mut().enumerate(), |(i, row)| {
            row.reserve_exact(n);
            for other in points {
                row.push(points[i].distance(other)?);
            }
            Ok(())
        })?;
        Self::from_matrix(rows)
    }

    /// Number of points.
    pub fn len(&self) -> usize {
        self.n
    }

    /// True if the matrix has no points.
    pub fn is_empty(&self) -> bool {
        self.n == 0
    }

    /// Distance between points `i` and `j`.
    ///
    /// # Panics
    ///
    /// If either index is out of bounds.
    pub fn get(&self, i: usize, j: usize) -> f64 {
        assert!(i < self.n && j < self.n, "index ({i}, {j}) out of bounds");
        self.data[i * self.n + j]
    }

    /// Distances from point `i` to every point.
    ///
    /// # Panics
    ///
    /// If `i` is out of bounds.
    pub fn row(&self, i: usize) -> &[f64] {
        assert!(i < self.n, "row {i} out of bounds for {} points", self.n);
        &self.data[i * self.n..(i + 1) * self.n]
    }

    /// Copy out as nested rows.
    pub fn to_rows(&self) -> Vec<Vec<f64>> {
        self.data.chunks(self.n.max(1)).map(<[f64]>::to_vec).collect()
    }

    /// Mutable row-major storage, copied first if another handle shares it.
    pub fn make_mut(&mut self) -> &mut [f64] {
        Arc::make_mut(&mut self.data).as_mut_slice()
    }
}
