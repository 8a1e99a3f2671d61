use crate::distance::Coordinate;
use crate::error::{Error, Result};

/// Objects × features input matrix.
///
/// Guaranteed non-empty, rectangular, and finite.
#[derive(Clone, Debug, PartialEq)]
pub struct ClusteringData {
    rows: Vec<Vec<f64>>,
    dim: usize,
}

impl ClusteringData {
    /// Validate and wrap a list of feature rows.
    ///
    /// # Errors
    ///
    /// - [`Error::EmptyInput`] if there are no rows.
    /// - [`Error::DimensionMismatch`] if row lengths differ.
    /// - [`Error::InvalidParameter`] for zero-dimensional or non-finite data.
    pub fn new(rows: Vec<Vec<f64>>) -> Result<Self> {
        let Some(first) = rows.first() else {
            return Err(Error::EmptyInput);
        };
        let dim = first.len();
        if dim == 0 {
            return Err(Error::InvalidParameter {
                name: "dimension",
                message: "must be at least 1",
            });
        }
        for row in &rows {
            if row.len() != dim {
                return Err(Error::DimensionMismatch {
                    expected: dim,
                    found: row.len(),
                });
            }
            if row.iter().any(|x| !x.is_finite()) {
                return Err(Error::InvalidParameter {
                    name: "data",
                    message: "values must be finite",
                });
            }
        }
        Ok(Self { rows, dim })
    }

    /// Build from coordinates.
    pub fn from_coordinates(points: &[Coordinate]) -> Result<Self> {
        Self::new(points.iter().map(|p| p.as_slice().to_vec()).collect())
    }

    /// Number of objects.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Always false: empty data is rejected at construction.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Feature dimension.
    pub fn dimension(&self) -> usize {
        self.dim
    }

    /// Features of object `i`.
    pub fn row(&self, i: usize) -> &[f64] {
        &self.rows[i]
    }

    /// All rows.
    pub fn rows(&self) -> &[Vec<f64>] {
        &self.rows
    }
}

impl TryFrom<Vec<Vec<f64>>> for ClusteringData {
    type Error = Error;

    fn try_from(rows: Vec<Vec<f64>>) -> Result<Self> {
        Self::new(rows)
    }
}
