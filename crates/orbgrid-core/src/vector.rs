//! Vector grids: explicit lists of 3-D points.

use ndarray::Array1;

use crate::types::{Axis, GridError};

/// A grid stored as three equal-length coordinate arrays.
///
/// The i-th element of `x`, `y` and `z` together form the i-th point.
#[derive(Debug, Clone, PartialEq)]
pub struct VectorGrid {
    x: Array1<f64>,
    y: Array1<f64>,
    z: Array1<f64>,
}

impl VectorGrid {
    /// Create a vector grid from coordinate arrays.
    ///
    /// # Errors
    /// Returns [`GridError::Shape`] if the arrays differ in length.
    pub fn new(x: Array1<f64>, y: Array1<f64>, z: Array1<f64>) -> Result<Self, GridError> {
        if x.len() != y.len() || y.len() != z.len() {
            return Err(GridError::Shape { x: x.len(), y: y.len(), z: z.len() });
        }
        Ok(Self { x, y, z })
    }

    pub(crate) fn from_arrays_unchecked(x: Array1<f64>, y: Array1<f64>, z: Array1<f64>) -> Self {
        debug_assert!(x.len() == y.len() && y.len() == z.len());
        Self { x, y, z }
    }

    /// Create a vector grid from a list of points.
    pub fn from_points(points: &[[f64; 3]]) -> Self {
        Self {
            x: points.iter().map(|p| p[0]).collect(),
            y: points.iter().map(|p| p[1]).collect(),
            z: points.iter().map(|p| p[2]).collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.x.len()
    }

    pub fn is_empty(&self) -> bool {
        self.x.is_empty()
    }

    pub fn x(&self) -> &Array1<f64> {
        &self.x
    }

    pub fn y(&self) -> &Array1<f64> {
        &self.y
    }

    pub fn z(&self) -> &Array1<f64> {
        &self.z
    }

    /// Coordinates along one axis.
    pub fn axis(&self, axis: Axis) -> &Array1<f64> {
        match axis {
            Axis::X => &self.x,
            Axis::Y => &self.y,
            Axis::Z => &self.z,
        }
    }

    /// The point at index `i`, or `None` if out of range.
    pub fn point(&self, i: usize) -> Option<[f64; 3]> {
        if i < self.len() {
            Some([self.x[i], self.y[i], self.z[i]])
        } else {
            None
        }
    }

    /// Iterate over all points in storage order.
    pub fn points(&self) -> impl Iterator<Item = [f64; 3]> + '_ {
        self.x
            .iter()
            .zip(self.y.iter())
            .zip(self.z.iter())
            .map(|((&x, &y), &z)| [x, y, z])
    }

    /// Consume the grid, returning `(x, y, z)`.
    pub fn into_arrays(self) -> (Array1<f64>, Array1<f64>, Array1<f64>) {
        (self.x, self.y, self.z)
    }
}
