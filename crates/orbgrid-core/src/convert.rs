//! Conversion between regular and vector grid representations.
//!
//! Flattening expands three per-axis coordinate vectors into their Cartesian
//! product. The flattened index of `(x[i], y[j], z[k])` is
//! `i * Ny * Nz + j * Nz + k`: x varies slowest and z fastest. Downstream
//! evaluators index into flattened arrays with this order, so it must not
//! change.

use ndarray::{Array1, ArrayView1};

use crate::regular::{RegularGrid, DEGENERATE_SPACING};
use crate::types::{AxisSpec, GridError};
use crate::vector::VectorGrid;

/// Cartesian product of three coordinate vectors in row-major order.
pub fn cartesian_product(
    x: ArrayView1<'_, f64>,
    y: ArrayView1<'_, f64>,
    z: ArrayView1<'_, f64>,
) -> VectorGrid {
    let total = x.len() * y.len() * z.len();
    let mut gx = Vec::with_capacity(total);
    let mut gy = Vec::with_capacity(total);
    let mut gz = Vec::with_capacity(total);

    for &xi in x.iter() {
        for &yj in y.iter() {
            for &zk in z.iter() {
                gx.push(xi);
                gy.push(yj);
                gz.push(zk);
            }
        }
    }

    VectorGrid::from_arrays_unchecked(Array1::from(gx), Array1::from(gy), Array1::from(gz))
}

/// Flatten a regular grid into a vector grid.
pub fn grid_to_vector(grid: &RegularGrid) -> VectorGrid {
    let [x, y, z] = &grid.coords;
    let vector = cartesian_product(x.view(), y.view(), z.view());
    log::debug!("Flattened regular grid into {} points", vector.len());
    vector
}

/// Recover a regular grid from a flattened vector grid.
///
/// The vector grid must be the row-major Cartesian product of three
/// coordinate vectors (as produced by [`grid_to_vector`]). Per-axis spacing
/// is taken from the first and last recovered coordinate.
///
/// # Errors
/// Returns [`GridError::Precondition`] if the grid is empty or its points do
/// not form a Cartesian product in that order.
pub fn vector_to_grid(vector: &VectorGrid) -> Result<RegularGrid, GridError> {
    let n = vector.len();
    if n == 0 {
        return Err(GridError::Precondition(
            "cannot recover a regular grid from an empty vector grid".into(),
        ));
    }

    let (x, y, z) = (vector.x(), vector.y(), vector.z());

    // Length of the innermost run sharing the first (x, y) pair.
    let nz = (1..n).find(|&i| x[i] != x[0] || y[i] != y[0]).unwrap_or(n);
    // Length of the block sharing the first x value.
    let nyz = (1..n).find(|&i| x[i] != x[0]).unwrap_or(n);

    if nyz % nz != 0 || n % nyz != 0 {
        return Err(not_a_product(n));
    }
    let ny = nyz / nz;
    let nx = n / nyz;

    let axis_x = Array1::from_iter((0..nx).map(|i| x[i * nyz]));
    let axis_y = Array1::from_iter((0..ny).map(|j| y[j * nz]));
    let axis_z = Array1::from_iter((0..nz).map(|k| z[k]));

    let expanded = cartesian_product(axis_x.view(), axis_y.view(), axis_z.view());
    if expanded != *vector {
        return Err(not_a_product(n));
    }

    let coords = [axis_x, axis_y, axis_z];
    let mut specs = [AxisSpec::default(); 3];
    let mut spacing = [DEGENERATE_SPACING; 3];
    for (i, axis) in coords.iter().enumerate() {
        let count = axis.len();
        let first = axis[0];
        let last = axis[count - 1];
        let (min, max) = axis
            .iter()
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &v| (lo.min(v), hi.max(v)));
        specs[i] = AxisSpec::new(min, max, count);
        if count > 1 {
            spacing[i] = (last - first) / (count - 1) as f64;
        }
    }

    log::debug!("Recovered regular grid {}x{}x{} from {} points", nx, ny, nz, n);
    Ok(RegularGrid { specs, spacing, coords })
}

fn not_a_product(n: usize) -> GridError {
    GridError::Precondition(format!(
        "vector grid of {} points is not a row-major Cartesian product",
        n
    ))
}
