//! Cartesian point sets from spherical regular grids.
//!
//! Given radii $r$, polar angles $\theta$ and azimuths $\phi$ (radians), each
//! combination maps to
//! $(r \sin\theta \cos\phi,\ r \sin\theta \sin\phi,\ r \cos\theta)$.
//! Points are laid out with r slowest and phi fastest, matching the
//! flattening order of [`convert`](crate::convert).

use ndarray::ArrayView1;

use crate::types::GridError;
use crate::vector::VectorGrid;

/// Expand spherical axes into a Cartesian vector grid.
///
/// # Errors
/// Returns [`GridError::InvalidParameter`] if any input array is empty.
pub fn spherical_to_cartesian(
    r: ArrayView1<'_, f64>,
    theta: ArrayView1<'_, f64>,
    phi: ArrayView1<'_, f64>,
) -> Result<VectorGrid, GridError> {
    for (name, len) in [("r", r.len()), ("theta", theta.len()), ("phi", phi.len())] {
        if len == 0 {
            return Err(GridError::InvalidParameter(format!(
                "spherical axis '{}' has no samples",
                name
            )));
        }
    }

    let mut points = Vec::with_capacity(r.len() * theta.len() * phi.len());
    for &ri in r.iter() {
        for &tj in theta.iter() {
            let (sin_t, cos_t) = tj.sin_cos();
            for &pk in phi.iter() {
                let (sin_p, cos_p) = pk.sin_cos();
                points.push([ri * sin_t * cos_p, ri * sin_t * sin_p, ri * cos_t]);
            }
        }
    }

    log::debug!(
        "Spherical grid {}x{}x{} -> {} Cartesian points",
        r.len(),
        theta.len(),
        phi.len(),
        points.len()
    );
    Ok(VectorGrid::from_points(&points))
}
