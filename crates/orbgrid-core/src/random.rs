//! Randomly sampled point clouds around atomic centres.
//!
//! Each coordinate of each sample is drawn from a normal distribution whose
//! mean is the centre's coordinate on that axis. The random source is passed
//! in by the caller so that runs can be reproduced with a seeded generator.

use rand::Rng;
use rand_distr::{Distribution, Normal};

use crate::types::GridError;
use crate::vector::VectorGrid;

/// Default number of samples drawn around each centre.
pub const DEFAULT_POINTS_PER_CENTRE: usize = 1_000_000;

/// Default standard deviation of the sampling distribution.
pub const DEFAULT_SCALE: f64 = 0.5;

/// Draw `n_per_centre` normally distributed points around each centre.
///
/// Points are laid out by centre, then by sample index: point
/// `a * n_per_centre + s` is sample `s` of centre `a`.
///
/// # Errors
/// Returns [`GridError::InvalidParameter`] if `scale` is not a positive
/// finite number or a centre has a non-finite coordinate.
pub fn random_grid<R>(
    centres: &[[f64; 3]],
    n_per_centre: usize,
    scale: f64,
    rng: &mut R,
) -> Result<VectorGrid, GridError>
where
    R: Rng + ?Sized,
{
    if !(scale.is_finite() && scale > 0.0) {
        return Err(GridError::InvalidParameter(format!(
            "sampling scale must be positive and finite, got {}",
            scale
        )));
    }
    if let Some(bad) = centres.iter().find(|c| c.iter().any(|v| !v.is_finite())) {
        return Err(GridError::InvalidParameter(format!(
            "centre {:?} has a non-finite coordinate",
            bad
        )));
    }

    let normal = |mean: f64| {
        Normal::new(mean, scale).map_err(|e| GridError::InvalidParameter(e.to_string()))
    };

    let mut points = Vec::with_capacity(centres.len() * n_per_centre);
    for centre in centres {
        let (dx, dy, dz) = (normal(centre[0])?, normal(centre[1])?, normal(centre[2])?);
        for _ in 0..n_per_centre {
            points.push([dx.sample(rng), dy.sample(rng), dz.sample(rng)]);
        }
    }

    log::debug!(
        "Sampled {} random points around {} centres (scale {})",
        points.len(),
        centres.len(),
        scale
    );
    Ok(VectorGrid::from_points(&points))
}
