//! Regular (axis-aligned, rectilinear) grids.
//!
//! A regular grid is described per axis by `min`, `max` and a sample count.
//! Samples are evenly spaced, $x_k = x_{min} + k \Delta x$ with
//! $\Delta x = (x_{max} - x_{min}) / (N - 1)$, and the integration weight of
//! one cell is $\Delta x \Delta y \Delta z$.
//!
//! An axis with `min == max` collapses to a single sample. Its spacing is
//! recorded as `1.0`, a sentinel that keeps the cell volume well defined.
//! An axis with `min > max` runs downwards with a negative spacing.

use ndarray::Array1;

use crate::types::{Axis, AxisSpec, GridError};

/// Spacing recorded for a collapsed (single-sample) axis.
pub const DEGENERATE_SPACING: f64 = 1.0;

/// A materialised regular grid: per-axis parameters, spacing and coordinates.
#[derive(Debug, Clone, PartialEq)]
pub struct RegularGrid {
    /// Per-axis parameters. For collapsed axes `count` is normalised to 1.
    pub specs: [AxisSpec; 3],
    /// Per-axis spacing; [`DEGENERATE_SPACING`] on collapsed axes.
    pub spacing: [f64; 3],
    /// Per-axis sample positions.
    pub coords: [Array1<f64>; 3],
}

impl RegularGrid {
    /// Build coordinate vectors and spacing from per-axis parameters.
    ///
    /// # Errors
    /// Returns [`GridError::Configuration`] if a bound is not finite,
    /// `count == 0`, or `count == 1` while `min != max`.
    pub fn build(specs: [AxisSpec; 3]) -> Result<Self, GridError> {
        let mut normalised = specs;
        let mut spacing = [0.0; 3];
        let mut coords: [Array1<f64>; 3] = Default::default();

        for axis in Axis::ALL {
            let i = axis.index();
            let (axis_spacing, axis_coords) = build_axis(axis, &specs[i])?;
            if specs[i].is_degenerate() {
                normalised[i].count = 1;
            }
            spacing[i] = axis_spacing;
            coords[i] = axis_coords;
        }

        log::debug!(
            "Built regular grid {}x{}x{} (spacing {:?})",
            coords[0].len(),
            coords[1].len(),
            coords[2].len(),
            spacing
        );

        Ok(Self { specs: normalised, spacing, coords })
    }

    /// Product of the per-axis spacing.
    pub fn cell_volume(&self) -> f64 {
        self.spacing.iter().product()
    }

    /// Number of samples along each axis.
    pub fn shape(&self) -> [usize; 3] {
        [self.coords[0].len(), self.coords[1].len(), self.coords[2].len()]
    }

    /// Total number of grid points, $N_x N_y N_z$.
    pub fn num_points(&self) -> usize {
        self.shape().iter().product()
    }

    /// Coordinates along one axis.
    pub fn axis(&self, axis: Axis) -> &Array1<f64> {
        &self.coords[axis.index()]
    }

    /// Regenerate an axis from its `min`, spacing and `count`.
    ///
    /// For a freshly built grid this reproduces [`RegularGrid::axis`] up to
    /// floating-point rounding.
    pub fn regenerate_axis(&self, axis: Axis) -> Array1<f64> {
        let i = axis.index();
        let spec = &self.specs[i];
        if spec.is_degenerate() {
            return Array1::from_elem(1, spec.min);
        }
        linear_axis(spec.min, self.spacing[i], spec.count)
    }
}

fn build_axis(axis: Axis, spec: &AxisSpec) -> Result<(f64, Array1<f64>), GridError> {
    let invalid = |message: String| GridError::Configuration { axis, message };

    if !spec.min.is_finite() || !spec.max.is_finite() {
        return Err(invalid(format!(
            "bounds must be finite, got min={} max={}",
            spec.min, spec.max
        )));
    }
    if spec.count < 1 {
        return Err(invalid("point count must be at least 1".into()));
    }
    if spec.is_degenerate() {
        return Ok((DEGENERATE_SPACING, Array1::from_elem(1, spec.min)));
    }
    if spec.count == 1 {
        return Err(invalid(format!(
            "a single point cannot span [{}, {}]",
            spec.min, spec.max
        )));
    }

    let spacing = (spec.max - spec.min) / (spec.count - 1) as f64;
    Ok((spacing, linear_axis(spec.min, spacing, spec.count)))
}

fn linear_axis(min: f64, spacing: f64, count: usize) -> Array1<f64> {
    Array1::from_iter((0..count).map(|k| min + k as f64 * spacing))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    fn specs(x: AxisSpec, y: AxisSpec, z: AxisSpec) -> [AxisSpec; 3] {
        [x, y, z]
    }

    #[test]
    fn test_spacing_and_coordinates() {
        let grid = RegularGrid::build(specs(
            AxisSpec::new(-5.0, 5.0, 11),
            AxisSpec::new(-2.0, 2.0, 5),
            AxisSpec::new(0.0, 1.0, 3),
        ))
        .unwrap();

        assert_eq!(grid.shape(), [11, 5, 3]);
        assert_eq!(grid.spacing, [1.0, 1.0, 0.5]);
        assert_abs_diff_eq!(grid.cell_volume(), 0.5, epsilon = 1e-15);
        assert_abs_diff_eq!(grid.axis(Axis::X)[0], -5.0);
        assert_abs_diff_eq!(grid.axis(Axis::X)[10], 5.0, epsilon = 1e-12);
        assert_abs_diff_eq!(grid.axis(Axis::Z)[1], 0.5);
    }

    #[test]
    fn test_degenerate_axis_uses_sentinel_spacing() {
        let grid = RegularGrid::build(specs(
            AxisSpec::new(-1.0, 1.0, 3),
            AxisSpec::new(-1.0, 1.0, 3),
            AxisSpec::new(2.5, 2.5, 40),
        ))
        .unwrap();

        assert_eq!(grid.axis(Axis::Z).len(), 1);
        assert_eq!(grid.axis(Axis::Z)[0], 2.5);
        assert_eq!(grid.spacing[2], DEGENERATE_SPACING);
        assert_eq!(grid.specs[2].count, 1);
        assert_abs_diff_eq!(grid.cell_volume(), 1.0);
    }

    #[test]
    fn test_zero_count_rejected() {
        let err = RegularGrid::build(specs(
            AxisSpec::new(-1.0, 1.0, 0),
            AxisSpec::default(),
            AxisSpec::default(),
        ))
        .unwrap_err();
        assert!(matches!(err, GridError::Configuration { axis: Axis::X, .. }));
    }

    #[test]
    fn test_single_point_with_extent_rejected() {
        let err = RegularGrid::build(specs(
            AxisSpec::default(),
            AxisSpec::new(-1.0, 1.0, 1),
            AxisSpec::default(),
        ))
        .unwrap_err();
        assert!(matches!(err, GridError::Configuration { axis: Axis::Y, .. }));
        assert!(err.to_string().contains("y axis"));
    }

    #[test]
    fn test_descending_axis_builds() {
        let grid = RegularGrid::build(specs(
            AxisSpec::new(5.0, -5.0, 11),
            AxisSpec::default(),
            AxisSpec::default(),
        ))
        .unwrap();
        assert_abs_diff_eq!(grid.spacing[0], -1.0);
        let expected: Vec<f64> = (0..11).map(|k| 5.0 - k as f64).collect();
        for (got, want) in grid.coords[0].iter().zip(&expected) {
            assert_abs_diff_eq!(*got, *want, epsilon = 1e-12);
        }
        assert_eq!(grid.coords[0].len(), 11);
    }

    #[test]
    fn test_regenerate_reproduces_axis() {
        let grid = RegularGrid::build(specs(
            AxisSpec::new(-8.0, 8.0, 101),
            AxisSpec::new(-3.3, 7.1, 17),
            AxisSpec::new(0.0, 0.0, 1),
        ))
        .unwrap();

        for axis in Axis::ALL {
            let regenerated = grid.regenerate_axis(axis);
            let original = grid.axis(axis);
            assert_eq!(regenerated.len(), original.len());
            for (a, b) in regenerated.iter().zip(original.iter()) {
                assert_abs_diff_eq!(*a, *b, epsilon = 1e-12);
            }
        }
    }
}
