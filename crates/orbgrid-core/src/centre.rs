//! Centring a regular grid on a reference point.
//!
//! Centring does two things per axis:
//!
//! 1. The spacing is adjusted so that an integral number of cells spans the
//!    distance from the origin to the anchor,
//!    $\Delta' = |a| / \mathrm{round}(|a| / \Delta)$ (unchanged when the
//!    rounded count is zero).
//! 2. The coordinates are shifted rigidly so that the first coordinate at or
//!    above the anchor ends up half a (new) spacing above it.
//!
//! Evaluators that divide by a coordinate are singular at zero, so the
//! report flags axes on which a coordinate rounds to zero.

use std::io::Write;

use nalgebra::Vector3;
use ndarray::Array1;

use crate::regular::RegularGrid;
use crate::types::{Axis, AxisSpec, GridError};

/// A destination for human-readable report text.
pub trait ReportSink {
    fn emit(&mut self, text: &str);
}

impl<F> ReportSink for F
where
    F: FnMut(&str),
{
    fn emit(&mut self, text: &str) {
        self(text)
    }
}

/// Writes report text to standard output.
#[derive(Debug, Default, Clone, Copy)]
pub struct StdoutSink;

impl ReportSink for StdoutSink {
    fn emit(&mut self, text: &str) {
        let mut out = std::io::stdout().lock();
        if let Err(e) = out.write_all(text.as_bytes()) {
            log::warn!("Failed to write report to stdout: {}", e);
        }
    }
}

/// Resolution used when checking for coordinates equal to zero.
const ZERO_TOLERANCE_SCALE: f64 = 1.0e4;

/// Return a copy of `grid` centred on `anchor`.
///
/// Bounds and counts of the result are re-derived from the shifted
/// coordinates; the cell volume follows from the adjusted spacing.
///
/// # Errors
/// Returns [`GridError::Precondition`] if, on some axis, no coordinate is
/// greater than or equal to the anchor's value.
pub fn centre_grid(grid: &RegularGrid, anchor: [f64; 3]) -> Result<RegularGrid, GridError> {
    let anchor = Vector3::from(anchor);
    let distance = anchor.abs();

    let mut spacing = grid.spacing;
    for i in 0..3 {
        let cells = (distance[i] / spacing[i]).abs().round();
        if cells != 0.0 {
            spacing[i] = distance[i] / cells;
        }
    }

    let mut shift = Vector3::zeros();
    for axis in Axis::ALL {
        let i = axis.index();
        let coords = grid.axis(axis);
        let position = coords.iter().position(|&c| anchor[i] <= c).ok_or_else(|| {
            GridError::Precondition(format!(
                "anchor {} = {} lies above every {} coordinate (max {})",
                axis,
                anchor[i],
                axis,
                coords.iter().copied().fold(f64::NEG_INFINITY, f64::max)
            ))
        })?;
        let gap = (coords[position] - anchor[i]).abs();
        shift[i] = 0.5 * spacing[i] - gap;
    }

    let coords: [Array1<f64>; 3] = [0, 1, 2].map(|i| grid.coords[i].mapv(|c| c + shift[i]));
    let specs = [0, 1, 2].map(|i| extent_of(&coords[i]));

    log::info!(
        "Centred grid to ({:.2}, {:.2}, {:.2}); shift ({:.4}, {:.4}, {:.4})",
        anchor.x,
        anchor.y,
        anchor.z,
        shift.x,
        shift.y,
        shift.z
    );

    Ok(RegularGrid { specs, spacing, coords })
}

/// Axes on which at least one coordinate rounds to zero at 1e-4 resolution.
pub fn axes_with_zero(grid: &RegularGrid) -> Vec<Axis> {
    Axis::ALL
        .into_iter()
        .filter(|&axis| {
            grid.axis(axis)
                .iter()
                .any(|&c| (c * ZERO_TOLERANCE_SCALE).round() == 0.0)
        })
        .collect()
}

fn extent_of(coords: &Array1<f64>) -> AxisSpec {
    let (min, max) = coords
        .iter()
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &c| (lo.min(c), hi.max(c)));
    AxisSpec::new(min, max, coords.len())
}
