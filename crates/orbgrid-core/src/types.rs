//! Core types shared across the orbgrid crates.
//!
//! This module defines the axis vocabulary, the per-axis regular-grid
//! parameters, the error taxonomy, and the serialisable grid summary handed
//! to downstream tooling.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors raised by grid construction and manipulation.
#[derive(Debug, Error)]
pub enum GridError {
    /// Invalid axis counts/bounds or sampler parameters.
    #[error("Invalid grid configuration on {axis} axis: {message}")]
    Configuration { axis: Axis, message: String },

    /// Invalid sampler parameters not tied to a single axis.
    #[error("Invalid grid configuration: {0}")]
    InvalidParameter(String),

    /// The operation requires a grid form or coverage the current state lacks.
    #[error("Precondition violated: {0}")]
    Precondition(String),

    /// Coordinate arrays of a vector grid disagree in length.
    #[error("Coordinate arrays differ in length: x={x}, y={y}, z={z}")]
    Shape { x: usize, y: usize, z: usize },
}

/// One of the three Cartesian axes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Axis {
    X,
    Y,
    Z,
}

impl Axis {
    /// All axes in storage order.
    pub const ALL: [Axis; 3] = [Axis::X, Axis::Y, Axis::Z];

    /// Storage index of this axis (x = 0, y = 1, z = 2).
    pub fn index(self) -> usize {
        match self {
            Axis::X => 0,
            Axis::Y => 1,
            Axis::Z => 2,
        }
    }

    /// Lowercase axis letter.
    pub fn letter(self) -> char {
        match self {
            Axis::X => 'x',
            Axis::Y => 'y',
            Axis::Z => 'z',
        }
    }

    /// Parse an axis name, ignoring case. Only `x`, `y` and `z` are accepted.
    pub fn from_letter(token: &str) -> Option<Axis> {
        match token.to_ascii_lowercase().as_str() {
            "x" => Some(Axis::X),
            "y" => Some(Axis::Y),
            "z" => Some(Axis::Z),
            _ => None,
        }
    }
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.letter())
    }
}

/// Regular-grid parameters for a single axis.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AxisSpec {
    /// Lowest sample position.
    pub min: f64,
    /// Highest sample position.
    pub max: f64,
    /// Number of samples along the axis.
    pub count: usize,
}

impl AxisSpec {
    pub const fn new(min: f64, max: f64, count: usize) -> Self {
        Self { min, max, count }
    }

    /// True when the axis collapses to a single sample (`min == max`).
    pub fn is_degenerate(&self) -> bool {
        self.min == self.max
    }
}

impl Default for AxisSpec {
    fn default() -> Self {
        DEFAULT_AXIS
    }
}

/// Built-in axis parameters restored by [`GridState::reset`](crate::state::GridState::reset).
pub const DEFAULT_AXIS: AxisSpec = AxisSpec::new(-8.0, 8.0, 101);

/// Which representation a grid currently holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GridForm {
    Regular,
    Vector,
}

impl fmt::Display for GridForm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GridForm::Regular => write!(f, "regular"),
            GridForm::Vector => write!(f, "vector"),
        }
    }
}

/// Per-axis extent of a materialised grid.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AxisExtent {
    pub min: f64,
    pub max: f64,
    /// Number of coordinates stored for this axis.
    pub count: usize,
}

/// A compact, serialisable description of a materialised grid.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GridSummary {
    pub form: GridForm,
    /// Total number of 3-D points the grid represents.
    pub num_points: usize,
    pub extents: [AxisExtent; 3],
    /// Per-axis spacing (regular grids only).
    pub spacing: Option<[f64; 3]>,
    /// Integration weight of one cell (regular grids only).
    pub cell_volume: Option<f64>,
}
