//! # orbgrid io
//!
//! Plain-text grid files. Two layouts are recognised by the number of
//! whitespace-separated tokens per line:
//!
//! - **Regular** (4 tokens): one line per axis, `<axis> <min> <max> <count>`,
//!   axes in any order, axis letters case-insensitive.
//! - **Vector** (3 tokens): a header naming the axis of each column
//!   (e.g. `x y z`), followed by one line per point.
//!
//! Blank lines and lines whose first token equals the comment marker
//! (default `#`) are skipped. The marker must not trail a data line.

pub mod reader;
pub mod writer;

use std::path::PathBuf;

use thiserror::Error;

use orbgrid_core::{AxisSpec, GridForm, VectorGrid};

pub use reader::{load_grid_file, parse_grid, read_grid_file, DEFAULT_COMMENT};
pub use writer::{format_definition, write_grid_file};

/// Errors while reading or writing grid files.
#[derive(Debug, Error)]
pub enum GridFileError {
    #[error("Grid file not found or unreadable: {}", path.display())]
    NotFound { path: PathBuf },

    #[error("Failed to access grid file: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Grid file error at line {line}: {message}")]
    FormatError { line: usize, message: String },
}

/// The contents of a grid file.
#[derive(Debug, Clone, PartialEq)]
pub enum GridDefinition {
    /// Per-axis `min`, `max`, `count`; coordinates are built later.
    Regular([AxisSpec; 3]),
    /// Explicit points.
    Vector(VectorGrid),
}

impl GridDefinition {
    pub fn form(&self) -> GridForm {
        match self {
            GridDefinition::Regular(_) => GridForm::Regular,
            GridDefinition::Vector(_) => GridForm::Vector,
        }
    }

    /// Build a definition from explicit columns of equal length.
    pub(crate) fn from_columns(columns: [Vec<f64>; 3]) -> Self {
        let [x, y, z] = columns;
        let points: Vec<[f64; 3]> = x
            .into_iter()
            .zip(y)
            .zip(z)
            .map(|((x, y), z)| [x, y, z])
            .collect();
        GridDefinition::Vector(VectorGrid::from_points(&points))
    }
}
