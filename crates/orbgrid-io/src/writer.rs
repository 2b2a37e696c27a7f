//! Grid file writer.
//!
//! Output is accepted by [`parse_grid`](crate::reader::parse_grid). Numbers
//! are written with the shortest representation that parses back to the
//! same value, so regular bounds survive a write/read cycle exactly.

use std::fmt::Write as _;
use std::io::{BufWriter, Write};
use std::path::Path;

use orbgrid_core::{Axis, AxisSpec, VectorGrid};

use crate::{GridDefinition, GridFileError};

/// Render regular-grid parameters, one `<axis> <min> <max> <count>` line per axis.
pub fn format_regular(specs: &[AxisSpec; 3]) -> String {
    let mut out = String::new();
    for axis in Axis::ALL {
        let s = &specs[axis.index()];
        let _ = writeln!(out, "{} {} {} {}", axis, s.min, s.max, s.count);
    }
    out
}

/// Render a vector grid: an `x y z` header followed by one line per point.
pub fn format_vector(grid: &VectorGrid) -> String {
    let mut out = String::with_capacity(16 + grid.len() * 24);
    out.push_str("x y z\n");
    for [x, y, z] in grid.points() {
        let _ = writeln!(out, "{} {} {}", x, y, z);
    }
    out
}

pub fn format_definition(definition: &GridDefinition) -> String {
    match definition {
        GridDefinition::Regular(specs) => format_regular(specs),
        GridDefinition::Vector(grid) => format_vector(grid),
    }
}

/// Write a grid file, preceded by a single comment line using `comment`.
pub fn write_grid_file(
    path: &Path,
    definition: &GridDefinition,
    comment: &str,
) -> Result<(), GridFileError> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }

    let file = std::fs::File::create(path)?;
    let mut writer = BufWriter::new(file);
    writeln!(writer, "{} orbgrid {} grid", comment, definition.form())?;
    writer.write_all(format_definition(definition).as_bytes())?;
    writer.flush()?;

    log::info!("Grid file written to: {}", path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_regular() {
        let text = format_regular(&[
            AxisSpec::new(-5.0, 5.0, 11),
            AxisSpec::new(-2.0, 2.0, 5),
            AxisSpec::new(0.0, 0.0, 1),
        ]);
        assert_eq!(text, "x -5 5 11\ny -2 2 5\nz 0 0 1\n");
    }

    #[test]
    fn test_format_vector() {
        let grid = VectorGrid::from_points(&[[5.0, -5.0, 0.0], [2.0, 7.5, 0.0]]);
        assert_eq!(format_vector(&grid), "x y z\n5 -5 0\n2 7.5 0\n");
    }
}
