//! Grid file reader.
//!
//! The whole file is parsed before anything is committed to a
//! [`GridState`], so a malformed file never leaves a half-updated grid.

use std::path::Path;

use orbgrid_core::{Axis, AxisSpec, GridForm, GridState};

use crate::{GridDefinition, GridFileError};

/// Comment marker used when none is configured.
pub const DEFAULT_COMMENT: &str = "#";

/// Parse grid file contents.
///
/// The first non-comment line fixes the layout: 3 tokens for a vector grid,
/// 4 tokens for a regular grid. Every later data line must have the same
/// token count.
pub fn parse_grid(content: &str, comment: &str) -> Result<GridDefinition, GridFileError> {
    let mut layout: Option<GridForm> = None;
    let mut header: Option<[Axis; 3]> = None;
    let mut columns: [Vec<f64>; 3] = Default::default();
    let mut specs: [Option<AxisSpec>; 3] = [None; 3];
    let mut last_line = 0;

    for (idx, raw) in content.lines().enumerate() {
        let line = idx + 1;
        last_line = line;
        let tokens: Vec<&str> = raw.split_whitespace().collect();
        if tokens.is_empty() || tokens[0] == comment {
            continue;
        }

        let kind = match tokens.len() {
            3 => GridForm::Vector,
            4 => GridForm::Regular,
            n => {
                return Err(format_error(
                    line,
                    format!("expected 3 or 4 tokens, found {} in '{}'", n, raw.trim()),
                ))
            }
        };
        match layout {
            None => layout = Some(kind),
            Some(current) if current != kind => {
                return Err(format_error(
                    line,
                    format!(
                        "inconsistency in grid file: {} line '{}' in a {} grid",
                        kind,
                        raw.trim(),
                        current
                    ),
                ))
            }
            Some(_) => {}
        }

        match kind {
            GridForm::Vector => match header {
                None => header = Some(parse_header(line, &tokens)?),
                Some(order) => {
                    for (axis, token) in order.iter().zip(&tokens) {
                        columns[axis.index()].push(parse_float(line, token)?);
                    }
                }
            },
            GridForm::Regular => {
                let (axis, spec) = parse_axis_line(line, &tokens)?;
                let slot = &mut specs[axis.index()];
                if slot.is_some() {
                    return Err(format_error(line, format!("{} axis defined twice", axis)));
                }
                *slot = Some(spec);
            }
        }
    }

    match layout {
        None => Err(format_error(last_line, "no grid definition found".into())),
        Some(GridForm::Vector) => {
            if columns[0].is_empty() {
                return Err(format_error(last_line, "vector grid has a header but no points".into()));
            }
            Ok(GridDefinition::from_columns(columns))
        }
        Some(GridForm::Regular) => {
            let mut resolved = [AxisSpec::default(); 3];
            for axis in Axis::ALL {
                resolved[axis.index()] = specs[axis.index()].ok_or_else(|| {
                    format_error(last_line, format!("missing definition for {} axis", axis))
                })?;
            }
            Ok(GridDefinition::Regular(resolved))
        }
    }
}

/// Read and parse a grid file.
///
/// # Errors
/// [`GridFileError::NotFound`] if the file is missing or unreadable,
/// [`GridFileError::FormatError`] for malformed or non-UTF-8 contents.
pub fn read_grid_file(path: &Path, comment: &str) -> Result<GridDefinition, GridFileError> {
    let bytes = std::fs::read(path).map_err(|e| match e.kind() {
        std::io::ErrorKind::NotFound | std::io::ErrorKind::PermissionDenied => {
            GridFileError::NotFound { path: path.to_path_buf() }
        }
        _ => GridFileError::IoError(e),
    })?;
    let content = String::from_utf8(bytes).map_err(|e| {
        let valid = &e.as_bytes()[..e.utf8_error().valid_up_to()];
        let line = valid.iter().filter(|&&b| b == b'\n').count() + 1;
        format_error(line, "grid file is not valid UTF-8".into())
    })?;
    parse_grid(&content, comment)
}

/// Read a grid file and commit it to `state`.
///
/// A vector file installs its points and marks the state initialised. A
/// regular file only sets bounds and counts; call
/// [`GridState::init`] afterwards to materialise coordinates.
pub fn load_grid_file(
    state: &mut GridState,
    path: &Path,
    comment: &str,
) -> Result<GridForm, GridFileError> {
    let definition = read_grid_file(path, comment)?;
    let form = definition.form();
    match definition {
        GridDefinition::Regular(specs) => state.set_specs(specs),
        GridDefinition::Vector(vector) => state.set_vector(vector),
    }
    log::info!("Loaded {} grid from {}", form, path.display());
    Ok(form)
}

fn parse_header(line: usize, tokens: &[&str]) -> Result<[Axis; 3], GridFileError> {
    let mut order = [Axis::X; 3];
    let mut seen = [false; 3];
    for (slot, token) in order.iter_mut().zip(tokens) {
        let axis = Axis::from_letter(token).ok_or_else(|| {
            format_error(line, format!("unknown axis '{}' in vector grid header", token))
        })?;
        if seen[axis.index()] {
            return Err(format_error(
                line,
                format!("axis '{}' repeated in vector grid header", axis),
            ));
        }
        seen[axis.index()] = true;
        *slot = axis;
    }
    Ok(order)
}

fn parse_axis_line(line: usize, tokens: &[&str]) -> Result<(Axis, AxisSpec), GridFileError> {
    let axis = Axis::from_letter(tokens[0])
        .ok_or_else(|| format_error(line, format!("unknown axis '{}'", tokens[0])))?;
    let min = parse_float(line, tokens[1])?;
    let max = parse_float(line, tokens[2])?;
    let count = parse_count(line, tokens[3])?;
    Ok((axis, AxisSpec::new(min, max, count)))
}

fn parse_float(line: usize, token: &str) -> Result<f64, GridFileError> {
    match token.parse::<f64>() {
        Ok(v) if v.is_finite() => Ok(v),
        _ => Err(format_error(line, format!("invalid number '{}'", token))),
    }
}

fn parse_count(line: usize, token: &str) -> Result<usize, GridFileError> {
    if let Ok(n) = token.parse::<usize>() {
        return Ok(n);
    }
    // Counts written as floats ("11.0") are accepted when integral.
    match token.parse::<f64>() {
        Ok(v) if v >= 0.0 && v < usize::MAX as f64 && v.fract() == 0.0 => Ok(v as usize),
        _ => Err(format_error(line, format!("invalid point count '{}'", token))),
    }
}

fn format_error(line: usize, message: String) -> GridFileError {
    GridFileError::FormatError { line, message }
}
