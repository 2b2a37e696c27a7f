//! Grid job runner: builds, centres and exports a grid.

use std::path::Path;

use anyhow::{Context, Result};
use ndarray::Array1;
use rand::rngs::StdRng;
use rand::SeedableRng;

use orbgrid_core::{AxisSpec, GridForm, GridState, StdoutSink};
use orbgrid_io::reader::load_grid_file;
use orbgrid_io::{write_grid_file, GridDefinition, DEFAULT_COMMENT};

use crate::config::{GridConfig, JobConfig};

/// Build the grid described by a job, centring it if requested.
pub fn build_grid(job: &JobConfig, base_dir: &Path) -> Result<GridState> {
    log::debug!("Building grid from {:?}", job.grid);
    let mut state = GridState::new();

    match &job.grid {
        GridConfig::Regular { x, y, z, vector } => {
            let specs: [AxisSpec; 3] = [(*x).into(), (*y).into(), (*z).into()];
            state.set_specs(specs);
            state.init(false).context("Invalid regular grid parameters")?;
            centre_if_requested(&mut state, job)?;
            if *vector {
                state.to_vector()?;
            }
        }
        GridConfig::Spherical { r, theta, phi } => {
            let (r, theta, phi) = (
                Array1::from(r.values()),
                Array1::from(theta.values()),
                Array1::from(phi.values()),
            );
            state
                .set_spherical(r.view(), theta.view(), phi.view())
                .context("Invalid spherical grid")?;
            reject_centre_for_vector(job)?;
        }
        GridConfig::Random { centres, points_per_centre, scale, seed } => {
            let mut rng = match seed {
                Some(seed) => StdRng::seed_from_u64(*seed),
                None => StdRng::from_entropy(),
            };
            state
                .set_random(centres, *points_per_centre, *scale, &mut rng)
                .context("Invalid random grid")?;
            reject_centre_for_vector(job)?;
        }
        GridConfig::File { grid_file, comment, vector } => {
            let path = base_dir.join(grid_file);
            let form = load_grid_file(&mut state, &path, comment)
                .with_context(|| format!("Failed to load grid file '{}'", path.display()))?;
            match form {
                GridForm::Regular => {
                    state.init(false).context("Invalid grid file parameters")?;
                    centre_if_requested(&mut state, job)?;
                    if *vector {
                        state.to_vector()?;
                    }
                }
                GridForm::Vector => reject_centre_for_vector(job)?,
            }
        }
    }

    println!("Grid ({} points):", state.num_points());
    print!("{}", state.describe("  "));
    Ok(state)
}

fn centre_if_requested(state: &mut GridState, job: &JobConfig) -> Result<()> {
    if let Some(centre) = &job.centre {
        state
            .centre(centre.anchor, &mut StdoutSink)
            .with_context(|| format!("Failed to centre grid on {:?}", centre.anchor))?;
    }
    Ok(())
}

fn reject_centre_for_vector(job: &JobConfig) -> Result<()> {
    if job.centre.is_some() {
        anyhow::bail!("Centring is only supported for regular grids");
    }
    Ok(())
}

/// Write the grid in grid-file format (regular parameters or explicit points).
pub fn write_grid(state: &GridState, path: &Path) -> Result<()> {
    let definition = match (state.regular(), state.vector()) {
        (Some(regular), _) => GridDefinition::Regular(regular.specs),
        (None, Some(vector)) => GridDefinition::Vector(vector.clone()),
        (None, None) => anyhow::bail!("No grid has been built"),
    };
    write_grid_file(path, &definition, DEFAULT_COMMENT)?;
    println!("Grid file written to: {}", path.display());
    Ok(())
}

/// Write every grid point to a CSV file.
///
/// Regular grids are flattened in row-major order (z fastest) on the fly.
pub fn write_points_csv(state: &GridState, path: &Path) -> Result<()> {
    use std::io::Write;

    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let mut file = std::io::BufWriter::new(std::fs::File::create(path)?);

    writeln!(file, "# orbgrid points")?;
    writeln!(file, "x,y,z")?;
    if let Some(regular) = state.regular() {
        let [xs, ys, zs] = &regular.coords;
        for x in xs.iter() {
            for y in ys.iter() {
                for z in zs.iter() {
                    writeln!(file, "{:.8},{:.8},{:.8}", x, y, z)?;
                }
            }
        }
    } else if let Some(vector) = state.vector() {
        for [x, y, z] in vector.points() {
            writeln!(file, "{:.8},{:.8},{:.8}", x, y, z)?;
        }
    } else {
        anyhow::bail!("No grid has been built");
    }
    file.flush()?;

    println!("Points written to: {}", path.display());
    Ok(())
}

/// Write a JSON summary of the grid.
pub fn write_summary_json(state: &GridState, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let summary = state.summary().context("No grid has been built")?;
    let json = serde_json::to_string_pretty(&summary)
        .map_err(|e| anyhow::anyhow!("JSON serialisation error: {}", e))?;
    std::fs::write(path, json)?;

    println!("Summary (JSON) written to: {}", path.display());
    Ok(())
}
