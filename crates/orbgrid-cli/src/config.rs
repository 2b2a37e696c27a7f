//! TOML configuration deserialisation for grid jobs.

use serde::Deserialize;

use orbgrid_core::random::{DEFAULT_POINTS_PER_CENTRE, DEFAULT_SCALE};
use orbgrid_core::AxisSpec;

/// Top-level job configuration.
#[derive(Debug, Deserialize)]
pub struct JobConfig {
    pub grid: GridConfig,
    #[serde(default)]
    pub centre: Option<CentreConfig>,
    #[serde(default)]
    pub output: OutputConfig,
}

/// How the grid is produced.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum GridConfig {
    /// Regular grid from per-axis bounds and counts.
    Regular {
        x: AxisConfig,
        y: AxisConfig,
        z: AxisConfig,
        /// Flatten into a vector grid after building.
        #[serde(default)]
        vector: bool,
    },
    /// Cartesian points from spherical axes (radians).
    Spherical {
        r: SampleSpec,
        theta: SampleSpec,
        phi: SampleSpec,
    },
    /// Normally distributed points around atomic centres.
    Random {
        centres: Vec<[f64; 3]>,
        #[serde(default = "default_points_per_centre")]
        points_per_centre: usize,
        #[serde(default = "default_scale")]
        scale: f64,
        /// Seed for reproducible sampling; drawn from entropy when absent.
        #[serde(default)]
        seed: Option<u64>,
    },
    /// Grid definition read from a grid file.
    File {
        grid_file: String,
        #[serde(default = "default_comment")]
        comment: String,
        /// Flatten a regular file grid into a vector grid after building.
        #[serde(default)]
        vector: bool,
    },
}

/// Per-axis regular-grid parameters.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct AxisConfig {
    pub min: f64,
    pub max: f64,
    pub count: usize,
}

impl From<AxisConfig> for AxisSpec {
    fn from(c: AxisConfig) -> Self {
        AxisSpec::new(c.min, c.max, c.count)
    }
}

/// Samples along a spherical axis: either an evenly spaced range or explicit values.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum SampleSpec {
    Range { range: [f64; 2], points: usize },
    List { values: Vec<f64> },
}

impl SampleSpec {
    /// Expand into explicit sample values. A range with one point yields its start.
    pub fn values(&self) -> Vec<f64> {
        match self {
            SampleSpec::Range { range, points } => {
                let [start, end] = *range;
                (0..*points)
                    .map(|i| start + (end - start) * i as f64 / (*points - 1).max(1) as f64)
                    .collect()
            }
            SampleSpec::List { values } => values.clone(),
        }
    }
}

/// Centre the built grid on an anchor point.
#[derive(Debug, Deserialize)]
pub struct CentreConfig {
    pub anchor: [f64; 3],
}

/// Output configuration.
#[derive(Debug, Deserialize)]
pub struct OutputConfig {
    /// Output directory (default: "./output").
    #[serde(default = "default_output_dir")]
    pub directory: String,
    /// Whether to save the grid as a grid file (default: true).
    #[serde(default = "default_true")]
    pub save_grid_file: bool,
    /// Whether to save every point as CSV (default: false).
    #[serde(default)]
    pub save_points_csv: bool,
    /// Whether to save a JSON summary of the grid (default: false).
    #[serde(default)]
    pub save_json: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            directory: default_output_dir(),
            save_grid_file: true,
            save_points_csv: false,
            save_json: false,
        }
    }
}

fn default_output_dir() -> String {
    "./output".into()
}
fn default_true() -> bool {
    true
}
fn default_comment() -> String {
    orbgrid_io::DEFAULT_COMMENT.into()
}
fn default_points_per_centre() -> usize {
    DEFAULT_POINTS_PER_CENTRE
}
fn default_scale() -> f64 {
    DEFAULT_SCALE
}

/// Load and parse a TOML job configuration file.
pub fn load_config(path: &std::path::Path) -> anyhow::Result<JobConfig> {
    let content = std::fs::read_to_string(path)?;
    let config: JobConfig = toml::from_str(&content)?;
    Ok(config)
}
