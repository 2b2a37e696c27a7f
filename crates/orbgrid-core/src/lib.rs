//! # orbgrid core
//!
//! Spatial grids on which molecular orbitals, densities and related scalar
//! fields are evaluated. Evaluators consume three coordinate arrays and, for
//! regular grids, the cell volume used as a quadrature weight.
//!
//! ## Architecture
//!
//! All operations act on an explicit [`GridState`](state::GridState), which
//! holds the regular-grid parameters and the current [`Grid`](state::Grid):
//! either a [`RegularGrid`](regular::RegularGrid) (per-axis coordinates) or a
//! [`VectorGrid`](vector::VectorGrid) (explicit point list).
//!
//! ## Modules
//!
//! - [`types`] — Axes, per-axis parameters, errors, grid summaries.
//! - [`regular`] — Regular grid construction from bounds and counts.
//! - [`vector`] — Explicit point-list grids.
//! - [`convert`] — Regular ⟷ vector conversion (row-major, z fastest).
//! - [`spherical`] — Cartesian points from spherical axes.
//! - [`random`] — Normally distributed samples around atomic centres.
//! - [`centre`] — Centring a regular grid on a reference point.
//! - [`state`] — The owned grid state tying the above together.

pub mod centre;
pub mod convert;
pub mod random;
pub mod regular;
pub mod spherical;
pub mod state;
pub mod types;
pub mod vector;

pub use centre::{ReportSink, StdoutSink};
pub use regular::RegularGrid;
pub use state::{Grid, GridState};
pub use types::{Axis, AxisSpec, GridError, GridForm, GridSummary};
pub use vector::VectorGrid;
