//! The owned grid state that all grid operations read and mutate.
//!
//! A [`GridState`] holds the regular-grid parameters (per-axis bounds and
//! counts) together with the currently materialised [`Grid`], which is either
//! a regular grid or an explicit vector grid. Building a second grid replaces
//! the first. Each state is an ordinary value; independent computations use
//! independent states.

use ndarray::{Array1, ArrayView1};
use rand::Rng;

use crate::centre::{self, ReportSink};
use crate::convert;
use crate::random;
use crate::regular::RegularGrid;
use crate::spherical;
use crate::types::{Axis, AxisExtent, AxisSpec, GridError, GridForm, GridSummary, DEFAULT_AXIS};
use crate::vector::VectorGrid;

/// A materialised grid in one of its two representations.
#[derive(Debug, Clone, PartialEq)]
pub enum Grid {
    Regular(RegularGrid),
    Vector(VectorGrid),
}

impl Grid {
    pub fn form(&self) -> GridForm {
        match self {
            Grid::Regular(_) => GridForm::Regular,
            Grid::Vector(_) => GridForm::Vector,
        }
    }

    /// Coordinates along one axis: per-axis samples for a regular grid,
    /// flattened point coordinates for a vector grid.
    pub fn axis(&self, axis: Axis) -> &Array1<f64> {
        match self {
            Grid::Regular(g) => g.axis(axis),
            Grid::Vector(g) => g.axis(axis),
        }
    }

    /// Number of 3-D points represented.
    pub fn num_points(&self) -> usize {
        match self {
            Grid::Regular(g) => g.num_points(),
            Grid::Vector(g) => g.len(),
        }
    }
}

/// Grid parameters plus the current materialised grid.
#[derive(Debug, Clone)]
pub struct GridState {
    specs: [AxisSpec; 3],
    grid: Option<Grid>,
    initialized: bool,
}

impl Default for GridState {
    fn default() -> Self {
        Self {
            specs: [DEFAULT_AXIS; 3],
            grid: None,
            initialized: false,
        }
    }
}

impl GridState {
    /// A state holding the default parameters (`[-8, 8]` with 101 points per axis).
    pub fn new() -> Self {
        Self::default()
    }

    /// A state holding the given regular-grid parameters.
    pub fn with_specs(specs: [AxisSpec; 3]) -> Self {
        Self { specs, ..Self::default() }
    }

    /// Restore default parameters and clear the initialised flag.
    ///
    /// The previously materialised grid remains readable until the next build.
    pub fn reset(&mut self) {
        self.specs = [DEFAULT_AXIS; 3];
        self.initialized = false;
    }

    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    /// Current regular-grid parameters.
    pub fn specs(&self) -> &[AxisSpec; 3] {
        &self.specs
    }

    pub fn spec(&self, axis: Axis) -> &AxisSpec {
        &self.specs[axis.index()]
    }

    /// Replace the regular-grid parameters.
    ///
    /// Clears the initialised flag so the next [`GridState::init`] rebuilds.
    pub fn set_specs(&mut self, specs: [AxisSpec; 3]) {
        self.specs = specs;
        self.initialized = false;
    }

    /// Replace the parameters of a single axis.
    pub fn set_axis(&mut self, axis: Axis, spec: AxisSpec) {
        self.specs[axis.index()] = spec;
        self.initialized = false;
    }

    pub fn grid(&self) -> Option<&Grid> {
        self.grid.as_ref()
    }

    pub fn form(&self) -> Option<GridForm> {
        self.grid.as_ref().map(Grid::form)
    }

    /// The current grid if it is regular.
    pub fn regular(&self) -> Option<&RegularGrid> {
        match &self.grid {
            Some(Grid::Regular(g)) => Some(g),
            _ => None,
        }
    }

    /// The current grid if it is a vector grid.
    pub fn vector(&self) -> Option<&VectorGrid> {
        match &self.grid {
            Some(Grid::Vector(g)) => Some(g),
            _ => None,
        }
    }

    /// Current x coordinates, if a grid has been materialised.
    pub fn x(&self) -> Option<ArrayView1<'_, f64>> {
        self.axis(Axis::X)
    }

    pub fn y(&self) -> Option<ArrayView1<'_, f64>> {
        self.axis(Axis::Y)
    }

    pub fn z(&self) -> Option<ArrayView1<'_, f64>> {
        self.axis(Axis::Z)
    }

    pub fn axis(&self, axis: Axis) -> Option<ArrayView1<'_, f64>> {
        self.grid.as_ref().map(|g| g.axis(axis).view())
    }

    /// Integration weight of one cell. Only defined for a regular grid.
    pub fn cell_volume(&self) -> Option<f64> {
        self.regular().map(RegularGrid::cell_volume)
    }

    pub fn num_points(&self) -> usize {
        self.grid.as_ref().map_or(0, Grid::num_points)
    }

    /// Build the regular grid from the current parameters.
    ///
    /// Does nothing if the state is already initialised. With `as_vector`
    /// the result is flattened into a vector grid straight away.
    ///
    /// # Errors
    /// Returns [`GridError::Configuration`] for invalid axis parameters; the
    /// state is left untouched in that case.
    pub fn init(&mut self, as_vector: bool) -> Result<(), GridError> {
        if self.initialized {
            log::debug!("Grid already initialised; skipping rebuild");
            return Ok(());
        }

        let regular = RegularGrid::build(self.specs)?;
        self.grid = Some(if as_vector {
            Grid::Vector(convert::grid_to_vector(&regular))
        } else {
            Grid::Regular(regular)
        });
        self.initialized = true;
        Ok(())
    }

    /// Flatten the current regular grid into a vector grid.
    ///
    /// A grid that is already in vector form is left as is.
    ///
    /// # Errors
    /// Returns [`GridError::Precondition`] if no grid has been materialised.
    pub fn to_vector(&mut self) -> Result<(), GridError> {
        match self.grid.take() {
            Some(Grid::Regular(g)) => {
                self.grid = Some(Grid::Vector(convert::grid_to_vector(&g)));
                Ok(())
            }
            Some(vector @ Grid::Vector(_)) => {
                self.grid = Some(vector);
                Ok(())
            }
            None => Err(GridError::Precondition("no grid has been built".into())),
        }
    }

    /// Recover the regular grid from the current (flattened) vector grid.
    ///
    /// On success the parameters are updated to the recovered bounds and
    /// counts. A regular grid is left as is.
    ///
    /// # Errors
    /// Returns [`GridError::Precondition`] if no grid has been built or the
    /// vector grid is not a row-major Cartesian product.
    pub fn to_regular(&mut self) -> Result<(), GridError> {
        let regular = match &self.grid {
            Some(Grid::Vector(g)) => convert::vector_to_grid(g)?,
            Some(Grid::Regular(_)) => return Ok(()),
            None => return Err(GridError::Precondition("no grid has been built".into())),
        };
        self.specs = regular.specs;
        self.grid = Some(Grid::Regular(regular));
        Ok(())
    }

    /// Install an explicit vector grid and mark the state initialised.
    pub fn set_vector(&mut self, vector: VectorGrid) {
        log::debug!("Installed vector grid of {} points", vector.len());
        self.grid = Some(Grid::Vector(vector));
        self.initialized = true;
    }

    /// Replace the grid with the Cartesian image of spherical axes.
    ///
    /// The regular-grid parameters and cell volume do not describe the
    /// result and must not be relied upon afterwards.
    pub fn set_spherical(
        &mut self,
        r: ArrayView1<'_, f64>,
        theta: ArrayView1<'_, f64>,
        phi: ArrayView1<'_, f64>,
    ) -> Result<(), GridError> {
        let vector = spherical::spherical_to_cartesian(r, theta, phi)?;
        self.grid = Some(Grid::Vector(vector));
        Ok(())
    }

    /// Replace the grid with normally distributed samples around `centres`
    /// and mark the state initialised.
    pub fn set_random<R>(
        &mut self,
        centres: &[[f64; 3]],
        n_per_centre: usize,
        scale: f64,
        rng: &mut R,
    ) -> Result<(), GridError>
    where
        R: Rng + ?Sized,
    {
        let vector = random::random_grid(centres, n_per_centre, scale, rng)?;
        self.set_vector(vector);
        Ok(())
    }

    /// Centre the current regular grid on `anchor` and write a report to `sink`.
    ///
    /// # Errors
    /// Returns [`GridError::Precondition`] if the grid is not regular or the
    /// anchor lies above the grid on some axis. The state is unchanged on error.
    pub fn centre<S>(&mut self, anchor: [f64; 3], sink: &mut S) -> Result<(), GridError>
    where
        S: ReportSink + ?Sized,
    {
        let grid = self.regular().ok_or_else(|| {
            GridError::Precondition("centring requires a regular grid".into())
        })?;
        let centred = centre::centre_grid(grid, anchor)?;
        let zero_axes = centre::axes_with_zero(&centred);

        self.specs = centred.specs;
        self.grid = Some(Grid::Regular(centred));

        sink.emit(&format!(
            "Centered Grid to ({:.2} {:.2} {:.2}): \n",
            anchor[0], anchor[1], anchor[2]
        ));
        sink.emit(&self.describe("\t"));
        for axis in zero_axes {
            log::warn!("A grid point on the {} axis is equal to zero", axis);
            sink.emit("Warning!\n\tAt least one grid point is equal to zero.\n");
        }
        Ok(())
    }

    /// Human-readable description of the grid, one line per axis.
    ///
    /// Reports min, max and count of the materialised coordinates (or of the
    /// parameters when nothing has been built). The spacing is appended for
    /// regular axes whose bounds differ and whose spacing is non-zero.
    pub fn describe(&self, indent: &str) -> String {
        let mut display = String::new();
        for axis in Axis::ALL {
            let i = axis.index();
            let c = axis.letter();
            let extent = match &self.grid {
                Some(grid) => extent_of(grid.axis(axis)),
                None => {
                    let s = &self.specs[i];
                    AxisExtent { min: s.min, max: s.max, count: s.count }
                }
            };
            display.push_str(&format!(
                "{indent}{c}min = {:.2} {c}max = {:.2} N{c} = {}",
                extent.min, extent.max, extent.count
            ));
            if let Some(regular) = self.regular() {
                let spec = &self.specs[i];
                let spacing = regular.spacing[i];
                if spec.max != spec.min && spacing != 0.0 {
                    display.push_str(&format!(" d{c} = {:.3}", spacing));
                }
            }
            display.push('\n');
        }
        display
    }

    /// Serialisable summary of the materialised grid.
    pub fn summary(&self) -> Option<GridSummary> {
        let grid = self.grid.as_ref()?;
        let regular = self.regular();
        Some(GridSummary {
            form: grid.form(),
            num_points: grid.num_points(),
            extents: Axis::ALL.map(|axis| extent_of(grid.axis(axis))),
            spacing: regular.map(|g| g.spacing),
            cell_volume: regular.map(RegularGrid::cell_volume),
        })
    }
}

fn extent_of(coords: &Array1<f64>) -> AxisExtent {
    let (min, max) = coords
        .iter()
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &c| (lo.min(c), hi.max(c)));
    AxisExtent { min, max, count: coords.len() }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    fn small_state() -> GridState {
        GridState::with_specs([
            AxisSpec::new(-5.0, 5.0, 11),
            AxisSpec::new(-2.0, 2.0, 5),
            AxisSpec::new(0.0, 0.0, 1),
        ])
    }

    #[test]
    fn test_defaults_and_reset() {
        let mut state = small_state();
        state.init(false).unwrap();
        assert!(state.is_initialized());

        state.reset();
        assert!(!state.is_initialized());
        assert_eq!(state.specs(), &[DEFAULT_AXIS; 3]);
        assert_eq!(DEFAULT_AXIS, AxisSpec::new(-8.0, 8.0, 101));

        state.reset();
        assert_eq!(state.specs(), &[DEFAULT_AXIS; 3]);
    }

    #[test]
    fn test_init_is_idempotent() {
        let mut state = small_state();
        state.init(false).unwrap();
        state.set_specs([AxisSpec::new(0.0, 1.0, 2); 3]);
        // set_specs clears the flag, so this rebuilds
        state.init(false).unwrap();
        assert_eq!(state.regular().unwrap().shape(), [2, 2, 2]);

        // A second call without parameter changes keeps the existing grid.
        state.init(true).unwrap();
        assert_eq!(state.form(), Some(GridForm::Regular));
    }

    #[test]
    fn test_init_as_vector() {
        let mut state = small_state();
        state.init(true).unwrap();
        assert_eq!(state.form(), Some(GridForm::Vector));
        assert_eq!(state.num_points(), 55);
        assert_eq!(state.cell_volume(), None);
        let x = state.x().unwrap();
        let y = state.y().unwrap();
        assert_eq!(x.len(), 55);
        // y varies faster than x (z has a single point)
        assert_eq!((x[0], y[0]), (-5.0, -2.0));
        assert_eq!((x[1], y[1]), (-5.0, -1.0));
        assert_eq!((x[5], y[5]), (-4.0, -2.0));
    }

    #[test]
    fn test_failed_init_leaves_state_untouched() {
        let mut state = GridState::with_specs([
            AxisSpec::new(-1.0, 1.0, 1),
            AxisSpec::default(),
            AxisSpec::default(),
        ]);
        assert!(state.init(false).is_err());
        assert!(!state.is_initialized());
        assert!(state.grid().is_none());
    }

    #[test]
    fn test_describe_regular() {
        let mut state = small_state();
        state.init(false).unwrap();
        let text = state.describe("\t");
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0], "\txmin = -5.00 xmax = 5.00 Nx = 11 dx = 1.000");
        assert_eq!(lines[1], "\tymin = -2.00 ymax = 2.00 Ny = 5 dy = 1.000");
        assert_eq!(lines[2], "\tzmin = 0.00 zmax = 0.00 Nz = 1");
    }

    #[test]
    fn test_describe_before_build_uses_parameters() {
        let state = GridState::new();
        let text = state.describe("");
        assert!(text.starts_with("xmin = -8.00 xmax = 8.00 Nx = 101\n"));
    }

    #[test]
    fn test_round_trip_through_vector_form() {
        let mut state = small_state();
        state.init(false).unwrap();
        let original = state.regular().unwrap().clone();

        state.to_vector().unwrap();
        state.to_vector().unwrap();
        assert_eq!(state.form(), Some(GridForm::Vector));

        state.to_regular().unwrap();
        let recovered = state.regular().unwrap();
        assert_eq!(recovered.coords, original.coords);
        assert_abs_diff_eq!(recovered.cell_volume(), original.cell_volume());
    }

    #[test]
    fn test_to_vector_without_grid_fails() {
        let mut state = GridState::new();
        assert!(matches!(state.to_vector(), Err(GridError::Precondition(_))));
    }

    #[test]
    fn test_centre_reports_and_updates_bounds() {
        let mut state = GridState::with_specs([
            AxisSpec::new(-2.0, 2.0, 5),
            AxisSpec::new(-2.0, 2.0, 5),
            AxisSpec::new(-2.0, 2.0, 5),
        ]);
        state.init(false).unwrap();

        let mut report = String::new();
        state
            .centre([0.0, 0.0, 0.0], &mut |t: &str| report.push_str(t))
            .unwrap();

        assert!(report.starts_with("Centered Grid to (0.00 0.00 0.00): \n"));
        assert!(report.contains("\txmin = -1.50 xmax = 2.50 Nx = 5 dx = 1.000"));
        assert!(!report.contains("Warning!"));
        assert_eq!(state.spec(Axis::X), &AxisSpec::new(-1.5, 2.5, 5));
    }

    #[test]
    fn test_centre_warns_on_zero_coordinate() {
        let mut state = GridState::with_specs([
            AxisSpec::new(-4.0, 4.0, 9),
            AxisSpec::new(-4.0, 4.0, 9),
            AxisSpec::new(-4.0, 4.0, 9),
        ]);
        state.init(false).unwrap();

        // 1.6 spans two cells of 0.8; the point at 2.0 already sits 0.4 above
        // the anchor, so x is not shifted and keeps its zero.
        let mut report = String::new();
        state
            .centre([1.6, 0.0, 0.0], &mut |t: &str| report.push_str(t))
            .unwrap();
        assert_eq!(report.matches("Warning!").count(), 1);
    }

    #[test]
    fn test_centre_requires_regular_grid() {
        let mut state = small_state();
        state.init(true).unwrap();
        let mut sink = |_: &str| {};
        assert!(matches!(
            state.centre([0.0; 3], &mut sink),
            Err(GridError::Precondition(_))
        ));
    }

    #[test]
    fn test_summary() {
        let mut state = small_state();
        state.init(false).unwrap();
        let summary = state.summary().unwrap();
        assert_eq!(summary.form, GridForm::Regular);
        assert_eq!(summary.num_points, 55);
        assert_eq!(summary.extents[1].count, 5);
        assert_eq!(summary.cell_volume, Some(1.0));
        assert!(GridState::new().summary().is_none());
    }
}
