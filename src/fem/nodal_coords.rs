use crate::base::{Cell, Mesh, NDIM};
use crate::StrError;

/// Copies the coordinates of the nodes of a cell into a local array (`x[NDIM*a+i]`)
///
/// # Input
///
/// * `x` -- local array with `NDIM × n_node` values
/// * `cell` -- the cell
/// * `coords` -- global array of coordinates (node-major: `coords[NDIM*point+i]`)
pub fn gather_element_coords(x: &mut [f64], cell: &Cell, coords: &[f64]) {
    for (a, point) in cell.points.iter().enumerate() {
        x[NDIM * a..NDIM * (a + 1)].copy_from_slice(&coords[NDIM * point..NDIM * (point + 1)]);
    }
}

/// Holds the nodal coordinates in the reference, beginning-of-step, and current configurations
///
/// All arrays are node-major, i.e., `x[NDIM*point+i]`.
#[derive(Clone, Debug)]
pub struct NodalCoords {
    /// Reference coordinates
    pub reference: Vec<f64>,

    /// Beginning-of-step coordinates
    pub beginning: Vec<f64>,

    /// Current (end-of-step) coordinates
    pub current: Vec<f64>,
}

impl NodalCoords {
    /// Allocates a new instance with all configurations equal to the reference one
    pub fn new(mesh: &Mesh) -> Self {
        let reference = mesh.coordinates();
        NodalCoords {
            beginning: reference.clone(),
            current: reference.clone(),
            reference,
        }
    }

    /// Updates the end-of-step coordinates with a forward Euler step
    ///
    /// ```text
    /// x_end = x_beg + Δt·v
    /// ```
    pub fn update_end_coords(&mut self, velocity: &[f64], delta_time: f64) -> Result<(), StrError> {
        if velocity.len() != self.current.len() {
            return Err("the velocity vector must have NDIM × n_point values");
        }
        for ((x, x0), v) in self.current.iter_mut().zip(&self.beginning).zip(velocity) {
            *x = x0 + delta_time * v;
        }
        Ok(())
    }

    /// Sets the current coordinates from a displacement field (`x_cur = x_ref + u`)
    pub fn set_displacement(&mut self, displacement: &[f64]) -> Result<(), StrError> {
        if displacement.len() != self.current.len() {
            return Err("the displacement vector must have NDIM × n_point values");
        }
        for ((x, xr), u) in self.current.iter_mut().zip(&self.reference).zip(displacement) {
            *x = xr + u;
        }
        Ok(())
    }

    /// Returns the displacement field `u = x_cur - x_ref`
    pub fn displacement(&self) -> Vec<f64> {
        self.current.iter().zip(&self.reference).map(|(x, xr)| x - xr).collect()
    }

    /// Accepts the current coordinates as the beginning-of-step coordinates of the next step
    pub fn advance(&mut self) {
        self.beginning.copy_from_slice(&self.current);
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
