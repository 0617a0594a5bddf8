use super::NDIM;
use crate::StrError;
use serde::{Deserialize, Serialize};

/// Holds a mesh point
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Point {
    /// Point identification number (index in the points array)
    pub id: usize,

    /// Reference coordinates
    pub coords: [f64; NDIM],
}

/// Holds a mesh cell (element)
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Cell {
    /// Cell identification number (index in the cells array)
    pub id: usize,

    /// Cell attribute, i.e., the 1-based grain identification number
    pub attribute: usize,

    /// Point identification numbers (connectivity)
    pub points: Vec<usize>,
}

/// Holds the minimal mesh description consumed by the material-point engine
///
/// The mesh is produced by an external collaborator; here we only need the reference
/// coordinates, the connectivity, and the grain attribute of each cell.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Mesh {
    /// All points
    pub points: Vec<Point>,

    /// All cells
    pub cells: Vec<Cell>,
}

impl Mesh {
    /// Checks the ids and the connectivity
    pub fn check(&self) -> Result<(), StrError> {
        for (i, point) in self.points.iter().enumerate() {
            if point.id != i {
                return Err("point ids must equal their position in the points array");
            }
        }
        for (i, cell) in self.cells.iter().enumerate() {
            if cell.id != i {
                return Err("cell ids must equal their position in the cells array");
            }
            if cell.points.iter().any(|p| *p >= self.points.len()) {
                return Err("cell connectivity refers to a non-existent point");
            }
        }
        Ok(())
    }

    /// Returns the number of nodes per cell (all cells must have the same kind)
    pub fn n_node_per_cell(&self) -> Result<usize, StrError> {
        let nnode = match self.cells.first() {
            Some(cell) => cell.points.len(),
            None => return Err("mesh must have at least one cell"),
        };
        if self.cells.iter().any(|c| c.points.len() != nnode) {
            return Err("all cells must have the same number of nodes");
        }
        Ok(nnode)
    }

    /// Returns the reference coordinates of all points (node-major: `x[NDIM*p+i]`)
    pub fn coordinates(&self) -> Vec<f64> {
        let mut x = vec![0.0; NDIM * self.points.len()];
        for point in &self.points {
            for i in 0..NDIM {
                x[NDIM * point.id + i] = point.coords[i];
            }
        }
        x
    }

    /// Sets the grain ids (cell attributes) from a grain map
    ///
    /// # Input
    ///
    /// * `grain_map` -- flat table with `n_cols` values per cell (cells in mesh order)
    /// * `n_cols` -- number of columns of the table
    /// * `column` -- column holding the 1-based grain id
    pub fn set_grain_ids(&mut self, grain_map: &[f64], n_cols: usize, column: usize) -> Result<(), StrError> {
        if column >= n_cols {
            return Err("grain map column must be smaller than the number of columns");
        }
        if grain_map.len() < n_cols * self.cells.len() {
            return Err("grain map must have one row per cell");
        }
        for cell in &mut self.cells {
            let value = grain_map[n_cols * cell.id + column];
            if value < 1.0 || value.fract() != 0.0 {
                return Err("grain ids must be positive integers");
            }
            cell.attribute = value as usize;
        }
        Ok(())
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
