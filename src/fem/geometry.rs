use super::{gather_element_coords, Hex8, QuadratureFunction};
use crate::base::{Mesh, NDIM, N_TENSOR2};
use crate::StrError;
use nalgebra::{DMatrix, Matrix3};

/// Calculates the characteristic element length `ℓ = ∛|det(J)|`
pub fn characteristic_length(det_jacobian: f64) -> f64 {
    f64::cbrt(f64::abs(det_jacobian))
}

/// Calculates the sum `G_ij = Σ_a x_ai · g_aj` over the nodes of an element
///
/// With `g = ∂N/∂ξ` the result is the Jacobian `J = ∂x/∂ξ`; with `g = ∂N/∂X` and the current
/// coordinates the result is the deformation gradient `F = ∂x/∂X`.
///
/// # Input
///
/// * `x` -- nodal coordinates (`x[NDIM*a+i]`)
/// * `g` -- nodal gradients (`g[NDIM*a+j]`)
pub fn nodal_gradient(x: &[f64], g: &[f64]) -> Matrix3<f64> {
    let mut res = Matrix3::zeros();
    for (xa, ga) in x.chunks_exact(NDIM).zip(g.chunks_exact(NDIM)) {
        for i in 0..NDIM {
            for j in 0..NDIM {
                res[(i, j)] += xa[i] * ga[j];
            }
        }
    }
    res
}

/// Calculates the gradients of the shape functions w.r.t. the physical coordinates
///
/// ```text
/// ∂N_a/∂x_j = Σ_k ∂N_a/∂ξ_k · (J⁻¹)_kj
/// ```
///
/// Returns an error if the Jacobian is singular.
fn physical_gradients(out: &mut [f64], dshape: &[f64], jacobian: &Matrix3<f64>) -> Result<(), StrError> {
    let jj_inv = jacobian.try_inverse().ok_or("the Jacobian matrix is singular")?;
    for (ga, da) in out.chunks_exact_mut(NDIM).zip(dshape.chunks_exact(NDIM)) {
        for j in 0..NDIM {
            ga[j] = (0..NDIM).map(|k| da[k] * jj_inv[(k, j)]).sum();
        }
    }
    Ok(())
}

/// Holds the geometry data of all integration points (Jacobians, weights, shape function derivatives)
///
/// The Jacobians correspond to the configuration given in the last call to
/// [QuadratureGeometry::update_jacobians].
pub struct QuadratureGeometry {
    /// Number of nodes per element
    n_node: usize,

    /// Derivatives of the shape functions w.r.t. natural coordinates at each integration point (`[NDIM*a+k]`)
    dshape: Vec<Vec<f64>>,

    /// Integration weights
    weights: Vec<f64>,

    /// Jacobian matrices `J = ∂x/∂ξ` (column-major)
    jacobians: QuadratureFunction,
}

impl QuadratureGeometry {
    /// Allocates a new instance for a mesh of 8-node hexahedra (2×2×2 Gauss points)
    ///
    /// The Jacobians are computed in the reference configuration.
    pub fn new_hex8(mesh: &Mesh) -> Result<Self, StrError> {
        mesh.check()?;
        if mesh.n_node_per_cell()? != Hex8::N_NODE {
            return Err("all cells must be 8-node hexahedra");
        }
        let gauss = Hex8::gauss_points();
        let mut geometry = QuadratureGeometry {
            n_node: Hex8::N_NODE,
            dshape: gauss.iter().map(|(ksi, _)| Hex8::deriv(ksi).to_vec()).collect(),
            weights: gauss.iter().map(|(_, w)| *w).collect(),
            jacobians: QuadratureFunction::new(mesh.cells.len(), gauss.len(), N_TENSOR2),
        };
        geometry.update_jacobians(mesh, &mesh.coordinates())?;
        Ok(geometry)
    }

    /// Returns the number of elements
    pub fn n_element(&self) -> usize {
        self.jacobians.n_element()
    }

    /// Returns the number of integration points per element
    pub fn n_point(&self) -> usize {
        self.weights.len()
    }

    /// Returns the number of nodes per element
    pub fn n_node(&self) -> usize {
        self.n_node
    }

    /// Returns the integration weight of a point
    pub fn weight(&self, p: usize) -> f64 {
        self.weights[p]
    }

    /// Returns the derivatives of the shape functions w.r.t. natural coordinates at a point
    pub fn dshape(&self, p: usize) -> &[f64] {
        &self.dshape[p]
    }

    /// Recomputes the Jacobians with the given nodal coordinates (node-major)
    pub fn update_jacobians(&mut self, mesh: &Mesh, coords: &[f64]) -> Result<(), StrError> {
        if coords.len() != NDIM * mesh.points.len() {
            return Err("the coordinates vector must have NDIM × n_point values");
        }
        if mesh.cells.len() != self.n_element() {
            return Err("the number of cells must equal the number of elements of the geometry");
        }
        let mut x = vec![0.0; NDIM * self.n_node];
        for cell in &mesh.cells {
            gather_element_coords(&mut x, cell, coords);
            for p in 0..self.n_point() {
                let jj = nodal_gradient(&x, &self.dshape[p]);
                self.jacobians.set(cell.id, p, jj.as_slice());
            }
        }
        Ok(())
    }

    /// Returns the Jacobian matrix at an integration point
    pub fn jacobian(&self, e: usize, p: usize) -> Matrix3<f64> {
        Matrix3::from_column_slice(self.jacobians.get(e, p))
    }

    /// Returns the gradients of the shape functions w.r.t. the current coordinates and the volume factor `w·det(J)`
    ///
    /// The gradients are returned as an `n_node × NDIM` matrix.
    pub fn spatial_gradients(&self, e: usize, p: usize) -> Result<(DMatrix<f64>, f64), StrError> {
        let jj = self.jacobian(e, p);
        let mut g = vec![0.0; NDIM * self.n_node];
        physical_gradients(&mut g, &self.dshape[p], &jj)?;
        let ds = DMatrix::from_row_slice(self.n_node, NDIM, &g);
        Ok((ds, self.weights[p] * jj.determinant()))
    }
}

/// Holds the gradients of the shape functions w.r.t. the reference coordinates at all integration points
///
/// These values are computed once (at the reference configuration) and used at every step to
/// compute the deformation gradient from the current nodal coordinates.
pub struct ShapeGradCache {
    /// Values `∂N_a/∂X_j` stored at `[NDIM*a+j]`
    data: QuadratureFunction,
}

impl ShapeGradCache {
    /// Allocates a new instance using the reference coordinates of the mesh
    pub fn new(mesh: &Mesh, geometry: &QuadratureGeometry) -> Result<Self, StrError> {
        if mesh.cells.len() != geometry.n_element() {
            return Err("the number of cells must equal the number of elements of the geometry");
        }
        let n_node = geometry.n_node();
        let mut data = QuadratureFunction::new(geometry.n_element(), geometry.n_point(), NDIM * n_node);
        let coords = mesh.coordinates();
        let mut x = vec![0.0; NDIM * n_node];
        for cell in &mesh.cells {
            gather_element_coords(&mut x, cell, &coords);
            for p in 0..geometry.n_point() {
                let jj = nodal_gradient(&x, geometry.dshape(p));
                physical_gradients(data.get_mut(cell.id, p), geometry.dshape(p), &jj)?;
            }
        }
        Ok(ShapeGradCache { data })
    }

    /// Returns the number of elements
    pub fn n_element(&self) -> usize {
        self.data.n_element()
    }

    /// Returns the number of integration points per element
    pub fn n_point(&self) -> usize {
        self.data.n_point()
    }

    /// Returns the number of nodes per element
    pub fn n_node(&self) -> usize {
        self.data.vdim() / NDIM
    }

    /// Returns the gradients at an integration point (`[NDIM*a+j]`)
    pub fn get(&self, e: usize, p: usize) -> &[f64] {
        self.data.get(e, p)
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
