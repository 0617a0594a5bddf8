use crate::base::{NDIM, NTENS};
use crate::StrError;
use nalgebra::{DMatrix, DVector, Matrix3};

/// Generates the strain-displacement (B) matrix with engineering shear components
///
/// The rows follow the Voigt order `(11, 22, 33, 23, 13, 12)` and the columns follow the
/// local degrees of freedom `(u_x, u_y, u_z)` of each node: `col = NDIM*a + i`.
///
/// ```text
///        ┌                   ┐
///        │ N,x   0     0     │
///        │ 0     N,y   0     │
/// B_a =  │ 0     0     N,z   │
///        │ 0     N,z   N,y   │
///        │ N,z   0     N,x   │
///        │ N,y   N,x   0     │
///        └                   ┘
/// ```
///
/// # Input
///
/// * `ds` -- (n_node × NDIM) gradients of the shape functions w.r.t. the current coordinates
pub fn grad_matrix(ds: &DMatrix<f64>) -> DMatrix<f64> {
    let n_node = ds.nrows();
    let mut bb = DMatrix::zeros(NTENS, NDIM * n_node);
    for a in 0..n_node {
        let (dx, dy, dz) = (ds[(a, 0)], ds[(a, 1)], ds[(a, 2)]);
        let c = NDIM * a;
        bb[(0, c)] = dx;
        bb[(1, c + 1)] = dy;
        bb[(2, c + 2)] = dz;
        bb[(3, c + 1)] = dz;
        bb[(3, c + 2)] = dy;
        bb[(4, c)] = dz;
        bb[(4, c + 2)] = dx;
        bb[(5, c)] = dy;
        bb[(5, c + 1)] = dx;
    }
    bb
}

/// Generates the geometric gradient matrix (9 × NDIM·n_node)
///
/// Row `NDIM*i + j` holds `∂u_i/∂x_j`, i.e., `G[(NDIM*i+j, NDIM*a+i)] = ∂N_a/∂x_j`.
pub fn grad_geom_matrix(ds: &DMatrix<f64>) -> DMatrix<f64> {
    let n_node = ds.nrows();
    let mut gg = DMatrix::zeros(NDIM * NDIM, NDIM * n_node);
    for a in 0..n_node {
        for i in 0..NDIM {
            for j in 0..NDIM {
                gg[(NDIM * i + j, NDIM * a + i)] = ds[(a, j)];
            }
        }
    }
    gg
}

/// Converts the Voigt stress `(11, 22, 33, 23, 13, 12)` into a 3×3 symmetric matrix
pub fn stress_matrix(sig: &[f64]) -> Matrix3<f64> {
    Matrix3::new(
        sig[0], sig[5], sig[4], //
        sig[5], sig[1], sig[3], //
        sig[4], sig[3], sig[2],
    )
}

/// Adds the contribution of an integration point to the element internal force vector
///
/// ```text
/// R_ai += Σ_j σ_ij ∂N_a/∂x_j · dvol
/// ```
pub fn add_internal_force(rr: &mut DVector<f64>, ds: &DMatrix<f64>, sig: &[f64], dvol: f64) -> Result<(), StrError> {
    let n_node = ds.nrows();
    if rr.len() != NDIM * n_node {
        return Err("the element vector must have NDIM × n_node values");
    }
    let ss = stress_matrix(sig);
    for a in 0..n_node {
        for i in 0..NDIM {
            for j in 0..NDIM {
                rr[NDIM * a + i] += ss[(i, j)] * ds[(a, j)] * dvol;
            }
        }
    }
    Ok(())
}

/// Adds the material stiffness contribution `Bᵀ·C·B·dvol` of an integration point
///
/// # Input
///
/// * `kk` -- element stiffness matrix (NDIM·n_node × NDIM·n_node)
/// * `ds` -- (n_node × NDIM) gradients of the shape functions w.r.t. the current coordinates
/// * `tangent` -- row-major 6×6 tangent in Voigt order
/// * `dvol` -- integration weight times the determinant of the Jacobian
pub fn add_material_stiffness(
    kk: &mut DMatrix<f64>,
    ds: &DMatrix<f64>,
    tangent: &[f64],
    dvol: f64,
) -> Result<(), StrError> {
    let ndof = NDIM * ds.nrows();
    if kk.nrows() != ndof || kk.ncols() != ndof {
        return Err("the element matrix must be (NDIM × n_node) square");
    }
    if tangent.len() != NTENS * NTENS {
        return Err("the tangent must have 36 values");
    }
    let cc = DMatrix::from_row_slice(NTENS, NTENS, tangent);
    let bb = grad_matrix(ds);
    let cb = cc * &bb;
    *kk += bb.transpose() * cb * dvol;
    Ok(())
}

/// Adds the geometric (initial stress) stiffness contribution of an integration point
///
/// ```text
/// K_aibj += (∂N_a/∂x_k σ_kl ∂N_b/∂x_l) δ_ij · dvol
/// ```
pub fn add_geometric_stiffness(
    kk: &mut DMatrix<f64>,
    ds: &DMatrix<f64>,
    sig: &[f64],
    dvol: f64,
) -> Result<(), StrError> {
    let n_node = ds.nrows();
    let ndof = NDIM * n_node;
    if kk.nrows() != ndof || kk.ncols() != ndof {
        return Err("the element matrix must be (NDIM × n_node) square");
    }
    let ss = stress_matrix(sig);
    let gg = grad_geom_matrix(ds);
    let mut sigma = DMatrix::zeros(NDIM * NDIM, NDIM * NDIM);
    for i in 0..NDIM {
        for k in 0..NDIM {
            for l in 0..NDIM {
                sigma[(NDIM * i + k, NDIM * i + l)] = ss[(k, l)];
            }
        }
    }
    *kk += gg.transpose() * sigma * &gg * dvol;
    Ok(())
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
