use super::polar_decomposition;
use crate::base::{DEFAULT_POLAR_MAX_ITERATIONS, DEFAULT_POLAR_TOLERANCE};
use nalgebra::{Matrix3, SymmetricEigen};
use serde::{Deserialize, Serialize};

/// Defines the finite strain measures
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum StrainMeasure {
    /// Green-Lagrange strain `E = ½(Fᵀ·F - I)`
    Lagrangian,

    /// Almansi (Eulerian) strain `e = ½(I - F⁻ᵀ·F⁻¹)`
    Eulerian,

    /// Biot strain `B = U - I` with `U` the right stretch tensor
    Biot,

    /// Hencky (logarithmic) strain `E = ½ Σᵢ ln(λᵢ) vᵢ⊗vᵢ` with `(λᵢ, vᵢ)` the eigenpairs of `F·Fᵀ`
    Logarithmic,
}

/// Calculates the Green-Lagrange strain `E = ½(Fᵀ·F - I)`
pub fn lagrangian_strain(ff: &Matrix3<f64>) -> Matrix3<f64> {
    0.5 * (ff.transpose() * ff - Matrix3::identity())
}

/// Calculates the Almansi (Eulerian) strain `e = ½(I - F⁻ᵀ·F⁻¹)`
///
/// Returns `None` if F is singular.
pub fn eulerian_strain(ff: &Matrix3<f64>) -> Option<Matrix3<f64>> {
    let ff_inv = ff.try_inverse()?;
    Some(0.5 * (Matrix3::identity() - ff_inv.transpose() * ff_inv))
}

/// Calculates the Biot strain `B = U - I`
pub fn biot_strain(ff: &Matrix3<f64>) -> Matrix3<f64> {
    let polar = polar_decomposition(ff, DEFAULT_POLAR_TOLERANCE, DEFAULT_POLAR_MAX_ITERATIONS);
    polar.uu - Matrix3::identity()
}

/// Calculates the Hencky (logarithmic) strain from the left Cauchy-Green tensor `B = F·Fᵀ`
///
/// ```text
/// E = ½ Σᵢ ln(λᵢ) vᵢ⊗vᵢ
/// ```
///
/// If the capped eigen-solver does not converge, the result of the default solver is used
/// and a warning is logged. Returns `None` if an eigenvalue is not positive (singular F).
pub fn log_strain(ff: &Matrix3<f64>) -> Option<Matrix3<f64>> {
    let bb = ff * ff.transpose();
    let eigen = match SymmetricEigen::try_new(bb, f64::EPSILON, 100) {
        Some(eigen) => eigen,
        None => {
            tracing::warn!("spectral decomposition did not converge; using the best estimate");
            SymmetricEigen::new(bb)
        }
    };
    let mut ee = Matrix3::zeros();
    for i in 0..3 {
        let lambda = eigen.eigenvalues[i];
        if lambda <= 0.0 {
            return None;
        }
        let v = eigen.eigenvectors.column(i);
        ee += (0.5 * f64::ln(lambda)) * (v * v.transpose());
    }
    Some(ee)
}

/// Calculates the strain tensor corresponding to a deformation gradient
///
/// For the incremental strain, pass the incremental deformation gradient.
/// Returns `None` if F is singular.
pub fn calc_strain(measure: StrainMeasure, ff: &Matrix3<f64>) -> Option<Matrix3<f64>> {
    match measure {
        StrainMeasure::Lagrangian => Some(lagrangian_strain(ff)),
        StrainMeasure::Eulerian => eulerian_strain(ff),
        StrainMeasure::Biot => Some(biot_strain(ff)),
        StrainMeasure::Logarithmic => log_strain(ff),
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
