use nalgebra::{Matrix3, Rotation3, UnitQuaternion, Vector3};

/// Holds the results of the polar decomposition `F = R·U = V·R`
#[derive(Clone, Copy, Debug)]
pub struct PolarDecomposition {
    /// Rotation tensor
    pub rr: Matrix3<f64>,

    /// Right stretch tensor `U = Rᵀ·F`
    pub uu: Matrix3<f64>,

    /// Left stretch tensor `V = F·Rᵀ`
    pub vv: Matrix3<f64>,

    /// Number of iterations performed
    pub iterations: usize,

    /// Indicates that the tolerance was reached
    pub converged: bool,
}

/// Performs the polar decomposition of a 3×3 (deformation gradient) tensor
///
/// The rotation is extracted by iteratively correcting a unit quaternion until the torque-like
/// vector `ω = Σₖ (Rₖ × Fₖ) / (|Σₖ Rₖ·Fₖ| + ϵ)` (with `Rₖ`, `Fₖ` the k-th columns) is smaller
/// than the tolerance (Müller et al., 2016).
///
/// The iteration starts from the identity. If it ends at a point that is not the rotation of the
/// decomposition (`U` not positive definite, e.g., at the stationary point of half turns), it is
/// restarted with the remaining iterations from the rotation `W·Zᵀ` of the singular value
/// decomposition `F = W·Σ·Zᵀ`.
///
/// A slow convergence is not an error: after `max_iterations` the best available estimate is
/// returned with `converged = false` and a warning is logged.
///
/// # Input
///
/// * `ff` -- the tensor to decompose (it should have a positive determinant)
/// * `tolerance` -- tolerance on the norm of the quaternion correction (e.g., 1e-12)
/// * `max_iterations` -- maximum number of iterations (e.g., 500)
pub fn polar_decomposition(ff: &Matrix3<f64>, tolerance: f64, max_iterations: usize) -> PolarDecomposition {
    let (mut q, mut iterations, mut converged) =
        extract_rotation(ff, UnitQuaternion::identity(), tolerance, max_iterations);
    if !positive_definite(&(q.to_rotation_matrix().matrix().transpose() * ff)) {
        let svd = ff.svd(true, true);
        if let (Some(w), Some(z_t)) = (svd.u, svd.v_t) {
            tracing::debug!(iterations, "polar decomposition stalled; restarting from the singular vectors");
            let guess = UnitQuaternion::from_rotation_matrix(&Rotation3::from_matrix_unchecked(w * z_t));
            let (q_restart, more, converged_restart) =
                extract_rotation(ff, guess, tolerance, max_iterations - iterations);
            q = q_restart;
            iterations += more;
            converged = converged_restart;
        }
    }
    if !converged {
        tracing::warn!(iterations, "polar decomposition did not converge; using the best estimate");
    }
    let rr = q.to_rotation_matrix().into_inner();
    PolarDecomposition {
        rr,
        uu: rr.transpose() * ff,
        vv: ff * rr.transpose(),
        iterations,
        converged,
    }
}

/// Runs Müller's iteration from a given rotation; returns (rotation, iterations, converged)
fn extract_rotation(
    ff: &Matrix3<f64>,
    mut q: UnitQuaternion<f64>,
    tolerance: f64,
    max_iterations: usize,
) -> (UnitQuaternion<f64>, usize, bool) {
    let mut iterations = 0;
    while iterations < max_iterations {
        let rr = q.to_rotation_matrix();
        let mut numerator = Vector3::zeros();
        let mut denominator = 0.0;
        for k in 0..3 {
            numerator += rr.matrix().column(k).cross(&ff.column(k));
            denominator += rr.matrix().column(k).dot(&ff.column(k));
        }
        let omega = numerator / (f64::abs(denominator) + 1e-9);
        if omega.norm() < tolerance {
            return (q, iterations, true);
        }
        q = UnitQuaternion::from_scaled_axis(omega) * q;
        q.renormalize();
        iterations += 1;
    }
    (q, iterations, false)
}

/// Checks whether the symmetric part of a tensor is positive definite
fn positive_definite(uu: &Matrix3<f64>) -> bool {
    (0.5 * (uu + uu.transpose())).cholesky().is_some()
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[cfg(test)]
mod tests {
    use super::polar_decomposition;
    use crate::kinematics::biot_strain;
    use approx::assert_abs_diff_eq;
    use nalgebra::{Matrix3, Rotation3, Vector3};
    use std::f64::consts::PI;

    #[test]
    fn identity_works() {
        let ii = Matrix3::identity();
        let res = polar_decomposition(&ii, 1e-12, 500);
        assert!(res.converged);
        assert_eq!(res.iterations, 0);
        assert_eq!(res.rr, ii);
        assert_eq!(res.uu, ii);
        assert_eq!(res.vv, ii);
    }

    #[test]
    fn pure_rotation_works() {
        let rot = Rotation3::new(Vector3::new(0.1, -0.4, 0.3));
        let ff = *rot.matrix();
        let res = polar_decomposition(&ff, 1e-12, 500);
        assert!(res.converged);
        assert_abs_diff_eq!(res.rr, ff, epsilon = 1e-12);
        assert_abs_diff_eq!(res.uu, Matrix3::identity(), epsilon = 1e-12);
        assert_abs_diff_eq!(res.vv, Matrix3::identity(), epsilon = 1e-12);
    }

    #[test]
    fn rotated_stretch_works() {
        let rot = *Rotation3::new(Vector3::new(0.0, 0.0, 0.5)).matrix();
        let stretch = Matrix3::new(
            1.2, 0.1, 0.0, //
            0.1, 0.9, 0.05, //
            0.0, 0.05, 1.05,
        );
        let ff = rot * stretch;
        let res = polar_decomposition(&ff, 1e-12, 500);
        assert!(res.converged);
        assert_abs_diff_eq!(res.rr, rot, epsilon = 1e-10);
        assert_abs_diff_eq!(res.uu, stretch, epsilon = 1e-10);
        assert_abs_diff_eq!(res.rr * res.uu, ff, epsilon = 1e-12);
        assert_abs_diff_eq!(res.vv * res.rr, ff, epsilon = 1e-12);
        assert_abs_diff_eq!(res.vv, res.vv.transpose(), epsilon = 1e-10);
    }

    #[test]
    fn half_turn_times_stretch_works() {
        // the torque vanishes at the identity; U = diag(-1.1, -1, 1) is not the stretch
        let rot = *Rotation3::from_axis_angle(&Vector3::z_axis(), PI).matrix();
        let stretch = Matrix3::from_diagonal(&Vector3::new(1.1, 1.0, 1.0));
        let ff = rot * stretch;
        let res = polar_decomposition(&ff, 1e-12, 500);
        assert!(res.converged);
        assert_abs_diff_eq!(res.rr, rot, epsilon = 1e-12);
        assert_abs_diff_eq!(res.uu, stretch, epsilon = 1e-12);
        assert_abs_diff_eq!(biot_strain(&ff)[(0, 0)], 0.1, epsilon = 1e-12);

        // positive trace of F, but the identity is still a saddle point
        let rot = *Rotation3::from_axis_angle(&Vector3::x_axis(), PI).matrix();
        let stretch = Matrix3::from_diagonal(&Vector3::new(3.0, 1.0, 1.0));
        let res = polar_decomposition(&(rot * stretch), 1e-12, 500);
        assert!(res.converged);
        assert_abs_diff_eq!(res.rr, rot, epsilon = 1e-12);
        assert_abs_diff_eq!(res.uu, stretch, epsilon = 1e-12);

        // half turn about an oblique axis with a general stretch
        let axis = nalgebra::Unit::new_normalize(Vector3::new(1.0, -2.0, 0.5));
        let rot = *Rotation3::from_axis_angle(&axis, PI).matrix();
        let stretch = Matrix3::new(
            1.2, 0.1, 0.0, //
            0.1, 0.9, 0.05, //
            0.0, 0.05, 1.05,
        );
        let res = polar_decomposition(&(rot * stretch), 1e-12, 500);
        assert!(res.converged);
        assert_abs_diff_eq!(res.rr, rot, epsilon = 1e-10);
        assert_abs_diff_eq!(res.uu, stretch, epsilon = 1e-10);
    }

    #[test]
    fn non_convergence_returns_best_estimate() {
        let rot = *Rotation3::new(Vector3::new(0.3, 0.2, 0.1)).matrix();
        let res = polar_decomposition(&rot, 1e-12, 1);
        assert!(!res.converged);
        assert_eq!(res.iterations, 1);
        // still a proper rotation
        assert_abs_diff_eq!(res.rr.transpose() * res.rr, Matrix3::identity(), epsilon = 1e-14);
        assert_abs_diff_eq!(res.rr * res.uu, rot, epsilon = 1e-14);
    }
}
