use crate::base::{NTENS, N_TANGENT};
use nalgebra::Matrix3;

/// Maps the components of the external-routine ordering `(11, 22, 33, 12, 13, 23)` to the
/// Voigt ordering `(11, 22, 33, 23, 13, 12)` used here
///
/// `umat[i] = voigt[UMAT_ORDER[i]]`. The permutation is its own inverse.
pub const UMAT_ORDER: [usize; NTENS] = [0, 1, 2, 5, 4, 3];

/// Converts a Voigt vector `(11, 22, 33, 23, 13, 12)` into the external-routine ordering `(11, 22, 33, 12, 13, 23)`
pub fn voigt_to_umat(voigt: &[f64]) -> [f64; NTENS] {
    let mut umat = [0.0; NTENS];
    for i in 0..NTENS {
        umat[i] = voigt[UMAT_ORDER[i]];
    }
    umat
}

/// Converts a vector in the external-routine ordering `(11, 22, 33, 12, 13, 23)` into the Voigt ordering `(11, 22, 33, 23, 13, 12)`
pub fn umat_to_voigt(umat: &[f64]) -> [f64; NTENS] {
    let mut voigt = [0.0; NTENS];
    for i in 0..NTENS {
        voigt[UMAT_ORDER[i]] = umat[i];
    }
    voigt
}

/// Swaps the 4th and 6th rows and columns (1-based) of a row-major 6×6 tangent
///
/// This converts a tangent in the external-routine ordering into the Voigt ordering (and vice-versa).
/// Applying it twice returns the original block.
pub fn swap_tangent_shear(dd: &mut [f64; N_TANGENT]) {
    for i in 0..NTENS {
        dd.swap(NTENS * i + 3, NTENS * i + 5);
    }
    for j in 0..NTENS {
        dd.swap(NTENS * 3 + j, NTENS * 5 + j);
    }
}

/// Converts a symmetric strain tensor into the external-routine ordering with engineering shear
///
/// ```text
/// (ε₁₁, ε₂₂, ε₃₃, 2ε₁₂, 2ε₁₃, 2ε₂₃)
/// ```
pub fn strain_to_umat(eps: &Matrix3<f64>) -> [f64; NTENS] {
    [
        eps[(0, 0)],
        eps[(1, 1)],
        eps[(2, 2)],
        2.0 * eps[(0, 1)],
        2.0 * eps[(0, 2)],
        2.0 * eps[(1, 2)],
    ]
}

/// Converts a symmetric strain tensor into the Voigt ordering with engineering shear
///
/// ```text
/// (ε₁₁, ε₂₂, ε₃₃, 2ε₂₃, 2ε₁₃, 2ε₁₂)
/// ```
pub fn strain_to_voigt(eps: &Matrix3<f64>) -> [f64; NTENS] {
    [
        eps[(0, 0)],
        eps[(1, 1)],
        eps[(2, 2)],
        2.0 * eps[(1, 2)],
        2.0 * eps[(0, 2)],
        2.0 * eps[(0, 1)],
    ]
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[cfg(test)]
mod tests {
    use super::{strain_to_umat, strain_to_voigt, swap_tangent_shear, umat_to_voigt, voigt_to_umat};
    use nalgebra::Matrix3;

    #[test]
    fn permutation_works() {
        let voigt = [11.0, 22.0, 33.0, 23.0, 13.0, 12.0];
        let umat = voigt_to_umat(&voigt);
        assert_eq!(umat, [11.0, 22.0, 33.0, 12.0, 13.0, 23.0]);
        assert_eq!(umat_to_voigt(&umat), voigt);
    }

    #[test]
    fn permutation_is_its_own_inverse() {
        let samples = [
            [1.0, -2.0, 3.5, 1e-12, -7.25, 1e6],
            [f64::MIN_POSITIVE, 0.0, -0.0, 4.0, 5.0, 6.0],
            [0.1, 0.2, 0.3, 0.4, 0.5, 0.6],
        ];
        for v in &samples {
            assert_eq!(&umat_to_voigt(&voigt_to_umat(v)), v);
            assert_eq!(&voigt_to_umat(&umat_to_voigt(v)), v);
            // same structure in both directions
            assert_eq!(voigt_to_umat(v), umat_to_voigt(v));
        }
    }

    #[test]
    fn swap_tangent_shear_works() {
        let mut dd = [0.0; 36];
        for i in 0..6 {
            for j in 0..6 {
                dd[6 * i + j] = (10 * (i + 1) + (j + 1)) as f64;
            }
        }
        let original = dd;
        swap_tangent_shear(&mut dd);
        // D'[i][j] = D[π(i)][π(j)] with π = (0, 1, 2, 5, 4, 3)
        let perm = [0, 1, 2, 5, 4, 3];
        for i in 0..6 {
            for j in 0..6 {
                assert_eq!(dd[6 * i + j], original[6 * perm[i] + perm[j]]);
            }
        }
        assert_eq!(dd[6 * 3 + 3], 66.0);
        assert_eq!(dd[6 * 3 + 5], 64.0);
        assert_eq!(dd[6 * 0 + 3], 16.0);
        assert_eq!(dd[6 * 4 + 4], 55.0);
    }

    #[test]
    fn swap_tangent_shear_is_an_involution() {
        let mut dd = [0.0; 36];
        for k in 0..36 {
            dd[k] = f64::sin(k as f64) * 1e3;
        }
        let original = dd;
        swap_tangent_shear(&mut dd);
        assert_ne!(dd, original);
        swap_tangent_shear(&mut dd);
        assert_eq!(dd, original);
    }

    #[test]
    fn strain_conversions_work() {
        let eps = Matrix3::new(
            1.0, 0.12, 0.13, //
            0.12, 2.0, 0.23, //
            0.13, 0.23, 3.0,
        );
        assert_eq!(strain_to_umat(&eps), [1.0, 2.0, 3.0, 0.24, 0.26, 0.46]);
        assert_eq!(strain_to_voigt(&eps), [1.0, 2.0, 3.0, 0.46, 0.26, 0.24]);
        assert_eq!(voigt_to_umat(&strain_to_voigt(&eps)), strain_to_umat(&eps));
    }
}
