use nalgebra::{Matrix3, Quaternion, Rotation3, UnitQuaternion};

/// Converts orientation data `q = [q0, q1, q2, q3]` (scalar part `q0` first) into a unit quaternion
///
/// The data is normalized; it must not be the zero quaternion.
pub fn unit_quat(q: &[f64; 4]) -> UnitQuaternion<f64> {
    UnitQuaternion::from_quaternion(Quaternion::new(q[0], q[1], q[2], q[3]))
}

/// Converts orientation data (scalar part first) into a rotation matrix
pub fn quat_to_rmat(q: &[f64; 4]) -> Matrix3<f64> {
    unit_quat(q).to_rotation_matrix().into_inner()
}

/// Converts a rotation matrix into orientation data (scalar part first)
///
/// The returned quaternion has a non-negative scalar part.
pub fn rmat_to_quat(r: &Matrix3<f64>) -> [f64; 4] {
    let uq = UnitQuaternion::from_rotation_matrix(&Rotation3::from_matrix_unchecked(*r));
    let q = uq.quaternion();
    if q.w < 0.0 {
        [-q.w, -q.i, -q.j, -q.k]
    } else {
        [q.w, q.i, q.j, q.k]
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[cfg(test)]
mod tests {
    use super::{quat_to_rmat, rmat_to_quat, unit_quat};
    use approx::assert_abs_diff_eq;
    use nalgebra::{Matrix3, Rotation3, UnitQuaternion, Vector3};
    use std::f64::consts::PI;

    // a few quaternions, including some with a negative scalar part and some not normalized
    const SAMPLES: [[f64; 4]; 9] = [
        [1.0, 0.0, 0.0, 0.0],
        [0.0, 1.0, 0.0, 0.0],
        [0.0, 0.0, 1.0, 0.0],
        [0.0, 0.0, 0.0, 1.0],
        [0.5, 0.5, 0.5, 0.5],
        [0.9, -0.1, 0.3, 0.2],
        [-0.3, 0.2, -0.8, 0.4],
        [0.01, 0.7, 0.7, -0.1],
        [0.2, -0.6, 0.1, 0.9],
    ];

    #[test]
    fn unit_quat_works() {
        let uq = unit_quat(&[2.0, 0.0, 0.0, 0.0]);
        assert_eq!(uq, UnitQuaternion::identity());
        let uq = unit_quat(&[0.0, 0.0, 0.0, 3.0]);
        assert_abs_diff_eq!(uq.angle(), PI, epsilon = 1e-15);
    }

    #[test]
    fn quat_to_rmat_works() {
        let r = quat_to_rmat(&[1.0, 0.0, 0.0, 0.0]);
        assert_eq!(r, Matrix3::identity());

        // 90° about z
        let s = f64::sqrt(0.5);
        let r = quat_to_rmat(&[s, 0.0, 0.0, s]);
        let correct = Matrix3::new(0.0, -1.0, 0.0, 1.0, 0.0, 0.0, 0.0, 0.0, 1.0);
        assert_abs_diff_eq!(r, correct, epsilon = 1e-15);

        // the matrix of an axis-angle rotation
        let axis = Vector3::new(1.0, 2.0, -0.5).normalize();
        let (sin, cos) = f64::sin_cos(0.35);
        let r = quat_to_rmat(&[cos, sin * axis[0], sin * axis[1], sin * axis[2]]);
        let correct = Rotation3::new(axis * 0.7);
        assert_abs_diff_eq!(r, *correct.matrix(), epsilon = 1e-14);
    }

    #[test]
    fn rotation_matrices_are_orthogonal() {
        for q in &SAMPLES {
            let r = quat_to_rmat(q);
            assert_abs_diff_eq!(r.transpose() * r, Matrix3::identity(), epsilon = 1e-14);
            assert_abs_diff_eq!(r.determinant(), 1.0, epsilon = 1e-14);
        }
    }

    #[test]
    fn quaternion_round_trip_works() {
        for q in &SAMPLES {
            let norm = f64::sqrt(q.iter().map(|v| v * v).sum());
            let back = rmat_to_quat(&quat_to_rmat(q));
            // recovered up to sign
            let dot: f64 = (0..4).map(|i| q[i] * back[i]).sum();
            let sign = if dot < 0.0 { -1.0 } else { 1.0 };
            for i in 0..4 {
                assert_abs_diff_eq!(back[i], sign * q[i] / norm, epsilon = 1e-14);
            }
            assert!(back[0] >= 0.0);
        }
    }

    #[test]
    fn half_turns_round_trip() {
        for axis in [Vector3::x_axis(), Vector3::y_axis(), Vector3::z_axis()] {
            let r = *Rotation3::from_axis_angle(&axis, PI).matrix();
            let q = rmat_to_quat(&r);
            assert_abs_diff_eq!(q[0], 0.0, epsilon = 1e-15);
            assert_abs_diff_eq!(quat_to_rmat(&q), r, epsilon = 1e-14);
        }
    }
}
