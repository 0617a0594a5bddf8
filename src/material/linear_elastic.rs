use super::{strain_to_voigt, MaterialModelTrait, PointInput, PointOutput};
use crate::base::{Config, NTENS, N_TANGENT};
use crate::kinematics::calc_strain;
use crate::StrError;

/// Implements a native linear elastic (hypoelastic) model
///
/// The stress is updated with the strain increment computed from the incremental deformation
/// gradient (using the strain measure given in [Config]):
///
/// ```text
/// σ₁ = σ₀ + D : Δε
/// ```
pub struct LinearElastic {
    /// Row-major elastic modulus in Voigt order (engineering shear)
    dd: [f64; N_TANGENT],
}

impl LinearElastic {
    /// Allocates a new instance
    pub fn new(young: f64, poisson: f64) -> Self {
        let c = young / ((1.0 + poisson) * (1.0 - 2.0 * poisson));
        let g = young / (2.0 * (1.0 + poisson));
        let mut dd = [0.0; N_TANGENT];
        for i in 0..3 {
            for j in 0..3 {
                dd[NTENS * i + j] = if i == j { c * (1.0 - poisson) } else { c * poisson };
            }
            dd[NTENS * (i + 3) + (i + 3)] = g;
        }
        LinearElastic { dd }
    }

    /// Returns the row-major elastic modulus
    pub fn modulus(&self) -> &[f64] {
        &self.dd
    }
}

impl MaterialModelTrait for LinearElastic {
    /// Indicates that the tangent is symmetric (and constant)
    fn symmetric_tangent(&self) -> bool {
        true
    }

    /// Indicates that the model may be evaluated concurrently
    fn reentrant(&self) -> bool {
        true
    }

    /// Updates the stress tensor and sets the tangent
    fn evaluate(&self, config: &Config, input: &PointInput, output: &mut PointOutput) -> Result<(), StrError> {
        let eps = calc_strain(config.strain_measure, &input.def_grad_incr)
            .ok_or("cannot compute the strain increment of a singular deformation gradient")?;
        let delta_strain = strain_to_voigt(&eps);
        for i in 0..NTENS {
            output.stress[i] = input.stress[i];
            for j in 0..NTENS {
                output.stress[i] += self.dd[NTENS * i + j] * delta_strain[j]; // σ += D : Δε
            }
        }
        output.state_vars.copy_from_slice(input.state_vars);
        output.tangent.copy_from_slice(&self.dd);
        Ok(())
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[cfg(test)]
mod tests {
    use super::LinearElastic;
    use crate::base::Config;
    use crate::kinematics::StrainMeasure;
    use crate::material::{MaterialModelTrait, PointInput, PointOutput};
    use approx::assert_abs_diff_eq;
    use nalgebra::Matrix3;

    #[test]
    fn modulus_works() {
        let model = LinearElastic::new(1000.0, 0.25);
        let dd = model.modulus();
        // c = E / ((1+ν)(1-2ν)) = 1600
        assert_abs_diff_eq!(dd[0], 1200.0, epsilon = 1e-12);
        assert_abs_diff_eq!(dd[1], 400.0, epsilon = 1e-12);
        assert_abs_diff_eq!(dd[6 * 3 + 3], 400.0, epsilon = 1e-12);
        assert_eq!(dd[6 * 3 + 4], 0.0);
        assert!(model.symmetric_tangent());
        assert!(model.reentrant());
    }

    #[test]
    fn evaluate_works() {
        let model = LinearElastic::new(1000.0, 0.0);
        let mut config = Config::new();
        config.set_strain_measure(StrainMeasure::Lagrangian).unwrap();
        let ff = Matrix3::new(1.0, 0.002, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0);
        let stress0 = [1.0, 2.0, 3.0, 0.0, 0.0, 0.0];
        let input = PointInput {
            element: 0,
            point: 0,
            det_jacobian: 1.0,
            time: 1.0,
            delta_time: 1.0,
            stress: &stress0,
            state_vars: &[],
            def_grad0: Matrix3::identity(),
            def_grad1: ff,
            def_grad_incr: ff,
        };
        let mut stress1 = [0.0; 6];
        let mut tangent = [0.0; 36];
        let mut output = PointOutput {
            stress: &mut stress1,
            state_vars: &mut [],
            tangent: &mut tangent,
        };
        model.evaluate(&config, &input, &mut output).unwrap();
        // E = ½(FᵀF − I): E₁₂ = 0.001, E₂₂ = ½·0.002²
        let g = 500.0;
        assert_abs_diff_eq!(stress1[5], g * 0.002, epsilon = 1e-12);
        assert_abs_diff_eq!(stress1[0], 1.0, epsilon = 1e-12);
        assert_abs_diff_eq!(stress1[1], 2.0 + 1000.0 * 0.5 * 0.002 * 0.002, epsilon = 1e-12);
        assert_eq!(stress1[3], 0.0);
        assert_eq!(tangent[6 * 5 + 5], g);
    }
}
