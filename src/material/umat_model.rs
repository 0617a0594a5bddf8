use super::{strain_to_umat, swap_tangent_shear, umat_to_voigt, voigt_to_umat};
use super::{MaterialModelTrait, PointInput, PointOutput, UmatArgs, UmatFn};
use crate::base::Config;
use crate::fem::characteristic_length;
use crate::kinematics::{calc_strain, polar_decomposition};
use crate::StrError;

/// Implements a bridge to an external constitutive routine following the UMAT calling convention
///
/// At each integration point:
///
/// 1. the characteristic length is computed from the Jacobian determinant
/// 2. the incremental deformation gradient is polar-decomposed to obtain the rotation increment
/// 3. the beginning-of-step stress is permuted into the routine ordering `(11, 22, 33, 12, 13, 23)`
/// 4. the total and incremental strains are computed from `F₁` and `F_incr` with engineering shear
/// 5. the routine is called with the beginning-of-step state vector (updated in place)
/// 6. the shear rows and columns of the tangent are swapped and the stress is permuted back
///
/// The suggested time increment ratio (`pnewdt`) returned by the routine is not used.
pub struct UmatModel {
    /// External routine
    routine: UmatFn,

    /// Material properties (shared by all integration points)
    props: Vec<f64>,

    /// Indicates that the routine may be called concurrently
    reentrant: bool,
}

impl UmatModel {
    /// Allocates a new instance
    pub fn new(routine: UmatFn, props: &[f64], reentrant: bool) -> Result<Self, StrError> {
        if props.is_empty() {
            return Err("the external routine requires at least one material property");
        }
        Ok(UmatModel {
            routine,
            props: props.to_vec(),
            reentrant,
        })
    }

    /// Returns the material properties
    pub fn props(&self) -> &[f64] {
        &self.props
    }
}

impl MaterialModelTrait for UmatModel {
    /// Returns false because the external routine may return a non-symmetric tangent
    fn symmetric_tangent(&self) -> bool {
        false
    }

    /// Indicates whether the external routine may be called concurrently
    fn reentrant(&self) -> bool {
        self.reentrant
    }

    /// Calls the external routine at one integration point
    fn evaluate(&self, config: &Config, input: &PointInput, output: &mut PointOutput) -> Result<(), StrError> {
        let celent = characteristic_length(input.det_jacobian);
        let polar = polar_decomposition(
            &input.def_grad_incr,
            config.polar_tolerance,
            config.polar_max_iterations,
        );
        let strain = calc_strain(config.strain_measure, &input.def_grad1)
            .ok_or("cannot compute the strain of a singular deformation gradient")?;
        let delta_strain = calc_strain(config.strain_measure, &input.def_grad_incr)
            .ok_or("cannot compute the strain increment of a singular deformation gradient")?;

        // the routine updates the state vector in place, starting from the converged values
        output.state_vars.copy_from_slice(input.state_vars);
        let mut args = UmatArgs::new(&mut *output.state_vars, &self.props, input.element, input.point)?;
        args.stress = voigt_to_umat(input.stress);
        args.stran = strain_to_umat(&strain);
        args.dstran = strain_to_umat(&delta_strain);
        args.time = [input.time - input.delta_time, input.time];
        args.dtime = input.delta_time;
        args.celent = celent;
        args.drot.copy_from_slice(polar.rr.as_slice());
        args.dfgrd0.copy_from_slice(input.def_grad0.as_slice());
        args.dfgrd1.copy_from_slice(input.def_grad1.as_slice());

        // SAFETY: all arrays have the lengths announced to the routine
        unsafe { args.call(self.routine) };

        if args.pnewdt < 1.0 {
            tracing::debug!(
                element = input.element,
                point = input.point,
                pnewdt = args.pnewdt,
                "ignoring the time increment reduction suggested by the external routine"
            );
        }
        swap_tangent_shear(&mut args.ddsdde);
        output.tangent.copy_from_slice(&args.ddsdde);
        output.stress.copy_from_slice(&umat_to_voigt(&args.stress));
        Ok(())
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
