use super::{linked_umat, LinearElastic, UmatFn, UmatModel};
use crate::base::{Config, MaterialData, Mesh, ParamMaterial, ParamModel, NTENS, N_TANGENT};
use crate::fem::{add_internal_force, add_material_stiffness, update_deformation_gradients};
use crate::fem::{QuadratureGeometry, QuadratureState, ShapeGradCache, StateVarLayout};
use crate::StrError;
use nalgebra::{DMatrix, DVector, Matrix3};
use rayon::prelude::*;

/// Holds the (read-only) data of one integration point for the material update
pub struct PointInput<'a> {
    /// Element index
    pub element: usize,

    /// Integration point index
    pub point: usize,

    /// Determinant of the Jacobian of the isoparametric mapping
    pub det_jacobian: f64,

    /// Time at the end of the step
    pub time: f64,

    /// Time increment
    pub delta_time: f64,

    /// Beginning-of-step stress (Voigt order)
    pub stress: &'a [f64],

    /// Beginning-of-step state vector
    pub state_vars: &'a [f64],

    /// Beginning-of-step deformation gradient
    pub def_grad0: Matrix3<f64>,

    /// End-of-step deformation gradient
    pub def_grad1: Matrix3<f64>,

    /// Incremental deformation gradient
    pub def_grad_incr: Matrix3<f64>,
}

/// Holds the (mutable) results of the material update at one integration point
pub struct PointOutput<'a> {
    /// End-of-step stress (Voigt order)
    pub stress: &'a mut [f64],

    /// End-of-step state vector
    pub state_vars: &'a mut [f64],

    /// Row-major 6×6 tangent (Voigt order)
    pub tangent: &'a mut [f64],
}

/// Specifies the essential functions for constitutive models evaluated at integration points
pub trait MaterialModelTrait: Send + Sync {
    /// Indicates that the tangent is symmetric
    fn symmetric_tangent(&self) -> bool;

    /// Indicates that the model may be evaluated concurrently at distinct points
    fn reentrant(&self) -> bool;

    /// Computes the end-of-step stress, state vector and tangent at one integration point
    ///
    /// The beginning-of-step data (input) must not be modified.
    fn evaluate(&self, config: &Config, input: &PointInput, output: &mut PointOutput) -> Result<(), StrError>;
}

/// Holds the actual constitutive model implementation and the material state at all integration points
pub struct MaterialModel {
    /// Holds the actual model implementation
    pub actual: Box<dyn MaterialModelTrait>,

    /// Holds the state at all integration points
    pub state: QuadratureState,

    /// Time at the end of the current step
    time: f64,

    /// Current time increment
    delta_time: f64,
}

impl MaterialModel {
    /// Allocates a new instance
    ///
    /// # Input
    ///
    /// * `param` -- the material parameters
    /// * `data` -- the properties, initial state variables, and orientations
    /// * `mesh` -- the mesh (the cell attributes are the 1-based grain ids)
    /// * `n_point` -- the number of integration points per element
    /// * `routine` -- the external routine for [ParamModel::Umat]; if `None`, the routine
    ///   linked with the `link-umat` feature is used
    pub fn new(
        param: &ParamMaterial,
        data: &MaterialData,
        mesh: &Mesh,
        n_point: usize,
        routine: Option<UmatFn>,
    ) -> Result<Self, StrError> {
        let layout = StateVarLayout::new(param)?;
        if data.props.len() != param.n_props() {
            return Err("the number of material properties is incorrect");
        }
        let actual: Box<dyn MaterialModelTrait> = match param.model {
            ParamModel::Umat { reentrant, .. } => {
                let routine = routine
                    .or_else(linked_umat)
                    .ok_or("an external routine is required for the Umat model")?;
                Box::new(UmatModel::new(routine, &data.props, reentrant)?)
            }
            ParamModel::LinearElastic { young, poisson } => Box::new(LinearElastic::new(young, poisson)),
        };
        let mut state = QuadratureState::new(mesh.cells.len(), n_point, layout);
        state.initialize_state_vars(mesh, data)?;
        tracing::debug!(
            n_element = state.n_element(),
            n_point,
            width = layout.width(),
            "allocated the material state"
        );
        Ok(MaterialModel {
            actual,
            state,
            time: 0.0,
            delta_time: 0.0,
        })
    }

    /// Sets the time at the end of the current step
    pub fn set_time(&mut self, time: f64) {
        self.time = time;
    }

    /// Sets the current time increment
    pub fn set_delta_time(&mut self, delta_time: f64) {
        self.delta_time = delta_time;
    }

    /// Returns the time at the end of the current step
    pub fn time(&self) -> f64 {
        self.time
    }

    /// Returns the current time increment
    pub fn delta_time(&self) -> f64 {
        self.delta_time
    }

    /// Recomputes the end-of-step and incremental deformation gradients from the current nodal coordinates
    ///
    /// This function must be called before [MaterialModel::evaluate].
    pub fn compute_incremental_kinematics(
        &mut self,
        config: &Config,
        cache: &ShapeGradCache,
        mesh: &Mesh,
        coords: &[f64],
    ) -> Result<(), StrError> {
        update_deformation_gradients(&mut self.state, cache, mesh, coords, config.parallel)
    }

    /// Evaluates the constitutive model at all integration points
    ///
    /// The loop over elements runs in parallel if `config.parallel` is true and the model is reentrant.
    ///
    /// # Input
    ///
    /// * `config` -- the configuration
    /// * `geometry` -- the Jacobians of all integration points (current configuration)
    pub fn evaluate(&mut self, config: &Config, geometry: &QuadratureGeometry) -> Result<(), StrError> {
        if geometry.n_element() != self.state.n_element() || geometry.n_point() != self.state.n_point() {
            return Err("the geometry and the material state must have the same number of integration points");
        }
        let actual = self.actual.as_ref();
        let (time, delta_time) = (self.time, self.delta_time);
        let n_point = self.state.n_point();
        let width = self.state.layout.width();
        let state = &mut self.state;
        let (stress0, state_vars0) = (&state.stress0, &state.state_vars0);
        let (def_grad0, def_grad1, def_grad_incr) = (&state.def_grad0, &state.def_grad1, &state.def_grad_incr);
        let work = |(e, ((sig1, sv1), dd)): (usize, ((&mut [f64], &mut [f64]), &mut [f64]))| -> Result<(), StrError> {
            for p in 0..n_point {
                let input = PointInput {
                    element: e,
                    point: p,
                    det_jacobian: geometry.jacobian(e, p).determinant(),
                    time,
                    delta_time,
                    stress: stress0.get(e, p),
                    state_vars: state_vars0.get(e, p),
                    def_grad0: Matrix3::from_column_slice(def_grad0.get(e, p)),
                    def_grad1: Matrix3::from_column_slice(def_grad1.get(e, p)),
                    def_grad_incr: Matrix3::from_column_slice(def_grad_incr.get(e, p)),
                };
                let mut output = PointOutput {
                    stress: &mut sig1[(p * NTENS)..((p + 1) * NTENS)],
                    state_vars: &mut sv1[(p * width)..((p + 1) * width)],
                    tangent: &mut dd[(p * N_TANGENT)..((p + 1) * N_TANGENT)],
                };
                actual.evaluate(config, &input, &mut output)?;
            }
            Ok(())
        };
        let stress1 = state.stress1.elements_mut();
        let state_vars1 = state.state_vars1.elements_mut();
        let tangent = state.tangent.elements_mut();
        if config.parallel && actual.reentrant() {
            stress1
                .into_par_iter()
                .zip(state_vars1)
                .zip(tangent)
                .enumerate()
                .try_for_each(work)
        } else {
            stress1
                .into_iter()
                .zip(state_vars1)
                .zip(tangent)
                .enumerate()
                .try_for_each(work)
        }
    }

    /// Evaluates the constitutive model at a single integration point
    pub fn evaluate_point(&mut self, config: &Config, e: usize, p: usize, det_jacobian: f64) -> Result<(), StrError> {
        let state = &mut self.state;
        let input = PointInput {
            element: e,
            point: p,
            det_jacobian,
            time: self.time,
            delta_time: self.delta_time,
            stress: state.stress0.get(e, p),
            state_vars: state.state_vars0.get(e, p),
            def_grad0: Matrix3::from_column_slice(state.def_grad0.get(e, p)),
            def_grad1: Matrix3::from_column_slice(state.def_grad1.get(e, p)),
            def_grad_incr: Matrix3::from_column_slice(state.def_grad_incr.get(e, p)),
        };
        let mut output = PointOutput {
            stress: state.stress1.get_mut(e, p),
            state_vars: state.state_vars1.get_mut(e, p),
            tangent: state.tangent.get_mut(e, p),
        };
        self.actual.evaluate(config, &input, &mut output)
    }

    /// Adds the material stiffness of an integration point to the element matrix, using the computed tangent
    ///
    /// The material state is not modified.
    pub fn assemble_tangent_contribution(
        &self,
        kk: &mut DMatrix<f64>,
        e: usize,
        p: usize,
        geometry: &QuadratureGeometry,
    ) -> Result<(), StrError> {
        let (ds, dvol) = geometry.spatial_gradients(e, p)?;
        add_material_stiffness(kk, &ds, self.state.tangent.get(e, p), dvol)
    }

    /// Adds the internal force of an integration point to the element vector, using the end-of-step stress
    pub fn internal_force(
        &self,
        rr: &mut DVector<f64>,
        e: usize,
        p: usize,
        geometry: &QuadratureGeometry,
    ) -> Result<(), StrError> {
        let (ds, dvol) = geometry.spatial_gradients(e, p)?;
        add_internal_force(rr, &ds, self.state.stress1.get(e, p), dvol)
    }

    /// Copies the end-of-step data into the beginning-of-step buffers
    ///
    /// This function must be called once per converged time step.
    pub fn advance_state(&mut self) {
        self.state.advance();
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[cfg(test)]
mod tests {
    use super::MaterialModel;
    use crate::base::{Config, GrainPlacement, MaterialData, Samples, NDIM};
    use crate::fem::{QuadratureGeometry, ShapeGradCache};
    use crate::material::{umat_counter, umat_isotropic_elastic};
    use approx::assert_abs_diff_eq;
    use nalgebra::{DMatrix, DVector};

    fn elastic_data() -> MaterialData {
        MaterialData {
            props: Samples::props_umat_elastic(),
            state_vars: vec![0.0],
            orientations: Vec::new(),
        }
    }

    // stretches the mesh along x
    fn stretch(reference: &[f64], lambda: f64) -> Vec<f64> {
        let mut x = reference.to_vec();
        for xp in x.chunks_exact_mut(NDIM) {
            xp[0] *= lambda;
        }
        x
    }

    #[test]
    fn new_captures_errors() {
        let mesh = Samples::one_hex8();
        let param = Samples::param_umat_elastic();
        let mut data = elastic_data();
        data.props.push(1.0);
        assert_eq!(
            MaterialModel::new(&param, &data, &mesh, 8, Some(umat_isotropic_elastic)).err(),
            Some("the number of material properties is incorrect")
        );
        if !cfg!(feature = "link-umat") {
            assert_eq!(
                MaterialModel::new(&param, &elastic_data(), &mesh, 8, None).err(),
                Some("an external routine is required for the Umat model")
            );
        }
        let mut data = elastic_data();
        data.state_vars.push(1.0);
        assert_eq!(
            MaterialModel::new(&param, &data, &mesh, 8, Some(umat_isotropic_elastic)).err(),
            Some("the initial state variables do not match the state vector width")
        );
        let mut mesh = Samples::one_hex8();
        mesh.cells[0].id = 3;
        assert_eq!(
            MaterialModel::new(&param, &elastic_data(), &mesh, 8, Some(umat_isotropic_elastic)).err(),
            Some("cell ids must equal their position in the cells array")
        );
    }

    #[test]
    fn new_works() {
        let mesh = Samples::one_hex8();
        let param = Samples::param_linear_elastic();
        let data = MaterialData {
            props: Vec::new(),
            state_vars: Vec::new(),
            orientations: Vec::new(),
        };
        let model = MaterialModel::new(&param, &data, &mesh, 8, None).unwrap();
        assert!(model.actual.symmetric_tangent());
        assert_eq!(model.state.n_element(), 1);
        assert_eq!(model.state.n_point(), 8);
        assert_eq!(model.time(), 0.0);
        assert_eq!(model.delta_time(), 0.0);
    }

    #[test]
    fn umat_and_native_models_agree() {
        let mesh = Samples::two_hex8();
        let geometry = QuadratureGeometry::new_hex8(&mesh).unwrap();
        let cache = ShapeGradCache::new(&mesh, &geometry).unwrap();
        let coords = stretch(&mesh.coordinates(), 1.002);
        let config = Config::new();

        let mut umat = MaterialModel::new(
            &Samples::param_umat_elastic(),
            &elastic_data(),
            &mesh,
            8,
            Some(umat_isotropic_elastic),
        )
        .unwrap();
        let native_data = MaterialData {
            props: Vec::new(),
            state_vars: Vec::new(),
            orientations: Vec::new(),
        };
        let mut native = MaterialModel::new(&Samples::param_linear_elastic(), &native_data, &mesh, 8, None).unwrap();

        for model in [&mut umat, &mut native] {
            model.set_time(1.0);
            model.set_delta_time(1.0);
            model.compute_incremental_kinematics(&config, &cache, &mesh, &coords).unwrap();
            model.evaluate(&config, &geometry).unwrap();
        }
        for e in 0..2 {
            for p in 0..8 {
                let a = umat.state.stress1.get(e, p);
                let b = native.state.stress1.get(e, p);
                for i in 0..6 {
                    assert_abs_diff_eq!(a[i], b[i], epsilon = 1e-12);
                }
                let a = umat.state.tangent.get(e, p);
                let b = native.state.tangent.get(e, p);
                for k in 0..36 {
                    assert_abs_diff_eq!(a[k], b[k], epsilon = 1e-12);
                }
            }
        }
        // uniaxial stretch: σ₁₁ > σ₂₂ = σ₃₃ > 0 and no shear
        let sig = umat.state.stress1.get(1, 3);
        assert!(sig[0] > sig[1]);
        assert!(sig[1] > 0.0);
        assert_abs_diff_eq!(sig[1], sig[2], epsilon = 1e-12);
        assert_abs_diff_eq!(sig[3], 0.0, epsilon = 1e-12);
    }

    #[test]
    fn evaluate_keeps_the_beginning_of_step_data() {
        let mesh = Samples::one_hex8();
        let geometry = QuadratureGeometry::new_hex8(&mesh).unwrap();
        let cache = ShapeGradCache::new(&mesh, &geometry).unwrap();
        let coords = stretch(&mesh.coordinates(), 1.01);
        let config = Config::new();
        let mut model = MaterialModel::new(
            &Samples::param_umat_elastic(),
            &elastic_data(),
            &mesh,
            8,
            Some(umat_isotropic_elastic),
        )
        .unwrap();
        model.compute_incremental_kinematics(&config, &cache, &mesh, &coords).unwrap();
        model.evaluate(&config, &geometry).unwrap();
        assert!(model.state.stress0.as_slice().iter().all(|v| *v == 0.0));
        assert!(model.state.stress1.get(0, 0)[0] > 0.0);

        // evaluating again gives the same results
        let first = model.state.stress1.clone();
        model.evaluate(&config, &geometry).unwrap();
        assert_eq!(model.state.stress1, first);

        model.advance_state();
        assert_eq!(model.state.stress0, first);
        assert_eq!(model.state.def_grad0, model.state.def_grad1);
    }

    #[test]
    fn evaluate_point_works() {
        let mesh = Samples::one_hex8();
        let param = Samples::param_umat_crystal(GrainPlacement::End);
        let data = MaterialData {
            props: vec![1.0, 2.0],
            state_vars: vec![10.0, 0.0, 0.0],
            orientations: vec![1.0, 0.0, 0.0, 0.0, 0.0, 1.0, 0.0, 0.0],
        };
        let mut model = MaterialModel::new(&param, &data, &mesh, 8, Some(umat_counter)).unwrap();
        let config = Config::new();
        model.evaluate_point(&config, 0, 5, 0.125).unwrap();
        assert_eq!(model.state.state_vars1.get(0, 5), &[11.0, 0.0, 5.0, 1.0, 0.0, 0.0, 0.0]);
        assert_eq!(model.state.state_vars1.get(0, 4), &[10.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0]);
        assert_eq!(model.state.state_vars0.get(0, 5), &[10.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0]);
    }

    #[test]
    fn parallel_evaluation_matches_serial() {
        let mesh = Samples::two_hex8();
        let geometry = QuadratureGeometry::new_hex8(&mesh).unwrap();
        let cache = ShapeGradCache::new(&mesh, &geometry).unwrap();
        let coords = stretch(&mesh.coordinates(), 0.995);
        let mut serial = Config::new();
        serial.set_parallel(false).unwrap();
        let mut parallel = Config::new();
        parallel.set_parallel(true).unwrap();
        let mut results = Vec::new();
        for config in [&serial, &parallel] {
            let mut model = MaterialModel::new(
                &Samples::param_umat_elastic(),
                &elastic_data(),
                &mesh,
                8,
                Some(umat_isotropic_elastic),
            )
            .unwrap();
            model.compute_incremental_kinematics(config, &cache, &mesh, &coords).unwrap();
            model.evaluate(config, &geometry).unwrap();
            results.push(model.state.stress1.clone());
        }
        assert_eq!(results[0], results[1]);
    }

    #[test]
    fn assemble_works() {
        let mesh = Samples::one_hex8();
        let geometry = QuadratureGeometry::new_hex8(&mesh).unwrap();
        let cache = ShapeGradCache::new(&mesh, &geometry).unwrap();
        let coords = stretch(&mesh.coordinates(), 1.001);
        let config = Config::new();
        let mut model = MaterialModel::new(
            &Samples::param_umat_elastic(),
            &elastic_data(),
            &mesh,
            8,
            Some(umat_isotropic_elastic),
        )
        .unwrap();
        model.compute_incremental_kinematics(&config, &cache, &mesh, &coords).unwrap();
        model.evaluate(&config, &geometry).unwrap();
        let mut kk = DMatrix::zeros(24, 24);
        let mut rr = DVector::zeros(24);
        for p in 0..8 {
            model.assemble_tangent_contribution(&mut kk, 0, p, &geometry).unwrap();
            model.internal_force(&mut rr, 0, p, &geometry).unwrap();
        }
        assert_abs_diff_eq!(kk, kk.transpose(), epsilon = 1e-10);
        // forces on the x = 1 face are positive (tension)
        for a in [1, 2, 5, 6] {
            assert!(rr[3 * a] > 0.0);
        }
        let sum: f64 = (0..8).map(|a| rr[3 * a]).sum();
        assert_abs_diff_eq!(sum, 0.0, epsilon = 1e-12);
    }
}
