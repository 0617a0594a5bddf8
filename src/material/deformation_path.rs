use super::MaterialModel;
use crate::base::{Config, ControlTime, TimeStepping, NTENS};
use crate::fem::calc_von_mises;
use crate::StrError;
use nalgebra::Matrix3;
use serde::{Deserialize, Serialize};

fn default_det_jacobian() -> f64 {
    1.0
}

/// Holds a history of homogeneous deformation gradients applied to all integration points
///
/// The path starts from the undeformed configuration (`F = I`). Each deformation gradient
/// corresponds to the end of one time step.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct DeformationPath {
    /// Deformation gradients at the end of each step (`def_grads[k][i][j] = F_ij`)
    pub def_grads: Vec<[[f64; 3]; 3]>,

    /// Time stepping (must yield one step per deformation gradient)
    pub stepping: TimeStepping,

    /// Determinant of the Jacobian used to compute the characteristic length
    #[serde(default = "default_det_jacobian")]
    pub det_jacobian: f64,
}

/// Holds the results along a deformation path (recorded at the first integration point)
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct PathResults {
    /// Time at the end of each step
    pub times: Vec<f64>,

    /// Stress (Voigt order) at the end of each step
    pub stresses: Vec<[f64; NTENS]>,

    /// von Mises stress at the end of each step
    pub von_mises: Vec<f64>,

    /// State vector at the end of each step
    pub state_vars: Vec<Vec<f64>>,
}

impl DeformationPath {
    /// Allocates a new instance
    pub fn new(def_grads: Vec<[[f64; 3]; 3]>, stepping: TimeStepping) -> Result<Self, StrError> {
        let control = ControlTime::new(stepping.clone())?;
        if control.n_steps() != def_grads.len() {
            return Err("the number of deformation gradients must equal the number of time steps");
        }
        Ok(DeformationPath {
            def_grads,
            stepping,
            det_jacobian: default_det_jacobian(),
        })
    }

    /// Generates a path linearly interpolated between the identity and a final deformation gradient
    ///
    /// ```text
    /// F_k = I + (k/n) (F_final - I)
    /// ```
    ///
    /// # Input
    ///
    /// * `ff_final` -- the final deformation gradient (`ff_final[i][j] = F_ij`)
    /// * `n_increments` -- number of increments
    /// * `dt` -- time increment
    pub fn new_linear(ff_final: &[[f64; 3]; 3], n_increments: usize, dt: f64) -> Result<Self, StrError> {
        if n_increments < 1 {
            return Err("the number of increments must be ≥ 1");
        }
        let mut def_grads = Vec::with_capacity(n_increments);
        for k in 1..(n_increments + 1) {
            let s = (k as f64) / (n_increments as f64);
            let mut ff = [[0.0; 3]; 3];
            for i in 0..3 {
                for j in 0..3 {
                    let delta = if i == j { 1.0 } else { 0.0 };
                    ff[i][j] = delta + s * (ff_final[i][j] - delta);
                }
            }
            def_grads.push(ff);
        }
        DeformationPath::new(def_grads, TimeStepping::Custom(vec![dt; n_increments]))
    }

    /// Generates a uniaxial stretch path along x
    pub fn new_uniaxial(stretch: f64, n_increments: usize, dt: f64) -> Result<Self, StrError> {
        let ff = [[stretch, 0.0, 0.0], [0.0, 1.0, 0.0], [0.0, 0.0, 1.0]];
        DeformationPath::new_linear(&ff, n_increments, dt)
    }

    /// Generates a simple shear path (`F = I + γ e₁⊗e₂`)
    pub fn new_simple_shear(gamma: f64, n_increments: usize, dt: f64) -> Result<Self, StrError> {
        let ff = [[1.0, gamma, 0.0], [0.0, 1.0, 0.0], [0.0, 0.0, 1.0]];
        DeformationPath::new_linear(&ff, n_increments, dt)
    }

    /// Applies the path to all integration points of a material model
    ///
    /// At each step the end-of-step deformation gradients are set, the model is evaluated at
    /// all points, and the state is advanced.
    pub fn run(&self, model: &mut MaterialModel, config: &Config) -> Result<PathResults, StrError> {
        if self.def_grads.is_empty() {
            return Err("the deformation path is empty");
        }
        let control = ControlTime::new(self.stepping.clone())?;
        if control.n_steps() != self.def_grads.len() {
            return Err("the number of deformation gradients must equal the number of time steps");
        }
        let (n_element, n_point) = (model.state.n_element(), model.state.n_point());
        if n_element < 1 || n_point < 1 {
            return Err("the material model must have at least one integration point");
        }
        let mut results = PathResults::default();
        for (step, ff) in control.zip(&self.def_grads) {
            let ff1 = Matrix3::from_fn(|i, j| ff[i][j]);
            model.set_time(step.time);
            model.set_delta_time(step.delta_time);
            for e in 0..n_element {
                for p in 0..n_point {
                    model.state.set_def_grad1(e, p, &ff1)?;
                    model.evaluate_point(config, e, p, self.det_jacobian)?;
                }
            }
            model.advance_state();
            let mut sig = [0.0; NTENS];
            sig.copy_from_slice(model.state.stress0.get(0, 0));
            let von_mises = calc_von_mises(&sig);
            tracing::info!(step = step.index, time = step.time, von_mises, "step converged");
            results.times.push(step.time);
            results.stresses.push(sig);
            results.von_mises.push(von_mises);
            results.state_vars.push(model.state.state_vars0.get(0, 0).to_vec());
        }
        Ok(results)
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
