use super::QuadratureFunction;
use crate::base::{GrainPlacement, MaterialData, Mesh, ParamMaterial, NTENS, N_TANGENT, N_TENSOR2};
use crate::StrError;
use nalgebra::Matrix3;
use serde::{Deserialize, Serialize};
use std::ops::Range;

/// Defines the (column-major) identity tensor
const IDENTITY: [f64; N_TENSOR2] = [1.0, 0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0];

/// Describes the layout of the material state vector at each integration point
///
/// The state vector is the concatenation of the history (state) variables and the
/// (constant) orientation data of the grain, placed at the start, at the end,
/// or at an arbitrary position.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct StateVarLayout {
    /// Number of history variables
    pub n_state_vars: usize,

    /// Number of orientation values
    pub orientation_stride: usize,

    /// Position of the first orientation value
    pub orientation_start: usize,
}

impl StateVarLayout {
    /// Allocates a new instance
    pub fn new(param: &ParamMaterial) -> Result<Self, StrError> {
        param.validate()?;
        let n_state_vars = param.n_state_vars();
        let orientation_start = match param.orientation {
            Some(ori) => match ori.placement {
                GrainPlacement::Start => 0,
                GrainPlacement::End => n_state_vars,
                GrainPlacement::At(offset) => offset,
            },
            None => n_state_vars,
        };
        Ok(StateVarLayout {
            n_state_vars,
            orientation_stride: param.orientation_stride(),
            orientation_start,
        })
    }

    /// Returns the total width of the state vector
    pub fn width(&self) -> usize {
        self.n_state_vars + self.orientation_stride
    }

    /// Returns the range of the orientation data within the state vector
    pub fn orientation_range(&self) -> Range<usize> {
        self.orientation_start..(self.orientation_start + self.orientation_stride)
    }

    /// Returns the position of the i-th history variable within the state vector
    pub fn state_var_index(&self, i: usize) -> usize {
        if i < self.orientation_start {
            i
        } else {
            i + self.orientation_stride
        }
    }
}

/// Holds the material state at all integration points
///
/// The "beginning-of-step" buffers (suffix 0) hold the last converged state and are only
/// modified by [QuadratureState::advance]. The "end-of-step" buffers (suffix 1) are
/// recomputed at every iteration.
///
/// Components:
///
/// * stress -- Voigt order `(11, 22, 33, 23, 13, 12)`
/// * tangent -- row-major 6×6 block in the same Voigt order (engineering shear)
/// * deformation gradients -- 3×3 column-major
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct QuadratureState {
    /// Layout of the state vector
    pub layout: StateVarLayout,

    /// Beginning-of-step stress
    pub stress0: QuadratureFunction,

    /// End-of-step stress
    pub stress1: QuadratureFunction,

    /// Beginning-of-step state vector
    pub state_vars0: QuadratureFunction,

    /// End-of-step state vector
    pub state_vars1: QuadratureFunction,

    /// Material tangent
    pub tangent: QuadratureFunction,

    /// Beginning-of-step deformation gradient
    pub def_grad0: QuadratureFunction,

    /// End-of-step deformation gradient
    pub def_grad1: QuadratureFunction,

    /// Incremental deformation gradient `F_incr = F₁·F₀⁻¹`
    pub def_grad_incr: QuadratureFunction,

    /// von Mises equivalent stress of the beginning-of-step stress
    pub von_mises: QuadratureFunction,
}

impl QuadratureState {
    /// Allocates a new instance
    ///
    /// All deformation gradients are set to the identity; stresses and state vectors are zero.
    pub fn new(n_element: usize, n_point: usize, layout: StateVarLayout) -> Self {
        let width = layout.width();
        QuadratureState {
            layout,
            stress0: QuadratureFunction::new(n_element, n_point, NTENS),
            stress1: QuadratureFunction::new(n_element, n_point, NTENS),
            state_vars0: QuadratureFunction::new(n_element, n_point, width),
            state_vars1: QuadratureFunction::new(n_element, n_point, width),
            tangent: QuadratureFunction::new(n_element, n_point, N_TANGENT),
            def_grad0: QuadratureFunction::new_uniform(n_element, n_point, &IDENTITY),
            def_grad1: QuadratureFunction::new_uniform(n_element, n_point, &IDENTITY),
            def_grad_incr: QuadratureFunction::new_uniform(n_element, n_point, &IDENTITY),
            von_mises: QuadratureFunction::new(n_element, n_point, 1),
        }
    }

    /// Returns the number of elements
    pub fn n_element(&self) -> usize {
        self.stress0.n_element()
    }

    /// Returns the number of integration points per element
    pub fn n_point(&self) -> usize {
        self.stress0.n_point()
    }

    /// Sets the initial state vectors (history variables and grain orientations)
    ///
    /// The same initial history variables are applied to all integration points. The grain
    /// data of each element is selected by the (1-based) grain id stored in the cell attribute.
    pub fn initialize_state_vars(&mut self, mesh: &Mesh, data: &MaterialData) -> Result<(), StrError> {
        mesh.check()?;
        let layout = self.layout;
        if mesh.cells.len() != self.n_element() {
            return Err("the number of cells must equal the number of elements of the quadrature state");
        }
        if data.state_vars.len() != layout.n_state_vars {
            return Err("the initial state variables do not match the state vector width");
        }
        let stride = layout.orientation_stride;
        if stride > 0 && (data.orientations.len() < stride || data.orientations.len() % stride != 0) {
            return Err("the orientation data does not match the grain stride");
        }
        let n_grains = if stride > 0 { data.orientations.len() / stride } else { 0 };
        let mut values = vec![0.0; layout.width()];
        for i in 0..layout.n_state_vars {
            values[layout.state_var_index(i)] = data.state_vars[i];
        }
        for cell in &mesh.cells {
            if stride > 0 {
                if cell.attribute < 1 || cell.attribute > n_grains {
                    return Err("the grain id of a cell is out of range");
                }
                let start = stride * (cell.attribute - 1);
                values[layout.orientation_range()].copy_from_slice(&data.orientations[start..start + stride]);
            }
            for p in 0..self.n_point() {
                self.state_vars0.set(cell.id, p, &values);
                self.state_vars1.set(cell.id, p, &values);
            }
        }
        Ok(())
    }

    /// Returns the orientation data at an integration point
    pub fn orientation(&self, e: usize, p: usize) -> &[f64] {
        &self.state_vars0.get(e, p)[self.layout.orientation_range()]
    }

    /// Returns the beginning-of-step deformation gradient
    pub fn def_grad0(&self, e: usize, p: usize) -> Matrix3<f64> {
        Matrix3::from_column_slice(self.def_grad0.get(e, p))
    }

    /// Returns the end-of-step deformation gradient
    pub fn def_grad1(&self, e: usize, p: usize) -> Matrix3<f64> {
        Matrix3::from_column_slice(self.def_grad1.get(e, p))
    }

    /// Returns the incremental deformation gradient
    pub fn def_grad_incr(&self, e: usize, p: usize) -> Matrix3<f64> {
        Matrix3::from_column_slice(self.def_grad_incr.get(e, p))
    }

    /// Sets the end-of-step deformation gradient and recomputes the incremental one
    ///
    /// ```text
    /// F_incr = F₁·F₀⁻¹
    /// ```
    pub fn set_def_grad1(&mut self, e: usize, p: usize, ff1: &Matrix3<f64>) -> Result<(), StrError> {
        let ff0_inv = self
            .def_grad0(e, p)
            .try_inverse()
            .ok_or("the beginning-of-step deformation gradient is singular")?;
        let ff_incr = ff1 * ff0_inv;
        self.def_grad1.set(e, p, ff1.as_slice());
        self.def_grad_incr.set(e, p, ff_incr.as_slice());
        Ok(())
    }

    /// Copies the end-of-step stress, state vectors and deformation gradients into the beginning-of-step buffers
    ///
    /// This function must be called once per converged time step. The incremental deformation
    /// gradient is reset to the identity and the von Mises stress is updated.
    pub fn advance(&mut self) {
        self.stress0.as_mut_slice().copy_from_slice(self.stress1.as_slice());
        self.state_vars0.as_mut_slice().copy_from_slice(self.state_vars1.as_slice());
        self.def_grad0.as_mut_slice().copy_from_slice(self.def_grad1.as_slice());
        for chunk in self.def_grad_incr.as_mut_slice().chunks_exact_mut(N_TENSOR2) {
            chunk.copy_from_slice(&IDENTITY);
        }
        self.update_von_mises();
    }

    /// Computes the von Mises stress of the beginning-of-step stress at all integration points
    pub fn update_von_mises(&mut self) {
        let stress = self.stress0.as_slice().chunks_exact(NTENS);
        for (vm, sig) in self.von_mises.as_mut_slice().iter_mut().zip(stress) {
            *vm = calc_von_mises(sig);
        }
    }
}

/// Calculates the von Mises equivalent stress from the Voigt components `(11, 22, 33, 23, 13, 12)`
///
/// ```text
/// σvm = √(½[(σ₁₁-σ₂₂)² + (σ₂₂-σ₃₃)² + (σ₃₃-σ₁₁)² + 6(σ₂₃² + σ₁₃² + σ₁₂²)])
/// ```
pub fn calc_von_mises(sig: &[f64]) -> f64 {
    let (s11, s22, s33, s23, s13, s12) = (sig[0], sig[1], sig[2], sig[3], sig[4], sig[5]);
    let a = (s11 - s22) * (s11 - s22) + (s22 - s33) * (s22 - s33) + (s33 - s11) * (s33 - s11);
    let b = 6.0 * (s23 * s23 + s13 * s13 + s12 * s12);
    f64::sqrt(0.5 * (a + b))
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
