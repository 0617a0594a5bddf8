use crate::StrError;
use serde::{Deserialize, Serialize};

/// Holds parameters for the constitutive model evaluated at each quadrature point
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub enum ParamModel {
    /// External constitutive routine following the UMAT calling convention
    Umat {
        /// Number of material properties handed to the routine
        n_props: usize,

        /// Number of history (state) variables, excluding orientation data
        n_state_vars: usize,

        /// Indicates that the routine is reentrant and may be called concurrently
        ///
        /// **Note:** Most legacy routines keep no global state, but this cannot be verified
        /// from the outside. Thus, the default is to call them sequentially.
        reentrant: bool,
    },

    /// Native linear elastic (hypoelastic) model
    LinearElastic {
        /// Young's modulus
        young: f64,

        /// Poisson's coefficient
        poisson: f64,
    },
}

/// Defines how the grain orientations are represented
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub enum OrientationKind {
    /// Euler angles (three values per grain)
    Euler,

    /// Unit quaternion `[q0, q1, q2, q3]` with the scalar part first (four values per grain)
    Quaternion,

    /// User-defined data with the given number of values per grain
    Custom {
        /// Number of values per grain
        stride: usize,
    },
}

impl OrientationKind {
    /// Returns the number of values per grain
    pub fn stride(&self) -> usize {
        match self {
            OrientationKind::Euler => 3,
            OrientationKind::Quaternion => 4,
            OrientationKind::Custom { stride } => *stride,
        }
    }
}

/// Defines where the grain data is placed within the state vector
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub enum GrainPlacement {
    /// Grain data comes first, followed by the state variables
    Start,

    /// Grain data comes after the state variables
    End,

    /// Grain data starts at the given position within the state vector
    At(usize),
}

/// Holds parameters for the crystal orientations (grains)
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ParamOrientation {
    /// Representation of the orientation data
    pub kind: OrientationKind,

    /// Number of grains in the orientation file
    pub n_grains: usize,

    /// Position of the grain data within the state vector
    pub placement: GrainPlacement,
}

/// Holds all parameters of a material
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ParamMaterial {
    /// Constitutive model
    pub model: ParamModel,

    /// Crystal orientations (crystal plasticity problems only)
    pub orientation: Option<ParamOrientation>,
}

impl ParamMaterial {
    /// Checks the consistency of the material arguments
    ///
    /// This function must be called before allocating any quadrature data.
    pub fn validate(&self) -> Result<(), StrError> {
        match self.model {
            ParamModel::Umat {
                n_props, n_state_vars, ..
            } => {
                if n_props < 1 {
                    return Err("the external routine requires at least one material property");
                }
                if n_state_vars < 1 {
                    return Err("the external routine requires at least one state variable");
                }
            }
            ParamModel::LinearElastic { young, poisson } => {
                if young <= 0.0 {
                    return Err("Young's modulus must be > 0.0");
                }
                if poisson <= -1.0 || poisson >= 0.5 {
                    return Err("Poisson's coefficient must be in (-1.0, 0.5)");
                }
            }
        }
        if let Some(ori) = self.orientation {
            if ori.n_grains < 1 {
                return Err("the number of grains must be ≥ 1");
            }
            if ori.kind.stride() < 1 {
                return Err("the grain stride must be specified (> 0) for custom orientations");
            }
            if let GrainPlacement::At(offset) = ori.placement {
                if offset > self.n_state_vars() {
                    return Err("the grain data offset must not exceed the number of state variables");
                }
            }
        }
        Ok(())
    }

    /// Returns the number of history (state) variables, excluding orientation data
    pub fn n_state_vars(&self) -> usize {
        match self.model {
            ParamModel::Umat { n_state_vars, .. } => n_state_vars,
            ParamModel::LinearElastic { .. } => 0,
        }
    }

    /// Returns the number of material properties read from file (zero for native models)
    pub fn n_props(&self) -> usize {
        match self.model {
            ParamModel::Umat { n_props, .. } => n_props,
            ParamModel::LinearElastic { .. } => 0,
        }
    }

    /// Returns the number of orientation values per quadrature point
    pub fn orientation_stride(&self) -> usize {
        match self.orientation {
            Some(ori) => ori.kind.stride(),
            None => 0,
        }
    }

    /// Returns the total width of the state vector (state variables plus orientation data)
    pub fn state_width(&self) -> usize {
        self.n_state_vars() + self.orientation_stride()
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
