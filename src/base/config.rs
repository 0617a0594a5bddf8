use super::{DEFAULT_POLAR_MAX_ITERATIONS, DEFAULT_POLAR_TOLERANCE};
use crate::kinematics::StrainMeasure;
use crate::StrError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Holds the configuration shared by all material-point operations
///
/// An instance of this structure is passed explicitly to the operations that need it.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Config {
    /// Strain measure handed to external routines (total and incremental)
    pub strain_measure: StrainMeasure,

    /// Tolerance of the iterative polar decomposition
    pub polar_tolerance: f64,

    /// Maximum number of iterations of the polar decomposition
    pub polar_max_iterations: usize,

    /// Enables parallel loops over elements (models must also be reentrant)
    pub parallel: bool,
}

impl Config {
    /// Allocates a new instance with default values
    pub fn new() -> Self {
        Config {
            strain_measure: StrainMeasure::Eulerian,
            polar_tolerance: DEFAULT_POLAR_TOLERANCE,
            polar_max_iterations: DEFAULT_POLAR_MAX_ITERATIONS,
            parallel: false,
        }
    }

    /// Sets the strain measure handed to external routines
    pub fn set_strain_measure(&mut self, measure: StrainMeasure) -> Result<&mut Self, StrError> {
        self.strain_measure = measure;
        Ok(self)
    }

    /// Sets the tolerance of the polar decomposition
    pub fn set_polar_tolerance(&mut self, value: f64) -> Result<&mut Self, StrError> {
        if value <= 0.0 {
            return Err("polar decomposition tolerance must be > 0.0");
        }
        self.polar_tolerance = value;
        Ok(self)
    }

    /// Sets the maximum number of iterations of the polar decomposition
    pub fn set_polar_max_iterations(&mut self, value: usize) -> Result<&mut Self, StrError> {
        if value < 1 {
            return Err("polar decomposition max iterations must be ≥ 1");
        }
        self.polar_max_iterations = value;
        Ok(self)
    }

    /// Enables or disables the parallel loops over elements
    pub fn set_parallel(&mut self, flag: bool) -> Result<&mut Self, StrError> {
        self.parallel = flag;
        Ok(self)
    }
}

impl fmt::Display for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Configuration data\n")?;
        write!(f, "==================\n")?;
        write!(f, "strain_measure = {:?}\n", self.strain_measure)?;
        write!(f, "polar_tolerance = {:?}\n", self.polar_tolerance)?;
        write!(f, "polar_max_iterations = {:?}\n", self.polar_max_iterations)?;
        write!(f, "parallel = {:?}\n", self.parallel)?;
        Ok(())
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
