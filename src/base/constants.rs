/// Defines the space dimension (always 3D)
pub const NDIM: usize = 3;

/// Defines the number of direct stress components
pub const NDI: usize = 3;

/// Defines the number of shear stress components
pub const NSHR: usize = 3;

/// Defines the number of components of a symmetric tensor in Voigt notation
pub const NTENS: usize = NDI + NSHR;

/// Defines the number of components of a second-order tensor (3×3)
pub const N_TENSOR2: usize = NDIM * NDIM;

/// Defines the number of components of a flattened 6×6 tangent block
pub const N_TANGENT: usize = NTENS * NTENS;

/// Defines the temperature handed to external routines (thermal coupling is not implemented)
pub const REFERENCE_TEMPERATURE: f64 = 300.0;

/// Defines the default tolerance of the polar decomposition
pub const DEFAULT_POLAR_TOLERANCE: f64 = 1e-12;

/// Defines the default maximum number of iterations of the polar decomposition
pub const DEFAULT_POLAR_MAX_ITERATIONS: usize = 500;

/// Defines the suggested time-step ratio handed to external routines
///
/// External routines may overwrite this value; the returned value is not used.
pub const INITIAL_PNEWDT: f64 = 10.0;

/// Defines the directory where the results of the command-line driver are saved
pub const DEFAULT_OUT_DIR: &str = "/tmp/matpoint/results";
