//! Implements the constitutive models evaluated at integration points

mod deformation_path;
mod linear_elastic;
mod material_model;
mod sample_umats;
mod umat_ffi;
mod umat_model;
mod voigt;
pub use crate::material::deformation_path::*;
pub use crate::material::linear_elastic::*;
pub use crate::material::material_model::*;
pub use crate::material::sample_umats::*;
pub use crate::material::umat_ffi::*;
pub use crate::material::umat_model::*;
pub use crate::material::voigt::*;
