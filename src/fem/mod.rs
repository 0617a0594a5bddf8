//! Implements the finite element data at integration points (geometry, kinematics, state)

mod assembly;
mod deformation;
mod geometry;
mod hex8;
mod nodal_coords;
mod quadrature_function;
mod quadrature_state;
pub use crate::fem::assembly::*;
pub use crate::fem::deformation::*;
pub use crate::fem::geometry::*;
pub use crate::fem::hex8::*;
pub use crate::fem::nodal_coords::*;
pub use crate::fem::quadrature_function::*;
pub use crate::fem::quadrature_state::*;
