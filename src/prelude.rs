//! Makes available common structures needed to evaluate material models
//!
//! You may write `use matpoint::prelude::*` in your code and obtain
//! access to commonly used functionality.

pub use crate::base::{Config, ControlTime, MaterialData, MaterialFiles, Mesh, Samples, TimeStepping};
pub use crate::base::{GrainPlacement, OrientationKind, ParamMaterial, ParamModel, ParamOrientation};
pub use crate::fem::{NodalCoords, QuadratureGeometry, QuadratureState, ShapeGradCache, StateVarLayout};
pub use crate::kinematics::StrainMeasure;
pub use crate::material::{DeformationPath, MaterialModel, MaterialModelTrait, PathResults, UmatFn};
pub use crate::StrError;
