//! Implements kinematics functions on 3×3 tensors (strain measures, polar decomposition, rotations)

mod polar;
mod rotation;
mod strain;
pub use crate::kinematics::polar::*;
pub use crate::kinematics::rotation::*;
pub use crate::kinematics::strain::*;
