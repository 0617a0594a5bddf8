//! Material-point state engine for updated-Lagrangian finite element simulations
//!
//! This crate holds the per-quadrature-point data (stress, state variables, tangent blocks,
//! deformation gradients), the kinematics needed to drive constitutive models incrementally,
//! and a bridge to external constitutive routines following the Abaqus UMAT calling convention.

/// Defines a type alias for the error type as a static string
pub type StrError = &'static str;

pub mod base;
pub mod fem;
pub mod kinematics;
pub mod material;
pub mod prelude;
