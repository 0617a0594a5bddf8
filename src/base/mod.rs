//! Implements the base structures (configuration, parameters, mesh, input files)

mod config;
mod constants;
mod control;
mod input_files;
mod mesh;
mod parameters;
mod samples;
pub use crate::base::config::*;
pub use crate::base::constants::*;
pub use crate::base::control::*;
pub use crate::base::input_files::*;
pub use crate::base::mesh::*;
pub use crate::base::parameters::*;
pub use crate::base::samples::*;
