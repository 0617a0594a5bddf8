use super::ParamMaterial;
use crate::StrError;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Reads a flat list of whitespace-separated numbers
///
/// Returns `None` if the file cannot be read or a token is not a number.
fn read_numbers<P>(full_path: &P) -> Option<Vec<f64>>
where
    P: AsRef<Path> + ?Sized,
{
    let contents = fs::read_to_string(full_path).ok()?;
    contents.split_whitespace().map(|t| t.parse::<f64>().ok()).collect()
}

/// Reads the list of time increments used by custom time stepping
pub fn read_time_increments<P>(full_path: &P) -> Result<Vec<f64>, StrError>
where
    P: AsRef<Path> + ?Sized,
{
    let values = read_numbers(full_path).ok_or("cannot read the time increments file")?;
    if values.is_empty() {
        return Err("the time increments file is empty");
    }
    Ok(values)
}

/// Reads a grain map (one or more columns per cell)
pub fn read_grain_map<P>(full_path: &P) -> Result<Vec<f64>, StrError>
where
    P: AsRef<Path> + ?Sized,
{
    read_numbers(full_path).ok_or("cannot read the grain map file")
}

/// Holds the values loaded from the material initialization files
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MaterialData {
    /// Material properties shared by all quadrature points (len = n_props)
    pub props: Vec<f64>,

    /// Initial state variables applied to all quadrature points (len = n_state_vars)
    pub state_vars: Vec<f64>,

    /// Orientation data of all grains (len = stride × n_grains); empty without grains
    pub orientations: Vec<f64>,
}

/// Holds the paths to the material initialization files
///
/// All files contain whitespace-separated numbers.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct MaterialFiles {
    /// Material properties file
    pub props: PathBuf,

    /// Initial state variables file
    pub state_vars: PathBuf,

    /// Grain orientations file (crystal plasticity problems only)
    pub orientations: Option<PathBuf>,
}

impl MaterialFiles {
    /// Loads all files and checks their lengths against the material parameters
    pub fn load(&self, param: &ParamMaterial) -> Result<MaterialData, StrError> {
        param.validate()?;
        let props = read_numbers(&self.props).ok_or("cannot read the material properties file")?;
        if props.len() != param.n_props() {
            return Err("the number of material properties in the file is incorrect");
        }
        let state_vars = read_numbers(&self.state_vars).ok_or("cannot read the state variables file")?;
        if state_vars.len() != param.n_state_vars() {
            return Err("the number of state variables in the file is incorrect");
        }
        let orientations = match (param.orientation, &self.orientations) {
            (Some(ori), Some(path)) => {
                let values = read_numbers(path).ok_or("cannot read the orientations file")?;
                if values.len() != ori.kind.stride() * ori.n_grains {
                    return Err("the number of orientation values must equal stride × number of grains");
                }
                values
            }
            (Some(_), None) => return Err("the orientations file is required with grain data"),
            (None, _) => Vec::new(),
        };
        Ok(MaterialData {
            props,
            state_vars,
            orientations,
        })
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
