use matpoint::base::DEFAULT_OUT_DIR;
use matpoint::material::{linked_umat, sample_umat};
use matpoint::prelude::*;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use structopt::StructOpt;
use tracing_subscriber::EnvFilter;

/// Command line options
#[derive(StructOpt, Debug)]
#[structopt(
    name = "matpoint_path",
    about = "Applies a homogeneous deformation path to a material model and writes the stress history"
)]
struct Options {
    /// JSON file with the material data and the deformation path
    input: PathBuf,

    /// External routine: linked, isotropic-elastic, orthotropic-shear, or counter
    #[structopt(long, default_value = "isotropic-elastic")]
    routine: String,

    /// Output directory
    #[structopt(long, default_value = DEFAULT_OUT_DIR)]
    out_dir: PathBuf,
}

/// Holds the contents of the input file
#[derive(Deserialize)]
struct Input {
    param: ParamMaterial,
    props: Vec<f64>,
    state_vars: Vec<f64>,
    #[serde(default)]
    orientations: Vec<f64>,
    config: Option<Config>,
    path: DeformationPath,
}

fn select_routine(name: &str, n_props: usize) -> Result<UmatFn, StrError> {
    match name {
        "linked" => linked_umat().ok_or("the crate must be compiled with the link-umat feature"),
        _ => sample_umat(name, n_props),
    }
}

fn output_path(input: &Path, out_dir: &Path) -> PathBuf {
    let stem = input.file_stem().and_then(|s| s.to_str()).unwrap_or("path");
    out_dir.join(format!("{}-results.json", stem))
}

fn main() -> Result<(), StrError> {
    // logging
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).with_target(false).init();

    // parse options
    let options = Options::from_args();

    // load data
    let contents = fs::read_to_string(&options.input).map_err(|_| "cannot read the input file")?;
    let input: Input = serde_json::from_str(&contents).map_err(|_| "cannot parse the input file")?;
    let config = input.config.unwrap_or_else(Config::new);
    let data = MaterialData {
        props: input.props,
        state_vars: input.state_vars,
        orientations: input.orientations,
    };

    // single material point
    let mesh = Samples::one_hex8();
    if let Some(ori) = input.param.orientation {
        if ori.n_grains > 1 {
            tracing::warn!(n_grains = ori.n_grains, "only the first grain is used");
        }
    }
    let routine = match input.param.model {
        ParamModel::Umat { n_props, .. } => Some(select_routine(&options.routine, n_props)?),
        ParamModel::LinearElastic { .. } => None,
    };
    let mut model = MaterialModel::new(&input.param, &data, &mesh, 1, routine)?;
    tracing::info!(routine = %options.routine, n_steps = input.path.def_grads.len(), "running deformation path");

    // run
    let results = input.path.run(&mut model, &config)?;

    // write results
    fs::create_dir_all(&options.out_dir).map_err(|_| "cannot create the output directory")?;
    let path = output_path(&options.input, &options.out_dir);
    let json = serde_json::to_string_pretty(&results).map_err(|_| "cannot serialize the results")?;
    fs::write(&path, json).map_err(|_| "cannot write the results file")?;

    // message
    let path_str = path.display().to_string();
    let thin_line = format!("{:─^1$}", "", path_str.len());
    println!("\n\n{}", thin_line);
    println!("Results written to:");
    println!("{}", path_str);
    println!("{}\n\n", thin_line);
    Ok(())
}
