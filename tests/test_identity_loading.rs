use approx::assert_abs_diff_eq;
use matpoint::material::{umat_isotropic_elastic, umat_orthotropic_shear};
use matpoint::prelude::*;
use nalgebra::Matrix3;

#[test]
fn test_identity_loading_keeps_the_state() -> Result<(), StrError> {
    let mesh = Samples::two_hex8();
    let geometry = QuadratureGeometry::new_hex8(&mesh)?;
    let param = ParamMaterial {
        model: ParamModel::Umat {
            n_props: 5,
            n_state_vars: 2,
            reentrant: true,
        },
        orientation: None,
    };
    let data = MaterialData {
        props: vec![100.0, 10.0, 1.0, 2.0, 3.0],
        state_vars: vec![0.25, -4.0],
        orientations: Vec::new(),
    };
    let mut model = MaterialModel::new(&param, &data, &mesh, 8, Some(umat_orthotropic_shear))?;
    let mut config = Config::new();
    config.set_parallel(true)?;

    // pre-stressed state with a previous (converged) deformation
    let ff = Matrix3::new(1.02, 0.01, 0.0, 0.0, 0.99, 0.0, 0.0, 0.0, 1.0);
    let stress = [10.0, -20.0, 30.0, 1.0, 2.0, 3.0];
    for e in 0..2 {
        for p in 0..8 {
            model.state.stress1.set(e, p, &stress);
            model.state.def_grad1.set(e, p, ff.as_slice());
        }
    }
    model.advance_state();

    // zero strain increment: F₁ = F₀ ⇒ F_incr = I
    for step in 1..4 {
        model.set_time(step as f64);
        model.set_delta_time(1.0);
        for e in 0..2 {
            for p in 0..8 {
                model.state.def_grad_incr.set(e, p, Matrix3::<f64>::identity().as_slice());
            }
        }
        model.evaluate(&config, &geometry)?;
        for e in 0..2 {
            for p in 0..8 {
                assert_eq!(model.state.stress1.get(e, p), &stress);
                assert_eq!(model.state.state_vars1.get(e, p), &[0.25, -4.0]);
            }
        }
        model.advance_state();
    }
    Ok(())
}

#[test]
fn test_rest_configuration_produces_no_stress() -> Result<(), StrError> {
    let mesh = Samples::two_hex8();
    let geometry = QuadratureGeometry::new_hex8(&mesh)?;
    let cache = ShapeGradCache::new(&mesh, &geometry)?;
    let coords = NodalCoords::new(&mesh);
    let data = MaterialData {
        props: Samples::props_umat_elastic(),
        state_vars: vec![0.0],
        orientations: Vec::new(),
    };
    let mut model = MaterialModel::new(
        &Samples::param_umat_elastic(),
        &data,
        &mesh,
        8,
        Some(umat_isotropic_elastic),
    )?;
    for measure in [
        StrainMeasure::Eulerian,
        StrainMeasure::Lagrangian,
        StrainMeasure::Biot,
        StrainMeasure::Logarithmic,
    ] {
        let mut config = Config::new();
        config.set_strain_measure(measure)?;
        model.compute_incremental_kinematics(&config, &cache, &mesh, &coords.current)?;
        model.evaluate(&config, &geometry)?;
        for e in 0..2 {
            for p in 0..8 {
                assert_abs_diff_eq!(model.state.def_grad_incr(e, p), Matrix3::identity(), epsilon = 1e-14);
                for v in model.state.stress1.get(e, p) {
                    assert_abs_diff_eq!(*v, 0.0, epsilon = 1e-10);
                }
            }
        }
    }
    Ok(())
}
