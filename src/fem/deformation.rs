use super::{gather_element_coords, nodal_gradient, QuadratureState, ShapeGradCache};
use crate::base::{Cell, Mesh, NDIM, N_TENSOR2};
use crate::StrError;
use nalgebra::Matrix3;
use rayon::prelude::*;

/// Recomputes the end-of-step and incremental deformation gradients from the current nodal coordinates
///
/// ```text
/// F₁ = Σ_a x_a ⊗ ∂N_a/∂X
/// F_incr = F₁·F₀⁻¹
/// ```
///
/// This function must be called before evaluating the material model. The beginning-of-step
/// deformation gradients are not modified.
///
/// # Input
///
/// * `state` -- the quadrature state
/// * `cache` -- the shape function gradients w.r.t. the reference configuration
/// * `mesh` -- the mesh (cells must be stored in id order; see [Mesh::check])
/// * `coords` -- current nodal coordinates (node-major)
/// * `parallel` -- run the loop over elements in parallel
pub fn update_deformation_gradients(
    state: &mut QuadratureState,
    cache: &ShapeGradCache,
    mesh: &Mesh,
    coords: &[f64],
    parallel: bool,
) -> Result<(), StrError> {
    if mesh.cells.len() != state.n_element() || cache.n_element() != state.n_element() {
        return Err("the mesh, shape gradients, and quadrature state must have the same number of elements");
    }
    if cache.n_point() != state.n_point() {
        return Err("the shape gradients and quadrature state must have the same number of integration points");
    }
    if coords.len() != NDIM * mesh.points.len() {
        return Err("the coordinates vector must have NDIM × n_point values");
    }
    let n_node = cache.n_node();
    let n_point = state.n_point();
    let def_grad0 = &state.def_grad0;
    let work = |(cell, (ff1, ff_incr)): (&Cell, (&mut [f64], &mut [f64]))| -> Result<(), StrError> {
        let mut x = vec![0.0; NDIM * n_node];
        gather_element_coords(&mut x, cell, coords);
        for p in 0..n_point {
            let f1 = nodal_gradient(&x, cache.get(cell.id, p));
            let f0_inv = Matrix3::from_column_slice(def_grad0.get(cell.id, p))
                .try_inverse()
                .ok_or("the beginning-of-step deformation gradient is singular")?;
            let incr = f1 * f0_inv;
            let range = (p * N_TENSOR2)..((p + 1) * N_TENSOR2);
            ff1[range.clone()].copy_from_slice(f1.as_slice());
            ff_incr[range].copy_from_slice(incr.as_slice());
        }
        Ok(())
    };
    let chunks1 = state.def_grad1.elements_mut();
    let chunks_incr = state.def_grad_incr.elements_mut();
    if parallel {
        mesh.cells
            .par_iter()
            .zip(chunks1.into_par_iter().zip(chunks_incr))
            .try_for_each(work)
    } else {
        mesh.cells.iter().zip(chunks1.into_iter().zip(chunks_incr)).try_for_each(work)
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[cfg(test)]
mod tests {
    use super::update_deformation_gradients;
    use crate::base::{Samples, NDIM};
    use crate::fem::{QuadratureGeometry, QuadratureState, ShapeGradCache, StateVarLayout};
    use approx::assert_abs_diff_eq;
    use nalgebra::{Matrix3, Vector3};

    // applies x = F·X to all points of the mesh
    fn deform(reference: &[f64], ff: &Matrix3<f64>) -> Vec<f64> {
        let mut x = vec![0.0; reference.len()];
        for (xp, pp) in x.chunks_exact_mut(NDIM).zip(reference.chunks_exact(NDIM)) {
            let v = ff * Vector3::new(pp[0], pp[1], pp[2]);
            xp.copy_from_slice(v.as_slice());
        }
        x
    }

    #[test]
    fn uniaxial_stretch_works() {
        let mesh = Samples::two_hex8();
        let geometry = QuadratureGeometry::new_hex8(&mesh).unwrap();
        let cache = ShapeGradCache::new(&mesh, &geometry).unwrap();
        let layout = StateVarLayout::new(&Samples::param_umat_elastic()).unwrap();
        let mut state = QuadratureState::new(2, 8, layout);

        let ff = Matrix3::new(1.01, 0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0);
        let coords = deform(&mesh.coordinates(), &ff);
        for parallel in [false, true] {
            update_deformation_gradients(&mut state, &cache, &mesh, &coords, parallel).unwrap();
            for e in 0..2 {
                for p in 0..8 {
                    assert_abs_diff_eq!(state.def_grad1(e, p), ff, epsilon = 1e-14);
                    // beginning = identity, hence incremental = end
                    assert_eq!(state.def_grad_incr(e, p), state.def_grad1(e, p));
                    assert_eq!(state.def_grad0(e, p), Matrix3::identity());
                }
            }
        }
    }

    #[test]
    fn round_trip_law_holds_over_steps() {
        let mesh = Samples::two_hex8();
        let geometry = QuadratureGeometry::new_hex8(&mesh).unwrap();
        let cache = ShapeGradCache::new(&mesh, &geometry).unwrap();
        let layout = StateVarLayout::new(&Samples::param_umat_elastic()).unwrap();
        let mut state = QuadratureState::new(2, 8, layout);

        let history = [
            Matrix3::new(1.02, 0.01, 0.0, 0.0, 0.99, 0.0, 0.0, 0.02, 1.0),
            Matrix3::new(1.05, 0.03, 0.01, -0.01, 0.97, 0.0, 0.0, 0.04, 1.01),
            Matrix3::new(1.10, 0.05, 0.02, -0.02, 0.95, 0.01, 0.01, 0.06, 0.99),
        ];
        for ff in &history {
            let coords = deform(&mesh.coordinates(), ff);
            update_deformation_gradients(&mut state, &cache, &mesh, &coords, false).unwrap();
            for e in 0..2 {
                for p in 0..8 {
                    let ff1 = state.def_grad1(e, p);
                    assert_abs_diff_eq!(ff1, *ff, epsilon = 1e-14);
                    assert_abs_diff_eq!(state.def_grad_incr(e, p) * state.def_grad0(e, p), ff1, epsilon = 1e-14);
                }
            }
            state.advance();
        }
    }

    #[test]
    fn update_captures_errors() {
        let mesh = Samples::one_hex8();
        let geometry = QuadratureGeometry::new_hex8(&mesh).unwrap();
        let cache = ShapeGradCache::new(&mesh, &geometry).unwrap();
        let layout = StateVarLayout::new(&Samples::param_umat_elastic()).unwrap();
        let coords = mesh.coordinates();

        let mut state = QuadratureState::new(2, 8, layout);
        assert_eq!(
            update_deformation_gradients(&mut state, &cache, &mesh, &coords, false).err(),
            Some("the mesh, shape gradients, and quadrature state must have the same number of elements")
        );

        let mut state = QuadratureState::new(1, 4, layout);
        assert_eq!(
            update_deformation_gradients(&mut state, &cache, &mesh, &coords, false).err(),
            Some("the shape gradients and quadrature state must have the same number of integration points")
        );

        let mut state = QuadratureState::new(1, 8, layout);
        assert_eq!(
            update_deformation_gradients(&mut state, &cache, &mesh, &coords[1..], false).err(),
            Some("the coordinates vector must have NDIM × n_point values")
        );

        state.def_grad0.set(0, 2, &[0.0; 9]);
        assert_eq!(
            update_deformation_gradients(&mut state, &cache, &mesh, &coords, true).err(),
            Some("the beginning-of-step deformation gradient is singular")
        );
    }
}
