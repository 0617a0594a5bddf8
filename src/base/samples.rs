use super::{Cell, GrainPlacement, Mesh, OrientationKind, ParamMaterial, ParamModel, ParamOrientation, Point};

/// Holds some sample material parameters and meshes
pub struct Samples;

impl Samples {
    /// Returns sample parameters for an isotropic elastic external routine
    ///
    /// Properties: `[young, poisson]`; one (unused) state variable.
    pub fn param_umat_elastic() -> ParamMaterial {
        ParamMaterial {
            model: ParamModel::Umat {
                n_props: 2,
                n_state_vars: 1,
                reentrant: true,
            },
            orientation: None,
        }
    }

    /// Returns sample properties `[young, poisson]` for the elastic external routine
    pub fn props_umat_elastic() -> Vec<f64> {
        vec![1000.0, 0.25]
    }

    /// Returns sample parameters for an external routine with three state variables and
    /// quaternion grain data (two grains)
    pub fn param_umat_crystal(placement: GrainPlacement) -> ParamMaterial {
        ParamMaterial {
            model: ParamModel::Umat {
                n_props: 2,
                n_state_vars: 3,
                reentrant: false,
            },
            orientation: Some(ParamOrientation {
                kind: OrientationKind::Quaternion,
                n_grains: 2,
                placement,
            }),
        }
    }

    /// Returns sample parameters for the native linear elastic model
    pub fn param_linear_elastic() -> ParamMaterial {
        ParamMaterial {
            model: ParamModel::LinearElastic {
                young: 1000.0,
                poisson: 0.25,
            },
            orientation: None,
        }
    }

    /// Returns a mesh with a single unit-cube hexahedron (grain 1)
    ///
    /// ```text
    ///       7-----------6
    ///      /|          /|
    ///     / |         / |
    ///    4-----------5  |
    ///    |  |        |  |
    ///    |  3--------|--2
    ///    | /         | /
    ///    |/          |/
    ///    0-----------1
    /// ```
    pub fn one_hex8() -> Mesh {
        Mesh {
            points: vec![
                Point { id: 0, coords: [0.0, 0.0, 0.0] },
                Point { id: 1, coords: [1.0, 0.0, 0.0] },
                Point { id: 2, coords: [1.0, 1.0, 0.0] },
                Point { id: 3, coords: [0.0, 1.0, 0.0] },
                Point { id: 4, coords: [0.0, 0.0, 1.0] },
                Point { id: 5, coords: [1.0, 0.0, 1.0] },
                Point { id: 6, coords: [1.0, 1.0, 1.0] },
                Point { id: 7, coords: [0.0, 1.0, 1.0] },
            ],
            cells: vec![Cell {
                id: 0,
                attribute: 1,
                points: vec![0, 1, 2, 3, 4, 5, 6, 7],
            }],
        }
    }

    /// Returns a mesh with two unit-cube hexahedra along x (grains 1 and 2)
    ///
    /// ```text
    ///       7-----------6-----------11
    ///      /|          /|          /|
    ///     / |         / |         / |
    ///    4-----------5-----------10 |
    ///    |  |        |  |        |  |
    ///    |  3--------|--2--------|--9
    ///    | /         | /         | /
    ///    |/          |/          |/
    ///    0-----------1-----------8
    /// ```
    pub fn two_hex8() -> Mesh {
        Mesh {
            points: vec![
                Point { id: 0, coords: [0.0, 0.0, 0.0] },
                Point { id: 1, coords: [1.0, 0.0, 0.0] },
                Point { id: 2, coords: [1.0, 1.0, 0.0] },
                Point { id: 3, coords: [0.0, 1.0, 0.0] },
                Point { id: 4, coords: [0.0, 0.0, 1.0] },
                Point { id: 5, coords: [1.0, 0.0, 1.0] },
                Point { id: 6, coords: [1.0, 1.0, 1.0] },
                Point { id: 7, coords: [0.0, 1.0, 1.0] },
                Point { id: 8, coords: [2.0, 0.0, 0.0] },
                Point { id: 9, coords: [2.0, 1.0, 0.0] },
                Point { id: 10, coords: [2.0, 0.0, 1.0] },
                Point { id: 11, coords: [2.0, 1.0, 1.0] },
            ],
            cells: vec![
                Cell {
                    id: 0,
                    attribute: 1,
                    points: vec![0, 1, 2, 3, 4, 5, 6, 7],
                },
                Cell {
                    id: 1,
                    attribute: 2,
                    points: vec![1, 8, 9, 2, 5, 10, 11, 6],
                },
            ],
        }
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
