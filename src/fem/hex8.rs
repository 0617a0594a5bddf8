/// Natural coordinates of the nodes of the reference hexahedron
const NODE_KSI: [[f64; 3]; 8] = [
    [-1.0, -1.0, -1.0],
    [1.0, -1.0, -1.0],
    [1.0, 1.0, -1.0],
    [-1.0, 1.0, -1.0],
    [-1.0, -1.0, 1.0],
    [1.0, -1.0, 1.0],
    [1.0, 1.0, 1.0],
    [-1.0, 1.0, 1.0],
];

/// Implements the trilinear 8-node hexahedron
///
/// ```text
///       7-----------6
///      /|          /|
///     / |         / |
///    4-----------5  |
///    |  |        |  |
///    |  3--------|--2      ζ
///    | /         | /       |  η
///    |/          |/        | /
///    0-----------1         |/____ ξ
/// ```
pub struct Hex8;

impl Hex8 {
    /// Number of nodes
    pub const N_NODE: usize = 8;

    /// Evaluates the shape functions at natural coordinates `ksi`
    pub fn shape(ksi: &[f64; 3]) -> [f64; 8] {
        let mut nn = [0.0; 8];
        for (a, k) in NODE_KSI.iter().enumerate() {
            nn[a] = (1.0 + ksi[0] * k[0]) * (1.0 + ksi[1] * k[1]) * (1.0 + ksi[2] * k[2]) / 8.0;
        }
        nn
    }

    /// Evaluates the derivatives of the shape functions with respect to the natural coordinates
    ///
    /// Returns `dN_a/dξ_j` stored at `[3*a + j]`.
    pub fn deriv(ksi: &[f64; 3]) -> [f64; 24] {
        let mut dd = [0.0; 24];
        for (a, k) in NODE_KSI.iter().enumerate() {
            let (r, s, t) = (1.0 + ksi[0] * k[0], 1.0 + ksi[1] * k[1], 1.0 + ksi[2] * k[2]);
            dd[3 * a] = k[0] * s * t / 8.0;
            dd[3 * a + 1] = r * k[1] * t / 8.0;
            dd[3 * a + 2] = r * s * k[2] / 8.0;
        }
        dd
    }

    /// Returns the 2×2×2 Gauss integration points `(ksi, weight)`
    pub fn gauss_points() -> Vec<([f64; 3], f64)> {
        let a = 1.0 / f64::sqrt(3.0);
        let mut points = Vec::with_capacity(8);
        for k in [-a, a] {
            for j in [-a, a] {
                for i in [-a, a] {
                    points.push(([i, j, k], 1.0));
                }
            }
        }
        points
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
