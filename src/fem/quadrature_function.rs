use crate::StrError;
use serde::{Deserialize, Serialize};

/// Holds a fixed-width vector of values at every quadrature point of a mesh
///
/// The values are stored in a flat array with element-major, point-minor ordering:
///
/// ```text
/// data[(e * n_point + p) * vdim + i]
/// ```
///
/// where `e` is the element index, `p` the integration point index within the element,
/// and `i` the component index. The layout never changes after allocation.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct QuadratureFunction {
    /// Number of elements
    n_element: usize,

    /// Number of integration points per element
    n_point: usize,

    /// Number of components per integration point
    vdim: usize,

    /// All values
    data: Vec<f64>,
}

impl QuadratureFunction {
    /// Allocates a new instance with zero values
    pub fn new(n_element: usize, n_point: usize, vdim: usize) -> Self {
        QuadratureFunction {
            n_element,
            n_point,
            vdim,
            data: vec![0.0; n_element * n_point * vdim],
        }
    }

    /// Allocates a new instance with the same values at every integration point
    pub fn new_uniform(n_element: usize, n_point: usize, values: &[f64]) -> Self {
        let mut res = QuadratureFunction::new(n_element, n_point, values.len());
        if !values.is_empty() {
            for chunk in res.data.chunks_exact_mut(values.len()) {
                chunk.copy_from_slice(values);
            }
        }
        res
    }

    /// Returns the number of elements
    pub fn n_element(&self) -> usize {
        self.n_element
    }

    /// Returns the number of integration points per element
    pub fn n_point(&self) -> usize {
        self.n_point
    }

    /// Returns the number of components per integration point
    pub fn vdim(&self) -> usize {
        self.vdim
    }

    /// Returns the position of the first component of a point in the flat array
    #[inline]
    fn offset(&self, e: usize, p: usize) -> usize {
        debug_assert!(e < self.n_element, "element index is out of range");
        debug_assert!(p < self.n_point, "integration point index is out of range");
        (e * self.n_point + p) * self.vdim
    }

    /// Returns the values at an integration point
    ///
    /// # Panics
    ///
    /// A panic will occur if the indices are out of range.
    #[inline]
    pub fn get(&self, e: usize, p: usize) -> &[f64] {
        let start = self.offset(e, p);
        &self.data[start..start + self.vdim]
    }

    /// Returns the (mutable) values at an integration point
    ///
    /// # Panics
    ///
    /// A panic will occur if the indices are out of range.
    #[inline]
    pub fn get_mut(&mut self, e: usize, p: usize) -> &mut [f64] {
        let start = self.offset(e, p);
        &mut self.data[start..start + self.vdim]
    }

    /// Sets the values at an integration point
    ///
    /// # Panics
    ///
    /// A panic will occur if the indices are out of range or `values.len() != vdim`.
    pub fn set(&mut self, e: usize, p: usize, values: &[f64]) {
        self.get_mut(e, p).copy_from_slice(values);
    }

    /// Returns all values of an element (n_point × vdim)
    pub fn element(&self, e: usize) -> &[f64] {
        let start = self.offset(e, 0);
        &self.data[start..start + self.n_point * self.vdim]
    }

    /// Splits the data into disjoint mutable slices, one per element
    ///
    /// Always returns `n_element` slices, even if `vdim = 0`.
    pub fn elements_mut(&mut self) -> Vec<&mut [f64]> {
        let size = self.n_point * self.vdim;
        if size == 0 {
            return (0..self.n_element).map(|_| Default::default()).collect();
        }
        self.data.chunks_exact_mut(size).collect()
    }

    /// Returns the flat array
    pub fn as_slice(&self) -> &[f64] {
        &self.data
    }

    /// Returns the (mutable) flat array
    pub fn as_mut_slice(&mut self) -> &mut [f64] {
        &mut self.data
    }

    /// Copies all values from another function with the same layout
    pub fn mirror(&mut self, other: &QuadratureFunction) -> Result<(), StrError> {
        if self.n_element != other.n_element || self.n_point != other.n_point || self.vdim != other.vdim {
            return Err("quadrature functions must have the same layout");
        }
        self.data.copy_from_slice(&other.data);
        Ok(())
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
