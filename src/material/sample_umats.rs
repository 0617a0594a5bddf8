//! Reference constitutive routines with the UMAT calling convention
//!
//! These routines are written in Rust so that the bridge to external routines can be
//! exercised without a Fortran toolchain. They follow the same conventions as a compiled
//! routine: components ordered as `(11, 22, 33, 12, 13, 23)`, engineering shear strains,
//! and a row-major 6×6 tangent.

#![allow(clippy::too_many_arguments)]

use super::UmatFn;
use crate::base::NTENS;
use crate::StrError;
use std::os::raw::c_int;
use std::slice;

/// Number of properties read by [umat_isotropic_elastic]
pub const N_PROPS_ISOTROPIC_ELASTIC: usize = 2;

/// Number of properties read by [umat_orthotropic_shear]
pub const N_PROPS_ORTHOTROPIC_SHEAR: usize = 5;

/// Returns a reference routine by name
///
/// Names: `isotropic-elastic`, `orthotropic-shear`, and `counter`.
///
/// Returns an error if the routine reads more than `n_props` material properties.
pub fn sample_umat(name: &str, n_props: usize) -> Result<UmatFn, StrError> {
    let (routine, required): (UmatFn, usize) = match name {
        "isotropic-elastic" => (umat_isotropic_elastic, N_PROPS_ISOTROPIC_ELASTIC),
        "orthotropic-shear" => (umat_orthotropic_shear, N_PROPS_ORTHOTROPIC_SHEAR),
        "counter" => (umat_counter, 0),
        _ => return Err("the routine name is invalid"),
    };
    if n_props < required {
        return Err("the routine requires more material properties");
    }
    Ok(routine)
}

/// Returns true if the routine may read `required` properties; otherwise requests a cut back
unsafe fn enough_props(nprops: *const c_int, required: usize, pnewdt: *mut f64) -> bool {
    if usize::try_from(*nprops).map_or(true, |n| n < required) {
        *pnewdt = 0.25;
        return false;
    }
    true
}

/// Computes `stress += ddsdde · dstran` for a row-major tangent
fn update_stress(stress: &mut [f64], ddsdde: &[f64], dstran: &[f64]) {
    for i in 0..NTENS {
        for j in 0..NTENS {
            stress[i] += ddsdde[NTENS * i + j] * dstran[j];
        }
    }
}

/// Fills the tangent of an orthotropic-shear elastic material in the routine ordering
fn elastic_tangent(ddsdde: &mut [f64], c11: f64, c12: f64, shear: [f64; 3]) {
    ddsdde.fill(0.0);
    for i in 0..3 {
        for j in 0..3 {
            ddsdde[NTENS * i + j] = if i == j { c11 } else { c12 };
        }
        ddsdde[NTENS * (i + 3) + (i + 3)] = shear[i];
    }
}

/// Implements an isotropic hypoelastic routine
///
/// ```text
/// props = [E, ν]
/// σ₁ = σ₀ + D : Δε
/// ```
///
/// The state variables are not modified. With fewer than two properties, nothing is computed
/// and a time step reduction is suggested.
pub unsafe extern "C" fn umat_isotropic_elastic(
    stress: *mut f64,
    _statev: *mut f64,
    ddsdde: *mut f64,
    _sse: *mut f64,
    _spd: *mut f64,
    _scd: *mut f64,
    _rpl: *mut f64,
    _ddsdt: *mut f64,
    _drplde: *mut f64,
    _drpldt: *mut f64,
    _stran: *const f64,
    dstran: *const f64,
    _time: *const f64,
    _dtime: *const f64,
    _temp: *const f64,
    _dtemp: *const f64,
    _predef: *const f64,
    _dpred: *const f64,
    _cmname: *const f64,
    _ndi: *const c_int,
    _nshr: *const c_int,
    _ntens: *const c_int,
    _nstatv: *const c_int,
    props: *const f64,
    nprops: *const c_int,
    _coords: *const f64,
    _drot: *const f64,
    pnewdt: *mut f64,
    _celent: *const f64,
    _dfgrd0: *const f64,
    _dfgrd1: *const f64,
    _noel: *const c_int,
    _npt: *const c_int,
    _layer: *const c_int,
    _kspt: *const c_int,
    _kstep: *const c_int,
    _kinc: *const c_int,
) {
    let stress = slice::from_raw_parts_mut(stress, NTENS);
    let ddsdde = slice::from_raw_parts_mut(ddsdde, NTENS * NTENS);
    let dstran = slice::from_raw_parts(dstran, NTENS);
    if !enough_props(nprops, N_PROPS_ISOTROPIC_ELASTIC, pnewdt) {
        return;
    }
    let props = slice::from_raw_parts(props, N_PROPS_ISOTROPIC_ELASTIC);
    let (young, poisson) = (props[0], props[1]);
    let c = young / ((1.0 + poisson) * (1.0 - 2.0 * poisson));
    let g = young / (2.0 * (1.0 + poisson));
    elastic_tangent(ddsdde, c * (1.0 - poisson), c * poisson, [g, g, g]);
    update_stress(stress, ddsdde, dstran);
}

/// Implements an elastic routine with distinct shear moduli
///
/// ```text
/// props = [C11, C12, G12, G13, G23]
/// ```
///
/// The distinct shear moduli reveal the ordering of the shear components. With fewer than five
/// properties, nothing is computed and a time step reduction is suggested.
pub unsafe extern "C" fn umat_orthotropic_shear(
    stress: *mut f64,
    _statev: *mut f64,
    ddsdde: *mut f64,
    _sse: *mut f64,
    _spd: *mut f64,
    _scd: *mut f64,
    _rpl: *mut f64,
    _ddsdt: *mut f64,
    _drplde: *mut f64,
    _drpldt: *mut f64,
    _stran: *const f64,
    dstran: *const f64,
    _time: *const f64,
    _dtime: *const f64,
    _temp: *const f64,
    _dtemp: *const f64,
    _predef: *const f64,
    _dpred: *const f64,
    _cmname: *const f64,
    _ndi: *const c_int,
    _nshr: *const c_int,
    _ntens: *const c_int,
    _nstatv: *const c_int,
    props: *const f64,
    nprops: *const c_int,
    _coords: *const f64,
    _drot: *const f64,
    pnewdt: *mut f64,
    _celent: *const f64,
    _dfgrd0: *const f64,
    _dfgrd1: *const f64,
    _noel: *const c_int,
    _npt: *const c_int,
    _layer: *const c_int,
    _kspt: *const c_int,
    _kstep: *const c_int,
    _kinc: *const c_int,
) {
    let stress = slice::from_raw_parts_mut(stress, NTENS);
    let ddsdde = slice::from_raw_parts_mut(ddsdde, NTENS * NTENS);
    let dstran = slice::from_raw_parts(dstran, NTENS);
    if !enough_props(nprops, N_PROPS_ORTHOTROPIC_SHEAR, pnewdt) {
        return;
    }
    let props = slice::from_raw_parts(props, N_PROPS_ORTHOTROPIC_SHEAR);
    elastic_tangent(ddsdde, props[0], props[1], [props[2], props[3], props[4]]);
    update_stress(stress, ddsdde, dstran);
}

/// Implements a routine that counts its calls and records where it was called
///
/// ```text
/// statev[0] += 1
/// statev[1] = noel   (if nstatv > 1)
/// statev[2] = npt    (if nstatv > 2)
/// ```
///
/// The stress is not modified, the tangent is the identity, and a time step reduction is suggested.
pub unsafe extern "C" fn umat_counter(
    _stress: *mut f64,
    statev: *mut f64,
    ddsdde: *mut f64,
    _sse: *mut f64,
    _spd: *mut f64,
    _scd: *mut f64,
    _rpl: *mut f64,
    _ddsdt: *mut f64,
    _drplde: *mut f64,
    _drpldt: *mut f64,
    _stran: *const f64,
    _dstran: *const f64,
    _time: *const f64,
    _dtime: *const f64,
    _temp: *const f64,
    _dtemp: *const f64,
    _predef: *const f64,
    _dpred: *const f64,
    _cmname: *const f64,
    _ndi: *const c_int,
    _nshr: *const c_int,
    _ntens: *const c_int,
    nstatv: *const c_int,
    _props: *const f64,
    _nprops: *const c_int,
    _coords: *const f64,
    _drot: *const f64,
    pnewdt: *mut f64,
    _celent: *const f64,
    _dfgrd0: *const f64,
    _dfgrd1: *const f64,
    noel: *const c_int,
    npt: *const c_int,
    _layer: *const c_int,
    _kspt: *const c_int,
    _kstep: *const c_int,
    _kinc: *const c_int,
) {
    let n = usize::try_from(*nstatv).unwrap_or(0);
    if n == 0 {
        return;
    }
    let statev = slice::from_raw_parts_mut(statev, n);
    let ddsdde = slice::from_raw_parts_mut(ddsdde, NTENS * NTENS);
    statev[0] += 1.0;
    if n > 1 {
        statev[1] = *noel as f64;
    }
    if n > 2 {
        statev[2] = *npt as f64;
    }
    ddsdde.fill(0.0);
    for i in 0..NTENS {
        ddsdde[NTENS * i + i] = 1.0;
    }
    *pnewdt = 0.5;
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
