use crate::base::{INITIAL_PNEWDT, NDI, NSHR, NTENS, N_TANGENT, N_TENSOR2, REFERENCE_TEMPERATURE};
use crate::StrError;
use std::os::raw::c_int;

/// Defines the signature of an external constitutive routine following the UMAT calling convention
///
/// All arguments are passed by reference, in this exact order:
///
/// ```text
/// stress, statev, ddsdde, sse, spd, scd, rpl, ddsdt, drplde, drpldt,
/// stran, dstran, time, dtime, temp, dtemp, predef, dpred, cmname,
/// ndi, nshr, ntens, nstatv, props, nprops, coords, drot, pnewdt,
/// celent, dfgrd0, dfgrd1, noel, npt, layer, kspt, kstep, kinc
/// ```
///
/// The symmetric tensors use the ordering `(11, 22, 33, 12, 13, 23)` with engineering shear strains.
/// The tangent `ddsdde` is a row-major 6×6 block. The rotation increment `drot` and the deformation
/// gradients `dfgrd0` and `dfgrd1` are column-major 3×3 matrices.
///
/// **Note:** This list must not be modified; routines compiled independently rely on it.
pub type UmatFn = unsafe extern "C" fn(
    stress: *mut f64,
    statev: *mut f64,
    ddsdde: *mut f64,
    sse: *mut f64,
    spd: *mut f64,
    scd: *mut f64,
    rpl: *mut f64,
    ddsdt: *mut f64,
    drplde: *mut f64,
    drpldt: *mut f64,
    stran: *const f64,
    dstran: *const f64,
    time: *const f64,
    dtime: *const f64,
    temp: *const f64,
    dtemp: *const f64,
    predef: *const f64,
    dpred: *const f64,
    cmname: *const f64,
    ndi: *const c_int,
    nshr: *const c_int,
    ntens: *const c_int,
    nstatv: *const c_int,
    props: *const f64,
    nprops: *const c_int,
    coords: *const f64,
    drot: *const f64,
    pnewdt: *mut f64,
    celent: *const f64,
    dfgrd0: *const f64,
    dfgrd1: *const f64,
    noel: *const c_int,
    npt: *const c_int,
    layer: *const c_int,
    kspt: *const c_int,
    kstep: *const c_int,
    kinc: *const c_int,
);

#[cfg(feature = "link-umat")]
extern "C" {
    fn umat_(
        stress: *mut f64,
        statev: *mut f64,
        ddsdde: *mut f64,
        sse: *mut f64,
        spd: *mut f64,
        scd: *mut f64,
        rpl: *mut f64,
        ddsdt: *mut f64,
        drplde: *mut f64,
        drpldt: *mut f64,
        stran: *const f64,
        dstran: *const f64,
        time: *const f64,
        dtime: *const f64,
        temp: *const f64,
        dtemp: *const f64,
        predef: *const f64,
        dpred: *const f64,
        cmname: *const f64,
        ndi: *const c_int,
        nshr: *const c_int,
        ntens: *const c_int,
        nstatv: *const c_int,
        props: *const f64,
        nprops: *const c_int,
        coords: *const f64,
        drot: *const f64,
        pnewdt: *mut f64,
        celent: *const f64,
        dfgrd0: *const f64,
        dfgrd1: *const f64,
        noel: *const c_int,
        npt: *const c_int,
        layer: *const c_int,
        kspt: *const c_int,
        kstep: *const c_int,
        kinc: *const c_int,
    );
}

/// Returns the externally compiled `umat_` routine, if the crate was built with the `link-umat` feature
///
/// The object file or library providing the symbol must be handed to the linker, e.g., with
/// `RUSTFLAGS="-L /path/to/lib -l umat"`.
pub fn linked_umat() -> Option<UmatFn> {
    #[cfg(feature = "link-umat")]
    {
        Some(umat_ as UmatFn)
    }
    #[cfg(not(feature = "link-umat"))]
    {
        None
    }
}

/// Holds the arguments of one call to the external routine
///
/// The state vector is borrowed so that the routine writes directly into the end-of-step buffer.
/// All fields that have no counterpart in a static, isothermal analysis are fixed placeholders.
pub struct UmatArgs<'a> {
    /// Stress in the routine ordering; input at the beginning and updated by the routine
    pub stress: [f64; NTENS],

    /// State variables (including orientation data); updated by the routine
    pub statev: &'a mut [f64],

    /// Row-major tangent in the routine ordering; output
    pub ddsdde: [f64; N_TANGENT],

    /// Specific elastic strain energy
    pub sse: f64,

    /// Plastic dissipation
    pub spd: f64,

    /// Creep dissipation
    pub scd: f64,

    /// Volumetric heat generation (unused)
    pub rpl: f64,

    /// Stress variation w.r.t. temperature (unused)
    pub ddsdt: [f64; NTENS],

    /// Heat generation variation w.r.t. strain (unused)
    pub drplde: [f64; NTENS],

    /// Heat generation variation w.r.t. temperature (unused)
    pub drpldt: f64,

    /// Total strain with engineering shear
    pub stran: [f64; NTENS],

    /// Strain increment with engineering shear
    pub dstran: [f64; NTENS],

    /// Time at the beginning and at the end of the step
    pub time: [f64; 2],

    /// Time increment
    pub dtime: f64,

    /// Temperature
    pub temp: f64,

    /// Temperature increment
    pub dtemp: f64,

    /// Predefined field (unused)
    pub predef: [f64; 1],

    /// Predefined field increment (unused)
    pub dpred: [f64; 1],

    /// Material name placeholder
    pub cmname: f64,

    ndi: c_int,
    nshr: c_int,
    ntens: c_int,
    nstatv: c_int,

    /// Material properties
    pub props: &'a [f64],

    nprops: c_int,

    /// Coordinates of the integration point (unused; zero)
    pub coords: [f64; 3],

    /// Column-major rotation increment
    pub drot: [f64; N_TENSOR2],

    /// Suggested ratio between the next and the current time increment
    pub pnewdt: f64,

    /// Characteristic element length
    pub celent: f64,

    /// Column-major deformation gradient at the beginning of the step
    pub dfgrd0: [f64; N_TENSOR2],

    /// Column-major deformation gradient at the end of the step
    pub dfgrd1: [f64; N_TENSOR2],

    /// Element number
    pub noel: c_int,

    /// Integration point number
    pub npt: c_int,

    layer: c_int,
    kspt: c_int,
    kstep: c_int,
    kinc: c_int,
}

impl<'a> UmatArgs<'a> {
    /// Allocates a new instance with zeroed arrays and the fixed placeholders
    ///
    /// # Input
    ///
    /// * `statev` -- the state vector handed to the routine (its length defines `nstatv`)
    /// * `props` -- the material properties (its length defines `nprops`)
    /// * `element` -- the element index
    /// * `point` -- the integration point index
    pub fn new(statev: &'a mut [f64], props: &'a [f64], element: usize, point: usize) -> Result<Self, StrError> {
        let nstatv = c_int::try_from(statev.len()).map_err(|_| "the number of state variables is too large")?;
        let nprops = c_int::try_from(props.len()).map_err(|_| "the number of material properties is too large")?;
        let noel = c_int::try_from(element).map_err(|_| "the element index is too large")?;
        let npt = c_int::try_from(point).map_err(|_| "the integration point index is too large")?;
        Ok(UmatArgs {
            stress: [0.0; NTENS],
            statev,
            ddsdde: [0.0; N_TANGENT],
            sse: 0.0,
            spd: 0.0,
            scd: 0.0,
            rpl: 0.0,
            ddsdt: [0.0; NTENS],
            drplde: [0.0; NTENS],
            drpldt: 0.0,
            stran: [0.0; NTENS],
            dstran: [0.0; NTENS],
            time: [0.0; 2],
            dtime: 0.0,
            temp: REFERENCE_TEMPERATURE,
            dtemp: 0.0,
            predef: [0.0],
            dpred: [0.0],
            cmname: 0.0,
            ndi: NDI as c_int,
            nshr: NSHR as c_int,
            ntens: NTENS as c_int,
            nstatv,
            props,
            nprops,
            coords: [0.0; 3],
            drot: [1.0, 0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0],
            pnewdt: INITIAL_PNEWDT,
            celent: 0.0,
            dfgrd0: [1.0, 0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0],
            dfgrd1: [1.0, 0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0],
            noel,
            npt,
            layer: 0,
            kspt: 0,
            kstep: 0,
            kinc: 0,
        })
    }

    /// Calls the external routine
    ///
    /// # Safety
    ///
    /// The routine must not read or write beyond the array lengths announced by
    /// `ntens`, `nstatv`, and `nprops`, and must not keep any of the pointers after returning.
    pub unsafe fn call(&mut self, routine: UmatFn) {
        routine(
            self.stress.as_mut_ptr(),
            self.statev.as_mut_ptr(),
            self.ddsdde.as_mut_ptr(),
            &mut self.sse,
            &mut self.spd,
            &mut self.scd,
            &mut self.rpl,
            self.ddsdt.as_mut_ptr(),
            self.drplde.as_mut_ptr(),
            &mut self.drpldt,
            self.stran.as_ptr(),
            self.dstran.as_ptr(),
            self.time.as_ptr(),
            &self.dtime,
            &self.temp,
            &self.dtemp,
            self.predef.as_ptr(),
            self.dpred.as_ptr(),
            &self.cmname,
            &self.ndi,
            &self.nshr,
            &self.ntens,
            &self.nstatv,
            self.props.as_ptr(),
            &self.nprops,
            self.coords.as_ptr(),
            self.drot.as_ptr(),
            &mut self.pnewdt,
            &self.celent,
            self.dfgrd0.as_ptr(),
            self.dfgrd1.as_ptr(),
            &self.noel,
            &self.npt,
            &self.layer,
            &self.kspt,
            &self.kstep,
            &self.kinc,
        );
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
