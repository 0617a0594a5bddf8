use crate::StrError;
use serde::{Deserialize, Serialize};

/// Defines how the time increments are chosen
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum TimeStepping {
    /// Constant Δt up to the final time (the last increment may be shorter)
    Fixed {
        /// Time increment
        dt: f64,

        /// Final time
        t_final: f64,
    },

    /// User-defined list of time increments (the final time is their sum)
    Custom(Vec<f64>),
}

/// Holds the time data of a single step
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TimeStep {
    /// Step index (starting at 1)
    pub index: usize,

    /// Time at the end of the step
    pub time: f64,

    /// Time increment of the step
    pub delta_time: f64,

    /// Indicates the last step
    pub last: bool,
}

/// Assists in the time loop control
///
/// The time and time increment must be set once per step, before any evaluation
/// of the material models.
pub struct ControlTime {
    /// Time stepping option
    stepping: TimeStepping,

    /// Final time
    t_final: f64,

    /// Total number of steps
    n_steps: usize,

    /// Current time
    t: f64,

    /// Index of the last computed step
    index: usize,
}

impl ControlTime {
    /// Allocates a new instance
    pub fn new(stepping: TimeStepping) -> Result<Self, StrError> {
        let (t_final, n_steps) = match &stepping {
            TimeStepping::Fixed { dt, t_final } => {
                if *dt <= 0.0 {
                    return Err("Δt must be > 0.0");
                }
                if *t_final <= 0.0 {
                    return Err("the final time must be > 0.0");
                }
                (*t_final, f64::ceil(t_final / dt) as usize)
            }
            TimeStepping::Custom(dts) => {
                if dts.is_empty() {
                    return Err("the list of custom Δt must not be empty");
                }
                if dts.iter().any(|dt| *dt <= 0.0) {
                    return Err("all custom Δt must be > 0.0");
                }
                (dts.iter().sum(), dts.len())
            }
        };
        Ok(ControlTime {
            stepping,
            t_final,
            n_steps,
            t: 0.0,
            index: 0,
        })
    }

    /// Returns the final time
    pub fn t_final(&self) -> f64 {
        self.t_final
    }

    /// Returns the total number of steps
    pub fn n_steps(&self) -> usize {
        self.n_steps
    }

    /// Returns the current time
    pub fn time(&self) -> f64 {
        self.t
    }
}

impl Iterator for ControlTime {
    type Item = TimeStep;

    /// Advances the time and returns the data of the next step
    fn next(&mut self) -> Option<Self::Item> {
        if self.index >= self.n_steps {
            return None;
        }
        let dt = match &self.stepping {
            TimeStepping::Fixed { dt, .. } => f64::min(*dt, self.t_final - self.t),
            TimeStepping::Custom(dts) => dts[self.index],
        };
        self.index += 1;
        self.t += dt;
        let last = f64::abs(self.t - self.t_final) <= f64::abs(1e-3 * dt);
        Some(TimeStep {
            index: self.index,
            time: self.t,
            delta_time: dt,
            last,
        })
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
