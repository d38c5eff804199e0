// src/walk/params.rs
use crate::error::{validation::*, DdmResult};

/// Default discretization step, fine enough that the walk tracks the
/// continuous diffusion closely for barriers of order 1.
pub const DEFAULT_T_EPS: f64 = 1e-4;

/// Parameters of a single random-walk trajectory
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct WalkParams {
    pub b: f64,     // Starting point as a proportion of the distance from 0 to a
    pub a: f64,     // Upper barrier (lower barrier is 0)
    pub v: f64,     // Drift rate
    pub t_eps: f64, // Time step size
    pub max_steps: Option<u64>,
}

impl WalkParams {
    pub fn new(b: f64, a: f64, v: f64) -> Self {
        WalkParams {
            b,
            a,
            v,
            ..Default::default()
        }
    }

    pub fn with_time_step(mut self, t_eps: f64) -> Self {
        self.t_eps = t_eps;
        self
    }

    pub fn with_max_steps(mut self, max_steps: u64) -> Self {
        self.max_steps = Some(max_steps);
        self
    }

    /// Step magnitude: delta = √t_eps
    pub fn step_size(&self) -> f64 {
        self.t_eps.sqrt()
    }

    /// Probability of an upward step: p = ½(1 + v·delta)
    ///
    /// With this choice the mean increment per step is v·t_eps and its
    /// variance approaches t_eps, matching a unit-noise diffusion with drift v.
    pub fn up_probability(&self) -> f64 {
        0.5 * (1.0 + self.v * self.step_size())
    }

    /// Absolute starting position x0 = a·b
    pub fn start_position(&self) -> f64 {
        self.a * self.b
    }

    /// Validate the parameters before any stepping happens
    pub fn validate(&self) -> DdmResult<()> {
        validate_time_step(self.t_eps)?;
        validate_barrier(self.a)?;
        validate_finite("b", self.b)?;
        validate_finite("v", self.v)?;
        validate_probability(self.up_probability(), self.v, self.step_size())?;
        validate_step_resolution(self.a, self.start_position(), self.step_size())?;
        validate_max_steps(self.max_steps)?;
        Ok(())
    }
}

impl Default for WalkParams {
    fn default() -> Self {
        WalkParams {
            b: 0.5,
            a: 1.0,
            v: 0.0,
            t_eps: DEFAULT_T_EPS,
            max_steps: None,
        }
    }
}
