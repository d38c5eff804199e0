// src/error.rs
use std::fmt;

/// Error types for the ddm-walk library
#[derive(Debug, Clone, PartialEq)]
pub enum DdmError {
    /// Time step is zero, negative or not finite
    InvalidTimeStep { t_eps: f64 },

    /// Upper barrier is zero, negative or NaN
    InvalidBarrier { a: f64 },

    /// Up-step probability p = 0.5 * (1 + v * delta) falls outside [0, 1]
    InvalidProbability { p: f64, v: f64, delta: f64 },

    /// Parameter combination for which the walk need not terminate
    NonTerminatingConfiguration { reason: String },

    /// Invalid parameter values
    InvalidParameters {
        parameter: String,
        value: f64,
        constraint: String,
    },

    /// Invalid configuration
    InvalidConfiguration { field: String, reason: String },

    /// Walk still inside the barrier interval after the configured step cap
    StepLimitExceeded { steps: u64, position: f64 },

    /// RNG or random number generation error
    RandomGenerationError { reason: String },
}

impl fmt::Display for DdmError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DdmError::InvalidTimeStep { t_eps } => {
                write!(f, "Invalid time step t_eps = {}: must be finite and > 0", t_eps)
            }
            DdmError::InvalidBarrier { a } => {
                write!(f, "Invalid upper barrier a = {}: must be > 0", a)
            }
            DdmError::InvalidProbability { p, v, delta } => {
                write!(
                    f,
                    "Up-step probability p = 0.5 * (1 + v * delta) = {} is outside [0, 1] (v={}, delta={})",
                    p, v, delta
                )
            }
            DdmError::NonTerminatingConfiguration { reason } => {
                write!(f, "Walk is not guaranteed to terminate: {}", reason)
            }
            DdmError::InvalidParameters {
                parameter,
                value,
                constraint,
            } => {
                write!(
                    f,
                    "Invalid parameter '{}' = {}: {}",
                    parameter, value, constraint
                )
            }
            DdmError::InvalidConfiguration { field, reason } => {
                write!(f, "Invalid configuration for '{}': {}", field, reason)
            }
            DdmError::StepLimitExceeded { steps, position } => {
                write!(
                    f,
                    "Step limit of {} reached with position {} still inside the barriers",
                    steps, position
                )
            }
            DdmError::RandomGenerationError { reason } => {
                write!(f, "Random number generation error: {}", reason)
            }
        }
    }
}

impl std::error::Error for DdmError {}

/// Result type alias for ddm-walk operations
pub type DdmResult<T> = Result<T, DdmError>;

/// Validation utilities
pub mod validation {
    use super::{DdmError, DdmResult};

    /// Validate that a value is finite and not NaN
    pub fn validate_finite(name: &str, value: f64) -> DdmResult<()> {
        if !value.is_finite() {
            Err(DdmError::InvalidParameters {
                parameter: name.to_string(),
                value,
                constraint: "must be finite (not NaN or infinite)".to_string(),
            })
        } else {
            Ok(())
        }
    }

    /// Validate the time step. NaN fails the `> 0` comparison.
    pub fn validate_time_step(t_eps: f64) -> DdmResult<()> {
        if t_eps > 0.0 && t_eps.is_finite() {
            Ok(())
        } else {
            Err(DdmError::InvalidTimeStep { t_eps })
        }
    }

    /// Validate the upper barrier. An infinite barrier leaves a half-line
    /// on which the walk need not terminate.
    pub fn validate_barrier(a: f64) -> DdmResult<()> {
        if a.is_nan() || a <= 0.0 {
            Err(DdmError::InvalidBarrier { a })
        } else if a.is_infinite() {
            Err(DdmError::NonTerminatingConfiguration {
                reason: "upper barrier is infinite, only the lower barrier can absorb".to_string(),
            })
        } else {
            Ok(())
        }
    }

    /// Validate that a step of size delta actually moves the walk. When delta
    /// is below half an ulp of the barrier or of an interior start, `x ± delta`
    /// rounds back to `x` and the walk can never be absorbed.
    pub fn validate_step_resolution(a: f64, x0: f64, delta: f64) -> DdmResult<()> {
        let moves = |x: f64| x + delta != x && x - delta != x;
        let start_inside = x0 > 0.0 && x0 < a;
        if !moves(a) || (start_inside && !moves(x0)) {
            Err(DdmError::NonTerminatingConfiguration {
                reason: format!(
                    "step size {} is lost to rounding at position {} (barrier {})",
                    delta,
                    if moves(a) { x0 } else { a },
                    a
                ),
            })
        } else {
            Ok(())
        }
    }

    /// Validate the per-step Bernoulli parameter
    pub fn validate_probability(p: f64, v: f64, delta: f64) -> DdmResult<()> {
        if (0.0..=1.0).contains(&p) {
            Ok(())
        } else {
            Err(DdmError::InvalidProbability { p, v, delta })
        }
    }

    /// Validate an optional step cap
    pub fn validate_max_steps(max_steps: Option<u64>) -> DdmResult<()> {
        if max_steps == Some(0) {
            Err(DdmError::InvalidConfiguration {
                field: "max_steps".to_string(),
                reason: "must be greater than 0 when set".to_string(),
            })
        } else {
            Ok(())
        }
    }
}
