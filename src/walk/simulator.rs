// src/walk/simulator.rs
//! Random Walk Approximation to a Drift-Diffusion Trajectory
//!
//! # Mathematical Framework
//!
//! The drift-diffusion model describes evidence accumulation:
//! ```text
//! dX_t = v dt + dW_t,    X_0 = a·b,    absorbed at 0 and a
//! ```
//!
//! The walk replaces the diffusion with steps of fixed magnitude:
//! ```text
//! delta = √t_eps
//! X_{n+1} = X_n + delta   with probability p = ½(1 + v·delta)
//! X_{n+1} = X_n - delta   otherwise
//! ```
//!
//! Each step advances time by t_eps. The mean increment is v·t_eps and the
//! variance tends to t_eps, so as t_eps → 0 the walk converges to the
//! diffusion and the hitting time converges to its first-passage time.
//!
//! # Termination
//!
//! The barrier test runs after every step: the walk continues only while
//! `0 < x < a`. The exit is classified as upper only when `x > a`, so a walk
//! that lands exactly on `a` reports the lower barrier.

use super::params::WalkParams;
use crate::error::{DdmError, DdmResult};
use crate::rng::UniformSource;
use std::fmt;

/// Barrier that absorbed the walk
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Choice {
    Lower = 0,
    Upper = 1,
}

impl Choice {
    /// Classify a final position against the upper barrier
    pub fn classify(x: f64, a: f64) -> Self {
        if x > a {
            Choice::Upper
        } else {
            Choice::Lower
        }
    }

    pub fn as_u8(self) -> u8 {
        self as u8
    }
}

impl From<Choice> for u8 {
    fn from(choice: Choice) -> u8 {
        choice.as_u8()
    }
}

impl fmt::Display for Choice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Choice::Lower => write!(f, "lower"),
            Choice::Upper => write!(f, "upper"),
        }
    }
}

/// Position of the walk after `step` steps
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct WalkState {
    pub step: u64,
    pub position: f64,
}

/// Result of one simulated trajectory
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TrajectoryOutcome {
    pub choice: Choice,
    pub time: f64, // steps * t_eps
    pub steps: u64,
    pub final_position: f64,
}

impl TrajectoryOutcome {
    /// `(choice, time)` with choice 0 for the lower barrier and 1 for the upper
    pub fn into_tuple(self) -> (u8, f64) {
        (self.choice.as_u8(), self.time)
    }
}

/// Recorded trajectory: the start state followed by one state per step
#[derive(Clone, Debug, PartialEq)]
pub struct TrajectoryPath {
    pub states: Vec<WalkState>,
    pub outcome: TrajectoryOutcome,
}

/// Validated random walk, ready to simulate any number of trajectories
#[derive(Clone, Copy, Debug)]
pub struct RandomWalk {
    params: WalkParams,
    delta: f64,
    p: f64,
    x0: f64,
}

impl RandomWalk {
    pub fn new(params: WalkParams) -> DdmResult<Self> {
        Self::new_quiet(params, false)
    }

    pub fn new_quiet(params: WalkParams, suppress_warnings: bool) -> DdmResult<Self> {
        params.validate()?;

        let walk = RandomWalk {
            params,
            delta: params.step_size(),
            p: params.up_probability(),
            x0: params.start_position(),
        };

        if !suppress_warnings {
            walk.warn_on_degenerate_params();
        }

        Ok(walk)
    }

    fn warn_on_degenerate_params(&self) {
        for warning in self.degenerate_param_warnings() {
            eprintln!("WARNING!: {}", warning);
        }
    }

    fn degenerate_param_warnings(&self) -> Vec<String> {
        let WalkParams { b, a, .. } = self.params;
        let mut warnings = Vec::new();
        if !(0.0..=1.0).contains(&b) {
            warnings.push(format!(
                "starting point b = {} lies outside [0, 1]; the walk starts outside the barrier interval.",
                b
            ));
        }
        if self.p == 0.0 || self.p == 1.0 {
            warnings.push(format!(
                "up-step probability p = {} makes the walk deterministic.",
                self.p
            ));
        }
        if self.delta >= a {
            warnings.push(format!(
                "step size {} is not smaller than barrier separation {}; trajectories end within two steps.",
                self.delta, a
            ));
        }
        warnings
    }

    pub fn params(&self) -> &WalkParams {
        &self.params
    }

    pub fn step_size(&self) -> f64 {
        self.delta
    }

    pub fn up_probability(&self) -> f64 {
        self.p
    }

    pub fn start_position(&self) -> f64 {
        self.x0
    }

    /// Simulate one trajectory until it is absorbed
    pub fn simulate<S: UniformSource + ?Sized>(
        &self,
        rng: &mut S,
    ) -> DdmResult<TrajectoryOutcome> {
        self.simulate_observed(rng, |_| {})
    }

    /// Simulate one trajectory and record every state it visits
    pub fn simulate_path<S: UniformSource + ?Sized>(
        &self,
        rng: &mut S,
    ) -> DdmResult<TrajectoryPath> {
        let mut states = Vec::new();
        let outcome = self.simulate_observed(rng, |state| states.push(state))?;
        Ok(TrajectoryPath { states, outcome })
    }

    /// Simulate one trajectory, reporting the start state and then the state
    /// after each step to `observer`.
    ///
    /// # Algorithm
    ///
    /// 1. Draw r ~ U[0, 1)
    /// 2. Move up by delta if r < p, otherwise down by delta
    /// 3. Count the step
    /// 4. Stop once x ≤ 0 or x ≥ a (a NaN position also stops)
    ///
    /// The observer still sees every state when the step cap ends the walk
    /// with an error.
    pub fn simulate_observed<S, F>(
        &self,
        rng: &mut S,
        mut observer: F,
    ) -> DdmResult<TrajectoryOutcome>
    where
        S: UniformSource + ?Sized,
        F: FnMut(WalkState),
    {
        let a = self.params.a;
        let mut x = self.x0;
        let mut tic: u64 = 0;

        observer(WalkState { step: tic, position: x });

        loop {
            let r = rng.next_uniform();
            if r < self.p {
                x += self.delta;
            } else {
                x -= self.delta;
            }
            tic += 1;

            observer(WalkState { step: tic, position: x });

            if !(x < a && x > 0.0) {
                break;
            }
            if let Some(max_steps) = self.params.max_steps {
                if tic >= max_steps {
                    return Err(DdmError::StepLimitExceeded {
                        steps: tic,
                        position: x,
                    });
                }
            }
        }

        Ok(TrajectoryOutcome {
            choice: Choice::classify(x, a),
            time: tic as f64 * self.params.t_eps,
            steps: tic,
            final_position: x,
        })
    }
}

/// Simulate a single drift-diffusion trajectory by random walk.
///
/// # Parameters
/// - `b`: Starting point as a proportion of the distance from 0 to `a`
/// - `a`: Upper barrier (lower is 0)
/// - `v`: Drift rate
/// - `t_eps`: Time step size (see [`DEFAULT_T_EPS`](super::params::DEFAULT_T_EPS))
/// - `rng`: Source of uniform draws
///
/// # Returns
/// `(choice, time)` where choice is 1 for the upper barrier and 0 for the
/// lower, and time is the number of steps times `t_eps`.
pub fn simulate_trajectory<S: UniformSource + ?Sized>(
    b: f64,
    a: f64,
    v: f64,
    t_eps: f64,
    rng: &mut S,
) -> DdmResult<(u8, f64)> {
    let params = WalkParams::new(b, a, v).with_time_step(t_eps);
    let walk = RandomWalk::new_quiet(params, true)?;
    Ok(walk.simulate(rng)?.into_tuple())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::{RngFactory, ScriptedDraws};

    fn quiet(params: WalkParams) -> RandomWalk {
        RandomWalk::new_quiet(params, true).expect("valid parameters")
    }

    #[test]
    fn test_classify_boundary_quirk() {
        assert_eq!(Choice::classify(1.0, 1.0), Choice::Lower);
        assert_eq!(Choice::classify(1.0 + 1e-12, 1.0), Choice::Upper);
        assert_eq!(Choice::classify(0.0, 1.0), Choice::Lower);
        assert_eq!(Choice::classify(-0.01, 1.0), Choice::Lower);
        assert_eq!(Choice::classify(f64::NAN, 1.0), Choice::Lower);
    }

    #[test]
    fn test_choice_conversions() {
        assert_eq!(u8::from(Choice::Lower), 0);
        assert_eq!(u8::from(Choice::Upper), 1);
        assert_eq!(Choice::Upper.to_string(), "upper");
    }

    #[test]
    fn test_precomputed_quantities_match_params() {
        let params = WalkParams::new(0.3, 2.0, -1.5).with_time_step(1e-3);
        let walk = quiet(params);

        assert_eq!(walk.step_size(), params.step_size());
        assert_eq!(walk.up_probability(), params.up_probability());
        assert_eq!(walk.start_position(), params.start_position());
        assert_eq!(walk.params(), &params);
    }

    #[test]
    fn test_degenerate_param_warnings() {
        assert!(quiet(WalkParams::default()).degenerate_param_warnings().is_empty());

        // Starts above a but its first step down lands inside (0, a).
        let above = quiet(WalkParams::new(1.2, 1.0, 0.0).with_time_step(0.09));
        let warnings = above.degenerate_param_warnings();
        assert_eq!(warnings.len(), 1);
        assert!(warnings[0].contains("starts outside the barrier interval"));
        assert!(!warnings[0].contains("exits"));

        let mut draws = ScriptedDraws::new(vec![0.9]).unwrap();
        let path = above.simulate_path(&mut draws).unwrap();
        assert!((path.states[1].position - 0.9).abs() < 1e-12);
        assert!(path.outcome.steps > 1);

        let certain = quiet(WalkParams::new(0.25, 1.0, 2.0).with_time_step(0.25));
        let warnings = certain.degenerate_param_warnings();
        assert!(warnings.iter().any(|w| w.contains("deterministic")));
    }

    #[test]
    fn test_free_function_runs_deterministic_walk() {
        // p = 1 only warns through RandomWalk::new; the free function
        // simulates it silently.
        let mut draws = ScriptedDraws::new(vec![0.7]).unwrap();
        let (choice, time) = simulate_trajectory(0.25, 1.0, 2.0, 0.25, &mut draws).unwrap();

        assert_eq!(choice, 1);
        assert_eq!(time, 0.5);
    }

    #[test]
    fn test_invalid_params_rejected_before_stepping() {
        let mut draws = ScriptedDraws::new(vec![0.1]).unwrap();
        let result = simulate_trajectory(0.5, 1.0, 0.0, -1e-4, &mut draws);

        assert!(matches!(result, Err(DdmError::InvalidTimeStep { .. })));
        assert_eq!(draws.consumed(), 0);
    }

    #[test]
    fn test_one_draw_per_step() {
        // delta ≈ 0.0316 and every draw steps up: absorbed at the top on step 16.
        let walk = quiet(WalkParams::new(0.5, 1.0, 0.3).with_time_step(1e-3));
        let mut draws = ScriptedDraws::new(vec![0.13]).unwrap();

        let outcome = walk.simulate(&mut draws).unwrap();

        assert_eq!(outcome.steps, 16);
        assert_eq!(outcome.choice, Choice::Upper);
        assert_eq!(draws.consumed() as u64, outcome.steps);
    }

    #[test]
    fn test_step_limit() {
        // Alternating draws never leave the interval.
        let walk = quiet(WalkParams::default().with_max_steps(100));
        let mut draws = ScriptedDraws::new(vec![0.4, 0.6]).unwrap();

        let err = walk.simulate(&mut draws).unwrap_err();

        match err {
            DdmError::StepLimitExceeded { steps, position } => {
                assert_eq!(steps, 100);
                assert!((position - 0.5).abs() < 1e-9);
            }
            other => panic!("unexpected error: {}", other),
        }
    }

    #[test]
    fn test_step_limit_not_hit_when_walk_exits_on_last_step() {
        // Two straight up-steps from 0.985 leave the interval on step 2.
        let walk = quiet(WalkParams::new(0.985, 1.0, 0.0).with_max_steps(2));
        let mut draws = ScriptedDraws::new(vec![0.0]).unwrap();

        let outcome = walk.simulate(&mut draws).unwrap();

        assert_eq!(outcome.steps, 2);
        assert_eq!(outcome.choice, Choice::Upper);
    }

    #[test]
    fn test_path_matches_outcome() {
        let walk = quiet(WalkParams::new(0.5, 1.0, 0.5).with_time_step(1e-3));
        let mut rng = RngFactory::new(2024).create_counter_rng(0);

        let path = walk.simulate_path(&mut rng).unwrap();

        assert_eq!(path.states.len() as u64, path.outcome.steps + 1);
        assert_eq!(path.states[0], WalkState { step: 0, position: 0.5 });
        let last = path.states.last().unwrap();
        assert_eq!(last.step, path.outcome.steps);
        assert_eq!(last.position, path.outcome.final_position);
        for (i, state) in path.states.iter().enumerate() {
            assert_eq!(state.step, i as u64);
        }
    }

    #[test]
    fn test_nan_start_terminates_immediately() {
        // Unreachable through validation, but the loop itself must still
        // stop on a NaN position rather than spin.
        let walk = RandomWalk {
            params: WalkParams::default(),
            delta: 0.01,
            p: 0.5,
            x0: f64::NAN,
        };
        let mut draws = ScriptedDraws::new(vec![0.1]).unwrap();

        let outcome = walk.simulate(&mut draws).unwrap();

        assert_eq!(outcome.steps, 1);
        assert_eq!(outcome.choice, Choice::Lower);
    }
}
