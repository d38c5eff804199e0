//! # ddm-walk: Random Walk Approximation to the Drift-Diffusion Model
//!
//! Simulates single trajectories of a discrete random walk between two
//! absorbing barriers. As the time step shrinks the walk converges to the
//! drift-diffusion model used for two-alternative forced-choice
//! response-time modeling.
//!
//! ## Key Features
//!
//! - **Injected Randomness**: Every trajectory draws from a caller-supplied source
//! - **Upfront Validation**: Parameters are checked once, before any stepping
//! - **Reproducible Streams**: Counter-based RNG factory for parallel callers
//! - **Observable Paths**: Optional per-step observer and path recording
//!
//! ## Quick Start
//!
//! ```rust
//! use ddm_walk::rng::seed_rng_from_u64;
//! use ddm_walk::walk::{simulate_trajectory, DEFAULT_T_EPS};
//!
//! let mut rng = seed_rng_from_u64(42);
//!
//! // Start halfway between the barriers 0 and 1 with a positive drift
//! let (choice, time) =
//!     simulate_trajectory(0.5, 1.0, 1.5, DEFAULT_T_EPS, &mut rng).expect("Valid parameters");
//! assert!(choice == 0 || choice == 1);
//! assert!(time >= DEFAULT_T_EPS);
//! ```
//!
//! ## Mathematical Foundation
//!
//! Each step moves the position by ±√t_eps, upward with probability
//! ½(1 + v·√t_eps), until it leaves (0, a). The reported time is the number
//! of steps times t_eps.

pub mod error;
pub mod rng;
pub mod walk;

pub use error::{DdmError, DdmResult};
pub use walk::{simulate_trajectory, Choice, RandomWalk, TrajectoryOutcome, WalkParams};
