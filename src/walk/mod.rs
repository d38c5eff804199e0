pub mod params;
pub mod simulator;

pub use params::{WalkParams, DEFAULT_T_EPS};
pub use simulator::{
    simulate_trajectory, Choice, RandomWalk, TrajectoryOutcome, TrajectoryPath, WalkState,
};
