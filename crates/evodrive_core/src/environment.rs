//! The simulation collaborator driven by the trainer.
//!
//! Vehicle dynamics, ray casting and checkpoint bookkeeping live behind
//! [`Environment`]; the trainer only sees sensor frames, speed, and the
//! fitness events an action produced.

use crate::error::Result;
use serde::{Deserialize, Serialize};

/// Fitness-relevant event raised by the environment during a tick.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum EnvEvent {
    /// The vehicle collected a checkpoint.
    MilestoneReached,
    /// The vehicle left the track; ends the trial.
    BoundaryViolation,
}

pub trait Environment {
    /// Current `[distance, tag]` frame, one pair per ray.
    fn sensor_readings(&mut self) -> Result<Vec<f32>>;

    fn speed(&self) -> f32;

    /// Applies the policy's action for `dt` seconds and reports what happened.
    fn apply_action(&mut self, action: usize, dt: f64) -> Result<Vec<EnvEvent>>;

    /// Returns the vehicle to its start pose and restores every checkpoint.
    fn reset_episode(&mut self);
}
