use crate::config::EpisodeConfig;
use crate::environment::{EnvEvent, Environment};
use crate::error::{ensure_arg, EvolutionError, Result};
use crate::network::Network;
use serde::{Deserialize, Serialize};

/// Why a trial ended.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum EpisodeEnd {
    /// The timer reached the configured maximum.
    Timeout,
    /// The vehicle left the track.
    Boundary,
    /// The environment or network failed mid-trial.
    Aborted,
    /// The host ended the trial explicitly.
    Forced,
}

/// Timer and fitness accumulator of one trial.
#[derive(Clone, Debug, PartialEq)]
pub struct EpisodeTracker {
    config: EpisodeConfig,
    elapsed: f64,
    fitness: f32,
    milestones: u32,
}

impl EpisodeTracker {
    #[must_use]
    pub fn new(config: EpisodeConfig) -> Self {
        Self {
            config,
            elapsed: 0.0,
            fitness: 0.0,
            milestones: 0,
        }
    }

    pub fn reset(&mut self) {
        self.elapsed = 0.0;
        self.fitness = 0.0;
        self.milestones = 0;
    }

    pub fn advance(&mut self, dt: f64) {
        self.elapsed += dt;
    }

    /// Applies one environment event; returns the end cause if it ends the trial.
    pub fn apply(&mut self, event: EnvEvent) -> Option<EpisodeEnd> {
        match event {
            EnvEvent::MilestoneReached => {
                self.fitness += self.config.milestone_reward;
                self.milestones += 1;
                if self.config.reset_timer_on_milestone {
                    self.elapsed = 0.0;
                }
                None
            }
            EnvEvent::BoundaryViolation => {
                self.fitness -= self.config.boundary_penalty;
                Some(EpisodeEnd::Boundary)
            }
        }
    }

    /// Applies the timeout penalty once the timer has run out.
    pub fn check_timeout(&mut self) -> Option<EpisodeEnd> {
        if self.elapsed >= self.config.max_episode_time {
            self.fitness -= self.config.timeout_penalty;
            Some(EpisodeEnd::Timeout)
        } else {
            None
        }
    }

    #[must_use]
    pub fn elapsed(&self) -> f64 {
        self.elapsed
    }

    #[must_use]
    pub fn fitness(&self) -> f32 {
        self.fitness
    }

    #[must_use]
    pub fn milestones(&self) -> u32 {
        self.milestones
    }
}

/// Runs one complete trial of `network` outside of training.
///
/// Returns the final fitness, elapsed time and end cause. Environment
/// failures end the trial as `Aborted` rather than propagating.
pub fn evaluate<E: Environment>(
    network: &mut Network,
    include_speed: bool,
    config: &EpisodeConfig,
    dt: f64,
    env: &mut E,
) -> Result<(f32, f64, EpisodeEnd)> {
    ensure_arg(dt > 0.0, "Tick duration must be positive")?;
    let mut tracker = EpisodeTracker::new(config.clone());
    env.reset_episode();

    loop {
        tracker.advance(dt);
        let step = env
            .sensor_readings()
            .map_err(EvolutionError::into_environment)
            .and_then(|mut input| {
                if include_speed {
                    input.push(env.speed());
                }
                let action = network.infer(&input)?;
                env.apply_action(action, dt)
                    .map_err(EvolutionError::into_environment)
            });
        let end = match step {
            Ok(events) => events
                .into_iter()
                .find_map(|event| tracker.apply(event))
                .or_else(|| tracker.check_timeout()),
            Err(e) if e.is_trial_local() => {
                tracing::warn!(error = %e, "Evaluation aborted");
                Some(EpisodeEnd::Aborted)
            }
            Err(e) => return Err(e),
        };
        if let Some(end) = end {
            env.reset_episode();
            return Ok((tracker.fitness(), tracker.elapsed(), end));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::network::Topology;

    /// Reports an outage with a non-environment error on the given tick.
    struct Outage {
        fail_on: usize,
        ticks: usize,
    }

    impl Environment for Outage {
        fn sensor_readings(&mut self) -> Result<Vec<f32>> {
            self.ticks += 1;
            if self.ticks == self.fail_on {
                return Err(EvolutionError::invalid_argument("sensor unavailable"));
            }
            Ok(vec![0.5, -0.5])
        }

        fn speed(&self) -> f32 {
            0.0
        }

        fn apply_action(&mut self, _action: usize, _dt: f64) -> Result<Vec<EnvEvent>> {
            Ok(Vec::new())
        }

        fn reset_episode(&mut self) {}
    }

    #[test]
    fn test_evaluate_aborts_on_any_collaborator_error() {
        let mut network = Network::new(Topology::new(2, 2, 2).unwrap());
        let mut env = Outage {
            fail_on: 3,
            ticks: 0,
        };
        let (fitness, elapsed, end) =
            evaluate(&mut network, false, &EpisodeConfig::default(), 0.5, &mut env).unwrap();
        assert_eq!(end, EpisodeEnd::Aborted);
        assert_eq!(fitness, 0.0);
        assert_eq!(elapsed, 1.5);
    }

    #[test]
    fn test_milestones_accumulate() {
        let mut tracker = EpisodeTracker::new(EpisodeConfig::default());
        assert_eq!(tracker.apply(EnvEvent::MilestoneReached), None);
        assert_eq!(tracker.apply(EnvEvent::MilestoneReached), None);
        assert_eq!(tracker.fitness(), 8.0);
        assert_eq!(tracker.milestones(), 2);
    }

    #[test]
    fn test_boundary_ends_with_penalty() {
        let mut tracker = EpisodeTracker::new(EpisodeConfig::default());
        tracker.apply(EnvEvent::MilestoneReached);
        assert_eq!(
            tracker.apply(EnvEvent::BoundaryViolation),
            Some(EpisodeEnd::Boundary)
        );
        assert_eq!(tracker.fitness(), -1.0);
    }

    #[test]
    fn test_timeout_penalty_applied_at_limit() {
        let mut tracker = EpisodeTracker::new(EpisodeConfig {
            max_episode_time: 1.0,
            ..Default::default()
        });
        tracker.advance(0.5);
        assert_eq!(tracker.check_timeout(), None);
        tracker.advance(0.5);
        assert_eq!(tracker.check_timeout(), Some(EpisodeEnd::Timeout));
        assert_eq!(tracker.fitness(), -5.0);
    }

    #[test]
    fn test_milestone_can_restart_timer() {
        let mut tracker = EpisodeTracker::new(EpisodeConfig {
            max_episode_time: 1.0,
            reset_timer_on_milestone: true,
            ..Default::default()
        });
        tracker.advance(0.9);
        tracker.apply(EnvEvent::MilestoneReached);
        assert_eq!(tracker.elapsed(), 0.0);
        tracker.advance(0.9);
        assert_eq!(tracker.check_timeout(), None);
    }

    #[test]
    fn test_reset_clears_everything() {
        let mut tracker = EpisodeTracker::new(EpisodeConfig::default());
        tracker.advance(2.0);
        tracker.apply(EnvEvent::MilestoneReached);
        tracker.reset();
        assert_eq!(tracker.elapsed(), 0.0);
        assert_eq!(tracker.fitness(), 0.0);
        assert_eq!(tracker.milestones(), 0);
    }
}
