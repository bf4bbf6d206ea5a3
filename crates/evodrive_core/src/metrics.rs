//! Run counters and logging setup.

use crate::trainer::{EpisodeEnd, TickOutcome};
use std::time::{Duration, Instant};
use tracing_subscriber::EnvFilter;

/// Counters for one training run.
#[derive(Debug, Clone)]
pub struct TrainingMetrics {
    ticks: u64,
    episodes: u64,
    aborted: u64,
    boundary_ends: u64,
    generations: u64,
    best_fitness: Option<f32>,
    start_time: Instant,
}

impl Default for TrainingMetrics {
    fn default() -> Self {
        Self::new()
    }
}

impl TrainingMetrics {
    #[must_use]
    pub fn new() -> Self {
        Self {
            ticks: 0,
            episodes: 0,
            aborted: 0,
            boundary_ends: 0,
            generations: 0,
            best_fitness: None,
            start_time: Instant::now(),
        }
    }

    /// Folds one tick outcome into the counters.
    pub fn record(&mut self, outcome: &TickOutcome) {
        self.ticks += 1;
        let report = match outcome {
            TickOutcome::Running => return,
            TickOutcome::EpisodeEnded(report) => report,
            TickOutcome::GenerationAdvanced(report, summary) => {
                self.generations += 1;
                if self.best_fitness.map_or(true, |b| summary.best_fitness > b) {
                    self.best_fitness = Some(summary.best_fitness);
                }
                if self.generations % 10 == 0 {
                    tracing::info!(
                        generations = self.generations,
                        episodes = self.episodes + 1,
                        ticks = self.ticks,
                        elapsed_ms = self.elapsed().as_millis() as u64,
                        "Training progress"
                    );
                }
                report
            }
        };
        self.episodes += 1;
        match report.cause {
            EpisodeEnd::Aborted => self.aborted += 1,
            EpisodeEnd::Boundary => self.boundary_ends += 1,
            EpisodeEnd::Timeout | EpisodeEnd::Forced => {}
        }
    }

    #[must_use]
    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    #[must_use]
    pub fn episodes(&self) -> u64 {
        self.episodes
    }

    #[must_use]
    pub fn aborted(&self) -> u64 {
        self.aborted
    }

    #[must_use]
    pub fn boundary_ends(&self) -> u64 {
        self.boundary_ends
    }

    #[must_use]
    pub fn generations(&self) -> u64 {
        self.generations
    }

    /// Best generation-best fitness seen so far.
    #[must_use]
    pub fn best_fitness(&self) -> Option<f32> {
        self.best_fitness
    }

    #[must_use]
    pub fn elapsed(&self) -> Duration {
        self.start_time.elapsed()
    }
}

/// Installs a global fmt subscriber at `default_level`.
///
/// `RUST_LOG` takes precedence when set. Calling this more than once is
/// harmless; later calls leave the first subscriber in place.
pub fn init_logging(default_level: &str) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing::subscriber::set_global_default(
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .finish(),
    )
    .ok();
}
