//! Episode orchestration.
//!
//! The [`Trainer`] owns the population, the policy network and the random
//! source. The host calls [`Trainer::tick`] once per simulation step; each
//! call completes synchronously, including any generation change it
//! triggers. Genome parameters are copied into the network at the start of
//! every trial, so nothing else keeps a reference into the population.
//!
//! ```text
//! Idle --start--> Evaluating --episode end--> Transitioning --+--> Evaluating (next genome)
//!                                                             +--> Evaluating (next generation)
//! ```

pub mod episode;

pub use episode::{evaluate, EpisodeEnd, EpisodeTracker};

use crate::archive::GenomeArchive;
use crate::config::{AppConfig, NetworkConfig};
use crate::environment::{EnvEvent, Environment};
use crate::error::{EvolutionError, Result};
use crate::evolution::Evolver;
use crate::network::{Network, Topology};
use crate::population::PopulationLogic;
use evodrive_data::{GenerationSummary, Population};
use rand::Rng;
use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum TrainerState {
    Idle,
    Evaluating,
    Transitioning,
}

/// Outcome of one finished trial.
#[derive(Clone, Debug, PartialEq)]
pub struct EpisodeReport {
    pub generation: u64,
    pub index: usize,
    pub fitness: f32,
    pub elapsed: f64,
    pub cause: EpisodeEnd,
}

#[derive(Clone, Debug, PartialEq)]
pub enum TickOutcome {
    /// The current trial continues.
    Running,
    /// A trial ended and the next individual of the same generation is loaded.
    EpisodeEnded(EpisodeReport),
    /// The last trial of a generation ended and the next generation is loaded.
    GenerationAdvanced(EpisodeReport, GenerationSummary),
}

pub struct Trainer<R: Rng> {
    network_config: NetworkConfig,
    population_size: usize,
    topology: Topology,
    network: Network,
    population: Population,
    evolver: Evolver,
    episode: EpisodeTracker,
    rng: R,
    archives: Vec<Box<dyn GenomeArchive>>,
    history: Vec<GenerationSummary>,
    state: TrainerState,
    index: usize,
}

impl<R: Rng> Trainer<R> {
    /// Validates `config` and builds an idle trainer.
    pub fn new(config: &AppConfig, rng: R) -> Result<Self> {
        config.validate()?;
        let topology = config.network.topology()?;
        Ok(Self {
            network_config: config.network.clone(),
            population_size: config.evolution.population_size,
            topology,
            network: Network::new(topology),
            population: Population::default(),
            evolver: Evolver::from_config(&config.evolution)?,
            episode: EpisodeTracker::new(config.episode.clone()),
            rng,
            archives: Vec::new(),
            history: Vec::new(),
            state: TrainerState::Idle,
            index: 0,
        })
    }

    #[must_use]
    pub fn with_archive<A: GenomeArchive + 'static>(mut self, archive: A) -> Self {
        self.archives.push(Box::new(archive));
        self
    }

    /// Idle → Evaluating with a fresh random first generation.
    pub fn start<E: Environment>(&mut self, env: &mut E) -> Result<()> {
        let population = Population::new_random_with_rng(
            self.population_size,
            self.topology.parameter_count(),
            &mut self.rng,
        )?;
        self.start_with_population(population, env)
    }

    /// Idle → Evaluating with a caller-supplied population.
    ///
    /// Every genome must match the network topology; a mismatch is fatal.
    pub fn start_with_population<E: Environment>(
        &mut self,
        population: Population,
        env: &mut E,
    ) -> Result<()> {
        if self.state != TrainerState::Idle {
            return Err(EvolutionError::invalid_argument("Trainer already started"));
        }
        if population.len() != self.population_size {
            return Err(EvolutionError::invalid_argument(format!(
                "Population has {} genomes, expected {}",
                population.len(),
                self.population_size
            )));
        }
        let expected = self.topology.parameter_count();
        if let Some(bad) = population.genomes.iter().find(|g| g.len() != expected) {
            return Err(EvolutionError::shape(expected, bad.len()));
        }

        self.network.load_parameters(&population.genomes[0].parameters)?;
        self.population = population;
        self.index = 0;
        self.episode.reset();
        env.reset_episode();
        self.state = TrainerState::Evaluating;

        tracing::info!(
            population = self.population_size,
            parameters = expected,
            inputs = self.topology.input_size,
            hidden = self.topology.hidden_size,
            actions = self.topology.output_size,
            "Training started"
        );
        Ok(())
    }

    /// Advances the current trial by one simulation step of `dt` seconds.
    pub fn tick<E: Environment>(&mut self, dt: f64, env: &mut E) -> Result<TickOutcome> {
        self.ensure_evaluating()?;
        self.episode.advance(dt);

        let events = match self.step_policy(dt, env) {
            Ok(events) => events,
            Err(e) if e.is_trial_local() => {
                tracing::warn!(
                    generation = self.population.generation,
                    index = self.index,
                    error = %e,
                    "Trial aborted"
                );
                return self.end_episode(EpisodeEnd::Aborted, env);
            }
            Err(e) => return Err(e),
        };

        for event in events {
            if let Some(end) = self.episode.apply(event) {
                return self.end_episode(end, env);
            }
        }
        match self.episode.check_timeout() {
            Some(end) => self.end_episode(end, env),
            None => Ok(TickOutcome::Running),
        }
    }

    /// Applies an event raised outside of [`Environment::apply_action`].
    pub fn handle_event<E: Environment>(
        &mut self,
        event: EnvEvent,
        env: &mut E,
    ) -> Result<TickOutcome> {
        self.ensure_evaluating()?;
        match self.episode.apply(event) {
            Some(end) => self.end_episode(end, env),
            None => Ok(TickOutcome::Running),
        }
    }

    /// Ends the current trial without any penalty.
    pub fn force_end_episode<E: Environment>(&mut self, env: &mut E) -> Result<TickOutcome> {
        self.ensure_evaluating()?;
        self.end_episode(EpisodeEnd::Forced, env)
    }

    fn ensure_evaluating(&self) -> Result<()> {
        if self.state == TrainerState::Evaluating {
            Ok(())
        } else {
            Err(EvolutionError::invalid_argument(format!(
                "Trainer is {:?}, not evaluating",
                self.state
            )))
        }
    }

    fn step_policy<E: Environment>(&mut self, dt: f64, env: &mut E) -> Result<Vec<EnvEvent>> {
        let mut input = env
            .sensor_readings()
            .map_err(EvolutionError::into_environment)?;
        if self.network_config.include_speed {
            input.push(env.speed());
        }
        let action = self.network.infer(&input)?;
        env.apply_action(action, dt)
            .map_err(EvolutionError::into_environment)
    }

    fn end_episode<E: Environment>(
        &mut self,
        cause: EpisodeEnd,
        env: &mut E,
    ) -> Result<TickOutcome> {
        self.state = TrainerState::Transitioning;
        let report = EpisodeReport {
            generation: self.population.generation,
            index: self.index,
            fitness: self.episode.fitness(),
            elapsed: self.episode.elapsed(),
            cause,
        };
        tracing::debug!(
            generation = report.generation,
            index = report.index,
            fitness = report.fitness,
            elapsed = report.elapsed,
            milestones = self.episode.milestones(),
            cause = ?cause,
            "Episode ended"
        );

        self.population.record_result(
            self.index,
            self.network.export_parameters(),
            report.fitness,
        )?;
        env.reset_episode();
        self.index += 1;

        let outcome = if self.index < self.population.len() {
            TickOutcome::EpisodeEnded(report)
        } else {
            let summary = self.complete_generation()?;
            self.index = 0;
            TickOutcome::GenerationAdvanced(report, summary)
        };

        self.network
            .load_parameters(&self.population.genomes[self.index].parameters)?;
        self.episode.reset();
        self.state = TrainerState::Evaluating;
        Ok(outcome)
    }

    fn complete_generation(&mut self) -> Result<GenerationSummary> {
        let summary = self.population.summary();
        tracing::info!(
            generation = summary.generation,
            best = summary.best_fitness,
            mean = summary.mean_fitness,
            worst = summary.worst_fitness,
            "Generation complete"
        );

        if let Some((_, best)) = self.population.best_genome() {
            let best = best.parameters.clone();
            for archive in &mut self.archives {
                if let Err(e) = archive.archive_best(summary.generation, &best) {
                    tracing::warn!(generation = summary.generation, error = %e, "Failed to archive best genome");
                }
            }
        }
        for archive in &mut self.archives {
            if let Err(e) = archive.record_summary(&summary) {
                tracing::warn!(generation = summary.generation, error = %e, "Failed to record generation summary");
            }
        }
        self.history.push(summary.clone());

        self.population.advance_generation(&self.evolver, &mut self.rng)?;
        Ok(summary)
    }

    #[must_use]
    pub fn state(&self) -> TrainerState {
        self.state
    }

    /// Slot of the genome currently being evaluated.
    #[must_use]
    pub fn current_index(&self) -> usize {
        self.index
    }

    #[must_use]
    pub fn generation(&self) -> u64 {
        self.population.generation
    }

    #[must_use]
    pub fn elapsed(&self) -> f64 {
        self.episode.elapsed()
    }

    /// Fitness accumulated so far in the current trial.
    #[must_use]
    pub fn fitness(&self) -> f32 {
        self.episode.fitness()
    }

    #[must_use]
    pub fn population(&self) -> &Population {
        &self.population
    }

    #[must_use]
    pub fn network(&self) -> &Network {
        &self.network
    }

    #[must_use]
    pub fn topology(&self) -> Topology {
        self.topology
    }

    /// Summaries of every completed generation, oldest first.
    #[must_use]
    pub fn history(&self) -> &[GenerationSummary] {
        &self.history
    }
}
