//! Selection → crossover → mutation → replacement.
//!
//! An [`Evolver`] turns one evaluated generation into the parameter sets of
//! the next. Parent choice is fitness-proportionate over the top `k`
//! genomes; children come in pairs from one crossover of two parents and
//! are then mutated gene by gene.

pub mod crossover;
pub mod mutation;
pub mod selection;

pub use selection::{roulette_pick, select_top, selection_probabilities};

use crate::config::EvolutionConfig;
use crate::error::{ensure_arg, EvolutionError, Result};
use evodrive_data::{Genome, Population};
use rand::Rng;
use serde::{Deserialize, Serialize};

/// How two parents are recombined.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum CrossoverStrategy {
    /// Children alternate parent by index parity.
    #[default]
    Alternating,
    /// Children swap tails after one random cut.
    SinglePoint,
}

/// Policy for roulette selection when the top-k fitness values are not a
/// valid distribution (a negative value, or a total of zero or less).
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum FitnessShaping {
    /// Shift fitness below the minimum so the weakest parent keeps a small share.
    #[default]
    Shift,
    /// Pick parents uniformly.
    Uniform,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Evolver {
    pub top_k: usize,
    pub mutation_rate: f32,
    pub crossover: CrossoverStrategy,
    pub shaping: FitnessShaping,
}

impl Default for Evolver {
    fn default() -> Self {
        Self {
            top_k: 2,
            mutation_rate: 0.05,
            crossover: CrossoverStrategy::Alternating,
            shaping: FitnessShaping::Shift,
        }
    }
}

impl Evolver {
    pub fn new(top_k: usize, mutation_rate: f32) -> Result<Self> {
        ensure_arg(top_k > 0, "Selection count must be positive")?;
        ensure_arg(
            (0.0..=1.0).contains(&mutation_rate),
            "Mutation rate must be in [0.0, 1.0]",
        )?;
        Ok(Self {
            top_k,
            mutation_rate,
            ..Self::default()
        })
    }

    pub fn from_config(config: &EvolutionConfig) -> Result<Self> {
        let mut evolver = Self::new(config.top_k, config.mutation_rate)?;
        evolver.crossover = config.crossover;
        evolver.shaping = config.fitness_shaping;
        Ok(evolver)
    }

    #[must_use]
    pub fn with_crossover(mut self, crossover: CrossoverStrategy) -> Self {
        self.crossover = crossover;
        self
    }

    #[must_use]
    pub fn with_shaping(mut self, shaping: FitnessShaping) -> Self {
        self.shaping = shaping;
        self
    }

    /// See [`selection::select_top`].
    pub fn select_top(&self, population: &Population, k: usize) -> Result<Vec<Genome>> {
        select_top(population, k)
    }

    /// Breeds exactly `target_size` parameter sets from `parents`.
    pub fn reproduce<R: Rng>(
        &self,
        parents: &[Genome],
        target_size: usize,
        rng: &mut R,
    ) -> Result<Vec<Vec<f32>>> {
        ensure_arg(!parents.is_empty(), "Cannot reproduce without parents")?;
        ensure_arg(target_size > 0, "Target population size must be positive")?;
        let len = parents[0].len();
        if let Some(odd) = parents.iter().find(|g| g.len() != len) {
            return Err(EvolutionError::shape(len, odd.len()));
        }

        let probabilities = selection_probabilities(parents, self.shaping);
        let mut children = Vec::with_capacity(target_size);
        while children.len() < target_size {
            let a = &parents[roulette_pick(&probabilities, rng)].parameters;
            let b = &parents[roulette_pick(&probabilities, rng)].parameters;

            let (mut first, mut second) = match self.crossover {
                CrossoverStrategy::Alternating => crossover::alternating(a, b),
                CrossoverStrategy::SinglePoint => crossover::single_point(a, b, rng),
            };
            mutation::mutate(&mut first, self.mutation_rate, rng);
            mutation::mutate(&mut second, self.mutation_rate, rng);

            children.push(first);
            if children.len() < target_size {
                children.push(second);
            }
        }
        Ok(children)
    }

    /// Selects, breeds, and returns the next generation's parameter sets.
    pub fn next_generation<R: Rng>(
        &self,
        population: &Population,
        rng: &mut R,
    ) -> Result<Vec<Vec<f32>>> {
        let parents = self.select_top(population, self.top_k)?;
        tracing::debug!(
            generation = population.generation,
            parent_fitness = ?parents.iter().map(|g| g.fitness).collect::<Vec<_>>(),
            "Selected parents"
        );
        self.reproduce(&parents, population.len(), rng)
    }
}
