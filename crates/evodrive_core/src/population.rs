use crate::error::{ensure_arg, EvolutionError, Result};
use crate::evolution::{mutation, Evolver};
use evodrive_data::{Genome, GenerationSummary, Population};
use rand::Rng;

/// Lifecycle operations on a [`Population`].
pub trait PopulationLogic {
    /// `size` genomes of `parameter_length` uniform `[-1, 1]` values, fitness 0.
    fn new_random_with_rng<R: Rng>(
        size: usize,
        parameter_length: usize,
        rng: &mut R,
    ) -> Result<Self>
    where
        Self: Sized;

    /// Overwrites slot `index` with an evaluated genome.
    fn record_result(&mut self, index: usize, parameters: Vec<f32>, fitness: f32) -> Result<()>;

    /// Replaces every slot with a child of the current generation and
    /// resets all fitness to zero.
    fn advance_generation<R: Rng>(&mut self, evolver: &Evolver, rng: &mut R) -> Result<()>;

    /// Highest-fitness genome; the lowest slot wins ties.
    fn best_genome(&self) -> Option<(usize, &Genome)>;

    fn summary(&self) -> GenerationSummary;
}

impl PopulationLogic for Population {
    fn new_random_with_rng<R: Rng>(
        size: usize,
        parameter_length: usize,
        rng: &mut R,
    ) -> Result<Self> {
        ensure_arg(size > 0, "Population size must be positive")?;
        ensure_arg(parameter_length > 0, "Parameter length must be positive")?;

        let genomes = (0..size)
            .map(|_| Genome::new(mutation::random_parameters(parameter_length, rng)))
            .collect();
        Ok(Self {
            genomes,
            generation: 0,
            first_generation: true,
            parameter_length,
        })
    }

    fn record_result(&mut self, index: usize, parameters: Vec<f32>, fitness: f32) -> Result<()> {
        let len = self.genomes.len();
        if parameters.len() != self.parameter_length {
            return Err(EvolutionError::shape(
                self.parameter_length,
                parameters.len(),
            ));
        }
        let slot = self
            .genomes
            .get_mut(index)
            .ok_or_else(|| EvolutionError::index(index, len))?;
        slot.parameters = parameters;
        slot.fitness = fitness;
        Ok(())
    }

    fn advance_generation<R: Rng>(&mut self, evolver: &Evolver, rng: &mut R) -> Result<()> {
        let children = evolver.next_generation(self, rng)?;
        debug_assert_eq!(children.len(), self.genomes.len());

        for (slot, child) in self.genomes.iter_mut().zip(children) {
            slot.parameters = child;
            slot.fitness = 0.0;
        }
        self.generation += 1;
        self.first_generation = false;
        Ok(())
    }

    fn best_genome(&self) -> Option<(usize, &Genome)> {
        let mut best: Option<(usize, &Genome)> = None;
        for (i, genome) in self.genomes.iter().enumerate() {
            if genome.fitness.is_nan() {
                continue;
            }
            match best {
                Some((_, b)) if genome.fitness <= b.fitness => {}
                _ => best = Some((i, genome)),
            }
        }
        best.or_else(|| self.genomes.first().map(|g| (0, g)))
    }

    fn summary(&self) -> GenerationSummary {
        let scores: Vec<f32> = self
            .genomes
            .iter()
            .map(|g| g.fitness)
            .filter(|f| !f.is_nan())
            .collect();
        let (best_index, best_fitness) = self
            .best_genome()
            .map(|(i, g)| (i, g.fitness))
            .unwrap_or((0, 0.0));
        let mean_fitness = if scores.is_empty() {
            0.0
        } else {
            scores.iter().sum::<f32>() / scores.len() as f32
        };
        let worst_fitness = scores.iter().copied().fold(f32::INFINITY, f32::min);

        GenerationSummary {
            generation: self.generation,
            best_fitness,
            mean_fitness,
            worst_fitness: if worst_fitness.is_finite() {
                worst_fitness
            } else {
                0.0
            },
            best_index,
            population_size: self.genomes.len(),
        }
    }
}
