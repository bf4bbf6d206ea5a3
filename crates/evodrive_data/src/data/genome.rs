use serde::{Deserialize, Serialize};

/// One candidate control policy: a flat parameter vector plus the fitness
/// it earned in its last trial.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Default)]
pub struct Genome {
    /// Network weights and biases in canonical layout order.
    pub parameters: Vec<f32>,
    /// Fitness accumulated during the most recent trial.
    pub fitness: f32,
}

impl Genome {
    #[must_use]
    pub fn new(parameters: Vec<f32>) -> Self {
        Self {
            parameters,
            fitness: 0.0,
        }
    }

    #[must_use]
    pub fn with_fitness(parameters: Vec<f32>, fitness: f32) -> Self {
        Self {
            parameters,
            fitness,
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.parameters.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.parameters.is_empty()
    }
}

/// The fixed-size set of genomes evaluated within one generation.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Default)]
pub struct Population {
    pub genomes: Vec<Genome>,
    /// Number of generations produced so far (0 for the random first generation).
    pub generation: u64,
    /// Set while the population still holds its randomly initialized genomes.
    pub first_generation: bool,
    /// Parameter count every genome in this run must have.
    pub parameter_length: usize,
}

impl Population {
    #[must_use]
    pub fn len(&self) -> usize {
        self.genomes.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.genomes.is_empty()
    }
}
