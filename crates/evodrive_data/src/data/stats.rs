use serde::{Deserialize, Serialize};

/// Fitness statistics of one fully evaluated generation.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Default)]
pub struct GenerationSummary {
    pub generation: u64,
    pub best_fitness: f32,
    pub mean_fitness: f32,
    pub worst_fitness: f32,
    /// Slot index of the best genome within its generation.
    pub best_index: usize,
    pub population_size: usize,
}
