use super::FitnessShaping;
use crate::error::{EvolutionError, Result};
use evodrive_data::{Genome, Population};
use rand::Rng;

fn sort_key(fitness: f32) -> f32 {
    if fitness.is_nan() {
        f32::NEG_INFINITY
    } else {
        fitness
    }
}

/// Returns the `k` fittest genomes, best first.
///
/// The sort is stable, so equally fit genomes keep their slot order. NaN
/// fitness ranks below everything else.
pub fn select_top(population: &Population, k: usize) -> Result<Vec<Genome>> {
    let n = population.len();
    if k == 0 || k > n {
        return Err(EvolutionError::invalid_argument(format!(
            "Selection count {k} must be in [1, {n}]"
        )));
    }

    let mut ranked: Vec<&Genome> = population.genomes.iter().collect();
    ranked.sort_by(|a, b| sort_key(b.fitness).total_cmp(&sort_key(a.fitness)));
    Ok(ranked.into_iter().take(k).cloned().collect())
}

/// Share of the fitness range the weakest parent keeps after shifting.
pub const SHIFT_FLOOR: f32 = 0.1;

/// Fitness-proportionate selection probabilities for `parents`.
///
/// Raw fitness is used when every value is non-negative and the total is
/// positive. Otherwise `shaping` decides. `Shift` moves every value so the
/// weakest parent sits at `SHIFT_FLOOR` of the fitness range above zero.
/// `Uniform` ignores fitness. A shifted distribution that still sums to zero
/// (all parents equal) becomes uniform.
#[must_use]
pub fn selection_probabilities(parents: &[Genome], shaping: FitnessShaping) -> Vec<f32> {
    if parents.is_empty() {
        return Vec::new();
    }

    let raw: Vec<f32> = parents.iter().map(|g| sort_key(g.fitness)).collect();
    let total: f32 = raw.iter().sum();
    let well_formed = raw.iter().all(|&f| f >= 0.0 && f.is_finite()) && total > 0.0;

    let weights = if well_formed {
        raw
    } else {
        match shaping {
            FitnessShaping::Shift => {
                let finite = || raw.iter().copied().filter(|f| f.is_finite());
                let min = finite().fold(f32::INFINITY, f32::min);
                let max = finite().fold(f32::NEG_INFINITY, f32::max);
                let base = min - (max - min) * SHIFT_FLOOR;
                raw.iter()
                    .map(|&f| if f.is_finite() { f - base } else { 0.0 })
                    .collect()
            }
            FitnessShaping::Uniform => vec![1.0; parents.len()],
        }
    };

    let total: f32 = weights.iter().sum();
    if total > 0.0 && total.is_finite() {
        weights.iter().map(|w| w / total).collect()
    } else {
        vec![1.0 / parents.len() as f32; parents.len()]
    }
}

/// Draws an index from `probabilities` by walking the cumulative sum.
///
/// Falls back to index 0 when rounding leaves the draw above the final
/// cumulative value.
pub fn roulette_pick<R: Rng>(probabilities: &[f32], rng: &mut R) -> usize {
    let draw: f32 = rng.gen();
    let mut cumulative = 0.0;
    for (i, &p) in probabilities.iter().enumerate() {
        cumulative += p;
        if cumulative >= draw {
            return i;
        }
    }
    0
}
