use rand::Rng;

/// Range every freshly drawn parameter falls in.
pub const PARAMETER_RANGE: std::ops::RangeInclusive<f32> = -1.0..=1.0;

/// `len` independent uniform draws from [`PARAMETER_RANGE`].
pub fn random_parameters<R: Rng>(len: usize, rng: &mut R) -> Vec<f32> {
    (0..len).map(|_| rng.gen_range(PARAMETER_RANGE)).collect()
}

/// Replaces each parameter with a fresh draw with probability `rate`.
///
/// Returns the number of replaced values.
pub fn mutate<R: Rng>(parameters: &mut [f32], rate: f32, rng: &mut R) -> usize {
    let mut replaced = 0;
    for value in parameters.iter_mut() {
        if rng.gen::<f32>() < rate {
            *value = rng.gen_range(PARAMETER_RANGE);
            replaced += 1;
        }
    }
    replaced
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn test_random_parameters_in_range() {
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let params = random_parameters(500, &mut rng);
        assert_eq!(params.len(), 500);
        assert!(params.iter().all(|p| PARAMETER_RANGE.contains(p)));
    }

    #[test]
    fn test_zero_rate_is_identity() {
        let mut rng = ChaCha8Rng::seed_from_u64(2);
        let mut params = vec![5.0; 100];
        assert_eq!(mutate(&mut params, 0.0, &mut rng), 0);
        assert!(params.iter().all(|&p| p == 5.0));
    }

    #[test]
    fn test_full_rate_redraws_everything() {
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        let mut params = vec![5.0; 100];
        assert_eq!(mutate(&mut params, 1.0, &mut rng), 100);
        assert!(params.iter().all(|p| PARAMETER_RANGE.contains(p)));
    }

    #[test]
    fn test_default_rate_mutates_a_small_fraction() {
        let mut rng = ChaCha8Rng::seed_from_u64(4);
        let mut params = vec![5.0; 10_000];
        let replaced = mutate(&mut params, 0.05, &mut rng);
        assert!((350..650).contains(&replaced), "replaced {replaced}");
    }
}
