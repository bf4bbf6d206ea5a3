use anyhow::{anyhow, ensure, Context, Result};
use evodrive_core::config::AppConfig;
use evodrive_core::trainer::evaluate;
use evodrive_core::{EpisodeEnd, Environment, Network, Trainer, TrainingMetrics};
use evodrive_data::GenerationSummary;
use evodrive_io::{read_history, GenerationLogger, WeightStore};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use crate::track::Track;

/// Result of a finished training run.
#[derive(Debug, Clone)]
pub struct TrainingRun {
    pub history: Vec<GenerationSummary>,
    pub metrics: TrainingMetrics,
}

/// Result of replaying one stored generation.
#[derive(Debug, Clone, PartialEq)]
pub struct ReplayResult {
    pub generation: u64,
    pub fitness: f32,
    pub elapsed: f64,
    pub cause: EpisodeEnd,
}

fn rng_for(config: &AppConfig) -> ChaCha8Rng {
    match config.seed {
        Some(seed) => ChaCha8Rng::seed_from_u64(seed),
        None => ChaCha8Rng::from_entropy(),
    }
}

/// Trains on the headless track until `generations` generations completed.
pub fn train(config: &AppConfig, generations: u64, dt: f64) -> Result<TrainingRun> {
    let mut track = Track::from_app_config(config)?;
    train_in(config, generations, dt, &mut track)
}

/// Trains against any environment, persisting per the storage settings.
pub fn train_in<E: Environment>(
    config: &AppConfig,
    generations: u64,
    dt: f64,
    env: &mut E,
) -> Result<TrainingRun> {
    ensure!(dt > 0.0 && dt.is_finite(), "Tick duration must be positive");
    tracing::info!(
        fingerprint = %config.fingerprint(),
        generations,
        population = config.evolution.population_size,
        "Starting training"
    );

    let mut trainer = Trainer::new(config, rng_for(config))?;
    // Storage problems cost the archive, never the run.
    if config.storage.enabled {
        match WeightStore::from_config(&config.storage) {
            Ok(store) => trainer = trainer.with_archive(store),
            Err(e) => tracing::warn!(
                directory = %config.storage.directory,
                error = %e,
                "Weight store unavailable, training without archiving"
            ),
        }
    }
    if let Some(path) = &config.storage.history_file {
        match GenerationLogger::new_at(path) {
            Ok(logger) => trainer = trainer.with_archive(logger),
            Err(e) => tracing::warn!(
                path = %path,
                error = %e,
                "History file unavailable, training without history log"
            ),
        }
    }

    trainer.start(env)?;
    let mut metrics = TrainingMetrics::new();
    while metrics.generations() < generations {
        let outcome = trainer.tick(dt, env)?;
        metrics.record(&outcome);
    }

    tracing::info!(
        generations = metrics.generations(),
        episodes = metrics.episodes(),
        best_fitness = metrics.best_fitness().unwrap_or(f32::NAN),
        elapsed_ms = metrics.elapsed().as_millis() as u64,
        "Training finished"
    );
    Ok(TrainingRun {
        history: trainer.history().to_vec(),
        metrics,
    })
}

/// Runs one trial on the headless track with stored weights.
///
/// Without an explicit generation the most recent stored one is used.
pub fn replay(config: &AppConfig, generation: Option<u64>, dt: f64) -> Result<ReplayResult> {
    let mut track = Track::from_app_config(config)?;
    replay_in(config, generation, dt, &mut track)
}

pub fn replay_in<E: Environment>(
    config: &AppConfig,
    generation: Option<u64>,
    dt: f64,
    env: &mut E,
) -> Result<ReplayResult> {
    config.validate()?;
    let store = WeightStore::from_config(&config.storage)?;
    let generation = match generation {
        Some(g) => g,
        None => store
            .latest_generation()?
            .ok_or_else(|| anyhow!("No stored generations in {}", store.directory().display()))?,
    };
    let weights = store
        .load(generation)?
        .ok_or_else(|| anyhow!("No weights stored for generation {generation}"))?;

    let mut network = Network::from_parameters(config.network.topology()?, &weights)
        .with_context(|| format!("Weights of generation {generation} do not fit the network"))?;
    let (fitness, elapsed, cause) = evaluate(
        &mut network,
        config.network.include_speed,
        &config.episode,
        dt,
        env,
    )?;

    tracing::info!(generation, fitness, elapsed, ?cause, "Replay finished");
    Ok(ReplayResult {
        generation,
        fitness,
        elapsed,
        cause,
    })
}

/// Summaries recorded in the configured history file, oldest first.
pub fn history(config: &AppConfig) -> Result<Vec<GenerationSummary>> {
    let path = config
        .storage
        .history_file
        .as_deref()
        .ok_or_else(|| anyhow!("No history file configured"))?;
    read_history(path).with_context(|| format!("Failed to read history from {path}"))
}
