//! Configuration management for training runs.
//!
//! Strongly-typed configuration structures that map to a `config.toml`
//! file. Every section has defaults, so a file only needs the values it
//! overrides.
//!
//! ## Example `config.toml`
//!
//! ```toml
//! seed = 42
//!
//! [network]
//! hidden_size = 64
//! output_size = 8
//!
//! [evolution]
//! population_size = 20
//! top_k = 2
//! mutation_rate = 0.05
//!
//! [episode]
//! max_episode_time = 5.0
//! ```

use crate::error::{ensure_arg, Result};
use crate::evolution::{CrossoverStrategy, FitnessShaping};
use crate::network::Topology;
use serde::{Deserialize, Serialize};

/// Policy network shape.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct NetworkConfig {
    pub hidden_size: usize,
    /// Number of discrete actions.
    pub output_size: usize,
    /// Sensing rays; each contributes a distance and a surface tag.
    pub ray_count: usize,
    /// Append the vehicle speed after the sensor frame.
    pub include_speed: bool,
}

impl Default for NetworkConfig {
    fn default() -> Self {
        Self {
            hidden_size: 64,
            output_size: 3,
            ray_count: 8,
            include_speed: true,
        }
    }
}

impl NetworkConfig {
    #[must_use]
    pub fn input_size(&self) -> usize {
        self.ray_count * 2 + usize::from(self.include_speed)
    }

    pub fn topology(&self) -> Result<Topology> {
        Topology::new(self.input_size(), self.hidden_size, self.output_size)
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct EvolutionConfig {
    pub population_size: usize,
    /// Parents kept for roulette selection each generation.
    pub top_k: usize,
    pub mutation_rate: f32,
    pub crossover: CrossoverStrategy,
    pub fitness_shaping: FitnessShaping,
}

impl Default for EvolutionConfig {
    fn default() -> Self {
        Self {
            population_size: 20,
            top_k: 2,
            mutation_rate: 0.05,
            crossover: CrossoverStrategy::Alternating,
            fitness_shaping: FitnessShaping::Shift,
        }
    }
}

/// Trial length and fitness event weights.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct EpisodeConfig {
    /// Seconds before a trial times out.
    pub max_episode_time: f64,
    pub milestone_reward: f32,
    pub boundary_penalty: f32,
    pub timeout_penalty: f32,
    /// Restart the episode timer whenever a milestone is reached.
    pub reset_timer_on_milestone: bool,
}

impl Default for EpisodeConfig {
    fn default() -> Self {
        Self {
            max_episode_time: 5.0,
            milestone_reward: 4.0,
            boundary_penalty: 5.0,
            timeout_penalty: 5.0,
            reset_timer_on_milestone: false,
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct StorageConfig {
    pub enabled: bool,
    pub directory: String,
    /// File stem prefix; the generation number is appended.
    pub file_prefix: String,
    /// JSON-lines file receiving one summary per generation.
    pub history_file: Option<String>,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            directory: "weights".to_string(),
            file_prefix: "best_generation_".to_string(),
            history_file: None,
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default)]
#[serde(default)]
pub struct AppConfig {
    pub network: NetworkConfig,
    pub evolution: EvolutionConfig,
    pub episode: EpisodeConfig,
    pub storage: StorageConfig,
    /// Seed for the run's random source; entropy when absent.
    pub seed: Option<u64>,
}

impl AppConfig {
    /// Validates all configuration parameters.
    ///
    /// Returns `InvalidArgument` describing the first value outside its domain.
    pub fn validate(&self) -> Result<()> {
        self.network.topology()?;

        let evolution = &self.evolution;
        ensure_arg(
            evolution.population_size > 0,
            "Population size must be positive",
        )?;
        ensure_arg(
            evolution.top_k >= 1 && evolution.top_k <= evolution.population_size,
            "Selection count must be in [1, population_size]",
        )?;
        ensure_arg(
            (0.0..=1.0).contains(&evolution.mutation_rate),
            "Mutation rate must be in [0.0, 1.0]",
        )?;

        let episode = &self.episode;
        ensure_arg(
            episode.max_episode_time > 0.0 && episode.max_episode_time.is_finite(),
            "Max episode time must be positive",
        )?;
        ensure_arg(
            episode.milestone_reward.is_finite()
                && episode.boundary_penalty.is_finite()
                && episode.timeout_penalty.is_finite(),
            "Fitness weights must be finite",
        )?;

        if self.storage.enabled {
            ensure_arg(
                !self.storage.directory.trim().is_empty(),
                "Storage directory must not be empty",
            )?;
        }
        Ok(())
    }

    /// Parses and validates a TOML document.
    pub fn from_toml(content: &str) -> anyhow::Result<Self> {
        let config = toml::from_str::<Self>(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads `path`, falling back to defaults when the file does not exist.
    pub fn load(path: &str) -> anyhow::Result<Self> {
        match std::fs::read_to_string(path) {
            Ok(content) => Self::from_toml(&content),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::warn!(path, "Config file not found, using defaults");
                Ok(Self::default())
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Stable digest of every tunable that affects training outcomes.
    #[must_use]
    pub fn fingerprint(&self) -> String {
        use sha2::{Digest, Sha256};
        let mut hasher = Sha256::new();
        hasher.update(format!("{:?}", self.network).as_bytes());
        hasher.update(format!("{:?}", self.evolution).as_bytes());
        hasher.update(format!("{:?}", self.episode).as_bytes());
        hasher.update(format!("{:?}", self.seed).as_bytes());
        hex::encode(hasher.finalize())
    }
}
