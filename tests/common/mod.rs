#![allow(dead_code)]

use evodrive_core::config::{AppConfig, EpisodeConfig, EvolutionConfig, NetworkConfig, StorageConfig};
use evodrive_core::{EnvEvent, Environment, EvolutionError, Result};
use evodrive_data::{Genome, Population};
use std::collections::VecDeque;

/// One scripted tick of a [`ScriptedEnv`].
#[derive(Debug, Clone)]
pub enum Step {
    Quiet,
    Events(Vec<EnvEvent>),
    Fail,
    /// Fails with a non-environment error variant.
    Reject,
}

/// Environment that replays a fixed script, one step per action.
///
/// Once the script runs out every tick is quiet.
#[derive(Debug, Default)]
pub struct ScriptedEnv {
    pub input_size: usize,
    pub script: VecDeque<Step>,
    pub actions: Vec<usize>,
    pub resets: usize,
}

impl ScriptedEnv {
    pub fn new(input_size: usize) -> Self {
        Self {
            input_size,
            ..Default::default()
        }
    }

    pub fn then(mut self, step: Step) -> Self {
        self.script.push_back(step);
        self
    }

    pub fn quiet_for(mut self, ticks: usize) -> Self {
        for _ in 0..ticks {
            self.script.push_back(Step::Quiet);
        }
        self
    }
}

impl Environment for ScriptedEnv {
    fn sensor_readings(&mut self) -> Result<Vec<f32>> {
        Ok((0..self.input_size).map(|i| i as f32 * 0.5 - 0.25).collect())
    }

    fn speed(&self) -> f32 {
        0.0
    }

    fn apply_action(&mut self, action: usize, _dt: f64) -> Result<Vec<EnvEvent>> {
        self.actions.push(action);
        match self.script.pop_front().unwrap_or(Step::Quiet) {
            Step::Quiet => Ok(Vec::new()),
            Step::Events(events) => Ok(events),
            Step::Fail => Err(EvolutionError::environment("scripted failure")),
            Step::Reject => Err(EvolutionError::invalid_argument("sensor unavailable")),
        }
    }

    fn reset_episode(&mut self) {
        self.resets += 1;
    }
}

/// 2-2-2 network, no speed input, three-second trials, no storage.
pub fn small_config(population_size: usize) -> AppConfig {
    AppConfig {
        network: NetworkConfig {
            hidden_size: 2,
            output_size: 2,
            ray_count: 1,
            include_speed: false,
        },
        evolution: EvolutionConfig {
            population_size,
            top_k: 2.min(population_size),
            ..Default::default()
        },
        episode: EpisodeConfig {
            max_episode_time: 3.0,
            ..Default::default()
        },
        storage: StorageConfig {
            enabled: false,
            ..Default::default()
        },
        seed: Some(42),
    }
}

/// Population whose genome `i` is filled with `i as f32` and scored `fitness[i]`.
pub fn population_with(fitness: &[f32], len: usize) -> Population {
    Population {
        genomes: fitness
            .iter()
            .enumerate()
            .map(|(i, &f)| Genome::with_fitness(vec![i as f32; len], f))
            .collect(),
        generation: 0,
        first_generation: false,
        parameter_length: len,
    }
}

/// Fresh directory under the system temp dir.
pub fn temp_dir(name: &str) -> std::path::PathBuf {
    let dir = std::env::temp_dir().join(format!("evodrive_it_{name}"));
    let _ = std::fs::remove_dir_all(&dir);
    dir
}
