//! # evodrive Core
//!
//! The training engine: a fixed-topology policy network whose weights are
//! evolved by a genetic algorithm over repeated timed trials.
//!
//! This crate contains:
//! - A two-layer feedforward network with a canonical flat weight layout
//! - Top-k roulette selection, alternating crossover and uniform mutation
//! - Population lifecycle (random init, result recording, replacement)
//! - The tick-driven trainer state machine that ties trials to evolution
//! - Configuration, error types and logging setup
//!
//! Everything is single-threaded and deterministic for a given seed.
//!
//! ## Example
//!
//! ```
//! use evodrive_core::network::{Network, Topology};
//!
//! let topology = Topology::new(2, 2, 2).unwrap();
//! let flat = vec![0.5; topology.parameter_count()];
//! let mut network = Network::from_parameters(topology, &flat).unwrap();
//! assert_eq!(network.export_parameters(), flat);
//! let action = network.infer(&[1.0, -1.0]).unwrap();
//! assert!(action < 2);
//! ```

/// Persistence seam for best genomes and generation statistics
pub mod archive;
/// Configuration management for training parameters
pub mod config;
/// Simulation collaborator interface
pub mod environment;
/// Error taxonomy shared by all training components
pub mod error;
/// Selection, crossover and mutation
pub mod evolution;
/// Run counters and logging initialization
pub mod metrics;
/// Feedforward policy network
pub mod network;
/// Population lifecycle operations
pub mod population;
/// Episode state machine
pub mod trainer;

pub use archive::{GenomeArchive, MemoryArchive};
pub use config::AppConfig;
pub use environment::{EnvEvent, Environment};
pub use error::{EvolutionError, Result};
pub use evolution::Evolver;
pub use metrics::{init_logging, TrainingMetrics};
pub use network::{Network, Topology};
pub use population::PopulationLogic;
pub use trainer::{EpisodeEnd, EpisodeReport, TickOutcome, Trainer, TrainerState};
