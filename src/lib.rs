//! Headless host for evolving a vehicle-control policy.
//!
//! The training engine lives in `evodrive_core`; this crate supplies a
//! simple corridor [`track::Track`] environment and the train/replay/history commands
//! behind the `evodrive` binary.

pub mod app;
pub mod track;

pub use app::{history, replay, train, ReplayResult, TrainingRun};
pub use track::{Track, TrackConfig};
