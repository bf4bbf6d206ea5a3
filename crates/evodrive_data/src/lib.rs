//! Plain data types shared by the evodrive crates.
//!
//! Everything here is serializable state with no behaviour beyond
//! construction and simple accessors. Training logic lives in
//! `evodrive_core`, persistence in `evodrive_io`.

pub mod data;

pub use data::action::{ActionTable, ControlCommand};
pub use data::genome::{Genome, Population};
pub use data::sensor::{RayHit, SurfaceTag};
pub use data::stats::GenerationSummary;
