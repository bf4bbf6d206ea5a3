pub mod action;
pub mod genome;
pub mod sensor;
pub mod stats;
