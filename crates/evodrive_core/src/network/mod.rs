//! Two-layer feedforward policy network.
//!
//! The network is a pure function of its weights: `hidden = relu(x·W_ih + b_h)`,
//! `out = hidden·W_ho + b_o`, and the chosen action is the argmax of `out`.
//! Weights are reconstructed from a genome's flat parameter vector at the
//! start of every trial (see [`layout`] for the canonical order).

pub mod forward;
pub mod layout;

use crate::error::{ensure_arg, Result};
use serde::{Deserialize, Serialize};

/// Layer sizes of the policy network.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Topology {
    pub input_size: usize,
    pub hidden_size: usize,
    pub output_size: usize,
}

impl Topology {
    pub fn new(input_size: usize, hidden_size: usize, output_size: usize) -> Result<Self> {
        ensure_arg(input_size > 0, "Input size must be positive")?;
        ensure_arg(hidden_size > 0, "Hidden size must be positive")?;
        ensure_arg(output_size > 0, "Output size must be positive")?;
        Ok(Self {
            input_size,
            hidden_size,
            output_size,
        })
    }

    /// `I·H + H + H·O + O`.
    #[must_use]
    pub fn parameter_count(&self) -> usize {
        self.input_size * self.hidden_size
            + self.hidden_size
            + self.hidden_size * self.output_size
            + self.output_size
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Network {
    topology: Topology,
    /// Input→hidden weights, row-major `[input][hidden]`.
    weights_ih: Vec<f32>,
    biases_h: Vec<f32>,
    /// Hidden→output weights, row-major `[hidden][output]`.
    weights_ho: Vec<f32>,
    biases_o: Vec<f32>,
    // Scratch activations, fully overwritten by every inference call.
    hidden: Vec<f32>,
    output: Vec<f32>,
}

impl Network {
    /// A network with every weight and bias set to zero.
    #[must_use]
    pub fn new(topology: Topology) -> Self {
        let Topology {
            input_size: i,
            hidden_size: h,
            output_size: o,
        } = topology;
        Self {
            topology,
            weights_ih: vec![0.0; i * h],
            biases_h: vec![0.0; h],
            weights_ho: vec![0.0; h * o],
            biases_o: vec![0.0; o],
            hidden: vec![0.0; h],
            output: vec![0.0; o],
        }
    }

    /// Builds a network directly from a flat parameter sequence.
    pub fn from_parameters(topology: Topology, flat: &[f32]) -> Result<Self> {
        let mut network = Self::new(topology);
        network.load_parameters(flat)?;
        Ok(network)
    }

    #[must_use]
    pub fn topology(&self) -> Topology {
        self.topology
    }

    #[must_use]
    pub fn parameter_count(&self) -> usize {
        self.topology.parameter_count()
    }

    /// Output-layer values from the most recent inference call.
    #[must_use]
    pub fn last_outputs(&self) -> &[f32] {
        &self.output
    }
}
