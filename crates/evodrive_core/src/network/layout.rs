//! Flat parameter layout.
//!
//! Order: input→hidden weights (input-major), hidden biases,
//! hidden→output weights (hidden-major), output biases.

use super::Network;
use crate::error::{EvolutionError, Result};

impl Network {
    /// Reconstructs all weights and biases from `flat`.
    ///
    /// Values past the topology's parameter count are ignored. On error the
    /// network is left untouched.
    pub fn load_parameters(&mut self, flat: &[f32]) -> Result<()> {
        let expected = self.parameter_count();
        if flat.len() < expected {
            return Err(EvolutionError::shape(expected, flat.len()));
        }

        let mut rest = flat;
        for section in [
            &mut self.weights_ih,
            &mut self.biases_h,
            &mut self.weights_ho,
            &mut self.biases_o,
        ] {
            let (head, tail) = rest.split_at(section.len());
            section.copy_from_slice(head);
            rest = tail;
        }
        Ok(())
    }

    /// Flattens the network back into canonical order.
    #[must_use]
    pub fn export_parameters(&self) -> Vec<f32> {
        let mut flat = Vec::with_capacity(self.parameter_count());
        flat.extend_from_slice(&self.weights_ih);
        flat.extend_from_slice(&self.biases_h);
        flat.extend_from_slice(&self.weights_ho);
        flat.extend_from_slice(&self.biases_o);
        flat
    }

    /// Weight from input `i` to hidden unit `h`.
    #[must_use]
    pub fn weight_ih(&self, i: usize, h: usize) -> f32 {
        self.weights_ih[i * self.topology.hidden_size + h]
    }

    /// Weight from hidden unit `h` to output `o`.
    #[must_use]
    pub fn weight_ho(&self, h: usize, o: usize) -> f32 {
        self.weights_ho[h * self.topology.output_size + o]
    }
}
