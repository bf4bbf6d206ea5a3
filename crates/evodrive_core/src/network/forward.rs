use super::Network;
use crate::error::{EvolutionError, Result};

impl Network {
    /// Runs one forward pass and returns the chosen action index.
    pub fn infer(&mut self, input: &[f32]) -> Result<usize> {
        self.forward(input)?;
        Ok(argmax(&self.output))
    }

    /// Runs one forward pass and returns the raw output layer.
    pub fn forward(&mut self, input: &[f32]) -> Result<&[f32]> {
        let inputs = self.topology.input_size;
        let hidden_size = self.topology.hidden_size;
        let outputs = self.topology.output_size;
        if input.len() != inputs {
            return Err(EvolutionError::shape(inputs, input.len()));
        }

        self.hidden.copy_from_slice(&self.biases_h);
        for (i, &x) in input.iter().enumerate() {
            let row = &self.weights_ih[i * hidden_size..(i + 1) * hidden_size];
            for (h, &w) in self.hidden.iter_mut().zip(row) {
                *h += x * w;
            }
        }
        relu(&mut self.hidden);

        self.output.copy_from_slice(&self.biases_o);
        for (j, &h) in self.hidden.iter().enumerate() {
            let row = &self.weights_ho[j * outputs..(j + 1) * outputs];
            for (o, &w) in self.output.iter_mut().zip(row) {
                *o += h * w;
            }
        }

        Ok(&self.output)
    }
}

pub fn relu(layer: &mut [f32]) {
    for v in layer {
        *v = v.max(0.0);
    }
}

/// Index of the largest value; the first one wins on ties.
#[must_use]
pub fn argmax(values: &[f32]) -> usize {
    let mut best = 0;
    for (i, &v) in values.iter().enumerate().skip(1) {
        if v > values[best] {
            best = i;
        }
    }
    best
}
