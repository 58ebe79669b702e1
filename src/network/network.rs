use rand::Rng;
use std::fmt::Write;

use crate::{layers::dense::Layer, math::matrix::Matrix, network::spec::NetworkSpec};

#[derive(Debug, Clone)]
pub struct Network {
    pub name: String,
    pub layers: Vec<Layer>,
}

impl Network {
    /// Builds a freshly initialised network from an architecture description.
    pub fn from_spec<R: Rng + ?Sized>(spec: &NetworkSpec, rng: &mut R) -> Network {
        let layers = spec.layer_shapes().into_iter()
            .map(|(size, input_size, activation)| Layer::new(size, input_size, activation, rng))
            .collect();
        Network { name: spec.name.clone(), layers }
    }

    pub fn input_size(&self) -> usize {
        self.layers.first().map_or(0, |layer| layer.input_size)
    }

    pub fn output_size(&self) -> usize {
        self.layers.last().map_or(0, |layer| layer.size)
    }

    /// Forward pass; stores activations in each layer for backprop.
    pub fn forward(&mut self, input: &[f64]) -> Matrix {
        let mut current = Matrix::row(input.to_vec());
        for layer in &mut self.layers {
            current = layer.feed_from(&current);
        }
        current
    }

    /// Inference-only forward pass.
    pub fn predict(&self, input: &[f64]) -> Vec<f64> {
        self.layers.iter()
            .fold(input.to_vec(), |current, layer| layer.predict(&current))
    }

    pub fn predict_pair(&self, x1: f64, x2: f64) -> f64 {
        self.predict(&[x1, x2])[0]
    }

    pub fn param_count(&self) -> usize {
        self.layers.iter().map(Layer::param_count).sum()
    }

    /// When every layer is linear the whole network is one affine map.
    /// Returns its input weights and intercept for a single-output network.
    pub fn collapse_linear(&self) -> Option<(Vec<f64>, f64)> {
        if self.output_size() != 1 || !self.layers.iter().all(|l| l.activator.is_linear()) {
            return None;
        }

        let mut weights = Matrix::from_data(
            (0..self.input_size())
                .map(|i| (0..self.input_size()).map(|j| if i == j { 1.0 } else { 0.0 }).collect())
                .collect(),
        );
        let mut bias = Matrix::zeros(1, self.input_size());

        for layer in &self.layers {
            bias = &(&bias * &layer.weights) + &layer.biases;
            weights = &weights * &layer.weights;
        }

        let input_weights = weights.data.iter().map(|row| row[0]).collect();
        Some((input_weights, bias.data[0][0]))
    }

    /// Keras-style table of layers, output shapes and parameter counts.
    pub fn summary(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "Model: \"{}\"", self.name);
        let _ = writeln!(out, "{:<12} {:<12} {:<10} {:>8}", "Layer", "Output", "Activation", "Params");
        for (i, layer) in self.layers.iter().enumerate() {
            let _ = writeln!(
                out,
                "{:<12} {:<12} {:<10} {:>8}",
                format!("dense_{}", i),
                format!("(None, {})", layer.size),
                layer.activator.to_string(),
                layer.param_count(),
            );
        }
        let _ = write!(out, "Total params: {}", self.param_count());
        out
    }
}
