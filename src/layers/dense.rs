use rand::Rng;

use crate::{math::matrix::Matrix, activation::activation::ActivationFunction};

/// A fully-connected layer: `a = act(x · W + b)`.
///
/// `weights` is `input_size x size`, `biases` is `1 x size`.
#[derive(Debug, Clone)]
pub struct Layer{
    pub size: usize,
    pub input_size: usize,
    pub neurons: Matrix,
    pre_neurons: Matrix,  // pre-activation values (z = xW + b) needed for correct derivative
    pub weights: Matrix,
    pub biases: Matrix,
    pub activator: ActivationFunction
}

impl Layer {
    /// Glorot-uniform weights and zero biases.
    pub fn new<R: Rng + ?Sized>(
        size: usize,
        input_size: usize,
        activation: ActivationFunction,
        rng: &mut R,
    ) -> Layer {
        Layer::with_params(
            Matrix::glorot_uniform(input_size, size, rng),
            Matrix::zeros(1, size),
            activation,
        )
    }

    /// Builds a layer from explicit parameters. Panics if the shapes disagree.
    pub fn with_params(weights: Matrix, biases: Matrix, activation: ActivationFunction) -> Layer {
        assert_eq!(biases.rows, 1, "biases must be a row vector");
        assert_eq!(weights.cols, biases.cols, "weights and biases disagree on layer size");

        Layer {
            size: weights.cols,
            input_size: weights.rows,
            neurons: Matrix::zeros(1, weights.cols),
            pre_neurons: Matrix::zeros(1, weights.cols),
            weights,
            biases,
            activator: activation
        }
    }

    /// Forward pass that caches z and a for the backward pass.
    pub fn feed_from(&mut self, input: &Matrix) -> Matrix {
        let z = &(input * &self.weights) + &self.biases;
        let a = z.map(|x| self.activator.function(x));
        self.pre_neurons = z;
        self.neurons = a.clone();
        a
    }

    /// Forward pass without touching the cache.
    pub fn predict(&self, input: &[f64]) -> Vec<f64> {
        (0..self.size)
            .map(|j| {
                let z = input.iter()
                    .zip(self.weights.data.iter())
                    .map(|(x, row)| x * row[j])
                    .sum::<f64>()
                    + self.biases.data[0][j];
                self.activator.function(z)
            })
            .collect()
    }

    /// Computes gradient adjustments. Returns (weights_grad, biases_grad).
    /// `next_layer_delta` is ∂L/∂a for this layer (error in activation space).
    pub fn compute_gradients(
        &self,
        next_layer_delta: &Matrix,
        inputs: &Matrix,
    ) -> (Matrix, Matrix) {
        let act_derivative = self.pre_neurons.map(|x| self.activator.derivative(x));
        // δ = error ⊙ σ'(z)
        let layer_delta = next_layer_delta.hadamard(&act_derivative);

        let weights_adjustment = &inputs.transpose() * &layer_delta;
        let biases_adjustment = layer_delta;

        (weights_adjustment, biases_adjustment)
    }

    pub fn param_count(&self) -> usize {
        self.weights.len() + self.biases.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn dense_one_over_two_inputs_has_three_params() {
        let mut rng = StdRng::seed_from_u64(0);
        let layer = Layer::new(1, 2, ActivationFunction::Identity, &mut rng);
        assert_eq!(layer.param_count(), 3);
        assert!(layer.biases.iter().all(|&b| b == 0.0));
    }

    #[test]
    fn predict_agrees_with_feed_from() {
        let mut rng = StdRng::seed_from_u64(11);
        let mut layer = Layer::new(4, 2, ActivationFunction::Tanh, &mut rng);
        let cached = layer.feed_from(&Matrix::row(vec![0.3, -1.2]));
        let pure = layer.predict(&[0.3, -1.2]);
        for (a, b) in cached.data[0].iter().zip(pure.iter()) {
            assert_relative_eq!(*a, *b, epsilon = 1e-12);
        }
    }

    #[test]
    fn gradients_of_linear_layer() {
        let weights = Matrix::from_data(vec![vec![2.0], vec![-1.0]]);
        let mut layer = Layer::with_params(weights, Matrix::row(vec![0.5]), ActivationFunction::Identity);
        let input = Matrix::row(vec![3.0, 4.0]);
        let out = layer.feed_from(&input);
        assert_relative_eq!(out.data[0][0], 2.5);

        let (w_grad, b_grad) = layer.compute_gradients(&Matrix::row(vec![1.0]), &input);
        assert_eq!(w_grad.data, vec![vec![3.0], vec![4.0]]);
        assert_eq!(b_grad.data, vec![vec![1.0]]);
    }
}
