use crate::{math::matrix::Matrix, layers::dense::Layer, optim::Optimizer};

/// Vanilla mini-batch gradient descent: `θ ← θ - lr · ∇θ`.
pub struct Sgd {
    pub learning_rate: f64,
}

impl Sgd {
    pub fn new(learning_rate: f64) -> Sgd {
        Sgd { learning_rate }
    }
}

impl Optimizer for Sgd {
    fn step(&mut self, _layer_index: usize, layer: &mut Layer, weights_grad: &Matrix, biases_grad: &Matrix) {
        let lr = self.learning_rate;
        for (w, g) in layer.weights.iter_mut().zip(weights_grad.iter()) {
            *w -= lr * g;
        }
        for (b, g) in layer.biases.iter_mut().zip(biases_grad.iter()) {
            *b -= lr * g;
        }
    }

    fn learning_rate(&self) -> f64 {
        self.learning_rate
    }

    fn set_learning_rate(&mut self, lr: f64) {
        self.learning_rate = lr;
    }

    fn reset(&mut self) {}
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::activation::activation::ActivationFunction;

    #[test]
    fn sgd_moves_against_gradient() {
        let mut layer = Layer::with_params(
            Matrix::from_data(vec![vec![1.0], vec![1.0]]),
            Matrix::row(vec![0.0]),
            ActivationFunction::Identity,
        );
        let mut sgd = Sgd::new(0.5);
        sgd.step(
            0,
            &mut layer,
            &Matrix::from_data(vec![vec![2.0], vec![-2.0]]),
            &Matrix::row(vec![1.0]),
        );
        assert_eq!(layer.weights.data, vec![vec![0.0], vec![2.0]]);
        assert_eq!(layer.biases.data, vec![vec![-0.5]]);
    }
}
