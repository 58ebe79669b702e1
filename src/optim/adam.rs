//! Adam (adaptive moment estimation) optimizer.

use crate::{layers::dense::Layer, math::matrix::Matrix, optim::Optimizer};

/// First and second moment estimates for one layer.
struct Moments {
    m_w: Matrix,
    v_w: Matrix,
    m_b: Matrix,
    v_b: Matrix,
    t: i32,
}

impl Moments {
    fn for_layer(layer: &Layer) -> Moments {
        Moments {
            m_w: Matrix::zeros(layer.weights.rows, layer.weights.cols),
            v_w: Matrix::zeros(layer.weights.rows, layer.weights.cols),
            m_b: Matrix::zeros(layer.biases.rows, layer.biases.cols),
            v_b: Matrix::zeros(layer.biases.rows, layer.biases.cols),
            t: 0,
        }
    }
}

/// Adam keeps, per parameter, an exponential average of the gradient (`m`)
/// and of its square (`v`), and updates with the bias-corrected ratio:
///
/// ```text
/// m_t = β1 · m + (1 - β1) · g
/// v_t = β2 · v + (1 - β2) · g²
/// θ  -= lr · m̂ / (√v̂ + ε)
/// ```
pub struct Adam {
    learning_rate: f64,
    beta1: f64,
    beta2: f64,
    epsilon: f64,
    state: Vec<Option<Moments>>,
}

impl Adam {
    pub fn new(learning_rate: f64, beta1: f64, beta2: f64, epsilon: f64) -> Adam {
        Adam {
            learning_rate,
            beta1,
            beta2,
            epsilon,
            state: Vec::new(),
        }
    }

    /// Kingma & Ba defaults (β1 = 0.9, β2 = 0.999, ε = 1e-7 as in Keras).
    pub fn with_learning_rate(learning_rate: f64) -> Adam {
        Adam::new(learning_rate, 0.9, 0.999, 1e-7)
    }

    fn update(
        params: &mut Matrix,
        grads: &Matrix,
        m: &mut Matrix,
        v: &mut Matrix,
        (lr, beta1, beta2, epsilon): (f64, f64, f64, f64),
        (bias_correction1, bias_correction2): (f64, f64),
    ) {
        for (((p, g), m_i), v_i) in params.iter_mut()
            .zip(grads.iter())
            .zip(m.iter_mut())
            .zip(v.iter_mut())
        {
            *m_i = beta1 * *m_i + (1.0 - beta1) * g;
            *v_i = beta2 * *v_i + (1.0 - beta2) * g * g;
            let m_hat = *m_i / bias_correction1;
            let v_hat = *v_i / bias_correction2;
            *p -= lr * m_hat / (v_hat.sqrt() + epsilon);
        }
    }
}

impl Optimizer for Adam {
    fn step(&mut self, layer_index: usize, layer: &mut Layer, weights_grad: &Matrix, biases_grad: &Matrix) {
        if self.state.len() <= layer_index {
            self.state.resize_with(layer_index + 1, || None);
        }
        let moments = self.state[layer_index].get_or_insert_with(|| Moments::for_layer(layer));
        moments.t += 1;

        let hyper = (self.learning_rate, self.beta1, self.beta2, self.epsilon);
        let corrections = (
            1.0 - self.beta1.powi(moments.t),
            1.0 - self.beta2.powi(moments.t),
        );

        Adam::update(&mut layer.weights, weights_grad, &mut moments.m_w, &mut moments.v_w, hyper, corrections);
        Adam::update(&mut layer.biases, biases_grad, &mut moments.m_b, &mut moments.v_b, hyper, corrections);
    }

    fn learning_rate(&self) -> f64 {
        self.learning_rate
    }

    fn set_learning_rate(&mut self, lr: f64) {
        self.learning_rate = lr;
    }

    fn reset(&mut self) {
        self.state.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::activation::activation::ActivationFunction;
    use approx::assert_relative_eq;

    #[test]
    fn first_step_moves_by_learning_rate() {
        // With bias correction the first update is lr · g / (|g| + ε) ≈ lr · sign(g).
        let mut layer = Layer::with_params(
            Matrix::from_data(vec![vec![1.0], vec![1.0]]),
            Matrix::row(vec![0.0]),
            ActivationFunction::Identity,
        );
        let mut adam = Adam::with_learning_rate(0.01);
        adam.step(
            0,
            &mut layer,
            &Matrix::from_data(vec![vec![5.0], vec![-0.2]]),
            &Matrix::row(vec![3.0]),
        );
        assert_relative_eq!(layer.weights.data[0][0], 0.99, epsilon = 1e-6);
        assert_relative_eq!(layer.weights.data[1][0], 1.01, epsilon = 1e-6);
        assert_relative_eq!(layer.biases.data[0][0], -0.01, epsilon = 1e-6);
    }

    #[test]
    fn reset_clears_moments() {
        let mut layer = Layer::with_params(
            Matrix::from_data(vec![vec![0.0]]),
            Matrix::row(vec![0.0]),
            ActivationFunction::Identity,
        );
        let mut adam = Adam::with_learning_rate(0.1);
        adam.step(2, &mut layer, &Matrix::row(vec![1.0]), &Matrix::row(vec![1.0]));
        assert_eq!(adam.state.len(), 3);
        adam.reset();
        assert!(adam.state.is_empty());
    }
}
