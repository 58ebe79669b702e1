//! Parameter update rules.

pub mod sgd;
pub mod adam;

use serde::{Serialize, Deserialize};

use crate::{error::{Error, Result}, layers::dense::Layer, math::matrix::Matrix};

pub use sgd::Sgd;
pub use adam::Adam;

/// A rule that turns averaged gradients into parameter updates.
///
/// `layer_index` identifies the layer so stateful optimizers can keep
/// per-layer statistics.
pub trait Optimizer {
    fn step(&mut self, layer_index: usize, layer: &mut Layer, weights_grad: &Matrix, biases_grad: &Matrix);

    fn learning_rate(&self) -> f64;

    fn set_learning_rate(&mut self, lr: f64);

    /// Drops any accumulated state, e.g. before fitting another network.
    fn reset(&mut self);
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum OptimizerConfig {
    Sgd { learning_rate: f64 },
    Adam {
        learning_rate: f64,
        #[serde(default = "default_beta1")]
        beta1: f64,
        #[serde(default = "default_beta2")]
        beta2: f64,
        #[serde(default = "default_epsilon")]
        epsilon: f64,
    },
}

fn default_beta1() -> f64 { 0.9 }
fn default_beta2() -> f64 { 0.999 }
fn default_epsilon() -> f64 { 1e-7 }

impl Default for OptimizerConfig {
    fn default() -> Self {
        OptimizerConfig::Adam {
            learning_rate: 1e-3,
            beta1: default_beta1(),
            beta2: default_beta2(),
            epsilon: default_epsilon(),
        }
    }
}

impl OptimizerConfig {
    pub fn learning_rate(&self) -> f64 {
        match *self {
            OptimizerConfig::Sgd { learning_rate } => learning_rate,
            OptimizerConfig::Adam { learning_rate, .. } => learning_rate,
        }
    }

    pub fn build(&self) -> Result<Box<dyn Optimizer>> {
        let lr = self.learning_rate();
        if !(lr.is_finite() && lr > 0.0) {
            return Err(Error::invalid("learning_rate", lr, "must be positive and finite"));
        }
        Ok(match *self {
            OptimizerConfig::Sgd { learning_rate } => Box::new(Sgd::new(learning_rate)),
            OptimizerConfig::Adam { learning_rate, beta1, beta2, epsilon } => {
                Box::new(Adam::new(learning_rate, beta1, beta2, epsilon))
            }
        })
    }
}
