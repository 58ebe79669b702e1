use serde::{Serialize, Deserialize};

use crate::error::{Error, Result};
use crate::train::callbacks::{EarlyStopping, ReduceLrOnPlateau};

/// Configuration for a `fit` run.
///
/// # Fields
/// - `epochs`           — upper bound on full passes over the training split
/// - `batch_size`       — samples per mini-batch; use `1` for online SGD
/// - `validation_split` — trailing fraction of the dataset held out for validation
/// - `shuffle`          — reshuffle the training split every epoch
/// - `seed`             — seeds the shuffle order
/// - `early_stopping`   — stop once the monitored loss stops improving
/// - `reduce_lr`        — shrink the learning rate on a plateau
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrainConfig {
    pub epochs: usize,
    pub batch_size: usize,
    pub validation_split: f64,
    pub shuffle: bool,
    pub seed: u64,
    pub early_stopping: Option<EarlyStopping>,
    pub reduce_lr: Option<ReduceLrOnPlateau>,
}

impl Default for TrainConfig {
    fn default() -> Self {
        TrainConfig {
            epochs: 100,
            batch_size: 64,
            validation_split: 0.2,
            shuffle: true,
            seed: 7,
            early_stopping: Some(EarlyStopping::default()),
            reduce_lr: Some(ReduceLrOnPlateau::default()),
        }
    }
}

impl TrainConfig {
    /// A plain run: no validation, no callbacks.
    pub fn new(epochs: usize, batch_size: usize) -> Self {
        TrainConfig {
            epochs,
            batch_size,
            validation_split: 0.0,
            early_stopping: None,
            reduce_lr: None,
            ..TrainConfig::default()
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.epochs == 0 {
            return Err(Error::invalid("epochs", self.epochs, "must be at least 1"));
        }
        if self.batch_size == 0 {
            return Err(Error::invalid("batch_size", self.batch_size, "must be at least 1"));
        }
        if !(0.0..1.0).contains(&self.validation_split) {
            return Err(Error::invalid("validation_split", self.validation_split, "must be in [0, 1)"));
        }
        if let Some(rl) = &self.reduce_lr {
            if !(rl.factor > 0.0 && rl.factor < 1.0) {
                return Err(Error::invalid("reduce_lr.factor", rl.factor, "must be in (0, 1)"));
            }
        }
        Ok(())
    }
}
