//! End-of-epoch monitors: early stopping and learning-rate reduction on plateau.
//!
//! Both watch one scalar per epoch (validation loss when a validation split
//! exists, otherwise training loss). An epoch counts as an improvement when
//! `loss < best - min_delta`.

use serde::{Serialize, Deserialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EarlyStopping {
    /// Epochs without improvement tolerated before stopping.
    pub patience: usize,
    pub min_delta: f64,
    /// Roll the network back to the best epoch's parameters when training ends.
    pub restore_best_weights: bool,
}

impl Default for EarlyStopping {
    fn default() -> Self {
        EarlyStopping {
            patience: 10,
            min_delta: 0.0,
            restore_best_weights: true,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReduceLrOnPlateau {
    /// Multiplier applied to the learning rate, in (0, 1).
    pub factor: f64,
    pub patience: usize,
    pub min_delta: f64,
    /// Epochs to wait after a reduction before counting again.
    pub cooldown: usize,
    pub min_lr: f64,
}

impl Default for ReduceLrOnPlateau {
    fn default() -> Self {
        ReduceLrOnPlateau {
            factor: 0.5,
            patience: 5,
            min_delta: 1e-4,
            cooldown: 0,
            min_lr: 1e-6,
        }
    }
}

/// Tracks the best loss seen so far.
#[derive(Debug, Clone)]
pub struct EarlyStoppingMonitor {
    config: EarlyStopping,
    best: f64,
    best_epoch: Option<usize>,
    wait: usize,
}

impl EarlyStoppingMonitor {
    pub fn new(config: EarlyStopping) -> Self {
        EarlyStoppingMonitor {
            config,
            best: f64::INFINITY,
            best_epoch: None,
            wait: 0,
        }
    }

    /// Records one epoch. Returns `true` when training should stop.
    pub fn on_epoch_end(&mut self, epoch: usize, loss: f64) -> bool {
        if loss < self.best - self.config.min_delta {
            self.best = loss;
            self.best_epoch = Some(epoch);
            self.wait = 0;
            return false;
        }
        self.wait += 1;
        self.wait >= self.config.patience
    }

    /// Whether the last recorded epoch was a new best.
    pub fn improved_at(&self, epoch: usize) -> bool {
        self.best_epoch == Some(epoch)
    }

    pub fn best_epoch(&self) -> Option<usize> {
        self.best_epoch
    }

    pub fn best(&self) -> f64 {
        self.best
    }

    pub fn restores_best_weights(&self) -> bool {
        self.config.restore_best_weights
    }
}

/// Decides when to shrink the learning rate.
#[derive(Debug, Clone)]
pub struct PlateauMonitor {
    config: ReduceLrOnPlateau,
    best: f64,
    wait: usize,
    cooldown_left: usize,
}

impl PlateauMonitor {
    pub fn new(config: ReduceLrOnPlateau) -> Self {
        PlateauMonitor {
            config,
            best: f64::INFINITY,
            wait: 0,
            cooldown_left: 0,
        }
    }

    /// Records one epoch. Returns the new learning rate when it should change.
    pub fn on_epoch_end(&mut self, loss: f64, current_lr: f64) -> Option<f64> {
        if self.cooldown_left > 0 {
            self.cooldown_left -= 1;
            self.wait = 0;
        }

        if loss < self.best - self.config.min_delta {
            self.best = loss;
            self.wait = 0;
            return None;
        }

        if self.cooldown_left > 0 {
            return None;
        }

        self.wait += 1;
        if self.wait < self.config.patience {
            return None;
        }

        self.wait = 0;
        let reduced = (current_lr * self.config.factor).max(self.config.min_lr);
        if reduced < current_lr {
            self.cooldown_left = self.config.cooldown;
            Some(reduced)
        } else {
            None
        }
    }
}
