use serde::{Serialize, Deserialize};

/// Per-epoch training statistics recorded by `fit`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EpochStats {
    /// 1-based epoch number.
    pub epoch: usize,
    /// Epoch budget for this run.
    pub total_epochs: usize,
    /// Mean squared error over the training split, accumulated while the epoch trained.
    pub train_loss: f64,
    /// Mean squared error over the validation split, if there is one.
    pub val_loss: Option<f64>,
    pub train_mae: f64,
    pub val_mae: Option<f64>,
    /// Learning rate the epoch was trained with.
    pub learning_rate: f64,
    /// Wall-clock duration of this single epoch in milliseconds.
    pub elapsed_ms: u64,
}

impl EpochStats {
    /// The loss the callbacks watch: validation when available, else training.
    pub fn monitored_loss(&self) -> f64 {
        self.val_loss.unwrap_or(self.train_loss)
    }
}
