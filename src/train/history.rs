use serde::{Serialize, Deserialize};
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

use crate::error::Result;
use crate::train::epoch_stats::EpochStats;

/// Everything `fit` learned about one run.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct History {
    pub epochs: Vec<EpochStats>,
    /// Set when early stopping cut the run short.
    pub stopped_early: bool,
    /// 1-based epoch with the lowest monitored loss.
    pub best_epoch: Option<usize>,
    /// Whether the network was rolled back to `best_epoch`.
    pub restored_best: bool,
}

impl History {
    pub fn len(&self) -> usize {
        self.epochs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.epochs.is_empty()
    }

    pub fn final_stats(&self) -> Option<&EpochStats> {
        self.epochs.last()
    }

    pub fn best_stats(&self) -> Option<&EpochStats> {
        let best = self.best_epoch?;
        self.epochs.iter().find(|s| s.epoch == best)
    }

    pub fn best_val_loss(&self) -> Option<f64> {
        self.epochs.iter()
            .filter_map(|s| s.val_loss)
            .min_by(|a, b| a.total_cmp(b))
    }

    pub fn train_losses(&self) -> Vec<f64> {
        self.epochs.iter().map(|s| s.train_loss).collect()
    }

    /// Serializes the history to a pretty-printed JSON file.
    pub fn write_json(&self, path: &Path) -> Result<()> {
        let file = File::create(path)?;
        let writer = BufWriter::new(file);
        serde_json::to_writer_pretty(writer, self)?;
        Ok(())
    }
}
