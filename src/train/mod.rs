pub mod callbacks;
pub mod epoch_stats;
pub mod history;
pub mod train_config;
pub mod loop_fn;

pub use callbacks::{EarlyStopping, ReduceLrOnPlateau};
pub use epoch_stats::EpochStats;
pub use history::History;
pub use train_config::TrainConfig;
pub use loop_fn::{evaluate, fit, train_loop};
