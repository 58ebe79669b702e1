pub mod dataset;
pub mod generator;

pub use dataset::{Column, ColumnStats, Dataset, Sample};
pub use generator::{generate, DataConfig};
