pub mod math;
pub mod activation;
pub mod layers;
pub mod network;
pub mod loss;
pub mod optim;
pub mod train;
pub mod data;
pub mod eval;
pub mod error;
pub mod experiment;
pub mod logging;

// Convenience re-exports
pub use math::matrix::Matrix;
pub use activation::activation::ActivationFunction;
pub use layers::dense::Layer;
pub use network::{Network, NetworkSpec, LayerSpec, ModelVariant};
pub use loss::{MseLoss, MaeLoss};
pub use optim::{Optimizer, OptimizerConfig, Sgd, Adam};
pub use train::{fit, EpochStats, History, TrainConfig, EarlyStopping, ReduceLrOnPlateau};
pub use data::{generate, DataConfig, Dataset, Sample};
pub use eval::{spot_check, LeastSquares, SpotCheck};
pub use error::{Error, Result};
pub use experiment::{run, ExperimentConfig, Report};
