pub mod mse;
pub mod mae;

pub use mse::MseLoss;
pub use mae::MaeLoss;
