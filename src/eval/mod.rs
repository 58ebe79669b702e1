pub mod ols;
pub mod plot;
pub mod spot_check;

pub use ols::LeastSquares;
pub use spot_check::{spot_check, SpotCheck, DEFAULT_PROBES};
