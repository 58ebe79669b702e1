use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Serialize, Deserialize};
use tracing::info;

use crate::data::dataset::{Dataset, Sample};
use crate::error::{Error, Result};
use crate::math::matrix::Matrix;

/// Largest dataset `generate` will build in memory.
pub const MAX_SAMPLES: usize = 50_000_000;

/// Parameters for the synthetic multiplication dataset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DataConfig {
    pub samples: usize,
    pub seed: u64,
    /// Inclusive lower bound of both inputs.
    pub low: f64,
    /// Exclusive upper bound of both inputs.
    pub high: f64,
    /// Standard deviation of Gaussian label noise. `None` keeps `y = x1 * x2` exact.
    pub noise_std: Option<f64>,
}

impl Default for DataConfig {
    fn default() -> Self {
        DataConfig {
            samples: 1_000_000,
            seed: 42,
            low: -10.0,
            high: 10.0,
            noise_std: None,
        }
    }
}

impl DataConfig {
    pub fn validate(&self) -> Result<()> {
        if !(self.low.is_finite() && self.high.is_finite()) {
            return Err(Error::invalid("low/high", format!("[{}, {})", self.low, self.high), "bounds must be finite"));
        }
        if self.low >= self.high {
            return Err(Error::invalid("low/high", format!("[{}, {})", self.low, self.high), "low must be below high"));
        }
        if !(self.high - self.low).is_finite() {
            return Err(Error::invalid("low/high", format!("[{}, {})", self.low, self.high), "range width overflows f64"));
        }
        if self.samples > MAX_SAMPLES {
            return Err(Error::invalid("samples", self.samples, "exceeds the in-memory limit"));
        }
        if let Some(std) = self.noise_std {
            if !(std.is_finite() && std >= 0.0) {
                return Err(Error::invalid("noise_std", std, "must be a non-negative finite number"));
            }
        }
        Ok(())
    }
}

/// Draws `config.samples` i.i.d. pairs from `Uniform(low, high)` and labels
/// each with its product.
///
/// The generator is a seeded `StdRng`, so one config always yields the same
/// dataset.
pub fn generate(config: &DataConfig) -> Result<Dataset> {
    config.validate()?;

    let mut rng = StdRng::seed_from_u64(config.seed);
    let mut samples = Vec::with_capacity(config.samples);

    for _ in 0..config.samples {
        let x1 = rng.gen_range(config.low..config.high);
        let x2 = rng.gen_range(config.low..config.high);
        let mut y = x1 * x2;
        if let Some(std) = config.noise_std {
            y += std * Matrix::sample_standard_normal(&mut rng);
        }
        samples.push(Sample { x1, x2, y });
    }

    info!(
        samples = samples.len(),
        seed = config.seed,
        low = config.low,
        high = config.high,
        noisy = config.noise_std.is_some(),
        "generated dataset"
    );

    Ok(Dataset::new(samples))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_inverted_bounds() {
        let config = DataConfig { low: 1.0, high: -1.0, ..DataConfig::default() };
        assert!(matches!(generate(&config), Err(Error::InvalidConfig { .. })));
    }

    #[test]
    fn rejects_bounds_whose_width_overflows() {
        let config = DataConfig { samples: 3, low: -1e308, high: 1e308, ..DataConfig::default() };
        assert!(matches!(generate(&config), Err(Error::InvalidConfig { parameter: "low/high", .. })));
    }

    #[test]
    fn rejects_absurd_sample_count() {
        let config = DataConfig { samples: usize::MAX, ..DataConfig::default() };
        assert!(matches!(generate(&config), Err(Error::InvalidConfig { parameter: "samples", .. })));
    }

    #[test]
    fn rejects_negative_noise() {
        let config = DataConfig { samples: 3, noise_std: Some(-0.5), ..DataConfig::default() };
        assert!(generate(&config).is_err());
    }

    #[test]
    fn zero_samples_is_empty() {
        let config = DataConfig { samples: 0, ..DataConfig::default() };
        assert!(generate(&config).unwrap().is_empty());
    }
}
