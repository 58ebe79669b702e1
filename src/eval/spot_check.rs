use std::fmt;

use crate::network::network::Network;

/// Hand-picked probes: a few pairs inside the training range and a few
/// outside it to show how badly (or well) the fit extrapolates.
pub const DEFAULT_PROBES: [(f64, f64); 8] = [
    (2.0, 3.0),
    (-4.0, 5.0),
    (7.5, -7.5),
    (-9.0, -9.0),
    (0.0, 8.0),
    (12.0, 3.0),
    (-15.0, 12.0),
    (20.0, 20.0),
];

/// A single prediction next to the exact product.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpotCheck {
    pub x1: f64,
    pub x2: f64,
    pub expected: f64,
    pub predicted: f64,
    /// Whether either input lies outside the training range.
    pub extrapolated: bool,
}

impl SpotCheck {
    pub fn error(&self) -> f64 {
        self.predicted - self.expected
    }
}

impl fmt::Display for SpotCheck {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} times {} is {:.2} (expected {}){}",
            self.x1,
            self.x2,
            self.predicted,
            self.expected,
            if self.extrapolated { " [extrapolated]" } else { "" }
        )
    }
}

/// Runs `network` on each probe. `range` is the `[low, high)` interval the
/// inputs were drawn from during training.
pub fn spot_check(network: &Network, probes: &[(f64, f64)], range: (f64, f64)) -> Vec<SpotCheck> {
    let (low, high) = range;
    let outside = |v: f64| v < low || v >= high;
    probes.iter()
        .map(|&(x1, x2)| SpotCheck {
            x1,
            x2,
            expected: x1 * x2,
            predicted: network.predict_pair(x1, x2),
            extrapolated: outside(x1) || outside(x2),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::activation::activation::ActivationFunction;
    use crate::layers::dense::Layer;
    use crate::math::matrix::Matrix;

    fn sum_network() -> Network {
        let layer = Layer::with_params(
            Matrix::from_data(vec![vec![1.0], vec![1.0]]),
            Matrix::row(vec![0.0]),
            ActivationFunction::Identity,
        );
        Network { name: "sum".into(), layers: vec![layer] }
    }

    #[test]
    fn prints_like_a_sentence() {
        let checks = spot_check(&sum_network(), &[(2.0, 3.0)], (-10.0, 10.0));
        assert_eq!(checks[0].to_string(), "2 times 3 is 5.00 (expected 6)");
        assert_eq!(checks[0].error(), -1.0);
    }

    #[test]
    fn flags_out_of_range_inputs() {
        let checks = spot_check(&sum_network(), &[(20.0, 1.0), (-10.0, 9.9)], (-10.0, 10.0));
        assert!(checks[0].extrapolated);
        assert!(!checks[1].extrapolated);
        assert!(checks[0].to_string().ends_with("[extrapolated]"));
    }
}
