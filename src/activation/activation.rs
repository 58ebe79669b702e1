use serde::{Serialize, Deserialize};
use std::f64::consts::E;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActivationFunction {
    /// No non-linearity; a layer with this activation is a pure affine map.
    Identity,
    Tanh,
    #[serde(rename = "relu")]
    ReLU,
    Sigmoid,
}

impl ActivationFunction {
    pub fn function(&self, x: f64) -> f64 {
        match self {
            ActivationFunction::Identity => x,
            ActivationFunction::Tanh => x.tanh(),
            ActivationFunction::ReLU => if x > 0.0 { x } else { 0.0 },
            ActivationFunction::Sigmoid => 1.0 / (1.0 + E.powf(-x)),
        }
    }

    /// Element-wise derivative, evaluated at the pre-activation `x`.
    pub fn derivative(&self, x: f64) -> f64 {
        match self {
            ActivationFunction::Identity => 1.0,
            ActivationFunction::Tanh => {
                let t = x.tanh();
                1.0 - t * t
            }
            ActivationFunction::ReLU => if x > 0.0 { 1.0 } else { 0.0 },
            ActivationFunction::Sigmoid => {
                let fx = self.function(x);
                fx * (1.0 - fx)
            },
        }
    }

    pub fn is_linear(&self) -> bool {
        matches!(self, ActivationFunction::Identity)
    }
}

impl fmt::Display for ActivationFunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ActivationFunction::Identity => "linear",
            ActivationFunction::Tanh => "tanh",
            ActivationFunction::ReLU => "relu",
            ActivationFunction::Sigmoid => "sigmoid",
        };
        f.write_str(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn tanh_derivative_matches_finite_difference() {
        let act = ActivationFunction::Tanh;
        let h = 1e-6;
        for &x in &[-2.0, -0.3, 0.0, 0.7, 3.0] {
            let numeric = (act.function(x + h) - act.function(x - h)) / (2.0 * h);
            assert_relative_eq!(act.derivative(x), numeric, epsilon = 1e-6);
        }
    }

    #[test]
    fn identity_is_linear() {
        assert!(ActivationFunction::Identity.is_linear());
        assert!(!ActivationFunction::Tanh.is_linear());
        assert_eq!(ActivationFunction::Identity.function(-4.5), -4.5);
    }

    #[test]
    fn serde_names_are_snake_case() {
        let json = serde_json::to_string(&ActivationFunction::ReLU).unwrap();
        assert_eq!(json, "\"relu\"");
        let back: ActivationFunction = serde_json::from_str("\"tanh\"").unwrap();
        assert_eq!(back, ActivationFunction::Tanh);
    }
}
