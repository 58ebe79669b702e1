use serde::{Serialize, Deserialize};
use std::fmt;

use crate::activation::activation::ActivationFunction;

/// Describes one dense layer: its width and the activation applied after the
/// linear transform. The input size is implied by the previous layer.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LayerSpec {
    pub units: usize,
    pub activation: ActivationFunction,
}

impl LayerSpec {
    pub fn new(units: usize, activation: ActivationFunction) -> LayerSpec {
        LayerSpec { units, activation }
    }
}

/// Architecture of a feed-forward regressor.
///
/// An empty `hidden` list is plain linear regression over the inputs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NetworkSpec {
    /// Human-readable name, also used as the artifact file stem.
    pub name: String,
    pub input_size: usize,
    /// Hidden layers, input → output order.
    pub hidden: Vec<LayerSpec>,
    pub output: LayerSpec,
}

impl NetworkSpec {
    /// Yields `(units, input_size, activation)` for every layer in order.
    pub fn layer_shapes(&self) -> Vec<(usize, usize, ActivationFunction)> {
        let mut fan_in = self.input_size;
        self.hidden.iter()
            .chain(std::iter::once(&self.output))
            .map(|layer| {
                let shape = (layer.units, fan_in, layer.activation);
                fan_in = layer.units;
                shape
            })
            .collect()
    }

    /// Parameter count implied by the layer arithmetic alone.
    pub fn expected_param_count(&self) -> usize {
        self.layer_shapes().iter()
            .map(|&(units, fan_in, _)| fan_in * units + units)
            .sum()
    }
}

/// The four architectures the experiment walks through, in increasing capacity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ModelVariant {
    /// No hidden layer: ŷ = w1·x1 + w2·x2 + b.
    Linear,
    /// One hidden layer without activation. Still an affine map.
    LinearHidden,
    /// One tanh hidden layer.
    TanhHidden,
    /// Two tanh hidden layers.
    DeepTanh,
}

impl ModelVariant {
    pub const ALL: [ModelVariant; 4] = [
        ModelVariant::Linear,
        ModelVariant::LinearHidden,
        ModelVariant::TanhHidden,
        ModelVariant::DeepTanh,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            ModelVariant::Linear => "linear",
            ModelVariant::LinearHidden => "linear_hidden",
            ModelVariant::TanhHidden => "tanh_hidden",
            ModelVariant::DeepTanh => "deep_tanh",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            ModelVariant::Linear => "no hidden layer",
            ModelVariant::LinearHidden => "one hidden layer, no activation",
            ModelVariant::TanhHidden => "one hidden layer, tanh activation",
            ModelVariant::DeepTanh => "two hidden layers, tanh activation",
        }
    }

    /// Builds the architecture for two inputs and one linear output.
    pub fn spec(&self, hidden_units: usize) -> NetworkSpec {
        let hidden = match self {
            ModelVariant::Linear => vec![],
            ModelVariant::LinearHidden => {
                vec![LayerSpec::new(hidden_units, ActivationFunction::Identity)]
            }
            ModelVariant::TanhHidden => {
                vec![LayerSpec::new(hidden_units, ActivationFunction::Tanh)]
            }
            ModelVariant::DeepTanh => vec![
                LayerSpec::new(hidden_units, ActivationFunction::Tanh),
                LayerSpec::new(hidden_units, ActivationFunction::Tanh),
            ],
        };

        NetworkSpec {
            name: self.name().to_string(),
            input_size: 2,
            hidden,
            output: LayerSpec::new(1, ActivationFunction::Identity),
        }
    }
}

impl fmt::Display for ModelVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl std::str::FromStr for ModelVariant {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ModelVariant::ALL.iter()
            .copied()
            .find(|v| v.name() == s)
            .ok_or_else(|| {
                let names: Vec<&str> = ModelVariant::ALL.iter().map(|v| v.name()).collect();
                format!("unknown variant '{}', expected one of {}", s, names.join(", "))
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn variant_param_arithmetic() {
        let w = 8;
        assert_eq!(ModelVariant::Linear.spec(w).expected_param_count(), 3);
        assert_eq!(ModelVariant::LinearHidden.spec(w).expected_param_count(), 4 * w + 1);
        assert_eq!(ModelVariant::TanhHidden.spec(w).expected_param_count(), 4 * w + 1);
        assert_eq!(ModelVariant::DeepTanh.spec(w).expected_param_count(), w * w + 5 * w + 1);
    }

    #[test]
    fn variant_round_trips_through_name() {
        for v in ModelVariant::ALL {
            assert_eq!(v.name().parse::<ModelVariant>().unwrap(), v);
        }
        assert!("wide".parse::<ModelVariant>().is_err());
    }
}
