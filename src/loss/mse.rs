pub struct MseLoss;

impl MseLoss {
    /// Scalar MSE: mean((predicted - expected)²)
    pub fn loss(predicted: &[f64], expected: &[f64]) -> f64 {
        let n = predicted.len() as f64;
        predicted.iter().zip(expected.iter())
            .map(|(a, b)| (a - b).powi(2))
            .sum::<f64>() / n
    }

    /// Per-output gradient: 2 · (predicted - expected) / n
    pub fn derivative(predicted: &[f64], expected: &[f64]) -> Vec<f64> {
        let scale = 2.0 / predicted.len() as f64;
        predicted.iter().zip(expected.iter())
            .map(|(a, b)| scale * (a - b))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mse_of_single_output() {
        assert_eq!(MseLoss::loss(&[3.0], &[1.0]), 4.0);
        assert_eq!(MseLoss::derivative(&[3.0], &[1.0]), vec![4.0]);
    }

    #[test]
    fn mse_averages_outputs() {
        assert_eq!(MseLoss::loss(&[1.0, 2.0], &[0.0, 0.0]), 2.5);
        assert_eq!(MseLoss::derivative(&[1.0, 2.0], &[0.0, 0.0]), vec![1.0, 2.0]);
    }
}
