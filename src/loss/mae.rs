/// Mean absolute error. Tracked as a metric next to the MSE objective.
pub struct MaeLoss;

impl MaeLoss {
    /// Scalar MAE: mean(|predicted - expected|)
    pub fn loss(predicted: &[f64], expected: &[f64]) -> f64 {
        let n = predicted.len() as f64;
        predicted.iter().zip(expected.iter())
            .map(|(p, y)| (p - y).abs())
            .sum::<f64>() / n
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mae_ignores_sign() {
        assert_eq!(MaeLoss::loss(&[1.0, -1.0], &[0.0, 0.0]), 1.0);
    }
}
