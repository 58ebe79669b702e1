//! Ordinary least squares baseline: `y ≈ b0 + b1·x1 + b2·x2`.
//!
//! The best plane through `x1 · x2` is what every all-linear network
//! converges to, so it is the yardstick for the first two variants.

use crate::data::dataset::Dataset;
use crate::error::{Error, Result};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LeastSquares {
    pub intercept: f64,
    pub coefficients: [f64; 2],
}

impl LeastSquares {
    /// Solves the 3x3 normal equations `XᵀX β = Xᵀy`.
    pub fn fit(dataset: &Dataset) -> Result<LeastSquares> {
        if dataset.is_empty() {
            return Err(Error::EmptyDataset { context: "least squares" });
        }

        let mut xtx = [[0.0f64; 3]; 3];
        let mut xty = [0.0f64; 3];
        for s in dataset.samples() {
            let row = [1.0, s.x1, s.x2];
            for i in 0..3 {
                xty[i] += row[i] * s.y;
                for j in 0..3 {
                    xtx[i][j] += row[i] * row[j];
                }
            }
        }

        let beta = solve3(xtx, xty)?;
        Ok(LeastSquares {
            intercept: beta[0],
            coefficients: [beta[1], beta[2]],
        })
    }

    pub fn predict(&self, x1: f64, x2: f64) -> f64 {
        self.intercept + self.coefficients[0] * x1 + self.coefficients[1] * x2
    }

    /// Mean squared error of the plane on `dataset`.
    pub fn mse(&self, dataset: &Dataset) -> f64 {
        if dataset.is_empty() {
            return 0.0;
        }
        dataset.samples().iter()
            .map(|s| (self.predict(s.x1, s.x2) - s.y).powi(2))
            .sum::<f64>() / dataset.len() as f64
    }
}

/// Gaussian elimination with partial pivoting.
fn solve3(mut a: [[f64; 3]; 3], mut b: [f64; 3]) -> Result<[f64; 3]> {
    let scale = a.iter().flatten().fold(0.0f64, |m, v| m.max(v.abs())).max(1.0);

    for col in 0..3 {
        let pivot = (col..3)
            .max_by(|&i, &j| a[i][col].abs().total_cmp(&a[j][col].abs()))
            .unwrap_or(col);
        if a[pivot][col].abs() <= 1e-12 * scale {
            return Err(Error::Singular);
        }
        a.swap(col, pivot);
        b.swap(col, pivot);

        for row in col + 1..3 {
            let factor = a[row][col] / a[col][col];
            for k in col..3 {
                a[row][k] -= factor * a[col][k];
            }
            b[row] -= factor * b[col];
        }
    }

    let mut x = [0.0f64; 3];
    for row in (0..3).rev() {
        let tail: f64 = (row + 1..3).map(|k| a[row][k] * x[k]).sum();
        x[row] = (b[row] - tail) / a[row][row];
    }
    Ok(x)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::dataset::Sample;

    #[test]
    fn constant_inputs_are_singular() {
        let ds = Dataset::new(vec![
            Sample { x1: 1.0, x2: 1.0, y: 1.0 },
            Sample { x1: 1.0, x2: 1.0, y: 2.0 },
        ]);
        assert!(matches!(LeastSquares::fit(&ds), Err(Error::Singular)));
    }

    #[test]
    fn empty_dataset_is_rejected() {
        assert!(LeastSquares::fit(&Dataset::default()).is_err());
    }
}
