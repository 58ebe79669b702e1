//! Least-squares baseline.

use approx::assert_relative_eq;
use mulnet::data::{generate, DataConfig, Dataset, Sample};
use mulnet::LeastSquares;

#[test]
fn recovers_exact_plane() {
    let base = generate(&DataConfig { samples: 300, seed: 2, ..DataConfig::default() }).unwrap();
    let plane = Dataset::new(
        base.samples().iter()
            .map(|s| Sample { y: -0.5 + 4.0 * s.x1 + 0.25 * s.x2, ..*s })
            .collect(),
    );

    let ols = LeastSquares::fit(&plane).unwrap();
    assert_relative_eq!(ols.intercept, -0.5, epsilon = 1e-9);
    assert_relative_eq!(ols.coefficients[0], 4.0, epsilon = 1e-9);
    assert_relative_eq!(ols.coefficients[1], 0.25, epsilon = 1e-9);
    assert!(ols.mse(&plane) < 1e-18);
}

#[test]
fn product_has_no_linear_signal() {
    // E[x1·x2 | x1] is zero on a symmetric range, so the best plane is nearly flat
    // and its error is close to Var(x1·x2) = (100/3)².
    let data = generate(&DataConfig { samples: 100_000, seed: 3, ..DataConfig::default() }).unwrap();
    let ols = LeastSquares::fit(&data).unwrap();
    assert!(ols.coefficients[0].abs() < 0.1);
    assert!(ols.coefficients[1].abs() < 0.1);
    assert!(ols.intercept.abs() < 1.0);
    assert_relative_eq!(ols.mse(&data), (100.0f64 / 3.0).powi(2), max_relative = 0.05);
}
