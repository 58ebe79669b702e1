use std::time::Instant;

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use tracing::{debug, info, warn};

use crate::data::dataset::Dataset;
use crate::error::{Error, Result};
use crate::loss::mae::MaeLoss;
use crate::loss::mse::MseLoss;
use crate::math::matrix::Matrix;
use crate::network::network::Network;
use crate::optim::Optimizer;
use crate::train::callbacks::{EarlyStoppingMonitor, PlateauMonitor};
use crate::train::epoch_stats::EpochStats;
use crate::train::history::History;
use crate::train::train_config::TrainConfig;

// ---------------------------------------------------------------------------
// Public entry points
// ---------------------------------------------------------------------------

/// Fits `network` to `dataset` with MSE loss.
///
/// The trailing `config.validation_split` fraction of the dataset is held out
/// for validation before anything is shuffled; the rest is trained on.
pub fn fit(
    network: &mut Network,
    dataset: &Dataset,
    optimizer: &mut dyn Optimizer,
    config: &TrainConfig,
) -> Result<History> {
    config.validate()?;

    let (train, val) = dataset.split(config.validation_split)?;
    info!(
        model = %network.name,
        params = network.param_count(),
        train = train.len(),
        validation = val.len(),
        "fitting"
    );

    let train_inputs = train.inputs();
    let train_labels = train.targets();
    let val_inputs = val.inputs();
    let val_labels = val.targets();
    let validation = if val.is_empty() {
        None
    } else {
        Some((val_inputs.as_slice(), val_labels.as_slice()))
    };

    train_loop(network, &train_inputs, &train_labels, validation, optimizer, config)
}

/// Trains `network` for up to `config.epochs` epochs on pre-split data and
/// returns the per-epoch history.
///
/// Optimizer state from any earlier run is discarded first; the learning
/// rate is left as the caller set it.
///
/// # Early termination
/// The loop breaks early when the early-stopping monitor runs out of patience.
/// A non-finite training loss aborts the run with `Error::NonFiniteLoss`.
pub fn train_loop(
    network: &mut Network,
    train_inputs: &[Vec<f64>],
    train_labels: &[Vec<f64>],
    validation: Option<(&[Vec<f64>], &[Vec<f64>])>,
    optimizer: &mut dyn Optimizer,
    config: &TrainConfig,
) -> Result<History> {
    config.validate()?;
    if train_inputs.is_empty() {
        return Err(Error::EmptyDataset { context: "training split" });
    }
    check_shapes(network, train_inputs, train_labels, "training split")?;
    if let Some((vi, vl)) = validation {
        check_shapes(network, vi, vl, "validation split")?;
    }

    optimizer.reset();
    let mut rng = StdRng::seed_from_u64(config.seed);
    let mut indices: Vec<usize> = (0..train_inputs.len()).collect();

    let mut early = config.early_stopping.map(EarlyStoppingMonitor::new);
    let mut plateau = config.reduce_lr.map(PlateauMonitor::new);
    let mut best_network: Option<Network> = None;
    let mut history = History::default();

    for epoch in 1..=config.epochs {
        let t_start = Instant::now();
        let learning_rate = optimizer.learning_rate();

        if config.shuffle {
            indices.shuffle(&mut rng);
        }

        // ── One full pass over the training data ───────────────────────────
        let (train_loss, train_mae) = run_one_epoch(
            network,
            train_inputs,
            train_labels,
            &indices,
            optimizer,
            config.batch_size,
        );
        if !train_loss.is_finite() {
            return Err(Error::NonFiniteLoss { epoch });
        }

        // ── Validation ────────────────────────────────────────────────────
        let (val_loss, val_mae) = match validation {
            Some((vi, vl)) => {
                let (loss, mae) = evaluate(network, vi, vl);
                (Some(loss), Some(mae))
            }
            None => (None, None),
        };

        let stats = EpochStats {
            epoch,
            total_epochs: config.epochs,
            train_loss,
            val_loss,
            train_mae,
            val_mae,
            learning_rate,
            elapsed_ms: t_start.elapsed().as_millis() as u64,
        };
        info!(
            model = %network.name,
            epoch,
            train_loss,
            val_loss = ?stats.val_loss,
            lr = learning_rate,
            ms = stats.elapsed_ms,
            "epoch done"
        );
        let monitored = stats.monitored_loss();
        history.epochs.push(stats);

        // ── Callbacks ─────────────────────────────────────────────────────
        if let Some(es) = early.as_mut() {
            let stop = es.on_epoch_end(epoch, monitored);
            if es.improved_at(epoch) && es.restores_best_weights() {
                best_network = Some(network.clone());
            }
            if stop {
                warn!(epoch, best_epoch = ?es.best_epoch(), best_loss = es.best(), "early stopping");
                history.stopped_early = true;
                break;
            }
        }

        if let Some(p) = plateau.as_mut() {
            if let Some(new_lr) = p.on_epoch_end(monitored, learning_rate) {
                warn!(epoch, from = learning_rate, to = new_lr, "reducing learning rate on plateau");
                optimizer.set_learning_rate(new_lr);
            }
        }
    }

    history.best_epoch = match &early {
        Some(es) => es.best_epoch(),
        None => history.epochs.iter()
            .min_by(|a, b| a.monitored_loss().total_cmp(&b.monitored_loss()))
            .map(|s| s.epoch),
    };

    if let (Some(best), Some(best_epoch)) = (best_network, history.best_epoch) {
        if history.final_stats().map(|s| s.epoch) != Some(best_epoch) {
            debug!(best_epoch, "restoring best weights");
            *network = best;
            history.restored_best = true;
        }
    }

    Ok(history)
}

/// Mean (MSE, MAE) over a dataset without touching gradients.
pub fn evaluate(network: &Network, inputs: &[Vec<f64>], labels: &[Vec<f64>]) -> (f64, f64) {
    let n = inputs.len();
    if n == 0 {
        return (0.0, 0.0);
    }
    let (mse, mae) = inputs.iter().zip(labels.iter())
        .map(|(input, label)| {
            let output = network.predict(input);
            (MseLoss::loss(&output, label), MaeLoss::loss(&output, label))
        })
        .fold((0.0, 0.0), |(a, b), (x, y)| (a + x, b + y));
    (mse / n as f64, mae / n as f64)
}

// ---------------------------------------------------------------------------
// Private helpers
// ---------------------------------------------------------------------------

fn check_shapes(
    network: &Network,
    inputs: &[Vec<f64>],
    labels: &[Vec<f64>],
    context: &'static str,
) -> Result<()> {
    if inputs.len() != labels.len() {
        return Err(Error::ShapeMismatch { expected: inputs.len(), got: labels.len(), context });
    }
    if let Some(bad) = inputs.iter().find(|x| x.len() != network.input_size()) {
        return Err(Error::ShapeMismatch { expected: network.input_size(), got: bad.len(), context });
    }
    if let Some(bad) = labels.iter().find(|y| y.len() != network.output_size()) {
        return Err(Error::ShapeMismatch { expected: network.output_size(), got: bad.len(), context });
    }
    Ok(())
}

/// Runs one full epoch of mini-batch gradient descent in `order`.
/// Returns the mean (MSE, MAE) over all samples, accumulated while training.
fn run_one_epoch(
    network: &mut Network,
    inputs: &[Vec<f64>],
    labels: &[Vec<f64>],
    order: &[usize],
    optimizer: &mut dyn Optimizer,
    batch_size: usize,
) -> (f64, f64) {
    let n = order.len();
    let mut total_loss = 0.0;
    let mut total_mae = 0.0;

    for batch in order.chunks(batch_size) {
        // Weights only move at the optimizer step, so one transpose per batch.
        let weights_t: Vec<Matrix> = network.layers.iter()
            .map(|layer| layer.weights.transpose())
            .collect();
        let mut acc_grads: Vec<(Matrix, Matrix)> = network.layers.iter()
            .map(|layer| (
                Matrix::zeros(layer.weights.rows, layer.weights.cols),
                Matrix::zeros(layer.biases.rows, layer.biases.cols),
            ))
            .collect();

        for &idx in batch {
            let input_row = Matrix::row(inputs[idx].clone());
            let expected = &labels[idx];

            let output = network.forward(&inputs[idx]);
            let predicted = &output.data[0];

            total_loss += MseLoss::loss(predicted, expected);
            total_mae += MaeLoss::loss(predicted, expected);

            let mut delta = Matrix::row(MseLoss::derivative(predicted, expected));

            // Backward pass.
            for i in (0..network.layers.len()).rev() {
                let input_for_layer = if i == 0 {
                    &input_row
                } else {
                    &network.layers[i - 1].neurons
                };

                let (w_grad, b_grad) = network.layers[i].compute_gradients(&delta, input_for_layer);

                if i > 0 {
                    // Propagate δ_i through weights to get ∂L/∂a_{i-1}
                    delta = &b_grad * &weights_t[i];
                }

                acc_grads[i].0.add_assign(&w_grad);
                acc_grads[i].1.add_assign(&b_grad);
            }
        }

        // Average and apply.
        let inv_batch = 1.0 / batch.len() as f64;
        for (i, (w_acc, b_acc)) in acc_grads.into_iter().enumerate() {
            let w_avg = w_acc.map(|x| x * inv_batch);
            let b_avg = b_acc.map(|x| x * inv_batch);
            optimizer.step(i, &mut network.layers[i], &w_avg, &b_avg);
        }
    }

    (total_loss / n as f64, total_mae / n as f64)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::network::spec::ModelVariant;
    use crate::optim::Sgd;
    use approx::assert_relative_eq;

    fn batch_loss(network: &Network, inputs: &[Vec<f64>], labels: &[Vec<f64>]) -> f64 {
        evaluate(network, inputs, labels).0
    }

    #[test]
    fn batch_step_follows_the_averaged_gradient() {
        let mut rng = StdRng::seed_from_u64(5);
        let start = Network::from_spec(&ModelVariant::DeepTanh.spec(3), &mut rng);
        let inputs = vec![vec![0.4, -0.7], vec![-1.1, 0.3]];
        let labels = vec![vec![-0.28], vec![-0.33]];

        // lr = 1 on a single batch turns the update into the raw gradient.
        let mut stepped = start.clone();
        run_one_epoch(&mut stepped, &inputs, &labels, &[0, 1], &mut Sgd::new(1.0), 2);

        let h = 1e-6;
        for layer in 0..start.layers.len() {
            for (r, c) in [(0, 0), (1, 2)] {
                if r >= start.layers[layer].weights.rows || c >= start.layers[layer].weights.cols {
                    continue;
                }
                let mut plus = start.clone();
                plus.layers[layer].weights.data[r][c] += h;
                let mut minus = start.clone();
                minus.layers[layer].weights.data[r][c] -= h;
                let numeric = (batch_loss(&plus, &inputs, &labels) - batch_loss(&minus, &inputs, &labels)) / (2.0 * h);

                let applied = start.layers[layer].weights.data[r][c] - stepped.layers[layer].weights.data[r][c];
                assert_relative_eq!(applied, numeric, epsilon = 1e-6, max_relative = 1e-4);
            }
        }
    }
}
