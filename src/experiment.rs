//! The four-stage experiment: generate data, build each variant, fit it,
//! then inspect and spot-check the result next to an OLS baseline.

use std::fmt::Write as _;
use std::fs::{self, File};
use std::io::{BufReader, BufWriter};
use std::path::{Path, PathBuf};

use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::{Serialize, Deserialize};
use tracing::{debug, info};

use crate::data::dataset::{Column, Dataset};
use crate::data::generator::{generate, DataConfig};
use crate::error::{Error, Result};
use crate::eval::ols::LeastSquares;
use crate::eval::plot;
use crate::eval::spot_check::{spot_check, SpotCheck, DEFAULT_PROBES};
use crate::network::network::Network;
use crate::network::spec::ModelVariant;
use crate::optim::OptimizerConfig;
use crate::train::history::History;
use crate::train::loop_fn::{evaluate, fit};
use crate::train::train_config::TrainConfig;

const HISTOGRAM_BINS: usize = 40;
const MAX_PRINTED_PARAMS: usize = 100;

/// Everything one experiment run needs. Every field has a default, so a
/// config file only has to name what it changes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExperimentConfig {
    pub data: DataConfig,
    pub train: TrainConfig,
    pub optimizer: OptimizerConfig,
    /// Width of every hidden layer.
    pub hidden_units: usize,
    pub variants: Vec<ModelVariant>,
    pub probes: Vec<(f64, f64)>,
    /// Where to write CSV, SVG and JSON artifacts. Nothing is written when unset.
    pub output_dir: Option<PathBuf>,
    /// Rows of the dataset exported to `samples.csv`.
    pub export_rows: usize,
    /// Seeds weight initialisation.
    pub init_seed: u64,
}

impl Default for ExperimentConfig {
    fn default() -> Self {
        ExperimentConfig {
            data: DataConfig::default(),
            train: TrainConfig::default(),
            optimizer: OptimizerConfig::default(),
            hidden_units: 32,
            variants: ModelVariant::ALL.to_vec(),
            probes: DEFAULT_PROBES.to_vec(),
            output_dir: None,
            export_rows: 1000,
            init_seed: 1,
        }
    }
}

impl ExperimentConfig {
    pub fn load_json(path: &Path) -> Result<ExperimentConfig> {
        let file = File::open(path)?;
        let reader = BufReader::new(file);
        Ok(serde_json::from_reader(reader)?)
    }

    pub fn save_json(&self, path: &Path) -> Result<()> {
        let file = File::create(path)?;
        let writer = BufWriter::new(file);
        serde_json::to_writer_pretty(writer, self)?;
        Ok(())
    }

    pub fn validate(&self) -> Result<()> {
        self.data.validate()?;
        self.train.validate()?;
        if self.hidden_units == 0 {
            return Err(Error::invalid("hidden_units", self.hidden_units, "must be at least 1"));
        }
        if self.variants.is_empty() {
            return Err(Error::invalid("variants", "[]", "name at least one variant"));
        }
        Ok(())
    }
}

/// Outcome of fitting one variant.
#[derive(Debug, Clone)]
pub struct VariantReport {
    pub variant: ModelVariant,
    pub network: Network,
    pub history: History,
    /// MSE / MAE of the final network on the whole dataset.
    pub mse: f64,
    pub mae: f64,
    /// Present when the network is an affine map.
    pub collapsed: Option<(Vec<f64>, f64)>,
    pub spot_checks: Vec<SpotCheck>,
}

#[derive(Debug, Clone)]
pub struct Report {
    pub dataset_summary: String,
    pub ols: LeastSquares,
    pub ols_mse: f64,
    pub ols_spot_checks: Vec<(f64, f64, f64)>,
    pub variants: Vec<VariantReport>,
}

/// Runs the experiment end to end.
pub fn run(config: &ExperimentConfig) -> Result<Report> {
    config.validate()?;

    // ── Stage 1: data ──────────────────────────────────────────────────────
    let dataset = generate(&config.data)?;
    if dataset.is_empty() {
        return Err(Error::EmptyDataset { context: "experiment" });
    }
    let dataset_summary = dataset.summary();
    info!("dataset summary:\n{}", dataset_summary);

    if let Some(dir) = &config.output_dir {
        fs::create_dir_all(dir)?;
        write_data_artifacts(&dataset, config, dir)?;
    }

    let ols = LeastSquares::fit(&dataset)?;
    let ols_mse = ols.mse(&dataset);
    info!(
        intercept = ols.intercept,
        b1 = ols.coefficients[0],
        b2 = ols.coefficients[1],
        mse = ols_mse,
        "least-squares baseline"
    );
    let ols_spot_checks = config.probes.iter()
        .map(|&(x1, x2)| (x1, x2, ols.predict(x1, x2)))
        .collect();

    // ── Stages 2-4: build, fit, inspect each variant ──────────────────────
    let mut init_rng = StdRng::seed_from_u64(config.init_seed);
    let inputs = dataset.inputs();
    let targets = dataset.targets();
    let mut variants = Vec::with_capacity(config.variants.len());

    for &variant in &config.variants {
        let spec = variant.spec(config.hidden_units);
        let mut network = Network::from_spec(&spec, &mut init_rng);
        info!(variant = %variant, params = network.param_count(), "built {}", variant.description());
        debug!("\n{}", network.summary());

        let mut optimizer = config.optimizer.build()?;
        let history = fit(&mut network, &dataset, optimizer.as_mut(), &config.train)?;

        let (mse, mae) = evaluate(&network, &inputs, &targets);
        let collapsed = network.collapse_linear();
        let spot_checks = spot_check(&network, &config.probes, (config.data.low, config.data.high));
        for check in &spot_checks {
            debug!(variant = %variant, "{}", check);
        }

        if let Some(dir) = &config.output_dir {
            let title = format!("{} ({})", variant.name(), variant.description());
            plot::write_svg(&dir.join(format!("{}_loss.svg", variant.name())), &plot::loss_curve_svg(&history, &title))?;
            history.write_json(&dir.join(format!("{}_history.json", variant.name())))?;
        }

        info!(variant = %variant, epochs = history.len(), mse, mae, "finished");
        variants.push(VariantReport {
            variant,
            network,
            history,
            mse,
            mae,
            collapsed,
            spot_checks,
        });
    }

    Ok(Report {
        dataset_summary,
        ols,
        ols_mse,
        ols_spot_checks,
        variants,
    })
}

fn write_data_artifacts(dataset: &Dataset, config: &ExperimentConfig, dir: &Path) -> Result<()> {
    if config.export_rows > 0 {
        dataset.write_csv(&dir.join("samples.csv"), config.export_rows)?;
    }

    for column in Column::ALL {
        let (lo, hi) = match column {
            Column::Y => {
                let bound = config.data.low.abs().max(config.data.high.abs()).powi(2);
                (-bound, bound)
            }
            _ => (config.data.low, config.data.high),
        };
        let counts = dataset.histogram(column, HISTOGRAM_BINS, lo, hi);
        let svg = plot::histogram_svg(&counts, lo, hi, &format!("distribution of {}", column.name()));
        plot::write_svg(&dir.join(format!("hist_{}.svg", column.name())), &svg)?;
    }
    Ok(())
}

impl Report {
    /// The printed narrative: data summary, baseline, then per variant the
    /// learned parameters and the spot checks.
    pub fn render(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "== Data ==\n{}\n", self.dataset_summary);

        let _ = writeln!(out, "== Ordinary least squares ==");
        let _ = writeln!(
            out,
            "y ≈ {:.4} + {:.4}·x1 + {:.4}·x2   (MSE {:.3})",
            self.ols.intercept, self.ols.coefficients[0], self.ols.coefficients[1], self.ols_mse
        );
        for &(x1, x2, y) in &self.ols_spot_checks {
            let _ = writeln!(out, "  {} times {} is {:.2} (expected {})", x1, x2, y, x1 * x2);
        }

        for v in &self.variants {
            let _ = writeln!(out, "\n== {} : {} ==", v.variant.name(), v.variant.description());
            let _ = writeln!(out, "{}", v.network.summary());

            let last = v.history.final_stats();
            let _ = writeln!(
                out,
                "epochs run: {}{}  best epoch: {}  final lr: {}",
                v.history.len(),
                if v.history.stopped_early { " (early stop)" } else { "" },
                v.history.best_stats().map_or("-".to_string(), |s| {
                    format!("{} (loss {:.4})", s.epoch, s.monitored_loss())
                }),
                last.map_or("-".to_string(), |s| format!("{:e}", s.learning_rate)),
            );
            let _ = writeln!(out, "MSE {:.4}  MAE {:.4} on the full dataset", v.mse, v.mae);

            match &v.collapsed {
                Some((w, b)) => {
                    let _ = writeln!(
                        out,
                        "collapses to y ≈ {:.4} + {:.4}·x1 + {:.4}·x2 (a plane, like OLS)",
                        b, w[0], w[1]
                    );
                }
                None => {
                    for (i, layer) in v.network.layers.iter().enumerate() {
                        if layer.param_count() <= MAX_PRINTED_PARAMS {
                            let _ = writeln!(
                                out,
                                "dense_{} weights {:?} biases {:?}",
                                i,
                                round_all(layer.weights.iter()),
                                round_all(layer.biases.iter()),
                            );
                        } else {
                            let mean_abs = layer.weights.iter().map(|w| w.abs()).sum::<f64>()
                                / layer.weights.len() as f64;
                            let _ = writeln!(
                                out,
                                "dense_{} {} weights, mean |w| {:.4}",
                                i,
                                layer.weights.len(),
                                mean_abs,
                            );
                        }
                    }
                }
            }

            for check in &v.spot_checks {
                let _ = writeln!(out, "  {}", check);
            }
        }
        out
    }
}

fn round_all<'a>(values: impl Iterator<Item = &'a f64>) -> Vec<f64> {
    values.map(|v| (v * 1e4).round() / 1e4).collect()
}
