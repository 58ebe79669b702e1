use std::error::Error;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing::{error, info};

use mulnet::{generate, logging, DataConfig, ExperimentConfig, ModelVariant};

#[derive(Parser)]
#[command(version, about = "Watch a small dense network learn x1 * x2")]
struct Cli {
    /// Raise log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Generate data, fit every variant and print the comparison
    Run {
        /// JSON experiment config; flags below override it
        #[arg(short, long, value_name = "PATH")]
        config: Option<PathBuf>,
        #[arg(short = 'n', long, value_name = "INT")]
        samples: Option<usize>,
        #[arg(short, long)]
        seed: Option<u64>,
        #[arg(short, long, value_name = "INT")]
        epochs: Option<usize>,
        #[arg(short, long, value_name = "INT")]
        batch_size: Option<usize>,
        #[arg(long, value_name = "INT")]
        hidden_units: Option<usize>,
        /// Restrict to these variants (repeatable)
        #[arg(long = "variant", value_name = "NAME")]
        variants: Vec<ModelVariant>,
        /// Directory for CSV / SVG / JSON artifacts
        #[arg(short, long, value_name = "DIR")]
        out: Option<PathBuf>,
    },
    /// Write a synthetic dataset to CSV
    Generate {
        #[arg(short = 'n', long, value_name = "INT", default_value_t = 1000)]
        samples: usize,
        #[arg(short, long, default_value_t = 42)]
        seed: u64,
        /// Standard deviation of Gaussian label noise
        #[arg(long)]
        noise: Option<f64>,
        #[arg(short, long, value_name = "PATH")]
        out: PathBuf,
    },
    /// Print the default experiment config as JSON
    Config,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    if let Err(e) = logging::init_logging(cli.verbose) {
        eprintln!("failed to install logger: {e}");
    }

    match execute(cli.command) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e}");
            ExitCode::FAILURE
        }
    }
}

fn execute(command: Command) -> Result<(), Box<dyn Error>> {
    match command {
        Command::Run {
            config,
            samples,
            seed,
            epochs,
            batch_size,
            hidden_units,
            variants,
            out,
        } => {
            let mut cfg = match config {
                Some(path) => ExperimentConfig::load_json(&path)?,
                None => ExperimentConfig::default(),
            };
            if let Some(n) = samples { cfg.data.samples = n; }
            if let Some(s) = seed { cfg.data.seed = s; }
            if let Some(e) = epochs { cfg.train.epochs = e; }
            if let Some(b) = batch_size { cfg.train.batch_size = b; }
            if let Some(w) = hidden_units { cfg.hidden_units = w; }
            if !variants.is_empty() { cfg.variants = variants; }
            if out.is_some() { cfg.output_dir = out; }

            let report = mulnet::run(&cfg)?;
            println!("{}", report.render());
            if let Some(dir) = &cfg.output_dir {
                cfg.save_json(&dir.join("config.json"))?;
                info!(dir = %dir.display(), "artifacts written");
            }
        }
        Command::Generate { samples, seed, noise, out } => {
            let data = DataConfig { samples, seed, noise_std: noise, ..DataConfig::default() };
            let dataset = generate(&data)?;
            dataset.write_csv(&out, dataset.len())?;
            info!(rows = dataset.len(), path = %out.display(), "dataset written");
        }
        Command::Config => {
            println!("{}", serde_json::to_string_pretty(&ExperimentConfig::default())?);
        }
    }
    Ok(())
}
