//! The full four-stage run on a toy-sized configuration.

use std::path::PathBuf;

use mulnet::{run, DataConfig, ExperimentConfig, ModelVariant, TrainConfig};

fn scratch_dir(tag: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("mulnet_{}_{}", tag, std::process::id()));
    let _ = std::fs::remove_dir_all(&dir);
    dir
}

fn tiny_config() -> ExperimentConfig {
    ExperimentConfig {
        data: DataConfig { samples: 300, ..DataConfig::default() },
        train: TrainConfig { epochs: 3, batch_size: 32, ..TrainConfig::default() },
        hidden_units: 4,
        export_rows: 20,
        ..ExperimentConfig::default()
    }
}

#[test]
fn runs_all_four_variants() {
    let report = run(&tiny_config()).unwrap();

    let names: Vec<ModelVariant> = report.variants.iter().map(|v| v.variant).collect();
    assert_eq!(names, ModelVariant::ALL.to_vec());

    for v in &report.variants {
        assert_eq!(v.history.len(), 3);
        assert_eq!(v.spot_checks.len(), tiny_config().probes.len());
        let linear = matches!(v.variant, ModelVariant::Linear | ModelVariant::LinearHidden);
        assert_eq!(v.collapsed.is_some(), linear, "{}", v.variant);
    }

    let text = report.render();
    assert!(text.contains("2 times 3 is"));
    assert!(text.contains("[extrapolated]"));
    assert!(text.contains("Ordinary least squares"));
    // default early stopping tracks a best epoch, reported with its loss
    assert!(text.contains("best epoch: "));
    assert!(text.contains("(loss "));
}

#[test]
fn writes_artifacts_when_asked() {
    let dir = scratch_dir("artifacts");
    let config = ExperimentConfig {
        output_dir: Some(dir.clone()),
        variants: vec![ModelVariant::TanhHidden],
        ..tiny_config()
    };

    run(&config).unwrap();

    for file in ["samples.csv", "hist_x1.svg", "hist_x2.svg", "hist_y.svg", "tanh_hidden_loss.svg", "tanh_hidden_history.json"] {
        assert!(dir.join(file).exists(), "missing {file}");
    }
    let csv = std::fs::read_to_string(dir.join("samples.csv")).unwrap();
    assert_eq!(csv.lines().count(), 21);
    std::fs::remove_dir_all(&dir).ok();
}

#[test]
fn config_round_trips_through_json() {
    let dir = scratch_dir("config");
    std::fs::create_dir_all(&dir).unwrap();
    let path = dir.join("config.json");

    let config = tiny_config();
    config.save_json(&path).unwrap();
    let loaded = ExperimentConfig::load_json(&path).unwrap();
    assert_eq!(loaded, config);
    std::fs::remove_dir_all(&dir).ok();
}

#[test]
fn partial_config_fills_defaults() {
    let config: ExperimentConfig =
        serde_json::from_str(r#"{ "hidden_units": 8, "train": { "epochs": 5 } }"#).unwrap();
    assert_eq!(config.hidden_units, 8);
    assert_eq!(config.train.epochs, 5);
    assert_eq!(config.train.batch_size, TrainConfig::default().batch_size);
    assert_eq!(config.data, DataConfig::default());
    assert_eq!(config.variants.len(), 4);
}

#[test]
fn rejects_empty_variant_list() {
    let config = ExperimentConfig { variants: vec![], ..tiny_config() };
    assert!(run(&config).is_err());
}
