use approx::assert_abs_diff_eq;

use super::{ScriptedModel, trainer_config};
use crate::assert_err;
use crate::gan::{OptimizerClass, OptimizerConfig, SimultaneousTrainer, TrainError, TrainerConfig};
use crate::nn::{Graph, VarLossOps};
use crate::tensor::Tensor;

#[test]
fn test_parse_minimal_config_uses_defaults() {
    let config = TrainerConfig::from_json_str(r#"{"optimizer": {"learn_rate": 0.0002}}"#).unwrap();

    assert_eq!(config.report_interval, 10);
    assert_eq!(config.optimizer.class, OptimizerClass::Adamirror);
    assert_abs_diff_eq!(config.optimizer.learn_rate, 0.0002);
    assert_abs_diff_eq!(config.optimizer.betas[0], 0.907_453);
    assert_abs_diff_eq!(config.optimizer.betas[1], 0.997);
    assert_abs_diff_eq!(config.optimizer.epsilon, 1e-8);
    assert_abs_diff_eq!(config.optimizer.weight_decay, 0.0);
}

#[test]
fn test_parse_full_config() {
    let json = r#"{
        "optimizer": {
            "class": "adam",
            "learn_rate": 0.001,
            "betas": [0.5, 0.999],
            "epsilon": 1e-6
        },
        "report_interval": 25
    }"#;
    let config = TrainerConfig::from_json_str(json).unwrap();

    assert_eq!(config.optimizer.class, OptimizerClass::Adam);
    assert_eq!(config.optimizer.betas, [0.5, 0.999]);
    assert_eq!(config.report_interval, 25);
}

#[test]
fn test_missing_learn_rate_is_config_error() {
    let result = TrainerConfig::from_json_str(r#"{"optimizer": {"class": "sgd"}}"#);
    assert_err!(result, TrainError::Config(msg) if msg.contains("learn_rate"));
}

#[test]
fn test_unknown_optimizer_class_is_config_error() {
    let result =
        TrainerConfig::from_json_str(r#"{"optimizer": {"class": "rmsprop", "learn_rate": 0.1}}"#);
    assert_err!(result, TrainError::Config(_));
}

#[test]
fn test_invalid_hyperparameters_are_rejected() {
    for json in [
        r#"{"optimizer": {"learn_rate": 0.0}}"#,
        r#"{"optimizer": {"learn_rate": -0.1}}"#,
        r#"{"optimizer": {"learn_rate": 0.1, "betas": [1.0, 0.9]}}"#,
        r#"{"optimizer": {"learn_rate": 0.1, "epsilon": 0.0}}"#,
        r#"{"optimizer": {"learn_rate": 0.1, "weight_decay": -1.0}}"#,
        r#"{"optimizer": {"learn_rate": 0.1}, "report_interval": 0}"#,
    ] {
        assert_err!(TrainerConfig::from_json_str(json), TrainError::Config(_));
    }
}

#[test]
fn test_trainer_construction_fails_on_invalid_config() {
    let mut config = trainer_config(OptimizerClass::Adamirror, 0.01);
    config.optimizer.betas = [0.9, 1.5];

    let result = SimultaneousTrainer::new(ScriptedModel::new(1.0, 1.0), &config).map(|_| ());

    assert_err!(result, TrainError::Config(msg) if msg.contains("betas[1]"));
}

#[test]
fn test_each_class_builds_its_optimizer() {
    for (class, name) in [
        (OptimizerClass::Adamirror, "adamirror"),
        (OptimizerClass::Adam, "adam"),
        (OptimizerClass::Sgd, "sgd"),
    ] {
        let trainer =
            SimultaneousTrainer::new(ScriptedModel::new(1.0, 1.0), &trainer_config(class, 0.01))
                .unwrap();
        assert_eq!(trainer.optimizer().name(), name);
        assert_eq!(trainer.optimizer().params().len(), 2);
    }
}

#[test]
fn test_from_file() {
    let path = std::env::temp_dir().join(format!("hypergan_config_{}.json", std::process::id()));
    std::fs::write(&path, r#"{"optimizer": {"class": "sgd", "learn_rate": 0.5}}"#).unwrap();

    let config = TrainerConfig::from_file(&path).unwrap();
    std::fs::remove_file(&path).unwrap();

    assert_eq!(config.optimizer.class, OptimizerClass::Sgd);
    assert_abs_diff_eq!(config.optimizer.learn_rate, 0.5);
}

#[test]
fn test_from_missing_file_is_config_error() {
    let result = TrainerConfig::from_file("/nonexistent/hypergan/config.json");
    assert_err!(result, TrainError::Config(_));
}

#[test]
fn test_weight_decay_reaches_adam_and_adamirror() {
    // 损失对 w 的梯度为 0，参数只会因权重衰减而移动
    for class in [OptimizerClass::Adam, OptimizerClass::Adamirror] {
        let graph = Graph::new();
        let w = graph.parameter_with_value(&Tensor::scalar(2.0), "w").unwrap();
        let loss = w.scale(0.0).unwrap().mean().unwrap();
        let mut config = OptimizerConfig::new(class, 0.1);
        config.weight_decay = 0.5;

        let mut optimizer = config.build(&graph, &[w.clone()]).unwrap();
        optimizer.minimize(&loss).unwrap();
        assert!(w.item().unwrap() < 2.0, "{class:?}");
    }
}
