/*
 * @Date         : 2026-10-06
 * @Description  : 玩具 GAN 示例：在二维高斯混合（环上 8 个峰）数据上训练两层 MLP 的 GAN
 *
 * 运行：RUST_LOG=info cargo run --example toy_gan [config.json]
 */

use std::f32::consts::PI;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::Deserialize;

use hypergan::gan::{
    LearningRateDecayHook, MlpGan, MlpGanConfig, SimultaneousTrainer, TrainError, TrainerConfig,
};
use hypergan::tensor::Tensor;

const DEFAULT_CONFIG: &str = "demos/toy_gan/config.json";
const MODES: usize = 8;
const RADIUS: f32 = 2.0;
const MODE_STD: f32 = 0.05;

#[derive(Deserialize)]
struct DecayConfig {
    start_step: u64,
    end_step: u64,
    end_lr: f32,
}

#[derive(Deserialize)]
struct DemoConfig {
    model: MlpGanConfig,
    trainer: TrainerConfig,
    steps: usize,
    decay: Option<DecayConfig>,
}

/// 从环上 8 个高斯峰中均匀采样一批二维点
fn mixture_batch(rng: &mut StdRng, batch_size: usize) -> Tensor {
    let noise = Tensor::normal_with_rng(0.0, MODE_STD, &[batch_size, 2], rng);
    let mut centers = Vec::with_capacity(batch_size * 2);
    for _ in 0..batch_size {
        let mode = rng.gen_range(0..MODES);
        let angle = 2.0 * PI * mode as f32 / MODES as f32;
        centers.push(RADIUS * angle.cos());
        centers.push(RADIUS * angle.sin());
    }
    noise + Tensor::new(&centers, &[batch_size, 2])
}

fn main() -> Result<(), TrainError> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let path = std::env::args().nth(1).unwrap_or_else(|| DEFAULT_CONFIG.to_string());
    let content = std::fs::read_to_string(&path)
        .map_err(|e| TrainError::Config(format!("无法读取`{path}`：{e}")))?;
    let config: DemoConfig = serde_json::from_str(&content)
        .map_err(|e| TrainError::Config(format!("无法解析`{path}`：{e}")))?;
    config.trainer.validate()?;

    let batch_size = config.model.batch_size;
    let mut rng = StdRng::seed_from_u64(config.model.seed.unwrap_or(0));
    let gan = MlpGan::new(config.model)?;
    let mut trainer = SimultaneousTrainer::new(gan, &config.trainer)?;
    if let Some(decay) = config.decay {
        trainer.add_hook(LearningRateDecayHook::new(
            decay.start_step,
            decay.end_step,
            decay.end_lr,
        )?);
    }

    let batches = std::iter::repeat_with(|| mixture_batch(&mut rng, batch_size));
    let steps = trainer.train(batches, config.steps)?;
    log::info!("训练完成，共{steps}步");

    let sample = trainer.model_mut().sample()?;
    println!("生成样本（前 8 个）：");
    for row in 0..batch_size.min(8) {
        println!(
            "  ({:+.3}, {:+.3})",
            sample.get(&[row, 0]).unwrap_or(f32::NAN),
            sample.get(&[row, 1]).unwrap_or(f32::NAN)
        );
    }
    Ok(())
}
