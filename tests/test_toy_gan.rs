/*
 * @Date         : 2026-10-06
 * @Description  : 玩具 GAN 集成测试：两层 MLP 的生成器/判别器在二维高斯数据上做同时对抗训练，
 *                 验证训练全程数值有限、指标按间隔报告，且生成样本的均值向真实数据靠拢
 */

use std::cell::RefCell;
use std::rc::Rc;

use hypergan::gan::{
    AdversarialModel, LossKind, Metrics, MetricsReporter, MlpGan, MlpGanConfig, ParameterPenaltyHook,
    Side, SimultaneousTrainer, TrainError, TrainerConfig,
};
use hypergan::nn::Module;
use hypergan::tensor::Tensor;

const BATCH_SIZE: usize = 32;
const DATA_CENTER: [f32; 2] = [3.0, 3.0];

#[derive(Clone, Default)]
struct CollectingReporter {
    reports: Rc<RefCell<Vec<(u64, Metrics)>>>,
}

impl MetricsReporter for CollectingReporter {
    fn report(&mut self, step: u64, metrics: &Metrics) -> std::io::Result<()> {
        println!("{}", metrics.format_line(step));
        self.reports.borrow_mut().push((step, metrics.clone()));
        Ok(())
    }
}

fn real_batch(seed: u64) -> Tensor {
    let noise = Tensor::normal_seeded(0.0, 0.3, &[BATCH_SIZE, 2], seed);
    noise + Tensor::new(&DATA_CENTER, &[1, 2])
}

fn distance_to_center(gan: &mut MlpGan) -> Result<f32, TrainError> {
    let sample = gan.sample()?;
    let mean = sample.sum_to_shape(&[1, 2]) / BATCH_SIZE as f32;
    let dx = mean.get(&[0, 0]).unwrap_or(f32::NAN) - DATA_CENTER[0];
    let dy = mean.get(&[0, 1]).unwrap_or(f32::NAN) - DATA_CENTER[1];
    Ok((dx * dx + dy * dy).sqrt())
}

#[test]
fn test_toy_gan() -> Result<(), TrainError> {
    let _ = env_logger::builder().is_test(true).try_init();

    let gan = MlpGan::new(MlpGanConfig {
        latent_dim: 2,
        hidden_dim: 16,
        data_dim: 2,
        batch_size: BATCH_SIZE,
        loss: LossKind::Standard,
        seed: Some(2026),
    })?;
    let config = TrainerConfig::from_json_str(
        r#"{"optimizer": {"class": "adamirror", "learn_rate": 0.005}, "report_interval": 50}"#,
    )?;
    let penalty = ParameterPenaltyHook::new(&gan.d_parameters(), Side::Discriminator, 1e-3)?;

    let mut trainer = SimultaneousTrainer::new(gan, &config)?;
    trainer.add_hook(penalty);
    let reporter = CollectingReporter::default();
    trainer.set_reporter(reporter.clone());

    let initial_distance = distance_to_center(trainer.model_mut())?;
    let steps = trainer.train((0..300).map(real_batch), 300)?;
    let final_distance = distance_to_center(trainer.model_mut())?;
    println!("生成样本均值到数据中心的距离：{initial_distance:.3} -> {final_distance:.3}");

    assert_eq!(steps, 300);
    assert_eq!(trainer.current_step(), 300);
    let reported: Vec<u64> = reporter.reports.borrow().iter().map(|(s, _)| *s).collect();
    assert_eq!(reported, vec![50, 100, 150, 200, 250, 300]);
    for (_, metrics) in reporter.reports.borrow().iter() {
        for (name, value) in metrics.iter() {
            assert!(value.is_finite(), "指标{name}不是有限值");
        }
    }
    for param in trainer.model().parameters() {
        assert!(param.value()?.is_some_and(|v| v.is_all_finite()));
    }
    assert!(final_distance < initial_distance);
    Ok(())
}
