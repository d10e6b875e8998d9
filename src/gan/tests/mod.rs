mod config;
mod loss;
mod metrics;

use std::cell::RefCell;
use std::rc::Rc;

use crate::gan::{
    AdversarialModel, LossPair, Metrics, MetricsReporter, OptimizerClass, OptimizerConfig,
    TrainHook, TrainerConfig,
};
use crate::nn::{Graph, GraphError, Var};
use crate::tensor::Tensor;

/// 两个标量参数的模型：d_loss = w_d * c_d，g_loss = w_g * c_g。
/// 批次为`[1, 2]`的张量`[c_d, c_g]`，因此两侧梯度分别就是 c_d 和 c_g
struct ScriptedModel {
    graph: Graph,
    w_g: Var,
    w_d: Var,
    c_g: Var,
    c_d: Var,
    losses: LossPair,
}

impl ScriptedModel {
    fn new(w_g: f32, w_d: f32) -> Self {
        let graph = Graph::new();
        let w_g = graph.parameter_with_value(&Tensor::scalar(w_g), "w_g").unwrap();
        let w_d = graph.parameter_with_value(&Tensor::scalar(w_d), "w_d").unwrap();
        let c_g = graph.placeholder(&[1, 1], Some("c_g")).unwrap();
        let c_d = graph.placeholder(&[1, 1], Some("c_d")).unwrap();
        let losses = LossPair {
            d_loss: w_d.try_mul(&c_d).unwrap(),
            g_loss: w_g.try_mul(&c_g).unwrap(),
        };
        Self {
            graph,
            w_g,
            w_d,
            c_g,
            c_d,
            losses,
        }
    }

    fn w_g(&self) -> f32 {
        self.w_g.item().unwrap()
    }

    fn w_d(&self) -> f32 {
        self.w_d.item().unwrap()
    }
}

impl AdversarialModel for ScriptedModel {
    fn graph(&self) -> &Graph {
        &self.graph
    }

    fn forward_loss(&mut self, batch: &Tensor) -> Result<LossPair, GraphError> {
        let missing = || GraphError::InvalidOperation("批次应为[1, 2]".to_string());
        let c_d = batch.get(&[0, 0]).ok_or_else(missing)?;
        let c_g = batch.get(&[0, 1]).ok_or_else(missing)?;
        self.c_d.set_value(&Tensor::scalar(c_d))?;
        self.c_g.set_value(&Tensor::scalar(c_g))?;
        self.graph.forward(&[&self.losses.d_loss, &self.losses.g_loss])?;
        Ok(self.losses.clone())
    }

    fn g_parameters(&self) -> Vec<Var> {
        vec![self.w_g.clone()]
    }

    fn d_parameters(&self) -> Vec<Var> {
        vec![self.w_d.clone()]
    }
}

fn scripted_batch(c_d: f32, c_g: f32) -> Tensor {
    Tensor::new(&[c_d, c_g], &[1, 2])
}

fn trainer_config(class: OptimizerClass, learn_rate: f32) -> TrainerConfig {
    TrainerConfig::new(OptimizerConfig::new(class, learn_rate))
}

/// 记录每次报告的步数和指标
#[derive(Clone, Default)]
struct RecordingReporter {
    reports: Rc<RefCell<Vec<(u64, Metrics)>>>,
}

impl RecordingReporter {
    fn steps(&self) -> Vec<u64> {
        self.reports.borrow().iter().map(|(step, _)| *step).collect()
    }
}

impl MetricsReporter for RecordingReporter {
    fn report(&mut self, step: u64, metrics: &Metrics) -> std::io::Result<()> {
        self.reports.borrow_mut().push((step, metrics.clone()));
        Ok(())
    }
}

/// 返回固定附加损失的钩子
struct ConstantHook {
    d_delta: Option<Var>,
    g_delta: Option<Var>,
}

impl ConstantHook {
    fn new(graph: &Graph, d_delta: Option<f32>, g_delta: Option<f32>) -> Self {
        let constant = |value: f32| graph.input(&Tensor::scalar(value)).unwrap();
        Self {
            d_delta: d_delta.map(constant),
            g_delta: g_delta.map(constant),
        }
    }
}

impl TrainHook for ConstantHook {
    fn name(&self) -> &str {
        "constant"
    }

    fn forward(&self) -> (Option<Var>, Option<Var>) {
        (self.d_delta.clone(), self.g_delta.clone())
    }
}
