/*
 * @Date         : 2026-10-05
 * @Description  : 同时训练器（SimultaneousTrainer）：每一步对生成器和判别器各做一次隔离的反向传播，
 *                 再由同一个优化器一次性更新两侧参数。
 *
 * 每步的顺序：
 * 1. 清零两侧参数的梯度
 * 2. 执行各钩子的 before_step（可调整学习率等）
 * 3. 前向得到基础损失 (d_loss, g_loss)
 * 4. 把各钩子返回的附加损失加到对应一侧
 * 5. 只开启生成器梯度，对 g_loss 反向传播（保留中间结果）
 * 6. 只开启判别器梯度，对 d_loss 反向传播
 * 7. 恢复两侧梯度开关
 * 8. 优化器更新
 * 9. 步数加一，逢`report_interval`的倍数报告指标
 */

use std::borrow::Borrow;

use super::phase::{PhaseObserver, PhaseTracker, StepPhase};
use crate::gan::{
    AdversarialModel, Metrics, MetricsReporter, ParameterPartition, PrintReporter, Side, TrainError,
    TrainHook, TrainerConfig,
};
use crate::gan::hooks::StepContext;
use crate::nn::{Graph, GraphInner, NodeId, Optimizer, Var};
use crate::tensor::Tensor;

/// 最近一步实际用于反向传播的损失（均值归约并加上钩子附加项之后）
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StepLosses {
    pub d_loss: f32,
    pub g_loss: f32,
}

pub struct SimultaneousTrainer<M: AdversarialModel> {
    model: M,
    partition: ParameterPartition,
    optimizer: Box<dyn Optimizer>,
    hooks: Vec<Box<dyn TrainHook>>,
    reporter: Box<dyn MetricsReporter>,
    report_interval: u64,
    current_step: u64,
    last_losses: Option<StepLosses>,
    tracker: PhaseTracker,
}

impl<M: AdversarialModel> SimultaneousTrainer<M> {
    /// 按配置构造训练器，优化器绑定两侧全部参数。配置非法时直接失败
    pub fn new(model: M, config: &TrainerConfig) -> Result<Self, TrainError> {
        config.validate()?;
        let partition = ParameterPartition::from_model(&model)?;
        let optimizer = config
            .optimizer
            .build(model.graph(), &partition.all_params())?;
        Self::assemble(model, partition, optimizer, config.report_interval)
    }

    /// 使用外部构造好的优化器。优化器必须绑定了两侧的全部参数
    pub fn with_optimizer(
        model: M,
        optimizer: Box<dyn Optimizer>,
        report_interval: u64,
    ) -> Result<Self, TrainError> {
        if report_interval == 0 {
            return Err(TrainError::Config(
                "report_interval 必须至少为 1".to_string(),
            ));
        }
        let partition = ParameterPartition::from_model(&model)?;
        for param in partition.all_params() {
            if !optimizer.params().iter().any(|p| p.node_id() == param.node_id()) {
                return Err(TrainError::Config(format!(
                    "参数`{}`没有交给优化器",
                    param.name()?
                )));
            }
        }
        Self::assemble(model, partition, optimizer, report_interval)
    }

    fn assemble(
        model: M,
        partition: ParameterPartition,
        optimizer: Box<dyn Optimizer>,
        report_interval: u64,
    ) -> Result<Self, TrainError> {
        log::info!(
            "创建同时训练器：优化器{}，学习率{}，生成器参数{}个，判别器参数{}个，每{}步报告一次",
            optimizer.name(),
            optimizer.learning_rate(),
            partition.params(Side::Generator).len(),
            partition.params(Side::Discriminator).len(),
            report_interval
        );
        Ok(Self {
            model,
            partition,
            optimizer,
            hooks: Vec::new(),
            reporter: Box::new(PrintReporter::new()),
            report_interval,
            current_step: 0,
            last_losses: None,
            tracker: PhaseTracker::new(),
        })
    }

    /// 注册钩子，按注册顺序调用
    pub fn add_hook(&mut self, hook: impl TrainHook + 'static) {
        log::debug!("注册训练钩子`{}`", hook.name());
        self.hooks.push(Box::new(hook));
    }

    pub fn set_reporter(&mut self, reporter: impl MetricsReporter + 'static) {
        self.reporter = Box::new(reporter);
    }

    /// 设置阶段观察者
    pub fn set_phase_observer(&mut self, observer: impl FnMut(StepPhase, &GraphInner) + 'static) {
        let observer: PhaseObserver = Box::new(observer);
        self.tracker.set_observer(observer);
    }

    /// 已成功完成的步数
    pub const fn current_step(&self) -> u64 {
        self.current_step
    }

    pub const fn phase(&self) -> StepPhase {
        self.tracker.phase()
    }

    pub const fn last_losses(&self) -> Option<StepLosses> {
        self.last_losses
    }

    pub const fn report_interval(&self) -> u64 {
        self.report_interval
    }

    pub fn optimizer(&self) -> &dyn Optimizer {
        self.optimizer.as_ref()
    }

    pub fn optimizer_mut(&mut self) -> &mut dyn Optimizer {
        self.optimizer.as_mut()
    }

    pub const fn model(&self) -> &M {
        &self.model
    }

    pub const fn model_mut(&mut self) -> &mut M {
        &mut self.model
    }

    pub const fn partition(&self) -> &ParameterPartition {
        &self.partition
    }

    /// 当前模型指标加上最近一步的损失
    pub fn current_metrics(&self) -> Metrics {
        let mut metrics = self.model.metrics();
        if let Some(losses) = self.last_losses {
            metrics.insert("d_loss", losses.d_loss);
            metrics.insert("g_loss", losses.g_loss);
        }
        metrics
    }

    /// 执行一步训练。出错时本步作废：步数不变，若错误发生在优化器更新之前则参数和优化器状态都不变
    pub fn step(&mut self, batch: &Tensor) -> Result<(), TrainError> {
        let result = self.run_step(batch);
        self.tracker.reset();
        if let Err(e) = &result {
            log::warn!("第{}步训练失败：{e}", self.current_step + 1);
        }
        result
    }

    /// 依次用`batches`训练，最多`steps`步，返回实际完成的步数
    pub fn train<I>(&mut self, batches: I, steps: usize) -> Result<usize, TrainError>
    where
        I: IntoIterator,
        I::Item: Borrow<Tensor>,
    {
        let mut done = 0;
        for batch in batches.into_iter().take(steps) {
            self.step(batch.borrow())?;
            done += 1;
        }
        Ok(done)
    }

    fn run_step(&mut self, batch: &Tensor) -> Result<(), TrainError> {
        let graph = self.model.graph().clone();

        // 1. 清零梯度
        self.optimizer.zero_grad()?;
        self.tracker
            .enter(StepPhase::GradientsCleared, &graph.inner());

        // 2. before_step
        for hook in &mut self.hooks {
            let mut ctx = StepContext::new(self.current_step, batch, self.optimizer.as_mut());
            hook.before_step(&mut ctx)?;
        }

        // 3. 基础损失
        let base = self.model.forward_loss(batch)?;
        let mut metrics = self.model.metrics();

        // 4. 合并钩子的附加损失
        let mut d_terms = vec![base.d_loss.clone()];
        let mut g_terms = vec![base.g_loss.clone()];
        for hook in &self.hooks {
            let (d_delta, g_delta) = hook.forward();
            if let Some(delta) = d_delta {
                check_hook_delta(hook.name(), &delta, &base.d_loss, &graph)?;
                d_terms.push(delta);
            }
            if let Some(delta) = g_delta {
                check_hook_delta(hook.name(), &delta, &base.g_loss, &graph)?;
                g_terms.push(delta);
            }
        }

        let all_terms: Vec<&Var> = d_terms.iter().chain(&g_terms).collect();
        graph.forward(&all_terms)?;
        let d_ids: Vec<NodeId> = d_terms.iter().map(Var::node_id).collect();
        let g_ids: Vec<NodeId> = g_terms.iter().map(Var::node_id).collect();
        let losses = {
            let g = graph.inner();
            StepLosses {
                d_loss: merged_loss(&g, &d_ids, "d_loss")?,
                g_loss: merged_loss(&g, &g_ids, "g_loss")?,
            }
        };
        self.tracker
            .enter(StepPhase::ForwardComputed, &graph.inner());

        // 5~7. 两次隔离的反向传播
        let partition = &self.partition;
        let tracker = &mut self.tracker;
        graph.inner_mut().with_retained_graph(|g| {
            let result = isolated_backward(g, partition, tracker, &g_ids, &d_ids);
            let restored = partition.restore(g);
            result.and(restored.map_err(TrainError::from))
        })?;

        // 8. 更新参数
        self.optimizer.step()?;
        self.tracker
            .enter(StepPhase::OptimizerStepped, &graph.inner());

        // 9. 计数与报告
        self.current_step += 1;
        self.last_losses = Some(losses);
        log::debug!(
            "第{}步完成：d_loss={}，g_loss={}",
            self.current_step,
            losses.d_loss,
            losses.g_loss
        );
        if self.current_step % self.report_interval == 0 {
            metrics.insert("d_loss", losses.d_loss);
            metrics.insert("g_loss", losses.g_loss);
            if let Err(e) = self.reporter.report(self.current_step, &metrics) {
                log::warn!("第{}步指标报告失败：{e}", self.current_step);
            }
            self.tracker
                .enter(StepPhase::ReportedMetrics, &graph.inner());
        }
        Ok(())
    }
}

/// 先只让生成器接收梯度对`g_ids`反向传播，再只让判别器接收梯度对`d_ids`反向传播
fn isolated_backward(
    g: &mut GraphInner,
    partition: &ParameterPartition,
    tracker: &mut PhaseTracker,
    g_ids: &[NodeId],
    d_ids: &[NodeId],
) -> Result<(), TrainError> {
    partition.isolate(g, Side::Generator)?;
    g.backward_ex(g_ids, true)?;
    tracker.enter(StepPhase::GeneratorBackwardDone, g);

    partition.isolate(g, Side::Discriminator)?;
    g.backward_ex(d_ids, true)?;
    tracker.enter(StepPhase::DiscriminatorBackwardDone, g);
    Ok(())
}

/// 附加损失必须在模型的图上，且为标量或与基础损失同形
fn check_hook_delta(hook: &str, delta: &Var, base: &Var, graph: &Graph) -> Result<(), TrainError> {
    if !delta.belongs_to(graph) {
        return Err(TrainError::HookContract {
            hook: hook.to_string(),
            message: "附加损失不在模型的计算图上".to_string(),
        });
    }
    let shape = delta.value_expected_shape()?;
    let base_shape = base.value_expected_shape()?;
    if shape.iter().product::<usize>() != 1 && shape != base_shape {
        return Err(TrainError::HookContract {
            hook: hook.to_string(),
            message: format!("附加损失形状{shape:?}既不是标量也不等于基础损失形状{base_shape:?}"),
        });
    }
    Ok(())
}

/// 各损失项均值之和，任一项含非有限值则报数值错误
fn merged_loss(g: &GraphInner, terms: &[NodeId], label: &str) -> Result<f32, TrainError> {
    let mut total = 0.0;
    for &id in terms {
        let value = g.get_node_value(id)?.ok_or_else(|| {
            TrainError::Numerical(format!("{label}的损失项{id}没有值"))
        })?;
        if !value.is_all_finite() {
            return Err(TrainError::Numerical(format!(
                "{label}的损失项`{}`含 NaN 或无穷",
                g.get_node_name(id)?
            )));
        }
        total += value.mean().get_data_number().unwrap_or(f32::NAN);
    }
    if total.is_finite() {
        Ok(total)
    } else {
        Err(TrainError::Numerical(format!("{label}溢出为{total}")))
    }
}

impl<M: AdversarialModel> std::fmt::Debug for SimultaneousTrainer<M> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SimultaneousTrainer")
            .field("optimizer", &self.optimizer.name())
            .field("hooks", &self.hooks.len())
            .field("report_interval", &self.report_interval)
            .field("current_step", &self.current_step)
            .field("phase", &self.tracker.phase())
            .finish()
    }
}
