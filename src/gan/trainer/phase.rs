/*
 * @Date         : 2026-10-05
 * @Description  : 单个训练步骤的阶段
 */

use crate::nn::GraphInner;

/// 训练步骤的阶段。每步按顺序经过这些阶段，结束（或出错）后回到`Idle`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepPhase {
    Idle,
    GradientsCleared,
    ForwardComputed,
    GeneratorBackwardDone,
    DiscriminatorBackwardDone,
    OptimizerStepped,
    ReportedMetrics,
}

/// 阶段观察者，进入每个阶段时被调用，可借此检查当时的梯度
pub type PhaseObserver = Box<dyn FnMut(StepPhase, &GraphInner)>;

/// 记录当前阶段并通知观察者
pub(super) struct PhaseTracker {
    phase: StepPhase,
    observer: Option<PhaseObserver>,
}

impl PhaseTracker {
    pub(super) const fn new() -> Self {
        Self {
            phase: StepPhase::Idle,
            observer: None,
        }
    }

    pub(super) const fn phase(&self) -> StepPhase {
        self.phase
    }

    pub(super) fn set_observer(&mut self, observer: PhaseObserver) {
        self.observer = Some(observer);
    }

    pub(super) fn enter(&mut self, next: StepPhase, graph: &GraphInner) {
        log::debug!("训练步骤：{:?} -> {next:?}", self.phase);
        self.phase = next;
        if let Some(observer) = self.observer.as_mut() {
            observer(next, graph);
        }
    }

    pub(super) const fn reset(&mut self) {
        self.phase = StepPhase::Idle;
    }
}
