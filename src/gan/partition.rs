/*
 * @Date         : 2026-10-05
 * @Description  : 生成器/判别器参数划分，梯度开关只在这里翻转
 */

use std::collections::HashSet;

use super::{AdversarialModel, TrainError};
use crate::nn::{GraphError, GraphInner, NodeId, Var};

/// 网络的一侧
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Generator,
    Discriminator,
}

impl Side {
    pub const fn opposite(self) -> Self {
        match self {
            Self::Generator => Self::Discriminator,
            Self::Discriminator => Self::Generator,
        }
    }
}

impl std::fmt::Display for Side {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Generator => write!(f, "生成器"),
            Self::Discriminator => write!(f, "判别器"),
        }
    }
}

/// 参数划分：构造训练器时从模型取得，训练期间不变
#[derive(Debug, Clone)]
pub struct ParameterPartition {
    g_params: Vec<Var>,
    d_params: Vec<Var>,
}

impl ParameterPartition {
    /// 从模型取得划分，并检查两侧不相交、不全为空、都在模型的图上
    pub fn from_model<M: AdversarialModel + ?Sized>(model: &M) -> Result<Self, TrainError> {
        let g_params = model.g_parameters();
        let d_params = model.d_parameters();
        if g_params.is_empty() && d_params.is_empty() {
            return Err(TrainError::Config("模型没有任何可训练参数".to_string()));
        }

        let graph = model.graph();
        let mut seen: HashSet<NodeId> = HashSet::new();
        for (side, params) in [(Side::Generator, &g_params), (Side::Discriminator, &d_params)] {
            for param in params {
                if !param.belongs_to(graph) {
                    return Err(TrainError::Config(format!(
                        "{side}参数{:?}不在模型的计算图上",
                        param.node_id()
                    )));
                }
                if !seen.insert(param.node_id()) {
                    return Err(TrainError::Config(format!(
                        "参数{:?}重复出现在划分中（两侧必须互不相交）",
                        param.node_id()
                    )));
                }
            }
        }

        Ok(Self { g_params, d_params })
    }

    pub fn params(&self, side: Side) -> &[Var] {
        match side {
            Side::Generator => &self.g_params,
            Side::Discriminator => &self.d_params,
        }
    }

    /// 两侧全部参数（生成器在前）
    pub fn all_params(&self) -> Vec<Var> {
        self.g_params.iter().chain(&self.d_params).cloned().collect()
    }

    /// 开启/关闭某一侧全部参数的梯度
    pub fn set_requires_gradient(
        &self,
        graph: &mut GraphInner,
        side: Side,
        enabled: bool,
    ) -> Result<(), GraphError> {
        for param in self.params(side) {
            graph.set_node_requires_grad(param.node_id(), enabled)?;
        }
        Ok(())
    }

    /// 只让`side`这一侧接收梯度
    pub fn isolate(&self, graph: &mut GraphInner, side: Side) -> Result<(), GraphError> {
        self.set_requires_gradient(graph, side, true)?;
        self.set_requires_gradient(graph, side.opposite(), false)
    }

    /// 两侧都恢复接收梯度
    pub fn restore(&self, graph: &mut GraphInner) -> Result<(), GraphError> {
        self.set_requires_gradient(graph, Side::Generator, true)?;
        self.set_requires_gradient(graph, Side::Discriminator, true)
    }
}
