/*
 * @Date         : 2026-10-03
 * @Description  : Var：节点 ID 加上所在图的引用，用来链式搭建静态图。
 *                 构图操作一律返回 Result，跨图、形状不兼容等错误由调用方处理。
 */

use std::cell::RefCell;
use std::rc::Rc;

use super::graph::{Graph, GraphInner};
use super::{GraphError, NodeId};
use crate::tensor::Tensor;

/// 参数初始化方式。随机方式都从图的随机数生成器采样，图有种子时可复现
#[derive(Debug, Clone, PartialEq)]
pub enum Init {
    Constant(f32),
    Zeros,
    Normal { mean: f32, std: f32 },
    /// He：std = √(2 / fan_in)
    Kaiming,
    /// Glorot：std = √(2 / (fan_in + fan_out))
    Xavier,
}

impl Init {
    pub(crate) fn generate(&self, shape: &[usize], graph: &mut GraphInner) -> Tensor {
        // 权重形状约定为 [fan_in, fan_out]
        let fan_in = shape.first().copied().unwrap_or(1);
        let fan_out = shape.get(1).copied().unwrap_or(1);
        let std = match *self {
            Self::Constant(v) => return Tensor::full(v, shape),
            Self::Zeros => return Tensor::zeros(shape),
            Self::Normal { mean, std } => return graph.randn(mean, std, shape),
            Self::Kaiming => (2.0 / fan_in.max(1) as f32).sqrt(),
            Self::Xavier => (2.0 / (fan_in + fan_out).max(1) as f32).sqrt(),
        };
        graph.randn(0.0, std, shape)
    }
}

/// ```ignore
/// let graph = Graph::new();
/// let x = graph.placeholder(&[batch, 2], Some("x"))?;
/// let h = x.matmul(&w)?.try_add(&b)?.leaky_relu(0.2)?;
/// h.mean()?.backward()?;
/// ```
///
/// 克隆只复制`Rc`，多个 Var 可以指向同一个节点
#[derive(Clone)]
pub struct Var {
    id: NodeId,
    graph: Rc<RefCell<GraphInner>>,
}

impl std::fmt::Debug for Var {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Var({})", self.id)
    }
}

impl Var {
    pub(crate) const fn new(id: NodeId, graph: Rc<RefCell<GraphInner>>) -> Self {
        Self { id, graph }
    }

    pub const fn node_id(&self) -> NodeId {
        self.id
    }

    pub fn same_graph(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.graph, &other.graph)
    }

    pub fn belongs_to(&self, graph: &Graph) -> bool {
        Rc::ptr_eq(&self.graph, &graph.inner_rc())
    }

    /// 节点创建时就确定的输出形状
    pub fn value_expected_shape(&self) -> Result<Vec<usize>, GraphError> {
        let g = self.graph.borrow();
        g.get_node_value_expected_shape(self.id).map(<[usize]>::to_vec)
    }

    pub fn name(&self) -> Result<String, GraphError> {
        let g = self.graph.borrow();
        g.get_node_name(self.id).map(str::to_string)
    }

    /// 由本节点派生一个同图的新节点
    pub(crate) fn derive<F>(&self, build: F) -> Result<Self, GraphError>
    where
        F: FnOnce(&mut GraphInner) -> Result<NodeId, GraphError>,
    {
        let id = build(&mut self.graph.borrow_mut())?;
        Ok(Self::new(id, Rc::clone(&self.graph)))
    }

    /// 同`derive`，但先确认`other`在同一张图上
    pub(crate) fn derive_binary<F>(&self, other: &Self, operation: &str, build: F) -> Result<Self, GraphError>
    where
        F: FnOnce(&mut GraphInner, NodeId, NodeId) -> Result<NodeId, GraphError>,
    {
        if !self.same_graph(other) {
            return Err(GraphError::InvalidOperation(format!(
                "不能对来自不同 Graph 的 Var 进行{operation}"
            )));
        }
        self.derive(|g| build(g, self.id, other.id))
    }

    /// 仅参数节点可能为 true
    pub fn requires_grad(&self) -> Result<bool, GraphError> {
        self.graph.borrow().is_node_requires_grad(self.id)
    }

    pub fn set_requires_grad(&self, requires_grad: bool) -> Result<(), GraphError> {
        let mut g = self.graph.borrow_mut();
        g.set_node_requires_grad(self.id, requires_grad)
    }

    pub fn forward(&self) -> Result<(), GraphError> {
        self.graph.borrow_mut().forward(self.id)
    }

    /// 先前向再以均值为起点反向传播，返回本节点值的均值
    pub fn backward(&self) -> Result<f32, GraphError> {
        let mut g = self.graph.borrow_mut();
        g.forward(self.id)?;
        g.backward(self.id)
    }

    pub fn value(&self) -> Result<Option<Tensor>, GraphError> {
        let g = self.graph.borrow();
        Ok(g.get_node_value(self.id)?.cloned())
    }

    /// 只对输入与参数节点有效
    pub fn set_value(&self, value: &Tensor) -> Result<(), GraphError> {
        self.graph.borrow_mut().set_node_value(self.id, Some(value))
    }

    /// 单元素节点的值
    pub fn item(&self) -> Result<f32, GraphError> {
        let g = self.graph.borrow();
        let value = g
            .get_node_value(self.id)?
            .ok_or_else(|| GraphError::ComputationError(format!("节点{}还没有值", self.id)))?;
        value.get_data_number().ok_or_else(|| {
            GraphError::InvalidOperation(format!("节点{}的值形状为{:?}，不是标量", self.id, value.shape()))
        })
    }

    pub fn grad(&self) -> Result<Option<Tensor>, GraphError> {
        self.graph.borrow().get_node_grad(self.id)
    }

    pub fn try_add(&self, other: &Self) -> Result<Self, GraphError> {
        self.derive_binary(other, "加法", |g, a, b| g.new_add_node(a, b, None))
    }

    pub fn try_sub(&self, other: &Self) -> Result<Self, GraphError> {
        self.derive_binary(other, "减法", |g, a, b| g.new_subtract_node(a, b, None))
    }

    /// 逐元素乘法，支持广播
    pub fn try_mul(&self, other: &Self) -> Result<Self, GraphError> {
        self.derive_binary(other, "乘法", |g, a, b| g.new_multiply_node(a, b, None))
    }

    pub fn scale(&self, factor: f32) -> Result<Self, GraphError> {
        self.derive(|g| g.new_affine_node(self.id, factor, 0.0, None))
    }

    pub fn shift(&self, offset: f32) -> Result<Self, GraphError> {
        self.derive(|g| g.new_affine_node(self.id, 1.0, offset, None))
    }

    pub fn neg(&self) -> Result<Self, GraphError> {
        self.scale(-1.0)
    }

    pub fn square(&self) -> Result<Self, GraphError> {
        self.try_mul(self)
    }
}
