/*
 * @Date         : 2026-10-03
 * @Description  : Graph 句柄：搭建模型时使用的入口，克隆后共享同一张图
 */

use std::cell::{Ref, RefCell, RefMut};
use std::rc::Rc;

use super::error::GraphError;
use super::inner::GraphInner;
use crate::nn::NodeId;
use crate::nn::var::{Init, Var};
use crate::tensor::Tensor;

/// `Rc<RefCell<GraphInner>>`的薄封装。由它创建的`Var`都持有同一张图的引用
#[derive(Clone, Default)]
pub struct Graph {
    inner: Rc<RefCell<GraphInner>>,
}

impl Graph {
    pub fn new() -> Self {
        Self::default()
    }

    /// 参数初始化与噪声采样都取自以`seed`播种的随机数生成器
    pub fn new_with_seed(seed: u64) -> Self {
        Self::from_rc(Rc::new(RefCell::new(GraphInner::new_with_seed(seed))))
    }

    pub(crate) const fn from_rc(inner: Rc<RefCell<GraphInner>>) -> Self {
        Self { inner }
    }

    pub fn inner(&self) -> Ref<'_, GraphInner> {
        self.inner.borrow()
    }

    pub fn inner_mut(&self) -> RefMut<'_, GraphInner> {
        self.inner.borrow_mut()
    }

    pub(crate) fn inner_rc(&self) -> Rc<RefCell<GraphInner>> {
        Rc::clone(&self.inner)
    }

    fn var(&self, id: NodeId) -> Var {
        Var::new(id, self.inner_rc())
    }

    /// 常量输入：声明后立即赋值
    pub fn input(&self, data: &Tensor) -> Result<Var, GraphError> {
        let id = {
            let mut g = self.inner_mut();
            let id = g.new_input_node(data.shape(), None)?;
            g.set_node_value(id, Some(data))?;
            id
        };
        Ok(self.var(id))
    }

    /// 只声明形状的输入，每步训练前再用`Var::set_value`喂入批次数据
    pub fn placeholder(&self, shape: &[usize], name: Option<&str>) -> Result<Var, GraphError> {
        let id = self.inner_mut().new_input_node(shape, name)?;
        Ok(self.var(id))
    }

    pub fn parameter(&self, shape: &[usize], init: Init, name: &str) -> Result<Var, GraphError> {
        let id = {
            let mut g = self.inner_mut();
            let value = init.generate(shape, &mut g);
            g.new_parameter_node(value, Some(name))?
        };
        Ok(self.var(id))
    }

    pub fn parameter_with_value(&self, value: &Tensor, name: &str) -> Result<Var, GraphError> {
        let id = self.inner_mut().new_parameter_node(value.clone(), Some(name))?;
        Ok(self.var(id))
    }

    /// 在同一个值版本下计算所有`outputs`，共享的子图只算一次
    pub fn forward(&self, outputs: &[&Var]) -> Result<(), GraphError> {
        let ids: Vec<NodeId> = outputs.iter().map(|v| v.node_id()).collect();
        self.inner_mut().forward_many(&ids)
    }

    pub fn zero_grad(&self) {
        self.inner_mut().zero_grad();
    }

    pub fn set_train_mode(&self) {
        self.inner_mut().set_train_mode();
    }

    pub fn set_eval_mode(&self) {
        self.inner_mut().set_eval_mode();
    }
}
