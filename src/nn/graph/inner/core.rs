/*
 * @Date         : 2026-10-03
 * @Description  : GraphInner 的节点存取、命名与前向传播
 */

use std::collections::HashMap;

use rand::SeedableRng;
use rand::rngs::StdRng;

use super::super::error::GraphError;
use super::GraphInner;
use crate::nn::NodeId;
use crate::nn::nodes::NodeHandle;
use crate::tensor::Tensor;

impl GraphInner {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn new_with_seed(seed: u64) -> Self {
        Self::with_rng(Some(StdRng::seed_from_u64(seed)))
    }

    pub(super) fn with_rng(rng: Option<StdRng>) -> Self {
        Self {
            nodes: HashMap::new(),
            forward_edges: HashMap::new(),
            backward_edges: HashMap::new(),
            value_version: 0,
            last_backward_pass_id: 0,
            next_id: 0,
            is_eval_mode: false,
            retain_depth: 0,
            rng,
        }
    }

    pub fn nodes_count(&self) -> usize {
        self.nodes.len()
    }

    pub(in crate::nn) fn get_node(&self, id: NodeId) -> Result<&NodeHandle, GraphError> {
        self.nodes.get(&id).ok_or(GraphError::NodeNotFound(id))
    }

    pub(in crate::nn) fn get_node_mut(&mut self, id: NodeId) -> Result<&mut NodeHandle, GraphError> {
        self.nodes.get_mut(&id).ok_or(GraphError::NodeNotFound(id))
    }

    pub(in crate::nn) fn get_nodes(&self, ids: &[NodeId]) -> Result<Vec<&NodeHandle>, GraphError> {
        ids.iter().map(|&id| self.get_node(id)).collect()
    }

    fn edges_of(&self, edges: &HashMap<NodeId, Vec<NodeId>>, id: NodeId) -> Result<Vec<NodeId>, GraphError> {
        self.get_node(id)?;
        Ok(edges.get(&id).cloned().unwrap_or_default())
    }

    /// 按创建节点时给出的顺序
    pub fn get_node_parents(&self, id: NodeId) -> Result<Vec<NodeId>, GraphError> {
        self.edges_of(&self.backward_edges, id)
    }

    pub fn get_node_children(&self, id: NodeId) -> Result<Vec<NodeId>, GraphError> {
        self.edges_of(&self.forward_edges, id)
    }

    pub fn get_node_name(&self, id: NodeId) -> Result<&str, GraphError> {
        self.get_node(id).map(NodeHandle::name)
    }

    pub fn get_node_value_expected_shape(&self, id: NodeId) -> Result<&[usize], GraphError> {
        self.get_node(id).map(NodeHandle::value_expected_shape)
    }

    pub fn get_node_value(&self, id: NodeId) -> Result<Option<&Tensor>, GraphError> {
        self.get_node(id).map(NodeHandle::value)
    }

    /// 只有输入与参数节点可以直接赋值；赋值后所有中间结果都视为过期
    pub fn set_node_value(&mut self, id: NodeId, value: Option<&Tensor>) -> Result<(), GraphError> {
        let node = self.get_node_mut(id)?;
        if !node.is_leaf() {
            return Err(GraphError::InvalidOperation(format!(
                "{node}不是输入/参数节点，其值只能由前向传播计算"
            )));
        }
        node.set_value(value)?;
        self.value_version += 1;
        Ok(())
    }

    pub fn get_node_grad(&self, id: NodeId) -> Result<Option<Tensor>, GraphError> {
        Ok(self.get_node(id)?.grad().cloned())
    }

    pub fn clear_node_grad(&mut self, id: NodeId) -> Result<(), GraphError> {
        self.get_node_mut(id)?.clear_grad();
        Ok(())
    }

    pub fn zero_grad(&mut self) {
        self.nodes.values_mut().for_each(NodeHandle::clear_grad);
    }

    pub fn is_parameter_node(&self, id: NodeId) -> Result<bool, GraphError> {
        self.get_node(id).map(NodeHandle::is_parameter)
    }

    /// 全部参数节点，按创建顺序
    pub fn parameter_nodes(&self) -> Vec<NodeId> {
        let mut ids: Vec<NodeId> = self
            .nodes
            .iter()
            .filter(|(_, node)| node.is_parameter())
            .map(|(&id, _)| id)
            .collect();
        ids.sort_unstable();
        ids
    }

    /// 未设种子时退回到熵源
    pub fn randn(&mut self, mean: f32, std_dev: f32, shape: &[usize]) -> Tensor {
        match self.rng.as_mut() {
            Some(rng) => Tensor::normal_with_rng(mean, std_dev, shape, rng),
            None => Tensor::normal(mean, std_dev, shape),
        }
    }

    // 节点 ID 从 1 开始
    pub(in crate::nn::graph) fn generate_valid_node_id(&mut self) -> NodeId {
        self.next_id += 1;
        NodeId(self.next_id)
    }

    fn is_name_taken(&self, name: &str) -> bool {
        self.nodes.values().any(|node| node.name() == name)
    }

    /// 给了名字就要求不重名；没给则按`{类型}_{序号}`取第一个空闲的
    pub(in crate::nn::graph) fn generate_valid_new_node_name(
        &self,
        base_name: &str,
        node_type: &str,
    ) -> Result<String, GraphError> {
        if base_name.is_empty() {
            return Ok((1..)
                .map(|n| format!("{node_type}_{n}"))
                .find(|name| !self.is_name_taken(name))
                .unwrap_or_default());
        }
        if self.is_name_taken(base_name) {
            return Err(GraphError::DuplicateNodeName(base_name.to_string()));
        }
        Ok(base_name.to_string())
    }

    pub fn forward(&mut self, node_id: NodeId) -> Result<(), GraphError> {
        self.forward_many(&[node_id])
    }

    /// 在当前值版本下依次求值；已是最新的节点直接复用
    pub fn forward_many(&mut self, node_ids: &[NodeId]) -> Result<(), GraphError> {
        node_ids.iter().try_for_each(|&id| self.evaluate(id))
    }

    fn evaluate(&mut self, node_id: NodeId) -> Result<(), GraphError> {
        let version = self.value_version;
        let node = self.get_node(node_id)?;
        match (node.is_leaf(), node.value().is_some()) {
            (true, true) => return Ok(()),
            (true, false) => {
                return Err(GraphError::InvalidOperation(format!(
                    "{node}是输入/参数节点，其值应先通过 set_value 设置"
                )));
            }
            (false, true) if node.computed_version() == Some(version) => return Ok(()),
            _ => {}
        }

        let parents = self.get_node_parents(node_id)?;
        for &parent in &parents {
            self.evaluate(parent)?;
        }

        // 先把本节点移出，才能在借用父节点的同时修改它
        let mut node = self
            .nodes
            .remove(&node_id)
            .ok_or(GraphError::NodeNotFound(node_id))?;
        let result = self
            .get_nodes(&parents)
            .and_then(|parent_nodes| node.calc_value_by_parents(&parent_nodes, version));
        self.nodes.insert(node_id, node);
        result
    }

    /// 丢弃所有中间节点的值与梯度，叶子节点不受影响
    pub(in crate::nn::graph) fn release_intermediate_results(&mut self) {
        for node in self.nodes.values_mut().filter(|node| !node.is_leaf()) {
            node.clear_value();
            node.clear_grad();
        }
    }

    /// 反向传播开始前清掉上一轮留在非参数节点上的梯度
    pub(in crate::nn::graph) fn reset_intermediate_grad(&mut self) {
        for node in self.nodes.values_mut().filter(|node| !node.is_parameter()) {
            node.clear_grad();
        }
    }
}
