/*
 * @Date         : 2026-10-03
 * @Description  : 往图里添加各类节点的 new_*_node 方法
 */

use super::super::error::GraphError;
use super::GraphInner;
use crate::nn::NodeId;
use crate::nn::nodes::NodeHandle;
use crate::nn::nodes::raw_node::{
    Add, Affine, Input, LeakyRelu, MatMul, Mean, Multiply, NodeType, Parameter, Sigmoid, Softplus,
    Subtract, Tanh,
};
use crate::tensor::Tensor;

impl GraphInner {
    /// 分配 ID 与名称，登记父子边后放入图中
    fn insert_node(
        &mut self,
        mut handle: NodeHandle,
        name: Option<&str>,
        node_type: &str,
        parents: &[NodeId],
    ) -> Result<NodeId, GraphError> {
        let name = self.generate_valid_new_node_name(name.unwrap_or_default(), node_type)?;
        let id = self.generate_valid_node_id();

        for parent in parents {
            let children = self.forward_edges.entry(*parent).or_default();
            if children.last() != Some(&id) {
                children.push(id);
            }
        }
        self.backward_edges.insert(id, parents.to_vec());

        handle.bind_id_and_name(id, &name);
        self.nodes.insert(id, handle);
        Ok(id)
    }

    /// 由父节点构造新的运算节点并加入图中
    fn add_op_node<T, F>(
        &mut self,
        parents_ids: &[NodeId],
        name: Option<&str>,
        node_type: &str,
        build: F,
    ) -> Result<NodeId, GraphError>
    where
        T: Into<NodeType>,
        F: FnOnce(&[&NodeHandle]) -> Result<T, GraphError>,
    {
        let node = {
            let parents = self.get_nodes(parents_ids)?;
            NodeHandle::new(build(&parents)?)
        };
        self.insert_node(node, name, node_type, parents_ids)
    }

    /// 创建输入节点（值需在前向传播前设置）
    pub fn new_input_node(&mut self, shape: &[usize], name: Option<&str>) -> Result<NodeId, GraphError> {
        let node = NodeHandle::new(Input::new(shape)?);
        self.insert_node(node, name, "input", &[])
    }

    /// 以给定初值创建参数节点
    pub fn new_parameter_node(&mut self, initial_value: Tensor, name: Option<&str>) -> Result<NodeId, GraphError> {
        let node = NodeHandle::new(Parameter::new(initial_value)?);
        let node_id = self.insert_node(node, name, "parameter", &[])?;
        self.value_version += 1;
        Ok(node_id)
    }

    pub fn new_add_node(&mut self, a: NodeId, b: NodeId, name: Option<&str>) -> Result<NodeId, GraphError> {
        self.add_op_node(&[a, b], name, "add", Add::new)
    }

    pub fn new_subtract_node(&mut self, a: NodeId, b: NodeId, name: Option<&str>) -> Result<NodeId, GraphError> {
        self.add_op_node(&[a, b], name, "subtract", Subtract::new)
    }

    pub fn new_multiply_node(&mut self, a: NodeId, b: NodeId, name: Option<&str>) -> Result<NodeId, GraphError> {
        self.add_op_node(&[a, b], name, "multiply", Multiply::new)
    }

    pub fn new_mat_mul_node(&mut self, a: NodeId, b: NodeId, name: Option<&str>) -> Result<NodeId, GraphError> {
        self.add_op_node(&[a, b], name, "mat_mul", MatMul::new)
    }

    /// y = scale * x + shift
    pub fn new_affine_node(
        &mut self,
        x: NodeId,
        scale: f32,
        shift: f32,
        name: Option<&str>,
    ) -> Result<NodeId, GraphError> {
        self.add_op_node(&[x], name, "affine", |parents| {
            Affine::new(parents, scale, shift)
        })
    }

    pub fn new_sigmoid_node(&mut self, x: NodeId, name: Option<&str>) -> Result<NodeId, GraphError> {
        self.add_op_node(&[x], name, "sigmoid", Sigmoid::new)
    }

    pub fn new_tanh_node(&mut self, x: NodeId, name: Option<&str>) -> Result<NodeId, GraphError> {
        self.add_op_node(&[x], name, "tanh", Tanh::new)
    }

    pub fn new_leaky_relu_node(
        &mut self,
        x: NodeId,
        negative_slope: f32,
        name: Option<&str>,
    ) -> Result<NodeId, GraphError> {
        self.add_op_node(&[x], name, "leaky_relu", |parents| {
            LeakyRelu::new(parents, negative_slope)
        })
    }

    pub fn new_softplus_node(&mut self, x: NodeId, name: Option<&str>) -> Result<NodeId, GraphError> {
        self.add_op_node(&[x], name, "softplus", Softplus::new)
    }

    pub fn new_mean_node(&mut self, x: NodeId, name: Option<&str>) -> Result<NodeId, GraphError> {
        self.add_op_node(&[x], name, "mean", Mean::new)
    }
}
