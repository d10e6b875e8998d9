/*
 * @Date         : 2026-10-03
 * @Description  : GraphInner 反向传播
 *
 * 支持一次从多个根节点反向传播：每个根节点以“均值归约”作为起点，
 * 即根节点的种子梯度为 ones / n，结果等价于对 Σ mean(root_i) 反向传播。
 * 这样损失项之和无需在图中新建加法节点。
 */

use super::super::error::GraphError;
use super::GraphInner;
use crate::nn::NodeId;
use crate::tensor::Tensor;
use std::collections::HashSet;

impl GraphInner {
    /// 反向传播，返回损失（均值归约后）的值
    pub fn backward(&mut self, loss: NodeId) -> Result<f32, GraphError> {
        self.backward_ex(&[loss], false)
    }

    /// 反向传播（扩展版本）
    ///
    /// - `roots`：各损失项，梯度按各自均值之和计算，同一节点出现多次则累加多次
    /// - `retain_graph`：为 true 时不释放中间节点的值，可对同一次前向结果再次反向传播
    ///
    /// 参数节点的梯度会在已有梯度上累加（清零由优化器的`zero_grad`负责）；
    /// `requires_grad`为 false 的参数不会得到梯度，只通向这类参数的子图也不会被遍历。
    pub fn backward_ex(&mut self, roots: &[NodeId], retain_graph: bool) -> Result<f32, GraphError> {
        if roots.is_empty() {
            return Err(GraphError::InvalidOperation(
                "反向传播至少需要一个损失节点".to_string(),
            ));
        }
        if !self.is_grad_enabled() {
            log::warn!("在 no_grad/eval 模式下调用 backward，这通常是误用");
        }

        // 1. 汇总损失值（也用于检查前向是否已执行）
        let mut loss_value = 0.0;
        for &root in roots {
            let node = self.get_node(root)?;
            let value = node.value().ok_or_else(|| {
                GraphError::ComputationError(format!("损失{node}没有值，请先执行 forward"))
            })?;
            loss_value += value.mean().get_data_number().unwrap_or(f32::NAN);
        }

        // 2. 反向传播
        self.reset_intermediate_grad();
        let order = self.topological_order(roots)?;
        let needs_grad = self.collect_nodes_needing_grad(&order)?;

        for &root in roots {
            if !needs_grad.contains(&root) {
                continue;
            }
            let node = self.get_node_mut(root)?;
            let shape = node.value_expected_shape().to_vec();
            let n = shape.iter().product::<usize>() as f32;
            node.accumulate_grad(&Tensor::full(1.0 / n, &shape));
        }

        for &node_id in order.iter().rev() {
            if needs_grad.contains(&node_id) {
                self.propagate_grad_to_parents(node_id, &needs_grad)?;
            }
        }

        self.last_backward_pass_id += 1;
        if !retain_graph && self.retain_depth == 0 {
            self.release_intermediate_results();
        }

        Ok(loss_value)
    }

    fn propagate_grad_to_parents(
        &mut self,
        node_id: NodeId,
        needs_grad: &HashSet<NodeId>,
    ) -> Result<(), GraphError> {
        let node = self.get_node(node_id)?;
        if node.is_leaf() {
            return Ok(());
        }
        let Some(upstream_grad) = node.grad() else {
            return Ok(());
        };

        let parents_ids = self.get_node_parents(node_id)?;
        let parents = self.get_nodes(&parents_ids)?;
        let mut parent_grads = Vec::with_capacity(parents_ids.len());
        for (index, parent_id) in parents_ids.iter().enumerate() {
            if needs_grad.contains(parent_id) {
                let grad = node.calc_grad_to_parent(index, &parents, upstream_grad)?;
                parent_grads.push((*parent_id, grad));
            }
        }

        for (parent_id, grad) in parent_grads {
            self.get_node_mut(parent_id)?.accumulate_grad(&grad);
        }
        Ok(())
    }

    /// 从根节点出发的拓扑序（父节点在前，子节点在后）
    fn topological_order(&self, roots: &[NodeId]) -> Result<Vec<NodeId>, GraphError> {
        fn dfs(
            graph: &GraphInner,
            node_id: NodeId,
            visited: &mut HashSet<NodeId>,
            order: &mut Vec<NodeId>,
        ) -> Result<(), GraphError> {
            if !visited.insert(node_id) {
                return Ok(());
            }
            for parent_id in graph.get_node_parents(node_id)? {
                dfs(graph, parent_id, visited, order)?;
            }
            order.push(node_id);
            Ok(())
        }

        let mut visited = HashSet::new();
        let mut order = Vec::new();
        for &root in roots {
            dfs(self, root, &mut visited, &mut order)?;
        }
        Ok(order)
    }

    /// 需要梯度的节点：开启梯度的参数，及至少有一个父节点需要梯度的中间节点
    fn collect_nodes_needing_grad(&self, order: &[NodeId]) -> Result<HashSet<NodeId>, GraphError> {
        let mut needs_grad = HashSet::new();
        for &node_id in order {
            let node = self.get_node(node_id)?;
            let needed = if node.is_leaf() {
                node.requires_grad()
            } else {
                self.get_node_parents(node_id)?
                    .iter()
                    .any(|parent_id| needs_grad.contains(parent_id))
            };
            if needed {
                needs_grad.insert(node_id);
            }
        }
        Ok(needs_grad)
    }
}
