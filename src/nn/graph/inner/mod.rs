/*
 * @Date         : 2026-10-03
 * @Description  : GraphInner，impl 块按职责拆在子模块里：
 * - core.rs: 节点存取、命名、forward
 * - backward.rs: 多根反向传播
 * - mode.rs: train/eval、参数冻结、保留中间结果的作用域
 * - node_builders.rs: new_*_node
 */

mod backward;
mod core;
mod mode;
mod node_builders;

use crate::nn::NodeId;
use crate::nn::nodes::NodeHandle;
use rand::rngs::StdRng;
use std::collections::HashMap;

/// 静态计算图本体：节点在搭建模型时一次建好，之后每步只改写输入的值再重新前向。
/// 平时经由`Graph`句柄使用；训练器需要连续多个操作时直接借出`graph.inner_mut()`
pub struct GraphInner {
    pub(in crate::nn::graph) nodes: HashMap<NodeId, NodeHandle>,
    /// 父 -> 子
    pub(in crate::nn::graph) forward_edges: HashMap<NodeId, Vec<NodeId>>,
    /// 子 -> 父，顺序即创建节点时传入的父节点顺序
    pub(in crate::nn::graph) backward_edges: HashMap<NodeId, Vec<NodeId>>,
    /// 任一叶子被赋值就加一。中间节点只有在计算时记下的版本与之相同才算有效
    pub(in crate::nn::graph) value_version: u64,
    pub(in crate::nn::graph) last_backward_pass_id: u64,
    pub(in crate::nn::graph) next_id: u64,
    pub(in crate::nn::graph) is_eval_mode: bool,
    /// `with_retained_graph`的嵌套深度
    pub(in crate::nn::graph) retain_depth: usize,
    /// None 时改用熵源
    pub(in crate::nn::graph) rng: Option<StdRng>,
}

impl Default for GraphInner {
    fn default() -> Self {
        Self::with_rng(None)
    }
}
