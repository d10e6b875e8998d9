mod adam;
mod adamirror;
mod sgd;

use crate::nn::{Graph, Var, VarLossOps};
use crate::tensor::Tensor;

/// 构造 loss = mean(w ⊙ g)，其梯度恰为 g / n；每步通过`g`输入注入想要的梯度
fn scripted_grad_graph(initial: &Tensor) -> (Graph, Var, Var, Var) {
    let graph = Graph::new();
    let w = graph.parameter_with_value(initial, "w").unwrap();
    let g = graph.placeholder(initial.shape(), Some("g")).unwrap();
    let loss = w.try_mul(&g).unwrap().mean().unwrap();
    (graph, w, g, loss)
}
