/*
 * @Date         : 2026-10-03
 * @Description  : 负责神经网络（neural network）的构建：静态计算图、自动求导、层与优化器
 */

mod graph;
pub mod layer;
mod module;
mod nodes;
pub mod optimizer;
mod var;
mod var_ops;

pub use graph::{Graph, GraphError, GraphInner};
pub use layer::Linear;
pub use module::Module;
pub use nodes::NodeId;
pub use optimizer::{Adam, AdamState, Adamirror, AdamirrorState, Optimizer, SGD};
pub use var::{Init, Var};
pub use var_ops::{VarActivationOps, VarLossOps, VarMatrixOps};

#[cfg(test)]
mod tests;
