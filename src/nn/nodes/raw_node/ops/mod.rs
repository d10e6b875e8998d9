mod add;
mod affine;
mod leaky_relu;
mod mat_mul;
mod mean;
mod multiply;
mod sigmoid;
mod softplus;
mod subtract;
mod tanh;

pub(crate) use add::Add;
pub(crate) use affine::Affine;
pub(crate) use leaky_relu::LeakyRelu;
pub(crate) use mat_mul::MatMul;
pub(crate) use mean::Mean;
pub(crate) use multiply::Multiply;
pub(crate) use sigmoid::Sigmoid;
pub(crate) use softplus::Softplus;
pub(crate) use subtract::Subtract;
pub(crate) use tanh::Tanh;

use crate::nn::GraphError;
use crate::nn::nodes::NodeHandle;
use crate::tensor::broadcast_shape;

/// 逐元素二元节点的输出形状：两个父节点形状广播后的形状
fn broadcast_parents_shape(type_name: &str, parents: &[&NodeHandle]) -> Result<Vec<usize>, GraphError> {
    super::check_parents_count(type_name, parents, 2)?;
    let shape_1 = parents[0].value_expected_shape();
    let shape_2 = parents[1].value_expected_shape();
    broadcast_shape(shape_1, shape_2).ok_or_else(|| GraphError::ShapeMismatch {
        expected: shape_1.to_vec(),
        got: shape_2.to_vec(),
        message: format!("{type_name}节点的两个父节点形状无法广播"),
    })
}
