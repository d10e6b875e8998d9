/*
 * @Date         : 2026-10-02
 * @Description  : 张量的乘法（哈达玛积），逐元素运算，支持 NumPy 风格广播以及与纯数（f32）的组合。
 */

use super::add::impl_elementwise_op;
use crate::errors::Operator;
use crate::tensor::Tensor;

impl_elementwise_op!(Mul, mul, Operator::Mul, |a: f32, b: f32| a * b);
