/*
 * @Date         : 2026-10-02
 * @Description  : 张量的复合赋值运算（+=、-=、*=、/=）。
 *                 右操作数可以是张量（须能广播到左操作数的形状）或纯数。
 */

use crate::errors::{Operator, TensorError};
use crate::tensor::Tensor;
use ndarray::Zip;
use std::ops::{AddAssign, DivAssign, MulAssign, SubAssign};

fn assign_within_tensors(
    target: &mut Tensor,
    other: &Tensor,
    operator: Operator,
    f: impl Fn(&mut f32, f32),
) {
    let shape = target.shape().to_vec();
    let view = other.array().broadcast(shape.clone()).unwrap_or_else(|| {
        panic!(
            "{}",
            TensorError::OperatorError {
                operator,
                tensor1_shape: shape.clone(),
                tensor2_shape: other.shape().to_vec(),
            }
        )
    });
    Zip::from(&mut target.data)
        .and(&view)
        .for_each(|a, &b| f(a, b));
}

macro_rules! impl_assign_op {
    ($trait:ident, $method:ident, $operator:expr, $f:expr) => {
        impl $trait for Tensor {
            fn $method(&mut self, other: Self) {
                assign_within_tensors(self, &other, $operator, $f);
            }
        }
        impl<'a> $trait<&'a Self> for Tensor {
            fn $method(&mut self, other: &'a Self) {
                assign_within_tensors(self, other, $operator, $f);
            }
        }
        impl $trait<f32> for Tensor {
            fn $method(&mut self, scalar: f32) {
                let f = $f;
                self.data.map_inplace(|a| f(a, scalar));
            }
        }
    };
}

impl_assign_op!(AddAssign, add_assign, Operator::Add, |a: &mut f32, b: f32| *a += b);
impl_assign_op!(SubAssign, sub_assign, Operator::Sub, |a: &mut f32, b: f32| *a -= b);
impl_assign_op!(MulAssign, mul_assign, Operator::Mul, |a: &mut f32, b: f32| *a *= b);
impl_assign_op!(DivAssign, div_assign, Operator::Div, |a: &mut f32, b: f32| *a /= b);
