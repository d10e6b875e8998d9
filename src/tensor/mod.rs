/*
 * @Date         : 2026-10-02
 * @Description  : 张量（Tensor），整个框架的数值载体。
 *                 内部是`ndarray`的动态维数组，对外只暴露训练需要的运算：
 *                 逐元素四则运算（NumPy 风格广播）、矩阵乘法、归约以及若干逐元素映射。
 */

use ndarray::{Array, ArrayD, IxDyn};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::errors::TensorError;

mod ops {
    pub mod add;
    pub mod assign;
    pub mod div;
    pub mod mat_mul;
    pub mod mul;
    pub mod sub;
}

mod elementwise;
mod print;
mod property;
mod reduce;

pub(crate) use ops::add::broadcast_shape;

#[cfg(test)]
mod tests;

/// 定义张量的结构体。其可以是标量、向量、矩阵或更高维度的数组。
/// 注：本框架中损失等“标量”统一用形状为`[1, 1]`的张量表示。
#[derive(Debug, Clone, PartialEq)]
pub struct Tensor {
    data: ArrayD<f32>,
}

impl Tensor {
    /// 创建一个张量。`data`的长度必须和`shape`中所有元素的乘积相等，否则 panic。
    pub fn new(data: &[f32], shape: &[usize]) -> Self {
        let expected_len: usize = shape.iter().product();
        assert!(
            data.len() == expected_len,
            "{}",
            TensorError::DataShapeMismatch {
                data_len: data.len(),
                shape: shape.to_vec(),
            }
        );
        let data = Array::from_shape_vec(IxDyn(shape), data.to_vec()).unwrap_or_else(|_| {
            panic!(
                "{}",
                TensorError::DataShapeMismatch {
                    data_len: expected_len,
                    shape: shape.to_vec(),
                }
            )
        });
        Self { data }
    }

    /// 创建形状为`[1, 1]`的标量张量
    pub fn scalar(value: f32) -> Self {
        Self::new(&[value], &[1, 1])
    }

    pub fn zeros(shape: &[usize]) -> Self {
        Self {
            data: ArrayD::zeros(IxDyn(shape)),
        }
    }

    pub fn ones(shape: &[usize]) -> Self {
        Self {
            data: ArrayD::ones(IxDyn(shape)),
        }
    }

    /// 用固定值填充
    pub fn full(value: f32, shape: &[usize]) -> Self {
        Self {
            data: ArrayD::from_elem(IxDyn(shape), value),
        }
    }

    /// 创建一个服从正态分布的随机张量（使用线程随机数，非确定性）
    pub fn normal(mean: f32, std_dev: f32, shape: &[usize]) -> Self {
        let mut rng = StdRng::from_entropy();
        Self::normal_with_rng(mean, std_dev, shape, &mut rng)
    }

    /// 使用固定种子创建正态分布张量（确保可重复性）
    pub fn normal_seeded(mean: f32, std_dev: f32, shape: &[usize], seed: u64) -> Self {
        let mut rng = StdRng::seed_from_u64(seed);
        Self::normal_with_rng(mean, std_dev, shape, &mut rng)
    }

    /// 使用外部随机数生成器创建正态分布张量（Box-Muller 变换）
    pub fn normal_with_rng(mean: f32, std_dev: f32, shape: &[usize], rng: &mut StdRng) -> Self {
        let data_len = shape.iter().product::<usize>();
        let mut data = Vec::with_capacity(data_len);

        while data.len() < data_len {
            let u1: f32 = rng.r#gen();
            let u2: f32 = rng.r#gen();
            let r = (-2.0 * u1.ln()).sqrt();
            let theta = 2.0 * std::f32::consts::PI * u2;
            let z0 = mean + std_dev * r * theta.cos();
            let z1 = mean + std_dev * r * theta.sin();

            // u1 为 0 时 ln 会得到无穷，丢弃这一对
            if z0.is_finite() {
                data.push(z0);
            }
            if data.len() < data_len && z1.is_finite() {
                data.push(z1);
            }
        }

        Self::new(&data, shape)
    }

    /// 内部使用：直接由`ndarray`数组构造
    pub(crate) const fn from_array(data: ArrayD<f32>) -> Self {
        Self { data }
    }

    pub(crate) const fn array(&self) -> &ArrayD<f32> {
        &self.data
    }
}
