/*
 * @Date         : 2026-10-02
 * @Description  : 逐元素映射：激活函数及其导数所需的基本运算、开方等。
 */

use super::Tensor;

impl Tensor {
    /// 对每个元素应用`f`，返回新张量
    pub fn map(&self, f: impl Fn(f32) -> f32) -> Self {
        Self {
            data: self.data.mapv(f),
        }
    }

    pub fn sqrt(&self) -> Self {
        self.map(f32::sqrt)
    }

    pub fn sigmoid(&self) -> Self {
        self.map(|x| 1.0 / (1.0 + (-x).exp()))
    }

    pub fn tanh(&self) -> Self {
        self.map(f32::tanh)
    }

    /// softplus(x) = ln(1 + e^x)，按 x 的符号分段计算以避免溢出
    pub fn softplus(&self) -> Self {
        self.map(|x| {
            if x > 0.0 {
                x + (-x).exp().ln_1p()
            } else {
                x.exp().ln_1p()
            }
        })
    }

    /// 与纯数逐元素取较大值（常用于给分母设置下限）
    pub fn maximum_scalar(&self, floor: f32) -> Self {
        self.map(|x| x.max(floor))
    }

    /// 逐元素平方
    pub fn square(&self) -> Self {
        self.map(|x| x * x)
    }
}
