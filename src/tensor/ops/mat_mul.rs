use crate::errors::{Operator, TensorError};
use crate::tensor::Tensor;
use ndarray::Ix2;

impl Tensor {
    /// 实现矩阵乘法。只接受2阶张量，否则会触发panic。
    /// 需要保证前一个张量的列数（col）等于后一个张量的行数（row），否则也会触发panic。
    pub fn mat_mul(&self, other: &Self) -> Self {
        let self_data = self.as_matrix(Operator::MatMul);
        let other_data = other.as_matrix(Operator::MatMul);
        assert!(
            self.shape()[1] == other.shape()[0],
            "{}",
            TensorError::OperatorError {
                operator: Operator::MatMul,
                tensor1_shape: self.shape().to_vec(),
                tensor2_shape: other.shape().to_vec(),
            }
        );
        Self::from_array(self_data.dot(&other_data).into_dyn())
    }

    /// 2阶张量的转置
    pub fn transpose(&self) -> Self {
        let data = self.as_matrix(Operator::Transpose);
        Self::from_array(data.t().to_owned().into_dyn())
    }

    fn as_matrix(&self, operator: Operator) -> ndarray::ArrayView2<'_, f32> {
        self.data
            .view()
            .into_dimensionality::<Ix2>()
            .unwrap_or_else(|_| {
                panic!(
                    "{}",
                    TensorError::DimensionMismatch {
                        operator,
                        expected: 2,
                        got: self.dimension(),
                    }
                )
            })
    }
}
