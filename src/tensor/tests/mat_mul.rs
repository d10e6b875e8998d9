use crate::tensor::Tensor;

#[test]
fn test_mat_mul_and_transpose() {
    let a = Tensor::new(&[1., 2., 3., 4., 5., 6.], &[2, 3]);
    let b = Tensor::new(&[1., 0., 0., 1., 1., 1.], &[3, 2]);
    assert_eq!(a.mat_mul(&b), Tensor::new(&[4., 5., 10., 11.], &[2, 2]));
    assert_eq!(a.transpose(), Tensor::new(&[1., 4., 2., 5., 3., 6.], &[3, 2]));
}

#[test]
#[should_panic(expected = "形状不兼容，故无法矩阵乘法")]
fn test_mat_mul_shape_mismatch() {
    let a = Tensor::zeros(&[2, 3]);
    let _ = a.mat_mul(&Tensor::zeros(&[2, 3]));
}

#[test]
#[should_panic(expected = "矩阵乘法要求张量为2阶，但得到1阶")]
fn test_mat_mul_requires_matrix() {
    let _ = Tensor::zeros(&[3]).mat_mul(&Tensor::zeros(&[3, 1]));
}
