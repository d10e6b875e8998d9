use approx::assert_abs_diff_eq;

use crate::tensor::Tensor;

#[test]
fn test_softplus_is_stable() {
    let t = Tensor::new(&[-100., 0., 100.], &[3]).softplus();
    assert_abs_diff_eq!(t.get(&[0]).unwrap(), 0., epsilon = 1e-6);
    assert_abs_diff_eq!(t.get(&[1]).unwrap(), std::f32::consts::LN_2, epsilon = 1e-6);
    assert_abs_diff_eq!(t.get(&[2]).unwrap(), 100., epsilon = 1e-4);
    assert!(t.is_all_finite());
}

#[test]
fn test_sigmoid_tanh_sqrt() {
    let t = Tensor::new(&[0., 4.], &[1, 2]);
    assert_abs_diff_eq!(t.sigmoid().get(&[0, 0]).unwrap(), 0.5);
    assert_abs_diff_eq!(t.tanh().get(&[0, 0]).unwrap(), 0.);
    assert_abs_diff_eq!(t.sqrt().get(&[0, 1]).unwrap(), 2.);
    assert_eq!(t.maximum_scalar(1.), Tensor::new(&[1., 4.], &[1, 2]));
    assert_eq!(t.square(), Tensor::new(&[0., 16.], &[1, 2]));
}

#[test]
fn test_seeded_normal_is_reproducible() {
    let a = Tensor::normal_seeded(0., 1., &[4, 4], 7);
    let b = Tensor::normal_seeded(0., 1., &[4, 4], 7);
    assert_eq!(a, b);
    assert!(a.is_all_finite());
}
