use approx::assert_abs_diff_eq;

use crate::nn::{Graph, Init, Linear, Module, VarLossOps};
use crate::tensor::Tensor;

#[test]
fn test_linear_shapes_and_parameters() {
    let graph = Graph::new_with_seed(42);
    let fc = Linear::new(&graph, 3, 5, true, "fc").unwrap();
    assert_eq!(fc.fan_in(), 3);
    assert_eq!(fc.fan_out(), 5);
    assert_eq!(fc.num_params(), 2);
    assert_eq!(fc.num_elements(), 3 * 5 + 5);
    assert_eq!(fc.weight().value_expected_shape().unwrap(), vec![3, 5]);
    assert_eq!(fc.bias().unwrap().name().unwrap(), "fc_b");

    let x = graph.input(&Tensor::ones(&[4, 3])).unwrap();
    let y = fc.forward(&x).unwrap();
    assert_eq!(y.value_expected_shape().unwrap(), vec![4, 5]);

    let no_bias = Linear::new(&graph, 3, 1, false, "fc_no_bias").unwrap();
    assert_eq!(no_bias.parameters().len(), 1);
}

#[test]
fn test_linear_forward_and_grad() {
    let graph = Graph::new();
    let fc = Linear::new(&graph, 2, 1, true, "fc").unwrap();
    fc.weight().set_value(&Tensor::new(&[2., -1.], &[2, 1])).unwrap();
    fc.bias().unwrap().set_value(&Tensor::scalar(0.5)).unwrap();

    let x = graph.input(&Tensor::new(&[1., 1., 3., 2.], &[2, 2])).unwrap();
    let loss = fc.forward(&x).unwrap().mean().unwrap();

    // 输出为 [1.5, 4.5]，均值 3
    assert_abs_diff_eq!(loss.backward().unwrap(), 3.0, epsilon = 1e-6);
    // dW = xᵀ @ (1/2) = [2, 1.5]，db = 1
    let dw = fc.weight().grad().unwrap().unwrap();
    assert_abs_diff_eq!(dw.get(&[0, 0]).unwrap(), 2.0, epsilon = 1e-6);
    assert_abs_diff_eq!(dw.get(&[1, 0]).unwrap(), 1.5, epsilon = 1e-6);
    assert_abs_diff_eq!(
        fc.bias().unwrap().grad().unwrap().unwrap().get_data_number().unwrap(),
        1.0,
        epsilon = 1e-6
    );
}

#[test]
fn test_linear_with_custom_init() {
    let graph = Graph::new();
    let fc = Linear::with_init(&graph, 2, 3, false, Init::Constant(0.5), "c").unwrap();
    assert_eq!(fc.weight().value().unwrap().unwrap(), Tensor::full(0.5, &[2, 3]));
    assert!(fc.bias().is_none());
}
