use approx::assert_abs_diff_eq;

use super::scripted_grad_graph;
use crate::assert_err;
use crate::nn::{GraphError, Optimizer, SGD};
use crate::tensor::Tensor;

#[test]
fn test_sgd_step() {
    let (graph, w, g, loss) = scripted_grad_graph(&Tensor::scalar(1.0));
    let mut sgd = SGD::new(&graph, &[w.clone()], 0.1).unwrap();

    g.set_value(&Tensor::scalar(2.0)).unwrap();
    let loss_value = sgd.minimize(&loss).unwrap();
    assert_abs_diff_eq!(loss_value, 2.0);
    assert_abs_diff_eq!(w.item().unwrap(), 0.8, epsilon = 1e-6);
}

#[test]
fn test_sgd_skips_params_without_grad() {
    let (graph, w, _g, _loss) = scripted_grad_graph(&Tensor::scalar(1.0));
    let mut sgd = SGD::new(&graph, &[w.clone()], 0.1).unwrap();
    sgd.step().unwrap();
    assert_abs_diff_eq!(w.item().unwrap(), 1.0);
}

#[test]
fn test_sgd_rejects_negative_lr() {
    let (graph, w, _g, _loss) = scripted_grad_graph(&Tensor::scalar(1.0));
    assert_err!(
        SGD::new(&graph, &[w], -0.1),
        GraphError::InvalidHyperparameter(_)
    );
}

#[test]
fn test_optimizer_rejects_non_parameter() {
    let (graph, _w, g, _loss) = scripted_grad_graph(&Tensor::scalar(1.0));
    assert_err!(
        SGD::new(&graph, &[g], 0.1),
        GraphError::InvalidOperation(msg) if msg.contains("不是参数节点")
    );
}
