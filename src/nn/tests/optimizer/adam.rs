use approx::assert_abs_diff_eq;

use super::scripted_grad_graph;
use crate::assert_err;
use crate::nn::{Adam, GraphError, Optimizer};
use crate::tensor::Tensor;

#[test]
fn test_adam_update() {
    // 梯度 3（beta1=0.9, beta2=0.999, eps=1e-8, lr=0.1）
    //   m_hat = 3，v_hat = 9，update = 0.1 * 3 / 3 = 0.1，w_new = 2 - 0.1
    let (graph, w, g, loss) = scripted_grad_graph(&Tensor::scalar(2.0));
    let mut adam = Adam::new(&graph, &[w.clone()], 0.1).unwrap();

    g.set_value(&Tensor::scalar(3.0)).unwrap();
    adam.minimize(&loss).unwrap();

    assert_abs_diff_eq!(w.item().unwrap(), 1.9, epsilon = 1e-5);
    let state = adam.state(&w).unwrap();
    assert_eq!(state.step, 1);
    assert_abs_diff_eq!(state.exp_avg.get_data_number().unwrap(), 0.3, epsilon = 1e-6);
    assert_abs_diff_eq!(state.exp_avg_sq.get_data_number().unwrap(), 0.009, epsilon = 1e-6);
}

#[test]
fn test_adam_weight_decay_enters_gradient() {
    // 梯度 0 但 wd = 0.5，θ = 2：有效梯度为 1，首步仍走满 lr
    let (graph, w, g, loss) = scripted_grad_graph(&Tensor::scalar(2.0));
    let mut adam = Adam::new_with_config(&graph, &[w.clone()], 0.1, (0.9, 0.999), 1e-8, 0.5).unwrap();

    g.set_value(&Tensor::scalar(0.0)).unwrap();
    adam.minimize(&loss).unwrap();
    assert_abs_diff_eq!(w.item().unwrap(), 1.9, epsilon = 1e-5);
}

#[test]
fn test_adam_reset_and_learning_rate() {
    let (graph, w, g, loss) = scripted_grad_graph(&Tensor::scalar(2.0));
    let mut adam = Adam::new(&graph, &[w.clone()], 0.001).unwrap();
    adam.set_learning_rate(0.0001);
    assert_abs_diff_eq!(adam.learning_rate(), 0.0001);

    g.set_value(&Tensor::scalar(1.0)).unwrap();
    adam.minimize(&loss).unwrap();
    assert!(adam.state(&w).is_some());
    adam.reset();
    assert!(adam.state(&w).is_none());
}

#[test]
fn test_adam_rejects_zero_epsilon() {
    let (graph, w, _g, _loss) = scripted_grad_graph(&Tensor::scalar(1.0));
    let params = [w];
    assert_err!(
        Adam::new_with_config(&graph, &params, 0.1, Adam::DEFAULT_BETAS, 0.0, 0.0),
        GraphError::InvalidHyperparameter(msg) if msg.contains("epsilon")
    );
    assert!(Adam::new_with_config(&graph, &params, 0.1, Adam::DEFAULT_BETAS, 1e-8, 0.0).is_ok());
}
