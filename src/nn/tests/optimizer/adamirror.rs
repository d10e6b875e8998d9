/*
 * @Date         : 2026-10-04
 * @Description  : Adamirror 优化器测试。预期值按下述公式以 f64 逐步手算得到：
 *                 u_t = lr * m_hat / max(√v_hat + ε, 1e-12)，θ -= 2 * u_t - u_{t-1}
 */

use approx::assert_abs_diff_eq;

use super::scripted_grad_graph;
use crate::assert_err;
use crate::nn::{Adamirror, GraphError, Optimizer};
use crate::tensor::Tensor;

#[test]
fn test_adamirror_default_hyperparameters() {
    let (graph, w, _g, _loss) = scripted_grad_graph(&Tensor::scalar(1.0));
    let optimizer = Adamirror::new(&graph, &[w], 1e-3).unwrap();
    assert_abs_diff_eq!(optimizer.learning_rate(), 1e-3);
    assert_eq!(optimizer.betas(), (0.907_453, 0.997));
    assert_abs_diff_eq!(optimizer.epsilon(), 1e-8);
    assert_abs_diff_eq!(optimizer.weight_decay(), 0.0);
    assert_eq!(optimizer.name(), "adamirror");
}

#[test]
fn test_adamirror_reference_trace() {
    // θ0 = 1，lr = 0.1，betas = (0.5, 0.9)，梯度依次为 1、-2、0.5
    let (graph, w, g, loss) = scripted_grad_graph(&Tensor::scalar(1.0));
    let mut optimizer =
        Adamirror::new_with_config(&graph, &[w.clone()], 0.1, (0.5, 0.9), 1e-8, 0.0).unwrap();

    let expected = [
        // (θ, m, v, u)
        (0.800_000_002, 0.5, 0.1, 0.099_999_999),
        (1.024_539_970, -0.75, 0.49, -0.062_269_985),
        (0.984_058_300, -0.125, 0.466, -0.010_894_157),
    ];
    for (step, (grad, (theta, m, v, u))) in [1.0, -2.0, 0.5].iter().zip(expected).enumerate() {
        g.set_value(&Tensor::scalar(*grad)).unwrap();
        optimizer.minimize(&loss).unwrap();

        let state = optimizer.state(&w).unwrap();
        assert_eq!(state.moments.step, step as u64 + 1);
        assert_abs_diff_eq!(w.item().unwrap(), theta, epsilon = 1e-5);
        assert_abs_diff_eq!(state.moments.exp_avg.get_data_number().unwrap(), m, epsilon = 1e-5);
        assert_abs_diff_eq!(state.moments.exp_avg_sq.get_data_number().unwrap(), v, epsilon = 1e-5);
        assert_abs_diff_eq!(state.prev_update.get_data_number().unwrap(), u, epsilon = 1e-5);
    }
}

#[test]
fn test_adamirror_first_step_is_twice_scaled_sign() {
    // 首步 m_hat = g，v_hat = g²，故更新量为 2 * lr * sign(g)
    let (graph, w, g, loss) = scripted_grad_graph(&Tensor::new(&[1., 1.], &[1, 2]));
    let mut optimizer = Adamirror::new(&graph, &[w.clone()], 0.01).unwrap();

    g.set_value(&Tensor::new(&[4., -0.25], &[1, 2])).unwrap();
    optimizer.minimize(&loss).unwrap();

    let value = w.value().unwrap().unwrap();
    assert_abs_diff_eq!(value.get(&[0, 0]).unwrap(), 0.98, epsilon = 1e-6);
    assert_abs_diff_eq!(value.get(&[0, 1]).unwrap(), 1.02, epsilon = 1e-6);
}

#[test]
fn test_adamirror_weight_decay() {
    // θ0 = 1，wd = 0.5：有效梯度为 g + 0.5θ
    let (graph, w, g, loss) = scripted_grad_graph(&Tensor::scalar(1.0));
    let mut optimizer =
        Adamirror::new_with_config(&graph, &[w.clone()], 0.1, (0.5, 0.9), 1e-8, 0.5).unwrap();

    g.set_value(&Tensor::scalar(1.0)).unwrap();
    optimizer.minimize(&loss).unwrap();
    assert_abs_diff_eq!(w.item().unwrap(), 0.800_000_001, epsilon = 1e-5);
    optimizer.minimize(&loss).unwrap();
    assert_abs_diff_eq!(w.item().unwrap(), 0.702_057_145, epsilon = 1e-5);
}

#[test]
fn test_adamirror_zero_lr_and_zero_grad_keep_params() {
    let (graph, w, g, loss) = scripted_grad_graph(&Tensor::scalar(1.0));
    let mut optimizer = Adamirror::new(&graph, &[w.clone()], 0.0).unwrap();
    g.set_value(&Tensor::scalar(3.0)).unwrap();
    optimizer.minimize(&loss).unwrap();
    assert_abs_diff_eq!(w.item().unwrap(), 1.0);

    // 梯度为 0 时更新量为 0（分母被下限保护，不会出现 0/0）
    optimizer.set_learning_rate(0.1);
    optimizer.reset();
    g.set_value(&Tensor::scalar(0.0)).unwrap();
    optimizer.minimize(&loss).unwrap();
    assert_abs_diff_eq!(w.item().unwrap(), 1.0);
    assert_eq!(optimizer.state(&w).unwrap().moments.step, 1);
}

#[test]
fn test_adamirror_param_without_grad_is_untouched() {
    let (graph, w, g, loss) = scripted_grad_graph(&Tensor::scalar(1.0));
    let other = graph.parameter_with_value(&Tensor::scalar(7.0), "other").unwrap();
    let mut optimizer = Adamirror::new(&graph, &[w.clone(), other.clone()], 0.1).unwrap();

    g.set_value(&Tensor::scalar(1.0)).unwrap();
    optimizer.minimize(&loss).unwrap();
    assert_abs_diff_eq!(other.item().unwrap(), 7.0);
    assert!(optimizer.state(&other).is_none());
    assert!(optimizer.state(&w).is_some());
}

#[test]
fn test_adamirror_non_finite_grad_changes_nothing() {
    let (graph, w, g, loss) = scripted_grad_graph(&Tensor::scalar(1.0));
    let mut optimizer = Adamirror::new(&graph, &[w.clone()], 0.1).unwrap();
    g.set_value(&Tensor::scalar(1.0)).unwrap();
    optimizer.minimize(&loss).unwrap();
    let theta = w.item().unwrap();
    let state = optimizer.state(&w).unwrap().clone();

    g.set_value(&Tensor::scalar(f32::NAN)).unwrap();
    assert_err!(optimizer.minimize(&loss), GraphError::Numerical(_));
    assert_eq!(w.item().unwrap(), theta);
    assert_eq!(optimizer.state(&w).unwrap(), &state);
}

#[test]
fn test_adamirror_rejects_invalid_hyperparameters() {
    let (graph, w, _g, _loss) = scripted_grad_graph(&Tensor::scalar(1.0));
    let params = [w];
    assert_err!(
        Adamirror::new(&graph, &params, -1.0),
        GraphError::InvalidHyperparameter(_)
    );
    assert_err!(
        Adamirror::new_with_config(&graph, &params, 0.1, (1.0, 0.9), 1e-8, 0.0),
        GraphError::InvalidHyperparameter(msg) if msg.contains("beta1")
    );
    assert_err!(
        Adamirror::new_with_config(&graph, &params, 0.1, (0.9, 0.9), -1e-8, 0.0),
        GraphError::InvalidHyperparameter(msg) if msg.contains("epsilon")
    );
    assert_err!(
        Adamirror::new_with_config(&graph, &params, 0.1, (0.9, 0.9), 0.0, 0.0),
        GraphError::InvalidHyperparameter(msg) if msg.contains("epsilon")
    );
    assert_err!(
        Adamirror::new_with_config(&graph, &params, 0.1, (0.9, 0.9), 1e-8, f32::NAN),
        GraphError::InvalidHyperparameter(msg) if msg.contains("weight_decay")
    );
}
