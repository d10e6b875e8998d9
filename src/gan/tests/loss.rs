use approx::assert_abs_diff_eq;

use crate::gan::{AdversarialLoss, LeastSquaresLoss, LossKind, StandardLoss};
use crate::nn::{Graph, VarLossOps};
use crate::tensor::Tensor;

fn mean_value(graph: &Graph, var: &crate::nn::Var) -> f32 {
    let mean = var.mean().unwrap();
    graph.forward(&[&mean]).unwrap();
    mean.item().unwrap()
}

#[test]
fn test_standard_loss_at_zero_logits() {
    let graph = Graph::new();
    let d_real = graph.input(&Tensor::zeros(&[3, 1])).unwrap();
    let d_fake = graph.input(&Tensor::zeros(&[3, 1])).unwrap();

    let losses = StandardLoss.build(&d_real, &d_fake).unwrap();

    let ln2 = std::f32::consts::LN_2;
    assert_eq!(losses.d_loss.value_expected_shape().unwrap(), vec![3, 1]);
    assert_abs_diff_eq!(mean_value(&graph, &losses.d_loss), 2.0 * ln2, epsilon = 1e-6);
    assert_abs_diff_eq!(mean_value(&graph, &losses.g_loss), ln2, epsilon = 1e-6);
}

#[test]
fn test_standard_loss_rewards_confident_discriminator() {
    let graph = Graph::new();
    let d_real = graph.input(&Tensor::scalar(10.0)).unwrap();
    let d_fake = graph.input(&Tensor::scalar(-10.0)).unwrap();

    let losses = StandardLoss.build(&d_real, &d_fake).unwrap();

    assert!(mean_value(&graph, &losses.d_loss) < 1e-3);
    assert!(mean_value(&graph, &losses.g_loss) > 9.9);
}

#[test]
fn test_least_squares_loss() {
    let graph = Graph::new();
    let d_real = graph.input(&Tensor::new(&[1.0, 3.0], &[2, 1])).unwrap();
    let d_fake = graph.input(&Tensor::new(&[-1.0, 0.0], &[2, 1])).unwrap();

    let losses = LeastSquaresLoss::default().build(&d_real, &d_fake).unwrap();

    // d：[(1-1)² + (-1+1)², (3-1)² + (0+1)²] = [0, 5]；g：[(-1-1)², (0-1)²] = [4, 1]
    assert_abs_diff_eq!(mean_value(&graph, &losses.d_loss), 2.5, epsilon = 1e-6);
    assert_abs_diff_eq!(mean_value(&graph, &losses.g_loss), 2.5, epsilon = 1e-6);
}

#[test]
fn test_loss_kind_selects_provider() {
    assert_eq!(LossKind::default(), LossKind::Standard);
    assert_eq!(LossKind::Standard.provider().name(), "standard");
    assert_eq!(LossKind::LeastSquares.provider().name(), "least_squares");
    let kind: LossKind = serde_json::from_str(r#""least_squares""#).unwrap();
    assert_eq!(kind, LossKind::LeastSquares);
}
