use approx::assert_abs_diff_eq;

use crate::assert_err;
use crate::nn::{Graph, GraphError, GraphInner, Init, VarActivationOps, VarLossOps, VarMatrixOps};
use crate::tensor::Tensor;

#[test]
fn test_forward_simple_chain() {
    let graph = Graph::new();
    let x = graph.input(&Tensor::new(&[1., 2.], &[1, 2])).unwrap();
    let w = graph
        .parameter_with_value(&Tensor::new(&[1., 0., 0., 1.], &[2, 2]), "w")
        .unwrap();
    let y = x.matmul(&w).unwrap().shift(1.0).unwrap();

    y.forward().unwrap();
    assert_eq!(y.value().unwrap().unwrap(), Tensor::new(&[2., 3.], &[1, 2]));
}

#[test]
fn test_forward_without_input_value_fails() {
    let graph = Graph::new();
    let x = graph.placeholder(&[2, 2], Some("x")).unwrap();
    let y = x.sigmoid().unwrap();

    assert_err!(y.forward(), GraphError::InvalidOperation(msg) if msg.contains("set_value"));
}

#[test]
fn test_forward_recomputes_only_after_leaf_changes() {
    let graph = Graph::new();
    let x = graph.placeholder(&[1, 1], Some("x")).unwrap();
    let y = x.scale(3.0).unwrap();

    x.set_value(&Tensor::scalar(1.0)).unwrap();
    y.forward().unwrap();
    assert_abs_diff_eq!(y.item().unwrap(), 3.0);

    // 改写输入后，原来的值失效，需要重新计算
    x.set_value(&Tensor::scalar(2.0)).unwrap();
    y.forward().unwrap();
    assert_abs_diff_eq!(y.item().unwrap(), 6.0);
}

#[test]
fn test_forward_many_shares_subgraph() {
    let graph = Graph::new();
    let x = graph.input(&Tensor::new(&[1., -1.], &[1, 2])).unwrap();
    let h = x.softplus().unwrap();
    let a = h.mean().unwrap();
    let b = h.scale(2.0).unwrap().mean().unwrap();

    graph.forward(&[&a, &b]).unwrap();
    let expected = (1f32.exp().ln_1p() + (-1f32).exp().ln_1p()) / 2.0;
    assert_abs_diff_eq!(a.item().unwrap(), expected, epsilon = 1e-6);
    assert_abs_diff_eq!(b.item().unwrap(), expected * 2.0, epsilon = 1e-6);
}

#[test]
fn test_set_value_rejects_wrong_shape_and_non_leaf() {
    let graph = Graph::new();
    let x = graph.placeholder(&[2, 3], Some("x")).unwrap();
    assert_err!(
        x.set_value(&Tensor::zeros(&[3, 2])),
        GraphError::ShapeMismatch { expected, got, .. } if expected == &[2, 3] && got == &[3, 2]
    );

    let y = x.tanh().unwrap();
    assert_err!(
        y.set_value(&Tensor::zeros(&[2, 3])),
        GraphError::InvalidOperation(msg) if msg.contains("不是输入/参数节点")
    );
}

#[test]
fn test_duplicate_node_name() {
    let graph = Graph::new();
    graph.parameter(&[1, 1], Init::Zeros, "w").unwrap();
    assert_err!(
        graph.parameter(&[1, 1], Init::Zeros, "w"),
        GraphError::DuplicateNodeName(_)
    );
}

#[test]
fn test_auto_generated_names_and_edges() {
    let mut inner = GraphInner::new();
    let a = inner.new_input_node(&[1, 1], None).unwrap();
    let b = inner.new_input_node(&[1, 1], None).unwrap();
    let c = inner.new_add_node(a, b, None).unwrap();

    assert_eq!(inner.get_node_name(a).unwrap(), "input_1");
    assert_eq!(inner.get_node_name(b).unwrap(), "input_2");
    assert_eq!(inner.get_node_name(c).unwrap(), "add_1");
    assert_eq!(inner.get_node_parents(c).unwrap(), vec![a, b]);
    assert_eq!(inner.get_node_children(a).unwrap(), vec![c]);
    assert_eq!(inner.nodes_count(), 3);
}

#[test]
fn test_seeded_graphs_initialize_identically() {
    let g1 = Graph::new_with_seed(7);
    let g2 = Graph::new_with_seed(7);
    let w1 = g1.parameter(&[3, 4], Init::Kaiming, "w").unwrap();
    let w2 = g2.parameter(&[3, 4], Init::Kaiming, "w").unwrap();
    assert_eq!(w1.value().unwrap(), w2.value().unwrap());
}
