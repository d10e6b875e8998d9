mod graph_forward;
mod layer_linear;
mod optimizer;
