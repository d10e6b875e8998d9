/*
 * @Date         : 2026-10-03
 * @Description  : Var 的扩展方法，按用途拆成几个 trait，用到哪个就 import 哪个
 */

mod activation;
mod loss;
mod matrix;

pub use activation::VarActivationOps;
pub use loss::VarLossOps;
pub use matrix::VarMatrixOps;
