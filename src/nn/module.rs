/*
 * @Date         : 2026-10-03
 * @Description  : 持有参数的网络组件
 */

use super::Var;

/// 持有可训练参数的组件（层、子网络、整个模型）
///
/// 只约定参数的枚举方式；各组件的构造和前向签名各不相同，不放进 trait。
pub trait Module {
    /// 全部可训练参数，顺序固定（优化器状态与参数划分都按此顺序对应）
    fn parameters(&self) -> Vec<Var>;

    /// 参数张量个数
    fn num_params(&self) -> usize {
        self.parameters().len()
    }

    /// 全部参数的元素总数
    fn num_elements(&self) -> usize {
        self.parameters()
            .iter()
            .filter_map(|p| p.value_expected_shape().ok())
            .map(|shape| shape.iter().product::<usize>())
            .sum()
    }
}
