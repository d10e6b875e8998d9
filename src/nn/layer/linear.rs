/*
 * @Date         : 2026-10-03
 * @Description  : 全连接层 y = x·W + b，生成器和判别器的基本积木
 */

use crate::nn::{Graph, GraphError, Init, Module, Var, VarMatrixOps};

/// 全连接层
///
/// 输入`[batch, fan_in]`，输出`[batch, fan_out]`；偏置形状为`[1, fan_out]`，按行广播。
/// 参数名为`{name}_W`与`{name}_b`，同一个图内`name`不可重复。
pub struct Linear {
    weight: Var,
    bias: Option<Var>,
    fan_in: usize,
    fan_out: usize,
}

impl Linear {
    /// 权重用 Kaiming 初始化（图设了种子则可复现），偏置置零
    pub fn new(
        graph: &Graph,
        fan_in: usize,
        fan_out: usize,
        with_bias: bool,
        name: &str,
    ) -> Result<Self, GraphError> {
        Self::with_init(graph, fan_in, fan_out, with_bias, Init::Kaiming, name)
    }

    pub fn with_init(
        graph: &Graph,
        fan_in: usize,
        fan_out: usize,
        with_bias: bool,
        weight_init: Init,
        name: &str,
    ) -> Result<Self, GraphError> {
        let weight = graph.parameter(&[fan_in, fan_out], weight_init, &format!("{name}_W"))?;
        let bias = with_bias
            .then(|| graph.parameter(&[1, fan_out], Init::Zeros, &format!("{name}_b")))
            .transpose()?;
        Ok(Self {
            weight,
            bias,
            fan_in,
            fan_out,
        })
    }

    pub fn forward(&self, x: &Var) -> Result<Var, GraphError> {
        let xw = x.matmul(&self.weight)?;
        match &self.bias {
            Some(b) => xw.try_add(b),
            None => Ok(xw),
        }
    }

    pub const fn weight(&self) -> &Var {
        &self.weight
    }

    pub const fn bias(&self) -> Option<&Var> {
        self.bias.as_ref()
    }

    pub const fn fan_in(&self) -> usize {
        self.fan_in
    }

    pub const fn fan_out(&self) -> usize {
        self.fan_out
    }
}

impl Module for Linear {
    fn parameters(&self) -> Vec<Var> {
        std::iter::once(self.weight.clone())
            .chain(self.bias.clone())
            .collect()
    }
}
