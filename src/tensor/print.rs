use crate::tensor::Tensor;
use std::fmt;

impl fmt::Display for Tensor {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let shape = self.shape();
        if self.dimension() > 2 {
            return writeln!(
                f,
                "<对于阶数大于二（rank>2）的张量（形状：{shape:?}）无法展示具体数据>"
            );
        }
        let columns = shape.last().copied().unwrap_or(1).max(1);
        write!(f, "[")?;
        for (i, value) in self.data.iter().enumerate() {
            if i > 0 {
                if i % columns == 0 {
                    write!(f, ",\n ")?;
                } else {
                    write!(f, ", ")?;
                }
            }
            write!(f, "{value:8.4}")?;
        }
        writeln!(f, "]\n形状: {shape:?}")
    }
}
