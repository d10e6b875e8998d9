/*
 * @Date         : 2026-10-02
 * @Description  : 只读的属性查询
 */

use super::Tensor;

impl Tensor {
    pub fn shape(&self) -> &[usize] {
        self.data.shape()
    }

    /// 阶数
    pub fn dimension(&self) -> usize {
        self.data.ndim()
    }

    /// 元素总数
    pub fn size(&self) -> usize {
        self.data.len()
    }

    /// 形状逐维相同才算一致，[1, 4] 与 [4] 不一致
    pub fn is_same_shape(&self, other: &Self) -> bool {
        self.shape() == other.shape()
    }

    /// 只含一个元素时返回该元素，不论形状是 [1] 还是 [1, 1]
    pub fn get_data_number(&self) -> Option<f32> {
        match self.size() {
            1 => self.data.iter().next().copied(),
            _ => None,
        }
    }

    pub fn get(&self, index: &[usize]) -> Option<f32> {
        self.data.get(index).copied()
    }

    /// 行优先
    pub fn to_vec(&self) -> Vec<f32> {
        self.data.iter().copied().collect()
    }

    pub fn is_all_finite(&self) -> bool {
        self.data.iter().all(|x| x.is_finite())
    }
}
