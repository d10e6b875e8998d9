/*
 * @Date         : 2026-10-03
 * @Description  : Layer 模块 - 组合 Node 构建常见网络结构
 */

mod linear;

pub use linear::Linear;
