/*
 * @Date         : 2026-10-03
 * @Description  : 计算图模块
 *
 * - `Graph`：用户级句柄
 * - `GraphInner`：底层实现
 * - `GraphError`：错误类型
 */

mod error;
mod handle;
mod inner;

pub use error::GraphError;
pub use handle::Graph;
pub use inner::GraphInner;
