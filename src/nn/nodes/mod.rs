mod node_handle;
pub(crate) mod raw_node;

pub(crate) use node_handle::NodeHandle;

/// 节点在所属 Graph 内的唯一标识，按创建顺序递增
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub u64);

impl std::fmt::Display for NodeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
