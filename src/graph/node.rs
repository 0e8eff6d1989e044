//! 节点定义
//!
//! 状态/迁移模型中的节点：不透明标识 + 出入邻居集合

use indexmap::IndexSet;
use serde::{Deserialize, Serialize};
use std::fmt;

/// 节点 ID（图内唯一）
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodeId(pub String);

impl NodeId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for NodeId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for NodeId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// 节点
#[derive(Debug, Clone, Default)]
pub struct Node {
    /// 出边指向的节点（按插入顺序）
    outgoing: IndexSet<NodeId>,
    /// 入边来源的节点（按插入顺序）
    incoming: IndexSet<NodeId>,
}

impl Node {
    /// 创建孤立节点
    pub fn new() -> Self {
        Self::default()
    }

    pub fn outgoing(&self) -> &IndexSet<NodeId> {
        &self.outgoing
    }

    pub fn incoming(&self) -> &IndexSet<NodeId> {
        &self.incoming
    }

    pub fn out_degree(&self) -> usize {
        self.outgoing.len()
    }

    pub fn in_degree(&self) -> usize {
        self.incoming.len()
    }

    /// 出度减入度
    pub fn imbalance(&self) -> i64 {
        self.out_degree() as i64 - self.in_degree() as i64
    }

    pub(crate) fn insert_outgoing(&mut self, head: NodeId) -> bool {
        self.outgoing.insert(head)
    }

    pub(crate) fn insert_incoming(&mut self, tail: NodeId) -> bool {
        self.incoming.insert(tail)
    }
}
