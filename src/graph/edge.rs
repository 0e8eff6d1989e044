//! 边定义
//!
//! 有向边 (tail, head)，同一有序节点对至多一条

use crate::graph::node::NodeId;
use serde::{Deserialize, Serialize};
use std::fmt;

/// 有向边
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Edge {
    /// 起点
    tail: NodeId,
    /// 终点
    head: NodeId,
}

impl Edge {
    /// 创建新边
    pub fn new(tail: impl Into<NodeId>, head: impl Into<NodeId>) -> Self {
        Self {
            tail: tail.into(),
            head: head.into(),
        }
    }

    pub fn tail(&self) -> &NodeId {
        &self.tail
    }

    pub fn head(&self) -> &NodeId {
        &self.head
    }

    /// 是否自环
    pub fn is_loop(&self) -> bool {
        self.tail == self.head
    }
}

impl From<(&str, &str)> for Edge {
    fn from((tail, head): (&str, &str)) -> Self {
        Self::new(tail, head)
    }
}

impl fmt::Display for Edge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} -> {}", self.tail, self.head)
    }
}
