//! 通用类型定义

use crate::graph::NodeId;
use serde::{Deserialize, Serialize};

/// 边代价（整数，允许为负，但不允许出现负代价环）
pub type Cost = i64;

/// 默认边代价
pub const DEFAULT_COST: Cost = 1;

/// 单条边的代价配置
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EdgeCost {
    pub tail: NodeId,
    pub head: NodeId,
    pub cost: Cost,
}

impl EdgeCost {
    pub fn new(tail: impl Into<NodeId>, head: impl Into<NodeId>, cost: Cost) -> Self {
        Self {
            tail: tail.into(),
            head: head.into(),
            cost,
        }
    }
}
