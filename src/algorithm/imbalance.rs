//! 节点不平衡分析
//!
//! 不平衡度 = 出度 - 入度。负值节点（赤字）需要额外的出边遍历，
//! 正值节点（盈余）需要额外的入边遍历。

use crate::graph::DiGraph;

/// 每个节点的不平衡度，以规范顺序中的位置为下标
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImbalanceTable {
    delta: Vec<i64>,
}

impl ImbalanceTable {
    pub fn analyze(graph: &DiGraph) -> Self {
        Self {
            delta: graph.iter().map(|(_, node)| node.imbalance()).collect(),
        }
    }

    pub fn get(&self, index: usize) -> i64 {
        self.delta.get(index).copied().unwrap_or(0)
    }

    /// 全图不平衡度之和，恒为 0
    pub fn total(&self) -> i64 {
        self.delta.iter().sum()
    }

    /// 所有节点均平衡时图本身存在欧拉回路
    pub fn is_balanced(&self) -> bool {
        self.delta.iter().all(|&d| d == 0)
    }

    /// 按规范顺序划分赤字节点和盈余节点，平衡节点不参与
    pub fn partition(&self) -> Partition {
        let mut partition = Partition::default();
        for (index, &d) in self.delta.iter().enumerate() {
            if d < 0 {
                partition.deficit.push(index);
            } else if d > 0 {
                partition.surplus.push(index);
            }
        }
        partition
    }
}

/// 赤字/盈余划分
///
/// 列表顺序决定后续贪心分配的取舍：声明顺序不同的等价图
/// 可能得到不同（但代价相同）的回路。
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Partition {
    pub deficit: Vec<usize>,
    pub surplus: Vec<usize>,
}

impl Partition {
    /// 所有 (赤字, 盈余) 节点对，按列表顺序
    pub fn pairs(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.deficit
            .iter()
            .flat_map(move |&d| self.surplus.iter().map(move |&s| (d, s)))
    }

    pub fn is_empty(&self) -> bool {
        self.deficit.is_empty() && self.surplus.is_empty()
    }

    pub fn is_deficit(&self, index: usize) -> bool {
        self.deficit.contains(&index)
    }
}
