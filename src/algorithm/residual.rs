//! 残量图与负环消去
//!
//! 残量图只包含赤字和盈余节点：
//! - 正向边 d -> s，代价为原图中 d 到 s 的最小路径代价
//! - 分配量非零时加反向边 s -> d，代价取负
//!
//! 残量图中的负代价环对应一次能降低总代价的重新分配。

use super::closure::CostClosure;
use super::cost::{CostModel, WeightedDigraph};
use super::flow::FeasibleAssignment;
use super::imbalance::Partition;
use crate::error::{Error, Result};
use crate::graph::{DiGraph, Edge};
use crate::types::{Cost, EdgeCost};
use tracing::{debug, warn};

/// 残量图（每轮消去重新构建，用完即弃）
#[derive(Debug)]
pub struct ResidualGraph {
    weighted: WeightedDigraph,
    closure: CostClosure,
    /// 残量图节点位置 -> 原图节点位置
    origin: Vec<usize>,
    /// 前 deficit_count 个节点为赤字节点
    deficit_count: usize,
}

impl ResidualGraph {
    /// 由当前分配构建残量图并计算其代价闭包
    pub fn build(
        graph: &DiGraph,
        closure: &CostClosure,
        partition: &Partition,
        assignment: &FeasibleAssignment,
    ) -> Result<Self> {
        let origin: Vec<usize> = partition
            .deficit
            .iter()
            .chain(partition.surplus.iter())
            .copied()
            .collect();

        let name = |index: usize| {
            graph
                .node_at(index)
                .cloned()
                .ok_or_else(|| Error::NodeNotFound(format!("#{}", index)))
        };

        let mut residual = DiGraph::new();
        for &index in &origin {
            residual.add_node(name(index)?)?;
        }

        let mut costs = Vec::new();
        for (d, s) in partition.pairs() {
            let (tail, head) = (name(d)?, name(s)?);
            let cost = closure
                .cost(d, s)
                .ok_or(Error::NotStronglyConnected)?;

            residual.connect(&tail, &head)?;
            costs.push(EdgeCost::new(tail.clone(), head.clone(), cost));

            if assignment.get(d, s) != 0 {
                residual.connect(&head, &tail)?;
                costs.push(EdgeCost::new(head, tail, -cost));
            }
        }

        let weighted = WeightedDigraph::new(residual, CostModel::new(0).with_overrides(costs));
        let closure = CostClosure::compute(&weighted);

        Ok(Self {
            weighted,
            closure,
            origin,
            deficit_count: partition.deficit.len(),
        })
    }

    pub fn weighted(&self) -> &WeightedDigraph {
        &self.weighted
    }

    pub fn closure(&self) -> &CostClosure {
        &self.closure
    }

    /// 残量图位置对应的原图位置
    pub fn origin(&self, index: usize) -> usize {
        self.origin[index]
    }

    fn is_deficit(&self, index: usize) -> bool {
        index < self.deficit_count
    }

    fn edge_cost(&self, tail: usize, head: usize) -> Cost {
        let graph = self.weighted.graph();
        match (graph.node_at(tail), graph.node_at(head)) {
            (Some(t), Some(h)) => self
                .weighted
                .cost(&Edge::new(t.clone(), h.clone()))
                .unwrap_or(0),
            _ => 0,
        }
    }
}

/// 一轮消去的结果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cancellation {
    /// 消去了一个负环，分配总代价降低 gain
    Improved { bottleneck: i64, gain: Cost },
    /// 不存在负环，当前分配已是最优
    Optimal,
}

/// 负环消去器
pub struct CycleCanceller;

impl CycleCanceller {
    /// 在残量图中找一个负环并沿环调整分配
    ///
    /// 第一遍沿环找瓶颈：经过的反向边（盈余 -> 赤字）上分配量的最小值；
    /// 第二遍在反向边上减去瓶颈、在正向边上加上瓶颈。
    pub fn cancel(residual: &ResidualGraph, assignment: &mut FeasibleAssignment) -> Cancellation {
        if residual.closure().negative_cycle_node().is_none() {
            return Cancellation::Optimal;
        }
        let Some(ring) = residual.closure().improving_cycle(residual.weighted()) else {
            warn!("残量图出现负自身代价但未能找到负环");
            return Cancellation::Optimal;
        };

        let hops: Vec<(usize, usize)> = (0..ring.len())
            .map(|i| (ring[i], ring[(i + 1) % ring.len()]))
            .collect();

        let mut bottleneck: Option<i64> = None;
        let mut ring_cost: Cost = 0;
        for &(u, v) in &hops {
            ring_cost += residual.edge_cost(u, v);
            if !residual.is_deficit(u) {
                let used = assignment.get(residual.origin(v), residual.origin(u));
                bottleneck = Some(bottleneck.map_or(used, |k| k.min(used)));
            }
        }

        let k = match bottleneck {
            Some(k) if k > 0 => k,
            _ => {
                warn!(cycle_len = ring.len(), "负环上没有可减少的分配");
                return Cancellation::Optimal;
            }
        };

        for &(u, v) in &hops {
            if residual.is_deficit(u) {
                assignment.adjust(residual.origin(u), residual.origin(v), k);
            } else {
                assignment.adjust(residual.origin(v), residual.origin(u), -k);
            }
        }

        debug!(cycle_len = ring.len(), bottleneck = k, ring_cost, "消去残量图负环");

        Cancellation::Improved {
            bottleneck: k,
            gain: -ring_cost * k,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::algorithm::imbalance::ImbalanceTable;
    use crate::graph::NodeId;

    /// 贪心分配次优的图：节点顺序 d1, d2, s1, s2
    /// 贪心配对 (d1, s1)、(d2, s2) 各代价 3，交叉配对各代价 1
    fn crossed() -> WeightedDigraph {
        let mut graph = DiGraph::new();
        graph.add_nodes(["d1", "d2", "s1", "s2"]).unwrap();
        let mut weighted = WeightedDigraph::new(graph, CostModel::default());
        weighted
            .connect_nodes([
                ("d1", "s2"),
                ("d2", "s1"),
                ("s1", "d1"),
                ("s1", "d2"),
                ("s2", "d1"),
                ("s2", "d2"),
            ])
            .unwrap();
        weighted
    }

    #[test]
    fn test_residual_edges() {
        let w = crossed();
        let closure = CostClosure::compute(&w);
        let table = ImbalanceTable::analyze(w.graph());
        let partition = table.partition();
        let assignment = FeasibleAssignment::greedy(&table, &partition);

        let residual = ResidualGraph::build(w.graph(), &closure, &partition, &assignment).unwrap();
        let r = residual.weighted();

        assert_eq!(r.graph().node_count(), 4);
        assert_eq!(r.cost(&Edge::new("d1", "s1")), Some(3));
        assert_eq!(r.cost(&Edge::new("d1", "s2")), Some(1));
        assert_eq!(r.cost(&Edge::new("s1", "d1")), Some(-3));
        assert_eq!(r.cost(&Edge::new("s2", "d1")), None);
        assert_eq!(r.cost(&Edge::new("s2", "d2")), Some(-3));
        assert!(residual.closure().negative_cycle_node().is_some());
    }

    #[test]
    fn test_cancel_until_optimal() {
        let w = crossed();
        let closure = CostClosure::compute(&w);
        let table = ImbalanceTable::analyze(w.graph());
        let partition = table.partition();
        let mut assignment = FeasibleAssignment::greedy(&table, &partition);
        assert_eq!(assignment.excess_cost(&closure), 6);

        let residual = ResidualGraph::build(w.graph(), &closure, &partition, &assignment).unwrap();
        let result = CycleCanceller::cancel(&residual, &mut assignment);
        assert_eq!(result, Cancellation::Improved { bottleneck: 1, gain: 4 });

        let index = |s: &str| w.graph().index_of(&NodeId::from(s)).unwrap();
        assert_eq!(assignment.get(index("d1"), index("s2")), 1);
        assert_eq!(assignment.get(index("d2"), index("s1")), 1);
        assert_eq!(assignment.get(index("d1"), index("s1")), 0);
        assert_eq!(assignment.excess_cost(&closure), 2);

        let residual = ResidualGraph::build(w.graph(), &closure, &partition, &assignment).unwrap();
        assert_eq!(
            CycleCanceller::cancel(&residual, &mut assignment),
            Cancellation::Optimal
        );
    }

    #[test]
    fn test_cancellation_preserves_sums() {
        let w = crossed();
        let closure = CostClosure::compute(&w);
        let table = ImbalanceTable::analyze(w.graph());
        let partition = table.partition();
        let mut assignment = FeasibleAssignment::greedy(&table, &partition);

        loop {
            let residual =
                ResidualGraph::build(w.graph(), &closure, &partition, &assignment).unwrap();
            if CycleCanceller::cancel(&residual, &mut assignment) == Cancellation::Optimal {
                break;
            }
        }

        for &d in &partition.deficit {
            assert_eq!(assignment.row_sum(d), -table.get(d));
        }
        for &s in &partition.surplus {
            assert_eq!(assignment.column_sum(s), table.get(s));
        }
        assert!(assignment.entries().all(|(_, amount)| amount > 0));
    }
}
