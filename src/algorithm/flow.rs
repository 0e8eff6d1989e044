//! 可行分配
//!
//! (赤字节点, 盈余节点) -> 重复次数。每个单位表示沿最小代价路径
//! 从赤字节点到盈余节点多走一遍，以此抵消两端的不平衡。

use super::closure::CostClosure;
use super::imbalance::{ImbalanceTable, Partition};
use crate::types::Cost;
use indexmap::IndexMap;

/// 重复路径分配方案
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FeasibleAssignment {
    amounts: IndexMap<(usize, usize), i64>,
}

impl FeasibleAssignment {
    /// 贪心构造初始可行分配
    ///
    /// 按列表顺序遍历节点对，分配量取赤字剩余需求与盈余剩余量的较小者。
    /// 结果总能消除不平衡，但与代价无关，一般不是最优。
    pub fn greedy(table: &ImbalanceTable, partition: &Partition) -> Self {
        let mut need: IndexMap<usize, i64> = partition
            .deficit
            .iter()
            .map(|&d| (d, -table.get(d)))
            .collect();
        let mut excess: IndexMap<usize, i64> = partition
            .surplus
            .iter()
            .map(|&s| (s, table.get(s)))
            .collect();

        let mut amounts = IndexMap::new();
        for (d, s) in partition.pairs() {
            let amount = need[&d].min(excess[&s]);
            need[&d] -= amount;
            excess[&s] -= amount;
            amounts.insert((d, s), amount);
        }

        Self { amounts }
    }

    pub fn get(&self, deficit: usize, surplus: usize) -> i64 {
        self.amounts.get(&(deficit, surplus)).copied().unwrap_or(0)
    }

    /// 调整某个节点对的分配量
    pub fn adjust(&mut self, deficit: usize, surplus: usize, delta: i64) {
        *self.amounts.entry((deficit, surplus)).or_insert(0) += delta;
    }

    /// 非零分配
    pub fn entries(&self) -> impl Iterator<Item = ((usize, usize), i64)> + '_ {
        self.amounts
            .iter()
            .filter(|(_, &amount)| amount != 0)
            .map(|(&pair, &amount)| (pair, amount))
    }

    /// 赤字节点发出的分配总量
    pub fn row_sum(&self, deficit: usize) -> i64 {
        self.amounts
            .iter()
            .filter(|((d, _), _)| *d == deficit)
            .map(|(_, &amount)| amount)
            .sum()
    }

    /// 盈余节点接收的分配总量
    pub fn column_sum(&self, surplus: usize) -> i64 {
        self.amounts
            .iter()
            .filter(|((_, s), _)| *s == surplus)
            .map(|(_, &amount)| amount)
            .sum()
    }

    /// 重复路径的总代价
    pub fn excess_cost(&self, closure: &CostClosure) -> Cost {
        self.entries()
            .map(|((d, s), amount)| closure.cost(d, s).unwrap_or(0) * amount)
            .sum()
    }

    /// 重复路径总条数
    pub fn total(&self) -> i64 {
        self.amounts.values().sum()
    }

    /// 从 from 出发消耗一个单位的分配，返回目标盈余节点
    ///
    /// 按盈余列表顺序选第一个仍有剩余的目标，分配量减一。
    pub fn take_unit_from(&mut self, from: usize) -> Option<usize> {
        let (&(_, target), amount) = self
            .amounts
            .iter_mut()
            .find(|((d, _), amount)| *d == from && **amount > 0)?;
        *amount -= 1;
        Some(target)
    }

    pub fn is_exhausted(&self) -> bool {
        self.amounts.values().all(|&amount| amount <= 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::{DiGraph, NodeId};

    fn table(nodes: &[&str], edges: &[(&str, &str)]) -> ImbalanceTable {
        let mut graph = DiGraph::new();
        graph.add_nodes(nodes.iter().copied()).unwrap();
        for &(t, h) in edges {
            graph.connect(&NodeId::from(t), &NodeId::from(h)).unwrap();
        }
        ImbalanceTable::analyze(&graph)
    }

    #[test]
    fn test_greedy_assignment_balances_rows_and_columns() {
        let t = table(
            &["0", "1", "2", "3"],
            &[("0", "1"), ("0", "2"), ("1", "2"), ("1", "3"), ("2", "3"), ("3", "0")],
        );
        let partition = t.partition();
        let assignment = FeasibleAssignment::greedy(&t, &partition);

        assert_eq!(assignment.get(2, 0), 1);
        assert_eq!(assignment.get(2, 1), 0);
        assert_eq!(assignment.get(3, 0), 0);
        assert_eq!(assignment.get(3, 1), 1);

        for &d in &partition.deficit {
            assert_eq!(assignment.row_sum(d), -t.get(d));
        }
        for &s in &partition.surplus {
            assert_eq!(assignment.column_sum(s), t.get(s));
        }
        assert_eq!(assignment.total(), 2);
    }

    #[test]
    fn test_greedy_splits_large_imbalance() {
        // h 出度 3，y 入度 3
        let t = table(
            &["h", "x", "y", "z"],
            &[("h", "x"), ("h", "y"), ("h", "z"), ("x", "y"), ("z", "y")],
        );
        let partition = t.partition();
        assert_eq!(partition.deficit, vec![2]);
        assert_eq!(partition.surplus, vec![0]);

        let assignment = FeasibleAssignment::greedy(&t, &partition);
        assert_eq!(assignment.get(2, 0), 3);
    }

    #[test]
    fn test_take_unit_decrements() {
        let mut assignment = FeasibleAssignment::default();
        assignment.adjust(0, 1, 2);
        assignment.adjust(0, 2, 1);

        assert_eq!(assignment.take_unit_from(0), Some(1));
        assert_eq!(assignment.get(0, 1), 1);
        assert_eq!(assignment.take_unit_from(0), Some(1));
        assert_eq!(assignment.take_unit_from(0), Some(2));
        assert_eq!(assignment.take_unit_from(0), None);
        assert_eq!(assignment.take_unit_from(5), None);
        assert!(assignment.is_exhausted());
    }
}
