//! 代价模型
//!
//! 为每条边分配代价：显式配置优先，未配置的边使用默认代价。
//! 拓扑或配置变化时重新解析整张代价表。

use crate::error::Result;
use crate::graph::{DiGraph, Edge, NodeId};
use crate::types::{Cost, EdgeCost, DEFAULT_COST};
use indexmap::IndexMap;
use std::collections::HashMap;

/// 代价函数（可部分指定）
#[derive(Debug, Clone)]
pub struct CostModel {
    overrides: HashMap<Edge, Cost>,
    default_cost: Cost,
}

impl Default for CostModel {
    fn default() -> Self {
        Self::new(DEFAULT_COST)
    }
}

impl CostModel {
    pub fn new(default_cost: Cost) -> Self {
        Self {
            overrides: HashMap::new(),
            default_cost,
        }
    }

    /// 附带显式代价配置
    pub fn with_overrides<I>(mut self, overrides: I) -> Self
    where
        I: IntoIterator<Item = EdgeCost>,
    {
        self.merge(overrides);
        self
    }

    /// 合并代价配置，已有的边被覆盖
    pub fn merge<I>(&mut self, overrides: I)
    where
        I: IntoIterator<Item = EdgeCost>,
    {
        for EdgeCost { tail, head, cost } in overrides {
            self.overrides.insert(Edge::new(tail, head), cost);
        }
    }

    pub fn default_cost(&self) -> Cost {
        self.default_cost
    }

    pub fn set_default_cost(&mut self, cost: Cost) {
        self.default_cost = cost;
    }

    /// 某条边的代价
    pub fn cost_of(&self, edge: &Edge) -> Cost {
        self.overrides
            .get(edge)
            .copied()
            .unwrap_or(self.default_cost)
    }
}

/// 带权有向图：图存储 + 代价模型 + 已解析的边代价表
#[derive(Debug, Clone)]
pub struct WeightedDigraph {
    graph: DiGraph,
    model: CostModel,
    costs: IndexMap<Edge, Cost>,
}

impl WeightedDigraph {
    pub fn new(graph: DiGraph, model: CostModel) -> Self {
        let mut weighted = Self {
            graph,
            model,
            costs: IndexMap::new(),
        };
        weighted.resolve_costs();
        weighted
    }

    fn resolve_costs(&mut self) {
        let model = &self.model;
        self.costs = self
            .graph
            .edges()
            .into_iter()
            .map(|edge| {
                let cost = model.cost_of(&edge);
                (edge, cost)
            })
            .collect();
    }

    pub fn graph(&self) -> &DiGraph {
        &self.graph
    }

    pub fn cost_model(&self) -> &CostModel {
        &self.model
    }

    /// 批量添加节点
    pub fn add_nodes<I, T>(&mut self, ids: I) -> Result<()>
    where
        I: IntoIterator<Item = T>,
        T: Into<NodeId>,
    {
        self.graph.add_nodes(ids)
    }

    /// 批量添加边并重新解析代价
    pub fn connect_nodes<I, T>(&mut self, edges: I) -> Result<()>
    where
        I: IntoIterator<Item = T>,
        T: Into<Edge>,
    {
        let result = edges.into_iter().try_for_each(|edge| {
            let edge = edge.into();
            self.graph.connect(edge.tail(), edge.head())
        });
        // 部分成功时已加入的边也需要代价
        self.resolve_costs();
        result
    }

    /// 合并代价配置并重新解析
    pub fn update_cost_function<I>(&mut self, overrides: I)
    where
        I: IntoIterator<Item = EdgeCost>,
    {
        self.model.merge(overrides);
        self.resolve_costs();
    }

    pub fn set_default_cost(&mut self, cost: Cost) {
        self.model.set_default_cost(cost);
        self.resolve_costs();
    }

    /// 已有边的代价
    pub fn cost(&self, edge: &Edge) -> Option<Cost> {
        self.costs.get(edge).copied()
    }

    /// 所有边及其代价，顺序与 [`DiGraph::edges`] 一致
    pub fn edge_costs(&self) -> impl Iterator<Item = (&Edge, Cost)> {
        self.costs.iter().map(|(e, &c)| (e, c))
    }

    /// 以节点位置表示的边表
    pub fn indexed_edges(&self) -> Vec<(usize, usize, Cost)> {
        self.costs
            .iter()
            .filter_map(|(edge, &cost)| {
                let tail = self.graph.index_of(edge.tail())?;
                let head = self.graph.index_of(edge.head())?;
                Some((tail, head, cost))
            })
            .collect()
    }

    /// 每条边恰好经过一次的代价
    pub fn basic_cost(&self) -> Cost {
        self.costs.values().sum()
    }

    /// 一条边序列的代价；含不存在的边时返回 None
    pub fn walk_cost(&self, walk: &[Edge]) -> Option<Cost> {
        walk.iter().map(|edge| self.cost(edge)).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn triangle() -> WeightedDigraph {
        let mut graph = DiGraph::new();
        graph.add_nodes(["a", "b", "c"]).unwrap();
        let mut weighted = WeightedDigraph::new(graph, CostModel::new(2));
        weighted
            .connect_nodes([("a", "b"), ("b", "c"), ("c", "a")])
            .unwrap();
        weighted
    }

    #[test]
    fn test_default_cost_fallback() {
        let weighted = triangle();
        assert_eq!(weighted.cost(&Edge::new("a", "b")), Some(2));
        assert_eq!(weighted.cost(&Edge::new("b", "a")), None);
        assert_eq!(weighted.basic_cost(), 6);
    }

    #[test]
    fn test_update_cost_function() {
        let mut weighted = triangle();
        weighted.update_cost_function([EdgeCost::new("c", "a", 10)]);

        assert_eq!(weighted.cost(&Edge::new("c", "a")), Some(10));
        assert_eq!(weighted.basic_cost(), 14);

        weighted.set_default_cost(1);
        assert_eq!(weighted.basic_cost(), 12);
    }

    #[test]
    fn test_override_applies_to_later_edges() {
        let mut graph = DiGraph::new();
        graph.add_nodes(["a", "b"]).unwrap();
        let model = CostModel::default().with_overrides([EdgeCost::new("b", "a", 7)]);
        let mut weighted = WeightedDigraph::new(graph, model);

        weighted.connect_nodes([("a", "b"), ("b", "a")]).unwrap();
        assert_eq!(weighted.cost(&Edge::new("b", "a")), Some(7));
        assert_eq!(weighted.indexed_edges(), vec![(0, 1, 1), (1, 0, 7)]);
    }

    #[test]
    fn test_walk_cost() {
        let weighted = triangle();
        let walk = vec![Edge::new("a", "b"), Edge::new("b", "c")];
        assert_eq!(weighted.walk_cost(&walk), Some(4));

        let broken = vec![Edge::new("a", "c")];
        assert_eq!(weighted.walk_cost(&broken), None);
    }
}
