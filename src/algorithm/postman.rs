//! 中国邮递员回路
//!
//! 校验 → 初始分配 → 负环消去（重复直至最优）→ 抽取回路。
//! 每次计算的中间状态（代价闭包、路由树、不平衡表、分配方案）
//! 都归属于单次调用，调用结束即丢弃，同一实例可反复计算。

use super::closure::CostClosure;
use super::cost::{CostModel, WeightedDigraph};
use super::flow::FeasibleAssignment;
use super::imbalance::ImbalanceTable;
use super::residual::{Cancellation, CycleCanceller, ResidualGraph};
use super::tour::TourExtractor;
use crate::error::{Error, Result};
use crate::graph::{DiGraph, Edge, NodeId};
use crate::types::{Cost, EdgeCost};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, info_span};

/// 一组重复路径
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Duplication {
    /// 赤字节点
    pub from: NodeId,
    /// 盈余节点
    pub to: NodeId,
    /// 重复次数
    pub count: i64,
    /// 单条路径的最小代价
    pub path_cost: Cost,
}

/// 中国邮递员回路计算结果
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PostmanTour {
    /// 起点（也是终点）
    pub start: NodeId,
    /// 回路上的边序列
    pub edges: Vec<Edge>,
    /// 每条边走一次的代价
    pub basic_cost: Cost,
    /// 重复路径的代价
    pub excess_cost: Cost,
    /// 总代价
    pub total_cost: Cost,
    /// 最终分配方案
    pub duplications: Vec<Duplication>,
    /// 负环消去轮数
    pub cancel_rounds: usize,
}

impl PostmanTour {
    /// 回路长度（边数）
    pub fn len(&self) -> usize {
        self.edges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }
}

/// 中国邮递员回路求解器
#[derive(Debug, Clone)]
pub struct ChinesePostman {
    weighted: WeightedDigraph,
}

impl ChinesePostman {
    pub fn new(graph: DiGraph, model: CostModel) -> Self {
        Self {
            weighted: WeightedDigraph::new(graph, model),
        }
    }

    pub fn weighted(&self) -> &WeightedDigraph {
        &self.weighted
    }

    pub fn graph(&self) -> &DiGraph {
        self.weighted.graph()
    }

    // ==================== 图操作 ====================

    pub fn add_nodes<I, T>(&mut self, ids: I) -> Result<()>
    where
        I: IntoIterator<Item = T>,
        T: Into<NodeId>,
    {
        self.weighted.add_nodes(ids)
    }

    pub fn connect_nodes<I, T>(&mut self, edges: I) -> Result<()>
    where
        I: IntoIterator<Item = T>,
        T: Into<Edge>,
    {
        self.weighted.connect_nodes(edges)
    }

    pub fn update_cost_function<I>(&mut self, overrides: I)
    where
        I: IntoIterator<Item = EdgeCost>,
    {
        self.weighted.update_cost_function(overrides)
    }

    pub fn set_default_cost(&mut self, cost: Cost) {
        self.weighted.set_default_cost(cost)
    }

    // ==================== 分析 ====================

    /// 当前拓扑下每个节点的不平衡度
    pub fn imbalances(&self) -> ImbalanceTable {
        ImbalanceTable::analyze(self.graph())
    }

    pub fn is_strongly_connected(&self) -> bool {
        CostClosure::compute(&self.weighted).is_total()
    }

    pub fn basic_cost(&self) -> Cost {
        self.weighted.basic_cost()
    }

    // ==================== 求解 ====================

    /// 计算从 start 出发的最小代价中国邮递员回路
    pub fn compute_cpt(&self, start: &NodeId) -> Result<PostmanTour> {
        let _span = info_span!("compute_cpt", start = %start).entered();
        let graph = self.graph();

        let start_index = graph
            .index_of(start)
            .ok_or_else(|| Error::NodeNotFound(start.to_string()))?;

        // 校验
        let closure = CostClosure::compute(&self.weighted);
        if let Some(index) = closure.negative_cycle_node() {
            let node = graph.node_at(index).map(ToString::to_string).unwrap_or_default();
            return Err(Error::InvalidCostConfiguration(node));
        }
        if !closure.is_total() {
            return Err(Error::NotStronglyConnected);
        }

        // 初始分配
        let table = ImbalanceTable::analyze(graph);
        let partition = table.partition();
        let mut assignment = FeasibleAssignment::greedy(&table, &partition);
        debug!(
            deficit = partition.deficit.len(),
            surplus = partition.surplus.len(),
            initial_excess = assignment.excess_cost(&closure),
            "构建初始可行分配"
        );

        // 负环消去
        let mut cancel_rounds = 0;
        if !partition.is_empty() {
            loop {
                let residual = ResidualGraph::build(graph, &closure, &partition, &assignment)?;
                match CycleCanceller::cancel(&residual, &mut assignment) {
                    Cancellation::Improved { gain, .. } => {
                        cancel_rounds += 1;
                        debug!(round = cancel_rounds, gain, "分配代价下降");
                    }
                    Cancellation::Optimal => break,
                }
            }
        }

        // 抽取前先固定重复代价
        let excess_cost = assignment.excess_cost(&closure);
        let duplications = assignment
            .entries()
            .filter_map(|((d, s), count)| {
                Some(Duplication {
                    from: graph.node_at(d)?.clone(),
                    to: graph.node_at(s)?.clone(),
                    count,
                    path_cost: closure.cost(d, s)?,
                })
            })
            .collect();

        let edges = TourExtractor::new(&self.weighted, &closure).extract(start_index, &mut assignment)?;

        let basic_cost = self.weighted.basic_cost();
        let tour = PostmanTour {
            start: start.clone(),
            edges,
            basic_cost,
            excess_cost,
            total_cost: basic_cost + excess_cost,
            duplications,
            cancel_rounds,
        };

        info!(
            edges = tour.len(),
            total_cost = tour.total_cost,
            cancel_rounds,
            "中国邮递员回路计算完成"
        );

        Ok(tour)
    }
}
