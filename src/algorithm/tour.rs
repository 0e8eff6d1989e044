//! 回路抽取
//!
//! 分配方案使每个节点的有效出入度相等，因此原图边加上重复路径
//! 构成欧拉多重图。从起点出发按以下策略选择下一步：
//! 1. 当前节点仍有剩余分配时，消耗一个单位，沿路由树走完整条重复路径；
//! 2. 否则走一条未用过的原图边，按节点顺序选择，
//!    指向起点方向的路由树下一跳留到最后；
//! 3. 无路可走时回退并拼接（Hierholzer），保证所有边都被覆盖。

use super::closure::CostClosure;
use super::cost::WeightedDigraph;
use super::flow::FeasibleAssignment;
use crate::error::{Error, Result};
use crate::graph::{Edge, NodeId};
use tracing::warn;

/// 回路中的一步
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Move {
    /// 原图边
    Edge(usize, usize),
    /// 一个单位的重复路径（赤字节点 -> 盈余节点）
    Duplicate(usize, usize),
}

impl Move {
    fn head(&self) -> usize {
        match *self {
            Move::Edge(_, head) | Move::Duplicate(_, head) => head,
        }
    }
}

/// 回路抽取器
pub struct TourExtractor<'a> {
    weighted: &'a WeightedDigraph,
    closure: &'a CostClosure,
}

impl<'a> TourExtractor<'a> {
    pub fn new(weighted: &'a WeightedDigraph, closure: &'a CostClosure) -> Self {
        Self { weighted, closure }
    }

    /// 从 start 出发抽取闭合回路，逐个消耗 plan 中的分配
    pub fn extract(&self, start: usize, plan: &mut FeasibleAssignment) -> Result<Vec<Edge>> {
        let mut pending = self.pending_edges(start);

        let mut stack: Vec<(usize, Option<Move>)> = vec![(start, None)];
        let mut circuit: Vec<Move> = Vec::new();

        while let Some(&(u, _)) = stack.last() {
            let next = plan
                .take_unit_from(u)
                .map(|target| Move::Duplicate(u, target))
                .or_else(|| pending[u].pop().map(|head| Move::Edge(u, head)));

            match next {
                Some(mv) => stack.push((mv.head(), Some(mv))),
                None => {
                    if let Some((_, Some(mv))) = stack.pop() {
                        circuit.push(mv);
                    }
                }
            }
        }
        circuit.reverse();

        if !plan.is_exhausted() || pending.iter().any(|edges| !edges.is_empty()) {
            warn!("回路未能覆盖全部边");
            return Err(Error::InternalError("回路未能覆盖全部边".to_string()));
        }
        if circuit.last().map_or(false, |mv| mv.head() != start) {
            return Err(Error::InternalError("回路未回到起点".to_string()));
        }

        let mut tour = Vec::new();
        for mv in circuit {
            match mv {
                Move::Edge(tail, head) => tour.push(self.edge(tail, head)?),
                Move::Duplicate(from, to) => {
                    let path = self
                        .closure
                        .path(from, to)
                        .ok_or(Error::NotStronglyConnected)?;
                    for hop in path.windows(2) {
                        tour.push(self.edge(hop[0], hop[1])?);
                    }
                }
            }
        }

        Ok(tour)
    }

    /// 每个节点待走的原图边，按出栈顺序排列
    ///
    /// 出边按节点顺序选择，指向起点的路由树下一跳最后走。
    fn pending_edges(&self, start: usize) -> Vec<Vec<usize>> {
        let graph = self.weighted.graph();
        let mut pending: Vec<Vec<usize>> = vec![Vec::new(); graph.node_count()];

        for (tail, head, _) in self.weighted.indexed_edges() {
            pending[tail].push(head);
        }

        for (u, heads) in pending.iter_mut().enumerate() {
            let toward_start = self.closure.next_hop(u, start);
            heads.sort_by_key(|&head| (Some(head) == toward_start, head));
            heads.reverse();
        }

        pending
    }

    fn edge(&self, tail: usize, head: usize) -> Result<Edge> {
        let name = |index: usize| -> Result<NodeId> {
            self.weighted
                .graph()
                .node_at(index)
                .cloned()
                .ok_or_else(|| Error::NodeNotFound(format!("#{}", index)))
        };
        Ok(Edge::new(name(tail)?, name(head)?))
    }
}
