//! 代价闭包
//!
//! 全点对最小代价可达关系 + 路由树（最小代价路径上的下一跳）。
//! 闭包只包含可达的有序节点对，初始时只有直接相连的边；
//! 当且仅当图强连通时闭包覆盖全部有序节点对（含自身对）。

use super::cost::WeightedDigraph;
use crate::types::Cost;
use std::collections::HashMap;

/// 代价闭包，以节点在规范顺序中的位置为下标
#[derive(Debug, Clone)]
pub struct CostClosure {
    size: usize,
    cost: Vec<Option<Cost>>,
    next_hop: Vec<Option<usize>>,
    /// 第一个出现负自身代价的节点，出现后计算立即停止
    negative_at: Option<usize>,
}

impl CostClosure {
    /// 计算代价闭包
    ///
    /// 对每个中间节点 k，以及闭包中已有的 (i, k) 和 (k, j)：
    /// 若 (i, j) 不存在或经过 k 严格更便宜，则更新代价，
    /// 并令 (i, j) 的下一跳等于 (i, k) 的下一跳。
    pub fn compute(weighted: &WeightedDigraph) -> Self {
        let n = weighted.graph().node_count();
        let mut closure = Self {
            size: n,
            cost: vec![None; n * n],
            next_hop: vec![None; n * n],
            negative_at: None,
        };

        for (tail, head, cost) in weighted.indexed_edges() {
            closure.cost[tail * n + head] = Some(cost);
            closure.next_hop[tail * n + head] = Some(head);
            if tail == head && cost < 0 {
                closure.negative_at = Some(tail);
                return closure;
            }
        }

        for k in 0..n {
            for i in 0..n {
                let Some(ik) = closure.cost[i * n + k] else {
                    continue;
                };
                for j in 0..n {
                    let Some(kj) = closure.cost[k * n + j] else {
                        continue;
                    };
                    let through = ik + kj;
                    let slot = i * n + j;
                    if closure.cost[slot].map_or(true, |ij| through < ij) {
                        closure.cost[slot] = Some(through);
                        closure.next_hop[slot] = closure.next_hop[i * n + k];

                        if i == j && through < 0 {
                            closure.negative_at = Some(i);
                            return closure;
                        }
                    }
                }
            }
        }

        closure
    }

    pub fn size(&self) -> usize {
        self.size
    }

    /// i 到 j 的最小代价，不可达时为 None
    pub fn cost(&self, from: usize, to: usize) -> Option<Cost> {
        self.slot(from, to).and_then(|s| self.cost[s])
    }

    /// i 到 j 最小代价路径上的下一跳
    pub fn next_hop(&self, from: usize, to: usize) -> Option<usize> {
        self.slot(from, to).and_then(|s| self.next_hop[s])
    }

    fn slot(&self, from: usize, to: usize) -> Option<usize> {
        (from < self.size && to < self.size).then(|| from * self.size + to)
    }

    /// 出现负自身代价的节点（说明存在负代价环）
    pub fn negative_cycle_node(&self) -> Option<usize> {
        self.negative_at
    }

    /// 闭包是否覆盖全部有序节点对，即图是否强连通
    pub fn is_total(&self) -> bool {
        self.negative_at.is_none() && self.cost.iter().all(Option::is_some)
    }

    /// 沿路由树逐跳重建 from 到 to 的节点序列（含两端）
    ///
    /// from == to 时返回经过该节点的环。路由树不一致时返回 None。
    pub fn path(&self, from: usize, to: usize) -> Option<Vec<usize>> {
        let mut path = vec![from];
        let mut u = from;
        loop {
            u = self.next_hop(u, to)?;
            path.push(u);
            if u == to {
                return Some(path);
            }
            if path.len() > self.size + 1 {
                return None;
            }
        }
    }

    /// 找出一个负代价环，按行走顺序返回环上的节点
    ///
    /// 优先沿路由树从负自身代价节点出发走回自身；该环不是负环时
    /// （停止时刻的路由树可能不构成负环），改用 Bellman-Ford 前驱回溯。
    pub fn improving_cycle(&self, weighted: &WeightedDigraph) -> Option<Vec<usize>> {
        let origin = self.negative_at?;
        let edges = weighted.indexed_edges();

        if let Some(mut ring) = self.path(origin, origin) {
            ring.pop();
            let costs: HashMap<(usize, usize), Cost> =
                edges.iter().map(|&(t, h, c)| ((t, h), c)).collect();
            let ring_cost: Option<Cost> = (0..ring.len())
                .map(|i| costs.get(&(ring[i], ring[(i + 1) % ring.len()])).copied())
                .sum();
            if matches!(ring_cost, Some(c) if c < 0) && is_simple(&ring) {
                return Some(ring);
            }
        }

        trace_negative_cycle(self.size, &edges)
    }
}

fn is_simple(ring: &[usize]) -> bool {
    let mut seen = vec![false; ring.iter().max().map_or(0, |&m| m + 1)];
    ring.iter().all(|&v| !std::mem::replace(&mut seen[v], true))
}

/// Bellman-Ford 负环检测：所有节点初始距离为 0，
/// 第 n 轮仍能松弛的节点回溯 n 次前驱后必落在负环上。
fn trace_negative_cycle(n: usize, edges: &[(usize, usize, Cost)]) -> Option<Vec<usize>> {
    let mut dist: Vec<Cost> = vec![0; n];
    let mut pred: Vec<Option<usize>> = vec![None; n];
    let mut relaxed = None;

    for _ in 0..n {
        relaxed = None;
        for &(u, v, c) in edges {
            if dist[u] + c < dist[v] {
                dist[v] = dist[u] + c;
                pred[v] = Some(u);
                relaxed = Some(v);
            }
        }
        if relaxed.is_none() {
            return None;
        }
    }

    let mut x = relaxed?;
    for _ in 0..n {
        x = pred[x]?;
    }

    let mut cycle = vec![x];
    let mut u = pred[x]?;
    while u != x {
        cycle.push(u);
        u = pred[u]?;
    }
    cycle.reverse();
    Some(cycle)
}
