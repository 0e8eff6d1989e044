//! 有向图存储
//!
//! 节点按首次出现顺序保存，该顺序即全图的规范节点顺序，
//! 决定不平衡划分、贪心分配和回路抽取时的遍历次序。

use super::edge::Edge;
use super::node::{Node, NodeId};
use crate::error::{Error, Result};
use indexmap::IndexMap;

/// 有向图（无重边）
#[derive(Debug, Clone, Default)]
pub struct DiGraph {
    nodes: IndexMap<NodeId, Node>,
    edge_count: usize,
}

impl DiGraph {
    /// 创建空图
    pub fn new() -> Self {
        Self::default()
    }

    // ==================== 节点操作 ====================

    /// 添加节点，返回其在规范顺序中的位置
    pub fn add_node(&mut self, id: impl Into<NodeId>) -> Result<usize> {
        let id = id.into();
        if self.nodes.contains_key(&id) {
            return Err(Error::NodeAlreadyExists(id.to_string()));
        }
        let (index, _) = self.nodes.insert_full(id, Node::new());
        Ok(index)
    }

    /// 批量添加节点
    pub fn add_nodes<I, T>(&mut self, ids: I) -> Result<()>
    where
        I: IntoIterator<Item = T>,
        T: Into<NodeId>,
    {
        for id in ids {
            self.add_node(id)?;
        }
        Ok(())
    }

    /// 节点不存在时添加，已存在时直接返回位置
    pub fn ensure_node(&mut self, id: impl Into<NodeId>) -> usize {
        let entry = self.nodes.entry(id.into());
        let index = entry.index();
        entry.or_default();
        index
    }

    pub fn contains_node(&self, id: &NodeId) -> bool {
        self.nodes.contains_key(id)
    }

    /// 获取节点
    pub fn node(&self, id: &NodeId) -> Option<&Node> {
        self.nodes.get(id)
    }

    /// 节点在规范顺序中的位置
    pub fn index_of(&self, id: &NodeId) -> Option<usize> {
        self.nodes.get_index_of(id)
    }

    /// 按位置获取节点 ID
    pub fn node_at(&self, index: usize) -> Option<&NodeId> {
        self.nodes.get_index(index).map(|(id, _)| id)
    }

    /// 按规范顺序遍历节点
    pub fn node_ids(&self) -> impl Iterator<Item = &NodeId> {
        self.nodes.keys()
    }

    /// 按规范顺序遍历节点及其邻接信息
    pub fn iter(&self) -> impl Iterator<Item = (&NodeId, &Node)> {
        self.nodes.iter()
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    // ==================== 边操作 ====================

    /// 添加边，两端节点必须已存在
    pub fn connect(&mut self, tail: &NodeId, head: &NodeId) -> Result<()> {
        if !self.nodes.contains_key(head) {
            return Err(Error::NodeNotFound(head.to_string()));
        }
        let tail_node = self
            .nodes
            .get_mut(tail)
            .ok_or_else(|| Error::NodeNotFound(tail.to_string()))?;

        if !tail_node.insert_outgoing(head.clone()) {
            return Err(Error::EdgeAlreadyExists(tail.to_string(), head.to_string()));
        }
        if let Some(head_node) = self.nodes.get_mut(head) {
            head_node.insert_incoming(tail.clone());
        }
        self.edge_count += 1;

        Ok(())
    }

    pub fn has_edge(&self, tail: &NodeId, head: &NodeId) -> bool {
        self.nodes
            .get(tail)
            .map(|n| n.outgoing().contains(head))
            .unwrap_or(false)
    }

    /// 所有边：按起点的规范顺序，同一起点内按插入顺序
    pub fn edges(&self) -> Vec<Edge> {
        self.nodes
            .iter()
            .flat_map(|(tail, node)| {
                node.outgoing()
                    .iter()
                    .map(move |head| Edge::new(tail.clone(), head.clone()))
            })
            .collect()
    }

    pub fn edge_count(&self) -> usize {
        self.edge_count
    }

    // ==================== 邻居查询 ====================

    /// 出边指向的节点
    pub fn neighbors(&self, id: &NodeId) -> Vec<NodeId> {
        self.nodes
            .get(id)
            .map(|n| n.outgoing().iter().cloned().collect())
            .unwrap_or_default()
    }

    /// 入边来源的节点
    pub fn predecessors(&self, id: &NodeId) -> Vec<NodeId> {
        self.nodes
            .get(id)
            .map(|n| n.incoming().iter().cloned().collect())
            .unwrap_or_default()
    }

    pub fn out_degree(&self, id: &NodeId) -> usize {
        self.nodes.get(id).map(Node::out_degree).unwrap_or(0)
    }

    pub fn in_degree(&self, id: &NodeId) -> usize {
        self.nodes.get(id).map(Node::in_degree).unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn id(s: &str) -> NodeId {
        NodeId::from(s)
    }

    #[test]
    fn test_graph_basic() {
        let mut graph = DiGraph::new();
        graph.add_nodes(["a", "b", "c"]).unwrap();

        graph.connect(&id("a"), &id("b")).unwrap();
        graph.connect(&id("a"), &id("c")).unwrap();
        graph.connect(&id("b"), &id("c")).unwrap();

        assert_eq!(graph.node_count(), 3);
        assert_eq!(graph.edge_count(), 3);
        assert!(graph.has_edge(&id("a"), &id("c")));
        assert!(!graph.has_edge(&id("c"), &id("a")));

        assert_eq!(graph.neighbors(&id("a")), vec![id("b"), id("c")]);
        assert_eq!(graph.predecessors(&id("c")), vec![id("a"), id("b")]);
        assert_eq!(graph.out_degree(&id("a")), 2);
        assert_eq!(graph.in_degree(&id("c")), 2);
    }

    #[test]
    fn test_graph_rejects_duplicates() {
        let mut graph = DiGraph::new();
        graph.add_nodes(["a", "b"]).unwrap();
        graph.connect(&id("a"), &id("b")).unwrap();

        assert!(matches!(
            graph.connect(&id("a"), &id("b")),
            Err(Error::EdgeAlreadyExists(_, _))
        ));
        assert!(matches!(
            graph.add_node("a"),
            Err(Error::NodeAlreadyExists(_))
        ));
        assert!(matches!(
            graph.connect(&id("a"), &id("z")),
            Err(Error::NodeNotFound(_))
        ));
        assert_eq!(graph.edge_count(), 1);
    }

    #[test]
    fn test_graph_canonical_order() {
        let mut graph = DiGraph::new();
        graph.add_nodes(["z", "a", "m"]).unwrap();
        graph.connect(&id("m"), &id("z")).unwrap();
        graph.connect(&id("z"), &id("m")).unwrap();
        graph.connect(&id("z"), &id("a")).unwrap();

        let order: Vec<&str> = graph.node_ids().map(NodeId::as_str).collect();
        assert_eq!(order, vec!["z", "a", "m"]);
        assert_eq!(graph.index_of(&id("m")), Some(2));
        assert_eq!(graph.node_at(1), Some(&id("a")));

        let edges: Vec<String> = graph.edges().iter().map(|e| e.to_string()).collect();
        assert_eq!(edges, vec!["z -> m", "z -> a", "m -> z"]);
    }

    #[test]
    fn test_ensure_node_is_idempotent() {
        let mut graph = DiGraph::new();
        graph.ensure_node("a");
        graph.ensure_node("b");
        graph.ensure_node("a");
        assert_eq!(graph.node_count(), 2);
    }
}
