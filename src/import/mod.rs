//! 数据导入模块
//!
//! 支持从 JSON 图文档或 CSV 边表构建求解器：
//! - JSON: `{"nodes": {"A": ["B"]}, "costs": [...], "default_cost": 1}`，
//!   键的顺序即节点顺序，只作为终点出现的节点按首次出现追加
//! - CSV: 表头 `tail,head,cost`，cost 列可省略

use crate::algorithm::{ChinesePostman, CostModel};
use crate::error::{Error, Result};
use crate::graph::{DiGraph, Edge, NodeId};
use crate::types::{Cost, EdgeCost, DEFAULT_COST};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use tracing::debug;

/// 导入统计
#[derive(Debug, Default, Clone)]
pub struct ImportStats {
    pub nodes_imported: usize,
    pub edges_imported: usize,
    pub costs_imported: usize,
    pub duration_ms: u64,
}

fn default_cost() -> Cost {
    DEFAULT_COST
}

/// JSON 图文档
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GraphDocument {
    /// 节点 -> 出边终点列表
    pub nodes: IndexMap<NodeId, Vec<NodeId>>,
    /// 显式边代价
    #[serde(default)]
    pub costs: Vec<EdgeCost>,
    /// 未配置边的默认代价
    #[serde(default = "default_cost")]
    pub default_cost: Cost,
}

impl GraphDocument {
    pub fn from_json_str(s: &str) -> Result<Self> {
        serde_json::from_str(s).map_err(|e| Error::ParseError(format!("JSON 解析错误: {}", e)))
    }

    /// 构建求解器
    pub fn build(self) -> Result<(ChinesePostman, ImportStats)> {
        let mut graph = DiGraph::new();
        for (tail, heads) in &self.nodes {
            graph.ensure_node(tail.clone());
            for head in heads {
                graph.ensure_node(head.clone());
            }
        }

        let edges: Vec<Edge> = self
            .nodes
            .iter()
            .flat_map(|(tail, heads)| heads.iter().map(move |head| Edge::new(tail.clone(), head.clone())))
            .collect();

        let stats = ImportStats {
            nodes_imported: graph.node_count(),
            edges_imported: edges.len(),
            costs_imported: self.costs.len(),
            duration_ms: 0,
        };

        let model = CostModel::new(self.default_cost).with_overrides(self.costs);
        let mut postman = ChinesePostman::new(graph, model);
        postman.connect_nodes(edges)?;

        Ok((postman, stats))
    }
}

/// CSV 边记录
#[derive(Debug, Deserialize)]
struct EdgeRecord {
    tail: String,
    head: String,
    #[serde(default)]
    cost: Option<Cost>,
}

/// 图导入器
pub struct GraphImporter {
    default_cost: Option<Cost>,
}

impl Default for GraphImporter {
    fn default() -> Self {
        Self::new()
    }
}

impl GraphImporter {
    /// 创建导入器
    pub fn new() -> Self {
        Self { default_cost: None }
    }

    /// 覆盖默认代价（JSON 文档中的 default_cost 同样被覆盖）
    pub fn with_default_cost(mut self, cost: Cost) -> Self {
        self.default_cost = Some(cost);
        self
    }

    /// 从 JSON 图文档导入
    pub fn import_json<P: AsRef<Path>>(&self, path: P) -> Result<(ChinesePostman, ImportStats)> {
        let start = std::time::Instant::now();
        let reader = BufReader::new(File::open(path)?);

        let mut document: GraphDocument = serde_json::from_reader(reader)
            .map_err(|e| Error::ImportError(format!("JSON 解析错误: {}", e)))?;
        if let Some(cost) = self.default_cost {
            document.default_cost = cost;
        }

        let (postman, mut stats) = document.build()?;
        stats.duration_ms = start.elapsed().as_millis() as u64;
        debug!(nodes = stats.nodes_imported, edges = stats.edges_imported, "JSON 图文档导入完成");
        Ok((postman, stats))
    }

    /// 从 CSV 边表导入
    pub fn import_csv<P: AsRef<Path>>(&self, path: P) -> Result<(ChinesePostman, ImportStats)> {
        let start = std::time::Instant::now();
        let mut reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .flexible(true)
            .from_path(path)?;

        let mut graph = DiGraph::new();
        let mut edges = Vec::new();
        let mut costs = Vec::new();

        for record in reader.deserialize() {
            let record: EdgeRecord = record?;
            if record.tail.is_empty() || record.head.is_empty() {
                return Err(Error::ImportError("CSV 格式错误: 缺少端点".to_string()));
            }
            graph.ensure_node(record.tail.as_str());
            graph.ensure_node(record.head.as_str());
            if let Some(cost) = record.cost {
                costs.push(EdgeCost::new(record.tail.as_str(), record.head.as_str(), cost));
            }
            edges.push(Edge::new(record.tail, record.head));
        }

        let stats = ImportStats {
            nodes_imported: graph.node_count(),
            edges_imported: edges.len(),
            costs_imported: costs.len(),
            duration_ms: start.elapsed().as_millis() as u64,
        };

        let model = CostModel::new(self.default_cost.unwrap_or(DEFAULT_COST)).with_overrides(costs);
        let mut postman = ChinesePostman::new(graph, model);
        postman.connect_nodes(edges)?;

        debug!(nodes = stats.nodes_imported, edges = stats.edges_imported, "CSV 边表导入完成");
        Ok((postman, stats))
    }
}
