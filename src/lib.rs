//! CPTGraph - 有向图中国邮递员回路引擎
//!
//! 为状态/迁移模型生成覆盖全部边的最小代价闭合回路，支持：
//! - 可配置的边代价（默认代价 + 逐边覆盖）
//! - 代价闭包与路由树（最短路径及下一跳）
//! - 贪心初始分配 + 负环消去求最小代价重复路径
//! - JSON 图文档 / CSV 边表导入

pub mod algorithm;
pub mod cli;
pub mod error;
pub mod graph;
pub mod import;
pub mod types;

// 重导出常用类型
pub use algorithm::{ChinesePostman, CostModel, PostmanTour, WeightedDigraph};
pub use error::{Error, Result};
pub use graph::{DiGraph, Edge, Node, NodeId};
pub use types::{Cost, EdgeCost, DEFAULT_COST};

/// 库版本
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
