//! 图核心模块
//!
//! 定义节点、边和有向图存储

mod digraph;
mod edge;
mod node;

pub use digraph::DiGraph;
pub use edge::Edge;
pub use node::{Node, NodeId};
