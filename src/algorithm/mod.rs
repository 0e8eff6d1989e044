//! 图算法模块
//!
//! 代价闭包、不平衡分析、可行分配、负环消去和回路抽取，
//! 组合为有向中国邮递员回路求解器

mod closure;
mod cost;
mod flow;
mod imbalance;
mod postman;
mod residual;
mod tour;

pub use closure::CostClosure;
pub use cost::{CostModel, WeightedDigraph};
pub use flow::FeasibleAssignment;
pub use imbalance::{ImbalanceTable, Partition};
pub use postman::{ChinesePostman, Duplication, PostmanTour};
pub use residual::{Cancellation, CycleCanceller, ResidualGraph};
pub use tour::TourExtractor;
