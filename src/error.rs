//! 错误类型定义

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("有向图不是强连通的，无法计算中国邮递员回路")]
    NotStronglyConnected,

    #[error("无效的代价配置: 经过节点 {0} 存在负代价环")]
    InvalidCostConfiguration(String),

    #[error("节点不存在: {0}")]
    NodeNotFound(String),

    #[error("节点已存在: {0}")]
    NodeAlreadyExists(String),

    #[error("边已存在: {0} -> {1}")]
    EdgeAlreadyExists(String, String),

    #[error("解析错误: {0}")]
    ParseError(String),

    #[error("导入错误: {0}")]
    ImportError(String),

    #[error("IO 错误: {0}")]
    IoError(#[from] std::io::Error),

    #[error("序列化错误: {0}")]
    SerializationError(String),

    #[error("内部错误: {0}")]
    InternalError(String),
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Error::SerializationError(e.to_string())
    }
}

impl From<csv::Error> for Error {
    fn from(e: csv::Error) -> Self {
        Error::ImportError(e.to_string())
    }
}
