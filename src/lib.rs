//! A 股行情解码与技术指标引擎
//!
//! 把行情数据源返回的定长位置文本解码为结构化数据，并根据K线计算技术指标
//! 数据来源：新浪财经、腾讯行情

pub mod config;   // 配置
pub mod error;    // 错误类型
pub mod handlers; // HTTP 请求处理器
pub mod models;   // 数据模型定义
pub mod services; // 业务逻辑服务

pub use config::AppConfig;
pub use error::{QuoteError, Result};
pub use services::aggregate::{aggregate, Aggregate, AggregateOptions, SortKey};
pub use services::code::normalize;
pub use services::decode::{decode_bars, decode_depth, decode_index_set, decode_snapshot};
pub use services::indicator::{compute_all, compute_indicator};
