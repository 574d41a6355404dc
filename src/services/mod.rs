//! 业务逻辑服务模块
//!
//! 封装代码标准化、报文解码、指标计算和数据获取逻辑

pub mod aggregate;     // 多证券批量汇总
pub mod code;          // 证券代码标准化
pub mod common;        // 公共常量
pub mod decode;        // 定长位置报文解码
pub mod feed;          // 行情数据源客户端
pub mod indicator;     // 技术指标计算
pub mod quote_service; // 行情查询服务

pub use quote_service::QuoteService;
