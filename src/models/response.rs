//! 通用 API 响应模型
//!
//! 定义统一的 API 响应格式

use serde::{Deserialize, Serialize};

use crate::models::Snapshot;
use crate::services::common::get_beijing_time;

/// 统一 API 响应结构
///
/// 所有接口返回统一格式，包含：
/// - success: 请求是否成功
/// - data: 响应数据（成功时有值）
/// - message: 响应消息
/// - timestamp: 响应时间戳（北京时间）
#[derive(Debug, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    /// 请求是否成功
    pub success: bool,
    /// 响应数据
    pub data: Option<T>,
    /// 响应消息
    pub message: String,
    /// 响应时间戳（ISO 8601 格式）
    pub timestamp: String,
}

impl<T> ApiResponse<T> {
    /// 创建成功响应
    pub fn success(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            message: "Success".to_string(),
            timestamp: get_beijing_time(),
        }
    }

    /// 创建错误响应
    pub fn error(message: String) -> Self {
        Self {
            success: false,
            data: None,
            message,
            timestamp: get_beijing_time(),
        }
    }
}

/// 批量操作结果
#[derive(Debug, Serialize, Deserialize)]
pub struct BatchData<T> {
    /// 成功解码的记录
    pub items: Vec<T>,
    /// 失败并被跳过的代码数量
    pub failed_count: usize,
}

/// 个股行情（价格接口）
#[derive(Debug, Serialize, Deserialize)]
pub struct PriceData {
    pub symbol: String,
    pub name: String,
    pub price: f64,
    pub change_percent: f64,
    pub change_amount: f64,
    /// 北京时间 HH:MM:SS
    pub update_time: String,
}

/// 基本面数据，None 表示不可用
#[derive(Debug, Serialize, Deserialize)]
pub struct FundamentalsData {
    pub symbol: String,
    pub name: String,
    pub pe_ratio: Option<f64>,
    pub pb_ratio: Option<f64>,
    pub market_cap_billion: Option<f64>,
    pub available: bool,
}

/// 带代码的快照，用于批量对比
#[derive(Debug, Serialize, Deserialize)]
pub struct CodedSnapshot {
    pub symbol: String,
    #[serde(flatten)]
    pub snapshot: Snapshot,
}
