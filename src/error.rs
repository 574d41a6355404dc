//! 行情解码错误类型
//!
//! 解码失败时明确报错，绝不把价格或名称字段静默置零。
//! 历史数据不足不属于错误：指标计算直接返回中性值。

use thiserror::Error;

/// 行情解码与获取过程中的错误
#[derive(Debug, Error, Clone, PartialEq)]
pub enum QuoteError {
    /// 报文形状不符合预期（缺少引号分隔符、字段无法解析等）
    #[error("报文格式错误: {0}")]
    MalformedPayload(String),

    /// 报文字段数量不足以读取所需字段
    #[error("字段不足: 需要 {required} 个，实际 {actual} 个")]
    InsufficientFields { required: usize, actual: usize },

    /// 未找到该证券
    #[error("未找到该股票信息: {0}")]
    NotFound(String),

    /// 上游数据源不可用（HTTP 状态、超时、传输失败）
    #[error("上游数据源不可用: {0}")]
    UpstreamUnavailable(String),
}

impl QuoteError {
    /// 面向调用方的错误信息
    ///
    /// `debug` 为 true 时返回完整细节，否则只返回错误类别。
    pub fn public_message(&self, debug: bool) -> String {
        if debug {
            return self.to_string();
        }
        match self {
            QuoteError::MalformedPayload(_) | QuoteError::InsufficientFields { .. } => {
                "行情数据解析失败".to_string()
            }
            QuoteError::NotFound(_) => "未找到该股票信息，请检查代码。".to_string(),
            QuoteError::UpstreamUnavailable(_) => "行情数据获取失败，请稍后重试".to_string(),
        }
    }
}

/// 行情操作的 Result 别名
pub type Result<T> = std::result::Result<T, QuoteError>;
