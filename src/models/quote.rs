//! 行情数据模型
//!
//! 定义证券代码、快照、盘口和K线等值对象，全部在单次请求内创建和消费

use serde::{Deserialize, Serialize};
use std::fmt;

/// 交易所市场
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Market {
    /// 上海证券交易所
    Sh,
    /// 深圳证券交易所
    Sz,
}

impl Market {
    /// 数据源使用的市场前缀
    pub fn prefix(&self) -> &'static str {
        match self {
            Market::Sh => "sh",
            Market::Sz => "sz",
        }
    }
}

/// 带市场前缀的证券代码（如 sh600519）
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct InstrumentCode {
    market: Market,
    ticker: String,
}

impl InstrumentCode {
    pub fn new(market: Market, ticker: impl Into<String>) -> Self {
        Self {
            market,
            ticker: ticker.into(),
        }
    }

    /// 不含市场前缀的代码部分
    pub fn ticker(&self) -> &str {
        &self.ticker
    }
}

impl fmt::Display for InstrumentCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.market.prefix(), self.ticker)
    }
}

/// 大盘指数行情
///
/// 价格和涨跌幅保留数据源原始文本
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndexQuote {
    /// 数据源键（如 s_sh000001）
    pub code: String,
    /// 指数名称
    pub name: String,
    /// 当前点位
    pub price: String,
    /// 涨跌幅（百分比）
    pub change_percent: String,
}

/// 盘口单档
///
/// 字段为 None 表示该档数据不可用
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct LadderLevel {
    /// 价格
    pub price: Option<f64>,
    /// 挂单量（手），原始股数除以 100 向下取整
    pub volume_lots: Option<u64>,
}

/// 五档盘口
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct OrderBookLadder {
    /// 卖一到卖五，价格自低向高
    pub asks: [LadderLevel; 5],
    /// 买一到买五，价格自高向低
    pub bids: [LadderLevel; 5],
}

/// 个股实时快照
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    /// 股票名称
    pub name: String,
    /// 当前价格
    pub last_price: f64,
    /// 开盘价
    pub open_price: Option<f64>,
    /// 涨跌额
    pub change_amount: f64,
    /// 涨跌幅（百分比）
    pub change_percent: f64,
    /// 成交量（手）
    pub volume: f64,
    /// 换手率（百分比）
    pub turnover_ratio: Option<f64>,
    /// 市盈率（TTM），空白时为 None
    pub pe_ratio: Option<f64>,
    /// 市净率
    pub pb_ratio: Option<f64>,
    /// 总市值（亿）
    pub market_cap_billion: Option<f64>,
    /// 五档盘口
    pub ladder: OrderBookLadder,
}

impl Snapshot {
    /// 市盈率、市净率、总市值中至少有一项可用
    pub fn fundamentals_available(&self) -> bool {
        self.pe_ratio.is_some() || self.pb_ratio.is_some() || self.market_cap_billion.is_some()
    }
}

/// 盘口深度（新浪行情接口）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Depth {
    /// 股票名称
    pub name: String,
    /// 五档盘口
    pub ladder: OrderBookLadder,
}

/// 单根K线
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bar {
    /// 日期（YYYY-MM-DD）
    pub date: String,
    /// 开盘价
    pub open: f64,
    /// 最高价
    pub high: f64,
    /// 最低价
    pub low: f64,
    /// 收盘价
    pub close: f64,
    /// 成交量
    pub volume: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_instrument_code_display() {
        let code = InstrumentCode::new(Market::Sh, "600519");
        assert_eq!(code.to_string(), "sh600519");
        assert_eq!(code.ticker(), "600519");
    }
}
