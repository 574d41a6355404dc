//! 接口查询参数

use serde::Deserialize;

/// K线周期
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum KlinePeriod {
    #[default]
    Day,
    Week,
    Month,
}

impl KlinePeriod {
    /// 新浪 K线接口的 scale 参数（分钟数）
    pub fn scale(&self) -> u32 {
        match self {
            KlinePeriod::Day => 240,
            KlinePeriod::Week => 1200,
            KlinePeriod::Month => 7200,
        }
    }
}

/// 历史K线查询参数
#[derive(Debug, Deserialize)]
pub struct HistoryQuery {
    /// K线周期
    #[serde(default)]
    pub period: KlinePeriod,
    /// 返回数量限制
    pub limit: Option<usize>,
}

/// 技术指标查询参数
#[derive(Debug, Deserialize)]
pub struct IndicatorQuery {
    /// RSI / MACD / KDJ / BOLL / ALL
    pub kind: Option<String>,
    /// 主周期覆盖
    pub period: Option<usize>,
}

/// 批量对比查询参数
#[derive(Debug, Deserialize)]
pub struct CompareQuery {
    /// 逗号分隔的股票代码
    pub codes: String,
    /// change / volume / turnover
    pub sort: Option<String>,
    pub limit: Option<usize>,
}

/// 热门榜查询参数
#[derive(Debug, Deserialize)]
pub struct HotQuery {
    pub sort: Option<String>,
    pub limit: Option<usize>,
}
