//! 技术指标数据模型

use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// 指标类型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum IndicatorKind {
    Rsi,
    Macd,
    Kdj,
    Boll,
}

impl IndicatorKind {
    pub const ALL: [IndicatorKind; 4] = [
        IndicatorKind::Rsi,
        IndicatorKind::Macd,
        IndicatorKind::Kdj,
        IndicatorKind::Boll,
    ];
}

impl FromStr for IndicatorKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "RSI" => Ok(IndicatorKind::Rsi),
            "MACD" => Ok(IndicatorKind::Macd),
            "KDJ" => Ok(IndicatorKind::Kdj),
            "BOLL" | "BB" => Ok(IndicatorKind::Boll),
            other => Err(format!(
                "不支持的指标: {}，可选: RSI, MACD, KDJ, BOLL",
                other
            )),
        }
    }
}

/// 指标参数
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndicatorParams {
    pub rsi_period: usize,
    pub macd_fast: usize,
    pub macd_slow: usize,
    /// 信号线周期，DEA 采用近似算法，此参数仅随结果返回
    pub macd_signal: usize,
    pub kdj_period: usize,
    pub boll_period: usize,
    pub boll_multiplier: f64,
}

impl Default for IndicatorParams {
    fn default() -> Self {
        Self {
            rsi_period: 14,
            macd_fast: 12,
            macd_slow: 26,
            macd_signal: 9,
            kdj_period: 9,
            boll_period: 20,
            boll_multiplier: 2.0,
        }
    }
}

impl IndicatorParams {
    /// 覆盖指定指标的主周期（MACD 为慢线周期）
    pub fn with_period(mut self, kind: IndicatorKind, period: Option<usize>) -> Self {
        if let Some(period) = period {
            match kind {
                IndicatorKind::Rsi => self.rsi_period = period,
                IndicatorKind::Macd => self.macd_slow = period,
                IndicatorKind::Kdj => self.kdj_period = period,
                IndicatorKind::Boll => self.boll_period = period,
            }
        }
        self
    }
}

/// MACD 结果
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Macd {
    pub dif: f64,
    pub dea: f64,
    pub macd: f64,
}

/// KDJ 结果
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Kdj {
    pub k: f64,
    pub d: f64,
    pub j: f64,
}

impl Kdj {
    /// 历史不足时的中性值
    pub const NEUTRAL: Kdj = Kdj {
        k: 50.0,
        d: 50.0,
        j: 50.0,
    };
}

/// 布林带结果
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Boll {
    pub upper: f64,
    pub middle: f64,
    pub lower: f64,
}

/// 单个指标的计算结果
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "indicator", rename_all = "UPPERCASE")]
pub enum IndicatorResult {
    Rsi { value: f64 },
    Macd(Macd),
    Kdj(Kdj),
    Boll(Boll),
}

impl IndicatorResult {
    pub fn kind(&self) -> IndicatorKind {
        match self {
            IndicatorResult::Rsi { .. } => IndicatorKind::Rsi,
            IndicatorResult::Macd(_) => IndicatorKind::Macd,
            IndicatorResult::Kdj(_) => IndicatorKind::Kdj,
            IndicatorResult::Boll(_) => IndicatorKind::Boll,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_kind() {
        assert_eq!("rsi".parse::<IndicatorKind>(), Ok(IndicatorKind::Rsi));
        assert_eq!(" Macd ".parse::<IndicatorKind>(), Ok(IndicatorKind::Macd));
        assert_eq!("BB".parse::<IndicatorKind>(), Ok(IndicatorKind::Boll));
        assert!("ATR".parse::<IndicatorKind>().is_err());
    }

    #[test]
    fn test_with_period_overrides_primary_only() {
        let params = IndicatorParams::default().with_period(IndicatorKind::Boll, Some(10));
        assert_eq!(params.boll_period, 10);
        assert_eq!(params.rsi_period, 14);

        let params = IndicatorParams::default().with_period(IndicatorKind::Rsi, None);
        assert_eq!(params, IndicatorParams::default());
    }

    #[test]
    fn test_result_serialization() {
        let value = serde_json::to_value(IndicatorResult::Rsi { value: 50.0 }).unwrap();
        assert_eq!(value["indicator"], "RSI");
        assert_eq!(value["value"], 50.0);

        let value = serde_json::to_value(IndicatorResult::Kdj(Kdj::NEUTRAL)).unwrap();
        assert_eq!(value["indicator"], "KDJ");
        assert_eq!(value["k"], 50.0);
    }
}
