//! 定长位置报文的字段表与带越界检查的访问器
//!
//! 字段位置由上游数据源固定，没有版本号也没有 schema，所有下标集中在这里。

use crate::error::{QuoteError, Result};
use crate::models::{LadderLevel, OrderBookLadder};

/// 腾讯个股行情（`~` 分隔）字段下标
pub mod tencent {
    pub const NAME: usize = 1;
    pub const LAST_PRICE: usize = 3;
    pub const OPEN_PRICE: usize = 5;
    pub const VOLUME: usize = 6;
    pub const CHANGE_AMOUNT: usize = 31;
    pub const CHANGE_PERCENT: usize = 32;
    pub const TURNOVER_RATIO: usize = 38;
    pub const PE_RATIO: usize = 39;
    /// 字段数不超过 46 时市净率所在位置
    pub const PB_RATIO: usize = 44;
    pub const MARKET_CAP: usize = 45;
    /// 字段数大于 46 时市净率所在位置（数据源偶尔少一个字段导致尾部错位）
    pub const PB_RATIO_SHIFTED: usize = 46;

    /// 少于该字段数视为未找到
    pub const MIN_FIELDS: usize = 30;
    /// 少于该字段数时基本面字段不可用
    pub const MIN_FUNDAMENTAL_FIELDS: usize = 45;
}

/// 新浪个股行情（`,` 分隔）字段下标
pub mod sina {
    pub const NAME: usize = 0;
    pub const MIN_FIELDS: usize = 30;
}

/// 盘口字段下标，每档为（原始股数，价格）
///
/// 两个数据源的盘口区段位置相同。
pub mod ladder {
    pub const BIDS: [(usize, usize); 5] = [(10, 11), (12, 13), (14, 15), (16, 17), (18, 19)];
    pub const ASKS: [(usize, usize); 5] = [(20, 21), (22, 23), (24, 25), (26, 27), (28, 29)];
}

/// 已切分的定长报文
pub struct Fields<'a> {
    values: Vec<&'a str>,
}

impl<'a> Fields<'a> {
    pub fn split(payload: &'a str, separator: char) -> Self {
        Self {
            values: payload.split(separator).collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// 读取原始文本，越界时返回 InsufficientFields
    pub fn text(&self, index: usize) -> Result<&'a str> {
        self.values
            .get(index)
            .copied()
            .ok_or(QuoteError::InsufficientFields {
                required: index + 1,
                actual: self.values.len(),
            })
    }

    /// 读取必填数值字段，无法解析或非有限值时返回 MalformedPayload
    pub fn number(&self, index: usize) -> Result<f64> {
        let raw = self.text(index)?;
        finite(raw).ok_or_else(|| {
            QuoteError::MalformedPayload(format!("第 {} 个字段不是数值: {:?}", index, raw))
        })
    }

    /// 读取可选数值字段：越界、空白、无法解析或非有限值都视为不可用
    pub fn optional_number(&self, index: usize) -> Option<f64> {
        self.values.get(index).and_then(|raw| finite(raw))
    }

    /// 按固定下标读取五档盘口
    pub fn ladder(&self) -> OrderBookLadder {
        OrderBookLadder {
            asks: ladder::ASKS.map(|(volume, price)| self.level(volume, price)),
            bids: ladder::BIDS.map(|(volume, price)| self.level(volume, price)),
        }
    }

    fn level(&self, volume: usize, price: usize) -> LadderLevel {
        LadderLevel {
            price: self.optional_number(price),
            volume_lots: self.optional_number(volume).and_then(shares_to_lots),
        }
    }
}

/// NaN、inf 不算数值
fn finite(raw: &str) -> Option<f64> {
    raw.trim().parse::<f64>().ok().filter(|x| x.is_finite())
}

/// 原始股数换算为手（100 股），向下取整
pub fn shares_to_lots(shares: f64) -> Option<u64> {
    if shares.is_finite() && shares >= 0.0 {
        Some((shares / 100.0).floor() as u64)
    } else {
        None
    }
}

/// 提取第一个双引号包围的内容
pub fn quoted_payload(line: &str) -> Result<&str> {
    let start = line
        .find('"')
        .ok_or_else(|| QuoteError::MalformedPayload("缺少引号分隔符".to_string()))?;
    let rest = &line[start + 1..];
    let end = rest
        .find('"')
        .ok_or_else(|| QuoteError::MalformedPayload("缺少结束引号".to_string()))?;
    Ok(&rest[..end])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shares_to_lots() {
        assert_eq!(shares_to_lots(12345.0), Some(123));
        assert_eq!(shares_to_lots(99.0), Some(0));
        assert_eq!(shares_to_lots(-1.0), None);
        assert_eq!(shares_to_lots(f64::NAN), None);
    }

    #[test]
    fn test_quoted_payload() {
        assert_eq!(quoted_payload(r#"v_sh600519="1~贵州茅台";"#).unwrap(), "1~贵州茅台");
        assert_eq!(quoted_payload(r#"var x="";"#).unwrap(), "");
        assert!(matches!(
            quoted_payload("pv_none_match=1;"),
            Err(QuoteError::MalformedPayload(_))
        ));
        assert!(matches!(
            quoted_payload(r#"var x="abc"#),
            Err(QuoteError::MalformedPayload(_))
        ));
    }

    #[test]
    fn test_text_out_of_range() {
        let fields = Fields::split("a~b~c", '~');
        assert_eq!(fields.text(2).unwrap(), "c");
        assert_eq!(
            fields.text(5),
            Err(QuoteError::InsufficientFields {
                required: 6,
                actual: 3
            })
        );
    }

    #[test]
    fn test_optional_number_blank() {
        let fields = Fields::split("1.5~~x", '~');
        assert_eq!(fields.optional_number(0), Some(1.5));
        assert_eq!(fields.optional_number(1), None);
        assert_eq!(fields.optional_number(2), None);
        assert_eq!(fields.optional_number(9), None);
    }

    #[test]
    fn test_non_finite_numbers_rejected() {
        let fields = Fields::split("NaN~inf~-inf~2.5", '~');
        assert!(matches!(fields.number(0), Err(QuoteError::MalformedPayload(_))));
        assert!(matches!(fields.number(1), Err(QuoteError::MalformedPayload(_))));
        assert_eq!(fields.optional_number(2), None);
        assert_eq!(fields.number(3), Ok(2.5));
    }
}
