//! 个股快照与盘口解码
//!
//! - 腾讯行情：`v_sh600519="1~贵州茅台~600519~1700.00~..."`，`~` 分隔
//! - 新浪行情：`var hq_str_sh600519="贵州茅台,1690.00,...";`，`,` 分隔

use crate::error::{QuoteError, Result};
use crate::models::{Depth, Snapshot};

use super::fields::{quoted_payload, sina, tencent, Fields};

/// 解码腾讯个股快照
///
/// 字段少于 30 个视为未找到；少于 45 个时基本面字段不可用。
pub fn decode_snapshot(text: &str) -> Result<Snapshot> {
    let payload = quoted_payload(text)?;
    let fields = Fields::split(payload, '~');

    if fields.len() < tencent::MIN_FIELDS {
        return Err(QuoteError::NotFound(format!(
            "行情字段仅 {} 个",
            fields.len()
        )));
    }

    let name = fields.text(tencent::NAME)?.trim();
    if name.is_empty() {
        return Err(QuoteError::MalformedPayload("股票名称为空".to_string()));
    }

    let (pe_ratio, pb_ratio, market_cap_billion) =
        if fields.len() < tencent::MIN_FUNDAMENTAL_FIELDS {
            log::debug!("{} 行情字段 {} 个，基本面不可用", name, fields.len());
            (None, None, None)
        } else {
            let pb_index = if fields.len() > tencent::PB_RATIO_SHIFTED {
                tencent::PB_RATIO_SHIFTED
            } else {
                tencent::PB_RATIO
            };
            (
                fields.optional_number(tencent::PE_RATIO),
                fields.optional_number(pb_index),
                fields.optional_number(tencent::MARKET_CAP),
            )
        };

    Ok(Snapshot {
        name: name.to_string(),
        last_price: fields.number(tencent::LAST_PRICE)?,
        open_price: fields.optional_number(tencent::OPEN_PRICE),
        change_amount: fields.number(tencent::CHANGE_AMOUNT)?,
        change_percent: fields.number(tencent::CHANGE_PERCENT)?,
        volume: fields.number(tencent::VOLUME)?,
        turnover_ratio: fields.optional_number(tencent::TURNOVER_RATIO),
        pe_ratio,
        pb_ratio,
        market_cap_billion,
        ladder: fields.ladder(),
    })
}

/// 解码新浪个股盘口
pub fn decode_depth(text: &str) -> Result<Depth> {
    if !text.contains("=\"") {
        return Err(QuoteError::MalformedPayload("缺少赋值引号".to_string()));
    }

    let fields = Fields::split(quoted_payload(text)?, ',');
    if fields.len() < sina::MIN_FIELDS {
        return Err(QuoteError::NotFound(format!(
            "盘口字段仅 {} 个",
            fields.len()
        )));
    }

    Ok(Depth {
        name: fields.text(sina::NAME)?.trim().to_string(),
        ladder: fields.ladder(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    /// 构造 n 个字段的腾讯报文，按下标覆盖部分字段
    fn tencent_payload(n: usize, overrides: &[(usize, &str)]) -> String {
        let mut fields: Vec<String> = (0..n).map(|i| format!("{}", i)).collect();
        fields[1] = "贵州茅台".to_string();
        for (index, value) in overrides {
            fields[*index] = value.to_string();
        }
        format!("v_sh600519=\"{}\";", fields.join("~"))
    }

    #[test]
    fn test_decode_full_snapshot() {
        let text = tencent_payload(
            50,
            &[
                (3, "1700.50"),
                (5, "1690.00"),
                (6, "35210"),
                (10, "12345"),
                (11, "1700.49"),
                (20, "800"),
                (21, "1700.51"),
                (31, "10.50"),
                (32, "0.62"),
                (38, "0.28"),
                (39, "25.10"),
                (44, "9.99"),
                (45, "21360.80"),
                (46, "8.75"),
            ],
        );

        let snapshot = decode_snapshot(&text).unwrap();
        assert_eq!(snapshot.name, "贵州茅台");
        assert_eq!(snapshot.last_price, 1700.50);
        assert_eq!(snapshot.open_price, Some(1690.00));
        assert_eq!(snapshot.volume, 35210.0);
        assert_eq!(snapshot.change_amount, 10.50);
        assert_eq!(snapshot.change_percent, 0.62);
        assert_eq!(snapshot.turnover_ratio, Some(0.28));
        assert_eq!(snapshot.pe_ratio, Some(25.10));
        // 字段数大于 46 时取第 46 位
        assert_eq!(snapshot.pb_ratio, Some(8.75));
        assert_eq!(snapshot.market_cap_billion, Some(21360.80));

        assert_eq!(snapshot.ladder.bids[0].volume_lots, Some(123));
        assert_eq!(snapshot.ladder.bids[0].price, Some(1700.49));
        assert_eq!(snapshot.ladder.asks[0].volume_lots, Some(8));
        assert_eq!(snapshot.ladder.asks[0].price, Some(1700.51));
    }

    #[test]
    fn test_pb_uses_44_when_not_shifted() {
        let text = tencent_payload(46, &[(3, "10"), (6, "1"), (31, "0"), (32, "0"), (44, "1.23")]);
        let snapshot = decode_snapshot(&text).unwrap();
        assert_eq!(snapshot.pb_ratio, Some(1.23));
    }

    #[test]
    fn test_blank_pe_unavailable() {
        let text = tencent_payload(50, &[(3, "10"), (6, "1"), (31, "0"), (32, "0"), (39, "")]);
        let snapshot = decode_snapshot(&text).unwrap();
        assert_eq!(snapshot.pe_ratio, None);
        assert!(snapshot.fundamentals_available());
    }

    #[test]
    fn test_short_payload_not_found() {
        let text = r#"v_pv_none_match="1";"#;
        assert!(matches!(decode_snapshot(text), Err(QuoteError::NotFound(_))));

        let text = tencent_payload(29, &[]);
        assert!(matches!(decode_snapshot(&text), Err(QuoteError::NotFound(_))));
    }

    #[test]
    fn test_missing_change_fields_insufficient() {
        let text = tencent_payload(31, &[]);
        assert_eq!(
            decode_snapshot(&text),
            Err(QuoteError::InsufficientFields {
                required: 32,
                actual: 31
            })
        );

        let text = tencent_payload(32, &[]);
        assert_eq!(
            decode_snapshot(&text),
            Err(QuoteError::InsufficientFields {
                required: 33,
                actual: 32
            })
        );
    }

    #[test]
    fn test_fundamentals_unavailable_below_45() {
        let text = tencent_payload(40, &[(3, "10"), (6, "1"), (31, "0.1"), (32, "1.0"), (39, "20")]);
        let snapshot = decode_snapshot(&text).unwrap();
        assert_eq!(snapshot.pe_ratio, None);
        assert_eq!(snapshot.pb_ratio, None);
        assert_eq!(snapshot.market_cap_billion, None);
        assert!(!snapshot.fundamentals_available());
    }

    #[test]
    fn test_missing_quote_malformed() {
        assert!(matches!(
            decode_snapshot("v_sh600519=;"),
            Err(QuoteError::MalformedPayload(_))
        ));
    }

    #[test]
    fn test_bad_price_is_error_not_zero() {
        let text = tencent_payload(50, &[(3, "-"), (6, "1"), (31, "0"), (32, "0")]);
        assert!(matches!(
            decode_snapshot(&text),
            Err(QuoteError::MalformedPayload(_))
        ));
    }

    #[test]
    fn test_decode_sina_depth() {
        let mut fields: Vec<String> = (0..33).map(|i| format!("{}", i)).collect();
        fields[0] = "贵州茅台".to_string();
        fields[10] = "12345".to_string();
        fields[11] = "1700.00".to_string();
        fields[28] = "abc".to_string();
        fields[29] = "1701.50".to_string();
        let text = format!("var hq_str_sh600519=\"{}\";", fields.join(","));

        let depth = decode_depth(&text).unwrap();
        assert_eq!(depth.name, "贵州茅台");
        assert_eq!(depth.ladder.bids[0].volume_lots, Some(123));
        assert_eq!(depth.ladder.bids[0].price, Some(1700.00));
        assert_eq!(depth.ladder.asks[4].price, Some(1701.50));
        assert_eq!(depth.ladder.asks[4].volume_lots, None);
    }

    #[test]
    fn test_sina_depth_errors() {
        assert!(matches!(
            decode_depth("var hq_str_sh600519;"),
            Err(QuoteError::MalformedPayload(_))
        ));
        assert!(matches!(
            decode_depth("var hq_str_sz999999=\"\";"),
            Err(QuoteError::NotFound(_))
        ));
    }
}
