//! K线序列解码
//!
//! 格式: `[{"day":"2024-01-02","open":"10.00","high":"10.50","low":"9.80","close":"10.20","volume":"123456"},...]`
//! 也接受 JSONP 包裹形式 `=([...]);`。顺序按收到的原样保留。

use serde::Deserialize;

use crate::error::{QuoteError, Result};
use crate::models::Bar;

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RawNumber {
    Text(String),
    Number(f64),
}

#[derive(Debug, Deserialize)]
struct RawBar {
    day: String,
    open: RawNumber,
    high: RawNumber,
    low: RawNumber,
    close: RawNumber,
    volume: RawNumber,
}

/// 解码K线序列
///
/// 任意一根K线的数值字段无法解析，整个序列都视为失败，不返回部分结果。
pub fn decode_bars(text: &str) -> Result<Vec<Bar>> {
    let json_str = strip_jsonp(text.trim());

    if json_str.is_empty() || json_str == "null" {
        return Err(QuoteError::NotFound("K线数据为空".to_string()));
    }

    let raw: Vec<RawBar> = serde_json::from_str(json_str)
        .map_err(|e| QuoteError::MalformedPayload(format!("解析K线JSON失败: {}", e)))?;

    raw.into_iter()
        .enumerate()
        .map(|(i, item)| -> Result<Bar> {
            let field = |name: &str, value: &RawNumber| parse_number(value, i, name);
            Ok(Bar {
                date: trim_time(&item.day).to_string(),
                open: field("open", &item.open)?,
                high: field("high", &item.high)?,
                low: field("low", &item.low)?,
                close: field("close", &item.close)?,
                volume: field("volume", &item.volume)?,
            })
        })
        .collect()
}

/// 去掉 JSONP 外壳，保留方括号内的数组
fn strip_jsonp(data: &str) -> &str {
    match (data.find("(["), data.rfind("])")) {
        (Some(start), Some(end)) if start < end => &data[start + 1..end + 1],
        _ => data,
    }
}

/// 日期后可能跟时间部分（分钟线），丢弃
fn trim_time(day: &str) -> &str {
    day.split_whitespace().next().unwrap_or("")
}

fn parse_number(value: &RawNumber, index: usize, name: &str) -> Result<f64> {
    match value {
        RawNumber::Number(n) => Ok(*n),
        RawNumber::Text(s) => s
            .trim()
            .parse::<f64>()
            .ok()
            .filter(|x| x.is_finite())
            .ok_or_else(|| {
                QuoteError::MalformedPayload(format!(
                    "第 {} 根K线 {} 字段无法解析: {:?}",
                    index, name, s
                ))
            }),
    }
}
