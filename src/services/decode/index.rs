//! 新浪简版指数行情解码
//!
//! 每个指数一行：`var hq_str_s_sh000001="上证指数,3000.00,3010.00,-0.33,...";`

use std::collections::HashMap;

use crate::error::{QuoteError, Result};
use crate::models::IndexQuote;

use super::fields::{quoted_payload, Fields};

/// 赋值语句中数据源键前的标记
const KEY_MARKER: &str = "str_";
/// 短于该长度的行直接跳过（空行、结尾换行）
const MIN_LINE_LEN: usize = 10;

/// 解码指数行情
///
/// `key_table` 为 数据源键 → 展示名称。表中没有的键、以及无法解析的行一律跳过，
/// 该函数不会失败。
pub fn decode_index_set(text: &str, key_table: &HashMap<String, String>) -> Vec<IndexQuote> {
    let mut quotes = Vec::new();

    for line in text.lines() {
        if line.chars().count() < MIN_LINE_LEN {
            continue;
        }

        match decode_line(line, key_table) {
            Ok(Some(quote)) => quotes.push(quote),
            Ok(None) => {}
            Err(e) => log::debug!("跳过无法解析的指数行: {} ({})", line, e),
        }
    }

    quotes
}

fn decode_line(line: &str, key_table: &HashMap<String, String>) -> Result<Option<IndexQuote>> {
    let key = assignment_key(line)?;
    let Some(name) = key_table.get(key) else {
        return Ok(None);
    };

    let fields = Fields::split(quoted_payload(line)?, ',');
    Ok(Some(IndexQuote {
        code: key.to_string(),
        name: name.clone(),
        price: fields.text(1)?.to_string(),
        change_percent: fields.text(3)?.to_string(),
    }))
}

/// 取标记与 `=` 之间的键
fn assignment_key(line: &str) -> Result<&str> {
    let (lhs, _) = line
        .split_once('=')
        .ok_or_else(|| QuoteError::MalformedPayload("缺少赋值符号".to_string()))?;
    let start = lhs
        .find(KEY_MARKER)
        .ok_or_else(|| QuoteError::MalformedPayload("缺少键标记".to_string()))?;
    Ok(lhs[start + KEY_MARKER.len()..].trim())
}

/// 三大指数的默认键表
pub fn headline_key_table() -> HashMap<String, String> {
    crate::services::common::HEADLINE_INDICES
        .iter()
        .map(|(key, name)| (key.to_string(), name.to_string()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const MOCK_INDEX_TEXT: &str = "var hq_str_s_sh000001=\"上证指数,3000.00,3010.00,-0.33,2323820,30477966\";\n\
var hq_str_s_sz399001=\"深证成指,9500.12,25.30,0.27,331813459,42381965\";\n\
var hq_str_s_sz399006=\"创业板指,1850.55,-12.01,-0.64,12312312,1231231\";\n";

    #[test]
    fn test_decode_headline_indices() {
        let quotes = decode_index_set(MOCK_INDEX_TEXT, &headline_key_table());

        assert_eq!(quotes.len(), 3);
        assert_eq!(
            quotes[0],
            IndexQuote {
                code: "s_sh000001".to_string(),
                name: "上证指数".to_string(),
                price: "3000.00".to_string(),
                change_percent: "-0.33".to_string(),
            }
        );
        assert_eq!(quotes[2].name, "创业板指");
        assert_eq!(quotes[2].change_percent, "-0.64");
    }

    #[test]
    fn test_unknown_keys_and_short_lines_skipped() {
        let text = "var hq_str_s_sh000300=\"沪深300,3500.00,1.00,0.03\";\n\n;\nvar hq_str_s_sh000001=\"上证指数,3000.00,3010.00,-0.33,...\";";
        let mut table = HashMap::new();
        table.insert("s_sh000001".to_string(), "上证指数".to_string());

        let quotes = decode_index_set(text, &table);
        assert_eq!(quotes.len(), 1);
        assert_eq!(quotes[0].price, "3000.00");
    }

    #[test]
    fn test_malformed_known_line_skipped() {
        let text = "var hq_str_s_sh000001=\"上证指数,3000.00\";\nvar hq_str_s_sz399001 broken line";
        let quotes = decode_index_set(text, &headline_key_table());
        assert!(quotes.is_empty());
    }
}
